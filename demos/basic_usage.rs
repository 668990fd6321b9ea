//! Basic usage of `PathMap`.
//!
//! Run with: cargo run --example basic_usage

use path_map::PathMap;

fn main() {
    let mut map: PathMap<&str, u32> = PathMap::new();

    map.insert(["home", "alice", "notes.txt"], 12);
    map.insert(["home", "alice"], 1);
    map.insert(["home", "bob", "todo.md"], 7);
    map.insert([], 0);

    println!("entries: {}", map.len());
    println!("get [home, alice] = {:?}", map.get(["home", "alice"]));
    println!("get [home] = {:?}", map.get(["home"]));
    println!("has [home, bob] = {}", map.contains_key(["home", "bob"]));
    println!("has prefix [home, bob] = {}", map.has_prefix(["home", "bob"]));
    println!("has prefix [etc] = {}", map.has_prefix(["etc"]));

    // Removing the only path below "bob" prunes the whole branch.
    map.remove(["home", "bob", "todo.md"]);
    println!("has prefix [home, bob] = {}", map.has_prefix(["home", "bob"]));
    println!("nodes: {}", map.node_count());

    let mut entries: Vec<(Vec<&str>, &u32)> = map.iter().collect();
    entries.sort();
    for (path, value) in entries {
        println!("{path:?} -> {value}");
    }
}
