use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::BTreeMap;

fn validate_map<K, V, S>(t: &PathMap<K, V, S>) {
    let mut stack = vec![(&t.root, true)];
    let mut value_count = 0usize;
    while let Some((node, is_root)) = stack.pop() {
        assert!(
            is_root || !node.is_dead(),
            "node without children or value should have been pruned"
        );
        if node.value.is_some() {
            value_count += 1;
        }
        stack.extend(node.children.values().map(|child| (child, false)));
    }

    assert_eq!(
        value_count, t.len,
        "stored value count must match PathMap::len"
    );
}

fn path_strategy() -> impl Strategy<Value = Vec<u8>> {
    // A four-letter alphabet keeps shared prefixes common.
    prop::collection::vec(0u8..4, 0..=6)
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 40)]
    Insert(#[proptest(strategy = "path_strategy()")] Vec<u8>, u16),
    #[proptest(weight = 30)]
    Remove(#[proptest(strategy = "path_strategy()")] Vec<u8>),
    #[proptest(weight = 15)]
    Get(#[proptest(strategy = "path_strategy()")] Vec<u8>),
    #[proptest(weight = 14)]
    HasPrefix(#[proptest(strategy = "path_strategy()")] Vec<u8>),
    #[proptest(weight = 1)]
    Clear,
}

fn sorted_entries(t: &PathMap<u8, u16>) -> Vec<(Vec<u8>, u16)> {
    let mut entries: Vec<(Vec<u8>, u16)> = t.iter().map(|(k, v)| (k, *v)).collect();
    entries.sort();
    entries
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in prop::collection::vec(any::<Op>(), 0..=1000)) {
        let mut t: PathMap<u8, u16> = PathMap::new();
        let mut m: BTreeMap<Vec<u8>, u16> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(path, value) => {
                    let old_t = t.insert(path.iter().copied(), value);
                    let old_m = m.insert(path, value);
                    prop_assert_eq!(old_t, old_m);
                }
                Op::Remove(path) => {
                    let old_t = t.remove(&path);
                    let old_m = m.remove(&path);
                    prop_assert_eq!(old_t, old_m);
                }
                Op::Get(path) => {
                    prop_assert_eq!(t.get(&path), m.get(&path));
                    prop_assert_eq!(t.contains_key(&path), m.contains_key(&path));
                }
                Op::HasPrefix(path) => {
                    // Pruning guarantees every reachable node leads to a key.
                    let expected = path.is_empty() || m.keys().any(|key| key.starts_with(&path));
                    prop_assert_eq!(t.has_prefix(&path), expected);
                }
                Op::Clear => {
                    t.clear();
                    m.clear();
                }
            }

            prop_assert_eq!(t.len(), m.len());
        }

        validate_map(&t);
        let expected: Vec<(Vec<u8>, u16)> = m.into_iter().collect();
        prop_assert_eq!(sorted_entries(&t), expected);
    }

    #[test]
    fn prop_rebuild_from_entries(entries in prop::collection::vec((path_strategy(), any::<u16>()), 0..=200)) {
        let original: PathMap<u8, u16> = entries.into_iter().collect();
        let copy: PathMap<u8, u16> = original.iter().map(|(k, v)| (k, *v)).collect();

        validate_map(&copy);
        prop_assert_eq!(copy.node_count(), original.node_count());
        prop_assert_eq!(sorted_entries(&copy), sorted_entries(&original));
        prop_assert_eq!(copy, original);
    }

    #[test]
    fn prop_removing_everything_prunes_to_root(entries in prop::collection::vec((path_strategy(), any::<u16>()), 0..=200)) {
        let mut t: PathMap<u8, u16> = entries.into_iter().collect();
        let paths: Vec<Vec<u8>> = t.keys().collect();

        for path in &paths {
            prop_assert!(t.remove(path).is_some());
            prop_assert!(!t.contains_key(path));
            validate_map(&t);
        }

        prop_assert!(t.is_empty());
        prop_assert_eq!(t.node_count(), 1);
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

fn small_paths() -> Vec<Vec<u8>> {
    vec![
        vec![],
        b"a".to_vec(),
        b"b".to_vec(),
        b"aa".to_vec(),
        b"ab".to_vec(),
        b"aab".to_vec(),
    ]
}

#[test]
fn exhaustive_insert_order_small_set() {
    let paths = small_paths();
    let mut reference: Option<PathMap<u8, usize>> = None;

    for_each_permutation(&paths, |perm| {
        let mut t: PathMap<u8, usize> = PathMap::new();
        for k in perm {
            let v = k.len();
            assert_eq!(t.insert(k, v), None);
        }

        validate_map(&t);
        // root, a, b, aa, ab, aab
        assert_eq!(t.node_count(), 6);
        let expected = reference.get_or_insert_with(|| t.clone());
        assert_eq!(&t, expected);
    });
}

#[test]
fn exhaustive_remove_order_small_set() {
    let paths = small_paths();

    // Insert in a fixed order, then remove in all permutations.
    let mut base_tree: PathMap<u8, u64> = PathMap::new();
    let mut base_map: BTreeMap<Vec<u8>, u64> = BTreeMap::new();
    for (i, k) in paths.iter().enumerate() {
        let v = i as u64;
        assert_eq!(base_tree.insert(k.iter().copied(), v), base_map.insert(k.clone(), v));
    }

    for_each_permutation(&paths, |perm| {
        let mut t = base_tree.clone();
        let mut m = base_map.clone();

        for k in perm {
            assert_eq!(t.remove(&k), m.remove(&k));
            assert_eq!(t.len(), m.len());
            validate_map(&t);
            for rest in m.keys() {
                assert!(t.has_prefix(rest));
            }
        }
        assert_eq!(t.len(), 0);
        assert_eq!(t.node_count(), 1);
    });
}
