//! # path-map
//!
//! A map keyed by sequences of values ("paths") instead of single values.
//!
//! Paths are stored as a tree of hash maps: every node maps one path segment
//! to a child node and may carry a value of its own. Paths that share a prefix
//! share the nodes along it, and removing a path prunes every node that no
//! longer leads to a value, so memory tracks the live entries only.
//!
//! Besides the usual map operations the tree answers prefix queries: whether
//! any stored path starts with a given sequence.
//!
//! ## Example
//!
//! ```rust
//! use path_map::PathMap;
//!
//! let mut map: PathMap<&str, u32> = PathMap::new();
//! map.insert(["usr", "bin"], 1);
//! map.insert(["usr", "lib"], 2);
//! map.insert([], 0);
//!
//! assert_eq!(map.get(["usr", "bin"]), Some(&1));
//! assert_eq!(map.get(["usr"]), None);
//! assert!(map.has_prefix(["usr"]));
//! assert!(!map.has_prefix(["etc"]));
//! assert_eq!(map.len(), 3);
//!
//! assert_eq!(map.remove(["usr", "lib"]), Some(2));
//! assert_eq!(map.len(), 2);
//! ```
//!
//! ## Segment equality
//!
//! Segments are compared with their `Hash` and `Eq` implementations, exactly
//! like `HashMap` keys. Wrap segments in a key type with pointer-based `Eq` to
//! get identity semantics.
//!
//! ## Iteration order
//!
//! Iterators walk the tree depth first: a node's value comes before the values
//! below it, and each child's subtree is visited without interleaving. The
//! order among siblings follows the underlying `HashMap` and is unspecified.

#![warn(missing_docs)]

use std::borrow::Borrow;
use std::collections::hash_map::{self, RandomState};
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};

pub mod iter;

pub use iter::{IntoIter, Iter, Keys, Values};

// =============================================================================
// Node
// =============================================================================

/// One level of the tree. The value slot is kept apart from `children` so
/// that no segment can ever collide with it.
///
/// Teardown, copying and comparison all use explicit stacks, so a path's
/// length never turns into call-stack depth.
struct Node<K, V, S> {
    children: HashMap<K, Node<K, V, S>, S>,
    value: Option<V>,
}

impl<K, V, S> Node<K, V, S> {
    fn with_hasher(hash_builder: S) -> Self {
        Self {
            children: HashMap::with_hasher(hash_builder),
            value: None,
        }
    }

    /// Leads to no value. Only the root may be in this state.
    #[inline]
    fn is_dead(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }
}

impl<K, V, S> Node<K, V, S>
where
    K: Clone + Hash + Eq,
    V: Clone,
    S: BuildHasher + Clone,
{
    /// Copy of this node's value with room for its children, but none of them.
    fn detached_copy(&self, hash_builder: &S) -> Self {
        Self {
            children: HashMap::with_capacity_and_hasher(self.children.len(), hash_builder.clone()),
            value: self.value.clone(),
        }
    }

    /// Deep copy of the subtree, built bottom-up from an explicit stack.
    fn clone_tree(&self, hash_builder: &S) -> Self {
        let mut copy = self.detached_copy(hash_builder);
        let mut root_children = self.children.iter();
        let mut stack: Vec<(&K, hash_map::Iter<'_, K, Self>, Self)> = Vec::new();

        loop {
            let next = match stack.last_mut() {
                Some((_, children, _)) => children.next(),
                None => root_children.next(),
            };

            match next {
                Some((segment, child)) => {
                    let child_copy = child.detached_copy(hash_builder);
                    stack.push((segment, child.children.iter(), child_copy));
                }
                None => {
                    let Some((segment, _, finished)) = stack.pop() else {
                        return copy;
                    };
                    let parent = match stack.last_mut() {
                        Some((_, _, parent)) => parent,
                        None => &mut copy,
                    };
                    parent.children.insert(segment.clone(), finished);
                }
            }
        }
    }
}

impl<K, V, S> Drop for Node<K, V, S> {
    fn drop(&mut self) {
        let mut stack: Vec<Node<K, V, S>> = self.children.drain().map(|(_, child)| child).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.drain().map(|(_, child)| child));
        }
    }
}

// Pruning keeps the tree canonical, so structural equality is map equality.
impl<K, V, S> PartialEq for Node<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            if a.value != b.value || a.children.len() != b.children.len() {
                return false;
            }
            for (segment, child) in &a.children {
                let Some(other_child) = b.children.get(segment) else {
                    return false;
                };
                stack.push((child, other_child));
            }
        }
        true
    }
}

// =============================================================================
// PathMap
// =============================================================================

/// Map from paths (finite sequences of `K`) to values of type `V`.
///
/// - Each node owns its children; there are no back-pointers.
/// - The empty path addresses the root's own value.
/// - Removal unlinks every node left without children and without a value.
/// - `len` is maintained incrementally.
///
/// Mutation needs `&mut self`, so a path map cannot change while one of its
/// iterators is alive. Sharing one between threads needs external locking.
pub struct PathMap<K, V, S = RandomState> {
    root: Node<K, V, S>,
    hash_builder: S,
    len: usize,
}

impl<K, V> PathMap<K, V, RandomState> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }
}

impl<K, V, S: Clone> PathMap<K, V, S> {
    /// Creates an empty map whose nodes hash segments with `hash_builder`.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            root: Node::with_hasher(hash_builder.clone()),
            hash_builder,
            len: 0,
        }
    }
}

impl<K, V, S> PathMap<K, V, S> {
    /// Number of paths holding a value.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no path holds a value.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The hasher every node of this map was built with.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Number of live nodes, root included.
    ///
    /// An empty map has exactly one node. Every other node lies on the path to
    /// at least one value, so this never exceeds one plus the summed lengths of
    /// the stored paths.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.values());
        }
        count
    }

    /// Removes every entry, the one at the empty path included.
    pub fn clear(&mut self) {
        self.root.children.clear();
        self.root.value = None;
        self.len = 0;
    }

    /// Iterates over `(path, &value)` pairs.
    ///
    /// Each path is a freshly built `Vec`; changing it has no effect on the map.
    pub fn iter(&self) -> Iter<'_, K, V, S> {
        Iter::new(&self.root, self.len)
    }

    /// Iterates over the stored paths.
    pub fn keys(&self) -> Keys<'_, K, V, S> {
        Keys::new(self.iter())
    }

    /// Iterates over the stored values without rebuilding their paths.
    pub fn values(&self) -> Values<'_, K, V, S> {
        Values::new(&self.root, self.len)
    }

    /// Calls `f` with every `(path, &value)` pair, in iteration order.
    ///
    /// The map itself is not passed along; `f` can capture `&self` if it needs it.
    pub fn for_each<F>(&self, mut f: F)
    where
        K: Clone,
        F: FnMut(Vec<K>, &V),
    {
        for (path, value) in self.iter() {
            f(path, value);
        }
    }
}

impl<K, V, S> PathMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Clone,
{
    /// Stores `value` at `path`, creating the missing nodes along it.
    ///
    /// Returns the value previously stored at `path`, if any. `len` grows only
    /// when there was none.
    pub fn insert<P>(&mut self, path: P, value: V) -> Option<V>
    where
        P: IntoIterator<Item = K>,
    {
        let hash_builder = &self.hash_builder;
        let mut node = &mut self.root;
        for segment in path {
            node = node
                .children
                .entry(segment)
                .or_insert_with(|| Node::with_hasher(hash_builder.clone()));
        }

        let old = node.value.replace(value);
        if old.is_none() {
            self.len += 1;
        }
        old
    }

    /// Returns the value stored at exactly `path`.
    pub fn get<'q, Q, P>(&self, path: P) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'q,
        P: IntoIterator<Item = &'q Q>,
    {
        self.descend(path)?.value.as_ref()
    }

    /// Returns a mutable reference to the value stored at exactly `path`.
    pub fn get_mut<'q, Q, P>(&mut self, path: P) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'q,
        P: IntoIterator<Item = &'q Q>,
    {
        self.descend_mut(path)?.value.as_mut()
    }

    /// Whether a value is stored at exactly `path`.
    ///
    /// A path that only leads through the tree to longer paths is not a key.
    pub fn contains_key<'q, Q, P>(&self, path: P) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'q,
        P: IntoIterator<Item = &'q Q>,
    {
        self.descend(path).is_some_and(|node| node.value.is_some())
    }

    /// Whether some stored path starts with `path`.
    ///
    /// The empty path is a prefix of every map, even an empty one.
    pub fn has_prefix<'q, Q, P>(&self, path: P) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'q,
        P: IntoIterator<Item = &'q Q>,
    {
        self.descend(path).is_some()
    }

    /// Removes the value stored at `path` and returns it.
    ///
    /// Nodes left with neither children nor a value are unlinked, from the
    /// deepest one up to the first ancestor that still holds something. The
    /// root always stays. Returns `None` without touching the tree when
    /// nothing is stored at `path`.
    pub fn remove<'q, Q, P>(&mut self, path: P) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'q,
        P: IntoIterator<Item = &'q Q>,
    {
        let path: Vec<&'q Q> = path.into_iter().collect();

        // Depth of the deepest strict ancestor that survives the removal.
        let mut keep = 0;
        let mut node = &self.root;
        for (depth, segment) in path.iter().enumerate() {
            if node.value.is_some() || node.children.len() > 1 {
                keep = depth;
            }
            node = node.children.get(*segment)?;
        }
        node.value.as_ref()?;

        // A leaf takes the dead chain above it down with it.
        let split = if node.children.is_empty() { keep } else { path.len() };
        let (head, tail) = path.split_at(split);

        let mut survivor = &mut self.root;
        for segment in head {
            survivor = survivor.children.get_mut(*segment)?;
        }

        let old = match tail.split_first() {
            Some((first, rest)) => {
                let mut chain = survivor.children.remove(*first)?;
                let mut terminal = &mut chain;
                for segment in rest {
                    terminal = terminal.children.get_mut(*segment)?;
                }
                terminal.value.take()
            }
            None => survivor.value.take(),
        }?;
        self.len -= 1;
        Some(old)
    }

    fn descend<'q, Q, P>(&self, path: P) -> Option<&Node<K, V, S>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'q,
        P: IntoIterator<Item = &'q Q>,
    {
        let mut node = &self.root;
        for segment in path {
            node = node.children.get(segment)?;
        }
        Some(node)
    }

    fn descend_mut<'q, Q, P>(&mut self, path: P) -> Option<&mut Node<K, V, S>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'q,
        P: IntoIterator<Item = &'q Q>,
    {
        let mut node = &mut self.root;
        for segment in path {
            node = node.children.get_mut(segment)?;
        }
        Some(node)
    }
}

impl<K, V, S> Clone for PathMap<K, V, S>
where
    K: Clone + Hash + Eq,
    V: Clone,
    S: BuildHasher + Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone_tree(&self.hash_builder),
            hash_builder: self.hash_builder.clone(),
            len: self.len,
        }
    }
}

impl<K, V, S: Default + Clone> Default for PathMap<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K: Clone + fmt::Debug, V: fmt::Debug, S> fmt::Debug for PathMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> PartialEq for PathMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.root == other.root
    }
}

impl<K, V, S> Eq for PathMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S, P> Extend<(P, V)> for PathMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Clone,
    P: IntoIterator<Item = K>,
{
    fn extend<I: IntoIterator<Item = (P, V)>>(&mut self, entries: I) {
        for (path, value) in entries {
            self.insert(path, value);
        }
    }
}

impl<K, V, S, P> FromIterator<(P, V)> for PathMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Clone + Default,
    P: IntoIterator<Item = K>,
{
    fn from_iter<I: IntoIterator<Item = (P, V)>>(entries: I) -> Self {
        let mut map = Self::default();
        map.extend(entries);
        map
    }
}

impl<K, V, P, const N: usize> From<[(P, V); N]> for PathMap<K, V, RandomState>
where
    K: Hash + Eq,
    P: IntoIterator<Item = K>,
{
    fn from(entries: [(P, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<'a, K: Clone, V, S> IntoIterator for &'a PathMap<K, V, S> {
    type Item = (Vec<K>, &'a V);
    type IntoIter = Iter<'a, K, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Clone, V, S> IntoIterator for PathMap<K, V, S> {
    type Item = (Vec<K>, V);
    type IntoIter = IntoIter<K, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.root, self.len)
    }
}


#[cfg(test)]
mod proptests;
