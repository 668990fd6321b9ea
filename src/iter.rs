//! Depth-first iterators over a [`PathMap`](crate::PathMap).
//!
//! All of them report a node's value before the values below it and finish
//! one child's subtree before moving on to its sibling. Sibling order is that
//! of the underlying `HashMap`.

use std::collections::hash_map;
use std::iter::FusedIterator;
use std::vec;

use crate::Node;

/// Iterator over `(path, &value)` pairs, created by
/// [`PathMap::iter`](crate::PathMap::iter).
pub struct Iter<'a, K, V, S> {
    /// Set until the root's own value has been considered.
    root: Option<&'a Node<K, V, S>>,
    /// One children iterator per level of the current descent.
    stack: Vec<hash_map::Iter<'a, K, Node<K, V, S>>>,
    /// Segments leading to the node whose children are on top of `stack`.
    path: Vec<K>,
    remaining: usize,
}

impl<'a, K, V, S> Iter<'a, K, V, S> {
    pub(crate) fn new(root: &'a Node<K, V, S>, len: usize) -> Self {
        Self {
            root: Some(root),
            stack: vec![root.children.iter()],
            path: Vec::new(),
            remaining: len,
        }
    }
}

impl<'a, K: Clone, V, S> Iterator for Iter<'a, K, V, S> {
    type Item = (Vec<K>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        if let Some(value) = self.root.take().and_then(|root| root.value.as_ref()) {
            self.remaining -= 1;
            return Some((Vec::new(), value));
        }

        loop {
            let level = self.stack.last_mut()?;
            let Some((segment, child)) = level.next() else {
                self.stack.pop();
                self.path.pop();
                continue;
            };

            self.path.push(segment.clone());
            self.stack.push(child.children.iter());
            if let Some(value) = child.value.as_ref() {
                self.remaining -= 1;
                return Some((self.path.clone(), value));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Clone, V, S> ExactSizeIterator for Iter<'_, K, V, S> {}

impl<K: Clone, V, S> FusedIterator for Iter<'_, K, V, S> {}

/// Iterator over stored paths, created by [`PathMap::keys`](crate::PathMap::keys).
pub struct Keys<'a, K, V, S> {
    inner: Iter<'a, K, V, S>,
}

impl<'a, K, V, S> Keys<'a, K, V, S> {
    pub(crate) fn new(inner: Iter<'a, K, V, S>) -> Self {
        Self { inner }
    }
}

impl<K: Clone, V, S> Iterator for Keys<'_, K, V, S> {
    type Item = Vec<K>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(path, _)| path)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: Clone, V, S> ExactSizeIterator for Keys<'_, K, V, S> {}

impl<K: Clone, V, S> FusedIterator for Keys<'_, K, V, S> {}

/// Iterator over stored values, created by
/// [`PathMap::values`](crate::PathMap::values).
///
/// Walks the nodes directly, so paths are never rebuilt and `K` need not be
/// `Clone`.
pub struct Values<'a, K, V, S> {
    stack: Vec<&'a Node<K, V, S>>,
    remaining: usize,
}

impl<'a, K, V, S> Values<'a, K, V, S> {
    pub(crate) fn new(root: &'a Node<K, V, S>, len: usize) -> Self {
        Self {
            stack: vec![root],
            remaining: len,
        }
    }
}

impl<'a, K, V, S> Iterator for Values<'a, K, V, S> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        while let Some(node) = self.stack.pop() {
            self.stack.extend(node.children.values());
            if let Some(value) = node.value.as_ref() {
                self.remaining -= 1;
                return Some(value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, S> ExactSizeIterator for Values<'_, K, V, S> {}

impl<K, V, S> FusedIterator for Values<'_, K, V, S> {}

/// Owning iterator over `(path, value)` pairs, created by
/// `PathMap::into_iter`.
pub struct IntoIter<K, V, S> {
    root_value: Option<V>,
    /// Children are moved out of their node as it is entered, so the emptied
    /// node drops without touching the subtree below.
    stack: Vec<vec::IntoIter<(K, Node<K, V, S>)>>,
    path: Vec<K>,
    remaining: usize,
}

impl<K, V, S> IntoIter<K, V, S> {
    pub(crate) fn new(mut root: Node<K, V, S>, len: usize) -> Self {
        Self {
            root_value: root.value.take(),
            stack: vec![detach_children(&mut root)],
            path: Vec::new(),
            remaining: len,
        }
    }
}

fn detach_children<K, V, S>(node: &mut Node<K, V, S>) -> vec::IntoIter<(K, Node<K, V, S>)> {
    node.children.drain().collect::<Vec<_>>().into_iter()
}

impl<K: Clone, V, S> Iterator for IntoIter<K, V, S> {
    type Item = (Vec<K>, V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        if let Some(value) = self.root_value.take() {
            self.remaining -= 1;
            return Some((Vec::new(), value));
        }

        loop {
            let level = self.stack.last_mut()?;
            let Some((segment, mut child)) = level.next() else {
                self.stack.pop();
                self.path.pop();
                continue;
            };

            self.path.push(segment);
            self.stack.push(detach_children(&mut child));
            if let Some(value) = child.value.take() {
                self.remaining -= 1;
                return Some((self.path.clone(), value));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Clone, V, S> ExactSizeIterator for IntoIter<K, V, S> {}

impl<K: Clone, V, S> FusedIterator for IntoIter<K, V, S> {}
