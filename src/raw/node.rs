use core::borrow::Borrow;

use smallvec::SmallVec;

use super::handle::Handle;

// Small fan-out under test so a handful of keys already builds a multi-level tree.
#[cfg(test)]
pub(crate) const ORDER: usize = 4;
#[cfg(not(test))]
pub(crate) const ORDER: usize = 64;

pub(crate) const MAX_CHILDREN: usize = ORDER;
pub(crate) const MAX_KEYS: usize = MAX_CHILDREN - 1;

#[derive(Clone)]
pub(crate) enum Node<K> {
    Internal(InternalNode<K>),
    Leaf(LeafNode<K>),
}

// keys[i] is the largest key reachable through children[i]; the last child has no separator.
#[derive(Clone)]
pub(crate) struct InternalNode<K> {
    // +1 leaves room for the overflow entry that triggers a split.
    keys: SmallVec<[K; MAX_KEYS + 1]>,
    children: SmallVec<[Handle; MAX_CHILDREN + 1]>,
}

// Leaves hold every key in sorted order plus handles into the value arena.
#[derive(Clone)]
pub(crate) struct LeafNode<K> {
    prev: Option<Handle>,
    next: Option<Handle>,
    keys: SmallVec<[K; MAX_KEYS + 1]>,
    values: SmallVec<[Handle; MAX_KEYS + 1]>,
}

/// Outcome of a binary search inside a leaf.
pub(crate) enum SearchResult {
    Found(usize),
    /// Position the key would occupy.
    NotFound(usize),
}

impl<K> Node<K> {
    pub(crate) fn as_leaf(&self) -> &LeafNode<K> {
        match self {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => panic!("`Node::as_leaf()` - node is internal!"),
        }
    }

    pub(crate) fn as_leaf_mut(&mut self) -> &mut LeafNode<K> {
        match self {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => panic!("`Node::as_leaf_mut()` - node is internal!"),
        }
    }

    pub(crate) fn as_internal_mut(&mut self) -> &mut InternalNode<K> {
        match self {
            Node::Internal(internal) => internal,
            Node::Leaf(_) => panic!("`Node::as_internal_mut()` - node is a leaf!"),
        }
    }
}

impl<K> InternalNode<K> {
    /// Builds a root over two children after the old root split.
    pub(crate) fn with_children(left: Handle, separator: K, right: Handle) -> Self {
        let mut node = Self {
            keys: SmallVec::new(),
            children: SmallVec::new(),
        };
        node.keys.push(separator);
        node.children.push(left);
        node.children.push(right);
        node
    }

    pub(crate) fn key_count(&self) -> usize {
        self.keys.len()
    }

    #[cfg(test)]
    pub(crate) fn keys(&self) -> &[K] {
        &self.keys
    }

    #[cfg(test)]
    pub(crate) fn children(&self) -> &[Handle] {
        &self.children
    }

    #[inline]
    pub(crate) fn child(&self, index: usize) -> Handle {
        self.children[index]
    }

    /// Index of the child whose key range covers `key`.
    #[inline]
    pub(crate) fn search_child<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        // First separator >= key; falling off the end selects the last child.
        match self.keys.binary_search_by(|k| k.borrow().cmp(key)) {
            Ok(index) | Err(index) => index,
        }
    }

    /// Records that `children[index]` split and `right` now follows it.
    pub(crate) fn insert_child(&mut self, index: usize, separator: K, right: Handle) {
        self.keys.insert(index, separator);
        self.children.insert(index + 1, right);
    }

    /// Moves the upper half into a new sibling and returns the separator that moves up.
    pub(crate) fn split(&mut self) -> (K, InternalNode<K>) {
        let mid = self.keys.len() / 2;
        let right = InternalNode {
            keys: self.keys.drain(mid + 1..).collect(),
            children: self.children.drain(mid + 1..).collect(),
        };
        let median = self.keys.pop().expect("`InternalNode::split()` - node has no keys!");
        (median, right)
    }
}

impl<K> LeafNode<K> {
    pub(crate) fn new() -> Self {
        Self {
            prev: None,
            next: None,
            keys: SmallVec::new(),
            values: SmallVec::new(),
        }
    }

    pub(crate) fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub(crate) fn prev(&self) -> Option<Handle> {
        self.prev
    }

    pub(crate) fn set_prev(&mut self, prev: Option<Handle>) {
        self.prev = prev;
    }

    pub(crate) fn next(&self) -> Option<Handle> {
        self.next
    }

    pub(crate) fn set_next(&mut self, next: Option<Handle>) {
        self.next = next;
    }

    #[inline]
    pub(crate) fn key(&self, index: usize) -> &K {
        &self.keys[index]
    }

    #[cfg(test)]
    pub(crate) fn keys(&self) -> &[K] {
        &self.keys
    }

    #[inline]
    pub(crate) fn value(&self, index: usize) -> Handle {
        self.values[index]
    }

    #[inline]
    pub(crate) fn search<Q>(&self, key: &Q) -> SearchResult
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match self.keys.binary_search_by(|k| k.borrow().cmp(key)) {
            Ok(index) => SearchResult::Found(index),
            Err(index) => SearchResult::NotFound(index),
        }
    }

    pub(crate) fn insert(&mut self, index: usize, key: K, value: Handle) {
        self.keys.insert(index, key);
        self.values.insert(index, value);
    }

    /// Empties the leaf, handing back its keys and value handles in order.
    pub(crate) fn take_all(&mut self) -> (SmallVec<[K; MAX_KEYS + 1]>, SmallVec<[Handle; MAX_KEYS + 1]>) {
        (core::mem::take(&mut self.keys), core::mem::take(&mut self.values))
    }

    /// Moves the upper half into a new leaf. The returned separator is the new largest key on
    /// the left. Sibling links are left for the caller to stitch.
    pub(crate) fn split(&mut self) -> (K, LeafNode<K>)
    where
        K: Clone,
    {
        let mid = self.keys.len() / 2;
        let right = LeafNode {
            prev: None,
            next: None,
            keys: self.keys.drain(mid..).collect(),
            values: self.values.drain(mid..).collect(),
        };
        let separator = self.keys.last().expect("`LeafNode::split()` - leaf is empty!").clone();
        (separator, right)
    }
}
