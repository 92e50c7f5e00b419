use alloc::vec::Vec;
use core::borrow::Borrow;

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{InternalNode, LeafNode, MAX_KEYS, Node, SearchResult};

/// B+tree engine behind `OrderedMap`.
///
/// Keys live only in leaves (internal nodes carry copies as separators) and the leaves form a
/// doubly linked chain in ascending key order, so in-order traversal never climbs the tree.
#[derive(Clone)]
pub(crate) struct RawOrderedMap<K, V> {
    nodes: Arena<Node<K>>,
    /// Values are kept apart from the nodes so a split only moves handles.
    values: Arena<V>,
    root: Option<Handle>,
    len: usize,
    first_leaf: Option<Handle>,
    last_leaf: Option<Handle>,
}

// Internal nodes visited on the way down, with the child index taken at each.
type Path = SmallVec<[(Handle, usize); 16]>;

impl<K, V> RawOrderedMap<K, V> {
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            values: Arena::new(),
            root: None,
            len: 0,
            first_leaf: None,
            last_leaf: None,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.values.clear();
        self.root = None;
        self.len = 0;
        self.first_leaf = None;
        self.last_leaf = None;
    }

    pub(crate) fn first_leaf(&self) -> Option<Handle> {
        self.first_leaf
    }

    pub(crate) fn last_leaf(&self) -> Option<Handle> {
        self.last_leaf
    }

    pub(crate) fn leaf(&self, handle: Handle) -> &LeafNode<K> {
        self.nodes.get(handle).as_leaf()
    }

    /// Key and value stored at `index` of the leaf `handle`.
    pub(crate) fn entry_at(&self, handle: Handle, index: usize) -> (&K, &V) {
        let leaf = self.leaf(handle);
        (leaf.key(index), self.values.get(leaf.value(index)))
    }

    pub(crate) fn first_key_value(&self) -> Option<(&K, &V)> {
        self.first_leaf.map(|leaf| self.entry_at(leaf, 0))
    }

    pub(crate) fn last_key_value(&self) -> Option<(&K, &V)> {
        let leaf = self.last_leaf?;
        let count = self.leaf(leaf).key_count();
        Some(self.entry_at(leaf, count - 1))
    }

    /// Empties the tree by walking the leaf chain, yielding entries in ascending order.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let mut entries = Vec::with_capacity(self.len);
        let mut current = self.first_leaf;

        while let Some(handle) = current {
            let leaf = self.nodes.get_mut(handle).as_leaf_mut();
            current = leaf.next();
            let (keys, value_handles) = leaf.take_all();
            for (key, value) in keys.into_iter().zip(value_handles) {
                entries.push((key, self.values.take(value)));
            }
        }

        self.clear();
        entries
    }
}

impl<K: Clone + Ord, V> RawOrderedMap<K, V> {
    /// Locates `key`, returning its leaf and slot.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<(Handle, usize)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root?;
        loop {
            match self.nodes.get(current) {
                Node::Internal(internal) => current = internal.child(internal.search_child(key)),
                Node::Leaf(leaf) => {
                    return match leaf.search(key) {
                        SearchResult::Found(index) => Some((current, index)),
                        SearchResult::NotFound(_) => None,
                    };
                }
            }
        }
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let (leaf, index) = self.search(key)?;
        Some(self.entry_at(leaf, index).1)
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let (leaf, index) = self.search(key)?;
        let value = self.leaf(leaf).value(index);
        Some(self.values.get_mut(value))
    }

    /// Inserts or overwrites. An existing key keeps its slot and only the value is replaced.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        let Some(root) = self.root else {
            let value = self.values.alloc(value);
            let mut leaf = LeafNode::new();
            leaf.insert(0, key, value);
            let handle = self.nodes.alloc(Node::Leaf(leaf));
            self.root = Some(handle);
            self.first_leaf = Some(handle);
            self.last_leaf = Some(handle);
            self.len = 1;
            return None;
        };

        let mut path = Path::new();
        let mut current = root;
        while let Node::Internal(internal) = self.nodes.get(current) {
            let child = internal.search_child(&key);
            path.push((current, child));
            current = internal.child(child);
        }

        let leaf = self.nodes.get_mut(current).as_leaf_mut();
        match leaf.search(&key) {
            SearchResult::Found(index) => {
                let slot = leaf.value(index);
                Some(core::mem::replace(self.values.get_mut(slot), value))
            }
            SearchResult::NotFound(index) => {
                let slot = self.values.alloc(value);
                leaf.insert(index, key, slot);
                self.len += 1;
                if leaf.key_count() > MAX_KEYS {
                    self.split_leaf(current, path);
                }
                None
            }
        }
    }

    fn split_leaf(&mut self, handle: Handle, path: Path) {
        let leaf = self.nodes.get_mut(handle).as_leaf_mut();
        let (separator, mut right) = leaf.split();
        let old_next = leaf.next();
        right.set_prev(Some(handle));
        right.set_next(old_next);

        let right_handle = self.nodes.alloc(Node::Leaf(right));
        self.nodes.get_mut(handle).as_leaf_mut().set_next(Some(right_handle));
        match old_next {
            Some(next) => self.nodes.get_mut(next).as_leaf_mut().set_prev(Some(right_handle)),
            None => self.last_leaf = Some(right_handle),
        }

        self.propagate_split(path, separator, right_handle);
    }

    /// Hangs `right` next to the child that split, splitting ancestors that overflow in turn.
    fn propagate_split(&mut self, mut path: Path, mut separator: K, mut right: Handle) {
        while let Some((parent, child)) = path.pop() {
            let node = self.nodes.get_mut(parent).as_internal_mut();
            node.insert_child(child, separator, right);
            if node.key_count() <= MAX_KEYS {
                return;
            }

            let (median, sibling) = node.split();
            separator = median;
            right = self.nodes.alloc(Node::Internal(sibling));
        }

        // The root itself split.
        let old_root = self.root.expect("`RawOrderedMap::propagate_split()` - tree has no root!");
        let new_root = InternalNode::with_children(old_root, separator, right);
        self.root = Some(self.nodes.alloc(Node::Internal(new_root)));
    }
}
