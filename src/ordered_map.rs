//! Key-sorted map backed by a B+tree.
//!
//! Keys live in the leaves, which are linked in ascending key order. In-order traversal walks
//! that chain from the first leaf to the last and never revisits an internal node.

use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;

use crate::raw::{Handle, RawOrderedMap};

/// A map whose entries are kept sorted by key.
///
/// `insert` and `get` are O(log n). [`iter`](Self::iter) yields entries in strictly ascending
/// key order under the key type's [`Ord`]; for calendar periods written as `"YYYY-MM"` strings
/// that is chronological order.
///
/// Inserting an existing key overwrites its value. The map never combines values; a caller
/// that wants a running total per key does so through [`get_mut`](Self::get_mut).
///
/// Entries cannot be removed individually; [`clear`](Self::clear) discards them all.
///
/// # Examples
///
/// ```
/// use tally_collections::OrderedMap;
///
/// let mut burn: OrderedMap<&str, f64> = OrderedMap::new();
/// for (period, amount) in [("2024-03", 40.0), ("2024-01", 15.0), ("2024-03", 10.0), ("2024-02", 5.0)] {
///     match burn.get_mut(period) {
///         Some(total) => *total += amount,
///         None => {
///             burn.insert(period, amount);
///         }
///     }
/// }
///
/// let report: Vec<_> = burn.iter().map(|(period, total)| format!("{period}: {total:.2}")).collect();
/// assert_eq!(report, ["2024-01: 15.00", "2024-02: 5.00", "2024-03: 50.00"]);
/// ```
#[derive(Clone)]
pub struct OrderedMap<K, V> {
    raw: RawOrderedMap<K, V>,
}

/// An iterator over the entries of an [`OrderedMap`], in ascending key order.
///
/// Created by [`OrderedMap::iter`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    tree: &'a RawOrderedMap<K, V>,
    front_leaf: Option<Handle>,
    front_index: usize,
    back_leaf: Option<Handle>,
    // One past the next entry to yield from the back leaf.
    back_index: usize,
    remaining: usize,
}

/// An owning iterator over the entries of an [`OrderedMap`], in ascending key order.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

impl<K, V> OrderedMap<K, V> {
    /// Makes a new, empty `OrderedMap`.
    ///
    /// Does not allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("2024-01", 15.0);
    /// assert_eq!(map.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> Self {
        Self {
            raw: RawOrderedMap::new(),
        }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.len(), 0);
    /// map.insert("2024-01", 1);
    /// map.insert("2024-01", 2);
    /// assert_eq!(map.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map holds no entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert!(map.is_empty());
    /// map.insert(1, "a");
    /// assert!(!map.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

    /// Removes every entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([(1, "a"), (2, "b")]);
    /// map.clear();
    /// assert!(map.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the entry with the smallest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.first_key_value(), None);
    /// map.insert("2024-02", 5.0);
    /// map.insert("2024-01", 15.0);
    /// assert_eq!(map.first_key_value(), Some((&"2024-01", &15.0)));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first_key_value()
    }

    /// Returns the entry with the largest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::OrderedMap;
    ///
    /// let map = OrderedMap::from([("2024-02", 5.0), ("2024-03", 40.0), ("2024-01", 15.0)]);
    /// assert_eq!(map.last_key_value(), Some((&"2024-03", &40.0)));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last_key_value()
    }

    /// Gets an iterator over the entries of the map, in ascending key order.
    ///
    /// The iterator walks the leaf chain and is double-ended, so `.rev()` yields descending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::OrderedMap;
    ///
    /// let map = OrderedMap::from([(3, "c"), (1, "a"), (2, "b")]);
    ///
    /// let ascending: Vec<_> = map.iter().map(|(k, _)| *k).collect();
    /// assert_eq!(ascending, [1, 2, 3]);
    ///
    /// let (last_key, last_value) = map.iter().next_back().unwrap();
    /// assert_eq!((*last_key, *last_value), (3, "c"));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1) to create the iterator; each step is O(1).
    #[doc(alias = "forEachInOrder")]
    #[doc(alias = "printInOrder")]
    pub fn iter(&self) -> Iter<'_, K, V> {
        let back_leaf = self.raw.last_leaf();
        Iter {
            tree: &self.raw,
            front_leaf: self.raw.first_leaf(),
            front_index: 0,
            back_leaf,
            back_index: back_leaf.map_or(0, |leaf| self.raw.leaf(leaf).key_count()),
            remaining: self.raw.len(),
        }
    }

    /// Gets an iterator over the keys of the map, in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::OrderedMap;
    ///
    /// let map = OrderedMap::from([("2024-03", 1), ("2024-01", 2)]);
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["2024-01", "2024-03"]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1) to create the iterator; each step is O(1).
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.iter().map(|(key, _)| key)
    }

    /// Gets an iterator over the values of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::OrderedMap;
    ///
    /// let map = OrderedMap::from([(2, "b"), (1, "a")]);
    /// assert_eq!(map.values().copied().collect::<Vec<_>>(), ["a", "b"]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1) to create the iterator; each step is O(1).
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.iter().map(|(_, value)| value)
    }
}

impl<K: Clone + Ord, V> OrderedMap<K, V> {
    /// Inserts `value` under `key` in sorted position, returning the value it replaced.
    ///
    /// An existing key keeps its place; only its value is overwritten. Values are never combined.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.insert("2024-05", 12.5), None);
    /// assert_eq!(map.insert("2024-05", 7.5), Some(12.5));
    /// assert_eq!(map.get("2024-05"), Some(&7.5));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[doc(alias = "put")]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.raw.insert(key, value)
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering on the borrowed
    /// form must match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::OrderedMap;
    ///
    /// let map = OrderedMap::from([(String::from("2024-01"), 15.0)]);
    /// assert_eq!(map.get("2024-01"), Some(&15.0));
    /// assert_eq!(map.get("2024-02"), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key)
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([("2024-01", 15.0)]);
    /// if let Some(total) = map.get_mut("2024-01") {
    ///     *total += 10.0;
    /// }
    /// assert_eq!(map.get("2024-01"), Some(&25.0));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key)
    }

    /// Returns `true` if the map holds an entry for `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::OrderedMap;
    ///
    /// let map = OrderedMap::from([(2024, "leap")]);
    /// assert!(map.contains_key(&2024));
    /// assert!(!map.contains_key(&2023));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).is_some()
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for OrderedMap<K, V> {}

impl<K: Clone + Ord, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Clone + Ord, V> Extend<(K, V)> for OrderedMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Clone + Ord, V, const N: usize> From<[(K, V); N]> for OrderedMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        let entries: Vec<(K, V)> = self.raw.drain_to_vec();
        IntoIter {
            inner: entries.into_iter(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let mut leaf = self.front_leaf?;
        if self.front_index == self.tree.leaf(leaf).key_count() {
            leaf = self.tree.leaf(leaf).next()?;
            self.front_leaf = Some(leaf);
            self.front_index = 0;
        }

        let entry = self.tree.entry_at(leaf, self.front_index);
        self.front_index += 1;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let mut leaf = self.back_leaf?;
        if self.back_index == 0 {
            leaf = self.tree.leaf(leaf).prev()?;
            self.back_leaf = Some(leaf);
            self.back_index = self.tree.leaf(leaf).key_count();
        }

        self.back_index -= 1;
        self.remaining -= 1;
        Some(self.tree.entry_at(leaf, self.back_index))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front_leaf: self.front_leaf,
            front_index: self.front_index,
            back_leaf: self.back_leaf,
            back_index: self.back_index,
            remaining: self.remaining,
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}
