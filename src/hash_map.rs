//! Hash map with separate chaining over a fixed number of buckets.
//!
//! Each bucket holds the head of a singly linked chain of entries whose keys hash to that
//! bucket. New keys are linked in at the head of their chain; a key that is already present
//! has its value overwritten where it stands.
//!
//! The bucket count is chosen at construction and never changes. There is no rehashing, so
//! once the [load factor](ChainedHashMap::load_factor) climbs well past one, lookups degrade
//! towards a linear scan of the chain. Size the map with
//! [`with_buckets`](ChainedHashMap::with_buckets) when the expected entry count is known.

use alloc::boxed::Box;
use alloc::vec;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;

use fnv::FnvBuildHasher;

use crate::raw::{Arena, Handle};

/// Bucket count used by [`ChainedHashMap::new`] and [`CaselessSet::new`](crate::CaselessSet::new).
pub const DEFAULT_BUCKETS: usize = 16;

#[derive(Clone)]
struct ChainNode<K, V> {
    key: K,
    value: V,
    next: Option<Handle>,
}

/// A key-value map built from fixed buckets and collision chains.
///
/// Keys must implement [`Eq`] and [`Hash`]. Hashing goes through the `S` [`BuildHasher`],
/// FNV-1a by default. FNV is unkeyed, so a given sequence of operations always produces the
/// same layout and the same [`iter`](Self::iter) order.
///
/// # Iteration order
///
/// [`iter`](Self::iter) walks the buckets in index order and each chain from head to tail,
/// which means newest key first within a bucket. That order is an artifact of the hashing and
/// carries no meaning; sort the entries, or keep them in an
/// [`OrderedMap`](crate::OrderedMap), when a report needs a stable semantic order.
///
/// # Examples
///
/// ```
/// use tally_collections::ChainedHashMap;
///
/// let mut totals = ChainedHashMap::new();
/// for (category, amount) in [("Food", 20.0), ("Transport", 7.5), ("Food", 12.5)] {
///     match totals.get_mut(category) {
///         Some(total) => *total += amount,
///         None => {
///             totals.insert(category, amount);
///         }
///     }
/// }
///
/// assert_eq!(totals.get("Food"), Some(&32.5));
/// assert_eq!(totals.get("Rent"), None);
/// assert_eq!(totals.len(), 2);
/// ```
#[derive(Clone)]
pub struct ChainedHashMap<K, V, S = FnvBuildHasher> {
    buckets: Box<[Option<Handle>]>,
    nodes: Arena<ChainNode<K, V>>,
    hasher: S,
}

/// An iterator over the entries of a [`ChainedHashMap`], bucket by bucket.
///
/// Created by [`ChainedHashMap::iter`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    buckets: &'a [Option<Handle>],
    nodes: &'a Arena<ChainNode<K, V>>,
    next_bucket: usize,
    current: Option<Handle>,
    remaining: usize,
}

impl<K, V> ChainedHashMap<K, V, FnvBuildHasher> {
    /// Creates an empty map with [`DEFAULT_BUCKETS`] buckets.
    ///
    /// No entries are allocated until the first insert; only the bucket array is.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::ChainedHashMap;
    /// use tally_collections::hash_map::DEFAULT_BUCKETS;
    ///
    /// let map: ChainedHashMap<&str, f64> = ChainedHashMap::new();
    /// assert!(map.is_empty());
    /// assert_eq!(map.bucket_count(), DEFAULT_BUCKETS);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(b) where b is the bucket count.
    #[must_use]
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }

    /// Creates an empty map with a fixed number of buckets.
    ///
    /// The bucket count never changes afterwards, so pick it from the expected number of entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::ChainedHashMap;
    ///
    /// let mut map = ChainedHashMap::with_buckets(1024);
    /// map.insert("Food", 20.0);
    /// assert_eq!(map.bucket_count(), 1024);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `buckets` is zero.
    ///
    /// # Complexity
    ///
    /// O(b) where b is `buckets`.
    #[must_use]
    pub fn with_buckets(buckets: usize) -> Self {
        Self::with_buckets_and_hasher(buckets, FnvBuildHasher::default())
    }
}

impl<K, V, S> ChainedHashMap<K, V, S> {
    /// Creates an empty map with a fixed number of buckets, hashing through `hasher`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::hash_map::RandomState;
    /// use tally_collections::ChainedHashMap;
    ///
    /// let mut map = ChainedHashMap::with_buckets_and_hasher(8, RandomState::new());
    /// map.insert("Rent", 400.0);
    /// assert_eq!(map.get("Rent"), Some(&400.0));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `buckets` is zero.
    ///
    /// # Complexity
    ///
    /// O(b) where b is `buckets`.
    pub fn with_buckets_and_hasher(buckets: usize, hasher: S) -> Self {
        assert!(buckets > 0, "`ChainedHashMap::with_buckets()` - `buckets` must be non-zero!");
        Self {
            buckets: vec![None; buckets].into_boxed_slice(),
            nodes: Arena::new(),
            hasher,
        }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::ChainedHashMap;
    ///
    /// let mut map = ChainedHashMap::new();
    /// assert_eq!(map.len(), 0);
    /// map.insert("Food", 1);
    /// map.insert("Food", 2);
    /// assert_eq!(map.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the map holds no entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::ChainedHashMap;
    ///
    /// let mut map = ChainedHashMap::new();
    /// assert!(map.is_empty());
    /// map.insert("Fuel", 55.0);
    /// assert!(!map.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of buckets, fixed for the life of the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::ChainedHashMap;
    ///
    /// let mut map = ChainedHashMap::with_buckets(4);
    /// for i in 0..100 {
    ///     map.insert(i, ());
    /// }
    /// assert_eq!(map.bucket_count(), 4);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the average chain length: entries divided by buckets.
    ///
    /// Lookups walk one chain, so this is the expected number of key comparisons per lookup.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::ChainedHashMap;
    ///
    /// let mut map = ChainedHashMap::with_buckets(4);
    /// for i in 0..10 {
    ///     map.insert(i, ());
    /// }
    /// assert!((map.load_factor() - 2.5).abs() < f64::EPSILON);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.buckets.len() as f64
    }

    /// Returns a reference to the map's [`BuildHasher`].
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::hash_map::RandomState;
    /// use tally_collections::ChainedHashMap;
    ///
    /// let map: ChainedHashMap<&str, u32, _> = ChainedHashMap::with_buckets_and_hasher(8, RandomState::new());
    /// let _: &RandomState = map.hasher();
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Removes every entry. The bucket count is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::ChainedHashMap;
    ///
    /// let mut map = ChainedHashMap::with_buckets(32);
    /// map.insert("Food", 1);
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.bucket_count(), 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n + b) where b is the bucket count.
    pub fn clear(&mut self) {
        self.buckets.fill(None);
        self.nodes.clear();
    }

    /// Gets an iterator over the entries of the map.
    ///
    /// Buckets are visited in index order and each chain from head to tail, so within a bucket the
    /// newest key comes first. The order is reproducible but has no meaning of its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::ChainedHashMap;
    ///
    /// let map: ChainedHashMap<_, _> = [("Food", 20), ("Rent", 400)].into_iter().collect();
    ///
    /// let mut total = 0;
    /// for (_, amount) in map.iter() {
    ///     total += *amount;
    /// }
    /// assert_eq!(total, 420);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1) to create the iterator; a full pass is O(n + b) where b is the bucket count.
    #[doc(alias = "forEach")]
    #[doc(alias = "printAll")]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: &self.buckets,
            nodes: &self.nodes,
            next_bucket: 0,
            current: None,
            remaining: self.len(),
        }
    }

    /// Gets an iterator over the keys of the map, in [`iter`](Self::iter) order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::ChainedHashMap;
    ///
    /// let map: ChainedHashMap<_, _> = [("Food", 20), ("Rent", 400)].into_iter().collect();
    ///
    /// let mut keys: Vec<_> = map.keys().copied().collect();
    /// keys.sort_unstable();
    /// assert_eq!(keys, ["Food", "Rent"]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1) to create the iterator; a full pass is O(n + b) where b is the bucket count.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Gets an iterator over the values of the map, in [`iter`](Self::iter) order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::ChainedHashMap;
    ///
    /// let map: ChainedHashMap<_, _> = [("Food", 20), ("Rent", 400)].into_iter().collect();
    /// assert_eq!(map.values().sum::<i32>(), 420);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1) to create the iterator; a full pass is O(n + b) where b is the bucket count.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> ChainedHashMap<K, V, S> {
    /// Bucket for `key`: its hash reduced modulo the bucket count.
    fn bucket_of<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        #[allow(clippy::cast_possible_truncation)]
        let index = (self.hasher.hash_one(key) % self.buckets.len() as u64) as usize;
        index
    }

    /// Walks the chain for `key` and returns the matching node, if any.
    fn find<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        let mut current = self.buckets[self.bucket_of(key)];
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            if node.key.borrow() == key {
                return Some(handle);
            }
            current = node.next;
        }
        None
    }

    /// Inserts `value` under `key`, returning the value it replaced.
    ///
    /// A replaced entry keeps its position in the chain; a new one becomes the chain head. The key
    /// itself is not updated on overwrite.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::ChainedHashMap;
    ///
    /// let mut map = ChainedHashMap::new();
    /// assert_eq!(map.insert("Food", 20.0), None);
    /// assert_eq!(map.insert("Food", 32.5), Some(20.0));
    /// assert_eq!(map.get("Food"), Some(&32.5));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1 + α) where α is the [load factor](Self::load_factor).
    #[doc(alias = "put")]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(handle) = self.find(&key) {
            return Some(core::mem::replace(&mut self.nodes.get_mut(handle).value, value));
        }

        let bucket = self.bucket_of(&key);
        let next = self.buckets[bucket];
        self.buckets[bucket] = Some(self.nodes.alloc(ChainNode { key, value, next }));
        None
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// The key may be any borrowed form of the map's key type, but [`Hash`] and [`Eq`] on the
    /// borrowed form must match those for the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::ChainedHashMap;
    ///
    /// let mut map = ChainedHashMap::new();
    /// map.insert(String::from("Food"), 20.0);
    /// assert_eq!(map.get("Food"), Some(&20.0));
    /// assert_eq!(map.get("Fuel"), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1 + α) where α is the [load factor](Self::load_factor).
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.find(key).map(|handle| &self.nodes.get(handle).value)
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// This is how running totals are accumulated in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::ChainedHashMap;
    ///
    /// let mut map = ChainedHashMap::new();
    /// map.insert("Food", 20.0);
    /// if let Some(total) = map.get_mut("Food") {
    ///     *total += 12.5;
    /// }
    /// assert_eq!(map.get("Food"), Some(&32.5));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1 + α) where α is the [load factor](Self::load_factor).
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        let handle = self.find(key)?;
        Some(&mut self.nodes.get_mut(handle).value)
    }

    /// Returns `true` if the map holds an entry for `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::ChainedHashMap;
    ///
    /// let mut map = ChainedHashMap::new();
    /// map.insert("Rent", 400);
    /// assert!(map.contains_key("Rent"));
    /// assert!(!map.contains_key("rent"));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1 + α) where α is the [load factor](Self::load_factor).
    #[doc(alias = "containsKey")]
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.find(key).is_some()
    }

    /// Unlinks the entry for `key` and returns its value. Absent keys are a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::ChainedHashMap;
    ///
    /// let mut map = ChainedHashMap::new();
    /// map.insert("Fuel", 55.0);
    /// assert_eq!(map.remove("Fuel"), Some(55.0));
    /// assert_eq!(map.remove("Fuel"), None);
    /// assert!(map.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1 + α) where α is the [load factor](Self::load_factor).
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        let bucket = self.bucket_of(key);
        let mut prev: Option<Handle> = None;
        let mut current = self.buckets[bucket];

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            if node.key.borrow() == key {
                let next = node.next;
                match prev {
                    Some(prev) => self.nodes.get_mut(prev).next = next,
                    None => self.buckets[bucket] = next,
                }
                return Some(self.nodes.take(handle).value);
            }
            prev = current;
            current = node.next;
        }
        None
    }
}

impl<K, V> Default for ChainedHashMap<K, V, FnvBuildHasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ChainedHashMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Maps are equal when they hold the same entries, whatever their bucket layout.
impl<K: Eq + Hash, V: PartialEq, S: BuildHasher> PartialEq for ChainedHashMap<K, V, S> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K: Eq + Hash, V: Eq, S: BuildHasher> Eq for ChainedHashMap<K, V, S> {}

impl<K: Eq + Hash, V> FromIterator<(K, V)> for ChainedHashMap<K, V, FnvBuildHasher> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> Extend<(K, V)> for ChainedHashMap<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(handle) = self.current {
                let node = self.nodes.get(handle);
                self.current = node.next;
                self.remaining -= 1;
                return Some((&node.key, &node.value));
            }
            if self.remaining == 0 {
                return None;
            }
            self.current = self.buckets[self.next_bucket];
            self.next_bucket += 1;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets,
            nodes: self.nodes,
            next_bucket: self.next_bucket,
            current: self.current,
            remaining: self.remaining,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::hash::Hasher;

    /// Sends every key to bucket 0 so chain handling can be observed directly.
    #[derive(Clone, Default)]
    struct Collide;

    struct ZeroHasher;

    impl Hasher for ZeroHasher {
        fn finish(&self) -> u64 {
            0
        }

        fn write(&mut self, _bytes: &[u8]) {}
    }

    impl BuildHasher for Collide {
        type Hasher = ZeroHasher;

        fn build_hasher(&self) -> ZeroHasher {
            ZeroHasher
        }
    }

    fn colliding(keys: &[u32]) -> ChainedHashMap<u32, u32, Collide> {
        let mut map = ChainedHashMap::with_buckets_and_hasher(4, Collide);
        for &k in keys {
            map.insert(k, k * 10);
        }
        map
    }

    #[test]
    fn new_keys_go_to_chain_head() {
        let map = colliding(&[1, 2, 3]);
        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, [3, 2, 1]);
    }

    #[test]
    fn overwrite_keeps_chain_position() {
        let mut map = colliding(&[1, 2, 3]);
        assert_eq!(map.insert(2, 99), Some(20));
        let entries: Vec<_> = map.iter().map(|(&k, &v)| (k, v)).collect();
        assert_eq!(entries, [(3, 30), (2, 99), (1, 10)]);
    }

    #[test]
    fn remove_from_head_middle_and_tail() {
        let mut map = colliding(&[1, 2, 3, 4, 5]);
        assert_eq!(map.remove(&5), Some(50));
        assert_eq!(map.remove(&3), Some(30));
        assert_eq!(map.remove(&1), Some(10));
        assert_eq!(map.remove(&1), None);

        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, [4, 2]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn freed_nodes_are_relinked() {
        let mut map = colliding(&[1, 2]);
        map.remove(&1);
        map.insert(7, 70);
        assert_eq!(map.get(&7), Some(&70));
        assert_eq!(map.get(&2), Some(&20));
        assert_eq!(map.len(), 2);
    }

    #[test]
    #[should_panic(expected = "`ChainedHashMap::with_buckets()` - `buckets` must be non-zero!")]
    fn zero_buckets() {
        let _ = ChainedHashMap::<u8, u8>::with_buckets(0);
    }

    #[test]
    fn load_factor_follows_len() {
        let mut map = ChainedHashMap::with_buckets(4);
        for k in 0..10 {
            map.insert(k, ());
        }
        assert!((map.load_factor() - 2.5).abs() < f64::EPSILON);
        map.clear();
        assert_eq!(map.bucket_count(), 4);
        assert!(map.is_empty());
    }
}
