//! Case-insensitive string set.
//!
//! Same bucket-and-chain layout as [`ChainedHashMap`](crate::ChainedHashMap), specialised to
//! strings that compare equal regardless of letter case. Both the hash and the equality test
//! run over the lower-cased character stream, so `"Food"`, `"food"` and `"FOOD"` always land
//! in the same bucket and count as one member.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec;
use core::fmt;
use core::hash::{BuildHasher, Hasher};
use core::iter::FusedIterator;

use fnv::FnvBuildHasher;

use crate::hash_map::DEFAULT_BUCKETS;
use crate::raw::{Arena, Handle};

#[derive(Clone)]
struct SetNode {
    value: String,
    next: Option<Handle>,
}

fn folded(value: &str) -> impl Iterator<Item = char> + '_ {
    value.chars().flat_map(char::to_lowercase)
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    folded(a).eq(folded(b))
}

/// A set of strings with case-insensitive membership.
///
/// The first spelling added is the one stored; later additions that differ only in case are
/// ignored.
///
/// ```
/// use tally_collections::CaselessSet;
///
/// let mut categories = CaselessSet::new();
/// assert!(categories.insert("Food"));
/// assert!(!categories.insert("FOOD"));
/// assert!(categories.contains("food"));
/// assert_eq!(categories.len(), 1);
/// assert_eq!(categories.iter().next(), Some("Food"));
/// ```
#[derive(Clone)]
pub struct CaselessSet<S = FnvBuildHasher> {
    buckets: Box<[Option<Handle>]>,
    nodes: Arena<SetNode>,
    hasher: S,
}

/// An iterator over the members of a [`CaselessSet`], bucket by bucket.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a> {
    buckets: &'a [Option<Handle>],
    nodes: &'a Arena<SetNode>,
    next_bucket: usize,
    current: Option<Handle>,
    remaining: usize,
}

impl CaselessSet<FnvBuildHasher> {
    /// Creates an empty set with [`DEFAULT_BUCKETS`] buckets.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::CaselessSet;
    ///
    /// let set = CaselessSet::new();
    /// assert!(set.is_empty());
    /// assert_eq!(set.bucket_count(), 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(b) where b is the bucket count.
    #[must_use]
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }

    /// Creates an empty set with a fixed number of buckets.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::CaselessSet;
    ///
    /// let set = CaselessSet::with_buckets(64);
    /// assert_eq!(set.bucket_count(), 64);
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

impl<S> CaselessSet<S> {
    /// Creates an empty set with a fixed number of buckets, hashing through `hasher`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::hash_map::RandomState;
    /// use tally_collections::CaselessSet;
    ///
    /// let mut set = CaselessSet::with_buckets_and_hasher(8, RandomState::new());
    /// set.insert("Food");
    /// assert!(set.contains("FOOD"));
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
        assert!(buckets > 0, "`CaselessSet::with_buckets()` - `buckets` must be non-zero!");
        Self {
            buckets: vec![None; buckets].into_boxed_slice(),
            nodes: Arena::new(),
            hasher,
        }
    }

    /// Returns the number of members. Spellings that differ only in case count once.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::CaselessSet;
    ///
    /// let mut set = CaselessSet::new();
    /// set.insert("Food");
    /// set.insert("food");
    /// set.insert("Rent");
    /// assert_eq!(set.len(), 2);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the set has no members.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::CaselessSet;
    ///
    /// let mut set = CaselessSet::new();
    /// assert!(set.is_empty());
    /// set.insert("Fuel");
    /// assert!(!set.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of buckets, fixed for the life of the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::CaselessSet;
    ///
    /// let mut set = CaselessSet::with_buckets(2);
    /// set.extend(["a", "b", "c", "d"]);
    /// assert_eq!(set.bucket_count(), 2);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Removes every member. The bucket count is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::CaselessSet;
    ///
    /// let mut set = CaselessSet::new();
    /// set.insert("Food");
    /// set.clear();
    /// assert!(!set.contains("food"));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n + b) where b is the bucket count.
    pub fn clear(&mut self) {
        self.buckets.fill(None);
        self.nodes.clear();
    }

    /// Gets an iterator over the stored spellings.
    ///
    /// Members are visited in bucket order, newest first within a bucket. The order has no meaning.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::CaselessSet;
    ///
    /// let set: CaselessSet = ["Rent", "FOOD", "food"].into_iter().collect();
    ///
    /// let mut members: Vec<_> = set.iter().collect();
    /// members.sort_unstable();
    /// assert_eq!(members, ["FOOD", "Rent"]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1) to create the iterator; a full pass is O(n + b) where b is the bucket count.
    #[doc(alias = "forEach")]
    #[doc(alias = "printAll")]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            buckets: &self.buckets,
            nodes: &self.nodes,
            next_bucket: 0,
            current: None,
            remaining: self.len(),
        }
    }
}

impl<S: BuildHasher> CaselessSet<S> {
    fn bucket_of(&self, value: &str) -> usize {
        let mut state = self.hasher.build_hasher();
        for c in folded(value) {
            state.write_u32(u32::from(c));
        }
        #[allow(clippy::cast_possible_truncation)]
        let index = (state.finish() % self.buckets.len() as u64) as usize;
        index
    }

    fn find(&self, value: &str) -> Option<Handle> {
        let mut current = self.buckets[self.bucket_of(value)];
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            if eq_ignore_case(&node.value, value) {
                return Some(handle);
            }
            current = node.next;
        }
        None
    }

    /// Adds `value` unless a case-insensitive match is already present.
    ///
    /// Returns `true` if the value was added. When it was not, the spelling already stored is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::CaselessSet;
    ///
    /// let mut set = CaselessSet::new();
    /// assert!(set.insert("Transport"));
    /// assert!(!set.insert("TRANSPORT"));
    /// assert_eq!(set.get("transport"), Some("Transport"));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(m(1 + α)) where m is the length of `value` and α the load factor.
    #[doc(alias = "add")]
    pub fn insert(&mut self, value: impl Into<String> + AsRef<str>) -> bool {
        if self.find(value.as_ref()).is_some() {
            return false;
        }

        let bucket = self.bucket_of(value.as_ref());
        let next = self.buckets[bucket];
        let value = value.into();
        self.buckets[bucket] = Some(self.nodes.alloc(SetNode { value, next }));
        true
    }

    /// Returns `true` if a member matches `value` ignoring case.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::CaselessSet;
    ///
    /// let mut set = CaselessSet::new();
    /// set.insert("Food");
    /// assert!(set.contains("fOOd"));
    /// assert!(!set.contains("Fuel"));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(m(1 + α)) where m is the length of `value` and α the load factor.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.find(value).is_some()
    }

    /// Returns the stored spelling of the member matching `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::CaselessSet;
    ///
    /// let mut set = CaselessSet::new();
    /// set.insert("Utilities");
    /// assert_eq!(set.get("UTILITIES"), Some("Utilities"));
    /// assert_eq!(set.get("Rent"), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(m(1 + α)) where m is the length of `value` and α the load factor.
    #[must_use]
    pub fn get(&self, value: &str) -> Option<&str> {
        self.find(value).map(|handle| self.nodes.get(handle).value.as_str())
    }

    /// Removes the member matching `value`, returning its stored spelling.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::CaselessSet;
    ///
    /// let mut set = CaselessSet::new();
    /// set.insert("Utilities");
    /// assert_eq!(set.remove("utilities").as_deref(), Some("Utilities"));
    /// assert_eq!(set.remove("utilities"), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(m(1 + α)) where m is the length of `value` and α the load factor.
    pub fn remove(&mut self, value: &str) -> Option<String> {
        let bucket = self.bucket_of(value);
        let mut prev: Option<Handle> = None;
        let mut current = self.buckets[bucket];

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            if eq_ignore_case(&node.value, value) {
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

impl Default for CaselessSet<FnvBuildHasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for CaselessSet<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Into<String> + AsRef<str>> FromIterator<T> for CaselessSet<FnvBuildHasher> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Into<String> + AsRef<str>, S: BuildHasher> Extend<T> for CaselessSet<S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, S> IntoIterator for &'a CaselessSet<S> {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(handle) = self.current {
                let node = self.nodes.get(handle);
                self.current = node.next;
                self.remaining -= 1;
                return Some(&node.value);
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

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn folding_is_unicode_aware() {
        assert!(eq_ignore_case("Éclair", "éCLAIR"));
        assert!(eq_ignore_case("", ""));
        assert!(!eq_ignore_case("Food", "Foo"));
        assert!(!eq_ignore_case("Food", "Fool"));
    }

    #[test]
    fn case_variants_share_a_bucket() {
        let set = CaselessSet::with_buckets(64);
        for word in ["transport", "Transport", "TRANSPORT", "tRaNsPoRt"] {
            assert_eq!(set.bucket_of(word), set.bucket_of("transport"), "{word}");
        }
    }

    #[test]
    fn remove_returns_stored_spelling() {
        let mut set: CaselessSet = ["Rent", "Utilities", "Food"].into_iter().collect();
        assert_eq!(set.remove("UTILITIES").as_deref(), Some("Utilities"));
        assert_eq!(set.remove("utilities"), None);
        assert!(!set.contains("Utilities"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    #[should_panic(expected = "`CaselessSet::with_buckets()` - `buckets` must be non-zero!")]
    fn zero_buckets() {
        let _ = CaselessSet::with_buckets(0);
    }
}
