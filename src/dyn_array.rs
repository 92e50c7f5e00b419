//! A growable, indexable sequence.
//!
//! [`DynArray`] is the backing store for [`Stack`](crate::Stack) and
//! [`PriorityQueue`](crate::PriorityQueue). It has no notion of order beyond position: sorting
//! is something callers do through [`get`](DynArray::get) and [`swap`](DynArray::swap).

use alloc::vec::Vec;
use core::fmt;
use core::ops::{Index, IndexMut};

use crate::error::{CollectionError, Result};

/// Capacity of the first allocation made by [`DynArray::push`].
const MIN_CAPACITY: usize = 4;

/// A resizable array with checked access.
///
/// Appends are amortized O(1): when the buffer is full its capacity doubles. Out-of-range
/// indices passed to [`get`](Self::get), [`set`](Self::set) or [`swap`](Self::swap) produce
/// [`CollectionError::OutOfRange`] rather than being clamped.
///
/// # Examples
///
/// Bubble sort performed by the caller:
///
/// ```
/// use tally_collections::DynArray;
///
/// let mut array: DynArray<i32> = [3, 1, 2].into_iter().collect();
/// for i in 0..array.len() {
///     for j in i + 1..array.len() {
///         if array.get(i)? > array.get(j)? {
///             array.swap(i, j)?;
///         }
///     }
/// }
/// assert_eq!(array.as_slice(), &[1, 2, 3]);
/// # Ok::<(), tally_collections::CollectionError>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DynArray<T> {
    items: Vec<T>,
}

impl<T> DynArray<T> {
    /// Creates an empty array without allocating.
    ///
    /// The first [`push`](Self::push) allocates room for four items.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::DynArray;
    ///
    /// let array: DynArray<i32> = DynArray::new();
    /// assert_eq!(array.capacity(), 0);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates an empty array able to hold `capacity` items before it grows.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::DynArray;
    ///
    /// let array: DynArray<u8> = DynArray::with_capacity(100);
    /// assert!(array.capacity() >= 100);
    /// assert!(array.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1), plus the allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of items in the array.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::DynArray;
    ///
    /// let array: DynArray<_> = [1, 2, 3].into_iter().collect();
    /// assert_eq!(array.len(), 3);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the array holds no items.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::DynArray;
    ///
    /// let mut array = DynArray::new();
    /// assert!(array.is_empty());
    /// array.push(1);
    /// assert!(!array.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns how many items the array can hold before it next grows.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::DynArray;
    ///
    /// let mut array = DynArray::new();
    /// array.push(1);
    /// assert!(array.capacity() >= 4);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Appends `item`, doubling the capacity first if the array is full.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::DynArray;
    ///
    /// let mut array = DynArray::new();
    /// array.push("food");
    /// array.push("rent");
    /// assert_eq!(array.as_slice(), ["food", "rent"]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1) amortized.
    #[doc(alias = "add")]
    pub fn push(&mut self, item: T) {
        if self.items.len() == self.items.capacity() {
            let grow_by = self.items.capacity().max(MIN_CAPACITY);
            self.items.reserve_exact(grow_by);
        }
        self.items.push(item);
    }

    /// Removes and returns the last item, or `None` if the array is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::DynArray;
    ///
    /// let mut array: DynArray<_> = [1, 2].into_iter().collect();
    /// assert_eq!(array.pop(), Some(2));
    /// assert_eq!(array.pop(), Some(1));
    /// assert_eq!(array.pop(), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Returns a reference to the last item, or `None` if the array is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::DynArray;
    ///
    /// let array: DynArray<_> = [1, 2].into_iter().collect();
    /// assert_eq!(array.last(), Some(&2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Returns the item at `index`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::{CollectionError, DynArray};
    ///
    /// let array: DynArray<_> = [10, 20].into_iter().collect();
    /// assert_eq!(array.get(1), Ok(&20));
    /// assert_eq!(array.get(2), Err(CollectionError::OutOfRange { index: 2, len: 2 }));
    /// ```
    ///
    /// # Errors
    ///
    /// [`CollectionError::OutOfRange`] if `index >= len()`.
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn get(&self, index: usize) -> Result<&T> {
        let len = self.len();
        self.items.get(index).ok_or(CollectionError::OutOfRange { index, len })
    }

    /// Returns a mutable reference to the item at `index`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::DynArray;
    ///
    /// let mut array: DynArray<_> = [10, 20].into_iter().collect();
    /// *array.get_mut(0)? += 5;
    /// assert_eq!(array.as_slice(), &[15, 20]);
    /// # Ok::<(), tally_collections::CollectionError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// [`CollectionError::OutOfRange`] if `index >= len()`.
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len();
        self.items.get_mut(index).ok_or(CollectionError::OutOfRange { index, len })
    }

    /// Replaces the item at `index`, returning the old one.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::DynArray;
    ///
    /// let mut array: DynArray<_> = ["food", "rent"].into_iter().collect();
    /// assert_eq!(array.set(1, "fuel"), Ok("rent"));
    /// assert_eq!(array.as_slice(), ["food", "fuel"]);
    /// ```
    ///
    /// # Errors
    ///
    /// [`CollectionError::OutOfRange`] if `index >= len()`.
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn set(&mut self, index: usize, item: T) -> Result<T> {
        Ok(core::mem::replace(self.get_mut(index)?, item))
    }

    /// Exchanges the items at `a` and `b`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::{CollectionError, DynArray};
    ///
    /// let mut array: DynArray<_> = [1, 2, 3].into_iter().collect();
    /// array.swap(0, 2)?;
    /// assert_eq!(array.as_slice(), &[3, 2, 1]);
    /// assert_eq!(array.swap(0, 3), Err(CollectionError::OutOfRange { index: 3, len: 3 }));
    /// # Ok::<(), CollectionError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// [`CollectionError::OutOfRange`] naming the first offending index; the array is left
    /// untouched.
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        let len = self.len();
        if let Some(&index) = [a, b].iter().find(|&&i| i >= len) {
            return Err(CollectionError::OutOfRange { index, len });
        }
        self.items.swap(a, b);
        Ok(())
    }

    /// Removes every item, keeping the allocation.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::DynArray;
    ///
    /// let mut array: DynArray<_> = (0..10).collect();
    /// let capacity = array.capacity();
    /// array.clear();
    /// assert!(array.is_empty());
    /// assert_eq!(array.capacity(), capacity);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n) for types with a destructor, O(1) otherwise.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Views the items as a slice, in index order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::DynArray;
    ///
    /// let array: DynArray<_> = [3, 1, 2].into_iter().collect();
    /// assert_eq!(array.as_slice().iter().max(), Some(&3));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    /// Gets an iterator over the items, front to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::DynArray;
    ///
    /// let array: DynArray<_> = [20, 75, 5].into_iter().collect();
    /// assert_eq!(array.iter().sum::<i32>(), 100);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1) to create the iterator; each step is O(1).
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Consumes the array into a `Vec` in index order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::DynArray;
    ///
    /// let array: DynArray<_> = (1..=3).collect();
    /// assert_eq!(array.into_vec(), vec![1, 2, 3]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Panics on an out-of-range index, like slice indexing.
impl<T> Index<usize> for DynArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IndexMut<usize> for DynArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<T> FromIterator<T> for DynArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<T> Extend<T> for DynArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for DynArray<T> {
    type Item = T;
    type IntoIter = alloc::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn capacity_doubles() {
        let mut array = DynArray::new();
        assert_eq!(array.capacity(), 0);
        array.push(0u8);
        assert!(array.capacity() >= MIN_CAPACITY);

        let mut last = array.capacity();
        for i in 1..100 {
            array.push(i);
            let now = array.capacity();
            assert!(now == last || now >= 2 * last, "grew from {last} to {now}");
            last = now;
        }
    }

    #[test]
    fn swap_rejects_before_touching() {
        let mut array: DynArray<_> = [1, 2].into_iter().collect();
        assert_eq!(array.swap(0, 2), Err(CollectionError::OutOfRange { index: 2, len: 2 }));
        assert_eq!(array.swap(5, 0), Err(CollectionError::OutOfRange { index: 5, len: 2 }));
        assert_eq!(array.as_slice(), &[1, 2]);
    }
}
