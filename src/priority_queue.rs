//! Binary min-heap.
//!
//! Items are kept in a [`DynArray`] laid out as an implicit binary tree: the children of slot
//! `i` are `2i + 1` and `2i + 2`, and no child compares less than its parent. The root is
//! therefore always the smallest item.
//!
//! Items that compare equal leave the queue in the order they entered it. Each item is tagged
//! with a running sequence number that breaks ties, which makes the output order fully
//! deterministic.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;

use crate::dyn_array::DynArray;
use crate::error::{CollectionError, Result};

#[derive(Clone)]
struct Slot<T> {
    item: T,
    seq: u64,
}

impl<T: Ord> Slot<T> {
    fn precedes(&self, other: &Self) -> bool {
        match self.item.cmp(&other.item) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => self.seq < other.seq,
        }
    }
}

/// A min-priority queue with FIFO tie-breaking.
///
/// [`push`](Self::push) and [`pop`](Self::pop) are O(log n); [`peek`](Self::peek) is O(1).
/// Popping or peeking an empty queue is reported as [`CollectionError::EmptyQueue`].
///
/// ```
/// use tally_collections::{CollectionError, PriorityQueue};
///
/// let mut queue: PriorityQueue<_> = [5, 1, 3].into_iter().collect();
/// assert_eq!(queue.peek(), Ok(&1));
/// assert_eq!(queue.pop(), Ok(1));
/// assert_eq!(queue.pop(), Ok(3));
/// assert_eq!(queue.pop(), Ok(5));
/// assert_eq!(queue.pop(), Err(CollectionError::EmptyQueue));
/// ```
#[derive(Clone)]
pub struct PriorityQueue<T> {
    heap: DynArray<Slot<T>>,
    next_seq: u64,
}

/// An iterator over the items of a [`PriorityQueue`], in heap layout order.
///
/// Created by [`PriorityQueue::iter`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T> {
    inner: core::slice::Iter<'a, Slot<T>>,
}

impl<T> PriorityQueue<T> {
    /// Creates an empty queue without allocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::PriorityQueue;
    ///
    /// let queue: PriorityQueue<u32> = PriorityQueue::new();
    /// assert!(queue.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> Self {
        Self {
            heap: DynArray::new(),
            next_seq: 0,
        }
    }

    /// Creates an empty queue able to hold `capacity` items before it grows.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::PriorityQueue;
    ///
    /// let mut queue = PriorityQueue::with_capacity(64);
    /// queue.push(3);
    /// assert_eq!(queue.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1), plus the allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: DynArray::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Returns the number of items in the queue.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::PriorityQueue;
    ///
    /// let queue: PriorityQueue<_> = [4, 4, 1].into_iter().collect();
    /// assert_eq!(queue.len(), 3);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if the queue holds no items.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::PriorityQueue;
    ///
    /// let mut queue = PriorityQueue::new();
    /// assert!(queue.is_empty());
    /// queue.push(1);
    /// assert!(!queue.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the smallest item without removing it.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::{CollectionError, PriorityQueue};
    ///
    /// let mut queue = PriorityQueue::new();
    /// assert_eq!(queue.peek(), Err(CollectionError::EmptyQueue));
    /// queue.push(9);
    /// queue.push(2);
    /// assert_eq!(queue.peek(), Ok(&2));
    /// assert_eq!(queue.len(), 2);
    /// ```
    ///
    /// # Errors
    ///
    /// [`CollectionError::EmptyQueue`] if the queue is empty.
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn peek(&self) -> Result<&T> {
        self.heap.as_slice().first().map(|slot| &slot.item).ok_or(CollectionError::EmptyQueue)
    }

    /// Removes every item, keeping the allocation.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::PriorityQueue;
    ///
    /// let mut queue: PriorityQueue<_> = (0..10).collect();
    /// queue.clear();
    /// assert!(queue.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n) for types with a destructor, O(1) otherwise.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Gets an iterator over the items in heap layout order, which is not sorted.
    ///
    /// Only the first item is guaranteed to be the smallest. Use
    /// [`into_sorted_vec`](Self::into_sorted_vec) for ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::PriorityQueue;
    ///
    /// let queue: PriorityQueue<_> = [5, 1, 3].into_iter().collect();
    /// assert_eq!(queue.iter().next(), Some(&1));
    /// assert_eq!(queue.iter().sum::<i32>(), 9);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1) to create the iterator; each step is O(1).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.heap.iter(),
        }
    }
}

impl<T: Ord> PriorityQueue<T> {
    /// Adds `item`, sifting it up until its parent no longer compares greater.
    ///
    /// An item equal to ones already queued is placed behind them.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::PriorityQueue;
    ///
    /// let mut queue = PriorityQueue::new();
    /// queue.push(3);
    /// queue.push(1);
    /// assert_eq!(queue.peek(), Ok(&1));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) amortized.
    #[doc(alias = "add")]
    pub fn push(&mut self, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Slot { item, seq });
        self.sift_up(self.heap.len() - 1);
    }

    /// Removes and returns the smallest item.
    ///
    /// The last slot is moved to the root and sifted down towards the smaller child.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::{CollectionError, PriorityQueue};
    ///
    /// let mut queue: PriorityQueue<_> = [2, 1].into_iter().collect();
    /// assert_eq!(queue.pop(), Ok(1));
    /// assert_eq!(queue.pop(), Ok(2));
    /// assert_eq!(queue.pop(), Err(CollectionError::EmptyQueue));
    /// ```
    ///
    /// # Errors
    ///
    /// [`CollectionError::EmptyQueue`] if the queue is empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[doc(alias = "poll")]
    pub fn pop(&mut self) -> Result<T> {
        let last = self.heap.len().checked_sub(1).ok_or(CollectionError::EmptyQueue)?;
        self.heap.as_mut_slice().swap(0, last);
        let root = self.heap.pop().ok_or(CollectionError::EmptyQueue)?;
        self.sift_down(0);
        Ok(root.item)
    }

    /// Drains the queue into a `Vec`, smallest first. Equal items keep their arrival order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::PriorityQueue;
    ///
    /// let queue: PriorityQueue<_> = [30, 10, 20].into_iter().collect();
    /// assert_eq!(queue.into_sorted_vec(), [10, 20, 30]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n log n)
    #[must_use]
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Ok(item) = self.pop() {
            sorted.push(item);
        }
        sorted
    }

    fn sift_up(&mut self, mut hole: usize) {
        let heap = self.heap.as_mut_slice();
        while hole > 0 {
            let parent = (hole - 1) / 2;
            if !heap[hole].precedes(&heap[parent]) {
                break;
            }
            heap.swap(hole, parent);
            hole = parent;
        }
    }

    fn sift_down(&mut self, mut hole: usize) {
        let heap = self.heap.as_mut_slice();
        let len = heap.len();
        loop {
            let left = 2 * hole + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let smaller = if right < len && heap[right].precedes(&heap[left]) { right } else { left };
            if !heap[smaller].precedes(&heap[hole]) {
                break;
            }
            heap.swap(hole, smaller);
            hole = smaller;
        }
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for PriorityQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Ord> FromIterator<T> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<T: Ord> Extend<T> for PriorityQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a PriorityQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|slot| &slot.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}
