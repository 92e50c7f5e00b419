//! Append-only singly linked list.
//!
//! Used as a history trail: items are only ever added at the tail and read back in the order
//! they were added. Nodes sit in an [`Arena`] and each is linked from exactly one place, either
//! the list head or its predecessor's `next`.

use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;

use crate::raw::{Arena, Handle};

#[derive(Clone)]
struct ListNode<T> {
    item: T,
    next: Option<Handle>,
}

/// A singly linked list that grows at the tail.
///
/// The list keeps a handle to its last node, so [`push_back`](Self::push_back) is O(1).
/// There is no removal or positional access; take a [`to_vec`](Self::to_vec) snapshot when
/// random access is needed.
///
/// ```
/// use tally_collections::LinkedList;
///
/// let mut history = LinkedList::new();
/// history.push_back("GHS 20.00 food");
/// history.push_back("GHS 75.50 transport");
/// assert_eq!(history.to_vec(), ["GHS 20.00 food", "GHS 75.50 transport"]);
/// ```
#[derive(Clone)]
pub struct LinkedList<T> {
    nodes: Arena<ListNode<T>>,
    head: Option<Handle>,
    tail: Option<Handle>,
}

/// An iterator over the items of a [`LinkedList`], head to tail.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T> {
    nodes: &'a Arena<ListNode<T>>,
    current: Option<Handle>,
    remaining: usize,
}

impl<T> LinkedList<T> {
    /// Creates an empty list.
    ///
    /// Does not allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::LinkedList;
    ///
    /// let list: LinkedList<&str> = LinkedList::new();
    /// assert!(list.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            head: None,
            tail: None,
        }
    }

    /// Returns the number of items in the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::LinkedList;
    ///
    /// let mut list = LinkedList::new();
    /// list.push_back("food");
    /// list.push_back("rent");
    /// assert_eq!(list.len(), 2);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the list holds no items.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::LinkedList;
    ///
    /// let mut list = LinkedList::new();
    /// assert!(list.is_empty());
    /// list.push_back(1);
    /// assert!(!list.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Appends `item` after the current tail.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::LinkedList;
    ///
    /// let mut list = LinkedList::new();
    /// list.push_back(1);
    /// list.push_back(2);
    /// assert_eq!(list.back(), Some(&2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[doc(alias = "addLast")]
    pub fn push_back(&mut self, item: T) {
        let handle = self.nodes.alloc(ListNode { item, next: None });
        match self.tail {
            Some(tail) => self.nodes.get_mut(tail).next = Some(handle),
            None => self.head = Some(handle),
        }
        self.tail = Some(handle);
    }

    /// Returns the first item added, or `None` if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::LinkedList;
    ///
    /// let mut list = LinkedList::new();
    /// assert_eq!(list.front(), None);
    /// list.push_back("first");
    /// list.push_back("second");
    /// assert_eq!(list.front(), Some(&"first"));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.head.map(|handle| &self.nodes.get(handle).item)
    }

    /// Returns the most recently added item, or `None` if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::LinkedList;
    ///
    /// let mut list = LinkedList::new();
    /// list.push_back("first");
    /// list.push_back("second");
    /// assert_eq!(list.back(), Some(&"second"));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.tail.map(|handle| &self.nodes.get(handle).item)
    }

    /// Removes every item.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::LinkedList;
    ///
    /// let mut list: LinkedList<_> = (0..5).collect();
    /// list.clear();
    /// assert!(list.is_empty());
    /// assert_eq!(list.front(), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    /// Gets an iterator over the items, head to tail.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::LinkedList;
    ///
    /// let list: LinkedList<_> = [20, 75, 5].into_iter().collect();
    /// assert_eq!(list.iter().sum::<i32>(), 100);
    /// assert_eq!(list.iter().next(), Some(&20));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1) to create the iterator; each step is O(1).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            current: self.head,
            remaining: self.len(),
        }
    }

    /// Copies the items into a `Vec`, in insertion order.
    ///
    /// The snapshot is independent of the list, which is how callers get random access.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::LinkedList;
    ///
    /// let mut list = LinkedList::new();
    /// list.push_back('a');
    /// list.push_back('b');
    /// let snapshot = list.to_vec();
    /// list.push_back('c');
    /// assert_eq!(snapshot, ['a', 'b']);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[doc(alias = "toArray")]
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.current?);
        self.current = node.next;
        self.remaining -= 1;
        Some(&node.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            current: self.current,
            remaining: self.remaining,
        }
    }
}
