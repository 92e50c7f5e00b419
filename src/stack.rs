//! LIFO adapter over [`DynArray`].

use core::fmt;

use crate::dyn_array::DynArray;
use crate::error::{CollectionError, Result};

/// A last-in, first-out stack.
///
/// Popping or peeking an empty stack is reported as [`CollectionError::EmptyStack`].
///
/// ```
/// use tally_collections::{CollectionError, Stack};
///
/// let mut stack = Stack::new();
/// stack.push(1);
/// stack.push(2);
/// assert_eq!(stack.pop(), Ok(2));
/// assert_eq!(stack.pop(), Ok(1));
/// assert_eq!(stack.pop(), Err(CollectionError::EmptyStack));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Stack<T> {
    items: DynArray<T>,
}

impl<T> Stack<T> {
    /// Creates an empty stack without allocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::Stack;
    ///
    /// let stack: Stack<u32> = Stack::new();
    /// assert!(stack.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> Self {
        Self { items: DynArray::new() }
    }

    /// Creates an empty stack able to hold `capacity` items before it grows.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::Stack;
    ///
    /// let mut stack = Stack::with_capacity(16);
    /// stack.push("undo");
    /// assert_eq!(stack.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1), plus the allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: DynArray::with_capacity(capacity),
        }
    }

    /// Returns the number of items on the stack.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::Stack;
    ///
    /// let stack: Stack<_> = (0..3).collect();
    /// assert_eq!(stack.len(), 3);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the stack holds no items.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::Stack;
    ///
    /// let mut stack = Stack::new();
    /// assert!(stack.is_empty());
    /// stack.push(1);
    /// assert!(!stack.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pushes `item` onto the top of the stack.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::Stack;
    ///
    /// let mut stack = Stack::new();
    /// stack.push(1);
    /// stack.push(2);
    /// assert_eq!(stack.peek(), Ok(&2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1) amortized.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Removes and returns the most recently pushed item.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::{CollectionError, Stack};
    ///
    /// let mut stack = Stack::new();
    /// stack.push("a");
    /// assert_eq!(stack.pop(), Ok("a"));
    /// assert_eq!(stack.pop(), Err(CollectionError::EmptyStack));
    /// ```
    ///
    /// # Errors
    ///
    /// [`CollectionError::EmptyStack`] if there is nothing to pop.
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn pop(&mut self) -> Result<T> {
        self.items.pop().ok_or(CollectionError::EmptyStack)
    }

    /// Returns the most recently pushed item without removing it.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::{CollectionError, Stack};
    ///
    /// let mut stack = Stack::new();
    /// assert_eq!(stack.peek(), Err(CollectionError::EmptyStack));
    /// stack.push(7);
    /// assert_eq!(stack.peek(), Ok(&7));
    /// assert_eq!(stack.len(), 1);
    /// ```
    ///
    /// # Errors
    ///
    /// [`CollectionError::EmptyStack`] if the stack is empty.
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn peek(&self) -> Result<&T> {
        self.items.last().ok_or(CollectionError::EmptyStack)
    }

    /// Removes every item, keeping the allocation.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::Stack;
    ///
    /// let mut stack: Stack<_> = (0..10).collect();
    /// stack.clear();
    /// assert!(stack.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n) for types with a destructor, O(1) otherwise.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Gets an iterator from the top of the stack down.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_collections::Stack;
    ///
    /// let stack: Stack<_> = [1, 2, 3].into_iter().collect();
    /// assert_eq!(stack.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1) to create the iterator; each step is O(1).
    pub fn iter(&self) -> core::iter::Rev<core::slice::Iter<'_, T>> {
        self.items.iter().rev()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Pushes in iteration order, so the last item ends up on top.
impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for Stack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<'a, T> IntoIterator for &'a Stack<T> {
    type Item = &'a T;
    type IntoIter = core::iter::Rev<core::slice::Iter<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
