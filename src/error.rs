//! Error type shared by the containers.
//!
//! Only conditions a caller can provoke through the public API are errors. A missing key is
//! not one of them: lookups and removals report absence through [`Option`].

use thiserror::Error;

/// Failures reported by container operations.
#[derive(Error, Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CollectionError {
    /// An index was at or beyond the current length.
    #[error("index {index} out of range for length {len}")]
    OutOfRange {
        /// The rejected index.
        index: usize,
        /// The length at the time of the call.
        len: usize,
    },

    /// `pop` or `peek` was called on an empty [`Stack`](crate::Stack).
    #[error("stack is empty")]
    EmptyStack,

    /// `pop` or `peek` was called on an empty [`PriorityQueue`](crate::PriorityQueue).
    #[error("priority queue is empty")]
    EmptyQueue,
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, CollectionError>;
