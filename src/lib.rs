//! Hand-rolled collections for recording and querying expenditures.
//!
//! Every container here is self-contained and single-threaded. Linked structures keep their
//! nodes in an internal arena and link them by handle, so no node is ever shared between two
//! owners.
//!
//! | Type | Shape | Typical use |
//! |------|-------|-------------|
//! | [`DynArray`] | growable indexed sequence | entries loaded from the ledger, caller-side sorting |
//! | [`LinkedList`] | append-only singly linked list | expenditure history trail |
//! | [`ChainedHashMap`] | fixed buckets, collision chains | per-category totals |
//! | [`CaselessSet`] | same, case-insensitive strings | known category names |
//! | [`Stack`] | LIFO over [`DynArray`] | undo trail |
//! | [`PriorityQueue`] | binary min-heap, FIFO ties | smallest / earliest first |
//! | [`OrderedMap`] | B+tree | per-period totals in calendar order |
//!
//! Absence is reported with [`Option`]. Misuse a caller can recover from (an index past the
//! end, popping an empty stack or queue) is reported as a [`CollectionError`].
//!
//! # Example
//!
//! ```
//! use tally_collections::{CaselessSet, ChainedHashMap, OrderedMap};
//!
//! let ledger = [("2024-02", "Food", 30.0), ("2024-01", "food", 12.5), ("2024-02", "Rent", 400.0)];
//!
//! let mut categories = CaselessSet::new();
//! let mut by_category: ChainedHashMap<String, f64> = ChainedHashMap::new();
//! let mut by_month: OrderedMap<&str, f64> = OrderedMap::new();
//!
//! for (month, category, amount) in ledger {
//!     categories.insert(category);
//!     let key = category.to_lowercase();
//!     let total = by_category.get(&key).copied().unwrap_or(0.0);
//!     by_category.insert(key, total + amount);
//!     let total = by_month.get(month).copied().unwrap_or(0.0);
//!     by_month.insert(month, total + amount);
//! }
//!
//! assert_eq!(categories.len(), 2);
//! assert_eq!(by_category.get("food"), Some(&42.5));
//! assert_eq!(by_month.keys().copied().collect::<Vec<_>>(), ["2024-01", "2024-02"]);
//! ```

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod raw;

pub mod dyn_array;
pub mod error;
pub mod hash_map;
pub mod hash_set;
pub mod linked_list;
pub mod ordered_map;
pub mod priority_queue;
pub mod stack;

pub use dyn_array::DynArray;
pub use error::{CollectionError, Result};
pub use hash_map::ChainedHashMap;
pub use hash_set::CaselessSet;
pub use linked_list::LinkedList;
pub use ordered_map::OrderedMap;
pub use priority_queue::PriorityQueue;
pub use stack::Stack;
