//! Unrolled linked lists behind a shared sequence contract.
//!
//! An unrolled linked list is a doubly linked chain of buckets, each
//! holding a bounded run of values. It sits between a vector and a linked
//! list:
//!
//! ```text
//! Vec<T>          - contiguous, O(n) shifting on middle insert/remove
//! LinkedList<T>   - O(1) splice, one allocation and pointer hop per value
//! UnrolledList<T> - shifting bounded by bucket size, one hop per bucket
//! ```
//!
//! # Quick Start
//!
//! ```
//! use nexus_seq::{Sequence, UnrolledList};
//!
//! let mut list: UnrolledList<&str> = UnrolledList::new(4);
//! list.push("b");
//! list.push("c");
//! list.unshift("a");
//!
//! assert_eq!(list.get(1), Ok(&"b"));
//! assert_eq!(list.index_of(&"c"), Some(2));
//!
//! // Relocation comes from the `Sequence` contract
//! list.move_to_front(2).unwrap();
//! assert_eq!(list.to_vec(), vec!["c", "a", "b"]);
//! ```
//!
//! # Bucket Capacity
//!
//! `max_elements` fixes how many values a bucket holds. Small capacities
//! behave like a linked list, large ones like a vector. Capacities of 3 or
//! less never redistribute values: a full bucket simply gets a new
//! neighbour, and only empty buckets are removed.
//!
//! ```
//! use nexus_seq::UnrolledList;
//!
//! let mut list: UnrolledList<u32> = UnrolledList::new(4);
//! list.extend(0..10);
//! assert_eq!(list.bucket_sizes().collect::<Vec<_>>(), vec![2, 2, 2, 4]);
//! ```
//!
//! # Errors
//!
//! Index-based operations return [`OutOfBounds`] instead of panicking, and
//! leave the list untouched when they do.
//!
//! ```
//! use nexus_seq::{OutOfBounds, UnrolledList};
//!
//! let mut list: UnrolledList<u32> = UnrolledList::new(4);
//! list.push(1);
//! assert_eq!(list.remove_at(5), Err(OutOfBounds { index: 5, len: 1 }));
//! ```
//!
//! # Logging
//!
//! Structural events (bucket split, merge, steal, unlink) are reported at
//! `trace` level through the [`log`] facade; list creation at `debug`.

#![warn(missing_docs)]

mod bucket;
pub mod cursor;
pub mod error;
pub mod iter;
pub mod key;
pub mod list;
pub mod sequence;

pub use cursor::{Cursor, CursorMut};
pub use error::{InvalidCapacity, OutOfBounds};
pub use iter::{IntoIter, Iter, IterMut};
pub use key::Key;
pub use list::{DEFAULT_MAX_ELEMENTS, UnrolledList};
pub use sequence::Sequence;
