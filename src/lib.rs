//! # Heap Queue
//!
//! Two in-memory building blocks for single-threaded code: a binary heap ordered by a
//! comparator you hand it, and a FIFO queue over a self-resizing ring buffer.
//!
//! This crate provides `ComparatorHeap`, `KeyedHeap` and `RingQueue`.
//!
//! ## Key Features
//!
//! * **Injected Ordering:** `ComparatorHeap` stores a `Fn(&T, &T) -> Ordering`. `Less` means
//!   "higher priority", so min-first, max-first and custom schemes need no wrapper types.
//! * **Bounded Eviction:** A heap built with `bounded` never exceeds its max size; each push
//!   past it pops and returns the root.
//! * **Linear Heapify:** `ComparatorHeap::heapify` builds a heap from a `Vec` in O(n).
//! * **Amortized Ring Buffer:** `RingQueue` doubles when full and halves once it is less than a
//!   quarter full, never dropping below 10 slots.
//! * **Self-Checks:** Both containers expose `check_invariants`, returning an
//!   [`InvariantViolation`] that names the broken rule.
//!
//! ## Cargo Features
//!
//! * `keyed` (default): `Prioritized` and `KeyedHeap`, heaps over `(payload, f64)` pairs.
//!
//! ## Examples
//!
//! ### ComparatorHeap
//!
//! ```rust
//! use heap_queue::ComparatorHeap;
//!
//! // Smallest first, at most 3 items: keeps the 3 largest values seen.
//! let mut heap = ComparatorHeap::bounded(|a: &i32, b: &i32| a.cmp(b), 3);
//!
//! assert_eq!(heap.push(4), None);
//! assert_eq!(heap.push(9), None);
//! assert_eq!(heap.push(1), None);
//!
//! // The 4th push evicts the root.
//! assert_eq!(heap.push(7), Some(1));
//! assert_eq!(heap.into_sorted_vec(), vec![4, 7, 9]);
//! ```
//!
//! ### Heapify
//!
//! ```rust
//! use heap_queue::ComparatorHeap;
//!
//! let mut heap = ComparatorHeap::heapify(vec![1, 9, 2, 8, 3], |a: &i32, b: &i32| b.cmp(a));
//!
//! assert_eq!(heap.peek(), Some(&9));
//! assert_eq!(heap.pop(), Some(9));
//! assert_eq!(heap.pop(), Some(8));
//! ```
//!
//! ### KeyedHeap
//!
//! ```rust
//! use heap_queue::KeyedHeap;
//!
//! let mut jobs: KeyedHeap<&str> = KeyedHeap::highest_first(None);
//! jobs.push_keyed("cleanup", 0.5);
//! jobs.push_keyed("deploy", 9.0);
//!
//! assert_eq!(jobs.pop().map(|job| job.payload), Some("deploy"));
//! ```
//!
//! ### RingQueue
//!
//! ```rust
//! use heap_queue::RingQueue;
//!
//! let mut queue = RingQueue::new();
//! for i in 0..5 {
//!     queue.push_right(i);
//! }
//!
//! assert_eq!(queue.peek_left(), Some(&0));
//! assert_eq!(queue.peek_right(), Some(&4));
//! assert_eq!(queue.pop_left(), Some(0));
//! assert_eq!(queue.len(), 4);
//! assert_eq!(queue.capacity(), 10);
//! ```

// --- Module Declarations ---

pub mod error;
pub mod heap;
pub mod keyed;
pub mod queue;

// --- Re-exports ---

pub use error::InvariantViolation;
pub use heap::{AnyHeap, ComparatorHeap, PeekMut};
#[cfg(feature = "keyed")]
pub use keyed::{KeyedHeap, Prioritized};
pub use queue::{AnyQueue, RingQueue};
