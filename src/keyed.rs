#![cfg(feature = "keyed")]
//! Heaps over `(payload, numeric priority)` pairs.
//!
//! These are ordinary [`ComparatorHeap`]s whose element type is [`Prioritized`] and
//! whose comparator is a plain function pointer, so a `KeyedHeap` can be named in
//! struct fields without a closure type parameter.

use core::cmp::Ordering;

use crate::ComparatorHeap;

/// An opaque payload tagged with the number it is ordered by.
#[derive(Debug, Clone, PartialEq)]
pub struct Prioritized<P> {
    pub payload: P,
    pub priority: f64,
}

impl<P> Prioritized<P> {
    pub fn new(payload: P, priority: f64) -> Self {
        Self { payload, priority }
    }
}

/// Comparator that puts the smallest priority at the root.
pub fn lowest_first<P>(a: &Prioritized<P>, b: &Prioritized<P>) -> Ordering {
    a.priority.total_cmp(&b.priority)
}

/// Comparator that puts the largest priority at the root.
pub fn highest_first<P>(a: &Prioritized<P>, b: &Prioritized<P>) -> Ordering {
    b.priority.total_cmp(&a.priority)
}

pub type KeyedComparator<P> = fn(&Prioritized<P>, &Prioritized<P>) -> Ordering;

pub type KeyedHeap<P> = ComparatorHeap<Prioritized<P>, KeyedComparator<P>>;

impl<P> ComparatorHeap<Prioritized<P>, KeyedComparator<P>> {
    /// A heap whose root has the smallest priority.
    pub fn lowest_first(max_size: Option<usize>) -> Self {
        Self::with_comparator(lowest_first::<P>, max_size)
    }

    /// A heap whose root has the largest priority.
    pub fn highest_first(max_size: Option<usize>) -> Self {
        Self::with_comparator(highest_first::<P>, max_size)
    }

    /// Pushes `payload` under `priority`; see [`ComparatorHeap::push`].
    pub fn push_keyed(&mut self, payload: P, priority: f64) -> Option<Prioritized<P>> {
        self.push(Prioritized::new(payload, priority))
    }

    fn with_comparator(cmp: KeyedComparator<P>, max_size: Option<usize>) -> Self {
        match max_size {
            Some(max_size) => Self::bounded(cmp, max_size),
            None => Self::new(cmp),
        }
    }
}
