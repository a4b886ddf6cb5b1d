use core::cmp::Ordering;
use core::ops::{Deref, DerefMut};
use std::collections::BinaryHeap;
use std::fmt::{Debug, Formatter, Result};

use crate::InvariantViolation;

/// A trait for abstraction over different priority queue types (comparator-driven, std).
pub trait AnyHeap<T> {
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Inserts `item`, returning whatever had to be evicted to make room.
    fn push(&mut self, item: T) -> Option<T>;
    fn pop(&mut self) -> Option<T>;
    fn peek(&self) -> Option<&T>;
    fn clear(&mut self);
}

impl<T: Ord> AnyHeap<T> for BinaryHeap<T> {
    fn len(&self) -> usize {
        self.len()
    }
    fn push(&mut self, item: T) -> Option<T> {
        BinaryHeap::push(self, item);
        None
    }
    fn pop(&mut self) -> Option<T> {
        self.pop()
    }
    fn peek(&self) -> Option<&T> {
        self.peek()
    }
    fn clear(&mut self) {
        self.clear();
    }
}

/// A binary heap ordered by a caller-supplied comparator, with an optional max size.
///
/// # Ordering
/// `cmp(a, b)` returns `Less` when `a` has strictly higher priority than `b`,
/// `Equal` for equal priority and `Greater` for lower priority. The root is always
/// an item of the highest priority, so `|a, b| a.cmp(b)` gives a min-first heap and
/// `|a, b| b.cmp(a)` a max-first one.
///
/// # Bounded heaps
/// Once a bounded heap holds `max_size` items, every push evicts the root. With a
/// min-first comparator this keeps the `max_size` largest items seen so far.
///
/// # Invariants
/// * For every index `i` with a child `c`, `cmp(data[i], data[c]) != Greater`.
/// * `data.len() <= max_size` whenever a max size is set.
pub struct ComparatorHeap<T, F> {
    data: Vec<T>,
    cmp: F,
    max_size: Option<usize>,
}

impl<T, F> AnyHeap<T> for ComparatorHeap<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn len(&self) -> usize {
        self.len()
    }
    fn push(&mut self, item: T) -> Option<T> {
        self.push(item)
    }
    fn pop(&mut self) -> Option<T> {
        self.pop()
    }
    fn peek(&self) -> Option<&T> {
        self.peek()
    }
    fn clear(&mut self) {
        self.clear();
    }
}

impl<T, F> ComparatorHeap<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// Creates a new empty, unbounded heap.
    pub fn new(cmp: F) -> Self {
        Self {
            data: Vec::new(),
            cmp,
            max_size: None,
        }
    }

    /// Creates a new empty heap that never holds more than `max_size` items.
    pub fn bounded(cmp: F, max_size: usize) -> Self {
        Self {
            data: Vec::new(),
            cmp,
            max_size: Some(max_size),
        }
    }

    /// Builds an unbounded heap out of `items` in O(n).
    ///
    /// Sifts down every internal node, starting from the last one and walking
    /// back to the root.
    pub fn heapify(items: Vec<T>, cmp: F) -> Self {
        let mut heap = Self {
            data: items,
            cmp,
            max_size: None,
        };
        for i in (0..heap.data.len() / 2).rev() {
            heap.percolate_down(i);
        }
        heap
    }

    // --- Inspection ---

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn max_size(&self) -> Option<usize> {
        self.max_size
    }

    /// Returns a reference to the highest priority item.
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Returns a guard over the highest priority item.
    ///
    /// Changes made through the guard are sifted into place when it drops.
    pub fn peek_mut(&mut self) -> Option<PeekMut<'_, T, F>> {
        if self.data.is_empty() {
            None
        } else {
            Some(PeekMut {
                heap: self,
                sift: true,
            })
        }
    }

    /// The backing storage, in heap (not priority) order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Verifies the heap order and the max size.
    pub fn check_invariants(&self) -> core::result::Result<(), InvariantViolation> {
        if let Some(max_size) = self.max_size {
            if self.data.len() > max_size {
                return Err(InvariantViolation::HeapOverflow {
                    len: self.data.len(),
                    max_size,
                });
            }
        }
        for child in 1..self.data.len() {
            let parent = (child - 1) / 2;
            if !self.in_order(parent, child) {
                return Err(InvariantViolation::HeapOrder { parent, child });
            }
        }
        Ok(())
    }

    // --- Modification ---

    /// Inserts `item`.
    ///
    /// If this takes a bounded heap past its max size, the root is popped and
    /// returned. The evicted item may be `item` itself.
    pub fn push(&mut self, item: T) -> Option<T> {
        self.data.push(item);
        self.percolate_up(self.data.len() - 1);
        match self.max_size {
            Some(max_size) if self.data.len() > max_size => self.pop(),
            _ => None,
        }
    }

    /// Removes and returns the highest priority item.
    pub fn pop(&mut self) -> Option<T> {
        let last = self.data.pop()?;
        if self.data.is_empty() {
            return Some(last);
        }
        let root = core::mem::replace(&mut self.data[0], last);
        self.percolate_down(0);
        Some(root)
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    // --- Consumption ---

    /// Consumes the heap and returns the underlying vector in arbitrary (heap) order.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Consumes the heap and returns a vector sorted from highest to lowest priority.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut vec = Vec::with_capacity(self.len());
        while let Some(item) = self.pop() {
            vec.push(item);
        }
        vec
    }

    // --- Internals ---

    #[inline]
    fn in_order(&self, parent: usize, child: usize) -> bool {
        (self.cmp)(&self.data[parent], &self.data[child]) != Ordering::Greater
    }

    fn percolate_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.in_order(parent, i) {
                break;
            }
            self.data.swap(parent, i);
            i = parent;
        }
    }

    fn percolate_down(&mut self, mut i: usize) {
        while let Some(child) = self.highest_priority_child(i) {
            if self.in_order(i, child) {
                break;
            }
            self.data.swap(i, child);
            i = child;
        }
    }

    /// Left child wins ties.
    fn highest_priority_child(&self, parent: usize) -> Option<usize> {
        let left = 2 * parent + 1;
        let right = left + 1;
        if left >= self.data.len() {
            None
        } else if right >= self.data.len() || self.in_order(left, right) {
            Some(left)
        } else {
            Some(right)
        }
    }
}

// --- Wrapper Types ---

/// Mutable access to the root of a [`ComparatorHeap`].
///
/// Dropping the guard restores the heap order.
pub struct PeekMut<'a, T, F: Fn(&T, &T) -> Ordering> {
    heap: &'a mut ComparatorHeap<T, F>,
    sift: bool,
}

impl<'a, T, F: Fn(&T, &T) -> Ordering> PeekMut<'a, T, F> {
    /// Removes the peeked item from the heap and returns it.
    pub fn pop(mut this: Self) -> T {
        this.sift = false;
        match this.heap.pop() {
            Some(item) => item,
            None => unreachable!("PeekMut over an empty heap"),
        }
    }
}

impl<'a, T, F: Fn(&T, &T) -> Ordering> Deref for PeekMut<'a, T, F> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.heap.data[0]
    }
}

impl<'a, T, F: Fn(&T, &T) -> Ordering> DerefMut for PeekMut<'a, T, F> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.heap.data[0]
    }
}

impl<'a, T, F: Fn(&T, &T) -> Ordering> Drop for PeekMut<'a, T, F> {
    fn drop(&mut self) {
        if self.sift {
            self.heap.percolate_down(0);
        }
    }
}

// --- Iterators ---

/// Draining iterator that yields items from highest to lowest priority.
pub struct IntoIter<T, F> {
    heap: ComparatorHeap<T, F>,
}

impl<T, F> Iterator for IntoIter<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    type Item = T;
    fn next(&mut self) -> Option<T> {
        self.heap.pop()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.heap.len();
        (len, Some(len))
    }
}

impl<T, F> ExactSizeIterator for IntoIter<T, F> where F: Fn(&T, &T) -> Ordering {}

impl<T, F> IntoIterator for ComparatorHeap<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    type Item = T;
    type IntoIter = IntoIter<T, F>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { heap: self }
    }
}

impl<'a, T, F> IntoIterator for &'a ComparatorHeap<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// --- Trait Implementations ---

impl<T: Clone, F: Clone> Clone for ComparatorHeap<T, F> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            cmp: self.cmp.clone(),
            max_size: self.max_size,
        }
    }
}

impl<T: Debug, F> Debug for ComparatorHeap<T, F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

/// Pushes every item; anything a bounded heap evicts along the way is dropped.
impl<T, F> Extend<T> for ComparatorHeap<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

// --- Tests ---
