use core::iter::Chain;
use core::ops::Range;
use std::collections::VecDeque;
use std::fmt;

use crate::InvariantViolation;

/// A trait for abstraction over different FIFO queue types (ring buffer, std).
pub trait AnyQueue<T> {
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Enqueues `item` and returns the new length.
    fn push_right(&mut self, item: T) -> usize;
    fn pop_left(&mut self) -> Option<T>;
    fn peek_left(&self) -> Option<&T>;
    fn peek_right(&self) -> Option<&T>;
    fn clear(&mut self);
}

impl<T> AnyQueue<T> for VecDeque<T> {
    fn len(&self) -> usize {
        self.len()
    }
    fn push_right(&mut self, item: T) -> usize {
        self.push_back(item);
        self.len()
    }
    fn pop_left(&mut self) -> Option<T> {
        self.pop_front()
    }
    fn peek_left(&self) -> Option<&T> {
        self.front()
    }
    fn peek_right(&self) -> Option<&T> {
        self.back()
    }
    fn clear(&mut self) {
        self.clear();
    }
}

/// Occupied region of the ring: `start` holds the oldest item, `end` the newest.
///
/// When `start > end` the region wraps past the last slot back to slot 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
}

/// A FIFO queue over a circular buffer that doubles when full and halves when
/// mostly empty.
///
/// # Overview
/// Items are pushed on the right and popped on the left. Both are amortized O(1);
/// a resize copies the live items, in FIFO order, to the front of a fresh buffer.
///
/// # Invariants
/// * `span == None` exactly when the queue is empty.
/// * Slots inside the span are `Some`, all others are `None`.
/// * `capacity() >= MIN_CAPACITY` and `capacity() >= len()`.
/// * After a pop, `capacity() > MIN_CAPACITY` implies `len() * 4 >= capacity()`
///   or a halving has just happened.
#[derive(Clone)]
pub struct RingQueue<T> {
    slots: Box<[Option<T>]>,
    span: Option<Span>,
}

impl<T> AnyQueue<T> for RingQueue<T> {
    fn len(&self) -> usize {
        self.len()
    }
    fn push_right(&mut self, item: T) -> usize {
        self.push_right(item)
    }
    fn pop_left(&mut self) -> Option<T> {
        self.pop_left()
    }
    fn peek_left(&self) -> Option<&T> {
        self.peek_left()
    }
    fn peek_right(&self) -> Option<&T> {
        self.peek_right()
    }
    fn clear(&mut self) {
        self.clear();
    }
}

impl<T> RingQueue<T> {
    /// Capacity of a new queue, and the floor shrinking never goes below.
    pub const MIN_CAPACITY: usize = 10;

    /// Creates a new empty queue with `MIN_CAPACITY` slots.
    pub fn new() -> Self {
        Self::with_capacity(Self::MIN_CAPACITY)
    }

    /// Creates a new empty queue with at least `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: empty_slots(capacity.max(Self::MIN_CAPACITY)),
            span: None,
        }
    }

    // --- Inspection ---

    pub fn len(&self) -> usize {
        match self.span {
            None => 0,
            Some(Span { start, end }) if start == end => 1,
            Some(Span { start, end }) if start < end => end - start + 1,
            Some(Span { start, end }) => self.capacity() - start + end + 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_none()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    // --- Access ---

    /// Returns the next item to be popped.
    pub fn peek_left(&self) -> Option<&T> {
        let span = self.span?;
        self.slots[span.start].as_ref()
    }

    /// Returns the most recently pushed item.
    pub fn peek_right(&self) -> Option<&T> {
        let span = self.span?;
        self.slots[span.end].as_ref()
    }

    /// Returns the `index`-th oldest item.
    pub fn get(&self, index: usize) -> Option<&T> {
        let span = self.span?;
        if index >= self.len() {
            return None;
        }
        self.slots[(span.start + index) % self.capacity()].as_ref()
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: &self.slots,
            order: fifo_order(self.span, self.capacity()),
        }
    }

    /// Checks the capacity floor, the span bounds and the size bookkeeping.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let capacity = self.capacity();
        if capacity < Self::MIN_CAPACITY {
            return Err(InvariantViolation::QueueCapacityFloor {
                capacity,
                floor: Self::MIN_CAPACITY,
            });
        }
        if let Some(Span { start, end }) = self.span {
            for index in [start, end] {
                if index >= capacity {
                    return Err(InvariantViolation::QueueIndexOutOfRange { index, capacity });
                }
            }
        }
        let occupied = self.slots.iter().filter(|slot| slot.is_some()).count();
        let derived = self.len();
        let in_span = self.iter().count();
        if derived != occupied || in_span != occupied {
            return Err(InvariantViolation::QueueSizeDrift { derived, occupied });
        }
        Ok(())
    }

    // --- Modification ---

    /// Enqueues `item` on the right and returns the new length.
    pub fn push_right(&mut self, item: T) -> usize {
        let capacity = self.capacity();
        let Some(Span { start, end }) = self.span else {
            self.slots[0] = Some(item);
            self.span = Some(Span { start: 0, end: 0 });
            return 1;
        };

        let slot = if start < end {
            if end + 1 < capacity {
                end + 1
            } else if start > 0 {
                0
            } else {
                return self.grow_and_push(item);
            }
        } else if start > end {
            if start - end > 1 {
                end + 1
            } else {
                return self.grow_and_push(item);
            }
        } else if end + 1 < capacity {
            end + 1
        } else if start > 0 {
            // The only item sits in the last slot; the next one goes in front of it
            // physically, which is behind it logically once the ring wraps.
            0
        } else {
            unreachable!("queue of capacity {capacity} has start == end and no free slot")
        };

        self.slots[slot] = Some(item);
        self.span = Some(Span { start, end: slot });
        self.len()
    }

    /// Dequeues the oldest item.
    pub fn pop_left(&mut self) -> Option<T> {
        let Span { start, end } = self.span?;
        let item = self.slots[start].take();
        self.span = if start == end {
            None
        } else if start + 1 == self.capacity() {
            Some(Span { start: 0, end })
        } else {
            Some(Span {
                start: start + 1,
                end,
            })
        };

        if self.capacity() > Self::MIN_CAPACITY && self.len() * 4 < self.capacity() {
            self.resize(false);
        }

        match item {
            Some(item) => Some(item),
            None => unreachable!("queue slot {start} is inside the span but empty"),
        }
    }

    /// Drops every item and returns to a fresh `MIN_CAPACITY` buffer.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    // --- Internals ---

    fn grow_and_push(&mut self, item: T) -> usize {
        self.resize(true);
        self.push_right(item)
    }

    /// Doubles, or halves down to the floor, copying items in FIFO order to index 0.
    fn resize(&mut self, grow: bool) {
        let capacity = self.capacity();
        let new_capacity = if grow {
            capacity * 2
        } else {
            (capacity / 2).max(Self::MIN_CAPACITY)
        };

        let order = fifo_order(self.span, capacity);
        let mut old = core::mem::replace(&mut self.slots, empty_slots(new_capacity));
        let mut copied = 0;
        for index in order {
            self.slots[copied] = old[index].take();
            copied += 1;
        }

        self.span = match copied {
            0 => None,
            n => Some(Span {
                start: 0,
                end: n - 1,
            }),
        };
    }
}

fn empty_slots<T>(capacity: usize) -> Box<[Option<T>]> {
    (0..capacity).map(|_| None).collect()
}

/// Physical slot indices of `span`, oldest first.
fn fifo_order(span: Option<Span>, capacity: usize) -> Chain<Range<usize>, Range<usize>> {
    match span {
        None => (0..0).chain(0..0),
        Some(Span { start, end }) if start <= end => (start..end + 1).chain(0..0),
        Some(Span { start, end }) => (start..capacity).chain(0..end + 1),
    }
}

// --- Iterators ---

pub struct Iter<'a, T> {
    slots: &'a [Option<T>],
    order: Chain<Range<usize>, Range<usize>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<&'a T> {
        let index = self.order.next()?;
        self.slots[index].as_ref()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<'a, T> IntoIterator for &'a RingQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Draining iterator that pops from the left.
pub struct IntoIter<T> {
    queue: RingQueue<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<T> {
        self.queue.pop_left()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.queue.len();
        (len, Some(len))
    }
}

impl<T> IntoIterator for RingQueue<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { queue: self }
    }
}

// --- Trait Implementations ---

impl<T> Default for RingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for RingQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Equal when both hold the same items in the same FIFO order, whatever the layout.
impl<T: PartialEq> PartialEq for RingQueue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for RingQueue<T> {}

impl<T> Extend<T> for RingQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_right(item);
        }
    }
}

impl<T> FromIterator<T> for RingQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn pop_all(q: &mut RingQueue<i32>) -> Vec<i32> {
        let mut out = Vec::new();
        while let Some(x) = q.pop_left() {
            out.push(x);
        }
        out
    }

    // ─── empty state ─────────────────────────────────────────────────────────
    #[test]
    fn test_queue_empty_inspection() {
        let mut q: RingQueue<i32> = RingQueue::new();
        assert_eq!(q.len(), 0);
        assert!(q.is_empty());
        assert_eq!(q.capacity(), RingQueue::<i32>::MIN_CAPACITY);
        assert_eq!(q.peek_left(), None);
        assert_eq!(q.peek_right(), None);
        assert_eq!(q.pop_left(), None);
        assert_eq!(q.get(0), None);
        assert_eq!(q.check_invariants(), Ok(()));
    }

    // ─── pushing & popping ───────────────────────────────────────────────────
    #[test]
    fn test_queue_ops_peek_fifo() {
        let mut q = RingQueue::new();
        for i in 0..5 {
            assert_eq!(q.push_right(i), (i + 1) as usize);
            assert_eq!(q.peek_left(), Some(&0));
            assert_eq!(q.peek_right(), Some(&i));
        }
    }

    #[test]
    fn test_queue_ops_pop_fifo_then_empty() {
        let mut q = RingQueue::new();
        for i in 0..5 {
            q.push_right(i);
        }
        let popped: Vec<Option<i32>> = (0..10).map(|_| q.pop_left()).collect();
        assert_eq!(
            popped,
            vec![
                Some(0),
                Some(1),
                Some(2),
                Some(3),
                Some(4),
                None,
                None,
                None,
                None,
                None
            ]
        );
        assert!(q.is_empty());
    }

    #[test]
    fn test_queue_ops_get() {
        let q: RingQueue<i32> = (10..15).collect();
        assert_eq!(q.get(0), Some(&10));
        assert_eq!(q.get(4), Some(&14));
        assert_eq!(q.get(5), None);
    }

    // ─── wrap-around ─────────────────────────────────────────────────────────
    #[test]
    fn test_queue_wrap_middle_of_storage() {
        let mut q = RingQueue::new();
        let mut next = 0;
        while q.len() < 6 {
            q.push_right(next);
            next += 1;
        }
        for expected in 0..5 {
            assert_eq!(q.pop_left(), Some(expected));
        }
        // [_, _, _, _, _, s/e, _, _, _, _]
        while q.len() < 8 {
            q.push_right(next);
            next += 1;
        }
        // [e, e, e, _, _, s, x, x, x, x]
        assert_eq!(q.span, Some(Span { start: 5, end: 2 }));
        assert_eq!(q.capacity(), 10);
        assert_eq!(q.get(5), Some(&10));
        assert_eq!(q.check_invariants(), Ok(()));
        assert_eq!(pop_all(&mut q), (5..13).collect::<Vec<_>>());
    }

    #[test]
    fn test_queue_wrap_fills_gap_before_growing() {
        let mut q = RingQueue::new();
        for i in 0..6 {
            q.push_right(i);
        }
        for _ in 0..5 {
            q.pop_left();
        }
        for i in 6..13 {
            q.push_right(i);
        }
        // Two free slots left between end and start.
        q.push_right(13);
        q.push_right(14);
        assert_eq!(q.capacity(), 10);
        assert_eq!(q.len(), 10);

        q.push_right(15);
        assert_eq!(q.capacity(), 20);
        assert_eq!(q.span, Some(Span { start: 0, end: 10 }));
        for i in 16..25 {
            q.push_right(i);
        }
        assert_eq!(q.check_invariants(), Ok(()));
        assert_eq!(pop_all(&mut q), (5..25).collect::<Vec<_>>());
    }

    #[test]
    fn test_queue_wrap_single_item_in_last_slot() {
        let mut q = RingQueue::new();
        for i in 0..10 {
            q.push_right(i);
        }
        for i in 0..9 {
            assert_eq!(q.pop_left(), Some(i));
        }
        assert_eq!(q.span, Some(Span { start: 9, end: 9 }));

        q.push_right(10);
        assert_eq!(q.span, Some(Span { start: 9, end: 0 }));
        assert_eq!(q.len(), 2);
        assert_eq!(q.peek_left(), Some(&9));
        assert_eq!(q.peek_right(), Some(&10));
        assert_eq!(q.pop_left(), Some(9));
        assert_eq!(q.pop_left(), Some(10));
        assert_eq!(q.pop_left(), None);
    }

    #[test]
    fn test_queue_wrap_start_at_last_slot() {
        let mut q = RingQueue::new();
        for i in 0..10 {
            q.push_right(i);
        }
        for _ in 0..8 {
            q.pop_left();
        }
        q.push_right(10);
        q.push_right(11);
        assert_eq!(q.span, Some(Span { start: 8, end: 1 }));
        assert_eq!(q.pop_left(), Some(8));
        assert_eq!(q.pop_left(), Some(9));
        assert_eq!(q.span, Some(Span { start: 0, end: 1 }));
        assert_eq!(q.len(), 2);
    }

    // ─── scaling ─────────────────────────────────────────────────────────────
    #[test]
    fn test_queue_resize_doubles_when_full() {
        let mut q = RingQueue::new();
        for i in 0..10 {
            q.push_right(i);
        }
        assert_eq!(q.capacity(), 10);
        assert_eq!(q.push_right(10), 11);
        assert_eq!(q.capacity(), 20);
        assert_eq!(q.span, Some(Span { start: 0, end: 10 }));
    }

    #[test]
    fn test_queue_resize_halves_below_quarter() {
        let mut q: RingQueue<i32> = (0..41).collect();
        assert_eq!(q.capacity(), 80);

        // 20 left: 20 * 4 == 80, no shrink yet.
        for _ in 0..21 {
            q.pop_left();
        }
        assert_eq!(q.len(), 20);
        assert_eq!(q.capacity(), 80);

        q.pop_left();
        assert_eq!(q.len(), 19);
        assert_eq!(q.capacity(), 40);
        assert_eq!(q.span, Some(Span { start: 0, end: 18 }));
        assert_eq!(q.peek_left(), Some(&22));
        assert_eq!(q.check_invariants(), Ok(()));
    }

    #[test]
    fn test_queue_resize_floor() {
        let mut q: RingQueue<i32> = (0..11).collect();
        assert_eq!(q.capacity(), 20);
        while q.pop_left().is_some() {
            assert!(q.capacity() >= RingQueue::<i32>::MIN_CAPACITY);
        }
        assert_eq!(q.capacity(), 10);
        assert!(q.is_empty());
        assert_eq!(q.check_invariants(), Ok(()));
    }

    #[test]
    fn test_queue_resize_grow_shrink_cycles() {
        let mut q = RingQueue::new();
        let (mut min, mut max) = (1usize, 10usize);
        let mut next = 0;
        let mut last = -1;
        while next < 10_000 {
            while q.len() < max {
                q.push_right(next);
                next += 1;
            }
            while q.len() > min {
                let popped = q.pop_left().unwrap();
                assert!(popped > last);
                last = popped;
            }
            assert_eq!(q.check_invariants(), Ok(()));
            min *= 10;
            max *= 10;
        }
    }

    #[test]
    fn test_queue_with_capacity_clamps() {
        let q: RingQueue<u8> = RingQueue::with_capacity(3);
        assert_eq!(q.capacity(), 10);
        let q: RingQueue<u8> = RingQueue::with_capacity(64);
        assert_eq!(q.capacity(), 64);
    }

    // ─── randomized against VecDeque ─────────────────────────────────────────
    #[test]
    fn test_queue_any_queue_matches_vecdeque() {
        let mut rng = StdRng::seed_from_u64(0xf1f0);
        let mut ours: RingQueue<u32> = RingQueue::new();
        let mut model: VecDeque<u32> = VecDeque::new();
        let mut pushes = 0usize;
        let mut pops = 0usize;

        for step in 0..20_000u32 {
            // Drift between push-heavy and pop-heavy phases to cross resize thresholds.
            let push_bias = if (step / 2_000) % 2 == 0 { 0.7 } else { 0.3 };
            if rng.gen_bool(push_bias) {
                let a = AnyQueue::push_right(&mut ours, step);
                let b = AnyQueue::push_right(&mut model, step);
                assert_eq!(a, b);
                pushes += 1;
            } else {
                let popped = AnyQueue::pop_left(&mut ours);
                assert_eq!(popped, AnyQueue::pop_left(&mut model));
                assert_eq!(popped.is_none(), pushes == pops);
                if popped.is_some() {
                    pops += 1;
                }
            }

            assert_eq!(ours.len(), pushes - pops);
            assert_eq!(AnyQueue::peek_left(&ours), AnyQueue::peek_left(&model));
            assert_eq!(AnyQueue::peek_right(&ours), AnyQueue::peek_right(&model));

            let capacity = ours.capacity();
            assert!(capacity >= RingQueue::<u32>::MIN_CAPACITY);
            assert!(capacity >= ours.len());
            if capacity > RingQueue::<u32>::MIN_CAPACITY {
                assert!(ours.len() * 4 >= capacity / 2);
            }
        }
        assert_eq!(ours.check_invariants(), Ok(()));
        assert!(ours.iter().eq(model.iter()));
    }

    #[test]
    fn test_queue_any_queue_trait() {
        let mut q: RingQueue<i32> = RingQueue::new();
        let any: &mut dyn AnyQueue<i32> = &mut q;
        assert_eq!(any.push_right(5), 1);
        assert_eq!(any.push_right(10), 2);
        assert_eq!(any.len(), 2);
        assert!(!any.is_empty());
        assert_eq!(any.peek_left(), Some(&5));
        assert_eq!(any.peek_right(), Some(&10));
        assert_eq!(any.pop_left(), Some(5));
        any.clear();
        assert!(any.is_empty());
    }

    // ─── invariants ──────────────────────────────────────────────────────────
    #[test]
    fn test_queue_invariants_detect_drift() {
        let mut q: RingQueue<i32> = (0..3).collect();
        q.span = Some(Span { start: 0, end: 3 });
        assert_eq!(
            q.check_invariants(),
            Err(InvariantViolation::QueueSizeDrift {
                derived: 4,
                occupied: 3
            })
        );

        q.span = Some(Span { start: 0, end: 12 });
        assert_eq!(
            q.check_invariants(),
            Err(InvariantViolation::QueueIndexOutOfRange {
                index: 12,
                capacity: 10
            })
        );

        let short = RingQueue::<i32> {
            slots: empty_slots(4),
            span: None,
        };
        assert_eq!(
            short.check_invariants(),
            Err(InvariantViolation::QueueCapacityFloor {
                capacity: 4,
                floor: 10
            })
        );
    }

    // ─── traits ──────────────────────────────────────────────────────────────
    #[test]
    fn test_queue_traits_iter_wrapped() {
        let mut q = RingQueue::new();
        for i in 0..10 {
            q.push_right(i);
        }
        for _ in 0..7 {
            q.pop_left();
        }
        q.extend([10, 11, 12]);
        let v: Vec<i32> = q.iter().copied().collect();
        assert_eq!(v, vec![7, 8, 9, 10, 11, 12]);
        assert_eq!(q.iter().size_hint(), (6, Some(6)));
        assert_eq!((&q).into_iter().count(), 6);
    }

    #[test]
    fn test_queue_traits_into_iter() {
        let q: RingQueue<i32> = (0..25).collect();
        let mut it = q.into_iter();
        assert_eq!(it.size_hint(), (25, Some(25)));
        assert_eq!(it.collect::<Vec<_>>(), (0..25).collect::<Vec<_>>());
    }

    #[test]
    fn test_queue_traits_eq_ignores_layout() {
        let mut wrapped = RingQueue::new();
        for i in 0..10 {
            wrapped.push_right(i);
        }
        for _ in 0..8 {
            wrapped.pop_left();
        }
        wrapped.push_right(10);
        let straight: RingQueue<i32> = vec![8, 9, 10].into_iter().collect();
        assert_ne!(wrapped.span, straight.span);
        assert_eq!(wrapped, straight);

        let other: RingQueue<i32> = vec![8, 9].into_iter().collect();
        assert_ne!(wrapped, other);
    }

    #[test]
    fn test_queue_traits_clone_debug_default() {
        let mut q: RingQueue<i32> = RingQueue::default();
        q.extend([1, 2, 3]);
        let mut cloned = q.clone();
        q.push_right(4);
        assert_eq!(cloned.len(), 3);
        assert_eq!(cloned.pop_left(), Some(1));
        assert_eq!(format!("{:?}", q), "[1, 2, 3, 4]");
    }

    #[test]
    fn test_queue_clear() {
        let mut q: RingQueue<i32> = (0..30).collect();
        assert_eq!(q.capacity(), 40);
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.capacity(), 10);
        q.push_right(3);
        assert_eq!(q.pop_left(), Some(3));
    }

    #[test]
    fn test_queue_drop_check() {
        use std::cell::RefCell;
        use std::rc::Rc;

        struct Tracker(Rc<RefCell<i32>>);
        impl Drop for Tracker {
            fn drop(&mut self) {
                *self.0.borrow_mut() += 1;
            }
        }

        let counter = Rc::new(RefCell::new(0));
        {
            let mut q = RingQueue::new();
            for _ in 0..25 {
                q.push_right(Tracker(counter.clone()));
            }
            for _ in 0..20 {
                q.pop_left();
            }
            assert_eq!(*counter.borrow(), 20);
        }
        assert_eq!(*counter.borrow(), 25);
    }
}
