//! Diagnostics for container bookkeeping.

use thiserror::Error;

/// A broken structural invariant, as reported by the `check_invariants` methods.
///
/// Normal operations never return this; they panic on an impossible state instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// A parent has strictly lower priority than one of its children.
    #[error("heap order broken: parent at {parent} ranks below child at {child}")]
    HeapOrder {
        /// Storage index of the parent.
        parent: usize,
        /// Storage index of the offending child.
        child: usize,
    },
    /// A bounded heap holds more items than its max size.
    #[error("heap holds {len} items but its max size is {max_size}")]
    HeapOverflow { len: usize, max_size: usize },
    /// The queue backing storage shrank below the capacity floor.
    #[error("queue capacity {capacity} is below the floor of {floor}")]
    QueueCapacityFloor { capacity: usize, floor: usize },
    /// A start or end index points past the end of the backing storage.
    #[error("queue index {index} is out of range for capacity {capacity}")]
    QueueIndexOutOfRange { index: usize, capacity: usize },
    /// The size derived from start/end disagrees with the occupied slot count.
    #[error("queue size is {derived} from its indices but {occupied} slots are occupied")]
    QueueSizeDrift { derived: usize, occupied: usize },
}
