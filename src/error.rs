use alloc::collections::TryReserveError;
use core::fmt;

/// The bucket array could not be grown.
///
/// Whenever this is returned the table is exactly as it was before the call:
/// same length, same capacity, same contents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResizeError {
    /// The new bucket count does not fit in a `usize`.
    #[error("bucket count overflowed usize")]
    CapacityOverflow,
    /// Growing would exceed the table's configured maximum capacity.
    #[error("growing to {requested} buckets exceeds the configured maximum of {max}")]
    CapacityLimit {
        /// Bucket count the table tried to grow to.
        requested: usize,
        /// Configured maximum bucket count.
        max: usize,
    },
    /// The allocator could not provide the new bucket array.
    #[error("failed to allocate {capacity} buckets")]
    AllocFailed {
        /// Bucket count the table tried to allocate.
        capacity: usize,
        /// Underlying allocation error.
        #[source]
        source: TryReserveError,
    },
}

/// An insertion was refused because the table could not grow.
///
/// The key and value are handed back untouched so nothing is lost.
#[derive(thiserror::Error)]
#[error("insertion failed: {error}")]
pub struct InsertError<K, V> {
    /// The key that was not inserted.
    pub key: K,
    /// The value that was not inserted.
    pub value: V,
    /// Why the table could not grow.
    #[source]
    pub error: ResizeError,
}

impl<K, V> InsertError<K, V> {
    /// Returns the rejected key and value.
    pub fn into_inner(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> fmt::Debug for InsertError<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsertError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

/// A table invariant that does not hold.
///
/// Returned by the `check_consistency` testing hooks. Any of these means
/// either the caller's hasher is inconsistent or the table itself is broken.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsistencyError {
    /// More live entries than buckets.
    #[error("size {size} exceeds capacity {capacity}")]
    SizeExceedsCapacity {
        /// Recorded number of live entries.
        size: usize,
        /// Number of buckets.
        capacity: usize,
    },
    /// Occupancy above the maximum load factor.
    #[error("size {size} is above the load limit of capacity {capacity}")]
    LoadFactorExceeded {
        /// Recorded number of live entries.
        size: usize,
        /// Number of buckets.
        capacity: usize,
    },
    /// The recorded size disagrees with the number of occupied buckets.
    #[error("{occupied} occupied buckets but size is {size}")]
    SizeMismatch {
        /// Occupied buckets counted by the check.
        occupied: usize,
        /// Recorded number of live entries.
        size: usize,
    },
    /// A cached hash differs from re-hashing the stored key.
    #[error("cached hash {cached:#010x} at bucket {index} does not match rehash {actual:#010x}")]
    StaleHash {
        /// Bucket holding the entry.
        index: usize,
        /// Hash stored in the bucket.
        cached: u32,
        /// Hash computed from the stored key.
        actual: u32,
    },
    /// A stored entry cannot be found by probing from its ideal bucket.
    #[error("entry at bucket {index} is not reachable from its ideal bucket {ideal}")]
    Unreachable {
        /// Bucket holding the entry.
        index: usize,
        /// Bucket the entry's hash maps to.
        ideal: usize,
    },
}
