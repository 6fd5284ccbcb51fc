/// Bucket count used for the first allocation of an empty table.
pub const INITIAL_CAPACITY: usize = 8;

/// The reciprocal of the maximum load factor of a table.
///
/// A table grows before an insertion would make `len * RECIPROCAL_LOAD_FACTOR`
/// exceed its bucket count, so occupancy stays at or below 50% and every probe
/// sequence is guaranteed to meet an empty bucket.
pub const RECIPROCAL_LOAD_FACTOR: usize = 2;

/// Sizing configuration for a table.
///
/// The default starts at [`INITIAL_CAPACITY`] buckets and grows without limit.
/// A `max_capacity` turns growth past that bucket count into a
/// [`ResizeError::CapacityLimit`](crate::ResizeError::CapacityLimit), leaving
/// the table untouched.
///
/// # Examples
///
/// ```rust
/// use shift_hash::Config;
///
/// let config = Config::default()
///     .with_initial_capacity(16)
///     .with_max_capacity(1024);
/// assert_eq!(config.initial_capacity(), 16);
/// assert_eq!(config.max_capacity(), 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    initial_capacity: usize,
    max_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: INITIAL_CAPACITY,
            max_capacity: usize::MAX,
        }
    }
}

impl Config {
    /// Sets the bucket count of the first allocation.
    ///
    /// The value is rounded up to a power of two, with a minimum of 2 so that
    /// the first allocation can hold an entry at the target load factor.
    /// Requests above the largest power of two a `usize` holds are clamped to
    /// it.
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity
            .max(RECIPROCAL_LOAD_FACTOR)
            .checked_next_power_of_two()
            .unwrap_or(1 << (usize::BITS - 1));
        self
    }

    /// Sets the largest bucket count the table may grow to.
    pub fn with_max_capacity(mut self, max_capacity: usize) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Bucket count of the first allocation.
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Largest bucket count the table may grow to.
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Bucket count to grow to from `current`: the initial capacity for an
    /// unallocated table, double otherwise. `None` on overflow.
    pub(crate) fn next_capacity(&self, current: usize) -> Option<usize> {
        if current == 0 {
            Some(self.initial_capacity)
        } else {
            current.checked_mul(2)
        }
    }

    /// Smallest bucket count of the growth sequence that holds `items`
    /// entries at the target load factor. `None` on overflow.
    pub(crate) fn capacity_for(&self, items: usize) -> Option<usize> {
        if items == 0 {
            return Some(0);
        }

        let required = items.checked_mul(RECIPROCAL_LOAD_FACTOR)?;
        let mut capacity = self.initial_capacity;
        while capacity < required {
            capacity = capacity.checked_mul(2)?;
        }
        Some(capacity)
    }
}
