use core::iter::Chain;
use core::ops::Range;

/// Iterator over every bucket index of a table of `capacity` buckets, starting
/// at `start` and wrapping once past the end.
pub(crate) type CircularRange = Chain<Range<usize>, Range<usize>>;

/// Visits `start, start + 1, .., capacity - 1, 0, .., start - 1`.
///
/// Yields nothing when `capacity` is zero.
#[inline]
pub(crate) fn circular_range(start: usize, capacity: usize) -> CircularRange {
    debug_assert!(start < capacity || capacity == 0);
    (start..capacity).chain(0..start.min(capacity))
}

/// Returns `true` if `x` lies in the circular half-open interval `(a, b]`.
///
/// When `a < b` this is the plain range `a < x <= b`. When the interval wraps
/// (`b < a`) it covers `(a, capacity)` and `[0, b]`. `a == b` is the empty
/// interval.
#[inline(always)]
pub(crate) fn in_circular_interval(x: usize, a: usize, b: usize) -> bool {
    if a <= b {
        a < x && x <= b
    } else {
        a < x || x <= b
    }
}

/// Circular distance travelled from `from` to reach `to`.
#[inline(always)]
pub(crate) fn circular_distance(from: usize, to: usize, capacity: usize) -> usize {
    if to >= from {
        to - from
    } else {
        capacity - from + to
    }
}
