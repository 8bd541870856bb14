//! Half-open slot interval overlap.

use crate::core::domain::SlotInterval;

/// Returns `true` if `[begin_a, end_a)` and `[begin_b, end_b)` share at least one slot.
///
/// Touching endpoints do not count as overlapping.
///
/// # Examples
///
/// ```
/// use class_collisions::algorithms::overlap::overlaps;
///
/// assert!(overlaps(0, 4, 2, 6));
/// assert!(!overlaps(0, 2, 2, 4));
/// ```
#[inline]
pub fn overlaps(begin_a: u32, end_a: u32, begin_b: u32, end_b: u32) -> bool {
    begin_a < end_b && begin_b < end_a
}

/// Number of slots shared by two intervals, zero when they are disjoint.
pub fn overlap_slots(a: &SlotInterval, b: &SlotInterval) -> u32 {
    let start = a.begin.max(b.begin);
    let stop = a.end.min(b.end);
    stop.saturating_sub(start)
}
