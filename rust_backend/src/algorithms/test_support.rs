//! Record builders shared by the algorithm unit tests.

use crate::core::domain::{DayId, RoomId, SessionRecord, SlotInterval, TeacherId};

/// Builds a session with the given resources and slot range.
pub fn session(id: i64, teacher: i64, room: i64, day: i64, begin: u32, end: u32) -> SessionRecord {
    SessionRecord::new(
        id,
        TeacherId(teacher),
        RoomId(room),
        DayId(day),
        SlotInterval::new(begin, end).expect("test interval must be well formed"),
    )
}

/// Every colliding pair under both keys, found by comparing all pairs.
pub fn brute_force_pairs(
    records: &[SessionRecord],
    collides: impl Fn(&SessionRecord, &SessionRecord) -> bool,
) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for later in 0..records.len() {
        for earlier in 0..later {
            if collides(&records[earlier], &records[later]) {
                pairs.push((earlier, later));
            }
        }
    }
    pairs
}
