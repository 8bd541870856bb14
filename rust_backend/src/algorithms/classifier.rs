//! Collision type, level and size for a pair of sessions.

use crate::algorithms::conflict_index::IndexStrategy;
use crate::core::domain::{
    CollisionAnnotation, CollisionLevel, CollisionType, SessionRecord, SlotInterval,
};

/// Classifies a pair of sessions.
///
/// The type considers both resources: a pair that double-books the teacher
/// and the room is `TEACHER-AND-ROOM`. Callers are expected to pass a pair
/// that collides under at least one key; otherwise the type is `NONE`.
///
/// # Examples
///
/// ```
/// use class_collisions::algorithms::classifier::classify;
/// use class_collisions::core::domain::{
///     CollisionLevel, CollisionType, DayId, RoomId, SessionRecord, SlotInterval, TeacherId,
/// };
///
/// let a = SessionRecord::new(1, TeacherId(1), RoomId(1), DayId(1), SlotInterval::new(0, 4).unwrap());
/// let b = SessionRecord::new(2, TeacherId(1), RoomId(2), DayId(1), SlotInterval::new(0, 4).unwrap());
///
/// let annotation = classify(&a, &b);
/// assert_eq!(annotation.collision_type, CollisionType::Teacher);
/// assert_eq!(annotation.level, CollisionLevel::Total);
/// assert_eq!(annotation.size_minutes, 60);
/// ```
pub fn classify(first: &SessionRecord, second: &SessionRecord) -> CollisionAnnotation {
    CollisionAnnotation {
        collision_type: collision_type(first, second),
        level: collision_level(&first.slots, &second.slots),
        size_minutes: collision_size(&first.slots, &second.slots),
    }
}

/// Classifies a pair found by a single index, labelling it with that index's
/// resource regardless of the other key.
pub fn classify_as(
    strategy: IndexStrategy,
    first: &SessionRecord,
    second: &SessionRecord,
) -> CollisionAnnotation {
    CollisionAnnotation {
        collision_type: strategy.collision_type(),
        ..classify(first, second)
    }
}

pub fn collision_type(first: &SessionRecord, second: &SessionRecord) -> CollisionType {
    let teacher = IndexStrategy::ByTeacher.collides(first, second);
    let room = IndexStrategy::ByRoom.collides(first, second);

    match (teacher, room) {
        (true, true) => CollisionType::TeacherAndRoom,
        (true, false) => CollisionType::Teacher,
        (false, true) => CollisionType::Room,
        (false, false) => CollisionType::None,
    }
}

/// `TOTAL` only when both intervals are identical.
pub fn collision_level(first: &SlotInterval, second: &SlotInterval) -> CollisionLevel {
    if first.begin == second.begin && first.end == second.end {
        CollisionLevel::Total
    } else {
        CollisionLevel::Partial
    }
}

/// Overlap length in minutes.
pub fn collision_size(first: &SlotInterval, second: &SlotInterval) -> u32 {
    first.overlap_minutes(second)
}
