//! Domain models for class sessions, slot intervals and collision annotations.
//!
//! This module provides the core data structures that represent a term's class
//! schedule: the session records themselves, the half-open slot intervals they
//! occupy, and the collision codes written back onto them after detection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::algorithms::overlap;
use crate::error::{ScheduleError, ScheduleResult};

/// Length of one schedule slot in minutes.
pub const SLOT_MINUTES: u32 = 15;

/// Largest slot index whose minute offset still fits in a `u32`.
pub const MAX_SLOT: u32 = u32::MAX / SLOT_MINUTES;

/// Identifier of a session row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub i64);

/// Identifier of a teacher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeacherId(pub i64);

/// Identifier of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub i64);

/// Identifier of a weekday within the term grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DayId(pub i64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A half-open interval `[begin, end)` of ordinal slot indices.
///
/// Each slot covers [`SLOT_MINUTES`] minutes. Touching intervals such as
/// `[0, 2)` and `[2, 4)` do not overlap.
///
/// # Examples
///
/// ```
/// use class_collisions::core::domain::SlotInterval;
///
/// let morning = SlotInterval::new(0, 4).unwrap();
/// assert_eq!(morning.duration_minutes(), 60);
/// assert!(SlotInterval::new(4, 4).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotInterval {
    pub begin: u32,
    pub end: u32,
}

impl SlotInterval {
    /// Creates an interval, rejecting empty, inverted or out-of-range bounds.
    pub fn new(begin: u32, end: u32) -> ScheduleResult<Self> {
        let slots = Self { begin, end };
        if !slots.is_well_formed() {
            return Err(ScheduleError::InvalidInterval { begin, end });
        }
        Ok(slots)
    }

    /// Returns `true` when `begin < end` and `end <= MAX_SLOT`.
    pub fn is_well_formed(&self) -> bool {
        self.begin < self.end && self.end <= MAX_SLOT
    }

    /// Number of slots covered.
    pub fn len_slots(&self) -> u32 {
        self.end.saturating_sub(self.begin)
    }

    pub fn duration_minutes(&self) -> u32 {
        self.len_slots() * SLOT_MINUTES
    }

    /// Half-open overlap test against another interval.
    pub fn overlaps(&self, other: &SlotInterval) -> bool {
        overlap::overlaps(self.begin, self.end, other.begin, other.end)
    }

    /// Minutes shared with `other`, zero when the intervals do not overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use class_collisions::core::domain::SlotInterval;
    ///
    /// let a = SlotInterval::new(0, 4).unwrap();
    /// let b = SlotInterval::new(2, 6).unwrap();
    /// assert_eq!(a.overlap_minutes(&b), 30);
    /// ```
    pub fn overlap_minutes(&self, other: &SlotInterval) -> u32 {
        overlap::overlap_slots(self, other) * SLOT_MINUTES
    }
}

/// Which resource a collision double-books.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum CollisionType {
    #[default]
    None,
    Teacher,
    Room,
    TeacherAndRoom,
}

impl CollisionType {
    pub const ALL: [CollisionType; 4] = [
        CollisionType::None,
        CollisionType::Teacher,
        CollisionType::Room,
        CollisionType::TeacherAndRoom,
    ];

    /// Canonical code written to the exported table.
    pub fn code(&self) -> &'static str {
        match self {
            CollisionType::None => "NONE",
            CollisionType::Teacher => "TEACHER",
            CollisionType::Room => "ROOM",
            CollisionType::TeacherAndRoom => "TEACHER-AND-ROOM",
        }
    }
}

impl fmt::Display for CollisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CollisionType {
    type Err = String;

    /// Accepts the canonical codes as well as the legacy ones found in older
    /// exports (`--OK--`, `--PRF--`, `--SAL--`, `PRF-SAL`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" | "NONE" | "--OK--" => Ok(CollisionType::None),
            "TEACHER" | "--PRF--" => Ok(CollisionType::Teacher),
            "ROOM" | "--SAL--" => Ok(CollisionType::Room),
            "TEACHER-AND-ROOM" | "PRF-SAL" => Ok(CollisionType::TeacherAndRoom),
            other => Err(format!("unknown collision type code: {}", other)),
        }
    }
}

/// How much of the two intervals coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollisionLevel {
    #[default]
    None,
    Total,
    Partial,
}

impl CollisionLevel {
    pub const ALL: [CollisionLevel; 3] = [
        CollisionLevel::None,
        CollisionLevel::Total,
        CollisionLevel::Partial,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            CollisionLevel::None => "NONE",
            CollisionLevel::Total => "TOTAL",
            CollisionLevel::Partial => "PARTIAL",
        }
    }
}

impl fmt::Display for CollisionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CollisionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" | "NONE" | "OK-----" => Ok(CollisionLevel::None),
            "TOTAL" | "TOTAL--" => Ok(CollisionLevel::Total),
            "PARTIAL" | "PARCIAL" => Ok(CollisionLevel::Partial),
            other => Err(format!("unknown collision level code: {}", other)),
        }
    }
}

/// The three collision fields carried by every session row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CollisionAnnotation {
    pub collision_type: CollisionType,
    pub level: CollisionLevel,
    pub size_minutes: u32,
}

impl CollisionAnnotation {
    /// Returns `true` for the neutral `NONE / NONE / 0` annotation.
    pub fn is_neutral(&self) -> bool {
        *self == CollisionAnnotation::default()
    }
}

/// Descriptive columns passed through untouched by detection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDetails {
    pub solution_id: i64,
    pub solution_name: String,
    pub solution_initials: String,
    pub teacher_name: String,
    pub institution_id: i64,
    pub unit_id: i64,
    pub unit_name: String,
    pub unit_course_id: i64,
    pub course_id: i64,
    pub course_name: String,
    pub class_id: i64,
    pub class_name: String,
    pub discipline_id: i64,
    pub discipline_name: String,
    pub room_name: String,
    pub students_number: i64,
    pub sequence: i64,
    pub begin_time_name: String,
    pub end_time_name: String,
    pub year_id: i64,
    pub term_id: i64,
}

/// One scheduled class occurrence.
///
/// # Examples
///
/// ```
/// use class_collisions::core::domain::{DayId, RoomId, SessionRecord, SlotInterval, TeacherId};
///
/// let record = SessionRecord::new(
///     1,
///     TeacherId(7),
///     RoomId(101),
///     DayId(2),
///     SlotInterval::new(0, 4).unwrap(),
/// );
/// assert!(record.annotation.is_neutral());
/// assert_eq!(record.slots.duration_minutes(), 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: SessionId,
    pub teacher: TeacherId,
    pub room: RoomId,
    pub day: DayId,
    pub slots: SlotInterval,
    pub details: SessionDetails,
    pub annotation: CollisionAnnotation,
}

impl SessionRecord {
    /// Builds a record with empty details and a neutral annotation.
    pub fn new(id: i64, teacher: TeacherId, room: RoomId, day: DayId, slots: SlotInterval) -> Self {
        Self {
            id: SessionId(id),
            teacher,
            room,
            day,
            slots,
            details: SessionDetails::default(),
            annotation: CollisionAnnotation::default(),
        }
    }

    pub fn with_details(mut self, details: SessionDetails) -> Self {
        self.details = details;
        self
    }

    /// Resets the collision fields to `NONE / NONE / 0`.
    pub fn clear_annotation(&mut self) {
        self.annotation = CollisionAnnotation::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_interval_rejects_empty_and_inverted() {
        assert!(SlotInterval::new(3, 3).is_err());
        assert!(SlotInterval::new(5, 2).is_err());
        assert!(SlotInterval::new(2, 5).is_ok());
    }

    #[test]
    fn test_slot_interval_rejects_end_past_max_slot() {
        assert!(SlotInterval::new(0, MAX_SLOT).is_ok());
        assert!(SlotInterval::new(0, MAX_SLOT + 1).is_err());
        assert!(!SlotInterval { begin: 0, end: 300_000_000 }.is_well_formed());

        let widest = SlotInterval::new(0, MAX_SLOT).unwrap();
        assert_eq!(widest.overlap_minutes(&widest), MAX_SLOT * SLOT_MINUTES);
    }

    #[test]
    fn test_touching_intervals_share_no_minutes() {
        let a = SlotInterval::new(0, 2).unwrap();
        let b = SlotInterval::new(2, 4).unwrap();
        assert!(!a.overlaps(&b));
        assert_eq!(a.overlap_minutes(&b), 0);
    }

    #[test]
    fn test_type_codes_parse_canonical_and_legacy() {
        for kind in CollisionType::ALL {
            assert_eq!(kind.code().parse::<CollisionType>().unwrap(), kind);
        }
        assert_eq!("--PRF--".parse::<CollisionType>().unwrap(), CollisionType::Teacher);
        assert_eq!("--SAL--".parse::<CollisionType>().unwrap(), CollisionType::Room);
        assert_eq!(
            "PRF-SAL".parse::<CollisionType>().unwrap(),
            CollisionType::TeacherAndRoom
        );
        assert_eq!("".parse::<CollisionType>().unwrap(), CollisionType::None);
        assert!("BOTH".parse::<CollisionType>().is_err());
    }

    #[test]
    fn test_level_codes_parse_canonical_and_legacy() {
        for level in CollisionLevel::ALL {
            assert_eq!(level.code().parse::<CollisionLevel>().unwrap(), level);
        }
        assert_eq!("PARCIAL".parse::<CollisionLevel>().unwrap(), CollisionLevel::Partial);
        assert_eq!("TOTAL--".parse::<CollisionLevel>().unwrap(), CollisionLevel::Total);
        assert_eq!("OK-----".parse::<CollisionLevel>().unwrap(), CollisionLevel::None);
    }

    #[test]
    fn test_codes_serialize_as_canonical_strings() {
        let json = serde_json::to_string(&CollisionType::TeacherAndRoom).unwrap();
        assert_eq!(json, "\"TEACHER-AND-ROOM\"");
        let json = serde_json::to_string(&CollisionLevel::Partial).unwrap();
        assert_eq!(json, "\"PARTIAL\"");
    }

    #[test]
    fn test_clear_annotation() {
        let mut record = SessionRecord::new(
            1,
            TeacherId(1),
            RoomId(1),
            DayId(1),
            SlotInterval::new(0, 1).unwrap(),
        );
        record.annotation = CollisionAnnotation {
            collision_type: CollisionType::Room,
            level: CollisionLevel::Total,
            size_minutes: 15,
        };
        assert!(!record.annotation.is_neutral());
        record.clear_annotation();
        assert!(record.annotation.is_neutral());
    }
}
