//! Single-pass collision detection over both resource indexes.

use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::algorithms::classifier::{classify, classify_as};
use crate::algorithms::collector::{Collision, CollisionCollector};
use crate::algorithms::conflict_index::{ConflictIndex, IndexStrategy};
use crate::core::domain::SessionRecord;

/// How a pair that double-books both the teacher and the room is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// One `TEACHER-AND-ROOM` collision per pair.
    #[default]
    Merged,
    /// One collision per index: `TEACHER` then `ROOM`.
    PerKey,
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionPolicy::Merged => f.write_str("merged"),
            CollisionPolicy::PerKey => f.write_str("per-key"),
        }
    }
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "merged" => Ok(CollisionPolicy::Merged),
            "per-key" | "per_key" => Ok(CollisionPolicy::PerKey),
            other => Err(format!(
                "unknown collision policy '{}' (expected 'merged' or 'per-key')",
                other
            )),
        }
    }
}

/// Runs the teacher and room indexes over a schedule.
///
/// Records are scanned once in input order. Each record is probed against the
/// teacher index and then the room index, and inserted into both afterwards.
///
/// # Examples
///
/// ```
/// use class_collisions::algorithms::detector::{CollisionDetector, CollisionPolicy};
/// use class_collisions::core::domain::{
///     CollisionType, DayId, RoomId, SessionRecord, SlotInterval, TeacherId,
/// };
///
/// let mut records = vec![
///     SessionRecord::new(1, TeacherId(1), RoomId(1), DayId(1), SlotInterval::new(0, 4).unwrap()),
///     SessionRecord::new(2, TeacherId(1), RoomId(1), DayId(1), SlotInterval::new(2, 6).unwrap()),
/// ];
///
/// let collisions = CollisionDetector::new(CollisionPolicy::Merged).detect_and_annotate(&mut records);
/// assert_eq!(collisions.len(), 1);
/// assert_eq!(records[0].annotation.collision_type, CollisionType::TeacherAndRoom);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionDetector {
    policy: CollisionPolicy,
}

impl CollisionDetector {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    /// Detects every collision without touching the records.
    pub fn detect(&self, records: &[SessionRecord]) -> CollisionCollector {
        let mut teachers = ConflictIndex::new(IndexStrategy::ByTeacher);
        let mut rooms = ConflictIndex::new(IndexStrategy::ByRoom);
        let mut collector = CollisionCollector::new();

        for current in 0..records.len() {
            for earlier in teachers.probe_and_insert(records, current) {
                collector.push(self.collision(records, IndexStrategy::ByTeacher, earlier, current));
            }

            for earlier in rooms.probe_and_insert(records, current) {
                // Already reported by the teacher index as TEACHER-AND-ROOM.
                if self.policy == CollisionPolicy::Merged
                    && IndexStrategy::ByTeacher.collides(&records[earlier], &records[current])
                {
                    continue;
                }
                collector.push(self.collision(records, IndexStrategy::ByRoom, earlier, current));
            }
        }

        info!(
            "Detected {} collision(s) across {} session(s) ({} teacher partitions, {} room partitions, policy {})",
            collector.len(),
            records.len(),
            teachers.bucket_count(),
            rooms.bucket_count(),
            self.policy
        );

        collector
    }

    /// Clears stale annotations, detects, and back-annotates the records.
    pub fn detect_and_annotate(&self, records: &mut [SessionRecord]) -> Vec<Collision> {
        for record in records.iter_mut() {
            record.clear_annotation();
        }

        let collector = self.detect(records);
        collector.annotate(records);
        collector.into_collisions()
    }

    fn collision(
        &self,
        records: &[SessionRecord],
        strategy: IndexStrategy,
        earlier: usize,
        current: usize,
    ) -> Collision {
        let (first, second) = (&records[earlier], &records[current]);
        let annotation = match self.policy {
            CollisionPolicy::Merged => classify(first, second),
            CollisionPolicy::PerKey => classify_as(strategy, first, second),
        };

        debug!(
            "{} index: session {} collides with session {} ({}, {}, {} min)",
            strategy.label(),
            second.id,
            first.id,
            annotation.collision_type,
            annotation.level,
            annotation.size_minutes
        );

        Collision::new(earlier, current, annotation)
    }
}
