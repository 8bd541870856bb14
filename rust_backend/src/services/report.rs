//! Human-readable collision report and serializable summary.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::algorithms::collector::Collision;
use crate::core::domain::{CollisionLevel, CollisionType, SessionRecord};

/// Aggregate view of one detection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionSummary {
    pub total_records: usize,
    pub total_collisions: usize,
    /// Sessions left with a non-neutral annotation.
    pub annotated_records: usize,
    pub by_type: BTreeMap<String, usize>,
    pub by_level: BTreeMap<String, usize>,
    pub total_overlap_minutes: u64,
}

impl CollisionSummary {
    pub fn from_run(records: &[SessionRecord], collisions: &[Collision]) -> Self {
        let mut by_type: BTreeMap<String, usize> = CollisionType::ALL
            .iter()
            .filter(|kind| **kind != CollisionType::None)
            .map(|kind| (kind.code().to_string(), 0))
            .collect();
        let mut by_level: BTreeMap<String, usize> = CollisionLevel::ALL
            .iter()
            .filter(|level| **level != CollisionLevel::None)
            .map(|level| (level.code().to_string(), 0))
            .collect();

        let mut total_overlap_minutes = 0u64;
        for collision in collisions {
            *by_type
                .entry(collision.collision_type().code().to_string())
                .or_insert(0) += 1;
            *by_level.entry(collision.level().code().to_string()).or_insert(0) += 1;
            total_overlap_minutes += u64::from(collision.size_minutes());
        }

        Self {
            total_records: records.len(),
            total_collisions: collisions.len(),
            annotated_records: records.iter().filter(|r| !r.annotation.is_neutral()).count(),
            by_type,
            by_level,
            total_overlap_minutes,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Renders every collision as a numbered block of lines.
///
/// Session 1 is the session whose arrival raised the collision and Session 2
/// is the earlier session it collided with.
///
/// ```text
/// Collisions found: 1
/// Collision 1:
///   Session 1: Databases - Ada (08:30:00 09:30:00)
///   Session 2: Algorithms - Ada (08:00:00 09:00:00)
///   Type: TEACHER, Level: PARTIAL, Size: 30 minutes
/// ```
pub fn render_report(records: &[SessionRecord], collisions: &[Collision]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Collisions found: {}", collisions.len());

    for (n, collision) in collisions.iter().enumerate() {
        let _ = writeln!(out, "Collision {}:", n + 1);
        let _ = writeln!(out, "  Session 1: {}", describe(&records[collision.second]));
        let _ = writeln!(out, "  Session 2: {}", describe(&records[collision.first]));
        let _ = writeln!(
            out,
            "  Type: {}, Level: {}, Size: {} minutes",
            collision.collision_type(),
            collision.level(),
            collision.size_minutes()
        );
        out.push('\n');
    }

    out
}

fn describe(record: &SessionRecord) -> String {
    let details = &record.details;
    format!(
        "{} - {} ({} {})",
        details.discipline_name,
        details.teacher_name,
        details.begin_time_name,
        details.end_time_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::detector::CollisionDetector;
    use crate::core::domain::{DayId, RoomId, SessionDetails, SlotInterval, TeacherId};

    fn named(
        id: i64,
        teacher: i64,
        room: i64,
        begin: u32,
        end: u32,
        discipline: &str,
    ) -> SessionRecord {
        SessionRecord::new(
            id,
            TeacherId(teacher),
            RoomId(room),
            DayId(1),
            SlotInterval::new(begin, end).unwrap(),
        )
        .with_details(SessionDetails {
            teacher_name: format!("Teacher {}", teacher),
            discipline_name: discipline.to_string(),
            begin_time_name: format!("slot {}", begin),
            end_time_name: format!("slot {}", end),
            ..SessionDetails::default()
        })
    }

    #[test]
    fn test_render_report() {
        let mut records = vec![
            named(1, 1, 1, 0, 4, "Algorithms"),
            named(2, 1, 2, 2, 6, "Databases"),
        ];
        let collisions = CollisionDetector::default().detect_and_annotate(&mut records);
        let report = render_report(&records, &collisions);

        let expected = "Collisions found: 1\n\
                        Collision 1:\n\
                        \x20 Session 1: Databases - Teacher 1 (slot 2 slot 6)\n\
                        \x20 Session 2: Algorithms - Teacher 1 (slot 0 slot 4)\n\
                        \x20 Type: TEACHER, Level: PARTIAL, Size: 30 minutes\n\n";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_render_empty_report() {
        assert_eq!(render_report(&[], &[]), "Collisions found: 0\n");
    }

    #[test]
    fn test_summary_counts() {
        let mut records = vec![
            named(1, 1, 1, 0, 4, "A"),
            named(2, 1, 1, 0, 4, "B"),
            named(3, 2, 1, 3, 5, "C"),
            named(4, 9, 9, 0, 4, "D"),
        ];
        let collisions = CollisionDetector::default().detect_and_annotate(&mut records);
        let summary = CollisionSummary::from_run(&records, &collisions);

        // (1,2) teacher+room total, (1,3) room partial, (2,3) room partial
        assert_eq!(summary.total_records, 4);
        assert_eq!(summary.total_collisions, 3);
        assert_eq!(summary.annotated_records, 3);
        assert_eq!(summary.by_type["TEACHER-AND-ROOM"], 1);
        assert_eq!(summary.by_type["ROOM"], 2);
        assert_eq!(summary.by_type["TEACHER"], 0);
        assert_eq!(summary.by_level["TOTAL"], 1);
        assert_eq!(summary.by_level["PARTIAL"], 2);
        assert_eq!(summary.total_overlap_minutes, 60 + 15 + 15);

        let json = summary.to_json().unwrap();
        let parsed: CollisionSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, summary);
    }
}
