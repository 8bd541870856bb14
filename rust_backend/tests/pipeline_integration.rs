//! End-to-end tests for the collision pipeline.
//!
//! These tests write timetable CSVs to a temporary directory, run the full
//! load → validate → detect → annotate → export flow and read the exported
//! file back.

use std::fs;
use std::path::{Path, PathBuf};

use class_collisions::algorithms::CollisionPolicy;
use class_collisions::config::DetectorConfig;
use class_collisions::core::domain::{CollisionLevel, CollisionType, SessionRecord};
use class_collisions::error::ScheduleError;
use class_collisions::parsing::csv_parser::parse_schedule_csv_to_records;
use class_collisions::preprocessing::CollisionPipeline;
use class_collisions::services::{render_report, CollisionSummary};
use tempfile::TempDir;

// ==================== Helper Functions ====================

const HEADER: &str = "id,idSolution,solutionName,solutionInitials,idTeacher,teacherName,idDay,idInstitution,idUnit,unitName,idUnitCourse,idCourse,courseName,idClass,className,idDiscipline,disciplineName,idRoom,roomName,studentsNumber,sequence,idBeginSlot,beginTimeName,idEndSlot,endTimeName,idYear,idTerm,idCollisionType,collisionLevel,collisionSize";

struct Row {
    id: i64,
    teacher: i64,
    room: i64,
    day: i64,
    begin: u32,
    end: u32,
    annotation: (&'static str, &'static str, &'static str),
}

impl Row {
    fn new(id: i64, teacher: i64, room: i64, day: i64, begin: u32, end: u32) -> Self {
        Self {
            id,
            teacher,
            room,
            day,
            begin,
            end,
            annotation: ("", "", ""),
        }
    }

    fn annotated(mut self, kind: &'static str, level: &'static str, size: &'static str) -> Self {
        self.annotation = (kind, level, size);
        self
    }

    fn to_csv(&self) -> String {
        format!(
            "{id},1,Fall,F24,{t},Teacher {t},{day},1,1,Main,1,1,CS,1,Class A,{id},Discipline {id},{room},Room {room},30,1,{b},slot {b},{e},slot {e},2024,1,{ct},{cl},{cs}",
            id = self.id,
            t = self.teacher,
            day = self.day,
            room = self.room,
            b = self.begin,
            e = self.end,
            ct = self.annotation.0,
            cl = self.annotation.1,
            cs = self.annotation.2,
        )
    }
}

fn write_timetable(dir: &Path, name: &str, rows: &[Row]) -> PathBuf {
    let mut content = String::from(HEADER);
    content.push('\n');
    for row in rows {
        content.push_str(&row.to_csv());
        content.push('\n');
    }
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn pipeline(policy: CollisionPolicy) -> CollisionPipeline {
    let mut config = DetectorConfig::default();
    config.detection.policy = policy;
    CollisionPipeline::with_config(config)
}

fn annotation_of(record: &SessionRecord) -> (CollisionType, CollisionLevel, u32) {
    (
        record.annotation.collision_type,
        record.annotation.level,
        record.annotation.size_minutes,
    )
}

// ==================== Scenarios ====================

#[test]
fn test_partial_teacher_collision_is_exported() {
    let dir = TempDir::new().unwrap();
    let input = write_timetable(
        dir.path(),
        "timetable.csv",
        &[Row::new(1, 5, 1, 2, 0, 4), Row::new(2, 5, 2, 2, 2, 6)],
    );

    let outcome = pipeline(CollisionPolicy::Merged).process(&input, None).unwrap();
    assert_eq!(outcome.total_collisions(), 1);

    let output = dir.path().join("timetable_with_collisions.csv");
    let exported = parse_schedule_csv_to_records(&output).unwrap();
    for record in &exported {
        assert_eq!(
            annotation_of(record),
            (CollisionType::Teacher, CollisionLevel::Partial, 30)
        );
    }
    assert_eq!(exported[0].details.discipline_name, "Discipline 1");
    assert_eq!(exported[1].details.room_name, "Room 2");
}

#[test]
fn test_total_teacher_collision() {
    let dir = TempDir::new().unwrap();
    let input = write_timetable(
        dir.path(),
        "total.csv",
        &[Row::new(1, 5, 1, 2, 4, 8), Row::new(2, 5, 2, 2, 4, 8)],
    );

    let outcome = pipeline(CollisionPolicy::Merged).process(&input, None).unwrap();
    assert_eq!(outcome.total_collisions(), 1);
    assert_eq!(
        annotation_of(&outcome.records[1]),
        (CollisionType::Teacher, CollisionLevel::Total, 60)
    );
}

#[test]
fn test_touching_and_cross_day_sessions_do_not_collide() {
    let dir = TempDir::new().unwrap();
    let input = write_timetable(
        dir.path(),
        "touching.csv",
        &[
            Row::new(1, 5, 1, 2, 0, 4),
            Row::new(2, 5, 1, 2, 4, 8),
            Row::new(3, 5, 1, 3, 0, 4),
        ],
    );

    let outcome = pipeline(CollisionPolicy::Merged).process(&input, None).unwrap();
    assert_eq!(outcome.total_collisions(), 0);
    assert!(outcome.records.iter().all(|r| r.annotation.is_neutral()));
}

#[test]
fn test_both_keys_under_each_policy() {
    let dir = TempDir::new().unwrap();
    let rows = [Row::new(1, 5, 9, 2, 0, 4), Row::new(2, 5, 9, 2, 0, 4)];
    let input = write_timetable(dir.path(), "both.csv", &rows);

    let merged = pipeline(CollisionPolicy::Merged).process(&input, None).unwrap();
    let kinds: Vec<_> = merged.collisions.iter().map(|c| c.collision_type()).collect();
    assert_eq!(kinds, vec![CollisionType::TeacherAndRoom]);
    assert_eq!(
        annotation_of(&merged.records[0]),
        (CollisionType::TeacherAndRoom, CollisionLevel::Total, 60)
    );

    let per_key = pipeline(CollisionPolicy::PerKey).process(&input, None).unwrap();
    let kinds: Vec<_> = per_key.collisions.iter().map(|c| c.collision_type()).collect();
    assert_eq!(kinds, vec![CollisionType::Teacher, CollisionType::Room]);
    // The room collision is recorded last and wins the annotation.
    assert_eq!(
        annotation_of(&per_key.records[0]),
        (CollisionType::Room, CollisionLevel::Total, 60)
    );
}

#[test]
fn test_last_collision_wins_annotation() {
    let dir = TempDir::new().unwrap();
    let input = write_timetable(
        dir.path(),
        "chain.csv",
        &[
            Row::new(1, 5, 1, 2, 0, 4),
            Row::new(2, 5, 2, 2, 2, 6),
            Row::new(3, 5, 3, 2, 3, 8),
        ],
    );

    let outcome = pipeline(CollisionPolicy::Merged).process(&input, None).unwrap();
    let pairs: Vec<_> = outcome.collisions.iter().map(|c| (c.first, c.second)).collect();
    assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);

    assert_eq!(
        annotation_of(&outcome.records[0]),
        (CollisionType::Teacher, CollisionLevel::Partial, 15)
    );
    assert_eq!(
        annotation_of(&outcome.records[1]),
        (CollisionType::Teacher, CollisionLevel::Partial, 45)
    );
    assert_eq!(
        annotation_of(&outcome.records[2]),
        (CollisionType::Teacher, CollisionLevel::Partial, 45)
    );
}

#[test]
fn test_stale_legacy_annotations_are_recomputed() {
    let dir = TempDir::new().unwrap();
    let input = write_timetable(
        dir.path(),
        "stale.csv",
        &[
            Row::new(1, 5, 1, 2, 0, 4).annotated("--PRF--", "TOTAL--", "60"),
            Row::new(2, 6, 2, 2, 0, 4).annotated("PRF-SAL", "PARCIAL", "15"),
        ],
    );

    let outcome = pipeline(CollisionPolicy::Merged).process(&input, None).unwrap();
    assert_eq!(outcome.validation.stats.stale_annotations, 2);
    assert!(outcome.validation.is_valid);
    assert_eq!(outcome.total_collisions(), 0);

    let exported = parse_schedule_csv_to_records(outcome.output_path.as_deref().unwrap()).unwrap();
    assert!(exported.iter().all(|r| r.annotation.is_neutral()));
}

#[test]
fn test_malformed_session_aborts_without_output() {
    let dir = TempDir::new().unwrap();
    let input = write_timetable(
        dir.path(),
        "broken.csv",
        &[Row::new(1, 5, 1, 2, 0, 4), Row::new(2, 5, 1, 2, 6, 3)],
    );

    let err = pipeline(CollisionPolicy::Merged).process(&input, None).err().unwrap();
    assert!(matches!(
        err.downcast_ref::<ScheduleError>(),
        Some(ScheduleError::MalformedRecord { id: 2, row: 1, .. })
    ));
    assert!(!dir.path().join("broken_with_collisions.csv").exists());
}

#[test]
fn test_report_and_summary_from_outcome() {
    let dir = TempDir::new().unwrap();
    let input = write_timetable(
        dir.path(),
        "report.csv",
        &[Row::new(1, 5, 1, 2, 0, 4), Row::new(2, 6, 1, 2, 2, 6)],
    );
    let output = dir.path().join("checked.csv");

    let outcome = pipeline(CollisionPolicy::Merged)
        .process(&input, Some(&output))
        .unwrap();
    assert!(output.exists());

    let report = render_report(&outcome.records, &outcome.collisions);
    assert!(report.starts_with("Collisions found: 1\n"));
    assert!(report.contains("Session 1: Discipline 2 - Teacher 6 (slot 2 slot 6)"));
    assert!(report.contains("Session 2: Discipline 1 - Teacher 5 (slot 0 slot 4)"));
    assert!(report.contains("Type: ROOM, Level: PARTIAL, Size: 30 minutes"));

    let summary = CollisionSummary::from_run(&outcome.records, &outcome.collisions);
    assert_eq!(summary.total_records, 2);
    assert_eq!(summary.annotated_records, 2);
    assert_eq!(summary.by_type["ROOM"], 1);
    assert_eq!(summary.total_overlap_minutes, 30);
}
