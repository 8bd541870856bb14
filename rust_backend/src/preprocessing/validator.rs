//! Session validation at the ingestion boundary.
//!
//! Detection assumes every slot interval satisfies `begin < end`. This module
//! checks that before records reach the detector, and reports other data
//! quality issues as warnings.

use std::collections::HashSet;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::core::domain::{SessionRecord, SlotInterval, MAX_SLOT};
use crate::error::{ScheduleError, ScheduleResult};

/// Maximum number of individual messages recorded per issue kind.
const MAX_REPORTED: usize = 5;

/// Validation result with categorized issues and statistics.
///
/// Errors make `is_valid` false, while warnings are informational.
///
/// # Examples
///
/// ```
/// use class_collisions::preprocessing::validator::ValidationResult;
///
/// let mut result = ValidationResult::new();
/// assert!(result.is_valid);
///
/// result.add_error("Session 4 ends before it begins".to_string());
/// assert!(!result.is_valid);
/// assert_eq!(result.errors.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stats: ValidationStats,
}

/// Summary statistics computed during validation.
///
/// # Fields
///
/// * `total_records` - Number of sessions validated
/// * `malformed_intervals` - Sessions whose begin slot is not before their end slot
/// * `duplicate_ids` - Sessions reusing an id seen earlier
/// * `stale_annotations` - Sessions already carrying collision fields from a previous run
/// * `distinct_teachers` - Number of distinct teacher ids
/// * `distinct_rooms` - Number of distinct room ids
/// * `distinct_days` - Number of distinct day ids
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationStats {
    pub total_records: usize,
    pub malformed_intervals: usize,
    pub duplicate_ids: usize,
    pub stale_annotations: usize,
    pub distinct_teachers: usize,
    pub distinct_rooms: usize,
    pub distinct_days: usize,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            stats: ValidationStats::default(),
        }
    }

    /// Adds a critical error and marks the result as invalid.
    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    /// Adds a non-critical warning without invalidating the result.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for session records.
///
/// # Examples
///
/// ```
/// use class_collisions::core::domain::{DayId, RoomId, SessionRecord, SlotInterval, TeacherId};
/// use class_collisions::preprocessing::validator::ScheduleValidator;
///
/// let mut record = SessionRecord::new(1, TeacherId(1), RoomId(1), DayId(1), SlotInterval::new(0, 4).unwrap());
/// assert!(ScheduleValidator::validate_records(std::slice::from_ref(&record)).is_valid);
///
/// record.slots.end = 0;
/// let result = ScheduleValidator::validate_records(&[record]);
/// assert!(!result.is_valid);
/// assert_eq!(result.stats.malformed_intervals, 1);
/// ```
pub struct ScheduleValidator;

impl ScheduleValidator {
    /// Validates a batch of session records.
    ///
    /// - Malformed slot intervals (`begin >= end`) are errors
    /// - Duplicate ids and leftover annotations are warnings
    pub fn validate_records(records: &[SessionRecord]) -> ValidationResult {
        let mut result = ValidationResult::new();
        result.stats.total_records = records.len();

        let mut ids = HashSet::new();
        let mut teachers = HashSet::new();
        let mut rooms = HashSet::new();
        let mut days = HashSet::new();

        for (row, record) in records.iter().enumerate() {
            teachers.insert(record.teacher);
            rooms.insert(record.room);
            days.insert(record.day);

            if let Some(reason) = interval_problem(&record.slots) {
                result.stats.malformed_intervals += 1;
                if result.stats.malformed_intervals <= MAX_REPORTED {
                    result.add_error(format!("Session {} (row {}) {}", record.id, row, reason));
                }
            }

            if !ids.insert(record.id) {
                result.stats.duplicate_ids += 1;
                if result.stats.duplicate_ids <= MAX_REPORTED {
                    result.add_warning(format!(
                        "Duplicate session id {} at row {}",
                        record.id, row
                    ));
                }
            }

            if !record.annotation.is_neutral() {
                result.stats.stale_annotations += 1;
            }
        }

        if result.stats.malformed_intervals > MAX_REPORTED {
            result.add_error(format!(
                "Total malformed intervals: {} (showing first {})",
                result.stats.malformed_intervals, MAX_REPORTED
            ));
        }

        if result.stats.duplicate_ids > MAX_REPORTED {
            result.add_warning(format!(
                "Total duplicate ids: {} (showing first {})",
                result.stats.duplicate_ids, MAX_REPORTED
            ));
        }

        if result.stats.stale_annotations > 0 {
            result.add_warning(format!(
                "{} session(s) carry collision fields from a previous run; they will be recomputed",
                result.stats.stale_annotations
            ));
        }

        result.stats.distinct_teachers = teachers.len();
        result.stats.distinct_rooms = rooms.len();
        result.stats.distinct_days = days.len();

        for warning in &result.warnings {
            warn!("{}", warning);
        }

        result
    }

    /// Fails on the first session whose interval is not `begin < end <= MAX_SLOT`.
    pub fn ensure_well_formed(records: &[SessionRecord]) -> ScheduleResult<()> {
        for (row, record) in records.iter().enumerate() {
            if let Some(reason) = interval_problem(&record.slots) {
                return Err(ScheduleError::MalformedRecord { id: record.id.0, row, reason });
            }
        }
        Ok(())
    }
}

fn interval_problem(slots: &SlotInterval) -> Option<String> {
    if slots.begin >= slots.end {
        Some(format!("has begin slot {} not before end slot {}", slots.begin, slots.end))
    } else if slots.end > MAX_SLOT {
        Some(format!("has end slot {} past the last slot {}", slots.end, MAX_SLOT))
    } else {
        None
    }
}
