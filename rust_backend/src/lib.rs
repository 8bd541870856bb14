//! Class-schedule collision detection.
//!
//! Reads a timetable of class sessions, finds every pair of sessions that
//! share a teacher or a room on the same day with overlapping slot intervals,
//! classifies each collision and writes the annotated timetable back out.

pub mod algorithms;
pub mod config;
pub mod core;
pub mod error;
pub mod parsing;
pub mod preprocessing;
pub mod services;

pub use crate::algorithms::{Collision, CollisionDetector, CollisionPolicy};
pub use crate::config::{DetectorConfig, ReportFormat};
pub use crate::core::domain::{
    CollisionAnnotation, CollisionLevel, CollisionType, SessionRecord, SlotInterval,
};
pub use crate::error::{ScheduleError, ScheduleResult};
pub use crate::preprocessing::{derive_output_path, CollisionPipeline, PipelineOutcome};
pub use crate::services::{render_report, CollisionSummary};
