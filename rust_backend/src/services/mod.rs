//! Reporting services built on top of a detection run.

pub mod report;

pub use report::{render_report, CollisionSummary};
