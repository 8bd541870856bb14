use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use crate::algorithms::collector::Collision;
use crate::algorithms::detector::CollisionDetector;
use crate::config::DetectorConfig;
use crate::core::domain::SessionRecord;
use crate::parsing::csv_parser;
use crate::preprocessing::validator::{ScheduleValidator, ValidationResult};

/// Result of one pipeline run
pub struct PipelineOutcome {
    /// Annotated sessions in input order
    pub records: Vec<SessionRecord>,
    pub collisions: Vec<Collision>,
    pub validation: ValidationResult,
    /// Where the annotated CSV was written, if anywhere
    pub output_path: Option<PathBuf>,
}

impl PipelineOutcome {
    pub fn total_records(&self) -> usize {
        self.records.len()
    }

    pub fn total_collisions(&self) -> usize {
        self.collisions.len()
    }
}

/// Load, validate, detect, annotate and export a timetable
pub struct CollisionPipeline {
    config: DetectorConfig,
}

impl CollisionPipeline {
    /// Create a new pipeline with default configuration
    pub fn new() -> Self {
        Self {
            config: DetectorConfig::default(),
        }
    }

    /// Create a pipeline with custom configuration
    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Process a timetable CSV and write the annotated copy
    ///
    /// # Arguments
    /// * `input` - Path to the timetable CSV
    /// * `output` - Destination CSV; derived from `input` and the configured suffix when `None`
    ///
    /// # Returns
    /// PipelineOutcome with annotated records and the collision sequence
    pub fn process(&self, input: &Path, output: Option<&Path>) -> Result<PipelineOutcome> {
        // Step 1: Load
        let records = csv_parser::parse_schedule_csv_to_records(input)
            .with_context(|| format!("Failed to load timetable {}", input.display()))?;
        if records.is_empty() {
            anyhow::bail!("No sessions found in {}", input.display());
        }
        info!("Loaded {} sessions from {}", records.len(), input.display());

        // Step 2-4: Validate, detect, annotate
        let mut outcome = self.process_records(records)?;

        // Step 5: Export
        let output_path = match output {
            Some(path) => path.to_path_buf(),
            None => derive_output_path(input, &self.config.output.suffix),
        };
        csv_parser::write_schedule_csv(&output_path, &outcome.records)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        info!("Wrote annotated timetable to {}", output_path.display());

        outcome.output_path = Some(output_path);
        Ok(outcome)
    }

    /// Run validation and detection on in-memory records, without any I/O
    pub fn process_records(&self, mut records: Vec<SessionRecord>) -> Result<PipelineOutcome> {
        let validation = ScheduleValidator::validate_records(&records);
        ScheduleValidator::ensure_well_formed(&records)
            .context("Timetable contains a malformed session")?;

        let detector = CollisionDetector::new(self.config.detection.policy);
        let collisions = detector.detect_and_annotate(&mut records);

        Ok(PipelineOutcome {
            records,
            collisions,
            validation,
            output_path: None,
        })
    }
}

impl Default for CollisionPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace the final extension of `input` with `suffix` + `.csv`
///
/// `timetable.csv` with `_with_collisions` becomes `timetable_with_collisions.csv`.
pub fn derive_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}.csv", stem, suffix))
}

/// Convenience function to process a timetable with default settings
pub fn detect_schedule_collisions(input: &Path, output: Option<&Path>) -> Result<PipelineOutcome> {
    CollisionPipeline::new().process(input, output)
}
