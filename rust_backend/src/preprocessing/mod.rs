pub mod pipeline;
pub mod validator;

pub use pipeline::{
    derive_output_path, detect_schedule_collisions, CollisionPipeline, PipelineOutcome,
};
pub use validator::{ScheduleValidator, ValidationResult, ValidationStats};
