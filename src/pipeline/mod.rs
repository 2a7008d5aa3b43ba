//! Pipeline components: worker pool, per-entry validator, run orchestration.

pub mod orchestrator;
pub mod scheduler;
pub mod validator;

pub use orchestrator::{check_playlist, check_url, validate_entries};
pub use scheduler::Completed;
pub use validator::{
    CaptureFailure, Outcome, StreamValidator, ValidatorConfig, classify_capture_failure,
};
