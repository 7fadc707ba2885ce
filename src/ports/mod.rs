//! Ports layer: Trait definitions for external operations.
//!
//! The scorers are pure; the only outward boundary is persistence of
//! finished assessments, owned by an external collaborator.

mod storage;

pub use storage::{AssessmentStore, RecordPage};
