//! Application layer: Use cases and services.
//!
//! This module orchestrates the domain scorers with the storage port.

mod assessment;

pub use assessment::AssessmentService;
