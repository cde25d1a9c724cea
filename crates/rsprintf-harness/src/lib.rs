//! Verification harness for the rsprintf formatting engine.
//!
//! This crate provides:
//! - Fixture capture: render the built-in case deck through an oracle
//!   (our engine, or the host C library's `snprintf`) and record the
//!   results as JSON reference data
//! - Fixture verify: replay recordings through the engine and compare
//!   destination content, logical length, and count-slot values
//! - Oracle diff: compare engine and host captures case by case
//! - Report generation: human-readable + machine-readable verification
//!   reports
//! - Structured JSONL logging with required-field validation

pub mod capture;
pub mod demo;
pub mod diff;
pub mod error;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod structured_log;

pub use capture::{builtin_deck, capture_deck, CaptureOutcome, Oracle};
pub use error::HarnessError;
pub use fixtures::{ArgSpec, FixtureCase, FixtureSet};
pub use report::VerificationReport;
pub use runner::{CaseOutcome, VerificationSummary, Verifier};
