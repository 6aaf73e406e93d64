//! Core types: email summaries, tracing setup

pub mod email;
pub mod tracing;

pub use email::{EmailSummary, NO_SUBJECT, UNKNOWN_SENDER};
pub use tracing::{init_tracing, TracingConfig, TracingError, TracingOutputFormat};
