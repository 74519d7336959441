//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions for startup, persistence and lead processing
//! - Outcome counters shared by the request handlers

mod stats;
mod types;

pub use stats::ProcessingStats;
pub use types::{
    AppointmentParseError, AuditWriteFailure, DatabaseError, ForwardError, InitializationError,
    LeadError, OutcomeType,
};
