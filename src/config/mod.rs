//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (defaults, inbound field names)
//! - The validated `Config` object and the enums it is made of

mod constants;
mod types;

pub use constants::*;
pub use types::{
    CmsAuthScheme, Config, ConfigValidationError, IntakeFormat, IntakeProfile, LogFormat,
    LogLevel, RegionField, SourceLabel,
};
