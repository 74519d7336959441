//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources:
//! - Logger
//! - HTTP client for the CMS
//!
//! The database pool lives in `storage::pool`.

mod client;
mod logger;

pub use client::init_client;
pub use logger::init_logger_with;
