//! Server data structures.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::pipeline::PipelineContext;

/// Shared state for the lead server
#[derive(Clone)]
pub struct AppState {
    pub pipeline: PipelineContext,
    pub start_time: Arc<Instant>,
}

impl AppState {
    pub fn new(pipeline: PipelineContext) -> Self {
        Self {
            pipeline,
            start_time: Arc::new(Instant::now()),
        }
    }
}

/// JSON response for `/status`
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub uptime_seconds: f64,
    pub total_processed: usize,
    pub outcomes: HashMap<&'static str, usize>,
}

/// JSON body for every failed lead request
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: &'static str,
}
