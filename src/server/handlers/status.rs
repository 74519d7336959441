//! JSON status handler.

use axum::{extract::State, Json};

use super::super::types::{AppState, StatusResponse};

/// Counters of every pipeline outcome since startup
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    let stats = &state.pipeline.stats;
    Json(StatusResponse {
        uptime_seconds: state.start_time.elapsed().as_secs_f64(),
        total_processed: stats.total_processed(),
        outcomes: stats.snapshot(),
    })
}
