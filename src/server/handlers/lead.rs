//! Lead intake handler.

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::super::types::{AppState, ErrorBody};
use crate::pipeline::process_lead;

/// Accepts one lead and answers with the CMS's status and body.
///
/// The body is taken as raw bytes so malformed JSON reaches the intake
/// decoder and is reported like any other invalid payload. Processing runs in
/// its own task and completes even if the caller goes away.
pub async fn lead_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let ctx = state.pipeline.clone();
    let task = tokio::spawn(async move { process_lead(&ctx, &body).await });

    match task.await {
        Ok(Ok(outcome)) => {
            let status = StatusCode::from_u16(outcome.status).unwrap_or(StatusCode::BAD_GATEWAY);
            (status, [(CONTENT_TYPE, "application/json")], outcome.body).into_response()
        }
        Ok(Err(e)) => e.into_response(),
        Err(join_error) => {
            log::error!("Lead task panicked: {:?}", join_error);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "lead processing aborted".to_string(),
                    kind: "internal_error",
                }),
            )
                .into_response()
        }
    }
}
