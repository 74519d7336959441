//! HTTP mapping of lead errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::types::ErrorBody;
use crate::error_handling::LeadError;

/// HTTP status returned to the caller for a failed lead.
pub fn status_for(error: &LeadError) -> StatusCode {
    match error {
        LeadError::Validation(_)
        | LeadError::DealerNotFound { .. }
        | LeadError::AppointmentParse(_) => StatusCode::BAD_REQUEST,
        LeadError::Directory(_) => StatusCode::INTERNAL_SERVER_ERROR,
        LeadError::Forward(_) | LeadError::ResponseDecode(_) => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for LeadError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
            kind: self.kind(),
        };
        (status_for(&self), Json(body)).into_response()
    }
}
