//! Error type definitions.
//!
//! This module defines the errors raised while starting the service and while
//! processing a lead, plus the outcome categories counted by `ProcessingStats`.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The CMS credential cannot be carried in an HTTP header.
    #[error("CMS credential header error: {0}")]
    CredentialHeaderError(String),
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),
}

/// Appointment date or time that could not be turned into a timestamp.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppointmentParseError {
    /// Only one of the two appointment fields was supplied.
    #[error("appointment field '{0}' is required when the other appointment field is set")]
    MissingField(&'static str),

    /// The date is not in day.month.year form.
    #[error("appointment date '{0}' is not in DD.MM.YYYY form")]
    InvalidDate(String),

    /// The time range has no `-` between start and end.
    #[error("appointment time '{0}' is not a 'start - end' range")]
    MissingRangeDelimiter(String),

    /// The start of the time range is not a recognisable clock time.
    #[error("appointment start time '{0}' is not a valid time")]
    InvalidTime(String),
}

/// Transport failure while forwarding a lead to the CMS.
#[derive(Error, Debug)]
pub enum ForwardError {
    /// The request could not be sent or the response body could not be read.
    #[error("CMS request failed: {0}")]
    Transport(#[from] ReqwestError),
}

/// The audit row could not be written. Logged, never returned to the caller.
#[derive(Error, Debug)]
#[error("audit write failed: {0}")]
pub struct AuditWriteFailure(#[from] pub sqlx::Error);

/// Failures that end the processing of one lead.
///
/// Everything up to and including mapping fails fast with no side effects.
/// `Forward` and `ResponseDecode` are raised after the lead left the service
/// and are preceded by a best-effort audit write.
#[derive(Error, Debug)]
pub enum LeadError {
    /// The inbound body is not valid JSON or lacks a field required for routing.
    #[error("invalid lead payload: {0}")]
    Validation(String),

    /// No dealer route matches the inbound (source, dealership) pair.
    #[error("dealer not found for source '{source_code}' and dealership '{dealership}'")]
    DealerNotFound {
        source_code: String,
        dealership: String,
    },

    /// The appointment fields are malformed.
    #[error(transparent)]
    AppointmentParse(#[from] AppointmentParseError),

    /// The dealer directory could not be read.
    #[error("dealer directory unavailable: {0}")]
    Directory(#[source] DatabaseError),

    /// The CMS could not be reached.
    #[error(transparent)]
    Forward(#[from] ForwardError),

    /// The CMS answered with something other than a JSON object.
    #[error("CMS response could not be decoded: {0}")]
    ResponseDecode(#[source] serde_json::Error),
}

impl LeadError {
    /// Stable machine-readable name of the failure.
    pub fn kind(&self) -> &'static str {
        match self {
            LeadError::Validation(_) => "validation_error",
            LeadError::DealerNotFound { .. } => "dealer_not_found",
            LeadError::AppointmentParse(_) => "appointment_parse_error",
            LeadError::Directory(_) => "directory_error",
            LeadError::Forward(_) => "forward_error",
            LeadError::ResponseDecode(_) => "response_decode_error",
        }
    }

    /// Whether the caller is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            LeadError::Validation(_)
                | LeadError::DealerNotFound { .. }
                | LeadError::AppointmentParse(_)
        )
    }

    /// Outcome category counted for this failure.
    pub fn outcome(&self) -> OutcomeType {
        match self {
            LeadError::Validation(_) => OutcomeType::RejectedInvalidPayload,
            LeadError::DealerNotFound { .. } => OutcomeType::RejectedNoDealer,
            LeadError::AppointmentParse(_) => OutcomeType::RejectedBadAppointment,
            LeadError::Directory(_) => OutcomeType::DirectoryFailed,
            LeadError::Forward(_) => OutcomeType::ForwardFailed,
            LeadError::ResponseDecode(_) => OutcomeType::ResponseDecodeFailed,
        }
    }
}

/// Terminal outcomes of lead processing, plus audit write failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum OutcomeType {
    Forwarded,
    RejectedInvalidPayload,
    RejectedNoDealer,
    RejectedBadAppointment,
    DirectoryFailed,
    ForwardFailed,
    ResponseDecodeFailed,
    AuditWriteFailed,
}

impl std::fmt::Display for OutcomeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl OutcomeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeType::Forwarded => "forwarded",
            OutcomeType::RejectedInvalidPayload => "rejected_invalid_payload",
            OutcomeType::RejectedNoDealer => "rejected_no_dealer",
            OutcomeType::RejectedBadAppointment => "rejected_bad_appointment",
            OutcomeType::DirectoryFailed => "directory_failed",
            OutcomeType::ForwardFailed => "forward_failed",
            OutcomeType::ResponseDecodeFailed => "response_decode_failed",
            OutcomeType::AuditWriteFailed => "audit_write_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_outcome_names_are_unique() {
        let names: std::collections::HashSet<_> = OutcomeType::iter().map(|o| o.as_str()).collect();
        assert_eq!(names.len(), OutcomeType::iter().count());
    }

    #[test]
    fn test_client_errors() {
        assert!(LeadError::Validation("bad".into()).is_client_error());
        assert!(LeadError::DealerNotFound {
            source_code: "WEB".into(),
            dealership: "ABC Motors".into()
        }
        .is_client_error());
        assert!(
            LeadError::AppointmentParse(AppointmentParseError::InvalidDate("x".into()))
                .is_client_error()
        );
        let decode = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        assert!(!LeadError::ResponseDecode(decode).is_client_error());
    }

    #[test]
    fn test_dealer_not_found_message_names_both_keys() {
        let err = LeadError::DealerNotFound {
            source_code: "WEB".into(),
            dealership: "ABC Motors".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("WEB"));
        assert!(msg.contains("ABC Motors"));
        assert_eq!(err.kind(), "dealer_not_found");
        assert_eq!(err.outcome(), OutcomeType::RejectedNoDealer);
    }

    #[test]
    fn test_appointment_error_is_transparent() {
        let err: LeadError = AppointmentParseError::MissingRangeDelimiter("2pm".into()).into();
        assert_eq!(
            err.to_string(),
            "appointment time '2pm' is not a 'start - end' range"
        );
    }
}
