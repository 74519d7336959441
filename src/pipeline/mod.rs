//! Lead processing pipeline.
//!
//! decode → resolve dealer → normalize appointment → contact lookup → map →
//! forward → decode CMS response → audit.
//!
//! Every step before the forward fails fast without side effects. Once the
//! lead has left the service an audit row is attempted whatever happens next,
//! and a failed audit write is logged and counted but never returned.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::{IntakeProfile, FIELD_EMAIL};
use crate::error_handling::{LeadError, OutcomeType, ProcessingStats};
use crate::forward::{decode_response, CmsForwarder};
use crate::lead::{
    appointment_from_fields, map_lead, resolve_dealer, InboundPayload, LeadEnvelope,
    MappingContext,
};
use crate::storage::{
    find_directory_contact, insert_lead_audit, AuditOutcome, DealerRoute, NewLeadAudit,
};

/// Shared resources for processing leads. Cheap to clone.
#[derive(Clone)]
pub struct PipelineContext {
    pub pool: Arc<SqlitePool>,
    pub forwarder: CmsForwarder,
    pub profile: IntakeProfile,
    pub stats: Arc<ProcessingStats>,
}

/// Result of a lead the CMS answered for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadOutcome {
    /// CMS HTTP status, passed through to the caller
    pub status: u16,
    /// Raw CMS response body
    pub body: Vec<u8>,
    /// Empty when the CMS returned no reference
    pub lead_reference: String,
}

/// Processes one inbound request body end to end.
///
/// # Errors
///
/// Returns the `LeadError` that ended processing. Audit write failures are
/// never returned.
pub async fn process_lead(ctx: &PipelineContext, body: &[u8]) -> Result<LeadOutcome, LeadError> {
    let result = run_pipeline(ctx, body).await;

    match &result {
        Ok(outcome) => {
            ctx.stats.increment(OutcomeType::Forwarded);
            log::info!(
                "Lead forwarded: CMS status {}, reference '{}'",
                outcome.status,
                outcome.lead_reference
            );
        }
        Err(e) => {
            ctx.stats.increment(e.outcome());
            if e.is_client_error() {
                log::warn!("Lead rejected ({}): {}", e.kind(), e);
            } else {
                log::error!("Lead failed ({}): {}", e.kind(), e);
            }
        }
    }

    result
}

async fn run_pipeline(ctx: &PipelineContext, body: &[u8]) -> Result<LeadOutcome, LeadError> {
    let payload = InboundPayload::decode(ctx.profile.format, body)?;
    let route = resolve_dealer(&ctx.pool, payload.source(), payload.dealership()).await?;
    log::debug!(
        "Resolved ({}, {}) to dealer {}",
        route.source,
        route.dealership,
        route.dealer_code
    );

    let appointment = appointment_from_fields(payload.fields())?;
    let contact_method = preferred_contact_method(ctx, &route, &payload).await;

    let lead = map_lead(
        &payload,
        MappingContext {
            route: &route,
            profile: &ctx.profile,
            appointment: appointment.as_deref(),
            preferred_contact_method: contact_method.as_deref(),
        },
    )?;
    let lead_payload = serde_json::to_vec(&LeadEnvelope { lead })
        .map_err(|e| LeadError::Validation(format!("lead could not be serialized: {e}")))?;

    // Kept for the audit row; the forward consumes its own copy
    let input_text = String::from_utf8_lossy(body);
    let lead_text = String::from_utf8_lossy(&lead_payload).into_owned();

    let response = match ctx.forwarder.forward(lead_payload).await {
        Ok(response) => response,
        Err(e) => {
            record_audit(
                ctx,
                NewLeadAudit {
                    input_payload: &input_text,
                    lead_payload: &lead_text,
                    response_status: None,
                    response_payload: None,
                    lead_reference: "",
                    outcome: AuditOutcome::ForwardFailed,
                },
            )
            .await;
            return Err(e.into());
        }
    };

    let decoded = match decode_response(&response.body) {
        Ok(decoded) => decoded,
        Err(e) => {
            record_audit(
                ctx,
                NewLeadAudit {
                    input_payload: &input_text,
                    lead_payload: &lead_text,
                    response_status: Some(response.status),
                    response_payload: Some(&response.body),
                    lead_reference: "",
                    outcome: AuditOutcome::ResponseDecodeFailed,
                },
            )
            .await;
            return Err(LeadError::ResponseDecode(e));
        }
    };

    record_audit(
        ctx,
        NewLeadAudit {
            input_payload: &input_text,
            lead_payload: &lead_text,
            response_status: Some(response.status),
            response_payload: Some(&response.body),
            lead_reference: &decoded.lead_reference,
            outcome: AuditOutcome::Forwarded,
        },
    )
    .await;

    Ok(LeadOutcome {
        status: response.status,
        body: response.body,
        lead_reference: decoded.lead_reference,
    })
}

/// Preferred contact method from the contact directory, if it knows the sender.
///
/// A directory read failure is logged and treated as "unknown".
async fn preferred_contact_method(
    ctx: &PipelineContext,
    route: &DealerRoute,
    payload: &InboundPayload,
) -> Option<String> {
    let email = payload.fields().non_empty(FIELD_EMAIL)?;
    match find_directory_contact(&ctx.pool, route.id, email).await {
        Ok(contact) => contact.map(|c| c.preferred_contact_method),
        Err(e) => {
            log::warn!(
                "Contact directory lookup failed for dealer {}: {}",
                route.dealer_code,
                e
            );
            None
        }
    }
}

async fn record_audit(ctx: &PipelineContext, audit: NewLeadAudit<'_>) {
    match insert_lead_audit(&ctx.pool, &audit).await {
        Ok(id) => log::debug!("Audit row {} written ({})", id, audit.outcome.as_str()),
        Err(e) => {
            ctx.stats.increment(OutcomeType::AuditWriteFailed);
            log::warn!(
                "Failed to write {} audit row for reference '{}': {}",
                audit.outcome.as_str(),
                audit.lead_reference,
                e
            );
        }
    }
}
