// storage/models.rs
// Database models and types

/// Routing record for one (source, dealership) pair.
///
/// Maps to the `dealer_source_code` table. Rows are provisioned out of band;
/// the service only reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealerRoute {
    pub id: i64,
    pub source: String,
    pub dealership: String,
    pub dealer_code: String,
    pub floor_code_new: String,
    pub floor_code_used: String,
    pub contact_person: String,
    /// Canonical source label; `None` means the `source` column is the label.
    pub source_label: Option<String>,
}

impl DealerRoute {
    /// Source label sent to the CMS when the intake profile asks for the route's label.
    pub fn canonical_source(&self) -> &str {
        self.source_label
            .as_deref()
            .filter(|label| !label.is_empty())
            .unwrap_or(&self.source)
    }
}

/// Contact directory entry, looked up by dealer route and email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryContact {
    pub id: i64,
    pub dealer_source_id: i64,
    pub email: String,
    pub preferred_contact_method: String,
}

/// How far a lead got before its audit row was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditOutcome {
    /// The CMS answered with a decodable JSON object.
    Forwarded,
    /// The CMS could not be reached; there is no response.
    ForwardFailed,
    /// The CMS answered but the body could not be decoded.
    ResponseDecodeFailed,
}

impl AuditOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditOutcome::Forwarded => "forwarded",
            AuditOutcome::ForwardFailed => "forward_failed",
            AuditOutcome::ResponseDecodeFailed => "response_decode_failed",
        }
    }
}

/// Audit row to insert. Borrowed so the pipeline keeps ownership of its buffers.
#[derive(Debug, Clone)]
pub struct NewLeadAudit<'a> {
    /// Raw inbound body as received
    pub input_payload: &'a str,
    /// Serialized lead envelope as forwarded
    pub lead_payload: &'a str,
    pub response_status: Option<u16>,
    /// Raw CMS response body
    pub response_payload: Option<&'a [u8]>,
    /// Empty when the CMS returned no reference
    pub lead_reference: &'a str,
    pub outcome: AuditOutcome,
}

/// Stored audit row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadAuditRecord {
    pub id: i64,
    pub input_payload: String,
    pub lead_payload: String,
    pub response_status: Option<u16>,
    pub response_payload: Option<Vec<u8>>,
    pub lead_reference: String,
    pub outcome: String,
    pub created_at_ms: i64,
}
