//! CMS-facing lead schema.
//!
//! Field names follow the CMS's documented lead envelope, which is why the
//! serde renames are not uniform (`TradeIns` and the trade-in fields are
//! PascalCase on the wire).

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Top-level body posted to the CMS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadEnvelope {
    pub lead: Lead,
}

/// A lead as the CMS expects it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Lead {
    pub dealer_ref: String,
    pub dealer_floor: String,
    pub dealer_sales_person: String,
    pub region: String,
    pub source: String,
    #[serde(rename = "transactionID")]
    pub transaction_id: String,
    pub ext_lead_ref: String,
    pub promotional_code: String,
    pub utm_parameters: String,
    pub country_code: String,
    pub contact: Contact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seeks: Option<Seeks>,
    pub referrer: BTreeMap<String, String>,
    pub options: BTreeMap<String, String>,
    #[serde(rename = "TradeIns", skip_serializing_if = "Option::is_none")]
    pub trade_ins: Option<Vec<TradeIn>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment: Option<Appointment>,
}

/// The person who submitted the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub title: String,
    pub first_name: String,
    pub surname: String,
    pub email: String,
    pub office_phone: String,
    pub cell_phone: String,
    pub drivers_license: String,
    pub income_bracket: String,
    pub preferred_contact_method: String,
    pub preferred_contact_time: String,
    pub citizenship: String,
    pub id_no: String,
    pub birth_date: String,
    pub gender: String,
    pub ethnicity: String,
    pub home_language: String,
    pub residential_address_line1: String,
    pub residential_address_line2: String,
    pub residential_address_suburb: String,
    pub residential_address_city: String,
    pub residential_address_postal_code: String,
    pub residential_address_province: String,
    pub postal_address_line1: String,
    pub postal_address_line2: String,
    pub postal_address_suburb: String,
    pub postal_address_city: String,
    pub postal_address_code: String,
    pub postal_address_province: String,
    pub marketing_consent: String,
    pub credit_grading: String,
    pub company_name: String,
    pub company_type: String,
}

/// Vehicle the contact is interested in. Values are passed through as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Seeks {
    pub used: String,
    pub brand: String,
    pub model: String,
    pub mm_code: String,
    pub model_code: String,
    pub kms: String,
    pub year: String,
    pub colour: String,
    pub stock_nr: String,
    pub price: String,
    pub deposit: String,
    pub test_drive: String,
    pub trade_in: String,
    pub finance: String,
    pub valuation: String,
    pub registration: String,
    pub special: String,
    #[serde(rename = "specialBannerURL")]
    pub special_banner_url: String,
    pub service_history: String,
    pub comments: String,
    pub vin: String,
}

/// Vehicle offered in part exchange.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TradeIn {
    pub make: String,
    pub model: String,
    pub variant: String,
    pub year: i32,
    pub mileage: i64,
    #[serde(rename = "MMCode")]
    pub mm_code: Option<i64>,
    pub is_financed: bool,
    pub price: f64,
}

/// Requested appointment, as a local `YYYY-MM-DD HH:MM:SS` timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub date_time: String,
}

/// Body the CMS answers with.
///
/// Every field is optional on the wire and `null` reads as empty; only a body
/// that is not a JSON object is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CmsResponse {
    #[serde(deserialize_with = "string_or_number")]
    pub code: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub lead_reference: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub status: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub message: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// The CMS has been seen sending `code` both as "200" and as 200.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number for code, got {other}"
        ))),
    }
}
