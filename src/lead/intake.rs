//! Inbound payload decoding.
//!
//! Intake surfaces post one of two JSON shapes. Which decoder runs is decided
//! by the configured [`IntakeFormat`], never by probing keys.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::config::{IntakeFormat, FIELD_DEALERSHIP, FIELD_SOURCE};
use crate::error_handling::LeadError;

/// Form field name to value. Absent keys read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(HashMap<String, String>);

impl FormFields {
    /// Value of `key`, or `""` when the form did not send it.
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }

    /// Value of `key` with surrounding whitespace removed, `None` when absent or blank.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        let value = self.get(key).trim();
        (!value.is_empty()).then_some(value)
    }

    /// Entries whose key starts with `prefix`, with the prefix removed.
    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.0.iter().filter_map(move |(key, value)| {
            key.strip_prefix(prefix)
                .filter(|rest| !rest.is_empty())
                .map(|rest| (rest, value.as_str()))
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        FormFields(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A decoded form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundPayload {
    /// `{"Source": "...", "Dealership": "...", ...}`
    Flat(FormFields),
    /// `{"source": "...", "fields": {"Dealership": "...", ...}}`
    Wrapped { source: String, fields: FormFields },
}

impl InboundPayload {
    /// Decodes a request body with the decoder for `format`.
    ///
    /// # Errors
    ///
    /// `LeadError::Validation` when the body is not a JSON object of the
    /// expected shape, or when the source or dealership is missing or blank.
    pub fn decode(format: IntakeFormat, body: &[u8]) -> Result<Self, LeadError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| LeadError::Validation(format!("body is not valid JSON: {e}")))?;
        let Value::Object(object) = value else {
            return Err(LeadError::Validation(
                "body must be a JSON object".to_string(),
            ));
        };

        let payload = match format {
            IntakeFormat::Flat => InboundPayload::Flat(fields_from_object(object)?),
            IntakeFormat::Wrapped => decode_wrapped(object)?,
        };

        if payload.source().trim().is_empty() {
            return Err(LeadError::Validation(format!(
                "{} is required",
                payload.source_key()
            )));
        }
        if payload.dealership().trim().is_empty() {
            return Err(LeadError::Validation(format!(
                "{FIELD_DEALERSHIP} is required"
            )));
        }

        Ok(payload)
    }

    /// Source code the intake surface identified itself with.
    pub fn source(&self) -> &str {
        match self {
            InboundPayload::Flat(fields) => fields.get(FIELD_SOURCE),
            InboundPayload::Wrapped { source, .. } => source,
        }
    }

    pub fn dealership(&self) -> &str {
        self.fields().get(FIELD_DEALERSHIP)
    }

    pub fn fields(&self) -> &FormFields {
        match self {
            InboundPayload::Flat(fields) => fields,
            InboundPayload::Wrapped { fields, .. } => fields,
        }
    }

    fn source_key(&self) -> &'static str {
        match self {
            InboundPayload::Flat(_) => FIELD_SOURCE,
            InboundPayload::Wrapped { .. } => "source",
        }
    }
}

fn decode_wrapped(mut object: Map<String, Value>) -> Result<InboundPayload, LeadError> {
    let source = match object.remove("source") {
        None | Some(Value::Null) => String::new(),
        Some(value) => scalar_to_string("source", value)?,
    };
    let fields = match object.remove("fields") {
        Some(Value::Object(fields)) => fields_from_object(fields)?,
        Some(Value::Null) | None => {
            return Err(LeadError::Validation("fields object is required".to_string()))
        }
        Some(_) => {
            return Err(LeadError::Validation(
                "fields must be a JSON object".to_string(),
            ))
        }
    };
    Ok(InboundPayload::Wrapped { source, fields })
}

fn fields_from_object(object: Map<String, Value>) -> Result<FormFields, LeadError> {
    let mut fields = HashMap::with_capacity(object.len());
    for (key, value) in object {
        let value = scalar_to_string(&key, value)?;
        fields.insert(key, value);
    }
    Ok(FormFields(fields))
}

fn scalar_to_string(key: &str, value: Value) -> Result<String, LeadError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Array(_) | Value::Object(_) => Err(LeadError::Validation(format!(
            "field '{key}' must be a string, number or boolean"
        ))),
    }
}
