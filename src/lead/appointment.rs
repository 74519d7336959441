//! Appointment date/time normalization.
//!
//! Forms send a `DD.MM.YYYY` date and a free-text `start - end` time range.
//! Only the start of the range is kept. The result is a naive local timestamp;
//! no timezone conversion happens here.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::config::{
    APPOINTMENT_DATE_FORMAT, APPOINTMENT_OUTPUT_FORMAT, APPOINTMENT_RANGE_DELIMITER,
    FIELD_APPOINTMENT_DATE, FIELD_APPOINTMENT_TIME,
};
use crate::error_handling::AppointmentParseError;
use crate::lead::intake::FormFields;

// Tried in order against the start time with whitespace removed and uppercased
const TIME_FORMATS: &[&str] = &["%I:%M%p", "%H:%M", "%H:%M:%S"];

/// Parses a date and time range into a canonical timestamp string.
///
/// ```
/// use lead_relay::lead::normalize_appointment;
///
/// let ts = normalize_appointment("25.12.2024", "2:00pm - 3:00pm").unwrap();
/// assert_eq!(ts, "2024-12-25 14:00:00");
/// ```
pub fn normalize_appointment(date: &str, time_range: &str) -> Result<String, AppointmentParseError> {
    Ok(parse_appointment(date, time_range)?
        .format(APPOINTMENT_OUTPUT_FORMAT)
        .to_string())
}

/// Reads the appointment fields of a form.
///
/// Returns `Ok(None)` when neither field is present, so the lead carries no
/// appointment. A single field on its own is an error.
pub fn appointment_from_fields(
    fields: &FormFields,
) -> Result<Option<String>, AppointmentParseError> {
    match (
        fields.non_empty(FIELD_APPOINTMENT_DATE),
        fields.non_empty(FIELD_APPOINTMENT_TIME),
    ) {
        (None, None) => Ok(None),
        (Some(_), None) => Err(AppointmentParseError::MissingField(FIELD_APPOINTMENT_TIME)),
        (None, Some(_)) => Err(AppointmentParseError::MissingField(FIELD_APPOINTMENT_DATE)),
        (Some(date), Some(time)) => normalize_appointment(date, time).map(Some),
    }
}

fn parse_appointment(date: &str, time_range: &str) -> Result<NaiveDateTime, AppointmentParseError> {
    let day = NaiveDate::parse_from_str(date.trim(), APPOINTMENT_DATE_FORMAT)
        .map_err(|_| AppointmentParseError::InvalidDate(date.to_string()))?;

    let (start, _end) = time_range
        .split_once(APPOINTMENT_RANGE_DELIMITER)
        .ok_or_else(|| AppointmentParseError::MissingRangeDelimiter(time_range.to_string()))?;

    let mut compact: String = start
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();
    // "2PM" has no minutes, which chrono will not parse
    if !compact.contains(':') {
        if let Some(split) = compact.find(|c: char| !c.is_ascii_digit()) {
            compact.insert_str(split, ":00");
        }
    }
    let time = TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(&compact, format).ok())
        .ok_or_else(|| AppointmentParseError::InvalidTime(start.trim().to_string()))?;

    Ok(day.and_time(time))
}
