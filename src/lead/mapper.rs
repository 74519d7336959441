//! Inbound form fields to CMS lead.
//!
//! Fields outside the mapping below are ignored, not forwarded.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::config::*;
use crate::error_handling::LeadError;
use crate::lead::dealer::{is_used_vehicle, select_floor};
use crate::lead::intake::{FormFields, InboundPayload};
use crate::lead::schema::{Appointment, Contact, Lead, Seeks, TradeIn};
use crate::storage::DealerRoute;

const SEEKS_FIELDS: &[&str] = &[
    FIELD_BRAND,
    FIELD_MODEL,
    FIELD_YEAR,
    FIELD_KMS,
    FIELD_COLOUR,
    FIELD_STOCK_NUMBER,
    FIELD_PRICE,
    FIELD_DEPOSIT,
    FIELD_VIN,
    FIELD_COMMENTS,
    FIELD_FINANCE,
    FIELD_TEST_DRIVE,
    FIELD_MM_CODE,
    FIELD_MODEL_CODE,
    FIELD_HAS_TRADE_IN,
    FIELD_VALUATION,
    FIELD_REGISTRATION,
    FIELD_SPECIAL,
    FIELD_SPECIAL_BANNER_URL,
    FIELD_SERVICE_HISTORY,
];

const TRADE_IN_FIELDS: &[&str] = &[
    FIELD_TRADE_IN_MAKE,
    FIELD_TRADE_IN_MODEL,
    FIELD_TRADE_IN_VARIANT,
    FIELD_TRADE_IN_YEAR,
    FIELD_TRADE_IN_MILEAGE,
    FIELD_TRADE_IN_MM_CODE,
    FIELD_TRADE_IN_FINANCED,
    FIELD_TRADE_IN_PRICE,
];

/// Everything the mapper needs besides the inbound payload.
#[derive(Debug, Clone, Copy)]
pub struct MappingContext<'a> {
    pub route: &'a DealerRoute,
    pub profile: &'a IntakeProfile,
    /// Normalized appointment timestamp, if the form asked for one.
    pub appointment: Option<&'a str>,
    /// Method found in the contact directory; the default applies when `None`.
    pub preferred_contact_method: Option<&'a str>,
}

/// Builds the CMS lead for a resolved payload.
///
/// # Errors
///
/// `LeadError::Validation` when a trade-in numeric field is present but not a number.
pub fn map_lead(payload: &InboundPayload, ctx: MappingContext<'_>) -> Result<Lead, LeadError> {
    let fields = payload.fields();
    let vehicle_category = fields.non_empty(FIELD_VEHICLE_CATEGORY);

    let region = match ctx.profile.region_field {
        RegionField::Dealership => payload.dealership(),
        RegionField::Province => fields.get(FIELD_PROVINCE),
    };
    let source = match ctx.profile.source_label {
        SourceLabel::Inbound => payload.source(),
        SourceLabel::Route => ctx.route.canonical_source(),
    };

    Ok(Lead {
        dealer_ref: ctx.route.dealer_code.clone(),
        dealer_floor: select_floor(ctx.route, vehicle_category).to_string(),
        dealer_sales_person: ctx.route.contact_person.clone(),
        region: region.to_string(),
        source: source.to_string(),
        transaction_id: fields.get(FIELD_TRANSACTION_ID).to_string(),
        ext_lead_ref: fields.get(FIELD_EXT_LEAD_REF).to_string(),
        promotional_code: fields.get(FIELD_PROMOTIONAL_CODE).to_string(),
        utm_parameters: fields.get(FIELD_UTM_PARAMETERS).to_string(),
        country_code: fields.get(FIELD_COUNTRY_CODE).to_string(),
        contact: map_contact(fields, ctx.preferred_contact_method),
        seeks: map_seeks(fields, is_used_vehicle(vehicle_category)),
        referrer: prefixed_map(fields, REFERRER_PREFIX),
        options: prefixed_map(fields, OPTIONS_PREFIX),
        trade_ins: map_trade_in(fields)?.map(|trade_in| vec![trade_in]),
        appointment: ctx.appointment.map(|date_time| Appointment {
            date_time: date_time.to_string(),
        }),
    })
}

/// Cell number for the contact: a long enough alternate number wins.
pub fn contact_phone(fields: &FormFields) -> &str {
    let alternate = fields.get(FIELD_ALTERNATE_PHONE).trim();
    if alternate.len() >= ALTERNATE_PHONE_MIN_LEN {
        alternate
    } else {
        fields.get(FIELD_PHONE)
    }
}

fn map_contact(fields: &FormFields, preferred_contact_method: Option<&str>) -> Contact {
    let method = preferred_contact_method
        .map(str::trim)
        .filter(|method| !method.is_empty())
        .unwrap_or(DEFAULT_PREFERRED_CONTACT_METHOD);

    let text = |key: &str| fields.get(key).to_string();

    Contact {
        title: text(FIELD_TITLE),
        first_name: text(FIELD_FIRST_NAME),
        surname: text(FIELD_SURNAME),
        email: text(FIELD_EMAIL),
        office_phone: text(FIELD_OFFICE_PHONE),
        cell_phone: contact_phone(fields).to_string(),
        drivers_license: text(FIELD_DRIVERS_LICENSE),
        income_bracket: text(FIELD_INCOME_BRACKET),
        preferred_contact_method: method.to_string(),
        preferred_contact_time: text(FIELD_PREFERRED_CONTACT_TIME),
        citizenship: text(FIELD_CITIZENSHIP),
        id_no: text(FIELD_ID_NUMBER),
        birth_date: text(FIELD_BIRTH_DATE),
        gender: text(FIELD_GENDER),
        ethnicity: text(FIELD_ETHNICITY),
        home_language: text(FIELD_HOME_LANGUAGE),
        residential_address_line1: text(FIELD_RESIDENTIAL_LINE1),
        residential_address_line2: text(FIELD_RESIDENTIAL_LINE2),
        residential_address_suburb: text(FIELD_RESIDENTIAL_SUBURB),
        residential_address_city: text(FIELD_RESIDENTIAL_CITY),
        residential_address_postal_code: text(FIELD_RESIDENTIAL_POSTAL_CODE),
        residential_address_province: text(FIELD_RESIDENTIAL_PROVINCE),
        postal_address_line1: text(FIELD_POSTAL_LINE1),
        postal_address_line2: text(FIELD_POSTAL_LINE2),
        postal_address_suburb: text(FIELD_POSTAL_SUBURB),
        postal_address_city: text(FIELD_POSTAL_CITY),
        postal_address_code: text(FIELD_POSTAL_CODE),
        postal_address_province: text(FIELD_POSTAL_PROVINCE),
        marketing_consent: text(FIELD_MARKETING_CONSENT),
        credit_grading: text(FIELD_CREDIT_GRADING),
        company_name: text(FIELD_COMPANY_NAME),
        company_type: text(FIELD_COMPANY_TYPE),
    }
}

fn any_present(fields: &FormFields, keys: &[&str]) -> bool {
    keys.iter().any(|key| fields.non_empty(key).is_some())
}

fn map_seeks(fields: &FormFields, used: bool) -> Option<Seeks> {
    if !any_present(fields, SEEKS_FIELDS) {
        return None;
    }
    let text = |key: &str| fields.get(key).to_string();

    Some(Seeks {
        used: if used { "1" } else { "0" }.to_string(),
        brand: text(FIELD_BRAND),
        model: text(FIELD_MODEL),
        mm_code: text(FIELD_MM_CODE),
        model_code: text(FIELD_MODEL_CODE),
        kms: text(FIELD_KMS),
        year: text(FIELD_YEAR),
        colour: text(FIELD_COLOUR),
        stock_nr: text(FIELD_STOCK_NUMBER),
        price: text(FIELD_PRICE),
        deposit: text(FIELD_DEPOSIT),
        test_drive: text(FIELD_TEST_DRIVE),
        trade_in: text(FIELD_HAS_TRADE_IN),
        finance: text(FIELD_FINANCE),
        valuation: text(FIELD_VALUATION),
        registration: text(FIELD_REGISTRATION),
        special: text(FIELD_SPECIAL),
        special_banner_url: text(FIELD_SPECIAL_BANNER_URL),
        service_history: text(FIELD_SERVICE_HISTORY),
        comments: text(FIELD_COMMENTS),
        vin: text(FIELD_VIN),
    })
}

fn map_trade_in(fields: &FormFields) -> Result<Option<TradeIn>, LeadError> {
    if !any_present(fields, TRADE_IN_FIELDS) {
        return Ok(None);
    }
    Ok(Some(TradeIn {
        make: fields.get(FIELD_TRADE_IN_MAKE).to_string(),
        model: fields.get(FIELD_TRADE_IN_MODEL).to_string(),
        variant: fields.get(FIELD_TRADE_IN_VARIANT).to_string(),
        year: parse_number(fields, FIELD_TRADE_IN_YEAR)?.unwrap_or_default(),
        mileage: parse_number(fields, FIELD_TRADE_IN_MILEAGE)?.unwrap_or_default(),
        mm_code: parse_number(fields, FIELD_TRADE_IN_MM_CODE)?,
        is_financed: parse_flag(fields.get(FIELD_TRADE_IN_FINANCED)),
        price: parse_price(fields, FIELD_TRADE_IN_PRICE)?.unwrap_or_default(),
    }))
}

fn parse_number<T: FromStr>(fields: &FormFields, key: &'static str) -> Result<Option<T>, LeadError> {
    let Some(raw) = fields.non_empty(key) else {
        return Ok(None);
    };
    raw.parse()
        .map(Some)
        .map_err(|_| LeadError::Validation(format!("field '{key}' is not a number: '{raw}'")))
}

// `f64` parsing accepts "NaN" and "inf", which JSON cannot carry
fn parse_price(fields: &FormFields, key: &'static str) -> Result<Option<f64>, LeadError> {
    match parse_number::<f64>(fields, key)? {
        Some(price) if !price.is_finite() => Err(LeadError::Validation(format!(
            "field '{key}' is not a finite number: '{}'",
            fields.get(key).trim()
        ))),
        price => Ok(price),
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "yes" | "true" | "1"
    )
}

fn prefixed_map(fields: &FormFields, prefix: &str) -> BTreeMap<String, String> {
    fields
        .with_prefix(prefix)
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
