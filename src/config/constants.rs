//! Configuration constants.
//!
//! Defaults for the configuration surface and the inbound field names the
//! pipeline understands.

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DB_PATH: &str = "./lead_relay.db";
pub const DEFAULT_CMS_API_KEY_HEADER: &str = "X-API-Key";

/// User-Agent sent to the CMS.
pub const USER_AGENT: &str = concat!("lead_relay/", env!("CARGO_PKG_VERSION"));

// Dealer resolution
pub const FIELD_SOURCE: &str = "Source";
pub const FIELD_DEALERSHIP: &str = "Dealership";
pub const FIELD_PROVINCE: &str = "Province";
/// Field telling new-vehicle leads from used-vehicle leads.
pub const FIELD_VEHICLE_CATEGORY: &str = "Our cars";
/// Value of [`FIELD_VEHICLE_CATEGORY`] that selects the used-vehicle floor.
pub const USED_VEHICLES_SENTINEL: &str = "Used vehicles";

// Appointment
pub const FIELD_APPOINTMENT_DATE: &str = "Appointment date";
pub const FIELD_APPOINTMENT_TIME: &str = "Appointment time";
/// Inbound date layout, e.g. `25.12.2024`.
pub const APPOINTMENT_DATE_FORMAT: &str = "%d.%m.%Y";
/// Canonical timestamp layout sent to the CMS.
pub const APPOINTMENT_OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const APPOINTMENT_RANGE_DELIMITER: char = '-';

// Lead header pass-through
pub const FIELD_TRANSACTION_ID: &str = "TransactionID";
pub const FIELD_EXT_LEAD_REF: &str = "ExtLeadRef";
pub const FIELD_PROMOTIONAL_CODE: &str = "PromotionalCode";
pub const FIELD_UTM_PARAMETERS: &str = "UtmParameters";
pub const FIELD_COUNTRY_CODE: &str = "CountryCode";

// Contact
pub const FIELD_TITLE: &str = "Title";
pub const FIELD_FIRST_NAME: &str = "Name";
pub const FIELD_SURNAME: &str = "Surname";
pub const FIELD_EMAIL: &str = "Email";
pub const FIELD_PHONE: &str = "MSISDN";
pub const FIELD_ALTERNATE_PHONE: &str = "AlternateMSISDN";
pub const FIELD_OFFICE_PHONE: &str = "Office phone";
pub const FIELD_ID_NUMBER: &str = "ID number";
pub const FIELD_PREFERRED_CONTACT_TIME: &str = "Preferred contact time";
pub const FIELD_DRIVERS_LICENSE: &str = "Drivers license";
pub const FIELD_INCOME_BRACKET: &str = "Income bracket";
pub const FIELD_CITIZENSHIP: &str = "Citizenship";
pub const FIELD_BIRTH_DATE: &str = "Birth date";
pub const FIELD_GENDER: &str = "Gender";
pub const FIELD_ETHNICITY: &str = "Ethnicity";
pub const FIELD_HOME_LANGUAGE: &str = "Home language";
pub const FIELD_MARKETING_CONSENT: &str = "Marketing consent";
pub const FIELD_CREDIT_GRADING: &str = "Credit grading";
pub const FIELD_COMPANY_NAME: &str = "Company name";
pub const FIELD_COMPANY_TYPE: &str = "Company type";

// Contact addresses
pub const FIELD_RESIDENTIAL_LINE1: &str = "Residential address line 1";
pub const FIELD_RESIDENTIAL_LINE2: &str = "Residential address line 2";
pub const FIELD_RESIDENTIAL_SUBURB: &str = "Residential suburb";
pub const FIELD_RESIDENTIAL_CITY: &str = "Residential city";
pub const FIELD_RESIDENTIAL_POSTAL_CODE: &str = "Residential postal code";
pub const FIELD_RESIDENTIAL_PROVINCE: &str = "Residential province";
pub const FIELD_POSTAL_LINE1: &str = "Postal address line 1";
pub const FIELD_POSTAL_LINE2: &str = "Postal address line 2";
pub const FIELD_POSTAL_SUBURB: &str = "Postal suburb";
pub const FIELD_POSTAL_CITY: &str = "Postal city";
pub const FIELD_POSTAL_CODE: &str = "Postal code";
pub const FIELD_POSTAL_PROVINCE: &str = "Postal province";
/// An alternate number at least this long replaces the primary phone.
pub const ALTERNATE_PHONE_MIN_LEN: usize = 10;
/// Preferred contact method when the contact directory has none.
pub const DEFAULT_PREFERRED_CONTACT_METHOD: &str = "Cellphone";

// Vehicle of interest
pub const FIELD_BRAND: &str = "Brand";
pub const FIELD_MODEL: &str = "Model";
pub const FIELD_YEAR: &str = "Year";
pub const FIELD_KMS: &str = "Kms";
pub const FIELD_COLOUR: &str = "Colour";
pub const FIELD_STOCK_NUMBER: &str = "Stock number";
pub const FIELD_PRICE: &str = "Price";
pub const FIELD_DEPOSIT: &str = "Deposit";
pub const FIELD_VIN: &str = "VIN";
pub const FIELD_COMMENTS: &str = "Comments";
pub const FIELD_FINANCE: &str = "Finance";
pub const FIELD_TEST_DRIVE: &str = "Test drive";
pub const FIELD_MM_CODE: &str = "MM code";
pub const FIELD_MODEL_CODE: &str = "Model code";
/// Free-text "has a trade-in" answer; the trade-in vehicle itself uses the fields below.
pub const FIELD_HAS_TRADE_IN: &str = "Has trade-in";
pub const FIELD_VALUATION: &str = "Valuation";
pub const FIELD_REGISTRATION: &str = "Registration";
pub const FIELD_SPECIAL: &str = "Special";
pub const FIELD_SPECIAL_BANNER_URL: &str = "Special banner URL";
pub const FIELD_SERVICE_HISTORY: &str = "Service history";

// Trade-in
pub const FIELD_TRADE_IN_MAKE: &str = "Trade-in make";
pub const FIELD_TRADE_IN_MODEL: &str = "Trade-in model";
pub const FIELD_TRADE_IN_VARIANT: &str = "Trade-in variant";
pub const FIELD_TRADE_IN_YEAR: &str = "Trade-in year";
pub const FIELD_TRADE_IN_MILEAGE: &str = "Trade-in mileage";
pub const FIELD_TRADE_IN_MM_CODE: &str = "Trade-in MM code";
pub const FIELD_TRADE_IN_FINANCED: &str = "Trade-in financed";
pub const FIELD_TRADE_IN_PRICE: &str = "Trade-in price";

// Open key/value maps
pub const REFERRER_PREFIX: &str = "referrer.";
pub const OPTIONS_PREFIX: &str = "options.";
