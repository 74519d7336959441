//! Lead decoding, dealer resolution and mapping.
//!
//! This module provides:
//! - Inbound payload decoders, one per intake format
//! - Dealer route resolution and floor selection
//! - Appointment normalization
//! - The CMS lead schema and the mapping onto it

mod appointment;
mod dealer;
mod intake;
mod mapper;
mod schema;

pub use appointment::{appointment_from_fields, normalize_appointment};
pub use dealer::{is_used_vehicle, resolve_dealer, select_floor};
pub use intake::{FormFields, InboundPayload};
pub use mapper::{contact_phone, map_lead, MappingContext};
pub use schema::{Appointment, CmsResponse, Contact, Lead, LeadEnvelope, Seeks, TradeIn};
