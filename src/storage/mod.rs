// storage/mod.rs
// Database operations module

pub mod audit;
pub mod dealers;
pub mod migrations;
pub mod models;
pub mod pool;
#[cfg(test)]
pub mod test_helpers;

pub use audit::{count_lead_audits, find_audits_by_reference, insert_lead_audit};
pub use dealers::{find_dealer_route, find_directory_contact};
pub use migrations::run_migrations;
pub use models::{AuditOutcome, DealerRoute, DirectoryContact, LeadAuditRecord, NewLeadAudit};
pub use pool::init_db_pool_with_path;
