//! Lead server HTTP handlers.

mod lead;
mod status;

pub use lead::lead_handler;
pub use status::status_handler;
