//! Dealer resolution and floor selection.

use sqlx::SqlitePool;

use crate::config::USED_VEHICLES_SENTINEL;
use crate::error_handling::LeadError;
use crate::storage::{find_dealer_route, DealerRoute};

/// Resolves the route for an inbound (source, dealership) pair.
///
/// A miss is reported as `DealerNotFound`. Lookups are never retried.
pub async fn resolve_dealer(
    pool: &SqlitePool,
    source: &str,
    dealership: &str,
) -> Result<DealerRoute, LeadError> {
    find_dealer_route(pool, source, dealership)
        .await
        .map_err(LeadError::Directory)?
        .ok_or_else(|| LeadError::DealerNotFound {
            source_code: source.to_string(),
            dealership: dealership.to_string(),
        })
}

/// Whether the vehicle-category field asks for the used-vehicle floor.
pub fn is_used_vehicle(vehicle_category: Option<&str>) -> bool {
    vehicle_category == Some(USED_VEHICLES_SENTINEL)
}

/// Picks the floor code for a lead.
///
/// Only the exact used-vehicle sentinel selects the used floor; any other
/// value, including an absent field, selects the new floor.
pub fn select_floor<'a>(route: &'a DealerRoute, vehicle_category: Option<&str>) -> &'a str {
    if is_used_vehicle(vehicle_category) {
        &route.floor_code_used
    } else {
        &route.floor_code_new
    }
}
