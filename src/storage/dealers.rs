//! Dealer directory and contact directory reads.

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::error_handling::DatabaseError;
use crate::storage::models::{DealerRoute, DirectoryContact};

fn dealer_route_from_row(row: &SqliteRow) -> Result<DealerRoute, sqlx::Error> {
    Ok(DealerRoute {
        id: row.try_get("id")?,
        source: row.try_get("source")?,
        dealership: row.try_get("dealership")?,
        dealer_code: row.try_get("dealer_code")?,
        floor_code_new: row.try_get("floor_code_new")?,
        floor_code_used: row.try_get("floor_code_used")?,
        contact_person: row.try_get("contact_person")?,
        source_label: row.try_get("source_label")?,
    })
}

/// Looks up the route for an exact, case-sensitive (source, dealership) pair.
///
/// Returns `Ok(None)` when no row matches both columns.
pub async fn find_dealer_route(
    pool: &SqlitePool,
    source: &str,
    dealership: &str,
) -> Result<Option<DealerRoute>, DatabaseError> {
    // `=` uses the BINARY collation in SQLite, so the match is case-sensitive
    let row = sqlx::query(
        "SELECT id, source, dealership, dealer_code, floor_code_new, floor_code_used,
                contact_person, source_label
         FROM dealer_source_code
         WHERE source = ? AND dealership = ?
         LIMIT 1",
    )
    .bind(source)
    .bind(dealership)
    .fetch_optional(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    row.as_ref()
        .map(dealer_route_from_row)
        .transpose()
        .map_err(DatabaseError::SqlError)
}

/// Looks up a known contact of a dealer route by email.
pub async fn find_directory_contact(
    pool: &SqlitePool,
    dealer_source_id: i64,
    email: &str,
) -> Result<Option<DirectoryContact>, DatabaseError> {
    let row = sqlx::query(
        "SELECT id, dealer_source_id, email, preferred_contact_method
         FROM contact
         WHERE dealer_source_id = ? AND email = ?
         LIMIT 1",
    )
    .bind(dealer_source_id)
    .bind(email)
    .fetch_optional(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    let Some(row) = row else {
        return Ok(None);
    };

    Ok(Some(DirectoryContact {
        id: row.try_get("id")?,
        dealer_source_id: row.try_get("dealer_source_id")?,
        email: row.try_get("email")?,
        preferred_contact_method: row.try_get("preferred_contact_method")?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_helpers::{create_test_pool, seed_contact, seed_dealer_route};

    #[tokio::test]
    async fn test_find_dealer_route_exact_match() {
        let pool = create_test_pool().await;
        let id = seed_dealer_route(&pool, "WEB", "ABC Motors", "D1", "F1", "F2").await;

        let route = find_dealer_route(&pool, "WEB", "ABC Motors")
            .await
            .expect("query should succeed")
            .expect("route should exist");
        assert_eq!(route.id, id);
        assert_eq!(route.dealer_code, "D1");
        assert_eq!(route.floor_code_new, "F1");
        assert_eq!(route.floor_code_used, "F2");
        assert_eq!(route.source_label, None);
    }

    #[tokio::test]
    async fn test_find_dealer_route_partial_match_is_none() {
        let pool = create_test_pool().await;
        seed_dealer_route(&pool, "WEB", "ABC Motors", "D1", "F1", "F2").await;
        seed_dealer_route(&pool, "FB", "XYZ Motors", "D2", "F3", "F4").await;

        for (source, dealership) in [
            ("WEB", "XYZ Motors"),
            ("FB", "ABC Motors"),
            ("web", "ABC Motors"),
            ("WEB", "abc motors"),
            ("WEB", "ABC Motors "),
            ("", ""),
        ] {
            let route = find_dealer_route(&pool, source, dealership)
                .await
                .expect("query should succeed");
            assert!(route.is_none(), "({source}, {dealership}) should not match");
        }
    }

    #[tokio::test]
    async fn test_find_dealer_route_is_repeatable() {
        let pool = create_test_pool().await;
        seed_dealer_route(&pool, "WEB", "ABC Motors", "D1", "F1", "F2").await;

        let first = find_dealer_route(&pool, "WEB", "ABC Motors").await.unwrap();
        let second = find_dealer_route(&pool, "WEB", "ABC Motors").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_find_dealer_route_without_schema_is_error() {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let result = find_dealer_route(&pool, "WEB", "ABC Motors").await;
        assert!(matches!(result, Err(DatabaseError::SqlError(_))));
    }

    #[tokio::test]
    async fn test_find_directory_contact() {
        let pool = create_test_pool().await;
        let route_id = seed_dealer_route(&pool, "WEB", "ABC Motors", "D1", "F1", "F2").await;
        seed_contact(&pool, route_id, "jane@example.com", "Email").await;

        let contact = find_directory_contact(&pool, route_id, "jane@example.com")
            .await
            .unwrap()
            .expect("contact should exist");
        assert_eq!(contact.preferred_contact_method, "Email");

        let other_route = find_directory_contact(&pool, route_id + 1, "jane@example.com")
            .await
            .unwrap();
        assert!(other_route.is_none());
    }
}
