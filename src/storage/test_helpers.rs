//! Shared test helpers for storage and pipeline tests.

#[cfg(test)]
use sqlx::{sqlite::SqlitePoolOptions, Row, SqlitePool};

#[cfg(test)]
use crate::storage::run_migrations;

/// Creates a test database pool with migrations applied.
/// Uses a single-connection in-memory database so every query sees the same data.
#[cfg(test)]
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Inserts a dealer route and returns its id.
#[cfg(test)]
pub async fn seed_dealer_route(
    pool: &SqlitePool,
    source: &str,
    dealership: &str,
    dealer_code: &str,
    floor_code_new: &str,
    floor_code_used: &str,
) -> i64 {
    sqlx::query(
        "INSERT INTO dealer_source_code (
            source, dealership, dealer_code, floor_code_new, floor_code_used, contact_person
        ) VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id",
    )
    .bind(source)
    .bind(dealership)
    .bind(dealer_code)
    .bind(floor_code_new)
    .bind(floor_code_used)
    .bind("Sam Seller")
    .fetch_one(pool)
    .await
    .expect("Failed to insert test dealer route")
    .get::<i64, _>(0)
}

/// Inserts a contact directory entry for a dealer route.
#[cfg(test)]
pub async fn seed_contact(
    pool: &SqlitePool,
    dealer_source_id: i64,
    email: &str,
    preferred_contact_method: &str,
) {
    sqlx::query(
        "INSERT INTO contact (dealer_source_id, email, preferred_contact_method)
         VALUES (?, ?, ?)",
    )
    .bind(dealer_source_id)
    .bind(email)
    .bind(preferred_contact_method)
    .execute(pool)
    .await
    .expect("Failed to insert test contact");
}
