//! Shared test utilities for Laundry Desk.
//!
//! Helpers for setting up in-memory databases and stores, and for building
//! bookings with sensible defaults.

use crate::{
    config,
    core::{
        booking::{BookingRecord, BookingStatus, NewBooking, PieceBreakdown, PieceCategory},
        service::ServiceOffering,
        store::LaundryStore,
    },
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    config::database::create_tables(&db).await?;
    Ok(db)
}

/// The built-in service catalog.
#[must_use]
pub fn seed_services() -> Vec<ServiceOffering> {
    config::services::default_services()
}

/// Opens a store on a fresh in-memory database, seeded with the built-in catalog.
pub async fn setup_test_store() -> Result<LaundryStore> {
    let db = setup_test_db().await?;
    LaundryStore::load(db, seed_services()).await
}

/// A valid booking submission.
///
/// # Defaults
/// * `name`: `"Test Customer"`, `phone`: `"555-0100"`
/// * two shirts, no extra items
/// * `services`: `["Professional Wash"]`
/// * `date`: `"2025-03-02"`, `time`: `"09:00"`
#[must_use]
pub fn sample_new_booking() -> NewBooking {
    NewBooking {
        name: "Test Customer".to_string(),
        phone: "555-0100".to_string(),
        breakdown: PieceBreakdown::default().with(PieceCategory::Shirt, 2),
        services: vec!["Professional Wash".to_string()],
        date: "2025-03-02".to_string(),
        time: "09:00".to_string(),
        ..Default::default()
    }
}

/// A stored booking built directly, bypassing validation.
///
/// `quantity` is set to the breakdown total.
#[must_use]
pub fn sample_record(
    id: &str,
    date: &str,
    breakdown: PieceBreakdown,
    services: &[&str],
) -> BookingRecord {
    BookingRecord {
        id: id.to_string(),
        name: "Test Customer".to_string(),
        phone: "555-0100".to_string(),
        quantity: breakdown.total(),
        breakdown,
        services: services.iter().map(|s| (*s).to_string()).collect(),
        date: date.to_string(),
        time: String::new(),
        obs: None,
        pickup_address: None,
        delivery_address: None,
        status: BookingStatus::Pending,
    }
}
