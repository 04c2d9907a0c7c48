//! The record store - authoritative owner of bookings and the service catalog.
//!
//! Both collections are loaded once when the store is opened and written back
//! as full snapshots after every successful mutation. Persistence is best
//! effort: a failed write is logged and the in-memory change stands, so
//! callers see the same outcome whether or not the disk write succeeded.
//!
//! Monthly statistics are derived on demand and memoized against a version
//! counter that every mutation bumps.

use crate::{
    core::{
        booking::{BookingRecord, BookingStatus, NewBooking, build_booking},
        service::{NewService, ServiceOffering, build_service},
        stats::{MonthlyStat, aggregate_monthly_stats},
        storage::{self, BOOKINGS_KEY, SERVICES_KEY},
    },
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{error, info, warn};

/// Owns the booking records and service offerings.
#[derive(Debug)]
pub struct LaundryStore {
    db: DatabaseConnection,
    bookings: Vec<BookingRecord>,
    services: Vec<ServiceOffering>,
    version: u64,
    last_id: i64,
    stats_cache: Option<(u64, Vec<MonthlyStat>)>,
}

impl LaundryStore {
    /// Opens the store, loading both snapshots.
    ///
    /// When no service snapshot exists yet, `seed_services` becomes the catalog
    /// and is written immediately. A missing booking snapshot means no bookings.
    /// A snapshot that exists but cannot be decoded is an error; it is never
    /// silently replaced.
    pub async fn load(db: DatabaseConnection, seed_services: Vec<ServiceOffering>) -> Result<Self> {
        let bookings: Vec<BookingRecord> = storage::load_collection(&db, BOOKINGS_KEY)
            .await
            .inspect_err(|e| error!("Failed to load bookings snapshot: {e}"))?
            .unwrap_or_default();

        let stored_services: Option<Vec<ServiceOffering>> =
            storage::load_collection(&db, SERVICES_KEY)
                .await
                .inspect_err(|e| error!("Failed to load services snapshot: {e}"))?;
        let seeded = stored_services.is_none();
        let services = stored_services.unwrap_or(seed_services);

        let last_id = bookings
            .iter()
            .map(|b| b.id.as_str())
            .chain(services.iter().map(|s| s.id.as_str()))
            .filter_map(|id| id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);

        let store = Self {
            db,
            bookings,
            services,
            version: 0,
            last_id,
            stats_cache: None,
        };

        if seeded {
            info!("No service catalog stored yet, seeding {} services", store.services.len());
            store.persist(SERVICES_KEY, &store.services).await;
        }

        info!(
            "Loaded {} bookings and {} services",
            store.bookings.len(),
            store.services.len()
        );
        Ok(store)
    }

    /// All bookings in insertion order.
    #[must_use]
    pub fn bookings(&self) -> &[BookingRecord] {
        &self.bookings
    }

    /// The service catalog in insertion order.
    #[must_use]
    pub fn services(&self) -> &[ServiceOffering] {
        &self.services
    }

    /// Looks up one booking.
    #[must_use]
    pub fn booking(&self, id: &str) -> Option<&BookingRecord> {
        self.bookings.iter().find(|b| b.id == id)
    }

    /// Bookings currently in `status`, in insertion order.
    pub fn bookings_with_status(
        &self,
        status: BookingStatus,
    ) -> impl Iterator<Item = &BookingRecord> {
        self.bookings.iter().filter(move |b| b.status == status)
    }

    /// Number of mutations applied since the store was opened.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Validates and appends a booking with status `Pending`.
    ///
    /// On validation failure nothing changes and nothing is written.
    pub async fn create_booking(&mut self, input: NewBooking) -> Result<BookingRecord> {
        let id = self.peek_id();
        let record = build_booking(input, id.to_string())
            .inspect_err(|e| info!("Rejected booking: {e}"))?;
        self.last_id = id;

        self.bookings.push(record.clone());
        self.touch();
        info!(
            "Created booking {} for {} ({} pieces)",
            record.id, record.name, record.quantity
        );
        self.persist(BOOKINGS_KEY, &self.bookings).await;

        Ok(record)
    }

    /// Sets the status of one booking, leaving every other field unchanged.
    pub async fn update_booking_status(
        &mut self,
        id: &str,
        status: BookingStatus,
    ) -> Result<BookingRecord> {
        let Some(record) = self.bookings.iter_mut().find(|b| b.id == id) else {
            warn!("Status update for unknown booking {id}");
            return Err(Error::BookingNotFound { id: id.to_string() });
        };

        let previous = record.status;
        record.status = status;
        let updated = record.clone();
        self.touch();
        info!("Booking {id}: {previous} -> {status}");
        self.persist(BOOKINGS_KEY, &self.bookings).await;

        Ok(updated)
    }

    /// Appends a service to the catalog.
    pub async fn add_service(&mut self, input: NewService) -> Result<ServiceOffering> {
        let id = self.peek_id();
        let service = build_service(input, id.to_string())?;
        self.last_id = id;

        self.services.push(service.clone());
        self.touch();
        info!("Added service {} ({})", service.name, service.id);
        self.persist(SERVICES_KEY, &self.services).await;

        Ok(service)
    }

    /// Removes a service from the catalog.
    ///
    /// Bookings keep the service name they were created with.
    pub async fn remove_service(&mut self, id: &str) -> Result<ServiceOffering> {
        let Some(position) = self.services.iter().position(|s| s.id == id) else {
            warn!("Removal of unknown service {id}");
            return Err(Error::ServiceNotFound { id: id.to_string() });
        };

        let removed = self.services.remove(position);
        self.touch();
        info!("Removed service {} ({})", removed.name, removed.id);
        self.persist(SERVICES_KEY, &self.services).await;

        Ok(removed)
    }

    /// Monthly statistics in first-seen month order.
    ///
    /// Recomputed only when the store changed since the last call.
    pub fn monthly_stats(&mut self) -> &[MonthlyStat] {
        let version = self.version;
        let stale = self
            .stats_cache
            .as_ref()
            .is_none_or(|(cached_at, _)| *cached_at != version);
        if stale {
            let stats = aggregate_monthly_stats(&self.bookings);
            self.stats_cache = Some((version, stats));
        }

        self.stats_cache
            .as_ref()
            .map(|(_, stats)| stats.as_slice())
            .unwrap_or_default()
    }

    /// Next id: the current time in milliseconds, or one past the last id
    /// if the clock has not moved forward.
    fn peek_id(&self) -> i64 {
        Utc::now().timestamp_millis().max(self.last_id.saturating_add(1))
    }

    const fn touch(&mut self) {
        self.version += 1;
    }

    async fn persist<T: Serialize + Sync>(&self, key: &str, items: &[T]) {
        if let Err(e) = storage::save_collection(&self.db, key, items).await {
            error!("Failed to persist '{key}' snapshot: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::booking::{ExtraItem, PieceBreakdown, PieceCategory};
    use crate::core::service::FALLBACK_ICON;
    use crate::errors::ValidationError;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_load_seeds_services_and_empty_bookings() -> Result<()> {
        let db = setup_test_db().await?;
        let store = LaundryStore::load(db.clone(), seed_services()).await?;

        assert!(store.bookings().is_empty());
        assert_eq!(store.services(), seed_services().as_slice());

        let stored: Vec<ServiceOffering> =
            storage::load_collection(&db, SERVICES_KEY).await?.unwrap();
        assert_eq!(stored, seed_services());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_booking_appends_pending_record() -> Result<()> {
        let mut store = setup_test_store().await?;

        let mut input = sample_new_booking();
        input.breakdown = PieceBreakdown::default()
            .with(PieceCategory::Shirt, 2)
            .with(PieceCategory::Suit, 1);
        input.breakdown.extra_items = vec![ExtraItem::new("Rug", 3), ExtraItem::new(" ", 4)];

        let record = store.create_booking(input).await?;

        assert_eq!(record.status, BookingStatus::Pending);
        assert_eq!(record.quantity, 6);
        assert_eq!(record.breakdown.extra_items.len(), 1);
        assert_eq!(store.bookings(), std::slice::from_ref(&record));
        assert_eq!(store.version(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_bookings_keep_insertion_order_and_unique_ids() -> Result<()> {
        let mut store = setup_test_store().await?;

        let first = store.create_booking(sample_new_booking()).await?;
        let second = store.create_booking(sample_new_booking()).await?;
        let third = store.create_booking(sample_new_booking()).await?;

        let ids: Vec<&str> = store.bookings().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec![first.id.as_str(), second.id.as_str(), third.id.as_str()]);
        assert!(first.id.parse::<i64>().unwrap() < second.id.parse::<i64>().unwrap());
        assert!(second.id.parse::<i64>().unwrap() < third.id.parse::<i64>().unwrap());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_booking_without_pieces_is_rejected() -> Result<()> {
        let mut store = setup_test_store().await?;

        let mut input = sample_new_booking();
        input.breakdown = PieceBreakdown::default();

        let result = store.create_booking(input).await;

        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::NoPieces))
        ));
        assert!(store.bookings().is_empty());
        assert_eq!(store.version(), 0);
        let stored: Option<Vec<BookingRecord>> =
            storage::load_collection(&store.db, BOOKINGS_KEY).await?;
        assert!(stored.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_booking_without_services_is_rejected() -> Result<()> {
        let mut store = setup_test_store().await?;

        let mut input = sample_new_booking();
        input.services.clear();

        let result = store.create_booking(input).await;

        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::NoServiceSelected))
        ));
        assert!(store.bookings().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_update_status_changes_only_status() -> Result<()> {
        let mut store = setup_test_store().await?;
        let created = store.create_booking(sample_new_booking()).await?;

        let updated = store
            .update_booking_status(&created.id, BookingStatus::Washing)
            .await?;

        assert_eq!(updated.status, BookingStatus::Washing);
        let expected = BookingRecord {
            status: BookingStatus::Washing,
            ..created.clone()
        };
        assert_eq!(updated, expected);
        assert_eq!(store.booking(&created.id), Some(&expected));

        // Any status is reachable from any other
        store
            .update_booking_status(&created.id, BookingStatus::Delivered)
            .await?;
        store
            .update_booking_status(&created.id, BookingStatus::Pending)
            .await?;
        assert_eq!(
            store.booking(&created.id).unwrap().status,
            BookingStatus::Pending
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_update_status_unknown_id() -> Result<()> {
        let mut store = setup_test_store().await?;
        store.create_booking(sample_new_booking()).await?;
        let before = store.bookings().to_vec();

        let result = store
            .update_booking_status("does-not-exist", BookingStatus::Ready)
            .await;

        assert!(matches!(result, Err(Error::BookingNotFound { .. })));
        assert_eq!(store.bookings(), before.as_slice());
        assert_eq!(store.version(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_bookings_with_status() -> Result<()> {
        let mut store = setup_test_store().await?;
        let a = store.create_booking(sample_new_booking()).await?;
        let b = store.create_booking(sample_new_booking()).await?;
        store.update_booking_status(&b.id, BookingStatus::Ready).await?;

        let pending: Vec<&str> = store
            .bookings_with_status(BookingStatus::Pending)
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(pending, vec![a.id.as_str()]);
        assert_eq!(store.bookings_with_status(BookingStatus::Ready).count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_and_remove_service() -> Result<()> {
        let mut store = setup_test_store().await?;
        let seeded = store.services().len();

        let added = store
            .add_service(NewService::new("Rug Cleaning", None, "Large rugs"))
            .await?;
        assert_eq!(added.icon, FALLBACK_ICON);
        assert_eq!(store.services().len(), seeded + 1);
        assert_eq!(store.services().last(), Some(&added));

        let removed = store.remove_service(&added.id).await?;
        assert_eq!(removed, added);
        assert_eq!(store.services().len(), seeded);

        let again = store.remove_service(&added.id).await;
        assert!(matches!(again, Err(Error::ServiceNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_service_ids_do_not_collide_with_seed_ids() -> Result<()> {
        let mut store = setup_test_store().await?;

        let added = store
            .add_service(NewService::new("Rug Cleaning", Some("🧶"), ""))
            .await?;

        assert!(store.services().iter().filter(|s| s.id == added.id).count() == 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_removing_service_keeps_bookings_and_stats() -> Result<()> {
        let mut store = setup_test_store().await?;
        let service = store.services()[0].clone();

        let mut input = sample_new_booking();
        input.services = vec![service.name.clone()];
        let booking = store.create_booking(input).await?;
        let stats_before = store.monthly_stats().to_vec();

        store.remove_service(&service.id).await?;

        assert_eq!(store.booking(&booking.id).unwrap().services, vec![service.name.clone()]);
        let stats_after = store.monthly_stats().to_vec();
        assert_eq!(stats_before, stats_after);
        assert_eq!(stats_after[0].services_breakdown.get(&service.name), Some(&1));
        Ok(())
    }

    #[tokio::test]
    async fn test_monthly_stats_follow_mutations() -> Result<()> {
        let mut store = setup_test_store().await?;
        assert!(store.monthly_stats().is_empty());

        store.create_booking(sample_new_booking()).await?;
        assert_eq!(store.monthly_stats()[0].total_orders, 1);

        store.create_booking(sample_new_booking()).await?;
        assert_eq!(store.monthly_stats()[0].total_orders, 2);

        let first = store.monthly_stats().to_vec();
        let second = store.monthly_stats().to_vec();
        assert_eq!(first, second);
        Ok(())
    }

    #[tokio::test]
    async fn test_snapshots_reload_verbatim() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("laundry.sqlite").display());

        let (bookings, services) = {
            let db = sea_orm::Database::connect(&url).await?;
            crate::config::database::create_tables(&db).await?;
            let mut store = LaundryStore::load(db, seed_services()).await?;

            let created = store.create_booking(sample_new_booking()).await?;
            store.create_booking(sample_new_booking()).await?;
            store
                .update_booking_status(&created.id, BookingStatus::Ready)
                .await?;
            store
                .add_service(NewService::new("Curtains", Some("🪟"), "Curtain care"))
                .await?;
            let first_seed = store.services()[0].id.clone();
            store.remove_service(&first_seed).await?;

            (store.bookings().to_vec(), store.services().to_vec())
        };

        let db = sea_orm::Database::connect(&url).await?;
        crate::config::database::create_tables(&db).await?;
        let reloaded = LaundryStore::load(db, Vec::new()).await?;

        assert_eq!(reloaded.bookings(), bookings.as_slice());
        assert_eq!(reloaded.services(), services.as_slice());
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_write_keeps_in_memory_change() -> Result<()> {
        use sea_orm::ConnectionTrait;

        let mut store = setup_test_store().await?;
        store.db.execute_unprepared("DROP TABLE storage_blobs").await?;

        let created = store.create_booking(sample_new_booking()).await?;
        assert_eq!(store.bookings().len(), 1);

        let updated = store
            .update_booking_status(&created.id, BookingStatus::Washing)
            .await?;
        assert_eq!(updated.status, BookingStatus::Washing);
        assert_eq!(store.monthly_stats()[0].total_orders, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_largest_stored_id_does_not_overflow() -> Result<()> {
        let db = setup_test_db().await?;
        let stored = sample_record(
            &i64::MAX.to_string(),
            "2025-03-02",
            PieceBreakdown::default().with(PieceCategory::Shirt, 1),
            &["Delicates"],
        );
        storage::save_collection(&db, BOOKINGS_KEY, &[stored]).await?;

        let mut store = LaundryStore::load(db, seed_services()).await?;
        store.create_booking(sample_new_booking()).await?;

        assert_eq!(store.bookings().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_fails_load() -> Result<()> {
        let db = setup_test_db().await?;
        storage::save_blob(&db, BOOKINGS_KEY, "{broken".to_string()).await?;

        let result = LaundryStore::load(db, seed_services()).await;
        assert!(matches!(result, Err(Error::Serialization(_))));
        Ok(())
    }
}
