use super::{create_test_service, member, sample_draft};
use crate::constants::LISTING_CREATED;
use crate::core::errors::RoomshareError;
use crate::core::filter::FilterCriteria;
use crate::core::models::listing::{LeaseOption, OccupancyType, VerificationStatus};
use crate::core::services::{RoomshareService, ServiceOptions};
use crate::core::verification::DocumentType;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::preferences::in_memory::InMemoryPreferenceStore;
use crate::infrastructure::storage::in_memory::InMemoryRecordStore;
use crate::infrastructure::storage::{Collection, RecordStore};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Notify;

/// Delegates to an in-memory store until switched offline.
#[derive(Clone, Default)]
struct FlakyStore {
    inner: InMemoryRecordStore,
    offline: Arc<AtomicBool>,
}

impl FlakyStore {
    fn check(&self) -> Result<(), RoomshareError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(RoomshareError::RemoteUnavailable("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RecordStore for FlakyStore {
    async fn list(&self, collection: Collection) -> Result<Vec<Value>, RoomshareError> {
        self.check()?;
        self.inner.list(collection).await
    }

    async fn get_by_id(&self, collection: Collection, id: &str) -> Result<Option<Value>, RoomshareError> {
        self.check()?;
        self.inner.get_by_id(collection, id).await
    }

    async fn create(&self, collection: Collection, record: Value) -> Result<Value, RoomshareError> {
        self.check()?;
        self.inner.create(collection, record).await
    }

    async fn update(&self, collection: Collection, record: Value) -> Result<Value, RoomshareError> {
        self.check()?;
        self.inner.update(collection, record).await
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), RoomshareError> {
        self.check()?;
        self.inner.delete(collection, id).await
    }
}

/// Never answers within any reasonable deadline.
struct StalledStore;

#[async_trait]
impl RecordStore for StalledStore {
    async fn list(&self, _collection: Collection) -> Result<Vec<Value>, RoomshareError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(Vec::new())
    }

    async fn get_by_id(&self, _collection: Collection, _id: &str) -> Result<Option<Value>, RoomshareError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(None)
    }

    async fn create(&self, _collection: Collection, record: Value) -> Result<Value, RoomshareError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(record)
    }

    async fn update(&self, _collection: Collection, record: Value) -> Result<Value, RoomshareError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(record)
    }

    async fn delete(&self, _collection: Collection, _id: &str) -> Result<(), RoomshareError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(())
    }
}

/// Holds one listing fetch after it has read the records until released.
#[derive(Clone, Default)]
struct GatedStore {
    inner: InMemoryRecordStore,
    gated: Arc<AtomicBool>,
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

#[async_trait]
impl RecordStore for GatedStore {
    async fn list(&self, collection: Collection) -> Result<Vec<Value>, RoomshareError> {
        let records = self.inner.list(collection).await?;
        if self.gated.swap(false, Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
        Ok(records)
    }

    async fn get_by_id(&self, collection: Collection, id: &str) -> Result<Option<Value>, RoomshareError> {
        self.inner.get_by_id(collection, id).await
    }

    async fn create(&self, collection: Collection, record: Value) -> Result<Value, RoomshareError> {
        self.inner.create(collection, record).await
    }

    async fn update(&self, collection: Collection, record: Value) -> Result<Value, RoomshareError> {
        self.inner.update(collection, record).await
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), RoomshareError> {
        self.inner.delete(collection, id).await
    }
}

#[tokio::test]
async fn test_create_and_search_listings() {
    let service = create_test_service();
    let owner = member("owner-1");

    let downtown = service.create_listing(sample_draft("Downtown", 500.0), &owner).await.unwrap();
    service.create_listing(sample_draft("Uptown", 900.0), &owner).await.unwrap();
    assert_eq!(downtown.owner_id.as_deref(), Some("owner-1"));
    assert_eq!(downtown.owner_verification_status, VerificationStatus::NotVerified);

    let everything = service.search_listings(&FilterCriteria::default()).await.unwrap();
    assert_eq!(everything.len(), 2);
    assert_eq!(everything[0].listing.location, "Downtown");
    assert_eq!(everything[0].available_slots, 3);

    let criteria = FilterCriteria {
        min_rent: Some(600.0),
        ..FilterCriteria::default()
    };
    let expensive = service.search_listings(&criteria).await.unwrap();
    assert_eq!(expensive.len(), 1);
    assert_eq!(expensive[0].listing.location, "Uptown");

    let logs = service.get_member_logs(&owner).await.unwrap();
    assert_eq!(logs.len(), 2);
    assert!(logs.iter().all(|l| l.action == LISTING_CREATED));
}

#[tokio::test]
async fn test_create_listing_rejects_invalid_drafts() {
    let service = create_test_service();
    let owner = member("owner-1");

    let blank = service.create_listing(sample_draft("   ", 500.0), &owner).await;
    assert!(matches!(blank, Err(RoomshareError::InvalidInput(..))));

    let mut crowded = sample_draft("Baner", 500.0);
    crowded.occupancy_type = OccupancyType::PartiallyOccupied;
    crowded.current_members = Some(5);
    let result = service.create_listing(crowded, &owner).await;
    assert!(matches!(result, Err(RoomshareError::ValidationInvariant(_))));

    let mut empty_room = sample_draft("Baner", 500.0);
    empty_room.occupancy_type = OccupancyType::PartiallyOccupied;
    let result = service.create_listing(empty_room, &owner).await;
    assert!(matches!(result, Err(RoomshareError::ValidationInvariant(_))));

    let mut oversized = sample_draft("Baner", 500.0);
    oversized.capacity = 9;
    let result = service.create_listing(oversized, &owner).await;
    assert!(matches!(result, Err(RoomshareError::ValidationInvariant(_))));

    assert!(service.search_listings(&FilterCriteria::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_listing_keeps_identity_and_verification() {
    let service = create_test_service();
    let owner = member("owner-1");

    let mut draft = sample_draft("Kothrud", 7000.0);
    draft.room_image = Some("https://img.example/room.jpg".to_string());
    let created = service.create_listing(draft, &owner).await.unwrap();
    service
        .verify_listing_owner(&created.id, DocumentType::Pan, "ABCDE1234F", &owner)
        .await
        .unwrap();

    let mut edit = sample_draft("Kothrud West", 7500.0);
    edit.occupancy_type = OccupancyType::PartiallyOccupied;
    edit.current_members = Some(2);
    edit.lease_option = Some(LeaseOption::RentOnly);
    edit.lease_amount = Some(30000.0);
    let updated = service.update_listing(&created.id, edit, &owner).await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.owner_id, created.owner_id);
    assert_eq!(updated.owner_verification_status, VerificationStatus::Verified);
    assert_eq!(updated.owner_verification_id.as_deref(), Some("ABCDE1234F"));
    assert_eq!(updated.room_image.as_deref(), Some("https://img.example/room.jpg"));
    assert_eq!(updated.lease_amount, None);

    let view = service.get_listing(&created.id).await.unwrap();
    assert_eq!(view.listing.location, "Kothrud West");
    assert_eq!(view.available_slots, 1);
}

#[tokio::test]
async fn test_only_owner_may_change_listing() {
    let service = create_test_service();
    let owner = member("owner-1");
    let stranger = member("someone-else");
    let listing = service.create_listing(sample_draft("Aundh", 6500.0), &owner).await.unwrap();

    let update = service
        .update_listing(&listing.id, sample_draft("Elsewhere", 1.0), &stranger)
        .await;
    assert!(matches!(update, Err(RoomshareError::NotListingOwner(_))));

    let delete = service.delete_listing(&listing.id, &stranger).await;
    assert!(matches!(delete, Err(RoomshareError::NotListingOwner(_))));

    let verify = service
        .verify_listing_owner(&listing.id, DocumentType::Aadhaar, "123456789012", &stranger)
        .await;
    assert!(matches!(verify, Err(RoomshareError::NotListingOwner(_))));

    assert_eq!(service.get_listing(&listing.id).await.unwrap().listing.location, "Aundh");
}

#[tokio::test]
async fn test_delete_listing() {
    let service = create_test_service();
    let owner = member("owner-1");
    let listing = service.create_listing(sample_draft("Wakad", 5000.0), &owner).await.unwrap();

    service.delete_listing(&listing.id, &owner).await.unwrap();
    assert!(matches!(
        service.get_listing(&listing.id).await,
        Err(RoomshareError::ListingNotFound(_))
    ));
    assert!(matches!(
        service.delete_listing(&listing.id, &owner).await,
        Err(RoomshareError::ListingNotFound(_))
    ));
}

#[tokio::test]
async fn test_owner_listings_only_returns_own_rooms() {
    let service = create_test_service();
    let alice = member("alice");
    let bob = member("bob");
    service.create_listing(sample_draft("Hinjewadi", 5000.0), &alice).await.unwrap();
    service.create_listing(sample_draft("Viman Nagar", 9000.0), &bob).await.unwrap();
    service.create_listing(sample_draft("Kharadi", 8000.0), &alice).await.unwrap();

    let mine = service.owner_listings(&alice).await.unwrap();
    let locations: Vec<&str> = mine.iter().map(|v| v.listing.location.as_str()).collect();
    assert_eq!(locations, vec!["Hinjewadi", "Kharadi"]);
}

#[tokio::test]
async fn test_verify_owner_rejects_bad_document_number() {
    let service = create_test_service();
    let owner = member("owner-1");
    let listing = service.create_listing(sample_draft("Baner", 6000.0), &owner).await.unwrap();

    let result = service
        .verify_listing_owner(&listing.id, DocumentType::Aadhaar, "1234567890AB", &owner)
        .await;
    assert!(matches!(result, Err(RoomshareError::InputFormat(DocumentType::Aadhaar))));

    let stored = service.get_listing(&listing.id).await.unwrap();
    assert_eq!(stored.listing.owner_verification_status, VerificationStatus::NotVerified);
    assert_eq!(stored.listing.owner_verification_id, None);

    let verified = service
        .verify_listing_owner(&listing.id, DocumentType::License, " AB1234567890 ", &owner)
        .await
        .unwrap();
    assert_eq!(verified.owner_verification_status, VerificationStatus::Verified);
    assert_eq!(verified.owner_verification_id.as_deref(), Some(" AB1234567890 "));
}

#[tokio::test]
async fn test_malformed_records_are_skipped() {
    let store = InMemoryRecordStore::new();
    let service = RoomshareService::new(
        store.clone(),
        InMemoryLogging::new(),
        InMemoryPreferenceStore::new(),
        ServiceOptions::default(),
    );
    let owner = member("owner-1");
    service.create_listing(sample_draft("Camp", 4000.0), &owner).await.unwrap();
    store
        .create(Collection::Listings, json!({ "_id": "broken", "capacity": "lots" }))
        .await
        .unwrap();

    let listings = service.search_listings(&FilterCriteria::default()).await.unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].listing.location, "Camp");
}

#[tokio::test]
async fn test_snapshot_survives_failed_refresh() {
    let store = FlakyStore::default();
    let service = RoomshareService::new(
        store.clone(),
        InMemoryLogging::new(),
        InMemoryPreferenceStore::new(),
        ServiceOptions::default(),
    );
    let owner = member("owner-1");
    service.create_listing(sample_draft("Downtown", 500.0), &owner).await.unwrap();
    service.create_listing(sample_draft("Uptown", 900.0), &owner).await.unwrap();
    assert_eq!(service.refresh_listings().await.unwrap(), 2);

    store.offline.store(true, Ordering::SeqCst);
    let result = service.search_listings(&FilterCriteria::default()).await;
    assert!(matches!(result, Err(RoomshareError::RemoteUnavailable(_))));

    let held = service.filter_snapshot(&FilterCriteria::default()).await;
    assert_eq!(held.len(), 2);

    store.offline.store(false, Ordering::SeqCst);
    assert_eq!(service.search_listings(&FilterCriteria::default()).await.unwrap().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_stalled_store_times_out() {
    let service = RoomshareService::new(
        StalledStore,
        InMemoryLogging::new(),
        InMemoryPreferenceStore::new(),
        ServiceOptions {
            store_timeout: Duration::from_secs(5),
            ..ServiceOptions::default()
        },
    );

    let result = service.search_listings(&FilterCriteria::default()).await;
    assert!(matches!(result, Err(RoomshareError::RemoteUnavailable(_))));

    let result = service.get_listing("anything").await;
    assert!(matches!(result, Err(RoomshareError::RemoteUnavailable(_))));
}

#[tokio::test]
async fn test_slow_refresh_does_not_replace_newer_snapshot() {
    let store = GatedStore::default();
    let service = RoomshareService::new(
        store.clone(),
        InMemoryLogging::new(),
        InMemoryPreferenceStore::new(),
        ServiceOptions::default(),
    );
    let owner = member("owner-1");
    service.create_listing(sample_draft("Downtown", 500.0), &owner).await.unwrap();

    store.gated.store(true, Ordering::SeqCst);
    let (slow, fast) = tokio::join!(service.refresh_listings(), async {
        store.entered.notified().await;
        service.create_listing(sample_draft("Uptown", 900.0), &owner).await.unwrap();
        let count = service.refresh_listings().await.unwrap();
        store.release.notify_one();
        count
    });

    assert_eq!(slow.unwrap(), 1);
    assert_eq!(fast, 2);
    assert_eq!(service.filter_snapshot(&FilterCriteria::default()).await.len(), 2);
}
