mod group_tests;
mod listing_tests;
mod split_tests;
mod verification_tests;

use crate::auth::Member;
use crate::core::models::listing::{Listing, OccupancyType, OwnerContact, VerificationStatus};
use crate::core::occupancy::ListingDraft;
use crate::core::services::{RoomshareService, ServiceOptions};
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::preferences::in_memory::InMemoryPreferenceStore;
use crate::infrastructure::storage::in_memory::InMemoryRecordStore;

pub type TestService = RoomshareService<InMemoryLogging, InMemoryRecordStore, InMemoryPreferenceStore>;

pub fn create_test_service() -> TestService {
    let _ = env_logger::try_init();
    RoomshareService::new(
        InMemoryRecordStore::new(),
        InMemoryLogging::new(),
        InMemoryPreferenceStore::new(),
        ServiceOptions::default(),
    )
}

pub fn member(id: &str) -> Member {
    Member {
        id: id.to_string(),
        email: format!("{}@example.com", id),
    }
}

/// A vacant two-person room; tests adjust the fields they care about.
pub fn sample_listing(id: &str) -> Listing {
    Listing {
        id: id.to_string(),
        owner_id: None,
        location: "Downtown".to_string(),
        monthly_rent: Some(500.0),
        lease_amount: None,
        room_type: None,
        capacity: 2,
        availability_date: None,
        lease_option: None,
        description: String::new(),
        room_image: None,
        is_student_friendly: false,
        is_smoking_allowed: false,
        food_preference: None,
        social_preference: None,
        occupancy_type: OccupancyType::FullyVacant,
        current_members: 0,
        existing_members_preferences: String::new(),
        owner_verification_status: VerificationStatus::NotVerified,
        owner_verification_id: None,
        owner_contact: OwnerContact::default(),
    }
}

pub fn sample_draft(location: &str, rent: f64) -> ListingDraft {
    ListingDraft {
        location: location.to_string(),
        monthly_rent: Some(rent),
        capacity: 3,
        ..ListingDraft::default()
    }
}
