//! Occupancy and lease rules that tie a listing's fields together.

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::constants::{MAX_CAPACITY, MIN_CAPACITY};
use crate::core::currency::format_inr;
use crate::core::errors::RoomshareError;
use crate::core::models::listing::{
    FoodPreference, LeaseOption, Listing, ListingView, OccupancyType, OwnerContact, RoomType,
    SocialPreference, VerificationStatus,
};

/// Occupancy sub-state of a listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occupancy {
    FullyVacant,
    PartiallyOccupied { current_members: u8 },
}

impl Occupancy {
    pub fn of(listing: &Listing) -> Self {
        match listing.occupancy_type {
            OccupancyType::FullyVacant => Occupancy::FullyVacant,
            OccupancyType::PartiallyOccupied => Occupancy::PartiallyOccupied {
                current_members: listing.current_members,
            },
        }
    }

    /// Moves into (or within) the partially occupied state. A room whose
    /// members fill every slot is allowed; an empty one is not.
    pub fn occupy(self, current_members: u8, capacity: u8) -> Result<Self, RoomshareError> {
        if current_members == 0 {
            return Err(RoomshareError::invariant(
                "currentMembers",
                "A partially occupied room needs at least one current member",
            ));
        }
        if current_members > capacity {
            return Err(RoomshareError::invariant(
                "currentMembers",
                format!("Current members ({}) exceed capacity ({})", current_members, capacity),
            ));
        }
        Ok(Occupancy::PartiallyOccupied { current_members })
    }

    pub fn vacate(self) -> Self {
        Occupancy::FullyVacant
    }

    pub fn occupancy_type(&self) -> OccupancyType {
        match self {
            Occupancy::FullyVacant => OccupancyType::FullyVacant,
            Occupancy::PartiallyOccupied { .. } => OccupancyType::PartiallyOccupied,
        }
    }

    pub fn current_members(&self) -> u8 {
        match self {
            Occupancy::FullyVacant => 0,
            Occupancy::PartiallyOccupied { current_members } => *current_members,
        }
    }

    pub fn available_slots(&self, capacity: u8) -> u8 {
        available_slots(self.occupancy_type(), capacity, self.current_members())
    }

    pub fn apply_to(self, listing: &mut Listing) {
        listing.occupancy_type = self.occupancy_type();
        listing.current_members = self.current_members();
    }
}

/// Free places in a room. A fully vacant room offers its whole capacity
/// whatever `current_members` says.
pub fn available_slots(occupancy_type: OccupancyType, capacity: u8, current_members: u8) -> u8 {
    match occupancy_type {
        OccupancyType::PartiallyOccupied => capacity.saturating_sub(current_members),
        OccupancyType::FullyVacant => capacity,
    }
}

impl From<Listing> for ListingView {
    fn from(listing: Listing) -> Self {
        let available_slots = available_slots(listing.occupancy_type, listing.capacity, listing.current_members);
        let rent_display = format_inr(listing.monthly_rent);
        ListingView {
            listing,
            available_slots,
            rent_display,
        }
    }
}

/// Listing fields as entered on the list-a-room and edit-room forms.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingDraft {
    pub location: String,
    pub monthly_rent: Option<f64>,
    pub lease_amount: Option<f64>,
    pub room_type: Option<RoomType>,
    pub capacity: u8,
    #[schema(value_type = Option<String>, example = "2025-07-01")]
    pub availability_date: Option<NaiveDate>,
    pub lease_option: Option<LeaseOption>,
    #[serde(default)]
    pub description: String,
    pub room_image: Option<String>,
    #[serde(default)]
    pub is_student_friendly: bool,
    #[serde(default)]
    pub is_smoking_allowed: bool,
    pub food_preference: Option<FoodPreference>,
    pub social_preference: Option<SocialPreference>,
    #[serde(default)]
    pub occupancy_type: OccupancyType,
    pub current_members: Option<u8>,
    #[serde(default)]
    pub existing_members_preferences: String,
    #[serde(default)]
    pub owner_contact: OwnerContact,
}

impl ListingDraft {
    /// Builds the record to write, dropping values the selections make
    /// meaningless: a lease amount without a lease component, and current
    /// members on a fully vacant room.
    pub fn into_listing(self, id: String, owner_id: Option<String>) -> Listing {
        let keeps_lease = self.lease_option.is_some_and(|o| o.has_lease_component());
        let current_members = match self.occupancy_type {
            OccupancyType::PartiallyOccupied => self.current_members.unwrap_or(0),
            OccupancyType::FullyVacant => 0,
        };

        Listing {
            id,
            owner_id,
            location: self.location,
            monthly_rent: self.monthly_rent,
            lease_amount: self.lease_amount.filter(|_| keeps_lease),
            room_type: self.room_type,
            capacity: self.capacity,
            availability_date: self.availability_date,
            lease_option: self.lease_option,
            description: self.description,
            room_image: self.room_image,
            is_student_friendly: self.is_student_friendly,
            is_smoking_allowed: self.is_smoking_allowed,
            food_preference: self.food_preference,
            social_preference: self.social_preference,
            occupancy_type: self.occupancy_type,
            current_members,
            existing_members_preferences: self.existing_members_preferences,
            owner_verification_status: VerificationStatus::NotVerified,
            owner_verification_id: None,
            owner_contact: self.owner_contact,
        }
    }
}

fn check_amount(field: &str, amount: Option<f64>) -> Result<(), RoomshareError> {
    match amount {
        Some(a) if !a.is_finite() => Err(RoomshareError::invariant(field, "Amount must be a finite number")),
        Some(a) if a < 0.0 => Err(RoomshareError::invariant(field, "Amount cannot be negative")),
        _ => Ok(()),
    }
}

/// Rejects a listing whose fields contradict each other. Runs on every write.
pub fn validate_listing(listing: &Listing) -> Result<(), RoomshareError> {
    if listing.location.trim().is_empty() {
        return Err(RoomshareError::invalid_input(
            "location",
            "Invalid location",
            "location cannot be empty",
        ));
    }
    if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&listing.capacity) {
        return Err(RoomshareError::invariant(
            "capacity",
            format!("Capacity must be between {} and {}", MIN_CAPACITY, MAX_CAPACITY),
        ));
    }
    check_amount("monthlyRent", listing.monthly_rent)?;
    check_amount("leaseAmount", listing.lease_amount)?;

    let has_lease = listing.lease_option.is_some_and(|o| o.has_lease_component());
    if listing.lease_amount.is_some() && !has_lease {
        return Err(RoomshareError::invariant(
            "leaseAmount",
            "A lease amount is only allowed with the Lease only or Rent + Lease options",
        ));
    }

    match listing.occupancy_type {
        OccupancyType::FullyVacant if listing.current_members != 0 => Err(RoomshareError::invariant(
            "currentMembers",
            "A fully vacant room cannot have current members",
        )),
        OccupancyType::FullyVacant => Ok(()),
        OccupancyType::PartiallyOccupied => Occupancy::FullyVacant
            .occupy(listing.current_members, listing.capacity)
            .map(|_| ()),
    }
}
