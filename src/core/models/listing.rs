use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Record;
use crate::infrastructure::storage::Collection;

labelled_enum!(RoomType {
    Private => "Private",
    Shared => "Shared",
});

labelled_enum!(
    /// Whether a room is rented monthly, leased for a lump sum, or both.
    LeaseOption {
        RentOnly => "Rent only",
        LeaseOnly => "Lease only",
        RentAndLease => "Rent + Lease",
    }
);

impl LeaseOption {
    /// Only lease-bearing options carry a lease amount.
    pub fn has_lease_component(&self) -> bool {
        matches!(self, LeaseOption::LeaseOnly | LeaseOption::RentAndLease)
    }

    /// Maps the search form's payment-type selector onto a lease option.
    pub fn from_payment_type(value: &str) -> Option<Self> {
        match value {
            "Rent Only" => Some(LeaseOption::RentOnly),
            "Lease Only" => Some(LeaseOption::LeaseOnly),
            "Rent + Lease" => Some(LeaseOption::RentAndLease),
            _ => None,
        }
    }
}

labelled_enum!(FoodPreference {
    Vegetarian => "Vegetarian",
    NonVegetarian => "Non-Vegetarian",
    Vegan => "Vegan",
    Any => "Any",
});

labelled_enum!(
    /// Household temperament. Listings also use this field for the gender of
    /// the existing household (`Male`, `Female`, `Any`), which gender filtering reads.
    SocialPreference {
        Quiet => "Quiet",
        Social => "Social",
        Male => "Male",
        Female => "Female",
        Any => "Any",
    }
);

labelled_enum!(GenderPreference {
    Male => "Male",
    Female => "Female",
    Any => "Any",
});

labelled_enum!(OccupancyType {
    FullyVacant => "Fully Vacant",
    PartiallyOccupied => "Partially Occupied",
});

labelled_enum!(VerificationStatus {
    Verified => "Verified",
    NotVerified => "Not Verified",
});

impl Default for OccupancyType {
    fn default() -> Self {
        OccupancyType::FullyVacant
    }
}

impl Default for VerificationStatus {
    fn default() -> Self {
        VerificationStatus::NotVerified
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerContact {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// A room offered for rent, as persisted in the `listings` collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_owner", default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_rent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lease_amount: Option<f64>,
    #[serde(default)]
    pub room_type: Option<RoomType>,
    pub capacity: u8,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "2025-07-01")]
    pub availability_date: Option<NaiveDate>,
    #[serde(default)]
    pub lease_option: Option<LeaseOption>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_image: Option<String>,
    #[serde(default)]
    pub is_student_friendly: bool,
    #[serde(default)]
    pub is_smoking_allowed: bool,
    #[serde(default)]
    pub food_preference: Option<FoodPreference>,
    #[serde(default)]
    pub social_preference: Option<SocialPreference>,
    #[serde(default)]
    pub occupancy_type: OccupancyType,
    #[serde(default)]
    pub current_members: u8,
    #[serde(default)]
    pub existing_members_preferences: String,
    #[serde(default)]
    pub owner_verification_status: VerificationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_verification_id: Option<String>,
    #[serde(default)]
    pub owner_contact: OwnerContact,
}

impl Record for Listing {
    const COLLECTION: Collection = Collection::Listings;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Listing {
    pub fn is_owned_by(&self, member_id: &str) -> bool {
        self.owner_id.as_deref() == Some(member_id)
    }
}

/// A listing together with the values derived from it for display.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingView {
    #[serde(flatten)]
    pub listing: Listing,
    pub available_slots: u8,
    /// Monthly rent in rupees, e.g. `"₹12,500"`.
    pub rent_display: String,
}
