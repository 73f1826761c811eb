//! Narrowing a listing set down to the rooms a searcher asked for.
//!
//! Every criterion is optional and independent; a listing is kept when it
//! satisfies all supplied criteria. Filtering never fails: query values that
//! cannot be understood are treated as if they had not been supplied.

use log::debug;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

use crate::core::models::listing::{
    FoodPreference, GenderPreference, LeaseOption, Listing, RoomType, SocialPreference,
};

/// Search form values exactly as a client sends them.
#[derive(Clone, Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListingQuery {
    pub location: Option<String>,
    pub min_rent: Option<String>,
    pub max_rent: Option<String>,
    pub room_type: Option<String>,
    pub capacity: Option<String>,
    pub student_friendly: Option<String>,
    pub smoking_allowed: Option<String>,
    pub food_preference: Option<String>,
    pub social_preference: Option<String>,
    /// "Rent Only", "Lease Only" or "Rent + Lease"
    pub payment_type: Option<String>,
    /// "Male", "Female" or "Any"
    pub gender_preference: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub location: Option<String>,
    pub min_rent: Option<f64>,
    pub max_rent: Option<f64>,
    pub room_type: Option<RoomType>,
    pub capacity: Option<u8>,
    pub student_friendly: Option<bool>,
    pub smoking_allowed: Option<bool>,
    pub food_preference: Option<FoodPreference>,
    pub social_preference: Option<SocialPreference>,
    pub payment_type: Option<LeaseOption>,
    pub gender_preference: Option<GenderPreference>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_lenient<T: FromStr>(value: &Option<String>) -> Option<T> {
    non_empty(value).and_then(|v| v.parse().ok())
}

fn parse_amount(value: &Option<String>) -> Option<f64> {
    parse_lenient::<f64>(value).filter(|v| v.is_finite())
}

fn parse_flag(value: &Option<String>) -> Option<bool> {
    match non_empty(value) {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    }
}

impl From<&ListingQuery> for FilterCriteria {
    fn from(query: &ListingQuery) -> Self {
        let payment_type = non_empty(&query.payment_type)
            .and_then(|v| LeaseOption::from_payment_type(v).or_else(|| v.parse().ok()));

        FilterCriteria {
            location: non_empty(&query.location).map(str::to_string),
            min_rent: parse_amount(&query.min_rent),
            max_rent: parse_amount(&query.max_rent),
            room_type: parse_lenient(&query.room_type),
            capacity: parse_lenient(&query.capacity),
            student_friendly: parse_flag(&query.student_friendly),
            smoking_allowed: parse_flag(&query.smoking_allowed),
            food_preference: parse_lenient(&query.food_preference),
            social_preference: parse_lenient(&query.social_preference),
            payment_type,
            gender_preference: parse_lenient(&query.gender_preference).filter(|g| *g != GenderPreference::Any),
        }
    }
}

impl FilterCriteria {
    /// True when no criterion narrows the result. A gender preference of
    /// `Any` counts as unconstrained.
    pub fn is_empty(&self) -> bool {
        let unconstrained = FilterCriteria {
            gender_preference: self.gender_preference.filter(|g| *g != GenderPreference::Any),
            ..self.clone()
        };
        unconstrained == FilterCriteria::default()
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        self.matches_location(listing)
            && self.matches_rent(listing)
            && self.room_type.is_none_or(|t| listing.room_type == Some(t))
            && self.capacity.is_none_or(|c| listing.capacity == c)
            && self.student_friendly.is_none_or(|f| listing.is_student_friendly == f)
            && self.smoking_allowed.is_none_or(|f| listing.is_smoking_allowed == f)
            && self.food_preference.is_none_or(|p| listing.food_preference == Some(p))
            && self.social_preference.is_none_or(|p| listing.social_preference == Some(p))
            && self.payment_type.is_none_or(|o| listing.lease_option == Some(o))
            && self.matches_gender(listing)
    }

    fn matches_location(&self, listing: &Listing) -> bool {
        match &self.location {
            Some(needle) => listing.location.to_lowercase().contains(&needle.to_lowercase()),
            None => true,
        }
    }

    // A listing without a rent fails any bound that was asked for.
    fn matches_rent(&self, listing: &Listing) -> bool {
        if self.min_rent.is_none() && self.max_rent.is_none() {
            return true;
        }
        let Some(rent) = listing.monthly_rent else {
            return false;
        };
        self.min_rent.is_none_or(|min| rent >= min) && self.max_rent.is_none_or(|max| rent <= max)
    }

    fn matches_gender(&self, listing: &Listing) -> bool {
        let wanted = match self.gender_preference {
            Some(GenderPreference::Male) => SocialPreference::Male,
            Some(GenderPreference::Female) => SocialPreference::Female,
            Some(GenderPreference::Any) | None => return true,
        };
        matches!(listing.social_preference, Some(p) if p == wanted || p == SocialPreference::Any)
    }
}

/// Keeps the listings matching `criteria`, in their original order.
pub fn filter_listings(listings: &[Listing], criteria: &FilterCriteria) -> Vec<Listing> {
    let filtered: Vec<Listing> = listings.iter().filter(|l| criteria.matches(l)).cloned().collect();
    debug!("Filtered {} listings down to {}", listings.len(), filtered.len());
    filtered
}
