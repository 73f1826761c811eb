use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Record;
use crate::infrastructure::storage::Collection;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    /// Member the profile belongs to; only they may read or edit it.
    #[serde(default)]
    pub member_id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    /// "Student" or "Working Professional" on the sign-up form.
    #[serde(default)]
    pub user_type: Option<String>,
    #[serde(default)]
    pub smoking_preference: Option<String>,
    #[serde(default)]
    pub food_preference: Option<String>,
    #[serde(default)]
    pub social_habits: Option<String>,
    #[serde(default)]
    pub preferred_location: Option<String>,
    #[serde(default)]
    pub min_budget: Option<f64>,
    #[serde(default)]
    pub max_budget: Option<f64>,
}

impl Record for UserProfile {
    const COLLECTION: Collection = Collection::UserProfiles;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    pub full_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub user_type: Option<String>,
    pub smoking_preference: Option<String>,
    pub food_preference: Option<String>,
    pub social_habits: Option<String>,
    pub preferred_location: Option<String>,
    pub min_budget: Option<f64>,
    pub max_budget: Option<f64>,
}

impl ProfileDraft {
    pub fn into_profile(self, id: String, member_id: String) -> UserProfile {
        UserProfile {
            id,
            member_id,
            full_name: self.full_name,
            email: self.email,
            phone_number: self.phone_number,
            user_type: self.user_type,
            smoking_preference: self.smoking_preference,
            food_preference: self.food_preference,
            social_habits: self.social_habits,
            preferred_location: self.preferred_location,
            min_budget: self.min_budget,
            max_budget: self.max_budget,
        }
    }
}
