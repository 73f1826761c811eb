use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Record;
use super::listing::FoodPreference;
use crate::infrastructure::storage::Collection;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoommateGroup {
    #[serde(rename = "_id")]
    pub id: String,
    pub group_name: String,
    pub group_size: u8,
    #[serde(default)]
    pub preferred_location: String,
    #[serde(default)]
    pub budget_range: String,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "2025-08-01")]
    pub move_in_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_student_group: bool,
    #[serde(default)]
    pub is_working_group: bool,
    #[serde(default)]
    pub is_smoking_allowed: bool,
    #[serde(default)]
    pub is_quiet_group: bool,
    #[serde(default)]
    pub food_preference: Option<FoodPreference>,
    #[serde(default)]
    pub group_description: String,
    /// Label drawn once at creation, never recomputed.
    pub compatibility_score: u8,
}

impl Record for RoommateGroup {
    const COLLECTION: Collection = Collection::RoommateGroups;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Fields of the create-group form.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupDraft {
    pub group_name: String,
    pub group_size: u8,
    pub preferred_location: String,
    #[serde(default)]
    pub budget_range: String,
    #[schema(value_type = Option<String>, example = "2025-08-01")]
    pub move_in_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_student_group: bool,
    #[serde(default)]
    pub is_working_group: bool,
    #[serde(default)]
    pub is_smoking_allowed: bool,
    #[serde(default)]
    pub is_quiet_group: bool,
    pub food_preference: Option<FoodPreference>,
    #[serde(default)]
    pub group_description: String,
}

impl GroupDraft {
    pub fn into_group(self, id: String, compatibility_score: u8) -> RoommateGroup {
        RoommateGroup {
            id,
            group_name: self.group_name,
            group_size: self.group_size,
            preferred_location: self.preferred_location,
            budget_range: self.budget_range,
            move_in_date: self.move_in_date,
            is_student_group: self.is_student_group,
            is_working_group: self.is_working_group,
            is_smoking_allowed: self.is_smoking_allowed,
            is_quiet_group: self.is_quiet_group,
            food_preference: self.food_preference,
            group_description: self.group_description,
            compatibility_score,
        }
    }
}
