use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Record;
use crate::infrastructure::storage::Collection;

/// A monthly bill shared by a roommate group. `group_id` is not checked
/// against existing groups and survives the group's deletion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupExpense {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub total_amount: f64,
    #[schema(value_type = String, example = "2025-06-01")]
    pub expense_month: NaiveDate,
    pub group_id: String,
    #[serde(default)]
    pub is_paid: bool,
    #[schema(value_type = String, example = "2025-06-01T12:34:56Z")]
    pub created_at: DateTime<Utc>,
}

impl Record for GroupExpense {
    const COLLECTION: Collection = Collection::GroupExpenses;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseView {
    #[serde(flatten)]
    pub expense: GroupExpense,
    pub per_member_share: f64,
    /// Share rendered with two decimals, e.g. `"33.33"`.
    pub per_member_share_display: String,
}

/// Fields of the add/edit expense form. The month defaults to today.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDraft {
    pub title: String,
    pub total_amount: f64,
    #[schema(value_type = Option<String>, example = "2025-06-01")]
    pub expense_month: Option<NaiveDate>,
}
