// Action names recorded in the application log.
pub const LISTING_CREATED: &str = "LISTING_CREATED";
pub const LISTING_UPDATED: &str = "LISTING_UPDATED";
pub const LISTING_DELETED: &str = "LISTING_DELETED";
pub const OWNER_VERIFIED: &str = "OWNER_VERIFIED";
pub const GROUP_CREATED: &str = "GROUP_CREATED";
pub const GROUP_DELETED: &str = "GROUP_DELETED";
pub const EXPENSE_ADDED: &str = "EXPENSE_ADDED";
pub const EXPENSE_UPDATED: &str = "EXPENSE_UPDATED";
pub const EXPENSE_PAID_TOGGLED: &str = "EXPENSE_PAID_TOGGLED";
pub const EXPENSE_DELETED: &str = "EXPENSE_DELETED";
pub const PROFILE_CREATED: &str = "PROFILE_CREATED";
pub const PROFILE_UPDATED: &str = "PROFILE_UPDATED";
pub const PREFERENCES_UPDATED: &str = "PREFERENCES_UPDATED";

pub const MIN_CAPACITY: u8 = 1;
pub const MAX_CAPACITY: u8 = 6;
pub const MIN_GROUP_SIZE: u8 = 2;
pub const MAX_GROUP_SIZE: u8 = 6;
pub const MIN_COMPATIBILITY_SCORE: u8 = 70;
pub const MAX_COMPATIBILITY_SCORE: u8 = 99;
