use crate::auth::{Member, Membership};
use crate::constants::{
    EXPENSE_ADDED, EXPENSE_DELETED, EXPENSE_PAID_TOGGLED, EXPENSE_UPDATED, GROUP_CREATED, GROUP_DELETED,
    LISTING_CREATED, LISTING_DELETED, LISTING_UPDATED, MAX_COMPATIBILITY_SCORE, MAX_GROUP_SIZE,
    MIN_COMPATIBILITY_SCORE, MIN_GROUP_SIZE, OWNER_VERIFIED, PREFERENCES_UPDATED, PROFILE_CREATED,
    PROFILE_UPDATED,
};
use crate::core::errors::RoomshareError;
use crate::core::filter::{FilterCriteria, filter_listings};
use crate::core::models::{
    Record,
    audit::AppLog,
    expense::{ExpenseDraft, ExpenseView, GroupExpense},
    group::{GroupDraft, RoommateGroup},
    listing::{Listing, ListingView, VerificationStatus},
    preferences::{AppSettings, Language, LifestylePreferences, Theme},
    profile::{ProfileDraft, UserProfile},
};
use crate::core::occupancy::{ListingDraft, validate_listing};
use crate::core::split::{format_share, per_member_share};
use crate::core::verification::DocumentType;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::preferences::{PreferenceStore, SettingChange, Settings};
use crate::infrastructure::storage::RecordStore;
use chrono::Utc;
use log::{debug, info, warn};
use serde_json::json;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{RwLock, broadcast};
use uuid::Uuid;

pub struct ServiceOptions {
    pub jwt_secret: String,
    /// Deadline for a single record-store call.
    pub store_timeout: Duration,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        ServiceOptions {
            jwt_secret: "secret".to_string(),
            store_timeout: Duration::from_secs(10),
        }
    }
}

/// Last complete fetch of the listings collection, tagged with the refresh
/// that produced it.
#[derive(Default)]
struct ListingSnapshot {
    generation: u64,
    listings: Vec<Listing>,
}

/// Application layer behind the marketplace screens: listings, roommate
/// groups, their expenses, profiles and client preferences.
pub struct RoomshareService<L: LoggingService, S: RecordStore, P: PreferenceStore> {
    storage: S,
    logging: L,
    settings: Settings<P>,
    membership: Membership,
    store_timeout: Duration,
    listings: RwLock<ListingSnapshot>,
    refresh_generation: AtomicU64,
}

fn compatibility_score() -> u8 {
    let span = (MAX_COMPATIBILITY_SCORE - MIN_COMPATIBILITY_SCORE + 1) as u128;
    MIN_COMPATIBILITY_SCORE + (Uuid::new_v4().as_u128() % span) as u8
}

fn decode<T: Record>(value: serde_json::Value) -> Result<T, RoomshareError> {
    serde_json::from_value(value)
        .map_err(|e| RoomshareError::StorageError(format!("Malformed {} record: {}", T::COLLECTION, e)))
}

fn encode<T: Record>(record: &T) -> Result<serde_json::Value, RoomshareError> {
    serde_json::to_value(record)
        .map_err(|e| RoomshareError::InternalServerError(format!("Failed to serialize record: {}", e)))
}

impl<L: LoggingService, S: RecordStore, P: PreferenceStore> RoomshareService<L, S, P> {
    pub fn new(storage: S, logging: L, preferences: P, options: ServiceOptions) -> Self {
        info!("Initializing RoomshareService");
        RoomshareService {
            storage,
            logging,
            settings: Settings::new(preferences),
            membership: Membership::new(options.jwt_secret),
            store_timeout: options.store_timeout,
            listings: RwLock::new(ListingSnapshot::default()),
            refresh_generation: AtomicU64::new(0),
        }
    }

    // RECORD STORE ACCESS

    async fn store_call<T>(
        &self,
        what: &str,
        call: impl Future<Output = Result<T, RoomshareError>>,
    ) -> Result<T, RoomshareError> {
        match tokio::time::timeout(self.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Record store call `{}` timed out after {:?}", what, self.store_timeout);
                Err(RoomshareError::RemoteUnavailable(format!(
                    "{} timed out after {:?}",
                    what, self.store_timeout
                )))
            }
        }
    }

    /// Records that fail to decode are skipped so one bad row cannot hide a collection.
    async fn fetch_all<T: Record>(&self) -> Result<Vec<T>, RoomshareError> {
        let values = self
            .store_call("list", self.storage.list(T::COLLECTION))
            .await?;
        Ok(values
            .into_iter()
            .filter_map(|v| match decode::<T>(v) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping record: {}", e);
                    None
                }
            })
            .collect())
    }

    async fn fetch_one<T: Record>(&self, id: &str) -> Result<Option<T>, RoomshareError> {
        self.store_call("getById", self.storage.get_by_id(T::COLLECTION, id))
            .await?
            .map(decode::<T>)
            .transpose()
    }

    async fn insert<T: Record>(&self, record: &T) -> Result<(), RoomshareError> {
        let value = encode(record)?;
        self.store_call("create", self.storage.create(T::COLLECTION, value))
            .await?;
        Ok(())
    }

    async fn replace<T: Record>(&self, record: &T) -> Result<(), RoomshareError> {
        let value = encode(record)?;
        self.store_call("update", self.storage.update(T::COLLECTION, value))
            .await?;
        Ok(())
    }

    async fn remove<T: Record>(&self, id: &str) -> Result<(), RoomshareError> {
        self.store_call("delete", self.storage.delete(T::COLLECTION, id))
            .await
    }

    async fn log_action(
        &self,
        action: &str,
        details: serde_json::Value,
        user_id: Option<&str>,
    ) -> Result<(), RoomshareError> {
        debug!("{} by {:?}: {}", action, user_id, details);
        self.logging.log_action(action, details, user_id).await
    }

    fn validate_string_input(&self, field: &str, value: &str, max_length: usize) -> Result<(), RoomshareError> {
        if value.trim().is_empty() {
            return Err(RoomshareError::invalid_input(
                field,
                format!("Invalid {}", field),
                format!("{} cannot be empty", field),
            ));
        }
        if value.len() > max_length {
            return Err(RoomshareError::invalid_input(
                field,
                format!("{} Too Long", field),
                format!("{} cannot exceed {} characters", field, max_length),
            ));
        }
        if value.chars().any(|c| c.is_control() || "<>{}[]".contains(c)) {
            return Err(RoomshareError::invalid_input(
                field,
                format!("Invalid {}", field),
                format!("{} contains invalid characters", field),
            ));
        }
        Ok(())
    }

    fn validate_amount_input(&self, field: &str, amount: f64) -> Result<(), RoomshareError> {
        if !amount.is_finite() {
            return Err(RoomshareError::invalid_input(
                field,
                "Invalid Amount",
                "Amount must be a finite number",
            ));
        }
        if amount < 0.0 {
            return Err(RoomshareError::invalid_input(
                field,
                "Invalid Amount",
                "Amount cannot be negative",
            ));
        }
        Ok(())
    }

    // MEMBERSHIP

    pub fn login(&self, member_id: &str, email: &str) -> Result<String, RoomshareError> {
        self.membership.login(member_id, email)
    }

    pub async fn logout(&self, token: &str) -> Result<(), RoomshareError> {
        self.membership.logout(token).await
    }

    pub async fn current_member(&self, token: &str) -> Result<Member, RoomshareError> {
        self.membership.current_member(token).await
    }

    pub async fn is_authenticated(&self, token: &str) -> bool {
        self.membership.is_authenticated(token).await
    }

    // LISTINGS

    /// Replaces the held listing set with a fresh full fetch. On failure the
    /// previous set is kept untouched.
    pub async fn refresh_listings(&self) -> Result<usize, RoomshareError> {
        let generation = self.refresh_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let fetched = self.fetch_all::<Listing>().await?;
        let count = fetched.len();

        // A slower, older refresh must not replace a newer snapshot.
        let mut snapshot = self.listings.write().await;
        if generation > snapshot.generation {
            *snapshot = ListingSnapshot {
                generation,
                listings: fetched,
            };
            debug!("Listing snapshot refreshed with {} listings", count);
        } else {
            debug!("Discarding listing fetch {} older than snapshot {}", generation, snapshot.generation);
        }
        Ok(count)
    }

    /// Filters the held listing set without touching the record store.
    pub async fn filter_snapshot(&self, criteria: &FilterCriteria) -> Vec<ListingView> {
        let snapshot = self.listings.read().await;
        filter_listings(&snapshot.listings, criteria)
            .into_iter()
            .map(ListingView::from)
            .collect()
    }

    pub async fn search_listings(&self, criteria: &FilterCriteria) -> Result<Vec<ListingView>, RoomshareError> {
        self.refresh_listings().await?;
        Ok(self.filter_snapshot(criteria).await)
    }

    async fn require_listing(&self, listing_id: &str) -> Result<Listing, RoomshareError> {
        self.fetch_one::<Listing>(listing_id)
            .await?
            .ok_or_else(|| RoomshareError::ListingNotFound(listing_id.to_string()))
    }

    async fn require_owned_listing(&self, listing_id: &str, member: &Member) -> Result<Listing, RoomshareError> {
        let listing = self.require_listing(listing_id).await?;
        if !listing.is_owned_by(&member.id) {
            return Err(RoomshareError::NotListingOwner(member.id.clone()));
        }
        Ok(listing)
    }

    pub async fn get_listing(&self, listing_id: &str) -> Result<ListingView, RoomshareError> {
        Ok(self.require_listing(listing_id).await?.into())
    }

    pub async fn owner_listings(&self, member: &Member) -> Result<Vec<ListingView>, RoomshareError> {
        Ok(self
            .fetch_all::<Listing>()
            .await?
            .into_iter()
            .filter(|l| l.is_owned_by(&member.id))
            .map(ListingView::from)
            .collect())
    }

    pub async fn create_listing(&self, draft: ListingDraft, member: &Member) -> Result<Listing, RoomshareError> {
        self.validate_string_input("location", &draft.location, 200)?;
        let listing = draft.into_listing(Uuid::new_v4().to_string(), Some(member.id.clone()));
        validate_listing(&listing)?;
        self.insert(&listing).await?;
        info!("Listing {} created by {}", listing.id, member.id);

        self.log_action(
            LISTING_CREATED,
            json!({ "listing_id": listing.id, "location": listing.location, "capacity": listing.capacity }),
            Some(&member.id),
        )
        .await?;
        Ok(listing)
    }

    /// Replaces a listing with the edited form values. Identity, owner,
    /// verification and image carry over from the stored record.
    pub async fn update_listing(
        &self,
        listing_id: &str,
        draft: ListingDraft,
        member: &Member,
    ) -> Result<Listing, RoomshareError> {
        let existing = self.require_owned_listing(listing_id, member).await?;
        self.validate_string_input("location", &draft.location, 200)?;

        let mut listing = draft.into_listing(existing.id.clone(), existing.owner_id.clone());
        listing.owner_verification_status = existing.owner_verification_status;
        listing.owner_verification_id = existing.owner_verification_id;
        if listing.room_image.is_none() {
            listing.room_image = existing.room_image;
        }
        validate_listing(&listing)?;
        self.replace(&listing).await?;

        self.log_action(
            LISTING_UPDATED,
            json!({ "listing_id": listing.id, "occupancy_type": listing.occupancy_type }),
            Some(&member.id),
        )
        .await?;
        Ok(listing)
    }

    pub async fn delete_listing(&self, listing_id: &str, member: &Member) -> Result<(), RoomshareError> {
        let listing = self.require_owned_listing(listing_id, member).await?;
        self.remove::<Listing>(&listing.id).await?;

        self.log_action(
            LISTING_DELETED,
            json!({ "listing_id": listing.id, "location": listing.location }),
            Some(&member.id),
        )
        .await?;
        Ok(())
    }

    /// Marks the owner as verified once the document number has the right
    /// shape. The number is stored as entered.
    pub async fn verify_listing_owner(
        &self,
        listing_id: &str,
        document_type: DocumentType,
        document_number: &str,
        member: &Member,
    ) -> Result<Listing, RoomshareError> {
        let mut listing = self.require_owned_listing(listing_id, member).await?;
        document_type.validate(document_number)?;

        listing.owner_verification_status = VerificationStatus::Verified;
        listing.owner_verification_id = Some(document_number.to_string());
        validate_listing(&listing)?;
        self.replace(&listing).await?;

        self.log_action(
            OWNER_VERIFIED,
            json!({ "listing_id": listing.id, "document_type": document_type }),
            Some(&member.id),
        )
        .await?;
        Ok(listing)
    }

    // ROOMMATE GROUPS

    pub async fn create_group(&self, draft: GroupDraft, member: &Member) -> Result<RoommateGroup, RoomshareError> {
        self.validate_string_input("groupName", &draft.group_name, 100)?;
        self.validate_string_input("preferredLocation", &draft.preferred_location, 200)?;
        if !(MIN_GROUP_SIZE..=MAX_GROUP_SIZE).contains(&draft.group_size) {
            return Err(RoomshareError::invalid_input(
                "groupSize",
                "Invalid group size",
                format!("Group size must be between {} and {}", MIN_GROUP_SIZE, MAX_GROUP_SIZE),
            ));
        }

        let group = draft.into_group(Uuid::new_v4().to_string(), compatibility_score());
        self.insert(&group).await?;

        self.log_action(
            GROUP_CREATED,
            json!({ "group_id": group.id, "name": group.group_name, "size": group.group_size }),
            Some(&member.id),
        )
        .await?;
        Ok(group)
    }

    pub async fn list_groups(&self) -> Result<Vec<RoommateGroup>, RoomshareError> {
        self.fetch_all::<RoommateGroup>().await
    }

    pub async fn get_group(&self, group_id: &str) -> Result<RoommateGroup, RoomshareError> {
        self.fetch_one::<RoommateGroup>(group_id)
            .await?
            .ok_or_else(|| RoomshareError::GroupNotFound(group_id.to_string()))
    }

    /// Expenses recorded for the group are left in place.
    pub async fn delete_group(&self, group_id: &str, member: &Member) -> Result<(), RoomshareError> {
        let group = self.get_group(group_id).await?;
        self.remove::<RoommateGroup>(&group.id).await?;

        self.log_action(
            GROUP_DELETED,
            json!({ "group_id": group.id, "name": group.group_name }),
            Some(&member.id),
        )
        .await?;
        Ok(())
    }

    // GROUP EXPENSES

    pub async fn list_group_expenses(&self, group_id: &str) -> Result<Vec<ExpenseView>, RoomshareError> {
        let (group, expenses) = futures::try_join!(self.get_group(group_id), self.fetch_all::<GroupExpense>())?;

        expenses
            .into_iter()
            .filter(|e| e.group_id == group.id)
            .map(|expense| {
                let share = per_member_share(expense.total_amount, group.group_size as i64)?;
                Ok(ExpenseView {
                    expense,
                    per_member_share: share,
                    per_member_share_display: format_share(share),
                })
            })
            .collect()
    }

    async fn require_expense(&self, expense_id: &str) -> Result<GroupExpense, RoomshareError> {
        self.fetch_one::<GroupExpense>(expense_id)
            .await?
            .ok_or_else(|| RoomshareError::ExpenseNotFound(expense_id.to_string()))
    }

    fn validate_expense_draft(&self, draft: &ExpenseDraft) -> Result<(), RoomshareError> {
        self.validate_string_input("title", &draft.title, 100)?;
        self.validate_amount_input("totalAmount", draft.total_amount)
    }

    pub async fn add_expense(
        &self,
        group_id: &str,
        draft: ExpenseDraft,
        member: &Member,
    ) -> Result<GroupExpense, RoomshareError> {
        self.validate_expense_draft(&draft)?;
        let now = Utc::now();
        let expense = GroupExpense {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            total_amount: draft.total_amount,
            expense_month: draft.expense_month.unwrap_or_else(|| now.date_naive()),
            group_id: group_id.to_string(),
            is_paid: false,
            created_at: now,
        };
        self.insert(&expense).await?;

        self.log_action(
            EXPENSE_ADDED,
            json!({ "expense_id": expense.id, "group_id": group_id, "amount": expense.total_amount }),
            Some(&member.id),
        )
        .await?;
        Ok(expense)
    }

    pub async fn update_expense(
        &self,
        expense_id: &str,
        draft: ExpenseDraft,
        member: &Member,
    ) -> Result<GroupExpense, RoomshareError> {
        self.validate_expense_draft(&draft)?;
        let mut expense = self.require_expense(expense_id).await?;
        expense.title = draft.title;
        expense.total_amount = draft.total_amount;
        if let Some(month) = draft.expense_month {
            expense.expense_month = month;
        }
        self.replace(&expense).await?;

        self.log_action(
            EXPENSE_UPDATED,
            json!({ "expense_id": expense.id, "amount": expense.total_amount }),
            Some(&member.id),
        )
        .await?;
        Ok(expense)
    }

    pub async fn set_expense_paid(
        &self,
        expense_id: &str,
        is_paid: bool,
        member: &Member,
    ) -> Result<GroupExpense, RoomshareError> {
        let mut expense = self.require_expense(expense_id).await?;
        expense.is_paid = is_paid;
        self.replace(&expense).await?;

        self.log_action(
            EXPENSE_PAID_TOGGLED,
            json!({ "expense_id": expense.id, "is_paid": is_paid }),
            Some(&member.id),
        )
        .await?;
        Ok(expense)
    }

    pub async fn delete_expense(&self, expense_id: &str, member: &Member) -> Result<(), RoomshareError> {
        let expense = self.require_expense(expense_id).await?;
        self.remove::<GroupExpense>(&expense.id).await?;

        self.log_action(
            EXPENSE_DELETED,
            json!({ "expense_id": expense.id, "group_id": expense.group_id }),
            Some(&member.id),
        )
        .await?;
        Ok(())
    }

    // USER PROFILES

    fn validate_profile_draft(&self, draft: &ProfileDraft) -> Result<(), RoomshareError> {
        if draft.email.is_empty() {
            return Err(RoomshareError::invalid_input("email", "Missing email", "Email is required"));
        }
        if !draft.email.contains('@') || !draft.email.contains('.') || draft.email.len() < 5 {
            return Err(RoomshareError::InvalidEmail(draft.email.clone()));
        }
        self.validate_string_input("fullName", &draft.full_name, 100)?;
        for (field, amount) in [("minBudget", draft.min_budget), ("maxBudget", draft.max_budget)] {
            if let Some(a) = amount {
                self.validate_amount_input(field, a)?;
            }
        }
        if let (Some(min), Some(max)) = (draft.min_budget, draft.max_budget) {
            if min > max {
                return Err(RoomshareError::invalid_input(
                    "minBudget",
                    "Invalid budget",
                    "Minimum budget cannot exceed maximum budget",
                ));
            }
        }
        Ok(())
    }

    pub async fn create_profile(&self, draft: ProfileDraft, member: &Member) -> Result<UserProfile, RoomshareError> {
        self.validate_profile_draft(&draft)?;
        let existing = self.fetch_all::<UserProfile>().await?;
        if existing.iter().any(|p| p.email.eq_ignore_ascii_case(&draft.email)) {
            return Err(RoomshareError::EmailAlreadyRegistered(draft.email));
        }

        let profile = draft.into_profile(Uuid::new_v4().to_string(), member.id.clone());
        self.insert(&profile).await?;

        self.log_action(
            PROFILE_CREATED,
            json!({ "profile_id": profile.id, "email": profile.email }),
            Some(&member.id),
        )
        .await?;
        Ok(profile)
    }

    async fn require_owned_profile(&self, profile_id: &str, member: &Member) -> Result<UserProfile, RoomshareError> {
        let profile = self
            .fetch_one::<UserProfile>(profile_id)
            .await?
            .ok_or_else(|| RoomshareError::ProfileNotFound(profile_id.to_string()))?;
        if profile.member_id != member.id {
            return Err(RoomshareError::NotProfileOwner(member.id.clone()));
        }
        Ok(profile)
    }

    pub async fn get_profile(&self, profile_id: &str, member: &Member) -> Result<UserProfile, RoomshareError> {
        self.require_owned_profile(profile_id, member).await
    }

    pub async fn update_profile(
        &self,
        profile_id: &str,
        draft: ProfileDraft,
        member: &Member,
    ) -> Result<UserProfile, RoomshareError> {
        self.validate_profile_draft(&draft)?;
        let existing = self.require_owned_profile(profile_id, member).await?;
        let taken = self
            .fetch_all::<UserProfile>()
            .await?
            .iter()
            .any(|p| p.id != existing.id && p.email.eq_ignore_ascii_case(&draft.email));
        if taken {
            return Err(RoomshareError::EmailAlreadyRegistered(draft.email));
        }

        let profile = draft.into_profile(existing.id, existing.member_id);
        self.replace(&profile).await?;

        self.log_action(PROFILE_UPDATED, json!({ "profile_id": profile.id }), Some(&member.id))
            .await?;
        Ok(profile)
    }

    // CLIENT PREFERENCES

    pub async fn lifestyle_preferences(&self, member: &Member) -> Result<LifestylePreferences, RoomshareError> {
        self.settings.lifestyle(&member.id).await
    }

    pub async fn update_lifestyle_preferences(
        &self,
        member: &Member,
        prefs: LifestylePreferences,
    ) -> Result<LifestylePreferences, RoomshareError> {
        self.settings.set_lifestyle(&member.id, &prefs).await?;
        self.log_action(PREFERENCES_UPDATED, json!({ "member_id": member.id }), Some(&member.id))
            .await?;
        Ok(prefs)
    }

    pub async fn settings(&self, member: &Member) -> Result<AppSettings, RoomshareError> {
        self.settings.current(&member.id).await
    }

    pub async fn update_settings(
        &self,
        member: &Member,
        theme: Option<Theme>,
        language: Option<Language>,
    ) -> Result<AppSettings, RoomshareError> {
        if let Some(theme) = theme {
            self.settings.set_theme(&member.id, theme).await?;
        }
        if let Some(language) = language {
            self.settings.set_language(&member.id, language).await?;
        }
        self.settings.current(&member.id).await
    }

    pub async fn toggle_theme(&self, member: &Member) -> Result<Theme, RoomshareError> {
        self.settings.toggle_theme(&member.id).await
    }

    pub async fn toggle_language(&self, member: &Member) -> Result<Language, RoomshareError> {
        self.settings.toggle_language(&member.id).await
    }

    pub fn subscribe_settings(&self) -> broadcast::Receiver<SettingChange> {
        self.settings.subscribe()
    }

    // APPLICATION LOG

    pub async fn get_app_logs(&self) -> Result<Vec<AppLog>, RoomshareError> {
        self.logging.get_logs().await
    }

    pub async fn get_member_logs(&self, member: &Member) -> Result<Vec<AppLog>, RoomshareError> {
        self.logging.get_user_logs(&member.id).await
    }
}
