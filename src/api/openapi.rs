use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::{
    api::models::{
        ErrorResponse, LoginRequest, LoginResponse, SetExpensePaidRequest, UpdateSettingsRequest,
        VerifyOwnerRequest,
    },
    auth::Member,
    core::{
        filter::{FilterCriteria, ListingQuery},
        models::{
            audit::AppLog,
            expense::{ExpenseDraft, ExpenseView, GroupExpense},
            group::{GroupDraft, RoommateGroup},
            listing::{
                FoodPreference, GenderPreference, LeaseOption, Listing, ListingView, OccupancyType,
                OwnerContact, RoomType, SocialPreference, VerificationStatus,
            },
            preferences::{AppSettings, Language, LifestylePreferences, Theme},
            profile::{ProfileDraft, UserProfile},
        },
        occupancy::ListingDraft,
        verification::DocumentType,
    },
};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "Bearer",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::health,
        super::handlers::login,
        super::handlers::logout,
        super::handlers::search_listings,
        super::handlers::get_listing,
        super::handlers::create_listing,
        super::handlers::update_listing,
        super::handlers::delete_listing,
        super::handlers::owner_listings,
        super::handlers::verify_owner,
        super::handlers::list_groups,
        super::handlers::get_group,
        super::handlers::create_group,
        super::handlers::delete_group,
        super::handlers::list_group_expenses,
        super::handlers::add_expense,
        super::handlers::update_expense,
        super::handlers::set_expense_paid,
        super::handlers::delete_expense,
        super::handlers::create_profile,
        super::handlers::get_profile,
        super::handlers::update_profile,
        super::handlers::get_lifestyle,
        super::handlers::update_lifestyle,
        super::handlers::get_settings,
        super::handlers::update_settings,
        super::handlers::get_app_logs
    ),
    components(schemas(
        LoginRequest,
        LoginResponse,
        VerifyOwnerRequest,
        SetExpensePaidRequest,
        UpdateSettingsRequest,
        ErrorResponse,
        Member,
        ListingQuery,
        FilterCriteria,
        Listing,
        ListingView,
        ListingDraft,
        OwnerContact,
        RoomType,
        LeaseOption,
        FoodPreference,
        SocialPreference,
        GenderPreference,
        OccupancyType,
        VerificationStatus,
        DocumentType,
        RoommateGroup,
        GroupDraft,
        GroupExpense,
        ExpenseDraft,
        ExpenseView,
        UserProfile,
        ProfileDraft,
        AppSettings,
        Theme,
        Language,
        LifestylePreferences,
        AppLog
    )),
    modifiers(&BearerAuth),
    info(
        title = "Roomshare API",
        description = "Room listings, roommate groups and shared expenses",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
