use crate::{
    api::models::*,
    auth::Member,
    core::{
        errors::RoomshareError,
        filter::{FilterCriteria, ListingQuery},
        models::{
            audit::AppLog,
            expense::{ExpenseDraft, ExpenseView, GroupExpense},
            group::{GroupDraft, RoommateGroup},
            listing::{Listing, ListingView},
            preferences::{AppSettings, LifestylePreferences},
            profile::{ProfileDraft, UserProfile},
        },
        occupancy::ListingDraft,
        services::RoomshareService,
    },
    infrastructure::{
        logging::in_memory::InMemoryLogging, preferences::in_memory::InMemoryPreferenceStore,
        storage::in_memory::InMemoryRecordStore,
    },
};
use axum::{
    Extension, Json, Router,
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use http::header;

use std::sync::Arc;

pub type AppService = RoomshareService<InMemoryLogging, InMemoryRecordStore, InMemoryPreferenceStore>;
type SharedService = Arc<AppService>;

/// Bearer token of the current request, kept for logout.
#[derive(Clone)]
pub struct SessionToken(pub String);

// Middleware resolving the bearer token to the signed-in member
async fn auth_middleware(
    State(service): State<SharedService>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| RoomshareError::Unauthenticated("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| RoomshareError::Unauthenticated("Invalid Authorization header".to_string()))?
        .to_string();

    let member = service.current_member(&token).await?;
    req.extensions_mut().insert(member);
    req.extensions_mut().insert(SessionToken(token));
    Ok(next.run(req).await)
}

// Define API routes
pub fn api_routes(service: SharedService) -> Router {
    let protected_routes = Router::new()
        .route("/logout", post(logout))
        .route("/listings", post(create_listing))
        .route("/listings/{listing_id}", put(update_listing).delete(delete_listing))
        .route("/listings/{listing_id}/verification", post(verify_owner))
        .route("/owner/listings", get(owner_listings))
        .route("/groups", post(create_group))
        .route("/groups/{group_id}", delete(delete_group))
        .route("/groups/{group_id}/expenses", get(list_group_expenses).post(add_expense))
        .route("/expenses/{expense_id}", put(update_expense).delete(delete_expense))
        .route("/expenses/{expense_id}/paid", post(set_expense_paid))
        .route("/profiles", post(create_profile))
        .route("/profiles/{profile_id}", get(get_profile).put(update_profile))
        .route("/preferences/lifestyle", get(get_lifestyle).put(update_lifestyle))
        .route("/settings", get(get_settings).put(update_settings))
        .route("/logs", get(get_app_logs))
        .route_layer(middleware::from_fn_with_state(service.clone(), auth_middleware));

    Router::new()
        .route("/health", get(health))
        .route("/login", post(login))
        .route("/listings", get(search_listings))
        .route("/listings/{listing_id}", get(get_listing))
        .route("/groups", get(list_groups))
        .route("/groups/{group_id}", get(get_group))
        .merge(protected_routes)
        .with_state(service)
}

#[utoipa::path(get, path = "/api/health", responses((status = 200, description = "Service is up")))]
async fn health() -> &'static str {
    "OK"
}

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session started", body = LoginResponse),
        (status = 401, description = "Missing member id", body = ErrorResponse)
    )
)]
async fn login(
    State(service): State<SharedService>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let token = service.login(&req.member_id, &req.email)?;
    Ok(Json(LoginResponse { token }))
}

#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 204, description = "Session ended"),
        (status = 401, description = "Not signed in", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn logout(
    State(service): State<SharedService>,
    Extension(token): Extension<SessionToken>,
) -> Result<StatusCode, ApiError> {
    service.logout(&token.0).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/listings",
    params(ListingQuery),
    responses(
        (status = 200, description = "Listings matching every supplied filter", body = Vec<ListingView>),
        (status = 503, description = "Record store unavailable", body = ErrorResponse)
    )
)]
async fn search_listings(
    State(service): State<SharedService>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<Vec<ListingView>>, ApiError> {
    let criteria = FilterCriteria::from(&query);
    let listings = service.search_listings(&criteria).await?;
    Ok(Json(listings))
}

#[utoipa::path(
    get,
    path = "/api/listings/{listing_id}",
    params(("listing_id" = String, Path, description = "ID of the listing")),
    responses(
        (status = 200, description = "Listing with derived fields", body = ListingView),
        (status = 404, description = "Listing not found", body = ErrorResponse)
    )
)]
async fn get_listing(
    State(service): State<SharedService>,
    Path(listing_id): Path<String>,
) -> Result<Json<ListingView>, ApiError> {
    Ok(Json(service.get_listing(&listing_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/listings",
    request_body = ListingDraft,
    responses(
        (status = 201, description = "Listing created", body = Listing),
        (status = 400, description = "Invalid listing", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn create_listing(
    State(service): State<SharedService>,
    Extension(member): Extension<Member>,
    Json(draft): Json<ListingDraft>,
) -> Result<(StatusCode, Json<Listing>), ApiError> {
    let listing = service.create_listing(draft, &member).await?;
    Ok((StatusCode::CREATED, Json(listing)))
}

#[utoipa::path(
    put,
    path = "/api/listings/{listing_id}",
    params(("listing_id" = String, Path, description = "ID of the listing")),
    request_body = ListingDraft,
    responses(
        (status = 200, description = "Listing replaced", body = Listing),
        (status = 400, description = "Invalid listing", body = ErrorResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Listing not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn update_listing(
    State(service): State<SharedService>,
    Extension(member): Extension<Member>,
    Path(listing_id): Path<String>,
    Json(draft): Json<ListingDraft>,
) -> Result<Json<Listing>, ApiError> {
    Ok(Json(service.update_listing(&listing_id, draft, &member).await?))
}

#[utoipa::path(
    delete,
    path = "/api/listings/{listing_id}",
    params(("listing_id" = String, Path, description = "ID of the listing")),
    responses(
        (status = 204, description = "Listing deleted"),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Listing not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn delete_listing(
    State(service): State<SharedService>,
    Extension(member): Extension<Member>,
    Path(listing_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.delete_listing(&listing_id, &member).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/owner/listings",
    responses((status = 200, description = "Listings owned by the caller", body = Vec<ListingView>)),
    security(("Bearer" = []))
)]
async fn owner_listings(
    State(service): State<SharedService>,
    Extension(member): Extension<Member>,
) -> Result<Json<Vec<ListingView>>, ApiError> {
    Ok(Json(service.owner_listings(&member).await?))
}

#[utoipa::path(
    post,
    path = "/api/listings/{listing_id}/verification",
    params(("listing_id" = String, Path, description = "ID of the listing")),
    request_body = VerifyOwnerRequest,
    responses(
        (status = 200, description = "Owner marked as verified", body = Listing),
        (status = 400, description = "Document number has the wrong format", body = ErrorResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn verify_owner(
    State(service): State<SharedService>,
    Extension(member): Extension<Member>,
    Path(listing_id): Path<String>,
    Json(req): Json<VerifyOwnerRequest>,
) -> Result<Json<Listing>, ApiError> {
    let listing = service
        .verify_listing_owner(&listing_id, req.document_type, &req.document_number, &member)
        .await?;
    Ok(Json(listing))
}

#[utoipa::path(
    get,
    path = "/api/groups",
    responses((status = 200, description = "All roommate groups", body = Vec<RoommateGroup>))
)]
async fn list_groups(State(service): State<SharedService>) -> Result<Json<Vec<RoommateGroup>>, ApiError> {
    Ok(Json(service.list_groups().await?))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}",
    params(("group_id" = String, Path, description = "ID of the group")),
    responses(
        (status = 200, description = "Roommate group", body = RoommateGroup),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
async fn get_group(
    State(service): State<SharedService>,
    Path(group_id): Path<String>,
) -> Result<Json<RoommateGroup>, ApiError> {
    Ok(Json(service.get_group(&group_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/groups",
    request_body = GroupDraft,
    responses(
        (status = 201, description = "Group created", body = RoommateGroup),
        (status = 400, description = "Bad request", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn create_group(
    State(service): State<SharedService>,
    Extension(member): Extension<Member>,
    Json(draft): Json<GroupDraft>,
) -> Result<(StatusCode, Json<RoommateGroup>), ApiError> {
    let group = service.create_group(draft, &member).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

#[utoipa::path(
    delete,
    path = "/api/groups/{group_id}",
    params(("group_id" = String, Path, description = "ID of the group")),
    responses(
        (status = 204, description = "Group deleted, expenses kept"),
        (status = 404, description = "Group not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn delete_group(
    State(service): State<SharedService>,
    Extension(member): Extension<Member>,
    Path(group_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.delete_group(&group_id, &member).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/expenses",
    params(("group_id" = String, Path, description = "ID of the group")),
    responses(
        (status = 200, description = "Expenses with per-member shares", body = Vec<ExpenseView>),
        (status = 404, description = "Group not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn list_group_expenses(
    State(service): State<SharedService>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<ExpenseView>>, ApiError> {
    Ok(Json(service.list_group_expenses(&group_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/expenses",
    params(("group_id" = String, Path, description = "ID of the group")),
    request_body = ExpenseDraft,
    responses(
        (status = 201, description = "Expense added", body = GroupExpense),
        (status = 400, description = "Bad request", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn add_expense(
    State(service): State<SharedService>,
    Extension(member): Extension<Member>,
    Path(group_id): Path<String>,
    Json(draft): Json<ExpenseDraft>,
) -> Result<(StatusCode, Json<GroupExpense>), ApiError> {
    let expense = service.add_expense(&group_id, draft, &member).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

#[utoipa::path(
    put,
    path = "/api/expenses/{expense_id}",
    params(("expense_id" = String, Path, description = "ID of the expense")),
    request_body = ExpenseDraft,
    responses(
        (status = 200, description = "Expense updated", body = GroupExpense),
        (status = 404, description = "Expense not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn update_expense(
    State(service): State<SharedService>,
    Extension(member): Extension<Member>,
    Path(expense_id): Path<String>,
    Json(draft): Json<ExpenseDraft>,
) -> Result<Json<GroupExpense>, ApiError> {
    Ok(Json(service.update_expense(&expense_id, draft, &member).await?))
}

#[utoipa::path(
    post,
    path = "/api/expenses/{expense_id}/paid",
    params(("expense_id" = String, Path, description = "ID of the expense")),
    request_body = SetExpensePaidRequest,
    responses(
        (status = 200, description = "Paid flag updated", body = GroupExpense),
        (status = 404, description = "Expense not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn set_expense_paid(
    State(service): State<SharedService>,
    Extension(member): Extension<Member>,
    Path(expense_id): Path<String>,
    Json(req): Json<SetExpensePaidRequest>,
) -> Result<Json<GroupExpense>, ApiError> {
    Ok(Json(service.set_expense_paid(&expense_id, req.is_paid, &member).await?))
}

#[utoipa::path(
    delete,
    path = "/api/expenses/{expense_id}",
    params(("expense_id" = String, Path, description = "ID of the expense")),
    responses(
        (status = 204, description = "Expense deleted"),
        (status = 404, description = "Expense not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn delete_expense(
    State(service): State<SharedService>,
    Extension(member): Extension<Member>,
    Path(expense_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.delete_expense(&expense_id, &member).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/profiles",
    request_body = ProfileDraft,
    responses(
        (status = 201, description = "Profile created", body = UserProfile),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn create_profile(
    State(service): State<SharedService>,
    Extension(member): Extension<Member>,
    Json(draft): Json<ProfileDraft>,
) -> Result<(StatusCode, Json<UserProfile>), ApiError> {
    let profile = service.create_profile(draft, &member).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

#[utoipa::path(
    get,
    path = "/api/profiles/{profile_id}",
    params(("profile_id" = String, Path, description = "ID of the profile")),
    responses(
        (status = 200, description = "Profile", body = UserProfile),
        (status = 403, description = "Profile belongs to another member", body = ErrorResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn get_profile(
    State(service): State<SharedService>,
    Extension(member): Extension<Member>,
    Path(profile_id): Path<String>,
) -> Result<Json<UserProfile>, ApiError> {
    Ok(Json(service.get_profile(&profile_id, &member).await?))
}

#[utoipa::path(
    put,
    path = "/api/profiles/{profile_id}",
    params(("profile_id" = String, Path, description = "ID of the profile")),
    request_body = ProfileDraft,
    responses(
        (status = 200, description = "Profile updated", body = UserProfile),
        (status = 403, description = "Profile belongs to another member", body = ErrorResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn update_profile(
    State(service): State<SharedService>,
    Extension(member): Extension<Member>,
    Path(profile_id): Path<String>,
    Json(draft): Json<ProfileDraft>,
) -> Result<Json<UserProfile>, ApiError> {
    Ok(Json(service.update_profile(&profile_id, draft, &member).await?))
}

#[utoipa::path(
    get,
    path = "/api/preferences/lifestyle",
    responses((status = 200, description = "Caller's lifestyle preferences", body = LifestylePreferences)),
    security(("Bearer" = []))
)]
async fn get_lifestyle(
    State(service): State<SharedService>,
    Extension(member): Extension<Member>,
) -> Result<Json<LifestylePreferences>, ApiError> {
    Ok(Json(service.lifestyle_preferences(&member).await?))
}

#[utoipa::path(
    put,
    path = "/api/preferences/lifestyle",
    request_body = LifestylePreferences,
    responses((status = 200, description = "Preferences saved", body = LifestylePreferences)),
    security(("Bearer" = []))
)]
async fn update_lifestyle(
    State(service): State<SharedService>,
    Extension(member): Extension<Member>,
    Json(prefs): Json<LifestylePreferences>,
) -> Result<Json<LifestylePreferences>, ApiError> {
    Ok(Json(service.update_lifestyle_preferences(&member, prefs).await?))
}

#[utoipa::path(
    get,
    path = "/api/settings",
    responses((status = 200, description = "Caller's theme and language", body = AppSettings)),
    security(("Bearer" = []))
)]
async fn get_settings(
    State(service): State<SharedService>,
    Extension(member): Extension<Member>,
) -> Result<Json<AppSettings>, ApiError> {
    Ok(Json(service.settings(&member).await?))
}

#[utoipa::path(
    put,
    path = "/api/settings",
    request_body = UpdateSettingsRequest,
    responses((status = 200, description = "Settings saved", body = AppSettings)),
    security(("Bearer" = []))
)]
async fn update_settings(
    State(service): State<SharedService>,
    Extension(member): Extension<Member>,
    Json(req): Json<UpdateSettingsRequest>,
) -> Result<Json<AppSettings>, ApiError> {
    Ok(Json(service.update_settings(&member, req.theme, req.language).await?))
}

#[utoipa::path(
    get,
    path = "/api/logs",
    responses((status = 200, description = "Application log", body = Vec<AppLog>)),
    security(("Bearer" = []))
)]
async fn get_app_logs(State(service): State<SharedService>) -> Result<Json<Vec<AppLog>>, ApiError> {
    Ok(Json(service.get_app_logs().await?))
}
