use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::errors::RoomshareError;
use crate::core::models::preferences::{Language, Theme};
use crate::core::verification::DocumentType;

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Member id issued by the membership provider
    pub member_id: String,
    pub email: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Deserialize, ToSchema)]
pub struct VerifyOwnerRequest {
    pub document_type: DocumentType,
    pub document_number: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SetExpensePaidRequest {
    pub is_paid: bool,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateSettingsRequest {
    pub theme: Option<Theme>,
    pub language: Option<Language>,
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for RoomshareError to implement IntoResponse
pub struct ApiError(pub RoomshareError);

impl From<RoomshareError> for ApiError {
    fn from(err: RoomshareError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            RoomshareError::InputFormat(_)
            | RoomshareError::ValidationInvariant(_)
            | RoomshareError::DivisionDomain(_)
            | RoomshareError::InvalidInput(..)
            | RoomshareError::InvalidEmail(_) => StatusCode::BAD_REQUEST,
            RoomshareError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            RoomshareError::NotListingOwner(_) | RoomshareError::NotProfileOwner(_) => StatusCode::FORBIDDEN,
            RoomshareError::ListingNotFound(_)
            | RoomshareError::GroupNotFound(_)
            | RoomshareError::ExpenseNotFound(_)
            | RoomshareError::ProfileNotFound(_) => StatusCode::NOT_FOUND,
            RoomshareError::EmailAlreadyRegistered(_) => StatusCode::CONFLICT,
            RoomshareError::RemoteUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            RoomshareError::StorageError(_)
            | RoomshareError::LoggingError(_)
            | RoomshareError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }
        (status, Json(ErrorResponse { error: self.0.to_string() })).into_response()
    }
}
