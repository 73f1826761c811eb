use serde::Serialize;
use thiserror::Error;

use crate::core::verification::DocumentType;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

impl FieldError {
    pub fn new(field: &str, title: impl Into<String>, description: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Error, Debug, Serialize)]
pub enum RoomshareError {
    /// Identity document number does not match the pattern for its type
    #[error("Invalid {} format. Use {}.", .0.label(), .0.format_hint())]
    InputFormat(DocumentType),

    /// Cross-field invariant violated on a record about to be written
    #[error("Invalid record: {}", .0.description)]
    ValidationInvariant(FieldError),

    /// Expense split requested for a group with fewer than one member
    #[error("Cannot split an expense across {0} members")]
    DivisionDomain(i64),

    /// Record store failed or did not answer in time
    #[error("Record store unavailable: {0}")]
    RemoteUnavailable(String),

    /// Record store rejected an operation, e.g. an update of a missing record
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Generic input validation error with detailed field information
    #[error("Invalid input for field `{0}`: {desc}", desc = .1.description)]
    InvalidInput(String, FieldError),

    #[error("Listing {0} not found")]
    ListingNotFound(String),

    #[error("Group {0} not found")]
    GroupNotFound(String),

    #[error("Expense {0} not found")]
    ExpenseNotFound(String),

    #[error("Profile {0} not found")]
    ProfileNotFound(String),

    /// Member tried to change a listing someone else owns
    #[error("Member {0} does not own this listing")]
    NotListingOwner(String),

    #[error("Member {0} does not own this profile")]
    NotProfileOwner(String),

    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    #[error("Email {0} already registered")]
    EmailAlreadyRegistered(String),

    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    #[error("Logging error: {0}")]
    LoggingError(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl RoomshareError {
    pub fn invalid_input(field: &str, title: impl Into<String>, description: impl Into<String>) -> Self {
        RoomshareError::InvalidInput(field.to_string(), FieldError::new(field, title, description))
    }

    pub fn invariant(field: &str, description: impl Into<String>) -> Self {
        RoomshareError::ValidationInvariant(FieldError::new(field, format!("Invalid {}", field), description))
    }
}
