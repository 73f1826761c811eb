//! Format gates for self-declared identity documents.
//!
//! These only check that a number has the right shape. Nothing is looked up
//! with an issuing authority.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::errors::RoomshareError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    License,
    Voter,
    Aadhaar,
    Pan,
}

static LICENSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^[A-Z0-9]{10,15}$").expect("valid document pattern"));
static VOTER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^[A-Z0-9]{8,12}$").expect("valid document pattern"));
static AADHAAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{12}$").expect("valid document pattern"));
static PAN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("valid document pattern"));

impl DocumentType {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::License => "Driving License",
            DocumentType::Voter => "Voter ID",
            DocumentType::Aadhaar => "Aadhaar",
            DocumentType::Pan => "PAN",
        }
    }

    pub fn format_hint(&self) -> &'static str {
        match self {
            DocumentType::License => "10-15 alphanumeric characters",
            DocumentType::Voter => "8-12 alphanumeric characters",
            DocumentType::Aadhaar => "exactly 12 digits",
            DocumentType::Pan => "5 letters, 4 digits and 1 letter, e.g. ABCDE1234F",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            DocumentType::License => &LICENSE_RE,
            DocumentType::Voter => &VOTER_RE,
            DocumentType::Aadhaar => &AADHAAR_RE,
            DocumentType::Pan => &PAN_RE,
        }
    }

    /// Surrounding whitespace is ignored.
    pub fn is_valid(&self, number: &str) -> bool {
        self.pattern().is_match(number.trim())
    }

    pub fn validate(&self, number: &str) -> Result<(), RoomshareError> {
        if number.trim().is_empty() {
            return Err(RoomshareError::invalid_input(
                "documentNumber",
                "Missing document number",
                "Please enter a verification ID",
            ));
        }
        if self.is_valid(number) {
            Ok(())
        } else {
            Err(RoomshareError::InputFormat(*self))
        }
    }
}
