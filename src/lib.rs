pub mod api;
pub mod auth;
pub mod config;
pub mod constants;
pub mod core;
pub mod infrastructure;

pub use crate::core::errors::RoomshareError;
pub use crate::core::filter::{FilterCriteria, ListingQuery, filter_listings};
pub use crate::core::services::{RoomshareService, ServiceOptions};

#[cfg(test)]
mod tests;
