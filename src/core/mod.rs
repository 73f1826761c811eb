pub mod currency;
pub mod errors;
pub mod filter;
pub mod models;
pub mod occupancy;
pub mod services;
pub mod split;
pub mod verification;
