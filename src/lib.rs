//! Resolve free-text business queries ("name + rough location") to a single
//! Google Places record with a confidence label attached.

pub mod modules;
pub mod shared;

pub use modules::lookup::{
    BatchSummary, Candidate, ConfidenceLabel, DetailRecord, MatchOutcome, MatchResult,
    PlaceLookupService, PlacesApi, Review,
};
pub use shared::config::{LookupConfig, LookupConfigBuilder};
pub use shared::errors::{AppError, AppResult, LookupError};
