pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod traits;

pub use application::{BatchSummary, PlaceLookupService};
pub use domain::{
    Candidate, ConfidenceLabel, DetailRecord, MatchOutcome, MatchResult, Review, ScoredCandidate,
};
pub use traits::PlacesApi;
