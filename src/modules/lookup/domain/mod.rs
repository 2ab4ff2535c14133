pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::{Candidate, DetailRecord, MatchOutcome, MatchResult, Review, ScoredCandidate};
pub use services::{MatchSelector, QueryNormalizer, Selection, SimilarityScorer};
pub use value_objects::ConfidenceLabel;
