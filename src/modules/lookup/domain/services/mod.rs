pub mod match_selector;
pub mod query_normalizer;
pub mod similarity;

pub use match_selector::{MatchSelector, Selection};
pub use query_normalizer::QueryNormalizer;
pub use similarity::{
    ContainmentFloorStrategy, MatchingBlocksStrategy, SimilarityScorer, SimilarityStrategy,
};
