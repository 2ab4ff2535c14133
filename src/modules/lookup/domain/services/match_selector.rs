use super::similarity::SimilarityScorer;
use crate::modules::lookup::domain::entities::{Candidate, ScoredCandidate};
use crate::modules::lookup::domain::value_objects::ConfidenceLabel;
use log::debug;

/// The chosen candidate with its confidence classification
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub chosen: ScoredCandidate,
    pub confidence: ConfidenceLabel,
    /// Present iff the score is below 0.70
    pub warning: Option<String>,
}

/// Ranks candidates against the query's business name and picks one
pub struct MatchSelector {
    scorer: SimilarityScorer,
}

impl MatchSelector {
    pub fn new(scorer: SimilarityScorer) -> Self {
        Self { scorer }
    }

    /// Score every candidate, preserving service order
    pub fn score_all(&self, query_name: &str, candidates: &[Candidate]) -> Vec<ScoredCandidate> {
        candidates
            .iter()
            .map(|candidate| {
                let score = self.scorer.score(query_name, &candidate.display_name);
                debug!(
                    "  Candidate: '{}' - Similarity: {:.2}",
                    candidate.display_name, score
                );
                ScoredCandidate {
                    candidate: candidate.clone(),
                    score,
                }
            })
            .collect()
    }

    /// Pick the highest-scoring candidate
    ///
    /// Only a strictly higher score displaces the current best, so exact ties
    /// go to the candidate the service ranked first. Returns `None` for an
    /// empty list.
    pub fn select(&self, query_name: &str, candidates: &[Candidate]) -> Option<Selection> {
        let best = self
            .score_all(query_name, candidates)
            .into_iter()
            .fold(None::<ScoredCandidate>, |best, scored| match best {
                Some(current) if scored.score <= current.score => Some(current),
                _ => Some(scored),
            })?;

        let confidence = ConfidenceLabel::from_score(best.score);
        Some(Selection {
            warning: confidence.warning_for(best.score),
            confidence,
            chosen: best,
        })
    }
}

impl Default for MatchSelector {
    fn default() -> Self {
        Self::new(SimilarityScorer::new())
    }
}
