use super::services::match_selector::Selection;
use super::value_objects::ConfidenceLabel;
use crate::shared::errors::LookupError;
use serde::Serialize;

/// A provisional directory entry returned by the search call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub place_id: String,
    pub display_name: String,
    pub formatted_address: Option<String>,
}

impl Candidate {
    pub fn new(place_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            place_id: place_id.into(),
            display_name: display_name.into(),
            formatted_address: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.formatted_address = Some(address.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    /// Similarity to the query's business name, in `[0, 1]`
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    pub author: String,
    pub rating: u8,
    pub relative_time: String,
    pub text: String,
    pub publish_time: Option<String>,
}

/// Full record for the chosen candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRecord {
    pub place_id: String,
    pub name: String,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub maps_url: Option<String>,
    pub formatted_address: Option<String>,
    /// At most what the service returns (about five); never paginated
    pub reviews: Vec<Review>,
}

impl DetailRecord {
    /// Use the search candidate's name and address where the details call left them blank
    pub fn fill_missing_from(&mut self, candidate: &Candidate) {
        if self.name.trim().is_empty() {
            self.name = candidate.display_name.clone();
        }
        if self.formatted_address.is_none() {
            self.formatted_address = candidate.formatted_address.clone();
        }
    }
}

/// How a query ended up
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    Matched {
        detail: DetailRecord,
        selection: Selection,
    },
    /// A candidate was chosen but its details could not be fetched.
    Partial {
        selection: Selection,
        error: LookupError,
    },
    Failed {
        error: LookupError,
    },
}

/// Terminal result for one input query. Exactly one is produced per query.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub query: String,
    pub outcome: MatchOutcome,
}

impl MatchResult {
    pub fn matched(query: impl Into<String>, detail: DetailRecord, selection: Selection) -> Self {
        Self {
            query: query.into(),
            outcome: MatchOutcome::Matched { detail, selection },
        }
    }

    pub fn partial(query: impl Into<String>, selection: Selection, error: LookupError) -> Self {
        Self {
            query: query.into(),
            outcome: MatchOutcome::Partial { selection, error },
        }
    }

    pub fn failed(query: impl Into<String>, error: LookupError) -> Self {
        Self {
            query: query.into(),
            outcome: MatchOutcome::Failed { error },
        }
    }

    pub fn not_found(query: impl Into<String>) -> Self {
        let query = query.into();
        let error = LookupError::NotFound {
            query: query.clone(),
        };
        Self::failed(query, error)
    }

    pub fn detail(&self) -> Option<&DetailRecord> {
        match &self.outcome {
            MatchOutcome::Matched { detail, .. } => Some(detail),
            _ => None,
        }
    }

    pub fn selection(&self) -> Option<&Selection> {
        match &self.outcome {
            MatchOutcome::Matched { selection, .. } | MatchOutcome::Partial { selection, .. } => {
                Some(selection)
            }
            MatchOutcome::Failed { .. } => None,
        }
    }

    pub fn match_score(&self) -> Option<f64> {
        self.selection().map(|s| s.chosen.score)
    }

    pub fn confidence(&self) -> Option<ConfidenceLabel> {
        self.selection().map(|s| s.confidence)
    }

    pub fn warning(&self) -> Option<&str> {
        self.selection().and_then(|s| s.warning.as_deref())
    }

    pub fn error(&self) -> Option<&LookupError> {
        match &self.outcome {
            MatchOutcome::Matched { .. } => None,
            MatchOutcome::Partial { error, .. } | MatchOutcome::Failed { error } => Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, MatchOutcome::Matched { .. })
    }

    /// Place identifier of the chosen candidate, if any
    pub fn place_id(&self) -> Option<&str> {
        self.selection().map(|s| s.chosen.candidate.place_id.as_str())
    }

    /// Best display name available: the detail record's, else the chosen candidate's
    pub fn name(&self) -> Option<&str> {
        match &self.outcome {
            MatchOutcome::Matched { detail, .. } => Some(detail.name.as_str()),
            MatchOutcome::Partial { selection, .. } => {
                Some(selection.chosen.candidate.display_name.as_str())
            }
            MatchOutcome::Failed { .. } => None,
        }
    }
}
