use crate::modules::lookup::MatchResult;
use serde::Serialize;

/// One output row per query, flattened for tabular writers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    pub query: String,
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub maps_url: Option<String>,
    pub formatted_address: Option<String>,
    /// Two decimal places
    pub match_score: Option<String>,
    pub confidence: Option<String>,
    pub warning: Option<String>,
    pub error: Option<String>,
    pub error_kind: Option<String>,
}

impl MatchRecord {
    pub const HEADERS: [&'static str; 12] = [
        "query",
        "place_id",
        "name",
        "rating",
        "user_ratings_total",
        "maps_url",
        "formatted_address",
        "match_score",
        "confidence",
        "warning",
        "error",
        "error_kind",
    ];
}

impl From<&MatchResult> for MatchRecord {
    fn from(result: &MatchResult) -> Self {
        let detail = result.detail();

        Self {
            query: result.query.clone(),
            place_id: result.place_id().map(str::to_string),
            name: result.name().map(str::to_string),
            rating: detail.and_then(|d| d.rating),
            user_ratings_total: detail.and_then(|d| d.user_ratings_total),
            maps_url: detail.and_then(|d| d.maps_url.clone()),
            formatted_address: detail
                .and_then(|d| d.formatted_address.clone())
                .or_else(|| {
                    result
                        .selection()
                        .and_then(|s| s.chosen.candidate.formatted_address.clone())
                }),
            match_score: result.match_score().map(|score| format!("{:.2}", score)),
            confidence: result.confidence().map(|c| c.as_str().to_string()),
            warning: result.warning().map(str::to_string),
            error: result.error().map(|e| e.to_string()),
            error_kind: result.error().map(|e| e.kind().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::lookup::domain::{
        Candidate, ConfidenceLabel, DetailRecord, ScoredCandidate, Selection,
    };
    use crate::shared::errors::LookupError;

    fn selection(score: f64) -> Selection {
        let confidence = ConfidenceLabel::from_score(score);
        Selection {
            chosen: ScoredCandidate {
                candidate: Candidate::new("p2", "Utah LED Lighting").with_address("9 Elm St"),
                score,
            },
            confidence,
            warning: confidence.warning_for(score),
        }
    }

    #[test]
    fn test_matched_record() {
        let detail = DetailRecord {
            place_id: "p2".to_string(),
            name: "Utah LED Lighting".to_string(),
            rating: Some(4.6),
            user_ratings_total: Some(31),
            maps_url: Some("https://maps.google.com/?cid=2".to_string()),
            formatted_address: None,
            reviews: vec![],
        };
        let result = MatchResult::matched("Utah Holiday Lighting SLC", detail, selection(0.8421));

        let record = MatchRecord::from(&result);
        assert_eq!(record.match_score.as_deref(), Some("0.84"));
        assert_eq!(record.confidence.as_deref(), Some("good"));
        assert_eq!(record.rating, Some(4.6));
        assert_eq!(record.formatted_address.as_deref(), Some("9 Elm St"));
        assert!(record.warning.is_none());
        assert!(record.error.is_none());
        assert!(record.error_kind.is_none());
    }

    #[test]
    fn test_failed_record_has_only_error() {
        let result = MatchResult::not_found("Nowhere Diner");
        let record = MatchRecord::from(&result);

        assert_eq!(record.query, "Nowhere Diner");
        assert!(record.place_id.is_none());
        assert!(record.match_score.is_none());
        assert_eq!(
            record.error.as_deref(),
            Some("No match found for 'Nowhere Diner'")
        );
        assert_eq!(record.error_kind.as_deref(), Some("not_found"));
    }

    #[test]
    fn test_partial_record_keeps_candidate() {
        let error = LookupError::PartialData {
            place_id: "p2".to_string(),
            reason: "timeout".to_string(),
        };
        let result = MatchResult::partial("utah lights", selection(0.55), error);
        let record = MatchRecord::from(&result);

        assert_eq!(record.place_id.as_deref(), Some("p2"));
        assert_eq!(record.name.as_deref(), Some("Utah LED Lighting"));
        assert!(record.rating.is_none());
        assert_eq!(record.confidence.as_deref(), Some("moderate"));
        assert!(record.warning.is_some());
        assert!(record.error.is_some());
        assert_eq!(record.error_kind.as_deref(), Some("partial_data"));
    }
}
