use super::dto::{PlaceDetailsResponse, PlaceReview, PlaceSummary, SearchTextResponse};
use crate::modules::lookup::domain::{Candidate, DetailRecord, Review};
use crate::shared::errors::LookupError;
use log::warn;

const TRUNCATION_MARKER: &str = "...";

/// Converts Places API payloads into validated domain records
pub struct PlacesMapper {
    review_text_limit: usize,
}

impl PlacesMapper {
    pub fn new(review_text_limit: usize) -> Self {
        Self { review_text_limit }
    }

    /// Candidates in service order, at most `limit` of them
    ///
    /// A place without an id or display name makes the whole response invalid.
    pub fn to_candidates(
        &self,
        response: SearchTextResponse,
        limit: usize,
    ) -> Result<Vec<Candidate>, LookupError> {
        response
            .places
            .into_iter()
            .take(limit)
            .map(Self::to_candidate)
            .collect()
    }

    fn to_candidate(place: PlaceSummary) -> Result<Candidate, LookupError> {
        let place_id = place
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| LookupError::invalid_response("search result without a place id"))?;

        let display_name = place.display_name.map(|name| name.text).ok_or_else(|| {
            LookupError::invalid_response(format!(
                "search result {} without a display name",
                place_id
            ))
        })?;

        Ok(Candidate {
            place_id,
            display_name,
            formatted_address: place.formatted_address,
        })
    }

    /// Detail record for `requested_id`; absent numeric fields stay absent
    pub fn to_detail_record(
        &self,
        requested_id: &str,
        response: PlaceDetailsResponse,
    ) -> Result<DetailRecord, LookupError> {
        if let Some(id) = response.id.as_deref() {
            let bare_id = requested_id.strip_prefix("places/").unwrap_or(requested_id);
            if id != requested_id && id != bare_id {
                return Err(LookupError::invalid_response(format!(
                    "details requested for {} but received {}",
                    requested_id, id
                )));
            }
        }

        let reviews = response
            .reviews
            .into_iter()
            .filter_map(|review| self.to_review(review))
            .collect();

        Ok(DetailRecord {
            place_id: requested_id.to_string(),
            name: response
                .display_name
                .map(|name| name.text)
                .unwrap_or_default(),
            rating: response.rating,
            user_ratings_total: response.user_rating_count,
            maps_url: response.google_maps_uri,
            formatted_address: response.formatted_address,
            reviews,
        })
    }

    /// `None` for reviews without a usable star rating
    fn to_review(&self, review: PlaceReview) -> Option<Review> {
        let rating = match review.rating {
            Some(r) if (0.0..=5.0).contains(&r) => r.round() as u8,
            other => {
                warn!("Skipping review with unusable rating: {:?}", other);
                return None;
            }
        };

        // The original-language text is preferred over the translated one
        let text = review
            .original_text
            .or(review.text)
            .map(|t| t.text)
            .unwrap_or_default();

        Some(Review {
            author: review
                .author_attribution
                .and_then(|a| a.display_name)
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| "Anonymous".to_string()),
            rating,
            relative_time: review.relative_publish_time_description.unwrap_or_default(),
            text: truncate_at_word_boundary(&text, self.review_text_limit),
            publish_time: review.publish_time,
        })
    }
}

/// Cut `text` to at most `limit` characters, ending on a whole word, and
/// append "..." when anything was removed.
///
/// A single word longer than the limit is cut at the limit itself.
pub fn truncate_at_word_boundary(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }

    let cut = text
        .char_indices()
        .nth(limit)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());

    // If the limit lands exactly on a space, the prefix already ends on a word
    let boundary = if text[cut..].starts_with(char::is_whitespace) {
        cut
    } else {
        text[..cut]
            .rfind(char::is_whitespace)
            .filter(|&idx| idx > 0)
            .unwrap_or(cut)
    };

    format!("{}{}", text[..boundary].trim_end(), TRUNCATION_MARKER)
}
