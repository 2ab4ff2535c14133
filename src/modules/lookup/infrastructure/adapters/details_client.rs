use crate::modules::lookup::domain::DetailRecord;
use crate::modules::lookup::infrastructure::external::PlacesMapper;
use crate::modules::lookup::infrastructure::http_client::RetryExecutor;
use crate::modules::lookup::traits::PlacesApi;
use crate::shared::errors::LookupError;
use log::debug;
use std::sync::Arc;

/// Full-record fetch for a chosen candidate
///
/// Shares its [`RetryExecutor`] with the search client, so one rate limiter
/// paces both call types.
pub struct DetailsClient {
    api: Arc<dyn PlacesApi>,
    executor: Arc<RetryExecutor>,
    mapper: Arc<PlacesMapper>,
    include_reviews: bool,
}

impl DetailsClient {
    pub fn new(
        api: Arc<dyn PlacesApi>,
        executor: Arc<RetryExecutor>,
        mapper: Arc<PlacesMapper>,
        include_reviews: bool,
    ) -> Self {
        Self {
            api,
            executor,
            mapper,
            include_reviews,
        }
    }

    pub async fn fetch_details(&self, place_id: &str) -> Result<DetailRecord, LookupError> {
        let include_reviews = self.include_reviews;
        let response = self
            .executor
            .execute("place details", || {
                self.api.get_place(place_id, include_reviews)
            })
            .await?;

        let record = self.mapper.to_detail_record(place_id, response)?;
        debug!(
            "Fetched details for {}: rating={:?}, reviews={}",
            place_id,
            record.rating,
            record.reviews.len()
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::lookup::infrastructure::external::google_places::dto::{
        AuthorAttribution, LocalizedText, PlaceDetailsResponse, PlaceReview,
    };
    use crate::modules::lookup::infrastructure::http_client::BackoffPolicy;
    use crate::modules::lookup::traits::MockPlacesApi;
    use crate::shared::utils::RateLimiter;
    use std::time::Duration;

    fn client(mock: MockPlacesApi, include_reviews: bool) -> DetailsClient {
        let policy = BackoffPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(5),
            max_delay: Duration::from_millis(20),
            rate_limit_floor: Duration::from_millis(10),
            jitter_ratio: 0.0,
        };
        let executor = RetryExecutor::new(Arc::new(RateLimiter::disabled()), policy);
        DetailsClient::new(
            Arc::new(mock),
            Arc::new(executor),
            Arc::new(PlacesMapper::new(20)),
            include_reviews,
        )
    }

    fn details() -> PlaceDetailsResponse {
        PlaceDetailsResponse {
            id: Some("p1".to_string()),
            display_name: Some(LocalizedText {
                text: "Utah LED Lighting".to_string(),
                language_code: None,
            }),
            rating: Some(4.8),
            user_rating_count: Some(96),
            google_maps_uri: Some("https://maps.google.com/?cid=9".to_string()),
            formatted_address: Some("1 Main St, Salt Lake City, UT".to_string()),
            reviews: vec![PlaceReview {
                rating: Some(5.0),
                relative_publish_time_description: Some("3 weeks ago".to_string()),
                text: Some(LocalizedText {
                    text: "Fantastic install crew and the lights held up all season".to_string(),
                    language_code: None,
                }),
                original_text: None,
                author_attribution: Some(AuthorAttribution {
                    display_name: Some("Riley".to_string()),
                    uri: None,
                }),
                publish_time: None,
            }],
        }
    }

    #[tokio::test]
    async fn test_fetch_details_maps_record() {
        let mut mock = MockPlacesApi::new();
        mock.expect_get_place()
            .withf(|id, reviews| id == "p1" && *reviews)
            .times(1)
            .returning(|_, _| Ok(details()));

        let record = client(mock, true).fetch_details("p1").await.unwrap();
        assert_eq!(record.name, "Utah LED Lighting");
        assert_eq!(record.rating, Some(4.8));
        assert_eq!(record.user_ratings_total, Some(96));
        assert_eq!(record.reviews.len(), 1);
        assert_eq!(record.reviews[0].text, "Fantastic install...");
    }

    #[tokio::test]
    async fn test_reviews_flag_is_forwarded() {
        let mut mock = MockPlacesApi::new();
        mock.expect_get_place()
            .withf(|_, reviews| !*reviews)
            .times(1)
            .returning(|_, _| Ok(PlaceDetailsResponse::default()));

        let record = client(mock, false).fetch_details("p1").await.unwrap();
        assert!(record.rating.is_none());
        assert!(record.reviews.is_empty());
    }

    #[tokio::test]
    async fn test_transient_failure_then_success() {
        let mut mock = MockPlacesApi::new();
        let mut seq = mockall::Sequence::new();
        mock.expect_get_place()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(LookupError::Network("connection reset".to_string())));
        mock.expect_get_place()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(details()));

        let record = client(mock, true).fetch_details("p1").await.unwrap();
        assert_eq!(record.place_id, "p1");
    }

    #[tokio::test]
    async fn test_authentication_error_not_retried() {
        let mut mock = MockPlacesApi::new();
        mock.expect_get_place()
            .times(1)
            .returning(|_, _| Err(LookupError::Authentication("key revoked".to_string())));

        let err = client(mock, true).fetch_details("p1").await.unwrap_err();
        assert!(err.is_authentication());
    }
}
