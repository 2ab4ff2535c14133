use super::dto::{
    ErrorEnvelope, PlaceDetailsResponse, SearchTextRequest, SearchTextResponse, DETAIL_FIELDS,
    SEARCH_FIELD_MASK,
};
use crate::modules::lookup::infrastructure::http_client::RateLimitInfo;
use crate::modules::lookup::traits::PlacesApi;
use crate::shared::config::LookupConfig;
use crate::shared::errors::{AppError, AppResult, LookupError};
use crate::shared::utils::LogContext;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Instant;

const USER_AGENT: &str = concat!("placefinder/", env!("CARGO_PKG_VERSION"));
const API_KEY_HEADER: &str = "X-Goog-Api-Key";
const FIELD_MASK_HEADER: &str = "X-Goog-FieldMask";
const ERROR_SNIPPET_CHARS: usize = 200;

/// Single-attempt transport for the Google Places (New) API
pub struct GooglePlacesClient {
    client: Client,
    base_url: String,
    api_key: String,
    language_code: String,
}

impl GooglePlacesClient {
    pub fn new(config: &LookupConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            language_code: config.language_code.clone(),
        })
    }

    fn details_url(&self, place_id: &str, include_reviews: bool) -> String {
        let mut fields = DETAIL_FIELDS.join(",");
        if include_reviews {
            fields.push_str(",reviews");
        }

        // Accept both bare ids and resource names ("places/{id}")
        let id = place_id.strip_prefix("places/").unwrap_or(place_id);
        format!(
            "{}/places/{}?fields={}",
            self.base_url,
            urlencoding::encode(id),
            fields
        )
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, LookupError> {
        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            return Ok(serde_json::from_str(&body)?);
        }

        let headers = response.headers().clone();
        let body = response.text().await.unwrap_or_default();
        Err(classify_status(status, &headers, &body))
    }
}

#[async_trait]
impl PlacesApi for GooglePlacesClient {
    async fn search_text(
        &self,
        query: &str,
        page_size: usize,
    ) -> Result<SearchTextResponse, LookupError> {
        let url = format!("{}/places:searchText", self.base_url);
        let request = SearchTextRequest {
            text_query: query.to_string(),
            page_size,
            language_code: self.language_code.clone(),
        };

        LogContext::api_call("searchText", query, "started", None);
        let started = Instant::now();
        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(FIELD_MASK_HEADER, SEARCH_FIELD_MASK)
            .json(&request)
            .send()
            .await?;
        LogContext::api_call(
            "searchText",
            query,
            response.status().as_str(),
            Some(elapsed_ms(started)),
        );

        Self::read_json(response).await
    }

    async fn get_place(
        &self,
        place_id: &str,
        include_reviews: bool,
    ) -> Result<PlaceDetailsResponse, LookupError> {
        let url = self.details_url(place_id, include_reviews);
        LogContext::api_call("placeDetails", place_id, "started", None);
        let started = Instant::now();
        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;
        LogContext::api_call(
            "placeDetails",
            place_id,
            response.status().as_str(),
            Some(elapsed_ms(started)),
        );

        Self::read_json(response).await
    }
}

/// Map a non-success response onto the error taxonomy
pub fn classify_status(status: StatusCode, headers: &HeaderMap, body: &str) -> LookupError {
    let message = error_message(body);

    match status {
        StatusCode::TOO_MANY_REQUESTS => LookupError::RateLimit {
            retry_after: RateLimitInfo::from_headers(headers).retry_after,
        },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LookupError::Authentication(message),
        StatusCode::BAD_REQUEST if mentions_invalid_key(body) => {
            LookupError::Authentication(message)
        }
        _ => LookupError::http(status.as_u16(), message),
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

fn mentions_invalid_key(body: &str) -> bool {
    body.contains("API_KEY_INVALID") || body.contains("API key not valid")
}

fn error_message(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        if let Some(message) = envelope.error.message {
            return message;
        }
        if let Some(status) = envelope.error.status {
            return status;
        }
    }

    let snippet: String = body.trim().chars().take(ERROR_SNIPPET_CHARS).collect();
    if snippet.is_empty() {
        "empty response body".to_string()
    } else {
        snippet
    }
}
