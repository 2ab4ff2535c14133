use serde::{Deserialize, Serialize};

/// Field mask for `places:searchText`
pub const SEARCH_FIELD_MASK: &str = "places.id,places.displayName,places.formattedAddress";

/// Fields requested from `places/{id}`; reviews are appended when enabled
pub const DETAIL_FIELDS: &[&str] = &[
    "id",
    "displayName",
    "rating",
    "userRatingCount",
    "googleMapsUri",
    "formattedAddress",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTextRequest {
    pub text_query: String,
    pub page_size: usize,
    pub language_code: String,
}

/// An empty result set comes back as `{}`, hence the default
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchTextResponse {
    #[serde(default)]
    pub places: Vec<PlaceSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceSummary {
    pub id: Option<String>,
    pub display_name: Option<LocalizedText>,
    pub formatted_address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedText {
    pub text: String,
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetailsResponse {
    pub id: Option<String>,
    pub display_name: Option<LocalizedText>,
    pub rating: Option<f64>,
    pub user_rating_count: Option<u32>,
    pub google_maps_uri: Option<String>,
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub reviews: Vec<PlaceReview>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceReview {
    pub rating: Option<f64>,
    pub relative_publish_time_description: Option<String>,
    pub text: Option<LocalizedText>,
    pub original_text: Option<LocalizedText>,
    pub author_attribution: Option<AuthorAttribution>,
    pub publish_time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorAttribution {
    pub display_name: Option<String>,
    pub uri: Option<String>,
}

/// Google's error envelope: `{"error": {"code", "message", "status"}}`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub code: Option<u16>,
    pub message: Option<String>,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_serializes_camel_case() {
        let request = SearchTextRequest {
            text_query: "Brite Nites SLC".to_string(),
            page_size: 5,
            language_code: "en".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["textQuery"], "Brite Nites SLC");
        assert_eq!(json["pageSize"], 5);
        assert_eq!(json["languageCode"], "en");
    }

    #[test]
    fn test_empty_search_response() {
        let response: SearchTextResponse = serde_json::from_str("{}").unwrap();
        assert!(response.places.is_empty());
    }

    #[test]
    fn test_details_response_parsing() {
        let json = r#"{
            "id": "ChIJ123",
            "displayName": {"text": "Brite Nites", "languageCode": "en"},
            "rating": 4.7,
            "userRatingCount": 212,
            "googleMapsUri": "https://maps.google.com/?cid=42",
            "reviews": [{
                "rating": 5,
                "relativePublishTimeDescription": "a month ago",
                "originalText": {"text": "Great lights"},
                "authorAttribution": {"displayName": "Sam"},
                "publishTime": "2024-11-02T10:00:00Z"
            }]
        }"#;
        let response: PlaceDetailsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.id.as_deref(), Some("ChIJ123"));
        assert_eq!(response.user_rating_count, Some(212));
        assert!(response.formatted_address.is_none());
        assert_eq!(response.reviews.len(), 1);
        assert_eq!(response.reviews[0].rating, Some(5.0));
    }

    #[test]
    fn test_error_envelope_parsing() {
        let json = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        let envelope: ErrorEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.error.code, Some(400));
        assert_eq!(envelope.error.status.as_deref(), Some("INVALID_ARGUMENT"));
    }
}
