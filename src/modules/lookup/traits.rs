use crate::modules::lookup::infrastructure::external::google_places::dto::{
    PlaceDetailsResponse, SearchTextResponse,
};
use crate::shared::errors::LookupError;
use async_trait::async_trait;

/// One attempt against the place-lookup service, no retries or pacing.
///
/// Implementations classify failures into [`LookupError`]; the retry loop
/// above them decides what to do with each class.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlacesApi: Send + Sync {
    /// Text search returning candidates in relevance order
    async fn search_text(
        &self,
        query: &str,
        page_size: usize,
    ) -> Result<SearchTextResponse, LookupError>;

    /// Full record for one place
    async fn get_place(
        &self,
        place_id: &str,
        include_reviews: bool,
    ) -> Result<PlaceDetailsResponse, LookupError>;
}
