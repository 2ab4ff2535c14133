use crate::modules::lookup::domain::Candidate;
use crate::modules::lookup::infrastructure::external::PlacesMapper;
use crate::modules::lookup::infrastructure::http_client::RetryExecutor;
use crate::modules::lookup::traits::PlacesApi;
use crate::shared::errors::LookupError;
use crate::shared::utils::LogContext;
use std::sync::Arc;

/// Candidate search, paced and retried through the shared executor
pub struct SearchClient {
    api: Arc<dyn PlacesApi>,
    executor: Arc<RetryExecutor>,
    mapper: Arc<PlacesMapper>,
}

impl SearchClient {
    pub fn new(
        api: Arc<dyn PlacesApi>,
        executor: Arc<RetryExecutor>,
        mapper: Arc<PlacesMapper>,
    ) -> Self {
        Self {
            api,
            executor,
            mapper,
        }
    }

    /// Up to `k` candidates in the service's relevance order.
    ///
    /// An empty list is a valid answer; the caller decides what "not found" means.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<Candidate>, LookupError> {
        if k == 0 {
            return Ok(Vec::new());
        }

        LogContext::search_operation(query, None);
        let response = self
            .executor
            .execute("places search", || self.api.search_text(query, k))
            .await?;

        let candidates = self.mapper.to_candidates(response, k)?;
        LogContext::search_operation(query, Some(candidates.len()));
        Ok(candidates)
    }
}
