use crate::modules::lookup::domain::{MatchResult, MatchSelector, QueryNormalizer, SimilarityScorer};
use crate::modules::lookup::infrastructure::{
    BackoffPolicy, DetailsClient, GooglePlacesClient, PlacesMapper, RetryExecutor, SearchClient,
};
use crate::modules::lookup::traits::PlacesApi;
use crate::shared::config::LookupConfig;
use crate::shared::errors::{AppError, AppResult, LookupError};
use crate::shared::utils::{LogContext, RateLimiter, TimedOperation};
use futures::stream::{self, StreamExt};
use log::{debug, error, info, warn};
use std::sync::Arc;

/// Resolves free-text business queries to Places records
///
/// Each query runs normalize, search, select and details in that order. One
/// rate limiter and one retry executor are shared by every query and both
/// call types, however many queries run at once.
pub struct PlaceLookupService {
    normalizer: QueryNormalizer,
    selector: MatchSelector,
    search_client: SearchClient,
    details_client: DetailsClient,
    candidate_limit: usize,
    concurrency: usize,
}

impl PlaceLookupService {
    /// Service backed by the live Google Places API
    pub fn from_config(config: &LookupConfig) -> AppResult<Self> {
        config.validate()?;
        let api = Arc::new(GooglePlacesClient::new(config)?);
        Ok(Self::with_api(api, config))
    }

    /// Service over any [`PlacesApi`] implementation
    pub fn with_api(api: Arc<dyn PlacesApi>, config: &LookupConfig) -> Self {
        let rate_limiter = Arc::new(RateLimiter::new(config.min_request_interval));
        let executor = Arc::new(
            RetryExecutor::new(rate_limiter, BackoffPolicy::from_config(config))
                .with_call_timeout(config.request_timeout),
        );
        let mapper = Arc::new(PlacesMapper::new(config.review_text_limit));
        let scorer = SimilarityScorer::with_containment_floor(config.containment_floor);
        debug!("Scoring candidate names with {}", scorer.strategy_name());

        Self {
            normalizer: QueryNormalizer::new(),
            selector: MatchSelector::new(scorer),
            search_client: SearchClient::new(api.clone(), executor.clone(), mapper.clone()),
            details_client: DetailsClient::new(api, executor, mapper, config.include_reviews),
            candidate_limit: config.candidate_limit,
            concurrency: config.concurrency.max(1),
        }
    }

    /// Resolve one query to exactly one [`MatchResult`]
    ///
    /// Only an authentication failure escapes as `Err`; every other failure
    /// is recorded on the result.
    pub async fn lookup(&self, query: &str) -> AppResult<MatchResult> {
        let name = self.normalizer.normalize(query);
        if name.is_empty() {
            warn!("Skipping empty query");
            return Ok(MatchResult::not_found(query));
        }

        // The raw query goes to the search call so the location still narrows results
        let candidates = match self.search_client.search(query, self.candidate_limit).await {
            Ok(candidates) => candidates,
            Err(e) => return Self::terminal(query, e),
        };

        let Some(selection) = self.selector.select(&name, &candidates) else {
            warn!("No results found for '{}'", query);
            return Ok(MatchResult::not_found(query));
        };

        let chosen = &selection.chosen.candidate;
        LogContext::match_decision(
            &chosen.display_name,
            &chosen.place_id,
            selection.chosen.score,
            selection.warning.as_deref(),
        );

        let details = self.details_client.fetch_details(&chosen.place_id).await;
        match details {
            Ok(mut detail) => {
                detail.fill_missing_from(chosen);
                Ok(MatchResult::matched(query, detail, selection))
            }
            Err(e) if e.is_authentication() => Err(e.into()),
            Err(e) => {
                warn!("Could not fetch details for {}: {}", chosen.place_id, e);
                let error = LookupError::PartialData {
                    place_id: chosen.place_id.clone(),
                    reason: e.to_string(),
                };
                Ok(MatchResult::partial(query, selection, error))
            }
        }
    }

    /// Resolve every query, returning results in input order
    ///
    /// Up to `concurrency` queries are in flight at once. A failed query does
    /// not affect the others; an authentication failure stops the whole batch.
    pub async fn lookup_batch(&self, queries: &[String]) -> AppResult<Vec<MatchResult>> {
        let total = queries.len();
        let timer = TimedOperation::new("batch lookup");

        let mut pending = stream::iter(queries.iter().enumerate())
            .map(move |(index, query)| async move {
                LogContext::batch_progress(index + 1, total, query);
                (index, self.lookup(query).await)
            })
            .buffer_unordered(self.concurrency);

        let mut slots: Vec<Option<MatchResult>> = vec![None; total];
        while let Some((index, outcome)) = pending.next().await {
            match outcome {
                Ok(result) => slots[index] = Some(result),
                Err(e) => {
                    error!("Aborting batch: {}", e);
                    return Err(e);
                }
            }
        }

        let results: Vec<MatchResult> = slots.into_iter().flatten().collect();
        let summary = BatchSummary::from_results(&results);
        info!(
            "Processed {} queries: {} matched, {} partial, {} failed",
            summary.total, summary.matched, summary.partial, summary.failed
        );
        timer.finish_with_info(&format!("{} queries", total));

        Ok(results)
    }

    fn terminal(query: &str, error: LookupError) -> AppResult<MatchResult> {
        if error.is_authentication() {
            return Err(AppError::from(error));
        }
        warn!("Lookup failed for '{}': {}", query, error);
        Ok(MatchResult::failed(query, error))
    }
}

/// Outcome counts for a finished batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub matched: usize,
    pub partial: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[MatchResult]) -> Self {
        results.iter().fold(
            Self {
                total: results.len(),
                ..Default::default()
            },
            |mut summary, result| {
                if result.is_success() {
                    summary.matched += 1;
                } else if result.selection().is_some() {
                    summary.partial += 1;
                } else {
                    summary.failed += 1;
                }
                summary
            },
        )
    }
}
