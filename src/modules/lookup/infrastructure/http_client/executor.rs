//! Rate-limited, retrying execution of Places API calls
//!
//! One executor is shared by the search and details clients so pacing and
//! backoff apply across both call types.

use super::retry_policy::{AttemptOutcome, BackoffPolicy, RetryContext};
use crate::shared::errors::LookupError;
use crate::shared::utils::RateLimiter;
use log::{debug, warn};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout};

pub struct RetryExecutor {
    rate_limiter: Arc<RateLimiter>,
    policy: BackoffPolicy,
    call_timeout: Option<Duration>,
}

impl RetryExecutor {
    pub fn new(rate_limiter: Arc<RateLimiter>, policy: BackoffPolicy) -> Self {
        Self {
            rate_limiter,
            policy,
            call_timeout: None,
        }
    }

    /// Treat any attempt running longer than `call_timeout` as a network error
    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = Some(call_timeout);
        self
    }

    /// Execute an operation with pacing and exponential backoff
    ///
    /// Every attempt, retries included, first waits for a rate-limiter slot.
    /// Non-retryable errors return immediately; retryable ones are retried
    /// until `max_attempts` is reached and then returned as-is.
    pub async fn execute<T, F, Fut>(&self, operation_name: &str, operation: F) -> Result<T, LookupError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, LookupError>>,
    {
        let mut context = RetryContext::new(&self.policy);

        loop {
            self.rate_limiter.await_slot().await;

            let result = self.run_attempt(operation()).await;

            match self.policy.classify(&context, result) {
                AttemptOutcome::Success(value) => {
                    if context.attempt > 1 {
                        debug!(
                            "{} succeeded on attempt {}/{}",
                            operation_name, context.attempt, context.max_attempts
                        );
                    }
                    return Ok(value);
                }
                AttemptOutcome::Retryable(error) => {
                    let delay = self.policy.delay_for(context.attempt, &error);
                    warn!(
                        "{} failed on attempt {}/{} ({}), retrying in {:?}",
                        operation_name, context.attempt, context.max_attempts, error, delay
                    );
                    sleep(delay).await;
                    context.advance();
                }
                AttemptOutcome::Fatal(error) => {
                    if BackoffPolicy::is_retryable(&error) {
                        warn!(
                            "{} failed on final attempt {}/{} ({}), giving up",
                            operation_name, context.attempt, context.max_attempts, error
                        );
                    } else {
                        debug!(
                            "{} failed with non-retryable error: {}",
                            operation_name, error
                        );
                    }
                    return Err(error);
                }
            }
        }
    }

    async fn run_attempt<T, Fut>(&self, attempt: Fut) -> Result<T, LookupError>
    where
        Fut: Future<Output = Result<T, LookupError>>,
    {
        match self.call_timeout {
            Some(limit) => timeout(limit, attempt).await.unwrap_or_else(|_| {
                Err(LookupError::Network(format!(
                    "Request timed out after {:?}",
                    limit
                )))
            }),
            None => attempt.await,
        }
    }
}
