//! Backoff and retry classification for Places API calls
//!
//! Delays grow as `base * 2^(attempt - 1)`, capped at `max_delay`, plus a
//! random fraction so concurrent workers do not retry in lockstep.

use crate::shared::config::LookupConfig;
use crate::shared::errors::LookupError;
use std::time::Duration;

/// Configuration for HTTP retry behavior
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    /// Total attempts per call, including the first
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    /// Minimum wait after the service reports a quota error
    pub rate_limit_floor: Duration,
    /// Jitter adds up to this fraction of the computed delay
    pub jitter_ratio: f64,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            rate_limit_floor: Duration::from_secs(2),
            jitter_ratio: 0.1,
        }
    }
}

impl BackoffPolicy {
    pub fn from_config(config: &LookupConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            base_delay: config.backoff_base,
            max_delay: config.backoff_max,
            rate_limit_floor: config.rate_limit_floor,
            jitter_ratio: config.jitter_ratio,
        }
    }

    /// Exponential delay before retrying after `attempt` failed, without jitter
    pub fn base_delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32
            .checked_shl(attempt.saturating_sub(1))
            .unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Jittered delay, within `[base_delay_for, base_delay_for * (1 + jitter_ratio)]`
    pub fn next_delay(&self, attempt: u32) -> Duration {
        let delay = self.base_delay_for(attempt);
        if self.jitter_ratio <= 0.0 {
            return delay;
        }

        let jitter = delay.as_secs_f64() * self.jitter_ratio * rand::random::<f64>();
        delay + Duration::from_secs_f64(jitter)
    }

    /// Delay for a specific failure; quota errors wait at least the floor
    /// and honour a server-provided Retry-After (capped at `max_delay`)
    pub fn delay_for(&self, attempt: u32, error: &LookupError) -> Duration {
        let delay = self.next_delay(attempt);
        match error {
            LookupError::RateLimit { retry_after } => {
                let server_delay = retry_after
                    .map(|d| d.min(self.max_delay))
                    .unwrap_or_default();
                delay.max(self.rate_limit_floor).max(server_delay)
            }
            _ => delay,
        }
    }

    /// Determines if an error should trigger a retry
    pub fn is_retryable(error: &LookupError) -> bool {
        match error {
            // Network-related errors - usually temporary
            LookupError::Network(_) => true,

            // Rate limiting - retry with an elevated delay
            LookupError::RateLimit { .. } => true,

            // Server errors are potentially temporary, other statuses are not
            LookupError::Api {
                status: Some(status),
                ..
            } => *status >= 500,

            // Malformed bodies, bad credentials and query-level outcomes
            LookupError::Api { status: None, .. }
            | LookupError::Authentication(_)
            | LookupError::NotFound { .. }
            | LookupError::PartialData { .. } => false,
        }
    }

    /// Tag one attempt's result for the retry loop
    pub fn classify<T>(
        &self,
        context: &RetryContext,
        result: Result<T, LookupError>,
    ) -> AttemptOutcome<T> {
        match result {
            Ok(value) => AttemptOutcome::Success(value),
            Err(error) if Self::is_retryable(&error) && context.has_remaining() => {
                AttemptOutcome::Retryable(error)
            }
            Err(error) => AttemptOutcome::Fatal(error),
        }
    }
}

/// Retry bookkeeping for a single outbound call
#[derive(Debug, Clone)]
pub struct RetryContext {
    /// 1-based number of the attempt in flight
    pub attempt: u32,
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryContext {
    pub fn new(policy: &BackoffPolicy) -> Self {
        Self {
            attempt: 1,
            max_attempts: policy.max_attempts.max(1),
            base_delay: policy.base_delay,
            max_delay: policy.max_delay,
        }
    }

    pub fn has_remaining(&self) -> bool {
        self.attempt < self.max_attempts
    }

    pub fn advance(&mut self) {
        self.attempt += 1;
    }
}

/// Result of one attempt as seen by the retry loop
#[derive(Debug)]
pub enum AttemptOutcome<T> {
    Success(T),
    Retryable(LookupError),
    /// Non-retryable, or retryable with no attempts left
    Fatal(LookupError),
}

/// Information extracted from HTTP 429 responses
#[derive(Debug, Clone)]
pub struct RateLimitInfo {
    /// How long to wait before next request (from Retry-After header)
    pub retry_after: Option<Duration>,
}

impl RateLimitInfo {
    /// Parse rate limit information from HTTP response headers
    pub fn from_headers(headers: &reqwest::header::HeaderMap) -> Self {
        let retry_after = headers
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_secs);

        Self { retry_after }
    }
}
