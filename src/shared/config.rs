//! Runtime configuration for place lookups
//!
//! Values come from defaults, then `PLACES_*` environment variables (a `.env`
//! file is honoured), then whatever the caller overrides through the builder.

use crate::shared::errors::{AppError, AppResult};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://places.googleapis.com/v1";
pub const API_KEY_ENV: &str = "GOOGLE_PLACES_API_KEY";

/// Everything the lookup core consumes. Parsing of the surrounding CLI lives elsewhere.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    pub api_key: String,
    pub base_url: String,
    pub language_code: String,

    /// Maximum number of candidates requested and kept per search (k)
    pub candidate_limit: usize,

    /// Per-call timeout, after which the call counts as a network error
    pub request_timeout: Duration,

    /// Minimum spacing between any two outbound calls, across all workers
    pub min_request_interval: Duration,

    // Retry behaviour
    /// Total attempts per call, including the first
    pub max_attempts: u32,
    pub backoff_base: Duration,
    pub backoff_max: Duration,
    /// Minimum wait after an HTTP 429
    pub rate_limit_floor: Duration,
    /// Upper bound of the random fraction added to each backoff delay
    pub jitter_ratio: f64,

    // Details
    pub include_reviews: bool,
    /// Review text longer than this many characters is cut at a word boundary
    pub review_text_limit: usize,

    // Matching
    /// When set, a candidate whose name contains the query name scores at least this much
    pub containment_floor: Option<f64>,

    /// Number of queries resolved concurrently
    pub concurrency: usize,
}

impl LookupConfig {
    /// Creates a configuration with production defaults for the given key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            language_code: "en".to_string(),
            candidate_limit: 5,
            request_timeout: Duration::from_secs(10),
            min_request_interval: Duration::from_millis(500),
            max_attempts: 3,
            backoff_base: Duration::from_secs(1),
            backoff_max: Duration::from_secs(30),
            rate_limit_floor: Duration::from_secs(2),
            jitter_ratio: 0.1,
            include_reviews: true,
            review_text_limit: 500,
            containment_floor: None,
            concurrency: 1,
        }
    }

    /// Load configuration from the environment
    ///
    /// The API key is optional here so the CLI can still supply it; call
    /// [`LookupConfig::validate`] before use.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var(API_KEY_ENV).unwrap_or_default();
        let mut config = Self::new(api_key);

        if let Some(url) = env_string("PLACES_BASE_URL") {
            config.base_url = url;
        }
        if let Some(lang) = env_string("PLACES_LANGUAGE") {
            config.language_code = lang;
        }
        if let Some(k) = env_string("PLACES_CANDIDATE_LIMIT") {
            config.candidate_limit = k.parse()?;
        }
        if let Some(secs) = env_string("PLACES_TIMEOUT_SECS") {
            config.request_timeout = parse_secs(&secs)?;
        }
        if let Some(secs) = env_string("PLACES_REQUEST_DELAY_SECS") {
            config.min_request_interval = parse_secs(&secs)?;
        }
        if let Some(attempts) = env_string("PLACES_MAX_ATTEMPTS") {
            config.max_attempts = attempts.parse()?;
        }
        if let Some(ms) = env_string("PLACES_BACKOFF_BASE_MS") {
            config.backoff_base = Duration::from_millis(ms.parse()?);
        }
        if let Some(ms) = env_string("PLACES_BACKOFF_MAX_MS") {
            config.backoff_max = Duration::from_millis(ms.parse()?);
        }
        if let Some(limit) = env_string("PLACES_REVIEW_TEXT_LIMIT") {
            config.review_text_limit = limit.parse()?;
        }
        if let Some(workers) = env_string("PLACES_CONCURRENCY") {
            config.concurrency = workers.parse()?;
        }

        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> AppResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(AppError::ConfigError(format!(
                "No API key provided. Set {} or pass --api-key",
                API_KEY_ENV
            )));
        }

        if self.candidate_limit == 0 {
            return Err(AppError::ConfigError(
                "candidate_limit must be > 0".to_string(),
            ));
        }

        if self.max_attempts == 0 {
            return Err(AppError::ConfigError("max_attempts must be > 0".to_string()));
        }

        if self.backoff_base > self.backoff_max {
            return Err(AppError::ConfigError(format!(
                "backoff_base ({:?}) cannot exceed backoff_max ({:?})",
                self.backoff_base, self.backoff_max
            )));
        }

        if !(0.0..=1.0).contains(&self.jitter_ratio) {
            return Err(AppError::ConfigError(format!(
                "jitter_ratio must be between 0.0 and 1.0, got {}",
                self.jitter_ratio
            )));
        }

        if let Some(floor) = self.containment_floor {
            if !(0.0..=1.0).contains(&floor) {
                return Err(AppError::ConfigError(format!(
                    "containment_floor must be between 0.0 and 1.0, got {}",
                    floor
                )));
            }
        }

        if self.concurrency == 0 {
            return Err(AppError::ConfigError("concurrency must be > 0".to_string()));
        }

        if self.request_timeout.is_zero() {
            return Err(AppError::ConfigError(
                "request_timeout must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_secs(value: &str) -> AppResult<Duration> {
    let secs: f64 = value.parse()?;
    Duration::try_from_secs_f64(secs)
        .map_err(|e| AppError::ConfigError(format!("Invalid duration '{}': {}", value, e)))
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Builder for LookupConfig to make test setup and CLI overrides easier
pub struct LookupConfigBuilder {
    config: LookupConfig,
}

impl LookupConfigBuilder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            config: LookupConfig::new(api_key),
        }
    }

    pub fn from_config(config: LookupConfig) -> Self {
        Self { config }
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn candidate_limit(mut self, k: usize) -> Self {
        self.config.candidate_limit = k;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    pub fn min_request_interval(mut self, interval: Duration) -> Self {
        self.config.min_request_interval = interval;
        self
    }

    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.max_attempts = attempts;
        self
    }

    pub fn backoff(mut self, base: Duration, max: Duration) -> Self {
        self.config.backoff_base = base;
        self.config.backoff_max = max;
        self
    }

    pub fn rate_limit_floor(mut self, floor: Duration) -> Self {
        self.config.rate_limit_floor = floor;
        self
    }

    pub fn jitter_ratio(mut self, ratio: f64) -> Self {
        self.config.jitter_ratio = ratio;
        self
    }

    pub fn include_reviews(mut self, include: bool) -> Self {
        self.config.include_reviews = include;
        self
    }

    pub fn review_text_limit(mut self, limit: usize) -> Self {
        self.config.review_text_limit = limit;
        self
    }

    pub fn containment_floor(mut self, floor: Option<f64>) -> Self {
        self.config.containment_floor = floor;
        self
    }

    pub fn concurrency(mut self, workers: usize) -> Self {
        self.config.concurrency = workers;
        self
    }

    pub fn build(self) -> AppResult<LookupConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LookupConfig::new("test-key");
        assert!(config.validate().is_ok());
        assert_eq!(config.candidate_limit, 5);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.min_request_interval, Duration::from_millis(500));
        assert_eq!(config.review_text_limit, 500);
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        let config = LookupConfig::new("   ");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn test_zero_candidate_limit_is_invalid() {
        let result = LookupConfigBuilder::new("key").candidate_limit(0).build();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("candidate_limit"));
    }

    #[test]
    fn test_zero_attempts_is_invalid() {
        let result = LookupConfigBuilder::new("key").max_attempts(0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_backoff_base_must_not_exceed_max() {
        let result = LookupConfigBuilder::new("key")
            .backoff(Duration::from_secs(10), Duration::from_secs(1))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_jitter_ratio_bounds() {
        assert!(LookupConfigBuilder::new("key").jitter_ratio(1.5).build().is_err());
        assert!(LookupConfigBuilder::new("key").jitter_ratio(0.0).build().is_ok());
    }

    #[test]
    fn test_containment_floor_bounds() {
        assert!(LookupConfigBuilder::new("key")
            .containment_floor(Some(1.2))
            .build()
            .is_err());
        assert!(LookupConfigBuilder::new("key")
            .containment_floor(Some(0.8))
            .build()
            .is_ok());
    }

    #[test]
    fn test_parse_secs() {
        assert_eq!(parse_secs("0.5").unwrap(), Duration::from_millis(500));
        assert!(parse_secs("-1").is_err());
        assert!(parse_secs("soon").is_err());
    }

    #[test]
    fn test_builder_chaining() {
        let config = LookupConfigBuilder::new("key")
            .concurrency(4)
            .include_reviews(false)
            .candidate_limit(3)
            .min_request_interval(Duration::ZERO)
            .build()
            .unwrap();

        assert_eq!(config.concurrency, 4);
        assert!(!config.include_reviews);
        assert_eq!(config.candidate_limit, 3);
        assert!(config.min_request_interval.is_zero());
    }
}
