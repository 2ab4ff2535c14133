pub mod executor;
pub mod retry_policy;

pub use executor::RetryExecutor;
pub use retry_policy::{AttemptOutcome, BackoffPolicy, RateLimitInfo, RetryContext};
