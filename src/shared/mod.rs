// Cross-cutting concerns used by every module

pub mod config;
pub mod errors;
pub mod utils;

pub use config::{LookupConfig, LookupConfigBuilder};
pub use errors::{AppError, AppResult, LookupError};
