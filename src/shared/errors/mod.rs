pub mod app_error;
pub mod lookup_error;

pub use app_error::{AppError, AppResult};
pub use lookup_error::LookupError;
