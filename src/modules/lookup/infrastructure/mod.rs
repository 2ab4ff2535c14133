pub mod adapters;
pub mod external;
pub mod http_client;

pub use adapters::{DetailsClient, SearchClient};
pub use external::{GooglePlacesClient, PlacesMapper};
pub use http_client::{BackoffPolicy, RetryExecutor};
