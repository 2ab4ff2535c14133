pub mod details_client;
pub mod search_client;

pub use details_client::DetailsClient;
pub use search_client::SearchClient;
