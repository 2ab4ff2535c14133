pub mod service;

pub use service::{BatchSummary, PlaceLookupService};
