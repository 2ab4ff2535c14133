pub mod place_lookup_service;

pub use place_lookup_service::{BatchSummary, PlaceLookupService};
