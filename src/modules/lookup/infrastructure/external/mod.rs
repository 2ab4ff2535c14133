pub mod google_places;

pub use google_places::{GooglePlacesClient, PlacesMapper};
