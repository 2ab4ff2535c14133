//! Flattened output records plus the CSV and review writers used by the binary

pub mod csv_writer;
pub mod record;
pub mod reviews_writer;

pub use csv_writer::{write_results, write_results_to_path};
pub use record::MatchRecord;
pub use reviews_writer::{write_reviews, write_reviews_to_path};
