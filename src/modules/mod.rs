pub mod lookup;
pub mod report;
