mod client;
mod types;

pub use client::{ComparisonService, HttpComparisonService};
pub use types::{ComparisonRequest, ComparisonResult, FileSlot, SelectedFile};
