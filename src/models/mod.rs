//! Core data structures shared across the library.

mod paper;
mod search;

pub use paper::{PaperRecord, CSV_HEADERS, NOT_AVAILABLE};
pub use search::SearchQuery;
