//! # Papers Fetcher
//!
//! Query PubMed for papers matching a search term, keep the authors whose
//! affiliation looks like a company rather than an academic institution, and
//! export one row per paper to CSV (or print to the console).
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (PaperRecord, SearchQuery)
//! - [`sources`]: PubMed E-utilities client (esearch + efetch)
//! - [`affiliation`]: Author name composition and the academic/company heuristic
//! - [`pipeline`]: The sequential search-then-fetch loop with rate-limit pacing
//! - [`export`]: CSV writing and console output

pub mod affiliation;
pub mod export;
pub mod models;
pub mod pipeline;
pub mod sources;

// Re-export commonly used types
pub use models::{PaperRecord, SearchQuery};
pub use sources::pubmed::PubMedClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
