//! Build-time section indexing and client-side search for a static site.
//!
//! Two halves, evaluated in dependency order:
//!
//! - **[`indexer`]**: walks the parsed content set at build time and produces a
//!   [`SerializedIndex`](search::index::SerializedIndex), the only artifact that
//!   ships with the deployed site.
//! - **[`search`]**: loads that artifact once, validates it, and answers
//!   free-text queries with ranked section hits.
//!
//! Both halves share one tokenizer ([`search::tokenize`]); anything else would
//! silently break matching between what was indexed and what is queried.

pub mod indexer;
pub mod model;
pub mod search;

/// Errors surfaced by this crate.
///
/// Everything here is detectable at index load time. Queries themselves are
/// infallible: an empty or unmatched query returns an empty result list.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The index bytes did not parse as the expected JSON shape.
    #[error("malformed index: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The index was written by an incompatible format version.
    #[error("unsupported index version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// The index parsed but violates its own internal invariants.
    #[error("invalid index: {0}")]
    InvalidIndex(String),
}

pub type Result<T> = std::result::Result<T, Error>;
