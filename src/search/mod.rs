//! Search layer facade.
//!
//! This module provides everything that runs against a built index:
//!
//! - **[`tokenize`]**: the one normalization pass shared by builder and engine.
//! - **[`index`]**: the serialized index schema, encoding, and load-time validation.
//! - **[`query`]**: the query engine (`SearchClient`) and ranked hits.
//! - **[`session`]**: latest-request-wins ticketing for debounced callers.

pub mod index;
pub mod query;
pub mod session;
pub mod tokenize;
