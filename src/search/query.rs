//! The query engine: load-once, then pure ranked lookups.

use std::collections::HashMap;

use crate::Result;
use crate::search::index::{SectionId, SerializedIndex};
use crate::search::tokenize::tokenize;

/// Default cap on returned hits; rendering cost is bounded by the caller's
/// limit, not by how common the query terms are.
pub const DEFAULT_LIMIT: usize = 10;

/// A title-field term is worth this many body-field terms.
pub const TITLE_WEIGHT: f32 = 2.0;

/// One ranked result, carrying everything needed to render a deep link.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub section: SectionId,
    pub title: String,
    pub path: String,
    pub heading: String,
    pub anchor: String,
    pub score: f32,
}

/// Read-only handle over a validated index.
///
/// Construct once at load time and share by reference; `search` never mutates.
/// A malformed artifact fails construction, so callers can fall back to a
/// "search unavailable" state up front instead of erroring per keystroke.
pub struct SearchClient {
    index: SerializedIndex,
}

impl SearchClient {
    /// Load and validate serialized index bytes (the bundled JSON artifact).
    pub fn load(bytes: &[u8]) -> Result<Self> {
        let index = SerializedIndex::from_json_bytes(bytes)?;
        tracing::info!(
            sections = index.section_count(),
            tokens = index.token_count(),
            "search_index_loaded"
        );
        Ok(Self { index })
    }

    /// Wrap an in-memory index, validating it first.
    pub fn new(index: SerializedIndex) -> Result<Self> {
        index.validate()?;
        Ok(Self { index })
    }

    pub fn index(&self) -> &SerializedIndex {
        &self.index
    }

    /// Resolve a free-text query into at most `limit` ranked hits.
    ///
    /// Query text goes through the same tokenizer as the builder. An empty or
    /// punctuation-only query, or one whose tokens appear nowhere, returns an
    /// empty list; that is the normal empty state, not an error. Ties are
    /// broken by section id, which is document order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        let terms = tokenize(query);
        if terms.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut scores: HashMap<SectionId, f32> = HashMap::new();
        for term in &terms {
            let Some(postings) = self.index.tokens.get(term) else {
                continue;
            };
            for posting in postings {
                *scores.entry(posting.section).or_insert(0.0) +=
                    posting.body_tf as f32 + TITLE_WEIGHT * posting.title_tf as f32;
            }
        }

        let mut ranked: Vec<(SectionId, f32)> = scores.into_iter().collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        ranked.truncate(limit);

        ranked
            .into_iter()
            .map(|(section, score)| {
                let meta = &self.index.sections[section as usize];
                SearchHit {
                    section,
                    title: meta.title.clone(),
                    path: meta.path.clone(),
                    heading: meta.heading.clone(),
                    anchor: meta.anchor.clone(),
                    score,
                }
            })
            .collect()
    }
}
