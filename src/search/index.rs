//! The serialized index: the one artifact that persists into the deployed site.
//!
//! Two top-level members, per the wire contract: a token -> postings map and a
//! section-id -> metadata table. The token map is a `BTreeMap` and postings are
//! kept sorted by section id, so encoding the same content set twice produces
//! byte-identical JSON. Reproducible deployments depend on that.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// Bump when the schema or tokenizer changes. Checked at load time so a stale
// artifact fails fast instead of deep inside a query.
pub const FORMAT_VERSION: u32 = 1;

/// Identifies one indexed section. Assigned sequentially in document order
/// during the build, which makes it double as the ranking tie-break key.
pub type SectionId = u32;

/// Per-section term frequencies for one token, split by field so heading and
/// title matches can outrank body matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Posting {
    pub section: SectionId,
    pub body_tf: u32,
    pub title_tf: u32,
}

/// Everything needed to render one result as a clickable deep link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionMeta {
    pub path: String,
    pub anchor: String,
    pub heading: String,
    pub title: String,
}

/// The complete search index, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SerializedIndex {
    pub version: u32,
    pub tokens: BTreeMap<String, Vec<Posting>>,
    pub sections: Vec<SectionMeta>,
}

impl SerializedIndex {
    /// Encode to JSON. Deterministic: sorted token keys, sorted postings, and
    /// a section table ordered by id.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode and validate. All schema problems surface here, at load time.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        let index: SerializedIndex = serde_json::from_slice(bytes)?;
        index.validate()?;
        Ok(index)
    }

    /// Check internal invariants: version match, postings in range, postings
    /// strictly sorted by section id, no token mapped to nothing.
    pub fn validate(&self) -> Result<()> {
        if self.version != FORMAT_VERSION {
            return Err(Error::UnsupportedVersion {
                found: self.version,
                expected: FORMAT_VERSION,
            });
        }
        let section_count = self.sections.len() as u64;
        for (token, postings) in &self.tokens {
            if postings.is_empty() {
                return Err(Error::InvalidIndex(format!(
                    "token {token:?} has no postings"
                )));
            }
            let mut prev: Option<SectionId> = None;
            for posting in postings {
                if u64::from(posting.section) >= section_count {
                    return Err(Error::InvalidIndex(format!(
                        "token {token:?} references unknown section {}",
                        posting.section
                    )));
                }
                if posting.body_tf == 0 && posting.title_tf == 0 {
                    return Err(Error::InvalidIndex(format!(
                        "token {token:?} has a zero-frequency posting for section {}",
                        posting.section
                    )));
                }
                if let Some(p) = prev
                    && p >= posting.section
                {
                    return Err(Error::InvalidIndex(format!(
                        "postings for token {token:?} are not strictly sorted"
                    )));
                }
                prev = Some(posting.section);
            }
        }
        Ok(())
    }

    /// Number of indexed sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Number of distinct tokens.
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}
