//! Input contract between the content parser and the index builder.
//!
//! The parser (an external collaborator) hands the builder fully parsed
//! documents: plain-text sections already split at heading boundaries. Nothing
//! here survives past the build step; only the serialized index ships.

use serde::{Deserialize, Serialize};

/// One article or page of the site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Site-relative URL, e.g. `/posts/composable-views`.
    pub path: String,
    /// Page title, indexed alongside every section heading.
    pub title: String,
    /// Sections in source order.
    pub sections: Vec<SectionInput>,
}

/// A heading plus the text beneath it, as delivered by the parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionInput {
    pub heading: String,
    /// Pre-assigned anchor id. When `None` the builder derives one by
    /// slugifying the heading; either way collisions are deduplicated.
    pub anchor: Option<String>,
    pub body: String,
}

impl Document {
    pub fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            sections: Vec::new(),
        }
    }

    pub fn with_section(
        mut self,
        heading: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        self.sections.push(SectionInput {
            heading: heading.into(),
            anchor: None,
            body: body.into(),
        });
        self
    }
}
