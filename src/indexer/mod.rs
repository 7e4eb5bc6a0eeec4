//! Build-time index construction.
//!
//! The builder consumes the parsed content set in document order, assigns
//! sequential section ids, derives and deduplicates anchors, and accumulates
//! per-field term frequencies into the serialized index. It never mutates its
//! inputs and produces byte-identical output for identical input sets.

use std::collections::{BTreeMap, HashMap};

use crate::model::{Document, SectionInput};
use crate::search::index::{FORMAT_VERSION, Posting, SectionId, SectionMeta, SerializedIndex};
use crate::search::tokenize::tokenize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Accumulates documents and produces a [`SerializedIndex`].
///
/// The index is regenerated from scratch on every build; there is no
/// incremental path, so stale entries cannot survive a content change.
#[derive(Default)]
pub struct IndexBuilder {
    sections: Vec<SectionMeta>,
    // token -> section id -> (body_tf, title_tf)
    postings: BTreeMap<String, BTreeMap<SectionId, (u32, u32)>>,
    anchors: AnchorSlugger,
    documents_seen: usize,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every section of `doc`. Sections that tokenize to nothing are
    /// skipped silently; a document with no sections contributes nothing.
    pub fn add_document(&mut self, doc: &Document) {
        let tokens = TokenizedDocument::from(doc);
        self.add_tokenized(doc, tokens);
    }

    fn add_tokenized(&mut self, doc: &Document, tokens: TokenizedDocument) {
        self.documents_seen += 1;
        for (section, (heading_tokens, body_tokens)) in doc.sections.iter().zip(tokens.sections) {
            self.add_section(doc, section, heading_tokens, body_tokens, &tokens.title);
        }
    }

    fn add_section(
        &mut self,
        doc: &Document,
        section: &SectionInput,
        heading_tokens: Vec<String>,
        body_tokens: Vec<String>,
        title_tokens: &[String],
    ) {
        if heading_tokens.is_empty() && body_tokens.is_empty() {
            return;
        }

        let id = self.sections.len() as SectionId;
        let anchor = self.anchors.assign(section.anchor.as_deref(), &section.heading);
        self.sections.push(SectionMeta {
            path: doc.path.clone(),
            anchor,
            heading: section.heading.clone(),
            title: doc.title.clone(),
        });

        for token in body_tokens {
            let entry = self.postings.entry(token).or_default().entry(id).or_insert((0, 0));
            entry.0 += 1;
        }
        // Heading and page title both count toward the title field.
        for token in heading_tokens.iter().chain(title_tokens.iter()) {
            let entry = self
                .postings
                .entry(token.clone())
                .or_default()
                .entry(id)
                .or_insert((0, 0));
            entry.1 += 1;
        }
    }

    /// Finish the build. Postings come out sorted by section id because the
    /// inner maps are ordered; the outer `BTreeMap` orders the token keys.
    pub fn finish(self) -> SerializedIndex {
        let tokens: BTreeMap<String, Vec<Posting>> = self
            .postings
            .into_iter()
            .map(|(token, by_section)| {
                let postings = by_section
                    .into_iter()
                    .map(|(section, (body_tf, title_tf))| Posting {
                        section,
                        body_tf,
                        title_tf,
                    })
                    .collect();
                (token, postings)
            })
            .collect();

        let index = SerializedIndex {
            version: FORMAT_VERSION,
            tokens,
            sections: self.sections,
        };
        tracing::info!(
            documents = self.documents_seen,
            sections = index.section_count(),
            tokens = index.token_count(),
            "index_built"
        );
        index
    }
}

/// Tokenization output for one document, separated so the tokenize pass can
/// run ahead of (and in parallel with) the sequential merge.
struct TokenizedDocument {
    title: Vec<String>,
    // (heading tokens, body tokens), parallel to `Document::sections`.
    sections: Vec<(Vec<String>, Vec<String>)>,
}

impl From<&Document> for TokenizedDocument {
    fn from(doc: &Document) -> Self {
        Self {
            title: tokenize(&doc.title),
            sections: doc
                .sections
                .iter()
                .map(|s| (tokenize(&s.heading), tokenize(&s.body)))
                .collect(),
        }
    }
}

/// Build an index over a full document set in one call.
///
/// With the `parallel` feature, per-document tokenization runs on rayon; the
/// merge stays sequential in document order, so output bytes are unchanged.
pub fn build_index(docs: &[Document]) -> SerializedIndex {
    let mut builder = IndexBuilder::new();

    #[cfg(feature = "parallel")]
    {
        let tokenized: Vec<TokenizedDocument> =
            docs.par_iter().map(TokenizedDocument::from).collect();
        for (doc, tokens) in docs.iter().zip(tokenized) {
            builder.add_tokenized(doc, tokens);
        }
    }

    #[cfg(not(feature = "parallel"))]
    for doc in docs {
        builder.add_document(doc);
    }

    builder.finish()
}

/// Derives anchor ids from headings and keeps them collision-free.
///
/// Repeated headings get `-1`, `-2`, ... suffixes in encounter order, so two
/// "Overview" sections end up as `overview` and `overview-1`.
#[derive(Default)]
struct AnchorSlugger {
    seen: HashMap<String, u32>,
}

impl AnchorSlugger {
    fn assign(&mut self, preset: Option<&str>, heading: &str) -> String {
        let base = match preset {
            Some(anchor) if !anchor.trim().is_empty() => anchor.trim().to_string(),
            _ => slugify(heading),
        };
        if !self.seen.contains_key(&base) {
            self.seen.insert(base.clone(), 0);
            return base;
        }
        // Collision: probe past suffixes already taken by literal headings.
        let mut n = self.seen[&base];
        loop {
            n += 1;
            let candidate = format!("{base}-{n}");
            if !self.seen.contains_key(&candidate) {
                self.seen.insert(base, n);
                self.seen.insert(candidate.clone(), 0);
                return candidate;
            }
        }
    }
}

fn slugify(heading: &str) -> String {
    let mut slug = String::with_capacity(heading.len());
    let mut pending_dash = false;
    for c in heading.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug
    }
}
