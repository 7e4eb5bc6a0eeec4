//! Text normalization shared by the index builder and the query engine.
//!
//! Both sides must tokenize identically or matching silently breaks, so this
//! is the only place normalization rules live.

/// Tokens longer than this are dropped (minified blobs, base64 runs).
pub const MAX_TOKEN_LEN: usize = 40;

/// Normalize raw text into index tokens: split on non-alphanumeric boundaries,
/// lowercase, drop empties and over-long fragments.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .filter(|word| word.chars().count() <= MAX_TOKEN_LEN)
        .map(|word| word.to_lowercase())
        .collect()
}
