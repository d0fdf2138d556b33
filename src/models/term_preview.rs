//! Cached preview images for ring terminology.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A generated example image for a term such as "Round Brilliant".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermPreview {
    /// The term as displayed.
    pub term: String,
    /// Image location.
    pub image_url: String,
    /// Caption shown under the image.
    pub caption: String,
    /// When the preview was generated.
    pub generated_at: Option<DateTime<Utc>>,
}

/// Turns a term into a document id: lower-cased, with every character other
/// than `a-z` and `0-9` replaced by `_`.
#[must_use]
pub fn term_document_id(term: &str) -> String {
    term.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '_'
            }
        })
        .collect()
}
