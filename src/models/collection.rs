//! Named document collections.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four collections the document store exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Archived confirmed designs.
    Designs,
    /// Cached terminology preview images.
    TermPreviews,
    /// Active rings.
    Rings,
    /// Soft-deleted rings.
    Trash,
}

impl Collection {
    /// Returns the collection id used in document paths.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Designs => "ring_designs",
            Self::TermPreviews => "term_previews",
            Self::Rings => "ring_collection",
            Self::Trash => "ring_trash",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
