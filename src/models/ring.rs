//! Ring and trashed-ring types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Designer name used when none is supplied.
pub const DEFAULT_DESIGNER_NAME: &str = "Anonymous";

/// Where a ring image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RingKind {
    /// Picked from the curated gallery.
    Gallery,
    /// Produced by the image-generation backend.
    #[default]
    Generated,
}

impl RingKind {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gallery => "gallery",
            Self::Generated => "generated",
        }
    }

    /// Parses a wire name (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gallery" => Some(Self::Gallery),
            "generated" => Some(Self::Generated),
            _ => None,
        }
    }
}

impl fmt::Display for RingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A ring in the active collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ring {
    /// Opaque identifier, assigned at creation.
    pub id: String,
    /// Image location.
    pub image_url: String,
    /// Generation prompt, empty for gallery rings.
    pub prompt: String,
    /// Optional display title (empty when unset).
    pub title: String,
    /// Gallery or generated.
    #[serde(rename = "type")]
    pub kind: RingKind,
    /// Who designed it.
    pub designer_name: String,
    /// Whether this is the user's final choice.
    pub is_the_one: bool,
    /// Creation time. `None` only for records that were stored without one.
    pub created_at: Option<DateTime<Utc>>,
}

impl Ring {
    /// Builds a ring from a draft with the given id and creation time.
    #[must_use]
    pub fn from_draft(id: impl Into<String>, draft: RingDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            image_url: draft.image_url,
            prompt: draft.prompt,
            title: draft.title,
            kind: draft.kind,
            designer_name: draft
                .designer_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DESIGNER_NAME.to_string()),
            is_the_one: false,
            created_at: Some(created_at),
        }
    }

    /// Returns a copy with the favorite flag set to `value`.
    #[must_use]
    pub fn with_the_one(mut self, value: bool) -> Self {
        self.is_the_one = value;
        self
    }
}

/// Input for adding a ring to the collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RingDraft {
    /// Image location.
    pub image_url: String,
    /// Generation prompt.
    #[serde(default)]
    pub prompt: String,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Gallery or generated.
    #[serde(default, rename = "type")]
    pub kind: RingKind,
    /// Designer name; defaults to [`DEFAULT_DESIGNER_NAME`].
    #[serde(default)]
    pub designer_name: Option<String>,
}

/// A soft-deleted ring.
///
/// The wrapped ring's `created_at` is the original creation time; on the wire
/// it is stored as `original_created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrashedRing {
    /// The ring as it was when deleted.
    #[serde(flatten)]
    pub ring: Ring,
    /// When it was moved to the trash.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl TrashedRing {
    /// Wraps a ring being moved to the trash at `deleted_at`.
    ///
    /// A ring without a creation time gets `deleted_at` as its original
    /// creation time.
    #[must_use]
    pub fn from_ring(mut ring: Ring, deleted_at: DateTime<Utc>) -> Self {
        if ring.created_at.is_none() {
            ring.created_at = Some(deleted_at);
        }
        Self {
            ring,
            deleted_at: Some(deleted_at),
        }
    }

    /// Returns the ring's id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.ring.id
    }

    /// Returns the original creation time.
    #[must_use]
    pub const fn original_created_at(&self) -> Option<DateTime<Utc>> {
        self.ring.created_at
    }

    /// Rebuilds the active ring, restoring `created_at` from the original
    /// creation time, or `fallback` when none was stored.
    #[must_use]
    pub fn into_ring(self, fallback: DateTime<Utc>) -> Ring {
        let mut ring = self.ring;
        if ring.created_at.is_none() {
            ring.created_at = Some(fallback);
        }
        ring
    }
}
