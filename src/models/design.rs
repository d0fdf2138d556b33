//! Confirmed design types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Title stored for a design that has none.
pub const DEFAULT_DESIGN_TITLE: &str = "Custom Design";

/// Kind of a confirmed design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesignKind {
    /// A curated gallery ring.
    Gallery,
    /// A generated (custom) ring.
    Custom,
}

impl DesignKind {
    /// Returns the type tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gallery => "gallery",
            Self::Custom => "custom",
        }
    }

    /// Parses a type tag (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "gallery" => Some(Self::Gallery),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

impl fmt::Display for DesignKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A pre-curated ring offered in the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryRing {
    /// Position in the gallery.
    pub id: u32,
    /// Display title.
    pub title: String,
    /// Marketing blurb.
    pub description: String,
    /// Image location.
    #[serde(default)]
    pub image_url: String,
    /// Image shown when `image_url` is missing or fails to load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_url: Option<String>,
}

impl GalleryRing {
    /// The image to show: `image_url`, or the fallback when it is empty.
    #[must_use]
    pub fn display_url(&self) -> &str {
        match self.fallback_url.as_deref() {
            Some(fallback) if self.image_url.trim().is_empty() => fallback,
            _ => &self.image_url,
        }
    }
}

/// The most recently confirmed design, as kept by the local mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDesign {
    /// Gallery or custom.
    #[serde(rename = "type")]
    pub kind: DesignKind,
    /// Image location.
    pub image_url: String,
    /// The user's description or the gallery blurb.
    pub description: String,
    /// Generation prompt, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Display title, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// When the design was confirmed.
    pub timestamp: DateTime<Utc>,
}

/// A design archived in the remote `designs` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignRecord {
    /// Document name assigned by the store; empty before it is saved.
    pub id: String,
    /// Type tag (`gallery` or `custom`); kept as text since older records vary.
    pub design_type: String,
    /// Display title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Image location.
    pub image_url: String,
    /// Generation prompt.
    pub ai_prompt: String,
    /// When it was archived.
    pub created_at: Option<DateTime<Utc>>,
}

impl DesignRecord {
    /// Builds the archive record for a design saved at `created_at`.
    #[must_use]
    pub fn from_design(design: &SavedDesign, created_at: DateTime<Utc>) -> Self {
        Self {
            id: String::new(),
            design_type: design.kind.as_str().to_string(),
            title: design
                .title
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_DESIGN_TITLE.to_string()),
            description: design.description.clone(),
            image_url: design.image_url.clone(),
            ai_prompt: design.prompt.clone().unwrap_or_default(),
            created_at: Some(created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> SavedDesign {
        SavedDesign {
            kind: DesignKind::Custom,
            image_url: "https://img/ring.png".to_string(),
            description: "Oval halo in rose gold".to_string(),
            prompt: None,
            title: None,
            timestamp: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn test_design_kind_parse() {
        assert_eq!(DesignKind::parse("Gallery"), Some(DesignKind::Gallery));
        assert_eq!(DesignKind::parse(" custom "), Some(DesignKind::Custom));
        assert_eq!(DesignKind::parse("generated"), None);
    }

    #[test]
    fn test_saved_design_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "custom");
        assert_eq!(json["imageUrl"], "https://img/ring.png");
        assert!(json.get("prompt").is_none());
    }

    #[test]
    fn test_record_defaults_title_and_prompt() {
        let created = Utc.timestamp_opt(1_700_000_100, 0).unwrap();
        let record = DesignRecord::from_design(&sample(), created);
        assert_eq!(record.title, DEFAULT_DESIGN_TITLE);
        assert_eq!(record.ai_prompt, "");
        assert_eq!(record.design_type, "custom");
        assert_eq!(record.created_at, Some(created));
    }
}
