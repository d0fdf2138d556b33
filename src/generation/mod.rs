//! Image generation.
//!
//! Ring images come from a backend exposing `POST {base}/api/generate-ring`.
//! There is no retry policy: [`retry`] is a plain second call.

mod client;

pub use client::RingApiClient;

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum description length, in characters, after trimming.
pub const MIN_DESCRIPTION_CHARS: usize = 10;

/// Maximum description length, in characters, after trimming.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// A request for one ring image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Text prompt.
    pub prompt: String,
    /// Previous image to refine, if any.
    pub reference_image: Option<String>,
}

impl GenerationRequest {
    /// A fresh generation.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            reference_image: None,
        }
    }

    /// A refinement of an earlier image.
    #[must_use]
    pub fn refine(prompt: impl Into<String>, reference_image: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            reference_image: Some(reference_image.into()),
        }
    }

    /// Whether this refines an earlier image.
    #[must_use]
    pub const fn is_refinement(&self) -> bool {
        self.reference_image.is_some()
    }
}

/// A generated image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    /// Image location.
    pub image_url: String,
    /// The prompt the backend actually used.
    pub prompt: String,
    /// The request's prompt.
    pub description: String,
    /// Whether this was a refinement.
    pub is_refinement: bool,
}

/// Trait for image generation backends.
pub trait ImageGenerator: Send + Sync {
    /// The backend name.
    fn name(&self) -> &'static str;

    /// Generates one image.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is not configured, the request fails,
    /// or no image comes back.
    fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage>;
}

/// Generates the same description again.
///
/// # Errors
///
/// Returns whatever the new attempt returns.
pub fn retry(generator: &dyn ImageGenerator, description: &str) -> Result<GeneratedImage> {
    tracing::info!(backend = generator.name(), "Retrying generation");
    generator.generate(&GenerationRequest::new(description))
}

/// Checks a ring description and returns it trimmed.
///
/// # Errors
///
/// Returns `InvalidInput` with a user-facing message when the trimmed text is
/// empty, shorter than [`MIN_DESCRIPTION_CHARS`] or longer than
/// [`MAX_DESCRIPTION_CHARS`].
pub fn validate_description(description: &str) -> Result<&str> {
    let trimmed = description.trim();
    let len = trimmed.chars().count();

    if len == 0 {
        return Err(Error::InvalidInput(
            "Please describe your dream ring".to_string(),
        ));
    }
    if len < MIN_DESCRIPTION_CHARS {
        return Err(Error::InvalidInput(format!(
            "Please provide more details (at least {MIN_DESCRIPTION_CHARS} characters)"
        )));
    }
    if len > MAX_DESCRIPTION_CHARS {
        return Err(Error::InvalidInput(format!(
            "Description is too long (max {MAX_DESCRIPTION_CHARS} characters)"
        )));
    }
    Ok(trimmed)
}

/// Terminology guide categories, each with its own photography prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TermCategory {
    /// Diamond shapes.
    #[default]
    Shapes,
    /// Settings.
    Settings,
    /// Metals.
    Metals,
    /// Accent details.
    Accents,
}

impl TermCategory {
    /// Parses a category name; unknown names fall back to shapes.
    #[must_use]
    pub fn parse_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "settings" => Self::Settings,
            "metals" => Self::Metals,
            "accents" => Self::Accents,
            _ => Self::Shapes,
        }
    }

    /// Builds the product-photography prompt for a term.
    #[must_use]
    pub fn prompt_for(self, term: &str) -> String {
        let term = term.to_lowercase();
        match self {
            Self::Shapes => format!(
                "Professional product photography of a {term} cut diamond engagement ring, centered on pure white background, studio lighting, sharp focus, luxury jewelry advertisement style, photorealistic, high detail"
            ),
            Self::Settings => format!(
                "Professional product photography of an engagement ring with {term} setting, centered on pure white background, studio lighting, sharp focus, luxury jewelry advertisement style, photorealistic, high detail"
            ),
            Self::Metals => format!(
                "Professional product photography of a {term} engagement ring with diamond solitaire, centered on pure white background, studio lighting showing metal color, luxury jewelry advertisement style, photorealistic"
            ),
            Self::Accents => format!(
                "Professional product photography of an engagement ring featuring {term} detail, centered on pure white background, studio lighting, luxury jewelry advertisement, close-up showing the {term} feature"
            ),
        }
    }
}

impl fmt::Display for TermCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Shapes => "shapes",
            Self::Settings => "settings",
            Self::Metals => "metals",
            Self::Accents => "accents",
        };
        f.write_str(name)
    }
}
