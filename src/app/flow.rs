//! The design flow controller.

use super::navigation::{NavigationState, Screen};
use crate::generation::{GenerationRequest, ImageGenerator, validate_description};
use crate::models::{DesignKind, GalleryRing, SavedDesign};
use crate::services::{Confirmation, DesignService};
use crate::{Error, Result};
use std::sync::Arc;

/// Title given to generated designs.
pub const CUSTOM_DESIGN_TITLE: &str = "Your Custom Design";

/// Drives one user through choosing, previewing and confirming a design.
///
/// Holds the navigation state and the design being considered; rendering is
/// left to the caller, which reads [`DesignFlow::navigation`] after each step.
pub struct DesignFlow {
    navigation: NavigationState,
    current: Option<SavedDesign>,
    gallery: Vec<GalleryRing>,
    generator: Arc<dyn ImageGenerator>,
    designs: DesignService,
}

impl DesignFlow {
    /// Creates a flow on the landing screen.
    #[must_use]
    pub fn new(
        gallery: Vec<GalleryRing>,
        generator: Arc<dyn ImageGenerator>,
        designs: DesignService,
    ) -> Self {
        Self {
            navigation: NavigationState::new(),
            current: None,
            gallery,
            generator,
            designs,
        }
    }

    /// Returns the design saved by an earlier session, if any.
    #[must_use]
    pub fn saved_design(&self) -> Option<SavedDesign> {
        let saved = self.designs.current();
        if let Some(design) = &saved {
            tracing::info!(kind = %design.kind, "Found saved design");
        }
        saved
    }

    /// Navigation state.
    #[must_use]
    pub const fn navigation(&self) -> NavigationState {
        self.navigation
    }

    /// The design being considered.
    #[must_use]
    pub const fn current_design(&self) -> Option<&SavedDesign> {
        self.current.as_ref()
    }

    /// The curated gallery.
    #[must_use]
    pub fn gallery(&self) -> &[GalleryRing] {
        &self.gallery
    }

    /// Shows a screen.
    pub fn show(&mut self, screen: Screen) {
        tracing::debug!(from = %self.navigation.current(), to = %screen, "Navigating");
        self.navigation = self.navigation.show(screen);
    }

    /// Goes back one step.
    pub fn go_back(&mut self) {
        self.navigation = self.navigation.go_back();
    }

    /// Selects a gallery ring and shows its preview.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown gallery id.
    pub fn select_gallery_ring(&mut self, id: u32) -> Result<&SavedDesign> {
        let ring = self
            .gallery
            .iter()
            .find(|ring| ring.id == id)
            .ok_or_else(|| Error::NotFound(format!("Gallery ring {id}")))?;

        tracing::info!(title = %ring.title, "Gallery ring selected");
        let design = SavedDesign {
            kind: DesignKind::Gallery,
            image_url: ring.display_url().to_string(),
            description: ring.description.clone(),
            prompt: None,
            title: Some(ring.title.clone()),
            timestamp: crate::now(),
        };
        self.preview(design)
    }

    /// Validates a description, generates a ring, and shows its preview.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a bad description (nothing is requested),
    /// or the generator's error. The current design is unchanged on error.
    pub fn generate(&mut self, description: &str) -> Result<&SavedDesign> {
        let description = validate_description(description)?;
        let image = self.generator.generate(&GenerationRequest::new(description))?;
        self.preview(Self::custom_design(description, image.image_url, image.prompt))
    }

    /// Refines the current design with further instructions.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when there is no design or the instructions are
    /// invalid, or the generator's error.
    pub fn refine(&mut self, instructions: &str) -> Result<&SavedDesign> {
        let instructions = validate_description(instructions)?;
        let reference = self
            .current
            .as_ref()
            .map(|design| design.image_url.clone())
            .ok_or_else(|| Error::InvalidInput("No design selected".to_string()))?;

        let image = self
            .generator
            .generate(&GenerationRequest::refine(instructions, reference))?;
        self.preview(Self::custom_design(instructions, image.image_url, image.prompt))
    }

    /// Shows the preview of the current design.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when no design is selected.
    pub fn show_preview(&mut self) -> Result<()> {
        if self.current.is_none() {
            return Err(Error::InvalidInput("No design selected".to_string()));
        }
        self.show(Screen::Preview);
        Ok(())
    }

    /// Confirms the current design (local mirror and cloud) and shows the
    /// thank-you screen.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when no design is selected. Storage failures are
    /// reported in the [`Confirmation`], not as errors.
    pub fn confirm(&mut self) -> Result<Confirmation> {
        let design = self
            .current
            .clone()
            .ok_or_else(|| Error::InvalidInput("No design selected".to_string()))?;

        let confirmation = self.designs.confirm(design);
        self.current = Some(confirmation.design.clone());
        self.show(Screen::ThankYou);
        Ok(confirmation)
    }

    fn custom_design(description: &str, image_url: String, prompt: String) -> SavedDesign {
        SavedDesign {
            kind: DesignKind::Custom,
            image_url,
            description: description.to_string(),
            prompt: Some(prompt),
            title: Some(CUSTOM_DESIGN_TITLE.to_string()),
            timestamp: crate::now(),
        }
    }

    fn preview(&mut self, design: SavedDesign) -> Result<&SavedDesign> {
        self.show(Screen::Preview);
        Ok(self.current.insert(design))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageKeys;
    use crate::generation::GeneratedImage;
    use crate::models::Collection;
    use crate::services::CollectionStore;
    use crate::storage::{InMemoryDocumentStore, LocalMirror, MemoryKeyValueStore};
    use std::sync::Mutex;

    /// Records requests and answers with a numbered image.
    #[derive(Default)]
    struct FakeGenerator {
        requests: Mutex<Vec<GenerationRequest>>,
    }

    impl ImageGenerator for FakeGenerator {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage> {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            Ok(GeneratedImage {
                image_url: format!("https://img/gen{}.png", requests.len()),
                prompt: format!("enhanced: {}", request.prompt),
                description: request.prompt.clone(),
                is_refinement: request.is_refinement(),
            })
        }
    }

    fn gallery() -> Vec<GalleryRing> {
        vec![
            GalleryRing {
                id: 2,
                title: "Oval Halo".to_string(),
                description: "An elegant oval center diamond".to_string(),
                image_url: "https://img/oval.png".to_string(),
                fallback_url: Some("https://img/oval-small.png".to_string()),
            },
            GalleryRing {
                id: 3,
                title: "Cushion Cut Romance".to_string(),
                description: "Soft, romantic cushion cut".to_string(),
                image_url: String::new(),
                fallback_url: Some("https://img/cushion.png".to_string()),
            },
        ]
    }

    fn flow() -> (Arc<FakeGenerator>, Arc<InMemoryDocumentStore>, DesignFlow) {
        let generator = Arc::new(FakeGenerator::default());
        let backend = Arc::new(InMemoryDocumentStore::new());
        let designs = DesignService::new(
            LocalMirror::new(Arc::new(MemoryKeyValueStore::new()), StorageKeys::default()),
            CollectionStore::new(backend.clone()),
        );
        let flow = DesignFlow::new(gallery(), generator.clone(), designs);
        (generator, backend, flow)
    }

    #[test]
    fn test_gallery_selection_to_confirmation() {
        let (_, backend, mut flow) = flow();
        assert!(flow.saved_design().is_none());
        flow.show(Screen::Choice);
        flow.show(Screen::Gallery);

        let design = flow.select_gallery_ring(2).unwrap();
        assert_eq!(design.kind, DesignKind::Gallery);
        assert_eq!(flow.navigation().current(), Screen::Preview);

        flow.go_back();
        assert_eq!(flow.navigation().current(), Screen::Gallery);

        flow.show_preview().unwrap();
        let confirmation = flow.confirm().unwrap();
        assert!(confirmation.saved_locally);
        assert_eq!(flow.navigation().current(), Screen::ThankYou);
        assert_eq!(backend.document_count(Collection::Designs), 1);
        assert_eq!(flow.saved_design(), Some(confirmation.design));
    }

    #[test]
    fn test_gallery_ring_without_image_uses_fallback() {
        let (_, _, mut flow) = flow();
        assert_eq!(
            flow.select_gallery_ring(2).unwrap().image_url,
            "https://img/oval.png"
        );
        assert_eq!(
            flow.select_gallery_ring(3).unwrap().image_url,
            "https://img/cushion.png"
        );
    }

    #[test]
    fn test_unknown_gallery_ring() {
        let (_, _, mut flow) = flow();
        assert!(matches!(flow.select_gallery_ring(99), Err(Error::NotFound(_))));
        assert!(flow.current_design().is_none());
    }

    #[test]
    fn test_invalid_description_sends_nothing() {
        let (generator, _, mut flow) = flow();
        assert!(flow.generate("short").is_err());
        assert!(generator.requests.lock().unwrap().is_empty());
        assert_eq!(flow.navigation().current(), Screen::Landing);
    }

    #[test]
    fn test_generate_and_refine() {
        let (generator, _, mut flow) = flow();
        flow.show(Screen::Designer);

        let design = flow.generate("  oval halo in rose gold  ").unwrap();
        assert_eq!(design.kind, DesignKind::Custom);
        assert_eq!(design.description, "oval halo in rose gold");
        assert_eq!(design.title.as_deref(), Some(CUSTOM_DESIGN_TITLE));
        assert_eq!(design.prompt.as_deref(), Some("enhanced: oval halo in rose gold"));

        let refined = flow.refine("make the band much thinner").unwrap();
        assert_eq!(refined.image_url, "https://img/gen2.png");

        let requests = generator.requests.lock().unwrap();
        assert_eq!(
            requests[1].reference_image.as_deref(),
            Some("https://img/gen1.png")
        );
    }

    #[test]
    fn test_preview_and_confirm_require_design() {
        let (_, _, mut flow) = flow();
        assert!(flow.show_preview().is_err());
        assert!(flow.confirm().is_err());
        assert!(flow.refine("make the band much thinner").is_err());
        assert_eq!(flow.navigation().current(), Screen::Landing);
    }
}
