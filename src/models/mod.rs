//! Data models for ring-designer.
//!
//! Value objects shared by the storage, service and presentation layers.

mod collection;
mod design;
mod response;
mod ring;
mod term_preview;

pub use collection::Collection;
pub use design::{DEFAULT_DESIGN_TITLE, DesignKind, DesignRecord, GalleryRing, SavedDesign};
pub use response::{BatchKind, BatchOutcome, StoreResponse};
pub use ring::{DEFAULT_DESIGNER_NAME, Ring, RingDraft, RingKind, TrashedRing};
pub use term_preview::{TermPreview, term_document_id};
