//! # Ring Designer
//!
//! Persistence for a ring-design flow: a user picks a curated ring or asks an
//! image-generation backend for one, then keeps the chosen designs in a remote
//! Firestore-compatible document store and a local mirror.
//!
//! ## Layers
//!
//! - **Record Mapper** ([`storage::mapper`]): rings to and from the document
//!   store's typed-field wire format
//! - **Collection CRUD** ([`services::CollectionStore`]): create, list and
//!   remove against the four named collections
//! - **Composite operations** ([`services::TrashService`],
//!   [`services::TheOneService`]): soft delete, restore, and the single
//!   "The One" flag
//! - **Local mirror** ([`storage::local::LocalMirror`]): the current design,
//!   always available offline
//!
//! ## Example
//!
//! ```rust,ignore
//! use ring_designer::config::RingConfig;
//! use ring_designer::services::ServiceContainer;
//!
//! let services = ServiceContainer::from_config(&RingConfig::load_default())?;
//! services.trash().remove_from_collection("ring_1718000000000")?;
//! let outcome = services.trash().restore_all_from_trash(None)?;
//! println!("{} {}/{}", outcome.kind.past_tense(), outcome.processed, outcome.total);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error as ThisError;

pub mod app;
pub mod cli;
pub mod config;
pub mod generation;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;

#[cfg(test)]
mod testing;

pub use config::RingConfig;
pub use models::{
    BatchKind, BatchOutcome, Collection, DesignKind, Ring, RingDraft, RingKind, SavedDesign,
    StoreResponse, TrashedRing,
};
pub use services::{
    CollectionStore, DesignService, ServiceContainer, TermPreviewCache, TheOneService,
    TrashService,
};
pub use storage::{DocumentStore, FirestoreClient, InMemoryDocumentStore};

/// Error type for ring-designer operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `NotConfigured` | Document store or image backend has a placeholder identifier |
/// | `NetworkFailure` | Transport error or non-2xx response |
/// | `NotFound` | A strict lookup (restore, mark, latest design) found nothing |
/// | `PartialFailure` | Some items of a batch failed |
/// | `InvalidInput` | Bad document id, description, or enum text |
/// | `OperationFailed` | Local I/O, (de)serialization, config parsing |
#[derive(Debug, ThisError)]
pub enum Error {
    /// The service was never attempted because it is not configured.
    #[error("{service} not configured")]
    NotConfigured {
        /// Human-readable service name.
        service: String,
    },

    /// A request failed at the transport level or returned a non-2xx status.
    #[error("request '{operation}' failed: {cause}")]
    NetworkFailure {
        /// The operation that issued the request.
        operation: String,
        /// HTTP status, when a response was received.
        status: Option<u16>,
        /// The underlying cause.
        cause: String,
    },

    /// A required entity was absent.
    #[error("not found: {0}")]
    NotFound(String),

    /// A batch where some but not all items succeeded.
    #[error("{succeeded}/{total} items succeeded: {}", .errors.join("; "))]
    PartialFailure {
        /// Items that succeeded.
        succeeded: usize,
        /// Items attempted.
        total: usize,
        /// One message per failed item.
        errors: Vec<String>,
    },

    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A local operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

impl Error {
    /// Shorthand for the document store's not-configured error.
    #[must_use]
    pub fn firebase_not_configured() -> Self {
        Self::NotConfigured {
            service: "Firebase".to_string(),
        }
    }
}

/// Result type alias for ring-designer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns the current time truncated to whole milliseconds.
///
/// Stored timestamps never carry more precision than this, so a timestamp
/// written and read back compares equal.
#[must_use]
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

/// Formats a timestamp as RFC 3339 with a `Z` suffix.
#[must_use]
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parses an RFC 3339 timestamp, returning `None` for anything malformed.
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}
