//! Status report for the `status` command.

use crate::config::RingConfig;
use crate::models::DesignKind;
use crate::services::ServiceContainer;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// What is configured and what the local mirror holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// Document store backend name.
    pub backend: String,
    /// Firestore project id.
    pub project_id: String,
    /// Whether remote operations are enabled.
    pub store_configured: bool,
    /// Generation backend URL.
    pub api_url: String,
    /// Whether generation is enabled.
    pub api_configured: bool,
    /// Data directory.
    pub data_dir: PathBuf,
    /// Whether a confirmed design is stored locally.
    pub design_in_progress: bool,
    /// Type tag of the local design.
    pub design_kind: Option<DesignKind>,
    /// When the local design was confirmed.
    pub design_confirmed_at: Option<DateTime<Utc>>,
    /// Number of curated gallery rings.
    pub gallery_size: usize,
}

impl StatusReport {
    /// Collects the report. Reads only local state.
    #[must_use]
    pub fn collect(config: &RingConfig, services: &ServiceContainer) -> Self {
        let mirror = services.mirror();
        Self {
            backend: services.collections().backend_name().to_string(),
            project_id: config.firestore.project_id.clone(),
            store_configured: services.collections().is_configured(),
            api_url: config.api_url.clone(),
            api_configured: config.api_configured(),
            data_dir: config.data_dir.clone(),
            design_in_progress: mirror.has_design_in_progress(),
            design_kind: mirror.load_kind(),
            design_confirmed_at: mirror.load_timestamp(),
            gallery_size: config.gallery.len(),
        }
    }
}

fn enabled(flag: bool) -> &'static str {
    if flag { "configured" } else { "not configured" }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ring Designer Status")?;
        writeln!(f, "====================")?;
        writeln!(
            f,
            "Document store: {} ({}, project {})",
            self.backend,
            enabled(self.store_configured),
            self.project_id
        )?;
        writeln!(
            f,
            "Image backend: {} ({})",
            self.api_url,
            enabled(self.api_configured)
        )?;
        writeln!(f, "Data directory: {}", self.data_dir.display())?;
        writeln!(f, "Gallery rings: {}", self.gallery_size)?;
        if !self.design_in_progress {
            return write!(f, "Local design: none");
        }
        write!(f, "Local design: ")?;
        if let Some(kind) = self.design_kind {
            write!(f, "{kind}, ")?;
        }
        match self.design_confirmed_at {
            Some(ts) => write!(f, "confirmed {}", crate::format_timestamp(&ts)),
            None => write!(f, "present"),
        }
    }
}
