//! Configuration management.

mod gallery;
mod http;

pub use gallery::curated_gallery;
pub use http::{HttpConfig, build_http_client};

use crate::models::GalleryRing;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Placeholder the generation backend URL ships with.
pub const PLACEHOLDER_API_URL: &str = "YOUR_RENDER_URL";

/// Placeholder the document store project id ships with.
pub const PLACEHOLDER_PROJECT_ID: &str = "YOUR_PROJECT_ID";

/// Main configuration for ring-designer.
#[derive(Debug, Clone, Serialize)]
pub struct RingConfig {
    /// Base URL of the image-generation backend.
    pub api_url: String,
    /// Remote document store.
    pub firestore: FirestoreConfig,
    /// Directory holding the local mirror.
    pub data_dir: PathBuf,
    /// Key names used by the local mirror.
    pub storage_keys: StorageKeys,
    /// HTTP client settings.
    #[serde(skip)]
    pub http: HttpConfig,
    /// Logging settings.
    pub logging: LoggingSettings,
    /// Curated gallery rings.
    pub gallery: Vec<GalleryRing>,
}

/// Document store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FirestoreConfig {
    /// Project identifier; the placeholder means "not configured".
    pub project_id: String,
    /// Scheme and host of the REST endpoint.
    pub host: String,
}

impl FirestoreConfig {
    /// Default REST endpoint.
    pub const DEFAULT_HOST: &'static str = "https://firestore.googleapis.com";

    /// Creates a configuration for a project on the default host.
    #[must_use]
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            host: Self::DEFAULT_HOST.to_string(),
        }
    }

    /// Returns true when a real (non-placeholder, non-empty) project id is set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        let id = self.project_id.trim();
        !id.is_empty() && id != PLACEHOLDER_PROJECT_ID
    }

    /// Returns the documents root:
    /// `{host}/v1/projects/{project}/databases/(default)/documents`.
    #[must_use]
    pub fn documents_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/databases/(default)/documents",
            self.host.trim_end_matches('/'),
            self.project_id.trim()
        )
    }
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self::new(PLACEHOLDER_PROJECT_ID)
    }
}

/// Key names for the three local mirror entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    /// Design payload (JSON).
    pub design: String,
    /// Confirmation timestamp.
    pub timestamp: String,
    /// Type tag.
    pub design_type: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            design: "ring_design".to_string(),
            timestamp: "ring_timestamp".to_string(),
            design_type: "ring_type".to_string(),
        }
    }
}

/// Logging section (resolved by [`crate::observability::LoggingConfig`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `pretty` or `json`.
    pub format: Option<String>,
    /// `EnvFilter` directive.
    pub filter: Option<String>,
    /// Log file; stderr when unset.
    pub file: Option<PathBuf>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Generation backend URL.
    pub api_url: Option<String>,
    /// Data directory.
    pub data_dir: Option<String>,
    /// Document store section.
    pub firestore: Option<ConfigFileFirestore>,
    /// Local mirror key names.
    pub storage_keys: Option<StorageKeys>,
    /// HTTP section.
    pub http: Option<ConfigFileHttp>,
    /// Logging section.
    pub logging: Option<LoggingSettings>,
    /// Curated gallery; replaces the built-in one when present.
    pub gallery: Option<Vec<GalleryRing>>,
}

/// Firestore section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileFirestore {
    /// Project id.
    pub project_id: Option<String>,
    /// REST host.
    pub host: Option<String>,
}

/// HTTP section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileHttp {
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: Option<u64>,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            api_url: PLACEHOLDER_API_URL.to_string(),
            firestore: FirestoreConfig::default(),
            data_dir: default_data_dir(),
            storage_keys: StorageKeys::default(),
            http: HttpConfig::default(),
            logging: LoggingSettings::default(),
            gallery: curated_gallery(),
        }
    }
}

/// Returns the platform data directory for ring-designer, or `.ring-designer`.
fn default_data_dir() -> PathBuf {
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from(".ring-designer"),
        |dirs| dirs.data_dir().join("ring-designer"),
    )
}

impl RingConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the generation backend URL is set.
    #[must_use]
    pub fn api_configured(&self) -> bool {
        let url = self.api_url.trim();
        !url.is_empty() && url != PLACEHOLDER_API_URL
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: format!("{}: {e}", path.display()),
            })?;

        Self::from_toml(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid configuration TOML.
    pub fn from_toml(contents: &str) -> crate::Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/ring-designer/` on macOS)
    /// 2. XDG config dir (`~/.config/ring-designer/`)
    ///
    /// Returns default configuration if no config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let platform_config = base_dirs
            .config_dir()
            .join("ring-designer")
            .join("config.toml");
        if platform_config.exists() {
            match Self::load_from_file(&platform_config) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(path = %platform_config.display(), "Ignoring config: {e}"),
            }
        }

        let xdg_config = base_dirs
            .home_dir()
            .join(".config")
            .join("ring-designer")
            .join("config.toml");
        if xdg_config.exists() {
            match Self::load_from_file(&xdg_config) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(path = %xdg_config.display(), "Ignoring config: {e}"),
            }
        }

        Self::default()
    }

    /// Converts a `ConfigFile` to `RingConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(api_url) = file.api_url {
            config.api_url = api_url;
        }
        if let Some(data_dir) = file.data_dir {
            config.data_dir = PathBuf::from(data_dir);
        }
        if let Some(firestore) = file.firestore {
            if let Some(project_id) = firestore.project_id {
                config.firestore.project_id = project_id;
            }
            if let Some(host) = firestore.host {
                config.firestore.host = host;
            }
        }
        if let Some(keys) = file.storage_keys {
            config.storage_keys = keys;
        }
        if let Some(http) = file.http {
            if let Some(v) = http.timeout_ms {
                config.http.timeout_ms = v;
            }
            if let Some(v) = http.connect_timeout_ms {
                config.http.connect_timeout_ms = v;
            }
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }
        if let Some(gallery) = file.gallery {
            config.gallery = gallery;
        }

        config
    }

    /// Applies `RING_DESIGNER_*` environment variable overrides.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(&|key| std::env::var(key).ok())
    }

    /// Applies overrides from a variable lookup.
    #[must_use]
    pub fn with_overrides(mut self, lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = non_empty("RING_DESIGNER_API_URL") {
            self.api_url = v;
        }
        if let Some(v) = non_empty("RING_DESIGNER_FIRESTORE_PROJECT_ID") {
            self.firestore.project_id = v;
        }
        if let Some(v) = non_empty("RING_DESIGNER_FIRESTORE_HOST") {
            self.firestore.host = v;
        }
        if let Some(v) = non_empty("RING_DESIGNER_DATA_DIR") {
            self.data_dir = PathBuf::from(v);
        }
        self.http = self.http.with_overrides(lookup);
        self
    }

    /// Sets the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = path.into();
        self
    }

    /// Sets the document store project id.
    #[must_use]
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.firestore.project_id = project_id.into();
        self
    }

    /// Finds a gallery ring by id.
    #[must_use]
    pub fn gallery_ring(&self, id: u32) -> Option<&GalleryRing> {
        self.gallery.iter().find(|ring| ring.id == id)
    }
}
