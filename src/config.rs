//! Configuration types for office-export-client

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding [`ServiceConfig::base_url`]
pub const ENV_BASE_URL: &str = "OFFICE_EXPORT_BASE_URL";
/// Environment variable overriding [`OutputConfig::output_dir`]
pub const ENV_OUTPUT_DIR: &str = "OFFICE_EXPORT_OUTPUT_DIR";
/// Environment variable overriding [`ServiceConfig::request_timeout`] (seconds)
pub const ENV_REQUEST_TIMEOUT: &str = "OFFICE_EXPORT_REQUEST_TIMEOUT";

/// Document-generation service connection settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the service (default: "http://localhost:8080")
    ///
    /// Endpoints are derived from it: `{base}/api/v1/templates` and
    /// `{base}/api/v1/export/{type}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound on one export exchange (default: 120 seconds)
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub request_timeout: Duration,

    /// Timeout for the template catalog request (default: 10 seconds)
    #[serde(default = "default_catalog_timeout", with = "duration_serde")]
    pub catalog_timeout: Duration,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout: default_request_timeout(),
            catalog_timeout: default_catalog_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl ServiceConfig {
    /// Base URL without trailing slashes
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Template catalog endpoint
    pub fn templates_url(&self) -> String {
        format!("{}/api/v1/templates", self.base())
    }

    /// Export endpoint for one document type token
    pub fn export_url(&self, document_type: &str) -> String {
        format!("{}/api/v1/export/{}", self.base(), document_type)
    }
}

/// Where exported files land locally
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./exports"), created on first save
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// What to do when the derived file name already exists
    #[serde(default)]
    pub file_collision: FileCollisionAction,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            file_collision: FileCollisionAction::default(),
        }
    }
}

/// File collision handling strategy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCollisionAction {
    /// Append (1), (2), etc. to the file name, like a browser download (default)
    #[default]
    Rename,
    /// Replace the existing file
    Overwrite,
    /// Refuse to save, keep the existing file
    Skip,
}

/// Main configuration for [`ExportClient`](crate::ExportClient)
///
/// Output settings are flattened, so a JSON file looks like:
///
/// ```json
/// {
///   "service": { "base_url": "http://docs.internal:8080", "request_timeout": 60 },
///   "output_dir": "./exports",
///   "file_collision": "rename"
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Generation service settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Local output settings
    #[serde(flatten)]
    pub output: OutputConfig,

    /// Capacity of the event broadcast channel (default: 64)
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            output: OutputConfig::default(),
            event_capacity: default_event_capacity(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    ///
    /// Missing keys take their defaults. The result is validated before it is returned.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw).map_err(|e| Error::Config {
            message: format!("failed to parse {}: {}", path.display(), e),
            key: None,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration from defaults plus `OFFICE_EXPORT_*` environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup
    ///
    /// The lookup is injected so overrides can be applied from any source, not just
    /// the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.service.base_url = base_url;
        }
        if let Some(dir) = lookup(ENV_OUTPUT_DIR) {
            self.output.output_dir = PathBuf::from(dir);
        }
        if let Some(secs) = lookup(ENV_REQUEST_TIMEOUT) {
            let secs: u64 = secs.trim().parse().map_err(|_| Error::Config {
                message: format!(
                    "{ENV_REQUEST_TIMEOUT} must be a whole number of seconds, got {secs:?}"
                ),
                key: Some("service.request_timeout".to_string()),
            })?;
            self.service.request_timeout = Duration::from_secs(secs);
        }
        Ok(())
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.service.base_url).map_err(|e| Error::Config {
            message: format!("invalid base_url {:?}: {}", self.service.base_url, e),
            key: Some("service.base_url".to_string()),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config {
                message: format!("base_url must use http or https, got {}", parsed.scheme()),
                key: Some("service.base_url".to_string()),
            });
        }
        if self.service.request_timeout.is_zero() {
            return Err(Error::Config {
                message: "request_timeout must be greater than zero".to_string(),
                key: Some("service.request_timeout".to_string()),
            });
        }
        if self.service.catalog_timeout.is_zero() {
            return Err(Error::Config {
                message: "catalog_timeout must be greater than zero".to_string(),
                key: Some("service.catalog_timeout".to_string()),
            });
        }
        if self.event_capacity == 0 {
            return Err(Error::Config {
                message: "event_capacity must be greater than zero".to_string(),
                key: Some("event_capacity".to_string()),
            });
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(120)
}

fn default_catalog_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_user_agent() -> String {
    concat!("office-export-client/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./exports")
}

fn default_event_capacity() -> usize {
    64
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
