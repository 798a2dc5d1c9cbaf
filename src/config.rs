//! Client configuration.
//!
//! Configuration lives at `<config dir>/tilda/config.json` and is entirely
//! optional. Backend URL precedence: `--url` flag, then the
//! `TILDA_BACKEND_URL` environment variable, then the config file, then the
//! built-in default. A broken config file is logged and ignored, never fatal.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::client::DEFAULT_BASE_URL;
use crate::models::AnalysisSettings;

/// Environment variable overriding the backend URL.
pub const BACKEND_URL_ENV: &str = "TILDA_BACKEND_URL";

/// Persisted client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend base URL, e.g. `http://localhost:7860`.
    pub backend_url: Option<String>,
    /// Default analysis settings sent with every submission.
    pub settings: AnalysisSettings,
}

impl Config {
    /// Path of the config file, if a config directory can be determined.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tilda").join("config.json"))
    }

    /// Load configuration from the default location.
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from an explicit path.
    ///
    /// A missing file yields defaults; an unreadable or unparseable file is
    /// logged at `warn` and also yields defaults.
    pub fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read config, using defaults");
                return Self::default();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to parse config, using defaults");
                Self::default()
            }
        }
    }

    /// Resolve the backend URL from flag, environment, config, and default.
    pub fn resolve_backend_url(&self, flag: Option<&str>) -> String {
        flag.map(str::to_string)
            .or_else(|| std::env::var(BACKEND_URL_ENV).ok())
            .or_else(|| self.backend_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }
}
