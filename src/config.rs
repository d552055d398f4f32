use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::graph::Role;

pub const BACKEND_URL_ENV: &str = "TOOLWIRE_BACKEND_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend_url: String,
    pub log_filter: String,
    pub tool_a: ToolProfile,
    pub tool_b: ToolProfile,
    pub window: WindowSize,
}

/// How a tool node is labelled in the UI and named on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolProfile {
    pub label: String,
    pub wire_name: String,
}

impl ToolProfile {
    fn new(label: &str, wire_name: &str) -> Self {
        Self {
            label: label.to_string(),
            wire_name: wire_name.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: f32,
    pub height: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:8000/run".to_string(),
            log_filter: "toolwire=info,warn".to_string(),
            tool_a: ToolProfile::new("ToolA", "toolA"),
            tool_b: ToolProfile::new("ToolB", "toolB"),
            window: WindowSize {
                width: 1200.0,
                height: 720.0,
            },
        }
    }
}

impl Config {
    /// Load from the platform config directory. A missing file is not an error.
    ///
    /// Environment overrides are not applied here; see [`Config::with_env_overrides`].
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Apply overrides from the process environment, whether the config came
    /// from disk or from defaults.
    pub fn with_env_overrides(self) -> Self {
        self.with_backend_url(std::env::var(BACKEND_URL_ENV).ok())
    }

    fn with_backend_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.backend_url = url;
        }
        self
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn tool(&self, role: Role) -> Option<&ToolProfile> {
        match role {
            Role::ToolA => Some(&self.tool_a),
            Role::ToolB => Some(&self.tool_b),
            Role::Agent => None,
        }
    }

    fn config_path() -> Option<PathBuf> {
        let dirs = ProjectDirs::from("", "", "toolwire")?;
        Some(dirs.config_dir().join("config.json"))
    }
}
