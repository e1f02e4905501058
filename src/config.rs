use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::errors::ConfigError;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// Log level for tracing (e.g. "info", "debug").
    pub log_level: String,

    pub server_version: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_json(&file).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<AppConfig>(text)
    }

    /// Load `config.json` from next to the executable or its parent
    /// directory. Without one, every setting keeps its default.
    ///
    /// Returns the config together with the file it came from, if any.
    pub fn locate_and_load() -> Result<(Self, Option<PathBuf>), ConfigError> {
        let Some(path) = locate_config_file() else {
            return Ok((Self::default(), None));
        };

        let cfg = Self::load_from_file(&path)?;
        Ok((cfg, Some(path)))
    }
}

fn locate_config_file() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let exe_dir = exe_path.parent()?;

    [
        exe_dir.join("config.json"),
        exe_dir.join("..").join("config.json"),
    ]
    .into_iter()
    .find(|p| p.exists())
}
