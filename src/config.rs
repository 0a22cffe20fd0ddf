use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "body_viewer.toml";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub initial_width: usize,
    pub initial_height: usize,
    pub windowed_width: usize,
    pub windowed_height: usize,
    pub fullscreen_width: usize,
    pub fullscreen_height: usize,
    pub target_fps: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Simple Body Viewer".to_string(),
            initial_width: 1280,
            initial_height: 960,
            windowed_width: 1380,
            windowed_height: 1060,
            fullscreen_width: 1920,
            fullscreen_height: 1080,
            target_fps: 30,
        }
    }
}

/// Resolution of the depth and body streams.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self { width: 320, height: 240 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_path: String, // joint log, appended to every frame
    pub window: WindowConfig,
    pub source: SourceConfig,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("read {}: {e}", path.display())))?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("parse {}: {e}", path.display())))
    }

    #[cfg(test)]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        fs::write(path, content).map_err(|e| Error::Config(format!("write {}: {e}", path.display())))
    }

    /// Missing file means defaults; a present but broken file is an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        if path.exists() {
            log::info!("loading config from {}", path.display());
            Self::load(path)
        } else {
            log::info!("no {} found, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: "out.txt".to_string(),
            window: WindowConfig::default(),
            source: SourceConfig::default(),
        }
    }
}
