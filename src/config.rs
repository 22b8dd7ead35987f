//! Project configuration for `pixelpad.toml`
//!
//! Optional per-project defaults for canvas size, export settings, and the
//! swatch list offered by front-ends. Every section and field has a
//! default, so a missing or empty file behaves like the built-in defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::color::parse_color;

/// Config file name searched for in the project directory and its parents.
pub const CONFIG_FILE: &str = "pixelpad.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("failed to parse pixelpad.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// Canvas defaults section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanvasConfig {
    /// Default canvas width for new projects
    #[serde(default = "default_width")]
    pub width: u32,
    /// Default canvas height for new projects
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        CanvasConfig { width: default_width(), height: default_height() }
    }
}

fn default_width() -> u32 {
    crate::canvas::DEFAULT_WIDTH
}

fn default_height() -> u32 {
    crate::canvas::DEFAULT_HEIGHT
}

/// Export defaults section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportConfig {
    /// Default animation frame rate
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Default integer upscale factor for PNG export
    #[serde(default = "default_scale")]
    pub scale: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig { fps: default_fps(), scale: default_scale() }
    }
}

fn default_fps() -> u32 {
    8
}

fn default_scale() -> u32 {
    8
}

/// Swatch palette section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SwatchConfig {
    /// Colors offered in the picker, `transparent` included
    #[serde(default = "default_swatches")]
    pub swatches: Vec<String>,
}

impl Default for SwatchConfig {
    fn default() -> Self {
        SwatchConfig { swatches: default_swatches() }
    }
}

fn default_swatches() -> Vec<String> {
    [
        "transparent", "#000000", "#ffffff", "#ff4757", "#ffa502", "#ffdd59", "#2ed573",
        "#1e90ff", "#5352ed", "#a55eea", "#636e72",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Canvas defaults
    #[serde(default)]
    pub canvas: CanvasConfig,
    /// Export defaults
    #[serde(default)]
    pub export: ExportConfig,
    /// Swatch palette
    #[serde(default)]
    pub palette: SwatchConfig,
}

impl Config {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Find `pixelpad.toml` by walking up from `start`.
    pub fn find(start: &Path) -> Option<PathBuf> {
        start.ancestors().map(|dir| dir.join(CONFIG_FILE)).find(|p| p.is_file())
    }

    /// Load the config governing `start`, or the defaults when no file is
    /// found.
    pub fn load_or_default(start: &Path) -> Result<Self, ConfigError> {
        match Self::find(start) {
            Some(path) => Self::load(&path),
            None => Ok(Config::default()),
        }
    }

    /// Validate field contents, collecting every problem.
    fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        if self.export.fps == 0 {
            errors.push("export.fps must be at least 1".to_string());
        }
        for swatch in &self.palette.swatches {
            if let Err(e) = parse_color(swatch) {
                errors.push(format!("palette.swatches: '{}': {}", swatch, e));
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.canvas.width, 32);
        assert_eq!(config.canvas.height, 32);
        assert_eq!(config.export.fps, 8);
        assert_eq!(config.export.scale, 8);
        assert_eq!(config.palette.swatches.len(), 11);
        assert_eq!(config.palette.swatches[0], "transparent");
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[canvas]\nwidth = 64\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.canvas.width, 64);
        assert_eq!(config.canvas.height, 32);
        assert_eq!(config.export.fps, 8);
    }

    #[test]
    fn test_rejects_bad_swatch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[palette]\nswatches = [\"#zzz\"]\n").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_rejects_zero_fps() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[export]\nfps = 0\n").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_find_walks_up() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "").unwrap();
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();

        let found = Config::find(&nested).unwrap();
        assert_eq!(found, dir.path().join(CONFIG_FILE));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_or_default(dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }
}
