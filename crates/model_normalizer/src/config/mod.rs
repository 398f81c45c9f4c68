//! Configuration system
//!
//! Settings that sit around the normalization core: where assets are looked
//! up, which attributes the importer keeps, and the display extent callers
//! normalize to. Files are TOML or RON, chosen by extension.

pub use serde::{Serialize, Deserialize};

use std::path::{Path, PathBuf};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// # Model Configuration
///
/// Controls asset lookup and attribute import for model loading, and the
/// extent a normalized model should fit into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directories searched, in order, for relative asset paths
    pub search_paths: Vec<String>,
    /// Longest side of the normalized model, in view units
    pub target_size: f32,
    /// Keep vertex normals found in asset files
    pub import_normals: bool,
    /// Keep texture coordinates found in asset files
    pub import_texcoords: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            search_paths: vec![
                "resources/models".to_string(),
                "models".to_string(),
                ".".to_string(),
            ],
            target_size: 2.0,
            import_normals: true,
            import_texcoords: true,
        }
    }
}

impl Config for ModelConfig {}

impl ModelConfig {
    /// Set the normalization target size
    #[must_use]
    pub fn with_target_size(mut self, target_size: f32) -> Self {
        self.target_size = target_size;
        self
    }

    /// Replace the asset search paths
    #[must_use]
    pub fn with_search_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Resolve an asset path against the search paths
    ///
    /// Absolute paths and paths that exist as given are returned unchanged.
    /// Otherwise the first search directory containing the file wins. `None`
    /// means the file was found nowhere.
    pub fn resolve_asset_path(&self, path: &Path) -> Option<PathBuf> {
        if path.is_absolute() || path.exists() {
            return path.exists().then(|| path.to_path_buf());
        }

        self.search_paths
            .iter()
            .map(|dir| Path::new(dir).join(path))
            .find(|candidate| candidate.exists())
    }
}
