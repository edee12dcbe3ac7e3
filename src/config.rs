//! Project configuration (tbin.yaml).
//!
//! Supplies defaults for the CLI. Every field is optional; command-line
//! flags take precedence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TbinError};
use crate::types::{DEFAULT_TRANSPARENT_INDEX, MAX_DIMENSION, PALETTE_SIZE};

/// Config filename looked up in the working directory.
pub const CONFIG_FILENAME: &str = "tbin.yaml";

/// Configuration loaded from tbin.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default tile size for `encode`, as [width, height].
    pub tile: [usize; 2],

    /// Output directory for files written without an explicit path.
    pub output: PathBuf,

    /// Preview scale for `decode`.
    pub scale: Option<u32>,

    /// Palette index used for fully transparent PNG pixels.
    pub transparent_index: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tile: [8, 8],
            output: PathBuf::from("."),
            scale: None,
            transparent_index: DEFAULT_TRANSPARENT_INDEX,
        }
    }
}

impl Config {
    /// Load config from a tbin.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TbinError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse config from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).map_err(|e| TbinError::Config {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })?;
        config.check()?;
        Ok(config)
    }

    /// Load an explicit config, or tbin.yaml from `dir` if present, or defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let path = dir.join(CONFIG_FILENAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Get the effective preview scale.
    pub fn effective_scale(&self) -> u32 {
        self.scale.unwrap_or(1).max(1)
    }

    fn check(&self) -> Result<()> {
        let [w, h] = self.tile;
        if !(1..=MAX_DIMENSION).contains(&w) || !(1..=MAX_DIMENSION).contains(&h) {
            return Err(TbinError::Config {
                message: format!("tile size {}x{} is out of range", w, h),
                help: Some(format!("Tiles must be 1 to {} pixels per side", MAX_DIMENSION)),
            });
        }
        if self.transparent_index as usize >= PALETTE_SIZE {
            return Err(TbinError::Config {
                message: format!("transparent_index {} is out of range", self.transparent_index),
                help: Some("Use a value in 0..=15".to_string()),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let config = Config::parse("output: build").unwrap();
        assert_eq!(config.output, PathBuf::from("build"));
        assert_eq!(config.tile, [8, 8]);
        assert_eq!(config.transparent_index, 2);
        assert_eq!(config.effective_scale(), 1);
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = "tile: [16, 8]\noutput: out\nscale: 4\ntransparent_index: 0\n";
        let config = Config::parse(yaml).unwrap();
        assert_eq!(config.tile, [16, 8]);
        assert_eq!(config.effective_scale(), 4);
        assert_eq!(config.transparent_index, 0);
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        assert!(matches!(
            Config::parse("tile: [32, 8]"),
            Err(TbinError::Config { .. })
        ));
        assert!(Config::parse("transparent_index: 16").is_err());
        assert!(Config::parse("tile: nope").is_err());
    }

    #[test]
    fn test_discover_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::discover(None, dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_discover_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "scale: 2").unwrap();
        let config = Config::discover(None, dir.path()).unwrap();
        assert_eq!(config.effective_scale(), 2);
    }

    #[test]
    fn test_discover_explicit_missing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("other.yaml");
        assert!(matches!(
            Config::discover(Some(missing.as_path()), dir.path()),
            Err(TbinError::Io { .. })
        ));
    }
}
