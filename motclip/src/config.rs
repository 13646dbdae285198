//! Playback configuration (TOML)
//!
//! ```toml
//! rotation = "slerp"
//! default_translation = [0.0, 1.0, 0.0]
//!
//! [lookup]
//! strategy = "auto"
//! hash_threshold = 20
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::clip::{HASH_LOOKUP_THRESHOLD, LookupStrategy};

/// How rotations are interpolated between bracketing frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RotationInterp {
    /// Lerp the stored tangent vectors, then apply the exponential map once
    #[default]
    Lerp,
    /// Exponential-map both frames, then slerp
    Slerp,
}

/// Which node lookup to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LookupMode {
    #[default]
    Auto,
    Linear,
    Hashed,
}

/// Node lookup settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Lookup mode (default: auto)
    #[serde(default)]
    pub strategy: LookupMode,
    /// Node count above which `auto` uses the hash table (default: 20)
    #[serde(default = "default_hash_threshold")]
    pub hash_threshold: usize,
}

fn default_hash_threshold() -> usize {
    HASH_LOOKUP_THRESHOLD
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            strategy: LookupMode::default(),
            hash_threshold: default_hash_threshold(),
        }
    }
}

impl From<&LookupConfig> for LookupStrategy {
    fn from(config: &LookupConfig) -> Self {
        match config.strategy {
            LookupMode::Auto => LookupStrategy::Auto {
                threshold: config.hash_threshold,
            },
            LookupMode::Linear => LookupStrategy::Linear,
            LookupMode::Hashed => LookupStrategy::Hashed,
        }
    }
}

/// Settings for transform evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlaybackConfig {
    /// Rotation interpolation (default: lerp)
    #[serde(default)]
    pub rotation: RotationInterp,
    /// Translation used for nodes without a position track (default: none)
    #[serde(default)]
    pub default_translation: Option<[f32; 3]>,
    /// Node lookup settings
    #[serde(default)]
    pub lookup: LookupConfig,
}

impl PlaybackConfig {
    /// Read and parse a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn default_translation(&self) -> Option<Vec3> {
        self.default_translation.map(Vec3::from_array)
    }

    pub fn lookup_strategy(&self) -> LookupStrategy {
        LookupStrategy::from(&self.lookup)
    }
}
