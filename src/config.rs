//! Configuration management for crabfocus
//!
//! Provides loading, saving and validation of the scoring defaults, the
//! default region size and the default stack pattern used by the CLI.

use crate::cost::{CostFunction, CostKind, Halving};
use crate::errors::FocusError;
use crate::focus_stack::{DegeneratePolicy, OptimizerOptions, WindowMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CrabFocusConfig {
    pub scoring: ScoringConfig,
    pub region: RegionConfig,
    pub loader: LoaderConfig,
}

/// How frames are scored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Cost function used when none is named
    pub cost: CostKind,
    /// Whether self-windowing metrics get the optimizer's window as well
    pub window_mode: WindowMode,
    /// Sentinel substitution or failure on degenerate crops
    pub degenerate_policy: DegeneratePolicy,
    /// Score for degenerate crops under the sentinel policy
    pub degenerate_score: f64,
    /// Row halving rule of the frequency metric
    pub frequency_halving: Halving,
    /// Score frames in parallel
    pub parallel: bool,
}

/// Default region size when only an origin is given
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    pub default_width: f64,
    pub default_height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Glob pattern used when the CLI gets `-` as pattern
    pub default_pattern: String,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            cost: CostKind::Sobel,
            window_mode: WindowMode::Always,
            degenerate_policy: DegeneratePolicy::Sentinel,
            degenerate_score: 0.0,
            frequency_halving: Halving::Floor,
            parallel: false,
        }
    }
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            default_width: 10.0,
            default_height: 10.0,
        }
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            default_pattern: "*.png".to_string(),
        }
    }
}

impl ScoringConfig {
    /// The configured cost function, or `kind` when given
    pub fn cost_function(&self, kind: Option<CostKind>) -> Box<dyn CostFunction> {
        kind.unwrap_or(self.cost).cost_function(self.frequency_halving)
    }

    pub fn optimizer_options(&self) -> OptimizerOptions {
        OptimizerOptions {
            window_mode: self.window_mode,
            degenerate_policy: self.degenerate_policy,
            degenerate_score: self.degenerate_score,
            parallel: self.parallel,
        }
    }
}

impl CrabFocusConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, FocusError> {
        let path = path.as_ref();

        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| FocusError::Config(format!("Failed to read config file: {}", e)))?;

        let config: CrabFocusConfig = toml::from_str(&contents)
            .map_err(|e| FocusError::Config(format!("Failed to parse config file: {}", e)))?;

        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), FocusError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                FocusError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| FocusError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, toml_string)
            .map_err(|e| FocusError::Config(format!("Failed to write config file: {}", e)))?;

        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Get default config file path
    pub fn default_path() -> PathBuf {
        PathBuf::from("crabfocus.toml")
    }

    /// Load from default location or fall back to defaults
    pub fn load_or_default() -> Self {
        Self::load_from_file(Self::default_path()).unwrap_or_else(|e| {
            log::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if !self.scoring.degenerate_score.is_finite() {
            return Err("Degenerate score must be finite".to_string());
        }

        let (width, height) = (self.region.default_width, self.region.default_height);
        if !(width.is_finite() && height.is_finite()) || width < 1.0 || height < 1.0 {
            return Err("Default region size must be at least 1x1".to_string());
        }

        if self.loader.default_pattern.trim().is_empty() {
            return Err("Default pattern must not be empty".to_string());
        }

        Ok(())
    }
}
