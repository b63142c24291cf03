//! Scene settings and preferences
//!
//! Read once at startup; changing the quality preset only takes effect for
//! the next scene since the spark pool is sized at construction.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::tuning::Tuning;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    /// Phones and weak GPUs
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" | "mobile" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Spark pool capacity for this preset
    pub fn max_sparks(&self) -> usize {
        match self {
            QualityPreset::Low => 400,
            QualityPreset::Medium => SPARK_POOL_CAPACITY,
            QualityPreset::High => 2000,
        }
    }

    pub fn star_count(&self) -> usize {
        match self {
            QualityPreset::Low => STAR_COUNT_MOBILE,
            _ => STAR_COUNT,
        }
    }
}

/// Scene settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Fade the spark layer instead of clearing it (light trails)
    pub trails: bool,
    /// Snowfall layer
    pub snow: bool,
    /// Translucent hand drawn behind the held sparkler
    pub ghost_hand: bool,
    /// Turbulence kick applied to sparks each tick (0 = off)
    pub spark_turbulence: f32,

    // === HUD ===
    /// Show the ignite / new sparkler hint
    pub show_prompt: bool,
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            trails: true,
            snow: false,
            ghost_hand: true,
            spark_turbulence: 0.0,

            show_prompt: true,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Simulation tuning implied by these settings
    pub fn tuning(&self) -> Tuning {
        let mut tuning = Tuning::default();
        tuning.emitter.capacity = self.quality.max_sparks();
        tuning.emitter.turbulence = self.spark_turbulence.max(0.0);
        tuning.street.star_count = self.quality.star_count();
        tuning
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `path` when given, falling back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }
}
