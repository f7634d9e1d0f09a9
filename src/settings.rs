//! Game settings
//!
//! Read once at startup from the canvas `data-settings` attribute (JSON).

use serde::Deserialize;

use crate::error::GameError;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreset {
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

    /// Maximum live burst particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 256,
            QualityPreset::Medium => 1024,
            QualityPreset::High => 4096,
        }
    }

    /// Maximum live floating hearts for this preset
    pub fn max_floating_hearts(&self) -> usize {
        match self {
            QualityPreset::Low => 64,
            QualityPreset::Medium => 256,
            QualityPreset::High => 1024,
        }
    }
}

/// How player displacement relates to frame time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MovementMode {
    /// Fixed displacement per tick; effective speed follows the refresh rate
    #[default]
    PerFrame,
    /// Displacement scaled by delta against a 60 Hz reference frame
    DeltaScaled,
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Effect quality (controls particle caps)
    pub quality: QualityPreset,
    /// Player movement scaling
    pub movement: MovementMode,
    /// Show FPS in the HUD
    pub show_fps: bool,
    /// Fixed RNG seed (None = seed from clock)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            movement: MovementMode::PerFrame,
            show_fps: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON blob (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse an optional blob, falling back to defaults on absence or error
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json {
            None => Self::default(),
            Some(raw) if raw.trim().is_empty() => Self::default(),
            Some(raw) => match Self::from_json(raw) {
                Ok(settings) => {
                    log::info!("Loaded settings ({} quality)", settings.quality.as_str());
                    settings
                }
                Err(e) => {
                    log::warn!("{}; using default settings", e);
                    Self::default()
                }
            },
        }
    }

    pub fn max_particles(&self) -> usize {
        self.quality.max_particles()
    }

    pub fn max_floating_hearts(&self) -> usize {
        self.quality.max_floating_hearts()
    }
}
