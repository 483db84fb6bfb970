//! Player settings and preferences
//!
//! Read from LocalStorage at startup; the host page owns the settings UI
//! and writes the same key.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    Medium,
    #[default]
    High,
}

impl QualityPreset {
    /// Debris particles per explosion for this preset
    pub fn explosion_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 6,
            QualityPreset::Medium => 12,
            QualityPreset::High => 20,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Explosion debris on/off
    pub particles: bool,

    // === Controls ===
    /// Multiplier on mouse-look speed
    pub mouse_sensitivity: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::High,
            particles: true,

            mouse_sensitivity: 1.0,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Mouse sensitivity is kept within a usable range
    pub const MIN_SENSITIVITY: f32 = 0.1;
    pub const MAX_SENSITIVITY: f32 = 5.0;

    pub fn effective_sensitivity(&self) -> f32 {
        self.mouse_sensitivity
            .clamp(Self::MIN_SENSITIVITY, Self::MAX_SENSITIVITY)
    }

    /// Effective particles per explosion
    pub fn explosion_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.explosion_particles()
        }
    }

    /// Apply player preferences to the game balance
    pub fn apply_to(&self, tuning: &mut Tuning) {
        tuning.explosion_particles = self.explosion_particles();
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "gallery_shooter_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_scale_explosions() {
        assert_eq!(QualityPreset::Low.explosion_particles(), 6);
        assert_eq!(QualityPreset::Medium.explosion_particles(), 12);
        assert_eq!(QualityPreset::default(), QualityPreset::High);
    }

    #[test]
    fn test_defaults_match_stock_explosions() {
        let mut tuning = Tuning::default();
        Settings::default().apply_to(&mut tuning);
        assert_eq!(tuning.explosion_particles, 20);
    }

    #[test]
    fn test_particles_off() {
        let settings = Settings {
            particles: false,
            quality: QualityPreset::Medium,
            ..Settings::default()
        };
        let mut tuning = Tuning::default();
        settings.apply_to(&mut tuning);
        assert_eq!(tuning.explosion_particles, 0);
    }

    #[test]
    fn test_sensitivity_clamped() {
        let settings = Settings {
            mouse_sensitivity: 50.0,
            ..Settings::default()
        };
        assert_eq!(settings.effective_sensitivity(), Settings::MAX_SENSITIVITY);
    }

    #[test]
    fn test_old_json_fills_new_fields() {
        let settings: Settings = serde_json::from_str(r#"{ "quality": "Low" }"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::Low);
        assert_eq!(settings.mouse_sensitivity, 1.0);
    }
}
