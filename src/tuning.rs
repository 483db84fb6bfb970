//! Data-driven game balance
//!
//! Every knob that shapes how the gallery plays. Defaults reproduce the
//! stock game; a host can override any subset from JSON.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Horizontal acceleration while a movement key is held (units/s²)
    pub walk_accel: f32,
    /// Horizontal velocity damping factor (1/s)
    pub walk_damping: f32,
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    /// Upward velocity added by a jump (units/s)
    pub jump_velocity: f32,
    /// Mouse-look radians per pixel of pointer movement
    pub look_sensitivity: f32,

    // === Projectiles ===
    /// Muzzle speed (units/s); 1.5 units per 60 Hz frame
    pub muzzle_speed: f32,
    /// Seconds before an unspent projectile is removed
    pub projectile_lifetime: f32,

    // === Targets ===
    /// Targets spawn with |x|, |z| below this
    pub spawn_half_extent: f32,
    /// Lowest spawn height
    pub spawn_min_height: f32,
    /// Spawn heights cover [min, min + range)
    pub spawn_height_range: f32,
    /// Move speed at difficulty 0 (before the per-level bonus)
    pub base_target_speed: f32,
    /// Extra move speed per difficulty level
    pub target_speed_per_level: f32,
    /// Horizontal oscillation amplitude
    pub oscillate_amplitude: f32,
    /// Radius of the circular orbit around the arena center
    pub orbit_radius: f32,

    // === Progression ===
    /// Score needed per difficulty level
    pub score_per_level: u64,

    // === Effects ===
    /// Particles per explosion
    pub explosion_particles: usize,
    /// Maximum particle speed per axis (units/s)
    pub particle_speed: f32,
    /// Particle life lost per second
    pub particle_fade: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            walk_accel: 80.0,
            walk_damping: 10.0,
            gravity: 20.0,
            jump_velocity: 8.0,
            look_sensitivity: 0.002,

            muzzle_speed: 90.0,
            projectile_lifetime: 3.0,

            spawn_half_extent: 20.0,
            spawn_min_height: 1.0,
            spawn_height_range: 5.0,
            base_target_speed: 0.5,
            target_speed_per_level: 0.2,
            oscillate_amplitude: 5.0,
            orbit_radius: 5.0,

            score_per_level: 100,

            explosion_particles: 20,
            particle_speed: 6.0,
            particle_fade: 1.5,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Target edge length at a difficulty level (smaller is harder to see)
    pub fn target_size(&self, difficulty: u32) -> f32 {
        1.0 / difficulty.max(1) as f32
    }

    /// Target move speed at a difficulty level
    pub fn target_speed(&self, difficulty: u32) -> f32 {
        self.base_target_speed + difficulty as f32 * self.target_speed_per_level
    }

    /// Difficulty level earned by a score
    pub fn level_for_score(&self, score: u64) -> u32 {
        let per_level = self.score_per_level.max(1);
        (1 + score / per_level).min(u32::MAX as u64) as u32
    }
}
