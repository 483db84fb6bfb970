//! Gallery Shooter - a first-person shooting gallery
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, targets, collisions, scoring)
//! - `input`: Key mapping and the per-frame input buffer
//! - `session`: Frame driver that bridges input, simulation and collaborators
//! - `platform`: Rendering/HUD collaborator seams (headless and browser)
//! - `tuning`: Data-driven game balance

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod highscores;
pub mod input;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use session::Session;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz cuts projectile tunnelling; off-centre passes can still skip)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta accepted from the host (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Frame rate the per-frame drift constants were authored against
    pub const REFERENCE_FRAME_RATE: f32 = 60.0;

    /// Half extent of the walkable floor (walls sit at ±25, 1 unit thick)
    pub const ARENA_HALF_EXTENT: f32 = 24.5;
    /// Camera height when standing on the floor
    pub const EYE_HEIGHT: f32 = 2.0;
    /// Initial camera position
    pub const PLAYER_START: [f32; 3] = [0.0, 2.0, 5.0];

    /// Minimum live targets kept in the arena
    pub const MIN_TARGETS: usize = 3;
    /// Distance below which a projectile hits a target (independent of target size)
    pub const HIT_RADIUS: f32 = 0.5;
    /// Base score for a hit, multiplied by difficulty
    pub const HIT_REWARD: u64 = 10;

    /// Visual particle cap
    pub const MAX_PARTICLES: usize = 256;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit look direction for a camera with the given yaw and pitch.
///
/// Yaw 0 / pitch 0 looks down -Z; positive yaw turns left, positive pitch looks up.
#[inline]
pub fn look_direction(yaw: f32, pitch: f32) -> Vec3 {
    let (sy, cy) = yaw.sin_cos();
    let (sp, cp) = pitch.sin_cos();
    Vec3::new(-sy * cp, sp, -cy * cp)
}

/// Horizontal forward axis (ignores pitch)
#[inline]
pub fn forward_axis(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// Horizontal right axis
#[inline]
pub fn right_axis(yaw: f32) -> Vec3 {
    Vec3::new(yaw.cos(), 0.0, -yaw.sin())
}
