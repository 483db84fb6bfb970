//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order
//! - No rendering or platform dependencies

pub mod collision;
pub mod motion;
pub mod movement;
pub mod state;
pub mod tick;

pub use collision::{first_hit, within_hit_radius};
pub use movement::MoveIntent;
pub use state::{
    Body, GameEvent, GamePhase, GameState, MotionPattern, Particle, Player, Projectile, Target,
};
pub use tick::{
    TickInput, fire, pause, spawn_explosion, spawn_target, start, tick, top_up_targets,
};
