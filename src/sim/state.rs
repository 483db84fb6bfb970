//! Game state and core simulation types
//!
//! Everything the gallery needs to replay a session lives here: the seeded
//! RNG, the clock, and every live entity.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::look_direction;
use crate::tuning::Tuning;

/// Whether the simulation is advancing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Pointer not captured; simulation and input are suspended
    #[default]
    Idle,
    /// Pointer captured; gameplay active
    Running,
}

/// How a target moves over time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionPattern {
    /// Side-to-side oscillation around the spawn point
    Horizontal,
    /// Orbit around the arena center
    Circular,
    /// Small wandering drift
    Zigzag,
}

impl MotionPattern {
    pub const ALL: [MotionPattern; 3] = [
        MotionPattern::Horizontal,
        MotionPattern::Circular,
        MotionPattern::Zigzag,
    ];
}

/// Player stats shown on the HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub health: u8,
    /// Reserved; firing does not consume ammo
    pub ammo: u8,
    /// Reserved; nothing grants power-ups yet
    pub powerups: Vec<String>,
    pub shots_fired: u32,
    pub shots_hit: u32,
    /// shots_hit / shots_fired, or 0 before the first shot
    pub accuracy: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            health: 100,
            ammo: 100,
            powerups: Vec::new(),
            shots_fired: 0,
            shots_hit: 0,
            accuracy: 0.0,
        }
    }
}

impl Player {
    pub fn record_shot(&mut self) {
        self.shots_fired += 1;
        self.update_accuracy();
    }

    pub fn record_hit(&mut self) {
        self.shots_hit += 1;
        self.update_accuracy();
    }

    fn update_accuracy(&mut self) {
        self.accuracy = if self.shots_fired == 0 {
            0.0
        } else {
            self.shots_hit as f32 / self.shots_fired as f32
        };
    }
}

/// The camera body the player moves around
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Eye position
    pub pos: Vec3,
    pub vel: Vec3,
    /// Radians; 0 looks down -Z
    pub yaw: f32,
    /// Radians; positive looks up
    pub pitch: f32,
    /// False while airborne
    pub can_jump: bool,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            pos: Vec3::from_array(PLAYER_START),
            vel: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            can_jump: false,
        }
    }
}

impl Body {
    pub fn look_direction(&self) -> Vec3 {
        look_direction(self.yaw, self.pitch)
    }
}

/// A fired projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec3,
    /// Units per second
    pub vel: Vec3,
    /// Seconds since fired
    pub time_alive: f32,
}

/// A moving target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub pos: Vec3,
    /// Spawn position; horizontal oscillation is measured from here
    pub anchor: Vec3,
    pub pattern: MotionPattern,
    pub speed: f32,
    /// Visual edge length only; hits use HIT_RADIUS
    pub size: f32,
}

/// An explosion fragment (visual only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec3,
    pub vel: Vec3,
    /// 0-1, decreases over time
    pub life: f32,
}

/// Things that happened during a tick, for renderers/HUD/audio
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Started,
    Paused,
    ProjectileFired { id: u32, pos: Vec3 },
    ProjectileExpired { id: u32 },
    TargetSpawned { id: u32, pos: Vec3, size: f32 },
    TargetHit { target_id: u32, projectile_id: u32, pos: Vec3, points: u64 },
    ParticleSpawned { id: u32, pos: Vec3 },
    ParticleExpired { id: u32 },
    Jumped,
    LevelUp { difficulty: u32 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    /// Starts at 1, never decreases
    pub difficulty: u32,
    /// Seconds of running time; drives target motion
    pub time: f32,
    pub player: Player,
    pub body: Body,
    pub projectiles: Vec<Projectile>,
    pub targets: Vec<Target>,
    #[serde(skip)]
    pub particles: Vec<Particle>,
    pub tuning: Tuning,
    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            score: 0,
            difficulty: 1,
            time: 0.0,
            player: Player::default(),
            body: Body::default(),
            projectiles: Vec::new(),
            targets: Vec::new(),
            particles: Vec::new(),
            tuning,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Add to the score; never lowers it
    pub fn award(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }
}
