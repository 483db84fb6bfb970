//! Platform abstraction layer
//!
//! The gallery never draws anything itself. It talks to two collaborators:
//! - `Scene`: creates, moves and removes visuals and places the camera
//! - `Hud`: shows score, accuracy and level
//!
//! `headless` implements both in memory for native runs and tests; `web`
//! forwards to the host page when built for the browser.

use glam::Vec3;

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use headless::{HeadlessHud, HeadlessScene};

/// What a visual represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualKind {
    Projectile,
    Target,
    Particle,
}

impl VisualKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualKind::Projectile => "projectile",
            VisualKind::Target => "target",
            VisualKind::Particle => "particle",
        }
    }
}

/// Appearance hints for a new visual
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualAttrs {
    /// Edge length or diameter
    pub size: f32,
    /// 0xRRGGBB
    pub color: u32,
}

impl VisualAttrs {
    pub fn projectile() -> Self {
        Self {
            size: 0.2,
            color: 0xff0000,
        }
    }

    pub fn target(size: f32) -> Self {
        Self {
            size,
            color: 0x00ff00,
        }
    }

    pub fn particle() -> Self {
        Self {
            size: 0.1,
            color: 0xffaa00,
        }
    }
}

/// Opaque handle a scene hands out for each visual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisualHandle(pub u32);

/// Rendering collaborator
pub trait Scene {
    fn spawn_visual(&mut self, kind: VisualKind, position: Vec3, attrs: VisualAttrs) -> VisualHandle;
    fn despawn_visual(&mut self, handle: VisualHandle);
    fn move_visual(&mut self, handle: VisualHandle, position: Vec3);
    fn set_camera_pose(&mut self, position: Vec3, yaw: f32, pitch: f32);
    /// Viewport changed size
    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// Values shown on the HUD
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HudSnapshot {
    pub score: u64,
    /// 0-1
    pub accuracy: f32,
    pub level: u32,
    pub health: u8,
    pub ammo: u8,
    pub running: bool,
}

impl HudSnapshot {
    /// Accuracy as a whole percentage
    pub fn accuracy_percent(&self) -> u32 {
        (self.accuracy * 100.0).round() as u32
    }
}

/// HUD collaborator
pub trait Hud {
    fn update_hud(&mut self, hud: &HudSnapshot);
}
