//! Player movement
//!
//! Velocity bookkeeping for the camera body: damped walking, gravity,
//! a single jump per landing, and the arena walls.

use glam::Vec3;
use std::f32::consts::FRAC_PI_2;

use super::state::Body;
use crate::consts::{ARENA_HALF_EXTENT, EYE_HEIGHT};
use crate::tuning::Tuning;
use crate::{forward_axis, normalize_angle, right_axis};

/// Keep the view just short of straight up/down
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

/// Held movement keys for one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    /// Normalized (right, forward) intent, or zero when nothing is held
    pub fn direction(&self) -> (f32, f32) {
        let x = self.right as i32 as f32 - self.left as i32 as f32;
        let z = self.forward as i32 as f32 - self.backward as i32 as f32;
        let len = (x * x + z * z).sqrt();
        if len > 0.0 { (x / len, z / len) } else { (0.0, 0.0) }
    }
}

impl Body {
    /// Turn the view by a look delta in radians
    pub fn look(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw = normalize_angle(self.yaw - yaw_delta);
        self.pitch = (self.pitch - pitch_delta).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Start a jump if standing; returns whether it happened
    pub fn try_jump(&mut self, tuning: &Tuning) -> bool {
        if !self.can_jump {
            return false;
        }
        self.vel.y += tuning.jump_velocity;
        self.can_jump = false;
        true
    }

    /// Integrate one step of walking and falling
    pub fn integrate(&mut self, intent: MoveIntent, tuning: &Tuning, dt: f32) {
        // Damping and gravity
        self.vel.x -= self.vel.x * tuning.walk_damping * dt;
        self.vel.z -= self.vel.z * tuning.walk_damping * dt;
        self.vel.y -= tuning.gravity * dt;

        // x = strafe, z = forward in view space
        let (dir_x, dir_z) = intent.direction();
        if intent.forward || intent.backward {
            self.vel.z += dir_z * tuning.walk_accel * dt;
        }
        if intent.left || intent.right {
            self.vel.x += dir_x * tuning.walk_accel * dt;
        }

        let step = right_axis(self.yaw) * (self.vel.x * dt) + forward_axis(self.yaw) * (self.vel.z * dt);
        self.pos += step;
        self.pos.y += self.vel.y * dt;

        self.pos.x = self.pos.x.clamp(-ARENA_HALF_EXTENT, ARENA_HALF_EXTENT);
        self.pos.z = self.pos.z.clamp(-ARENA_HALF_EXTENT, ARENA_HALF_EXTENT);

        if self.pos.y < EYE_HEIGHT {
            self.vel.y = 0.0;
            self.pos.y = EYE_HEIGHT;
            self.can_jump = true;
        }
    }

    /// Horizontal speed in the view frame
    pub fn ground_speed(&self) -> f32 {
        Vec3::new(self.vel.x, 0.0, self.vel.z).length()
    }
}
