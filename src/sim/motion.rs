//! Target motion patterns
//!
//! Horizontal and circular motion are closed-form functions of the session
//! clock, so a target's position is replayable from `time` alone. Zigzag is
//! a small per-frame drift scaled to the step length.

use glam::Vec3;

use super::state::{MotionPattern, Target};
use crate::consts::REFERENCE_FRAME_RATE;
use crate::tuning::Tuning;

/// Per-frame zigzag drift amplitudes at the reference frame rate
const ZIGZAG_DRIFT_X: f32 = 0.1;
const ZIGZAG_DRIFT_Y: f32 = 0.05;

/// Position on the horizontal oscillation at `time`
pub fn horizontal_position(anchor: Vec3, pos: Vec3, time: f32, speed: f32, amplitude: f32) -> Vec3 {
    Vec3::new(anchor.x + (time * speed).sin() * amplitude, pos.y, pos.z)
}

/// Position on the orbit around the arena center at `time`
pub fn circular_position(pos: Vec3, time: f32, speed: f32, radius: f32) -> Vec3 {
    let angle = time * speed;
    Vec3::new(angle.cos() * radius, pos.y, angle.sin() * radius)
}

/// Zigzag drift applied over one step of length `dt`
pub fn zigzag_step(pos: Vec3, time: f32, dt: f32) -> Vec3 {
    let frames = dt * REFERENCE_FRAME_RATE;
    Vec3::new(
        pos.x + (time * 2.0).sin() * ZIGZAG_DRIFT_X * frames,
        pos.y + (time * 3.0).cos() * ZIGZAG_DRIFT_Y * frames,
        pos.z,
    )
}

impl Target {
    /// Move the target to where its pattern puts it at `time`
    pub fn advance(&mut self, time: f32, dt: f32, tuning: &Tuning) {
        self.pos = match self.pattern {
            MotionPattern::Horizontal => horizontal_position(
                self.anchor,
                self.pos,
                time,
                self.speed,
                tuning.oscillate_amplitude,
            ),
            MotionPattern::Circular => {
                circular_position(self.pos, time, self.speed, tuning.orbit_radius)
            }
            MotionPattern::Zigzag => zigzag_step(self.pos, time, dt),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn target(pattern: MotionPattern) -> Target {
        let pos = Vec3::new(3.0, 2.0, -4.0);
        Target {
            id: 1,
            pos,
            anchor: pos,
            pattern,
            speed: 0.7,
            size: 1.0,
        }
    }

    #[test]
    fn test_horizontal_stays_within_amplitude() {
        let tuning = Tuning::default();
        let mut t = target(MotionPattern::Horizontal);
        let mut time = 0.0;
        for _ in 0..10_000 {
            time += 1.0 / 120.0;
            t.advance(time, 1.0 / 120.0, &tuning);
            assert!((t.pos.x - t.anchor.x).abs() <= tuning.oscillate_amplitude + 1e-4);
            assert_eq!(t.pos.y, t.anchor.y);
            assert_eq!(t.pos.z, t.anchor.z);
        }
    }

    #[test]
    fn test_horizontal_is_a_function_of_time() {
        let tuning = Tuning::default();
        let mut a = target(MotionPattern::Horizontal);
        let mut b = target(MotionPattern::Horizontal);
        a.advance(1.0, 0.5, &tuning);
        a.advance(2.0, 1.0, &tuning);
        b.advance(2.0, 0.01, &tuning);
        assert_eq!(a.pos, b.pos);
    }

    #[test]
    fn test_circular_keeps_height() {
        let tuning = Tuning::default();
        let mut t = target(MotionPattern::Circular);
        t.advance(0.0, 0.0, &tuning);
        assert!((t.pos - Vec3::new(5.0, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_zigzag_drift_scales_with_step() {
        let start = Vec3::new(0.0, 3.0, 1.0);
        // One reference frame at time 0: x unchanged (sin 0), y rises by 0.05
        let next = zigzag_step(start, 0.0, 1.0 / 60.0);
        assert!((next.x - 0.0).abs() < 1e-6);
        assert!((next.y - 3.05).abs() < 1e-5);
        assert_eq!(next.z, 1.0);
    }

    proptest! {
        #[test]
        fn prop_circular_stays_on_radius_five(time in 0.0f32..1000.0, speed in 0.1f32..5.0) {
            let tuning = Tuning::default();
            let mut t = target(MotionPattern::Circular);
            t.speed = speed;
            t.advance(time, 1.0 / 120.0, &tuning);
            let r2 = t.pos.x * t.pos.x + t.pos.z * t.pos.z;
            prop_assert!((r2 - 25.0).abs() < 1e-3);
        }
    }
}
