//! Projectile/target hit detection
//!
//! Naive pairwise distance test. The hit radius is fixed, so shrinking a
//! target with difficulty makes it harder to see but not harder to hit.

use glam::Vec3;

use super::state::{Projectile, Target};
use crate::consts::HIT_RADIUS;

/// Whether two points are close enough to count as a hit
#[inline]
pub fn within_hit_radius(a: Vec3, b: Vec3) -> bool {
    a.distance(b) < HIT_RADIUS
}

/// Find the target a projectile hits, scanning targets from the back.
///
/// Only the first match counts; a projectile never scores twice.
pub fn first_hit(projectile: &Projectile, targets: &[Target]) -> Option<usize> {
    targets
        .iter()
        .enumerate()
        .rev()
        .find(|(_, target)| within_hit_radius(projectile.pos, target.pos))
        .map(|(index, _)| index)
}
