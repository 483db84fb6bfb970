//! Fixed timestep simulation tick
//!
//! Core game loop that advances the gallery deterministically.

use glam::{Vec2, Vec3};
use rand::Rng;

use super::collision::first_hit;
use super::movement::MoveIntent;
use super::state::{GameEvent, GamePhase, GameState, MotionPattern, Particle, Projectile, Target};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Held movement keys
    pub movement: MoveIntent,
    /// Jump requested this tick
    pub jump: bool,
    /// Fire requests this tick
    pub fire: u32,
    /// Look delta in radians (yaw, pitch)
    pub look: Vec2,
}

impl TickInput {
    /// Drop one-shot commands after a tick consumed them
    pub fn clear_one_shots(&mut self) {
        self.jump = false;
        self.fire = 0;
        self.look = Vec2::ZERO;
    }
}

/// Begin (or resume) play. Tops the gallery up to its minimum population.
pub fn start(state: &mut GameState) {
    if state.is_running() {
        return;
    }
    state.phase = GamePhase::Running;
    state.events.push(GameEvent::Started);
    top_up_targets(state);
    log::info!(
        "Gallery running (score {}, level {}, {} targets)",
        state.score,
        state.difficulty,
        state.targets.len()
    );
}

/// Suspend play; only leaves Running, never fires at startup
pub fn pause(state: &mut GameState) {
    if !state.is_running() {
        return;
    }
    state.phase = GamePhase::Idle;
    state.events.push(GameEvent::Paused);
    log::info!("Gallery paused at score {}", state.score);
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if !state.is_running() {
        return;
    }

    // Look, fire, jump, walk
    state.body.look(input.look.x, input.look.y);
    for _ in 0..input.fire {
        fire(state);
    }
    if input.jump && state.body.try_jump(&state.tuning) {
        state.events.push(GameEvent::Jumped);
    }
    state.body.integrate(input.movement, &state.tuning, dt);

    advance_projectiles(state, dt);

    state.time += dt;
    let time = state.time;
    for target in &mut state.targets {
        target.advance(time, dt, &state.tuning);
    }

    resolve_hits(state);
    advance_particles(state, dt);
    update_difficulty(state);
}

/// Fire one projectile from the eye along the look direction.
///
/// Returns the new projectile's ID, or None when not running.
pub fn fire(state: &mut GameState) -> Option<u32> {
    if !state.is_running() {
        return None;
    }

    let id = state.next_entity_id();
    let pos = state.body.pos;
    let vel = state.body.look_direction() * state.tuning.muzzle_speed;
    state.projectiles.push(Projectile {
        id,
        pos,
        vel,
        time_alive: 0.0,
    });
    state.player.record_shot();
    state.events.push(GameEvent::ProjectileFired { id, pos });
    Some(id)
}

/// Spawn one target at a random spot using the current difficulty
pub fn spawn_target(state: &mut GameState) -> u32 {
    let tuning = &state.tuning;
    let half = tuning.spawn_half_extent;
    let min_height = tuning.spawn_min_height;
    let height_range = tuning.spawn_height_range;
    let size = tuning.target_size(state.difficulty);
    let speed = tuning.target_speed(state.difficulty);

    let x = (state.rng.random::<f32>() - 0.5) * 2.0 * half;
    let y = state.rng.random::<f32>() * height_range + min_height;
    let z = (state.rng.random::<f32>() - 0.5) * 2.0 * half;
    let pattern = MotionPattern::ALL[state.rng.random_range(0..MotionPattern::ALL.len())];

    let id = state.next_entity_id();
    let pos = Vec3::new(x, y, z);
    state.targets.push(Target {
        id,
        pos,
        anchor: pos,
        pattern,
        speed,
        size,
    });
    state.events.push(GameEvent::TargetSpawned { id, pos, size });
    log::debug!("Target {} spawned at {:?} ({:?}, speed {:.2})", id, pos, pattern, speed);
    id
}

/// Spawn targets until the minimum population is reached
pub fn top_up_targets(state: &mut GameState) {
    while state.targets.len() < MIN_TARGETS {
        spawn_target(state);
    }
}

/// Burst of debris at a position
pub fn spawn_explosion(state: &mut GameState, pos: Vec3) {
    let count = state.tuning.explosion_particles;
    let speed = state.tuning.particle_speed;
    for _ in 0..count {
        let vel = Vec3::new(
            state.rng.random_range(-1.0..1.0),
            state.rng.random_range(-1.0..1.0),
            state.rng.random_range(-1.0..1.0),
        ) * speed;
        let id = state.next_entity_id();
        state.particles.push(Particle {
            id,
            pos,
            vel,
            life: 1.0,
        });
        state.events.push(GameEvent::ParticleSpawned { id, pos });
    }

    // Drop the oldest particles past the cap
    if state.particles.len() > MAX_PARTICLES {
        let excess = state.particles.len() - MAX_PARTICLES;
        for particle in state.particles.drain(..excess) {
            state.events.push(GameEvent::ParticleExpired { id: particle.id });
        }
    }
}

fn advance_projectiles(state: &mut GameState, dt: f32) {
    let lifetime = state.tuning.projectile_lifetime;
    let events = &mut state.events;
    state.projectiles.retain_mut(|projectile| {
        projectile.pos += projectile.vel * dt;
        projectile.time_alive += dt;
        if projectile.time_alive > lifetime {
            events.push(GameEvent::ProjectileExpired { id: projectile.id });
            false
        } else {
            true
        }
    });
}

/// Pairwise hit pass. Newest projectiles first so removal never skips one.
fn resolve_hits(state: &mut GameState) {
    let mut i = state.projectiles.len();
    while i > 0 {
        i -= 1;
        let Some(j) = first_hit(&state.projectiles[i], &state.targets) else {
            continue;
        };

        let target = state.targets.remove(j);
        let projectile = state.projectiles.remove(i);
        spawn_explosion(state, target.pos);
        state.player.record_hit();
        let points = HIT_REWARD * state.difficulty as u64;
        state.award(points);
        state.events.push(GameEvent::TargetHit {
            target_id: target.id,
            projectile_id: projectile.id,
            pos: target.pos,
            points,
        });
        log::debug!("Target {} hit by projectile {} (+{})", target.id, projectile.id, points);

        if state.targets.len() < MIN_TARGETS {
            spawn_target(state);
        }
    }
}

fn advance_particles(state: &mut GameState, dt: f32) {
    let gravity = state.tuning.gravity;
    let fade = state.tuning.particle_fade;
    let events = &mut state.events;
    state.particles.retain_mut(|particle| {
        particle.pos += particle.vel * dt;
        particle.vel.y -= gravity * dt;
        particle.life -= fade * dt;
        if particle.life > 0.0 {
            true
        } else {
            events.push(GameEvent::ParticleExpired { id: particle.id });
            false
        }
    });
}

fn update_difficulty(state: &mut GameState) {
    let earned = state.tuning.level_for_score(state.score);
    if earned > state.difficulty {
        state.difficulty = earned;
        state.events.push(GameEvent::LevelUp {
            difficulty: earned,
        });
        log::info!("Level up: {}", earned);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn running(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        start(&mut state);
        state.drain_events();
        state
    }

    fn target_at(state: &mut GameState, pos: Vec3) -> u32 {
        let id = state.next_entity_id();
        state.targets.push(Target {
            id,
            pos,
            anchor: pos,
            pattern: MotionPattern::Horizontal,
            speed: 0.0,
            size: 1.0,
        });
        id
    }

    fn projectile_at(state: &mut GameState, pos: Vec3) -> u32 {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos,
            vel: Vec3::ZERO,
            time_alive: 0.0,
        });
        id
    }

    #[test]
    fn test_start_tops_up_targets() {
        let mut state = GameState::new(1);
        start(&mut state);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.targets.len(), MIN_TARGETS);
        assert!(state.events.contains(&GameEvent::Started));
    }

    #[test]
    fn test_pause_only_from_running() {
        let mut state = GameState::new(1);
        pause(&mut state);
        assert!(state.events.is_empty());

        start(&mut state);
        pause(&mut state);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.events.last(), Some(&GameEvent::Paused));
    }

    #[test]
    fn test_first_fire_counts_without_accuracy() {
        let mut state = running(5);
        assert!(fire(&mut state).is_some());
        assert_eq!(state.player.shots_fired, 1);
        assert_eq!(state.player.accuracy, 0.0);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pos, state.body.pos);
        assert!((state.projectiles[0].vel.length() - state.tuning.muzzle_speed).abs() < 1e-3);
    }

    #[test]
    fn test_fire_ignored_while_idle() {
        let mut state = GameState::new(5);
        assert_eq!(fire(&mut state), None);
        assert_eq!(state.player.shots_fired, 0);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_tick_ignored_while_idle() {
        let mut state = GameState::new(5);
        let input = TickInput {
            fire: 3,
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.time, 0.0);
        assert_eq!(state.player.shots_fired, 0);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_spawn_scales_with_difficulty() {
        let mut state = running(9);
        state.difficulty = 3;
        let id = spawn_target(&mut state);
        let target = state.targets.iter().find(|t| t.id == id).unwrap();
        assert!((target.size - 1.0 / 3.0).abs() < 1e-6);
        assert!((target.speed - 1.1).abs() < 1e-5);
    }

    #[test]
    fn test_spawn_positions_in_bounds() {
        let mut state = running(11);
        for _ in 0..500 {
            spawn_target(&mut state);
        }
        for target in &state.targets {
            assert!(target.pos.x >= -20.0 && target.pos.x < 20.0);
            assert!(target.pos.z >= -20.0 && target.pos.z < 20.0);
            assert!(target.pos.y >= 1.0 && target.pos.y < 6.0);
        }
        for pattern in MotionPattern::ALL {
            assert!(state.targets.iter().any(|t| t.pattern == pattern));
        }
    }

    #[test]
    fn test_hit_at_distance_point_three() {
        let mut state = running(3);
        state.targets.clear();
        let target_id = target_at(&mut state, Vec3::new(0.0, 4.0, -10.0));
        let projectile_id = projectile_at(&mut state, Vec3::new(0.3, 4.0, -10.0));

        resolve_hits(&mut state);

        assert_eq!(state.score, 10);
        assert_eq!(state.player.shots_hit, 1);
        assert!(state.targets.iter().all(|t| t.id != target_id));
        assert!(state.projectiles.iter().all(|p| p.id != projectile_id));
        // One replacement since the population dropped below the minimum
        assert_eq!(state.targets.len(), 1);
        assert_eq!(state.particles.len(), state.tuning.explosion_particles);
    }

    #[test]
    fn test_reward_scales_with_difficulty() {
        let mut state = running(3);
        state.difficulty = 4;
        let pos = state.targets[0].pos;
        projectile_at(&mut state, pos);
        resolve_hits(&mut state);
        assert_eq!(state.score, 40);
        assert_eq!(state.targets.len(), MIN_TARGETS);
    }

    #[test]
    fn test_one_target_per_projectile() {
        let mut state = running(3);
        state.targets.clear();
        let center = Vec3::new(5.0, 2.0, 5.0);
        target_at(&mut state, center);
        target_at(&mut state, center + Vec3::X * 0.1);
        projectile_at(&mut state, center);
        resolve_hits(&mut state);
        assert_eq!(state.player.shots_hit, 1);
        assert_eq!(state.score, 10);
        // One survivor plus one replacement
        assert_eq!(state.targets.len(), 2);
    }

    #[test]
    fn test_projectiles_age_out() {
        let mut state = running(4);
        state.targets.clear();
        state.body.pitch = 1.2; // Aim at the sky
        fire(&mut state);
        let steps = (state.tuning.projectile_lifetime / SIM_DT) as usize + 2;
        for _ in 0..steps {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.projectiles.is_empty());
        assert!(
            state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::ProjectileExpired { .. }))
        );
    }

    #[test]
    fn test_shot_travels_and_hits_target_ahead() {
        let mut state = running(8);
        state.targets.clear();
        // A zero-speed horizontal target stays on its anchor
        let eye = state.body.pos;
        target_at(&mut state, eye + Vec3::new(0.0, 0.0, -12.0));

        let fire_once = TickInput {
            fire: 1,
            ..Default::default()
        };
        tick(&mut state, &fire_once, SIM_DT);
        assert_eq!(state.player.shots_fired, 1);

        for _ in 0..60 {
            if state.player.shots_hit == 1 {
                break;
            }
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.player.shots_hit, 1);
        assert_eq!(state.score, 10);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_level_up_from_score() {
        let mut state = running(2);
        state.award(100);
        update_difficulty(&mut state);
        assert_eq!(state.difficulty, 2);
        assert!(state.events.contains(&GameEvent::LevelUp { difficulty: 2 }));
    }

    #[test]
    fn test_particle_cap() {
        let mut state = running(2);
        for _ in 0..20 {
            spawn_explosion(&mut state, Vec3::ZERO);
        }
        assert_eq!(state.particles.len(), MAX_PARTICLES);
    }

    #[test]
    fn test_particles_fade_out() {
        let mut state = running(2);
        spawn_explosion(&mut state, Vec3::new(0.0, 3.0, 0.0));
        for _ in 0..120 {
            advance_particles(&mut state, SIM_DT);
        }
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        start(&mut state1);
        start(&mut state2);

        let inputs = [
            TickInput {
                look: Vec2::new(0.1, -0.05),
                ..Default::default()
            },
            TickInput {
                fire: 2,
                ..Default::default()
            },
            TickInput {
                movement: MoveIntent {
                    forward: true,
                    left: true,
                    ..Default::default()
                },
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input, SIM_DT);
                tick(&mut state2, input, SIM_DT);
            }
        }

        assert_eq!(state1.targets, state2.targets);
        assert_eq!(state1.projectiles, state2.projectiles);
        assert_eq!(state1.body, state2.body);
        assert_eq!(state1.score, state2.score);
    }

    proptest! {
        #[test]
        fn prop_accuracy_matches_counters(shots in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut state = running(17);
            for aimed in shots {
                if aimed {
                    let pos = state.targets[0].pos;
                    state.body.pos = pos;
                }
                fire(&mut state);
                resolve_hits(&mut state);
                let p = &state.player;
                if p.shots_fired == 0 {
                    prop_assert_eq!(p.accuracy, 0.0);
                } else {
                    prop_assert!((p.accuracy - p.shots_hit as f32 / p.shots_fired as f32).abs() < 1e-6);
                }
                prop_assert!(state.targets.len() >= MIN_TARGETS);
            }
        }

        #[test]
        fn prop_score_never_decreases(
            seed in any::<u64>(),
            fires in proptest::collection::vec(0u32..3, 1..200),
        ) {
            let mut state = running(seed);
            let mut last = state.score;
            for (step, fire) in fires.into_iter().enumerate() {
                // Sweep the view so some shots connect
                let input = TickInput {
                    fire,
                    look: Vec2::new(0.05 * (step % 7) as f32, 0.0),
                    ..Default::default()
                };
                tick(&mut state, &input, SIM_DT);
                prop_assert!(state.score >= last);
                last = state.score;
            }
        }
    }
}
