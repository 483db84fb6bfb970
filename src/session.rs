//! Frame driver
//!
//! A `Session` is the one world object the host holds. Input callbacks only
//! enqueue events; `frame` drains them, runs fixed simulation substeps, and
//! mirrors what happened onto the scene and HUD collaborators.

use std::collections::HashMap;

use crate::consts::*;
use crate::highscores::HighScores;
use crate::input::{HeldKeys, InputEvent, InputQueue, Key, apply_event};
use crate::platform::{Hud, HudSnapshot, Scene, VisualAttrs, VisualHandle, VisualKind};
use crate::sim::{self, GameEvent, GameState, TickInput};
use crate::tuning::Tuning;

pub struct Session {
    state: GameState,
    queue: InputQueue,
    held: HeldKeys,
    pending: TickInput,
    accumulator: f32,
    /// Entity ID -> scene visual
    visuals: HashMap<u32, VisualHandle>,
    /// Multiplier on the tuned look sensitivity (player setting)
    look_scale: f32,
    high_scores: HighScores,
}

impl Session {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        log::info!("New session with seed {}", seed);
        Self {
            state: GameState::with_tuning(seed, tuning),
            queue: InputQueue::new(),
            held: HeldKeys::default(),
            pending: TickInput::default(),
            accumulator: 0.0,
            visuals: HashMap::new(),
            look_scale: 1.0,
            high_scores: HighScores::new(),
        }
    }

    pub fn with_high_scores(mut self, high_scores: HighScores) -> Self {
        self.high_scores = high_scores;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn set_look_scale(&mut self, scale: f32) {
        self.look_scale = scale.max(0.0);
    }

    // === Input handlers ===

    pub fn on_lock_acquired(&mut self) {
        self.queue.push(InputEvent::LockAcquired);
    }

    pub fn on_lock_released(&mut self) {
        self.queue.push(InputEvent::LockReleased);
    }

    /// DOM `KeyboardEvent.code`; unknown keys are ignored
    pub fn on_key_down(&mut self, code: &str) {
        if let Some(key) = Key::from_code(code) {
            self.queue.push(InputEvent::KeyDown(key));
        }
    }

    pub fn on_key_up(&mut self, code: &str) {
        if let Some(key) = Key::from_code(code) {
            self.queue.push(InputEvent::KeyUp(key));
        }
    }

    pub fn on_fire_requested(&mut self) {
        self.queue.push(InputEvent::Fire);
    }

    /// Pointer movement in pixels
    pub fn on_look(&mut self, dx: f32, dy: f32) {
        self.queue.push(InputEvent::Look { dx, dy });
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.queue.push(InputEvent::Resize { width, height });
    }

    // === Frame ===

    /// Advance one rendered frame. Returns the simulation events it produced.
    pub fn frame(&mut self, delta: f32, scene: &mut impl Scene, hud: &mut impl Hud) -> Vec<GameEvent> {
        self.process_input(scene);

        if self.state.is_running() {
            self.accumulator += delta.clamp(0.0, MAX_FRAME_DT);

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                sim::tick(&mut self.state, &self.pending, SIM_DT);
                self.pending.clear_one_shots();
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
            if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
                log::debug!("Frame budget exceeded, dropping {:.3}s", self.accumulator);
                self.accumulator = 0.0;
            }
        }

        let events = self.state.drain_events();
        self.sync_scene(&events, scene);
        hud.update_hud(&self.hud_snapshot());
        events
    }

    /// Values for the HUD collaborator
    pub fn hud_snapshot(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.state.score,
            accuracy: self.state.player.accuracy,
            level: self.state.difficulty,
            health: self.state.player.health,
            ammo: self.state.player.ammo,
            running: self.state.is_running(),
        }
    }

    /// Start over with a fresh seed. The finished run goes on the leaderboard;
    /// returns the rank it reached.
    pub fn restart(&mut self, seed: u64, timestamp: f64, scene: &mut impl Scene) -> Option<usize> {
        let rank = self.high_scores.add_score(
            self.state.score,
            self.state.player.accuracy,
            self.state.difficulty,
            timestamp,
        );
        if let Some(rank) = rank {
            log::info!("Score {} reached rank {}", self.state.score, rank);
        }

        for (_, handle) in self.visuals.drain() {
            scene.despawn_visual(handle);
        }

        let was_running = self.state.is_running();
        self.state = GameState::with_tuning(seed, self.state.tuning.clone());
        self.queue = InputQueue::new();
        self.held.clear();
        self.pending = TickInput::default();
        self.accumulator = 0.0;
        log::info!("Session restarted with seed {}", seed);

        // Still captured: keep playing without waiting for a new lock
        if was_running {
            sim::start(&mut self.state);
        }
        rank
    }

    fn process_input(&mut self, scene: &mut impl Scene) {
        let events: Vec<InputEvent> = self.queue.drain().collect();
        let sensitivity = self.state.tuning.look_sensitivity * self.look_scale;

        for event in events {
            match event {
                InputEvent::LockAcquired => sim::start(&mut self.state),
                InputEvent::LockReleased => {
                    if self.state.is_running() {
                        sim::pause(&mut self.state);
                        self.held.clear();
                        self.pending = TickInput::default();
                        self.accumulator = 0.0;
                    }
                }
                InputEvent::Resize { width, height } => scene.resize(width, height),
                // Everything below is ignored while idle
                _ if !self.state.is_running() => {}
                // Turn before the next fire in the queue so shots follow the view
                InputEvent::Look { dx, dy } => {
                    self.state.body.look(dx * sensitivity, dy * sensitivity);
                }
                InputEvent::Fire => {
                    sim::fire(&mut self.state);
                }
                _ => apply_event(&mut self.held, &mut self.pending, event),
            }
        }
    }

    fn sync_scene(&mut self, events: &[GameEvent], scene: &mut impl Scene) {
        for event in events {
            match *event {
                GameEvent::ProjectileFired { id, pos } => {
                    let handle = scene.spawn_visual(VisualKind::Projectile, pos, VisualAttrs::projectile());
                    self.visuals.insert(id, handle);
                }
                GameEvent::TargetSpawned { id, pos, size } => {
                    let handle = scene.spawn_visual(VisualKind::Target, pos, VisualAttrs::target(size));
                    self.visuals.insert(id, handle);
                }
                GameEvent::ParticleSpawned { id, pos } => {
                    let handle = scene.spawn_visual(VisualKind::Particle, pos, VisualAttrs::particle());
                    self.visuals.insert(id, handle);
                }
                GameEvent::ProjectileExpired { id } | GameEvent::ParticleExpired { id } => {
                    self.despawn(id, scene);
                }
                GameEvent::TargetHit {
                    target_id,
                    projectile_id,
                    ..
                } => {
                    self.despawn(target_id, scene);
                    self.despawn(projectile_id, scene);
                }
                GameEvent::Started | GameEvent::Paused | GameEvent::Jumped | GameEvent::LevelUp { .. } => {}
            }
        }

        let positions = self
            .state
            .projectiles
            .iter()
            .map(|p| (p.id, p.pos))
            .chain(self.state.targets.iter().map(|t| (t.id, t.pos)))
            .chain(self.state.particles.iter().map(|p| (p.id, p.pos)));
        for (id, pos) in positions {
            if let Some(&handle) = self.visuals.get(&id) {
                scene.move_visual(handle, pos);
            }
        }

        let body = &self.state.body;
        scene.set_camera_pose(body.pos, body.yaw, body.pitch);
    }

    fn despawn(&mut self, id: u32, scene: &mut impl Scene) {
        if let Some(handle) = self.visuals.remove(&id) {
            scene.despawn_visual(handle);
        }
    }
}
