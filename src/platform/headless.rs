//! In-memory collaborators for native runs and tests

use std::collections::HashMap;

use glam::Vec3;

use super::{Hud, HudSnapshot, Scene, VisualAttrs, VisualHandle, VisualKind};

/// A visual tracked by the headless scene
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessVisual {
    pub kind: VisualKind,
    pub position: Vec3,
    pub attrs: VisualAttrs,
}

/// Scene that keeps visuals in a map instead of drawing them
#[derive(Debug, Default)]
pub struct HeadlessScene {
    pub visuals: HashMap<VisualHandle, HeadlessVisual>,
    pub camera: (Vec3, f32, f32),
    pub viewport: (u32, u32),
    pub spawned: u32,
    pub despawned: u32,
    next_handle: u32,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live visuals of one kind
    pub fn count(&self, kind: VisualKind) -> usize {
        self.visuals.values().filter(|v| v.kind == kind).count()
    }
}

impl Scene for HeadlessScene {
    fn spawn_visual(&mut self, kind: VisualKind, position: Vec3, attrs: VisualAttrs) -> VisualHandle {
        self.next_handle += 1;
        let handle = VisualHandle(self.next_handle);
        self.visuals.insert(
            handle,
            HeadlessVisual {
                kind,
                position,
                attrs,
            },
        );
        self.spawned += 1;
        handle
    }

    fn despawn_visual(&mut self, handle: VisualHandle) {
        if self.visuals.remove(&handle).is_some() {
            self.despawned += 1;
        } else {
            log::warn!("Despawn of unknown visual {:?}", handle);
        }
    }

    fn move_visual(&mut self, handle: VisualHandle, position: Vec3) {
        if let Some(visual) = self.visuals.get_mut(&handle) {
            visual.position = position;
        }
    }

    fn set_camera_pose(&mut self, position: Vec3, yaw: f32, pitch: f32) {
        self.camera = (position, yaw, pitch);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }
}

/// HUD that remembers the last snapshot
#[derive(Debug, Default)]
pub struct HeadlessHud {
    pub last: HudSnapshot,
    pub updates: u32,
}

impl Hud for HeadlessHud {
    fn update_hud(&mut self, hud: &HudSnapshot) {
        if hud.score != self.last.score || hud.level != self.last.level {
            log::debug!(
                "HUD score {} accuracy {}% level {}",
                hud.score,
                hud.accuracy_percent(),
                hud.level
            );
        }
        self.last = *hud;
        self.updates += 1;
    }
}
