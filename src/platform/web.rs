//! Browser collaborators
//!
//! The host page owns the 3D engine and exposes a small `galleryScene`
//! object; HUD values go straight into the DOM.

use glam::Vec3;
use wasm_bindgen::prelude::*;

use super::{Hud, HudSnapshot, Scene, VisualAttrs, VisualHandle, VisualKind};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = galleryScene, js_name = spawn)]
    fn js_spawn(kind: &str, x: f32, y: f32, z: f32, size: f32, color: u32) -> u32;

    #[wasm_bindgen(js_namespace = galleryScene, js_name = despawn)]
    fn js_despawn(handle: u32);

    #[wasm_bindgen(js_namespace = galleryScene, js_name = move)]
    fn js_move(handle: u32, x: f32, y: f32, z: f32);

    #[wasm_bindgen(js_namespace = galleryScene, js_name = setCamera)]
    fn js_set_camera(x: f32, y: f32, z: f32, yaw: f32, pitch: f32);

    #[wasm_bindgen(js_namespace = galleryScene, js_name = resize)]
    fn js_resize(width: u32, height: u32);
}

/// Scene backed by the page's `galleryScene` bridge
#[derive(Debug, Default)]
pub struct JsScene;

impl Scene for JsScene {
    fn spawn_visual(&mut self, kind: VisualKind, position: Vec3, attrs: VisualAttrs) -> VisualHandle {
        VisualHandle(js_spawn(
            kind.as_str(),
            position.x,
            position.y,
            position.z,
            attrs.size,
            attrs.color,
        ))
    }

    fn despawn_visual(&mut self, handle: VisualHandle) {
        js_despawn(handle.0);
    }

    fn move_visual(&mut self, handle: VisualHandle, position: Vec3) {
        js_move(handle.0, position.x, position.y, position.z);
    }

    fn set_camera_pose(&mut self, position: Vec3, yaw: f32, pitch: f32) {
        js_set_camera(position.x, position.y, position.z, yaw, pitch);
    }

    fn resize(&mut self, width: u32, height: u32) {
        js_resize(width, height);
    }
}

/// HUD that writes into `#score`, `#accuracy` and `#level`
#[derive(Debug, Default)]
pub struct DomHud {
    last: Option<HudSnapshot>,
}

impl DomHud {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Hud for DomHud {
    fn update_hud(&mut self, hud: &HudSnapshot) {
        // Skip DOM writes when nothing changed
        if self.last.as_ref() == Some(hud) {
            return;
        }
        self.last = Some(*hud);

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(el) = document.get_element_by_id("score") {
            el.set_text_content(Some(&format!("Score: {}", hud.score)));
        }
        if let Some(el) = document.get_element_by_id("accuracy") {
            el.set_text_content(Some(&format!("Accuracy: {}%", hud.accuracy_percent())));
        }
        if let Some(el) = document.get_element_by_id("level") {
            el.set_text_content(Some(&format!("Level: {}", hud.level)));
        }

        // Start menu while idle, crosshair while running
        let (menu_class, crosshair_class) = if hud.running {
            ("hidden", "crosshair")
        } else {
            ("", "crosshair hidden")
        };
        if let Some(el) = document.get_element_by_id("startMenu") {
            let _ = el.set_attribute("class", menu_class);
        }
        if let Some(el) = document.query_selector(".crosshair").ok().flatten() {
            let _ = el.set_attribute("class", crosshair_class);
        }
    }
}
