//! Gallery Shooter entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, MouseEvent};

    use gallery_shooter::audio::{AudioManager, SoundEffect};
    use gallery_shooter::platform::web::{DomHud, JsScene};
    use gallery_shooter::{HighScores, Session, Settings, Tuning};

    // JS binding for pointer lock
    #[wasm_bindgen(inline_js = "
        export function request_pointer_lock() {
            const target = document.getElementById('gameContainer') || document.body;
            const result = target.requestPointerLock();
            if (result && result.catch) {
                result.catch(e => console.error('Pointer lock failed:', e));
            }
        }

        export function is_pointer_locked() {
            return document.pointerLockElement !== null;
        }
    ")]
    extern "C" {
        fn request_pointer_lock();
        fn is_pointer_locked() -> bool;
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        scene: JsScene,
        hud: DomHud,
        audio: AudioManager,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let mut tuning = Tuning::default();
            settings.apply_to(&mut tuning);

            let mut session = Session::new(seed, tuning).with_high_scores(HighScores::load());
            session.set_look_scale(settings.effective_sensitivity());

            let mut audio = AudioManager::new();
            audio.apply_settings(&settings);

            Self {
                session,
                scene: JsScene,
                hud: DomHud::new(),
                audio,
                last_time: 0.0,
            }
        }

        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            let events = self.session.frame(dt, &mut self.scene, &mut self.hud);
            self.audio.play_events(&events);
        }

        fn restart(&mut self) {
            let seed = js_sys::Date::now() as u64;
            let rank = self
                .session
                .restart(seed, js_sys::Date::now(), &mut self.scene);
            if rank.is_some() {
                self.session.high_scores().save();
                self.audio.play(SoundEffect::HighScore);
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Gallery Shooter starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));

        if let Some((width, height)) = viewport_size(&window) {
            game.borrow_mut().session.on_resize(width, height);
        }

        setup_start_button(&document, game.clone());
        setup_pointer_lock(&document, game.clone());
        setup_keyboard(&document, game.clone());
        setup_mouse(&document, game.clone());
        setup_resize(&window, game.clone());

        request_animation_frame(game);

        log::info!("Gallery Shooter running!");
    }

    fn setup_start_button(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("startButton") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow().audio.resume();
                request_pointer_lock();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restartButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                // Keep the click from reaching the document fire handler
                event.stop_propagation();
                game.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_pointer_lock(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if is_pointer_locked() {
                    log::info!("Pointer lock ACQUIRED");
                    g.session.on_lock_acquired();
                } else {
                    log::info!("Pointer lock RELEASED");
                    g.session.on_lock_released();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "pointerlockchange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                log::error!("Pointer lock error!");
            });
            let _ = document.add_event_listener_with_callback(
                "pointerlockerror",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }
    }

    fn setup_keyboard(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                game.borrow_mut().session.on_key_down(&event.code());
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().session.on_key_up(&event.code());
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_mouse(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        // Mouse move - relative movement only matters while locked
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if !is_pointer_locked() {
                    return;
                }
                game.borrow_mut()
                    .session
                    .on_look(event.movement_x() as f32, event.movement_y() as f32);
            });
            let _ = document
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click - fire; the session ignores it until play starts
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().session.on_fire_requested();
            });
            let _ = document
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn viewport_size(window: &web_sys::Window) -> Option<(u32, u32)> {
        let width = window.inner_width().ok()?.as_f64()?;
        let height = window.inner_height().ok()?.as_f64()?;
        Some((width as u32, height as u32))
    }

    fn setup_resize(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Some((width, height)) = viewport_size(&window) {
                game.borrow_mut().session.on_resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Gallery Shooter (native) starting...");
    log::info!("Native mode runs a headless demo - serve the web build to play");

    let summary = demo::run(0x5eed);
    println!(
        "Demo finished: score {}, {} / {} hits ({}%), level {}",
        summary.score,
        summary.shots_hit,
        summary.shots_fired,
        (summary.accuracy * 100.0).round(),
        summary.level
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted headless session: lock, sweep the view while firing, unlock.
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use gallery_shooter::platform::{HeadlessHud, HeadlessScene};
    use gallery_shooter::{Session, Tuning};

    pub struct Summary {
        pub score: u64,
        pub shots_fired: u32,
        pub shots_hit: u32,
        pub accuracy: f32,
        pub level: u32,
    }

    const FRAME: f32 = 1.0 / 60.0;

    pub fn run(seed: u64) -> Summary {
        let mut session = Session::new(seed, Tuning::default());
        let mut scene = HeadlessScene::new();
        let mut hud = HeadlessHud::default();

        session.on_resize(1280, 720);
        session.on_lock_acquired();
        session.frame(FRAME, &mut scene, &mut hud);

        for frame in 0..3600u32 {
            // Aim at the nearest target by nudging the view toward it
            if let Some((dx, dy)) = aim_delta(&session) {
                session.on_look(dx, dy);
            }
            if frame % 15 == 0 {
                session.on_fire_requested();
            }
            if frame == 600 {
                session.on_key_down("KeyW");
            }
            if frame == 660 {
                session.on_key_up("KeyW");
                session.on_key_down("Space");
                session.on_key_up("Space");
            }
            session.frame(FRAME, &mut scene, &mut hud);
        }

        session.on_lock_released();
        session.frame(FRAME, &mut scene, &mut hud);
        log::info!(
            "Scene saw {} visuals spawned, {} despawned, {} HUD updates",
            scene.spawned,
            scene.despawned,
            hud.updates
        );

        let state = session.state();
        Summary {
            score: state.score,
            shots_fired: state.player.shots_fired,
            shots_hit: state.player.shots_hit,
            accuracy: state.player.accuracy,
            level: state.difficulty,
        }
    }

    /// Pointer movement (pixels) that turns the view toward the nearest target
    fn aim_delta(session: &Session) -> Option<(f32, f32)> {
        let state = session.state();
        let eye = state.body.pos;
        let target = state.targets.iter().min_by(|a, b| {
            a.pos
                .distance_squared(eye)
                .total_cmp(&b.pos.distance_squared(eye))
        })?;

        let to_target = (target.pos - eye).normalize_or_zero();
        let want_yaw = (-to_target.x).atan2(-to_target.z);
        let want_pitch = to_target.y.clamp(-1.0, 1.0).asin();

        let yaw_error = gallery_shooter::normalize_angle(want_yaw - state.body.yaw);
        let pitch_error = want_pitch - state.body.pitch;
        let pixels_per_radian = 1.0 / state.tuning.look_sensitivity;

        // Look deltas turn the view the opposite way to the sign of the error
        Some((
            -yaw_error * pixels_per_radian * 0.5,
            -pitch_error * pixels_per_radian * 0.5,
        ))
    }
}
