pub mod chat;
pub mod keyboard;
pub mod runner;
pub mod surfaces;

pub use chat::JsChatResponder;
pub use keyboard::KeyboardScope;
pub use runner::GalaxyRunner;
pub use surfaces::{OverlayCommand, OverlayOutbox, OutboxChatSurface, OutboxContentSurface};

pub use galaxy_nav;
pub use js_sys;

/// Generate all `#[wasm_bindgen]` exports for a galaxy page.
///
/// Generates:
/// - `thread_local!` storage for the GalaxyRunner, the keyboard scope and
///   the page's overlay listener
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (galaxy_init, galaxy_tick, input handlers,
///   navigation calls, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// galaxy_web::export_galaxy!(include_str!("../assets/planets.json"), "my-galaxy");
/// ```
///
/// # Arguments
///
/// - `$manifest`: expression yielding the registry manifest JSON (`&str`)
/// - `$name`: A string literal used in log messages
#[macro_export]
macro_rules! export_galaxy {
    ($manifest:expr, $name:literal) => {
        use std::cell::RefCell;
        use $crate::galaxy_nav::InputEvent;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GalaxyRunner>> = RefCell::new(None);
            static KEYBOARD: RefCell<Option<$crate::KeyboardScope>> = RefCell::new(None);
            static OVERLAY_LISTENER: RefCell<Option<$crate::js_sys::Function>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GalaxyRunner) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Galaxy not initialized. Call galaxy_init() first.");
                f(runner)
            })
        }

        /// Push pending overlay commands to the page's listener, if one is set.
        fn flush_overlays() {
            let json = with_runner(|r| r.take_overlay_json());
            if json == "[]" {
                return;
            }
            OVERLAY_LISTENER.with(|cell| {
                if let Some(listener) = cell.borrow().as_ref() {
                    if let Err(err) = listener.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                        log::warn!("{}: overlay listener threw: {:?}", $name, err);
                    }
                }
            });
        }

        #[wasm_bindgen]
        pub fn galaxy_init() -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let runner = $crate::GalaxyRunner::from_manifest($manifest).map_err(|err| {
                log::error!("{}: invalid manifest: {}", $name, err);
                JsValue::from_str(&err.to_string())
            })?;

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            let keyboard = $crate::KeyboardScope::attach(|key| {
                RUNNER.with(|cell| {
                    if let Some(runner) = cell.borrow_mut().as_mut() {
                        runner.push_input(InputEvent::KeyDown { key_code: key.key_code() });
                    }
                });
            })?;
            KEYBOARD.with(|cell| {
                *cell.borrow_mut() = Some(keyboard);
            });

            log::info!("{}: initialized", $name);
            Ok(())
        }

        #[wasm_bindgen]
        pub fn galaxy_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
            flush_overlays();
        }

        /// Register `callback(json)` to receive overlay commands.
        #[wasm_bindgen]
        pub fn galaxy_on_overlay(callback: $crate::js_sys::Function) {
            OVERLAY_LISTENER.with(|cell| {
                *cell.borrow_mut() = Some(callback);
            });
        }

        /// Register `callback(message, contextId)` as the chat backend. When it
        /// throws or returns a non-string, the keyword table answers instead.
        #[wasm_bindgen]
        pub fn galaxy_on_chat(callback: $crate::js_sys::Function) {
            with_runner(|r| {
                let keywords = $crate::galaxy_nav::KeywordResponder::for_registry(r.scene().registry());
                r.set_responder(Box::new($crate::galaxy_nav::FallbackResponder::new(
                    $crate::JsChatResponder::new(callback),
                    keywords,
                )));
            });
        }

        /// Detach listeners and close overlays. `galaxy_init()` may be called again.
        #[wasm_bindgen]
        pub fn galaxy_teardown() {
            KEYBOARD.with(|cell| cell.borrow_mut().take());
            let runner = RUNNER.with(|cell| cell.borrow_mut().take());
            if let Some(mut runner) = runner {
                runner.teardown();
                let json = runner.take_overlay_json();
                OVERLAY_LISTENER.with(|cell| {
                    if let Some(listener) = cell.borrow_mut().take() {
                        let _ = listener.call1(&JsValue::NULL, &JsValue::from_str(&json));
                    }
                });
                log::info!("{}: torn down", $name);
            }
        }

        // ---- Input ----

        /// `button` is `MouseEvent.button`: 0 drags orbit, 2 drags pan.
        #[wasm_bindgen]
        pub fn galaxy_pointer_down(x: f32, y: f32, button: u32) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y, button }));
        }

        #[wasm_bindgen]
        pub fn galaxy_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn galaxy_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn galaxy_pointer_leave() {
            with_runner(|r| r.push_input(InputEvent::PointerLeave));
        }

        #[wasm_bindgen]
        pub fn galaxy_wheel(delta: f32) {
            with_runner(|r| r.push_input(InputEvent::Wheel { delta }));
        }

        #[wasm_bindgen]
        pub fn galaxy_key_down(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn galaxy_minimap_click(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::MinimapClick { x, y }));
        }

        #[wasm_bindgen]
        pub fn galaxy_resize(width: f32, height: f32) {
            with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
        }

        #[wasm_bindgen]
        pub fn galaxy_dismiss_content() {
            with_runner(|r| r.push_input(InputEvent::DismissContent));
        }

        #[wasm_bindgen]
        pub fn galaxy_dismiss_chat() {
            with_runner(|r| r.push_input(InputEvent::DismissChat));
        }

        // ---- Direct navigation ----

        /// Select by id. An empty string returns to the overview.
        #[wasm_bindgen]
        pub fn galaxy_select(id: &str) {
            with_runner(|r| r.select(id));
            flush_overlays();
        }

        #[wasm_bindgen]
        pub fn galaxy_hover(id: &str) {
            with_runner(|r| r.hover(id));
        }

        #[wasm_bindgen]
        pub fn galaxy_chat_send(message: &str) -> String {
            with_runner(|r| r.chat_send(message))
        }

        // ---- JSON views ----

        #[wasm_bindgen]
        pub fn galaxy_content_json() -> String {
            with_runner(|r| r.content_json())
        }

        #[wasm_bindgen]
        pub fn galaxy_banner_json() -> String {
            with_runner(|r| r.banner_json())
        }

        #[wasm_bindgen]
        pub fn galaxy_minimap_json() -> String {
            with_runner(|r| r.minimap_json())
        }

        #[wasm_bindgen]
        pub fn galaxy_session_json() -> String {
            with_runner(|r| r.session_json())
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_header_ptr() -> *const f32 {
            with_runner(|r| r.header_ptr())
        }

        #[wasm_bindgen]
        pub fn get_planets_ptr() -> *const f32 {
            with_runner(|r| r.planets_ptr())
        }

        #[wasm_bindgen]
        pub fn get_planet_count() -> u32 {
            with_runner(|r| r.planet_count())
        }

        #[wasm_bindgen]
        pub fn get_orbits_ptr() -> *const f32 {
            with_runner(|r| r.orbits_ptr())
        }

        #[wasm_bindgen]
        pub fn get_orbit_vertex_count() -> u32 {
            with_runner(|r| r.orbit_vertex_count())
        }

        #[wasm_bindgen]
        pub fn get_camera_ptr() -> *const f32 {
            with_runner(|r| r.camera_ptr())
        }

        #[wasm_bindgen]
        pub fn get_sound_events_ptr() -> *const u8 {
            with_runner(|r| r.sound_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_sound_events_len() -> u32 {
            with_runner(|r| r.sound_events_len())
        }

        #[wasm_bindgen]
        pub fn get_scene_events_ptr() -> *const f32 {
            with_runner(|r| r.scene_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_scene_events_len() -> u32 {
            with_runner(|r| r.scene_events_len())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_planets() -> u32 {
            with_runner(|r| r.max_planets())
        }

        #[wasm_bindgen]
        pub fn get_max_orbit_vertices() -> u32 {
            with_runner(|r| r.max_orbit_vertices())
        }

        #[wasm_bindgen]
        pub fn get_max_sounds() -> u32 {
            with_runner(|r| r.max_sounds())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }
    };
}
