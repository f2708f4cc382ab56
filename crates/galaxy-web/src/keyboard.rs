use galaxy_nav::NavKey;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{KeyboardEvent, Window};

/// Window-level `keydown` listener for the navigation keys.
/// Attached while the scene is mounted; dropping it removes the listener.
pub struct KeyboardScope {
    window: Window,
    closure: Closure<dyn FnMut(KeyboardEvent)>,
}

impl KeyboardScope {
    pub fn attach(mut on_key: impl FnMut(NavKey) + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let closure = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if let Some(key) = NavKey::from_key_name(&event.key()) {
                on_key(key);
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        log::debug!("keyboard scope attached");
        Ok(Self { window, closure })
    }
}

impl Drop for KeyboardScope {
    fn drop(&mut self) {
        let removed = self
            .window
            .remove_event_listener_with_callback("keydown", self.closure.as_ref().unchecked_ref());
        if removed.is_err() {
            log::warn!("keyboard scope: failed to remove keydown listener");
        }
    }
}
