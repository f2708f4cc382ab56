/// Input event types the scene understands.
/// Pointer coordinates are canvas pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The cursor moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// A touch/click began at (x, y). `button` is the DOM `MouseEvent.button`
    /// (0 primary, 2 secondary); touches report 0.
    PointerDown { x: f32, y: f32, button: u32 },
    /// A touch/click ended at (x, y).
    PointerUp { x: f32, y: f32 },
    /// The cursor left the canvas.
    PointerLeave,
    /// Mouse wheel. Positive `delta` zooms out.
    Wheel { delta: f32 },
    /// A key was pressed (DOM `keyCode`).
    KeyDown { key_code: u32 },
    /// Click on the minimap at (x, y) pixels relative to its centre.
    MinimapClick { x: f32, y: f32 },
    /// The canvas was resized.
    Resize { width: f32, height: f32 },
    /// The user closed the content surface without deselecting.
    DismissContent,
    /// The user closed the chat surface.
    DismissChat,
}

impl InputEvent {
    pub const PRIMARY_BUTTON: u32 = 0;
    pub const SECONDARY_BUTTON: u32 = 2;
}

/// A queue of input events.
/// JS writes events into the queue; Rust drains them once per frame,
/// before the camera goal is computed.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0, button: InputEvent::PRIMARY_BUTTON });
        q.push(InputEvent::KeyDown { key_code: 39 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn drain_preserves_arrival_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::MinimapClick { x: 1.5, y: -2.5 });
        q.push(InputEvent::DismissContent);
        q.push(InputEvent::Wheel { delta: 1.0 });
        let events = q.drain();
        assert_eq!(events[0], InputEvent::MinimapClick { x: 1.5, y: -2.5 });
        assert_eq!(events[1], InputEvent::DismissContent);
        assert!(matches!(events[2], InputEvent::Wheel { .. }));
    }
}
