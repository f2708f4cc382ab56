use log::debug;

use crate::api::config::SceneConfig;
use crate::api::types::{SceneEvent, SoundEvent};

/// Per-frame outbox handed to the scene on every update.
/// Sounds and events are forwarded to the page, then cleared.
pub struct FrameContext {
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<SceneEvent>,
    max_sounds: usize,
    max_events: usize,
}

impl FrameContext {
    pub fn new() -> Self {
        Self::from_config(&SceneConfig::default())
    }

    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            sounds: Vec::with_capacity(config.max_sounds),
            events: Vec::with_capacity(config.max_events),
            max_sounds: config.max_sounds,
            max_events: config.max_events,
        }
    }

    /// Emit a sound event. Dropped once the per-frame capacity is reached.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        if self.sounds.len() < self.max_sounds {
            self.sounds.push(event);
        } else {
            debug!("sound outbox full, dropping {:?}", event);
        }
    }

    /// Emit a scene event. Dropped once the per-frame capacity is reached.
    pub fn emit_event(&mut self, event: SceneEvent) {
        if self.events.len() < self.max_events {
            self.events.push(event);
        } else {
            debug!("event outbox full, dropping kind {}", event.kind);
        }
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }

    /// Events of one kind emitted this frame.
    pub fn events_of(&self, kind: f32) -> impl Iterator<Item = &SceneEvent> {
        self.events.iter().filter(move |e| e.kind == kind)
    }
}

impl Default for FrameContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outbox_respects_capacity() {
        let config = SceneConfig { max_events: 2, max_sounds: 1, ..SceneConfig::default() };
        let mut ctx = FrameContext::from_config(&config);
        for _ in 0..5 {
            ctx.emit_event(SceneEvent::new(SceneEvent::VISIT, 0.0, 0.0, 0.0));
            ctx.emit_sound(SoundEvent::SELECT);
        }
        assert_eq!(ctx.events.len(), 2);
        assert_eq!(ctx.sounds.len(), 1);

        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
        assert!(ctx.sounds.is_empty());
    }
}
