use std::fmt;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Unique string key of a registry entity (e.g. `"frontend"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// A sound cue emitted on a navigation transition.
/// The numeric value maps to a sound in the page's sound manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

impl SoundEvent {
    /// Pointer started hovering an entity.
    pub const HOVER: SoundEvent = SoundEvent(1);
    /// A new entity became focused.
    pub const SELECT: SoundEvent = SoundEvent(2);
    /// Focus returned to the overview.
    pub const BACK: SoundEvent = SoundEvent(3);
}

/// A scene event communicated from Rust to the page.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
/// Entity references are registry indices (`-1.0` for none).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SceneEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl SceneEvent {
    pub const FLOATS: usize = 4;

    /// Per-frame selection snapshot: a = selected index, b = hovered index, c = focused (0/1).
    pub const SELECTION: f32 = 1.0;
    /// Hover changed: a = hovered index.
    pub const HOVER: f32 = 2.0;
    /// Content surface opened: a = entity index.
    pub const CONTENT_OPEN: f32 = 3.0;
    /// Content surface closed.
    pub const CONTENT_CLOSE: f32 = 4.0;
    /// Chat surface opened: a = context entity index.
    pub const CHAT_OPEN: f32 = 5.0;
    /// Chat surface closed.
    pub const CHAT_CLOSE: f32 = 6.0;
    /// Visit logged: a = entity index, b = visited count.
    pub const VISIT: f32 = 7.0;
    /// Badge unlocked: a = badge code.
    pub const BADGE: f32 = 8.0;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}

/// Encode an optional registry index the way the wire format expects.
pub fn index_or_none(index: Option<usize>) -> f32 {
    index.map(|i| i as f32).unwrap_or(-1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_event_is_four_floats() {
        assert_eq!(std::mem::size_of::<SceneEvent>(), SceneEvent::FLOATS * 4);
    }

    #[test]
    fn entity_id_display_and_from() {
        let id = EntityId::from("frontend");
        assert_eq!(id.to_string(), "frontend");
        assert_eq!(id, EntityId::new(String::from("frontend")));
    }

    #[test]
    fn missing_index_encodes_negative() {
        assert_eq!(index_or_none(None), -1.0);
        assert_eq!(index_or_none(Some(3)), 3.0);
    }
}
