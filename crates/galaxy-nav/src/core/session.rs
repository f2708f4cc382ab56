use log::info;
use serde::Serialize;

use crate::api::types::EntityId;
use crate::core::registry::EntityRegistry;

/// Achievement unlocked during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Badge {
    /// Every planet has been visited.
    CosmicVoyager,
    /// Sent at least one chat message.
    AiTinkerer,
}

impl Badge {
    pub fn id(self) -> &'static str {
        match self {
            Badge::CosmicVoyager => "cosmic-voyager",
            Badge::AiTinkerer => "ai-tinkerer",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Badge::CosmicVoyager => "Cosmic Voyager",
            Badge::AiTinkerer => "AI Tinkerer",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Badge::CosmicVoyager => "Visited every planet",
            Badge::AiTinkerer => "Chatted with the AI Guide",
        }
    }

    /// Numeric code carried in `SceneEvent::BADGE`.
    pub fn code(self) -> f32 {
        match self {
            Badge::CosmicVoyager => 1.0,
            Badge::AiTinkerer => 2.0,
        }
    }
}

/// Per-mount session memory: visits, chat activity, badges.
/// Created with the scene and dropped at teardown.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    visited: Vec<EntityId>,
    chat_messages: u32,
    badges: Vec<Badge>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visit. Returns `true` the first time an id is seen.
    pub fn record_visit(&mut self, id: &EntityId) -> bool {
        if self.has_visited(id) {
            return false;
        }
        self.visited.push(id.clone());
        true
    }

    pub fn has_visited(&self, id: &EntityId) -> bool {
        self.visited.contains(id)
    }

    /// Visited ids in first-visit order.
    pub fn visited(&self) -> &[EntityId] {
        &self.visited
    }

    pub fn record_chat_message(&mut self) {
        self.chat_messages = self.chat_messages.saturating_add(1);
    }

    pub fn chat_messages(&self) -> u32 {
        self.chat_messages
    }

    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    /// Unlock any badges whose condition now holds.
    /// Returns only the newly unlocked ones.
    pub fn evaluate_badges(&mut self, registry: &EntityRegistry) -> Vec<Badge> {
        let mut unlocked = Vec::new();
        let all_visited = !registry.is_empty() && registry.ids().all(|id| self.has_visited(id));
        if all_visited {
            unlocked.push(Badge::CosmicVoyager);
        }
        if self.chat_messages > 0 {
            unlocked.push(Badge::AiTinkerer);
        }
        unlocked.retain(|badge| !self.badges.contains(badge));
        for badge in &unlocked {
            info!("badge unlocked: {}", badge.id());
        }
        self.badges.extend_from_slice(&unlocked);
        unlocked
    }
}
