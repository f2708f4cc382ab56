use serde::Serialize;

use crate::api::types::EntityId;
use crate::components::content::ContentBody;
use crate::components::entity::{Entity, EntityKind};

/// The content modal. Implemented by the page (or a test double).
pub trait ContentSurface {
    /// Show content for `entity`. Replaces whatever was shown.
    fn open(&mut self, entity: &Entity, view: &ContentView);
    fn close(&mut self);
}

/// The chat panel. Only opened for the conversational entity.
pub trait ChatSurface {
    /// Show the panel with `context` as the focused entity.
    fn open(&mut self, context: &EntityId);
    fn close(&mut self);
}

/// Serializable content modal model, handed to the UI as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentView {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    /// `#rrggbb` accent color.
    pub color: String,
    pub kind: EntityKind,
    pub tabs: Vec<ContentTab>,
}

/// One tab of the modal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentTab {
    pub key: String,
    pub title: String,
    #[serde(flatten)]
    pub body: ContentBody,
}

impl ContentView {
    pub fn from_entity(entity: &Entity) -> Self {
        Self {
            id: entity.id.clone(),
            title: entity.display_name.clone(),
            description: entity.description.clone(),
            color: entity.color.to_hex(),
            kind: entity.kind,
            tabs: entity
                .content
                .sections
                .iter()
                .map(|section| ContentTab {
                    key: section.key.clone(),
                    title: section.title(),
                    body: section.body.clone(),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
