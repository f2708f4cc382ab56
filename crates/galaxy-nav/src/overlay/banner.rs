use serde::Serialize;

use crate::core::registry::EntityRegistry;
use crate::core::selection::SelectionState;

pub const OVERVIEW_HINT: &str = "Click on a planet to explore";
pub const OVERVIEW_DETAIL: &str = "Drag to rotate • Right-drag to pan • Scroll to zoom • Arrow keys to cycle planets";

/// Text strip shown over the scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum InfoBanner {
    Overview {
        hint: &'static str,
        detail: &'static str,
    },
    Focused {
        name: String,
        description: String,
        color: String,
    },
}

impl InfoBanner {
    /// Banner for the current state. A selection that is no longer in the
    /// registry shows the overview hint.
    pub fn for_state(state: &SelectionState, registry: &EntityRegistry) -> Self {
        match state.selected.as_ref().and_then(|id| registry.get(id)) {
            Some(entity) => InfoBanner::Focused {
                name: entity.display_name.clone(),
                description: entity.description.clone(),
                color: entity.color.to_hex(),
            },
            None => InfoBanner::Overview {
                hint: OVERVIEW_HINT,
                detail: OVERVIEW_DETAIL,
            },
        }
    }
}

/// The site navigation bar is only shown in overview.
pub fn nav_visible(state: &SelectionState) -> bool {
    !state.is_focused_view()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;

    #[test]
    fn banner_follows_view_mode() {
        let registry =
            EntityRegistry::new(vec![Entity::new("ai").with_name("AI & ML").with_description("Models")]).unwrap();
        let overview = SelectionState::default();
        assert!(matches!(InfoBanner::for_state(&overview, &registry), InfoBanner::Overview { .. }));
        assert!(nav_visible(&overview));

        let focused = SelectionState { selected: Some("ai".into()), hovered: None };
        match InfoBanner::for_state(&focused, &registry) {
            InfoBanner::Focused { name, description, .. } => {
                assert_eq!(name, "AI & ML");
                assert_eq!(description, "Models");
            }
            other => panic!("expected focused banner, got {:?}", other),
        }
        assert!(!nav_visible(&focused));
    }

    #[test]
    fn banner_serializes_with_mode_tag() {
        let registry = EntityRegistry::default();
        let json = serde_json::to_string(&InfoBanner::for_state(&SelectionState::default(), &registry)).unwrap();
        assert!(json.starts_with(r#"{"mode":"overview""#));
    }
}
