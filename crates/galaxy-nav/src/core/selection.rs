use std::sync::Arc;

use log::debug;

use crate::api::types::EntityId;
use crate::core::registry::EntityRegistry;

/// Which entity is focused and which one the pointer is over.
/// Both always name registry entities when set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub selected: Option<EntityId>,
    pub hovered: Option<EntityId>,
}

impl SelectionState {
    /// FOCUSED view while something is selected, OVERVIEW otherwise.
    pub fn is_focused_view(&self) -> bool {
        self.selected.is_some()
    }

    pub fn is_selected(&self, id: &EntityId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    pub fn is_hovered(&self, id: &EntityId) -> bool {
        self.hovered.as_ref() == Some(id)
    }

    /// Hovered or selected.
    pub fn is_emphasised(&self, id: &EntityId) -> bool {
        self.is_selected(id) || self.is_hovered(id)
    }
}

/// Side effect requested by a selection transition.
/// Queued by the controller and drained by the scene in the same frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEffect {
    /// Bind the content surface to this entity and show it.
    OpenContent(EntityId),
    /// Hide the content surface.
    CloseContent,
    /// Show the chat surface with this entity as context.
    OpenChat(EntityId),
    /// Hide the chat surface.
    CloseChat,
    /// The current selection was selected again. Re-shows dismissed content.
    Reselected(EntityId),
    /// Record a visit (fire-and-forget).
    Visit(EntityId),
    /// Hover target changed.
    HoverChanged(Option<EntityId>),
}

/// Owns [`SelectionState`] and mediates every transition.
///
/// All operations are total: ids that are not in the registry are ignored,
/// nothing here returns an error or panics.
pub struct SelectionController {
    registry: Arc<EntityRegistry>,
    state: SelectionState,
    effects: Vec<SelectionEffect>,
}

impl SelectionController {
    pub fn new(registry: Arc<EntityRegistry>) -> Self {
        Self {
            registry,
            state: SelectionState::default(),
            effects: Vec::with_capacity(8),
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn selected(&self) -> Option<&EntityId> {
        self.state.selected.as_ref()
    }

    pub fn hovered(&self) -> Option<&EntityId> {
        self.state.hovered.as_ref()
    }

    pub fn is_focused_view(&self) -> bool {
        self.state.is_focused_view()
    }

    /// Focus an entity, or return to the overview with `None`.
    ///
    /// A new entity opens content (and chat for the conversational entity)
    /// and logs a visit. Selecting the current entity again changes nothing
    /// but re-shows dismissed content.
    pub fn select(&mut self, id: Option<&EntityId>) {
        let Some(id) = id else {
            self.deselect();
            return;
        };
        let Some(entity) = self.registry.get(id) else {
            debug!("select: unknown entity '{}' ignored", id);
            return;
        };
        if self.state.is_selected(id) {
            self.effects.push(SelectionEffect::Reselected(id.clone()));
            return;
        }

        let opens_chat = entity.is_conversational();
        let previous = self.state.selected.replace(id.clone());
        let had_chat = previous
            .as_ref()
            .and_then(|prev| self.registry.get(prev))
            .is_some_and(|prev| prev.is_conversational());
        debug!("select: {:?} -> {}", previous.as_ref().map(EntityId::as_str), id);

        self.effects.push(SelectionEffect::OpenContent(id.clone()));
        if opens_chat {
            self.effects.push(SelectionEffect::OpenChat(id.clone()));
        } else if had_chat {
            self.effects.push(SelectionEffect::CloseChat);
        }
        self.effects.push(SelectionEffect::Visit(id.clone()));
    }

    fn deselect(&mut self) {
        let Some(previous) = self.state.selected.take() else {
            return;
        };
        debug!("select: {} -> overview", previous);
        self.effects.push(SelectionEffect::CloseContent);
        if self.registry.get(&previous).is_some_and(|e| e.is_conversational()) {
            self.effects.push(SelectionEffect::CloseChat);
        }
    }

    /// Set the hovered entity. Unknown ids clear hover.
    pub fn hover(&mut self, id: Option<&EntityId>) {
        let next = id.filter(|id| self.registry.contains(id)).cloned();
        if next != self.state.hovered {
            debug!("hover: {:?}", next.as_ref().map(EntityId::as_str));
            self.state.hovered = next.clone();
            self.effects.push(SelectionEffect::HoverChanged(next));
        }
    }

    /// Deselect if `id` is the current selection, otherwise select it.
    pub fn toggle_selection(&mut self, id: &EntityId) {
        if self.state.is_selected(id) {
            self.select(None);
        } else {
            self.select(Some(id));
        }
    }

    /// Select the entity after the current one (the first from overview).
    pub fn select_next(&mut self) {
        let next = self.registry.next_after(self.state.selected.as_ref()).cloned();
        if let Some(next) = next {
            self.select(Some(&next));
        }
    }

    /// Select the entity before the current one (the last from overview).
    pub fn select_previous(&mut self) {
        let prev = self.registry.previous_before(self.state.selected.as_ref()).cloned();
        if let Some(prev) = prev {
            self.select(Some(&prev));
        }
    }

    /// Re-select the current entity, if any.
    pub fn reselect(&mut self) {
        if let Some(current) = self.state.selected.clone() {
            self.select(Some(&current));
        }
    }

    /// Take all queued side effects in the order they were requested.
    pub fn drain_effects(&mut self) -> Vec<SelectionEffect> {
        std::mem::take(&mut self.effects)
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::{Entity, EntityKind};

    fn controller() -> SelectionController {
        let registry = EntityRegistry::new(vec![
            Entity::new("a"),
            Entity::new("b"),
            Entity::new("ai").with_kind(EntityKind::Conversational),
        ])
        .unwrap();
        SelectionController::new(Arc::new(registry))
    }

    fn id(s: &str) -> EntityId {
        EntityId::from(s)
    }

    #[test]
    fn starts_in_overview() {
        let c = controller();
        assert_eq!(c.state(), &SelectionState::default());
        assert!(!c.is_focused_view());
    }

    #[test]
    fn select_opens_content_and_logs_visit() {
        let mut c = controller();
        c.select(Some(&id("a")));
        assert_eq!(c.selected(), Some(&id("a")));
        assert_eq!(
            c.drain_effects(),
            vec![SelectionEffect::OpenContent(id("a")), SelectionEffect::Visit(id("a"))]
        );
    }

    #[test]
    fn single_selection_across_transitions() {
        let mut c = controller();
        c.select(Some(&id("a")));
        c.select(Some(&id("b")));
        assert_eq!(c.selected(), Some(&id("b")));
        c.select(None);
        assert_eq!(c.selected(), None);
        assert!(c.drain_effects().contains(&SelectionEffect::CloseContent));
    }

    #[test]
    fn unknown_id_is_a_no_op() {
        let mut c = controller();
        c.select(Some(&id("a")));
        c.drain_effects();
        c.select(Some(&id("missing")));
        assert_eq!(c.selected(), Some(&id("a")));
        assert!(c.drain_effects().is_empty());
    }

    #[test]
    fn toggle_twice_returns_to_overview() {
        let mut c = controller();
        c.toggle_selection(&id("b"));
        assert_eq!(c.selected(), Some(&id("b")));
        c.toggle_selection(&id("b"));
        assert_eq!(c.selected(), None);
    }

    #[test]
    fn reselect_is_idempotent() {
        let mut c = controller();
        c.select(Some(&id("a")));
        c.drain_effects();
        c.select(Some(&id("a")));
        assert_eq!(c.selected(), Some(&id("a")));
        assert_eq!(c.drain_effects(), vec![SelectionEffect::Reselected(id("a"))]);
    }

    #[test]
    fn hover_never_changes_selection() {
        let mut c = controller();
        c.select(Some(&id("a")));
        c.hover(Some(&id("b")));
        c.hover(None);
        c.hover(Some(&id("ai")));
        assert_eq!(c.selected(), Some(&id("a")));
        assert_eq!(c.hovered(), Some(&id("ai")));
    }

    #[test]
    fn unknown_hover_clears() {
        let mut c = controller();
        c.hover(Some(&id("a")));
        c.hover(Some(&id("nope")));
        assert_eq!(c.hovered(), None);
    }

    #[test]
    fn repeated_hover_emits_once() {
        let mut c = controller();
        c.hover(Some(&id("a")));
        c.hover(Some(&id("a")));
        assert_eq!(c.drain_effects(), vec![SelectionEffect::HoverChanged(Some(id("a")))]);
    }

    #[test]
    fn conversational_entity_opens_and_closes_chat() {
        let mut c = controller();
        c.select(Some(&id("ai")));
        let effects = c.drain_effects();
        assert!(effects.contains(&SelectionEffect::OpenChat(id("ai"))));

        c.select(Some(&id("a")));
        assert!(c.drain_effects().contains(&SelectionEffect::CloseChat));

        c.select(Some(&id("ai")));
        c.drain_effects();
        c.select(None);
        assert_eq!(
            c.drain_effects(),
            vec![SelectionEffect::CloseContent, SelectionEffect::CloseChat]
        );
    }

    #[test]
    fn keyboard_cycling_wraps() {
        let mut c = controller();
        c.select_next();
        assert_eq!(c.selected(), Some(&id("a")));
        c.select_previous();
        assert_eq!(c.selected(), Some(&id("ai")));
        c.select_next();
        assert_eq!(c.selected(), Some(&id("a")));

        c.select(None);
        c.select_previous();
        assert_eq!(c.selected(), Some(&id("ai")));
    }

    #[test]
    fn n_steps_return_to_start() {
        let mut c = controller();
        c.select(Some(&id("b")));
        for _ in 0..c.registry().len() {
            c.select_next();
        }
        assert_eq!(c.selected(), Some(&id("b")));
    }

    #[test]
    fn deselect_from_overview_emits_nothing() {
        let mut c = controller();
        c.select(None);
        assert!(c.drain_effects().is_empty());
    }
}
