use std::sync::Arc;

use log::debug;

use crate::api::context::FrameContext;
use crate::api::types::{index_or_none, EntityId, SceneEvent};
use crate::core::registry::EntityRegistry;
use crate::core::selection::{SelectionEffect, SelectionState};
use crate::overlay::surfaces::{ChatSurface, ContentSurface, ContentView};

/// Keeps the content and chat surfaces consistent with the selection.
///
/// At most one content surface exists, bound to the selected entity. The
/// user may dismiss it without deselecting; re-selecting the same entity
/// shows it again.
pub struct OverlayCoordinator {
    registry: Arc<EntityRegistry>,
    content: Box<dyn ContentSurface>,
    chat: Box<dyn ChatSurface>,
    /// Entity the content surface belongs to. Survives a user dismissal.
    content_bound: Option<EntityId>,
    content_visible: bool,
    chat_context: Option<EntityId>,
}

impl OverlayCoordinator {
    pub fn new(
        registry: Arc<EntityRegistry>,
        content: Box<dyn ContentSurface>,
        chat: Box<dyn ChatSurface>,
    ) -> Self {
        Self {
            registry,
            content,
            chat,
            content_bound: None,
            content_visible: false,
            chat_context: None,
        }
    }

    /// Carry out one selection side effect.
    pub fn apply(&mut self, effect: &SelectionEffect, frame: &mut FrameContext) {
        match effect {
            SelectionEffect::OpenContent(id) => self.open_content(id, frame),
            SelectionEffect::Reselected(id) => {
                if !self.content_visible || self.content_bound.as_ref() != Some(id) {
                    self.open_content(id, frame);
                }
            }
            SelectionEffect::CloseContent => {
                self.close_content(frame);
                self.content_bound = None;
            }
            SelectionEffect::OpenChat(id) => self.open_chat(id, frame),
            SelectionEffect::CloseChat => self.close_chat(frame),
            SelectionEffect::Visit(_) | SelectionEffect::HoverChanged(_) => {}
        }
    }

    fn open_content(&mut self, id: &EntityId, frame: &mut FrameContext) {
        let Some(entity) = self.registry.get(id) else {
            return;
        };
        let view = ContentView::from_entity(entity);
        self.content.open(entity, &view);
        self.content_bound = Some(id.clone());
        self.content_visible = true;
        debug!("overlay: content open for {}", id);
        frame.emit_event(SceneEvent::new(
            SceneEvent::CONTENT_OPEN,
            index_or_none(self.registry.index_of(id)),
            0.0,
            0.0,
        ));
    }

    fn close_content(&mut self, frame: &mut FrameContext) {
        if self.content_visible {
            self.content.close();
            self.content_visible = false;
            debug!("overlay: content closed");
            frame.emit_event(SceneEvent::new(SceneEvent::CONTENT_CLOSE, 0.0, 0.0, 0.0));
        }
    }

    fn open_chat(&mut self, id: &EntityId, frame: &mut FrameContext) {
        self.chat.open(id);
        self.chat_context = Some(id.clone());
        frame.emit_event(SceneEvent::new(
            SceneEvent::CHAT_OPEN,
            index_or_none(self.registry.index_of(id)),
            0.0,
            0.0,
        ));
    }

    fn close_chat(&mut self, frame: &mut FrameContext) {
        if self.chat_context.take().is_some() {
            self.chat.close();
            frame.emit_event(SceneEvent::new(SceneEvent::CHAT_CLOSE, 0.0, 0.0, 0.0));
        }
    }

    /// The user closed the modal. Selection is unchanged.
    pub fn dismiss_content(&mut self, frame: &mut FrameContext) {
        self.close_content(frame);
    }

    /// The user closed the chat panel. Selection is unchanged.
    pub fn dismiss_chat(&mut self, frame: &mut FrameContext) {
        self.close_chat(frame);
    }

    /// Per-frame consistency sweep: no content without a selection, and
    /// content (unless dismissed) always bound to the current selection.
    pub fn sync(&mut self, state: &SelectionState, frame: &mut FrameContext) {
        match &state.selected {
            None => {
                if self.content_visible || self.content_bound.is_some() {
                    self.close_content(frame);
                    self.content_bound = None;
                }
            }
            Some(id) if self.content_bound.as_ref() != Some(id) => self.open_content(id, frame),
            Some(_) => {}
        }
    }

    /// Close everything. Called when the scene unmounts.
    pub fn teardown(&mut self) {
        if self.content_visible {
            self.content.close();
        }
        if self.chat_context.is_some() {
            self.chat.close();
        }
        self.content_bound = None;
        self.content_visible = false;
        self.chat_context = None;
    }

    pub fn content_entity(&self) -> Option<&EntityId> {
        self.content_visible.then_some(self.content_bound.as_ref()).flatten()
    }

    pub fn is_content_visible(&self) -> bool {
        self.content_visible
    }

    pub fn is_chat_visible(&self) -> bool {
        self.chat_context.is_some()
    }

    pub fn chat_context(&self) -> Option<&EntityId> {
        self.chat_context.as_ref()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::components::entity::{Entity, EntityKind};

    /// Records every surface call as a string.
    #[derive(Clone, Default)]
    pub(crate) struct Recorder(pub Rc<RefCell<Vec<String>>>);

    impl Recorder {
        pub fn calls(&self) -> Vec<String> {
            self.0.borrow().clone()
        }

        pub fn clear(&self) {
            self.0.borrow_mut().clear();
        }
    }

    impl ContentSurface for Recorder {
        fn open(&mut self, entity: &Entity, _view: &ContentView) {
            self.0.borrow_mut().push(format!("content:{}", entity.id));
        }

        fn close(&mut self) {
            self.0.borrow_mut().push("content:close".into());
        }
    }

    impl ChatSurface for Recorder {
        fn open(&mut self, context: &EntityId) {
            self.0.borrow_mut().push(format!("chat:{}", context));
        }

        fn close(&mut self) {
            self.0.borrow_mut().push("chat:close".into());
        }
    }

    fn coordinator() -> (OverlayCoordinator, Recorder) {
        let registry = EntityRegistry::new(vec![
            Entity::new("a"),
            Entity::new("ai").with_kind(EntityKind::Conversational),
        ])
        .unwrap();
        let rec = Recorder::default();
        let coord = OverlayCoordinator::new(Arc::new(registry), Box::new(rec.clone()), Box::new(rec.clone()));
        (coord, rec)
    }

    fn id(s: &str) -> EntityId {
        EntityId::from(s)
    }

    #[test]
    fn open_and_close_content() {
        let (mut coord, rec) = coordinator();
        let mut frame = FrameContext::new();
        coord.apply(&SelectionEffect::OpenContent(id("a")), &mut frame);
        assert_eq!(coord.content_entity(), Some(&id("a")));
        coord.apply(&SelectionEffect::CloseContent, &mut frame);
        assert!(!coord.is_content_visible());
        assert_eq!(rec.calls(), vec!["content:a", "content:close"]);
        assert_eq!(frame.events_of(SceneEvent::CONTENT_OPEN).count(), 1);
        assert_eq!(frame.events_of(SceneEvent::CONTENT_CLOSE).count(), 1);
    }

    #[test]
    fn dismissed_content_reopens_on_reselect() {
        let (mut coord, rec) = coordinator();
        let mut frame = FrameContext::new();
        let state = SelectionState { selected: Some(id("a")), hovered: None };
        coord.apply(&SelectionEffect::OpenContent(id("a")), &mut frame);
        coord.dismiss_content(&mut frame);
        coord.sync(&state, &mut frame);
        assert!(!coord.is_content_visible());

        coord.apply(&SelectionEffect::Reselected(id("a")), &mut frame);
        assert!(coord.is_content_visible());
        assert_eq!(rec.calls(), vec!["content:a", "content:close", "content:a"]);
    }

    #[test]
    fn reselect_while_open_changes_nothing() {
        let (mut coord, rec) = coordinator();
        let mut frame = FrameContext::new();
        coord.apply(&SelectionEffect::OpenContent(id("a")), &mut frame);
        coord.apply(&SelectionEffect::Reselected(id("a")), &mut frame);
        assert_eq!(rec.calls(), vec!["content:a"]);
    }

    #[test]
    fn sync_closes_orphaned_content() {
        let (mut coord, rec) = coordinator();
        let mut frame = FrameContext::new();
        coord.apply(&SelectionEffect::OpenContent(id("a")), &mut frame);
        coord.sync(&SelectionState::default(), &mut frame);
        assert!(!coord.is_content_visible());
        assert_eq!(rec.calls().last().map(String::as_str), Some("content:close"));
    }

    #[test]
    fn sync_rebinds_to_selection() {
        let (mut coord, _) = coordinator();
        let mut frame = FrameContext::new();
        coord.sync(&SelectionState { selected: Some(id("ai")), hovered: None }, &mut frame);
        assert_eq!(coord.content_entity(), Some(&id("ai")));
    }

    #[test]
    fn chat_open_close_and_teardown() {
        let (mut coord, rec) = coordinator();
        let mut frame = FrameContext::new();
        coord.apply(&SelectionEffect::OpenContent(id("ai")), &mut frame);
        coord.apply(&SelectionEffect::OpenChat(id("ai")), &mut frame);
        assert!(coord.is_chat_visible());
        coord.apply(&SelectionEffect::CloseChat, &mut frame);
        coord.apply(&SelectionEffect::CloseChat, &mut frame);
        assert!(!coord.is_chat_visible());

        coord.apply(&SelectionEffect::OpenChat(id("ai")), &mut frame);
        rec.clear();
        coord.teardown();
        assert_eq!(rec.calls(), vec!["content:close", "chat:close"]);
        assert!(!coord.is_content_visible() && !coord.is_chat_visible());
    }
}
