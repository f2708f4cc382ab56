use std::cell::RefCell;
use std::rc::Rc;

use galaxy_nav::{ChatSurface, ContentSurface, ContentView, Entity, EntityId};
use serde_json::{json, Value};

/// Overlay change the page has to apply to its DOM.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayCommand {
    OpenContent(ContentView),
    CloseContent,
    OpenChat(EntityId),
    CloseChat,
}

impl OverlayCommand {
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        Ok(match self {
            OverlayCommand::OpenContent(view) => json!({ "type": "openContent", "view": serde_json::to_value(view)? }),
            OverlayCommand::CloseContent => json!({ "type": "closeContent" }),
            OverlayCommand::OpenChat(context) => json!({ "type": "openChat", "context": context.as_str() }),
            OverlayCommand::CloseChat => json!({ "type": "closeChat" }),
        })
    }
}

/// Overlay commands queued since the page last read them.
#[derive(Debug, Default)]
pub struct OverlayOutbox {
    commands: Vec<OverlayCommand>,
}

impl OverlayOutbox {
    pub fn push(&mut self, command: OverlayCommand) {
        self.commands.push(command);
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn take(&mut self) -> Vec<OverlayCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Drain as a JSON array.
    pub fn take_json(&mut self) -> Result<String, serde_json::Error> {
        let values = self
            .take()
            .iter()
            .map(OverlayCommand::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        serde_json::to_string(&values)
    }
}

pub type SharedOutbox = Rc<RefCell<OverlayOutbox>>;

/// Content surface backed by the outbox. The page renders the modal.
pub struct OutboxContentSurface(pub SharedOutbox);

impl ContentSurface for OutboxContentSurface {
    fn open(&mut self, _entity: &Entity, view: &ContentView) {
        self.0.borrow_mut().push(OverlayCommand::OpenContent(view.clone()));
    }

    fn close(&mut self) {
        self.0.borrow_mut().push(OverlayCommand::CloseContent);
    }
}

/// Chat surface backed by the outbox. The page renders the panel.
pub struct OutboxChatSurface(pub SharedOutbox);

impl ChatSurface for OutboxChatSurface {
    fn open(&mut self, context: &EntityId) {
        self.0.borrow_mut().push(OverlayCommand::OpenChat(context.clone()));
    }

    fn close(&mut self) {
        self.0.borrow_mut().push(OverlayCommand::CloseChat);
    }
}
