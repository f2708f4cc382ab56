use galaxy_nav::{ChatResponder, CollaboratorError, EntityId, SessionContext};
use js_sys::Function;
use wasm_bindgen::JsValue;

/// Chat backend supplied by the page: `callback(message, contextId | null)`
/// returns the reply as a string.
///
/// A throw or a non-string result is reported as `ChatUnavailable`, so a
/// `FallbackResponder` can answer instead.
pub struct JsChatResponder {
    callback: Function,
}

impl JsChatResponder {
    pub fn new(callback: Function) -> Self {
        Self { callback }
    }
}

impl ChatResponder for JsChatResponder {
    fn respond(
        &mut self,
        message: &str,
        context: Option<&EntityId>,
        session: &mut SessionContext,
    ) -> Result<String, CollaboratorError> {
        if message.trim().is_empty() {
            return Err(CollaboratorError::EmptyMessage);
        }
        let context = context.map_or(JsValue::NULL, |id| JsValue::from_str(id.as_str()));
        let reply = self
            .callback
            .call2(&JsValue::NULL, &JsValue::from_str(message), &context)
            .map_err(|err| CollaboratorError::ChatUnavailable(format!("{:?}", err)))?;
        let reply = reply
            .as_string()
            .ok_or_else(|| CollaboratorError::ChatUnavailable("reply is not a string".into()))?;
        session.record_chat_message();
        Ok(reply)
    }
}
