use log::debug;

use crate::api::types::EntityId;
use crate::core::error::CollaboratorError;
use crate::core::session::SessionContext;

/// Records that an entity was visited. Fire-and-forget: the scene logs
/// failures and carries on.
pub trait VisitLogger {
    fn log_visit(&mut self, id: &EntityId, session: &mut SessionContext) -> Result<(), CollaboratorError>;
}

/// Default logger: keeps visits in the session memory only.
#[derive(Debug, Default)]
pub struct SessionVisitLogger;

impl VisitLogger for SessionVisitLogger {
    fn log_visit(&mut self, id: &EntityId, session: &mut SessionContext) -> Result<(), CollaboratorError> {
        if session.record_visit(id) {
            debug!("visit logged: {} ({} visited)", id, session.visited().len());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_logger_is_idempotent() {
        let mut logger = SessionVisitLogger;
        let mut session = SessionContext::new();
        let id = EntityId::from("about");
        logger.log_visit(&id, &mut session).unwrap();
        logger.log_visit(&id, &mut session).unwrap();
        assert_eq!(session.visited(), &[id]);
    }
}
