use log::warn;

use crate::api::types::EntityId;
use crate::core::error::CollaboratorError;
use crate::core::registry::EntityRegistry;
use crate::core::session::SessionContext;

/// Answers a chat message. `context` is the focused entity, if any.
pub trait ChatResponder {
    fn respond(
        &mut self,
        message: &str,
        context: Option<&EntityId>,
        session: &mut SessionContext,
    ) -> Result<String, CollaboratorError>;
}

const DEFAULT_REPLY: &str = "That's a fascinating question. While my core programming is focused on this universe, \
I can tell you that the possibilities are as vast as the cosmos itself.";

/// Keyword table, checked in order. The first keyword contained in the
/// lower-cased message wins.
const KEYWORD_REPLIES: &[(&str, &str)] = &[
    ("hello", "Hello there, cosmic traveler! How can I help you explore this universe?"),
    (
        "help",
        "Of course! You can click on any planet to learn more about it, or just ask me questions \
about technology, AI, or the creator of this universe.",
    ),
    (
        "planet",
        "This universe has several planets representing different skills and projects. \
Which one are you curious about?",
    ),
    (
        "frontend",
        "Ah, the Frontend Planet! A place of great creativity and user interfaces. \
I hear there's a fun puzzle there.",
    ),
    ("ai", "The AI Planet is my home! It's a fascinating place where logic and learning come together."),
    (
        "secret",
        "A secret, you ask? I hear that if you visit all the planets, something special might happen... \
but that's just a rumor, of course.",
    ),
];

/// Keywords that name a planet; mentioning one counts as a visit when the
/// registry has a planet with that id.
const PLANET_KEYWORDS: &[&str] = &["frontend", "ai", "projects", "about"];

/// Offline responder driven by a fixed keyword table.
///
/// `Default` knows no planets, so it answers without recording visits.
#[derive(Debug, Default)]
pub struct KeywordResponder {
    known: Vec<EntityId>,
}

impl KeywordResponder {
    /// Responder that counts planet keywords as visits for ids in `registry`.
    pub fn for_registry(registry: &EntityRegistry) -> Self {
        Self { known: registry.ids().cloned().collect() }
    }
}

impl ChatResponder for KeywordResponder {
    fn respond(
        &mut self,
        message: &str,
        _context: Option<&EntityId>,
        session: &mut SessionContext,
    ) -> Result<String, CollaboratorError> {
        if message.trim().is_empty() {
            return Err(CollaboratorError::EmptyMessage);
        }
        session.record_chat_message();
        let lower = message.to_lowercase();
        let hit = KEYWORD_REPLIES.iter().find(|(keyword, _)| lower.contains(keyword));
        match hit {
            Some((keyword, reply)) => {
                if PLANET_KEYWORDS.contains(keyword) {
                    if let Some(id) = self.known.iter().find(|id| id.as_str() == *keyword) {
                        session.record_visit(id);
                    }
                }
                Ok((*reply).to_owned())
            }
            None => Ok(DEFAULT_REPLY.to_owned()),
        }
    }
}

/// Tries `primary`, answering with `fallback` when it fails.
pub struct FallbackResponder<P, F> {
    primary: P,
    fallback: F,
}

impl<P: ChatResponder, F: ChatResponder> FallbackResponder<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: ChatResponder, F: ChatResponder> ChatResponder for FallbackResponder<P, F> {
    fn respond(
        &mut self,
        message: &str,
        context: Option<&EntityId>,
        session: &mut SessionContext,
    ) -> Result<String, CollaboratorError> {
        match self.primary.respond(message, context, session) {
            Ok(reply) => Ok(reply),
            Err(CollaboratorError::EmptyMessage) => Err(CollaboratorError::EmptyMessage),
            Err(err) => {
                warn!("chat responder failed, using fallback: {}", err);
                self.fallback.respond(message, context, session)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;

    fn portfolio() -> EntityRegistry {
        EntityRegistry::new(vec![Entity::new("frontend"), Entity::new("ai")]).unwrap()
    }

    struct Offline;

    impl ChatResponder for Offline {
        fn respond(
            &mut self,
            _message: &str,
            _context: Option<&EntityId>,
            _session: &mut SessionContext,
        ) -> Result<String, CollaboratorError> {
            Err(CollaboratorError::ChatUnavailable("no endpoint".into()))
        }
    }

    #[test]
    fn keywords_match_in_table_order() {
        let mut bot = KeywordResponder::default();
        let mut session = SessionContext::new();
        let reply = bot.respond("Hello, tell me about a planet", None, &mut session).unwrap();
        assert!(reply.starts_with("Hello there"));
        let reply = bot.respond("Which PLANET is best?", None, &mut session).unwrap();
        assert!(reply.starts_with("This universe"));
        let reply = bot.respond("zzz", None, &mut session).unwrap();
        assert_eq!(reply, DEFAULT_REPLY);
        assert_eq!(session.chat_messages(), 3);
    }

    #[test]
    fn planet_keyword_counts_as_visit() {
        let mut bot = KeywordResponder::for_registry(&portfolio());
        let mut session = SessionContext::new();
        bot.respond("frontend stuff", None, &mut session).unwrap();
        assert!(session.has_visited(&"frontend".into()));
    }

    #[test]
    fn unknown_planet_keyword_is_not_a_visit() {
        let mut bot = KeywordResponder::for_registry(&EntityRegistry::new(vec![Entity::new("about")]).unwrap());
        let mut session = SessionContext::new();
        let reply = bot.respond("tell me about frontend", None, &mut session).unwrap();
        assert!(reply.starts_with("Ah, the Frontend Planet"));
        assert!(session.visited().is_empty());

        let mut session = SessionContext::new();
        KeywordResponder::default().respond("ai?", None, &mut session).unwrap();
        assert!(session.visited().is_empty());
    }

    #[test]
    fn empty_message_is_rejected() {
        let mut bot = KeywordResponder::default();
        let mut session = SessionContext::new();
        assert!(matches!(
            bot.respond("   ", None, &mut session),
            Err(CollaboratorError::EmptyMessage)
        ));
        assert_eq!(session.chat_messages(), 0);
    }

    #[test]
    fn fallback_answers_when_primary_fails() {
        let mut bot = FallbackResponder::new(Offline, KeywordResponder::for_registry(&portfolio()));
        let mut session = SessionContext::new();
        let reply = bot.respond("hello", None, &mut session).unwrap();
        assert!(reply.starts_with("Hello there"));
        bot.respond("tell me about ai", None, &mut session).unwrap();
        assert!(session.has_visited(&"ai".into()));
        assert!(matches!(bot.respond("", None, &mut session), Err(CollaboratorError::EmptyMessage)));
    }
}
