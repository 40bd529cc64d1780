pub mod controller;
pub mod message;
pub mod store;

use crate::prompts::{INITIAL_GREETING, RESET_GREETING};
use crate::session::message::Message;
use crate::session::store::SessionStore;

/// The append-only message sequence for one chat session. Messages are
/// never edited or removed individually; the only bulk mutation is a full
/// reset back to a single greeting.
pub struct ChatSession {
    messages: Vec<Message>,
}

impl ChatSession {
    /// Fresh session holding the initial greeting.
    pub fn seeded() -> Self {
        Self {
            messages: vec![Message::model_reply(INITIAL_GREETING)],
        }
    }

    /// Restores the persisted session, re-seeding when nothing usable is
    /// stored.
    pub fn restore(store: &SessionStore) -> Self {
        match store.load() {
            Some(messages) => Self { messages },
            None => Self::seeded(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Discards the whole sequence and re-seeds with the reset greeting.
    pub fn reset(&mut self) {
        self.messages = vec![Message::model_reply(RESET_GREETING)];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::message::Role;

    #[test]
    fn seeded_session_holds_one_greeting() {
        let session = ChatSession::seeded();
        assert_eq!(session.messages().len(), 1);
        let seed = &session.messages()[0];
        assert_eq!(seed.role, Role::Model);
        assert_eq!(seed.text.as_deref(), Some(INITIAL_GREETING));
    }

    #[test]
    fn reset_replaces_sequence_with_reset_greeting() {
        let mut session = ChatSession::seeded();
        session.append(Message::user_text("[알람] 체크인"));
        session.append(Message::model_reply("잘 지냈어?"));

        session.reset();

        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].text.as_deref(), Some(RESET_GREETING));
    }

    #[test]
    fn restore_reseeds_when_store_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));

        let session = ChatSession::restore(&store);
        assert_eq!(session.messages().len(), 1);
        assert_eq!(
            session.messages()[0].text.as_deref(),
            Some(INITIAL_GREETING)
        );
    }

    #[test]
    fn restore_replays_persisted_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));

        let mut original = ChatSession::seeded();
        original.append(Message::model_reply("두 번째"));
        store.save(original.messages()).unwrap();

        let restored = ChatSession::restore(&store);
        assert_eq!(restored.messages(), original.messages());
    }
}
