use crate::capture::CapturedImage;
use crate::providers::ReplyProvider;
use crate::session::ChatSession;
use crate::session::message::Message;
use crate::session::store::SessionStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Outcome of a capture or alarm trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Exchange completed; the model reply (or a fallback) was appended.
    Replied(String),
    /// A prior exchange is still in flight; the trigger was dropped.
    Busy,
}

enum Contribution {
    Photo(CapturedImage),
    Text(String),
}

/// Owns the session sequence and runs the capture → encode → send →
/// append-reply cycle, allowing one exchange in flight at a time.
#[derive(Clone)]
pub struct SessionController {
    session: Arc<Mutex<ChatSession>>,
    store: SessionStore,
    provider: Arc<dyn ReplyProvider>,
    in_flight: Arc<AtomicBool>,
}

impl SessionController {
    pub fn new(
        session: ChatSession,
        store: SessionStore,
        provider: Arc<dyn ReplyProvider>,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            store,
            provider,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Submits a captured photo as the next user turn.
    pub async fn submit_photo(&self, image: CapturedImage) -> SubmitOutcome {
        self.exchange(Contribution::Photo(image)).await
    }

    /// Submits a text contribution. Only the alarm trigger uses this path;
    /// the user themselves can only answer with photos.
    pub async fn submit_text(&self, text: &str) -> SubmitOutcome {
        self.exchange(Contribution::Text(text.to_string())).await
    }

    async fn exchange(&self, contribution: Contribution) -> SubmitOutcome {
        let Some(_guard) = FlightGuard::acquire(&self.in_flight) else {
            debug!("trigger dropped: exchange already in flight");
            return SubmitOutcome::Busy;
        };

        let message = match contribution {
            Contribution::Photo(image) => Message::user_photo(image),
            Contribution::Text(text) => Message::user_text(text),
        };
        // The contribution is replayed both as the last history turn and as
        // the trailing turn of the request
        let new_text = message.text.clone();
        let new_image = message.image();

        let history = {
            let mut session = self.session.lock().await;
            session.append(message);
            self.persist(&session);
            session.messages().to_vec()
        };

        let reply = self
            .provider
            .reply(&history, new_text.as_deref(), new_image.as_ref())
            .await;

        let mut session = self.session.lock().await;
        session.append(Message::model_reply(reply.clone()));
        self.persist(&session);

        SubmitOutcome::Replied(reply)
    }

    /// Replaces the sequence with a single reset greeting and overwrites
    /// the persisted store to match.
    pub async fn reset(&self) {
        let mut session = self.session.lock().await;
        session.reset();
        self.persist(&session);
    }

    /// A copy of the current sequence, for display.
    pub async fn snapshot(&self) -> Vec<Message> {
        self.session.lock().await.messages().to_vec()
    }

    fn persist(&self, session: &ChatSession) {
        // Write-through, not transactional: a failed save leaves persisted
        // state stale by at most one exchange
        if let Err(err) = self.store.save(session.messages()) {
            warn!("failed to persist session: {err}");
        }
    }
}

struct FlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> FlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for FlightGuard<'_> {
    // Clears the busy flag on every exit path, including panics
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::{ALARM_PROMPT, INITIAL_GREETING};
    use crate::session::message::Role;
    use async_trait::async_trait;
    use tokio::sync::Semaphore;

    struct CannedProvider {
        reply: String,
    }

    #[async_trait]
    impl ReplyProvider for CannedProvider {
        async fn reply(
            &self,
            _history: &[Message],
            _new_text: Option<&str>,
            _new_image: Option<&CapturedImage>,
        ) -> String {
            self.reply.clone()
        }
    }

    /// Blocks inside `reply` until the test hands out a permit.
    struct GatedProvider {
        gate: Arc<Semaphore>,
    }

    #[async_trait]
    impl ReplyProvider for GatedProvider {
        async fn reply(
            &self,
            _history: &[Message],
            _new_text: Option<&str>,
            _new_image: Option<&CapturedImage>,
        ) -> String {
            let _permit = self.gate.acquire().await.unwrap();
            "늦은 답장이야".to_string()
        }
    }

    fn controller_with(provider: Arc<dyn ReplyProvider>, dir: &tempfile::TempDir) -> SessionController {
        let store = SessionStore::new(dir.path().join("session.json"));
        SessionController::new(ChatSession::seeded(), store, provider)
    }

    fn sample_image() -> CapturedImage {
        CapturedImage {
            data: "X".to_string(),
            mime_type: "image/jpeg".to_string(),
        }
    }

    #[tokio::test]
    async fn photo_exchange_appends_user_turn_and_reply() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(CannedProvider {
            reply: "와, 좋은 사진이야!".to_string(),
        });
        let controller = controller_with(provider, &dir);

        let outcome = controller.submit_photo(sample_image()).await;
        assert_eq!(outcome, SubmitOutcome::Replied("와, 좋은 사진이야!".to_string()));

        let messages = controller.snapshot().await;
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].text.as_deref(), Some(INITIAL_GREETING));
        assert_eq!(messages[1].role, Role::User);
        assert!(messages[1].image_data.is_some());
        assert_eq!(messages[2].role, Role::Model);
        assert_eq!(messages[2].text.as_deref(), Some("와, 좋은 사진이야!"));
    }

    #[tokio::test]
    async fn alarm_text_is_persisted_like_any_user_turn() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(CannedProvider {
            reply: "잘 지내고 있어?".to_string(),
        });
        let controller = controller_with(provider, &dir);

        controller.submit_text(ALARM_PROMPT).await;

        let store = SessionStore::new(dir.path().join("session.json"));
        let persisted = store.load().unwrap();
        assert_eq!(persisted.len(), 3);
        assert_eq!(persisted[1].role, Role::User);
        assert_eq!(persisted[1].text.as_deref(), Some(ALARM_PROMPT));
        assert_eq!(persisted[2].text.as_deref(), Some("잘 지내고 있어?"));
    }

    #[tokio::test]
    async fn second_trigger_is_dropped_while_one_is_in_flight() {
        let dir = tempfile::tempdir().unwrap();
        let gate = Arc::new(Semaphore::new(0));
        let provider = Arc::new(GatedProvider { gate: gate.clone() });
        let controller = controller_with(provider, &dir);

        let first = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.submit_photo(sample_image()).await })
        };

        // Wait until the first exchange has appended its user turn and is
        // parked inside the provider
        while controller.snapshot().await.len() < 2 {
            tokio::task::yield_now().await;
        }

        let second = controller.submit_text(ALARM_PROMPT).await;
        assert_eq!(second, SubmitOutcome::Busy);
        assert_eq!(controller.snapshot().await.len(), 2);

        gate.add_permits(1);
        let first = first.await.unwrap();
        assert_eq!(first, SubmitOutcome::Replied("늦은 답장이야".to_string()));
        assert_eq!(controller.snapshot().await.len(), 3);
    }

    #[tokio::test]
    async fn busy_clears_after_an_exchange_completes() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(CannedProvider {
            reply: "답장".to_string(),
        });
        let controller = controller_with(provider, &dir);

        controller.submit_photo(sample_image()).await;
        let again = controller.submit_text(ALARM_PROMPT).await;
        assert_eq!(again, SubmitOutcome::Replied("답장".to_string()));
    }

    #[tokio::test]
    async fn reset_leaves_one_seed_in_memory_and_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(CannedProvider {
            reply: "답장".to_string(),
        });
        let controller = controller_with(provider, &dir);

        controller.submit_photo(sample_image()).await;
        controller.reset().await;

        let messages = controller.snapshot().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::Model);

        let store = SessionStore::new(dir.path().join("session.json"));
        assert_eq!(store.load().unwrap(), messages);
    }
}
