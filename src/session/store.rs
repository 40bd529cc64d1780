use crate::config::Config;
use crate::core::error::StepError;
use crate::session::message::Message;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Write-through JSON store for a session's message sequence. One file per
/// session; the whole sequence is rewritten after every mutation.
#[derive(Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_path() -> PathBuf {
        Config::history_dir().join("session.json")
    }

    /// Loads the persisted sequence. Absent, unparseable, empty, or
    /// invariant-violating payloads all read as absent so the session
    /// re-seeds instead of replaying broken state. No schema versioning.
    pub fn load(&self) -> Option<Vec<Message>> {
        let contents = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<Vec<Message>>(&contents) {
            Ok(messages) if !messages.is_empty() && messages.iter().all(Message::is_valid) => {
                Some(messages)
            }
            Ok(_) => {
                debug!("discarding stored session: empty or invalid messages");
                None
            }
            Err(err) => {
                debug!("discarding stored session: {err}");
                None
            }
        }
    }

    pub fn save(&self, messages: &[Message]) -> Result<(), StepError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = fs::File::create(&self.path)?;
        serde_json::to_writer_pretty(file, messages)?;
        Ok(())
    }
}
