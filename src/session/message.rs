use crate::capture::CapturedImage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One entry in a session's append-only message sequence. Messages are
/// immutable after construction; the constructors guarantee that a message
/// always carries text, an image, or both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub timestamp: DateTime<Utc>,
}

static NEXT_SEQ: AtomicU64 = AtomicU64::new(0);

// Millisecond timestamp plus a process-local counter, so ids created in the
// same millisecond stay unique.
fn next_id() -> String {
    let seq = NEXT_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", Utc::now().timestamp_millis(), seq)
}

impl Message {
    fn new(role: Role, text: Option<String>, image: Option<CapturedImage>) -> Self {
        let (image_data, mime_type) = match image {
            Some(image) => (Some(image.data), Some(image.mime_type)),
            None => (None, None),
        };
        Self {
            id: next_id(),
            role,
            text,
            image_data,
            mime_type,
            timestamp: Utc::now(),
        }
    }

    /// A photo the user captured, with no caption.
    pub fn user_photo(image: CapturedImage) -> Self {
        Self::new(Role::User, None, Some(image))
    }

    /// A text contribution on the user side (the alarm control text; the
    /// user themselves can only answer with photos).
    pub fn user_text(text: impl Into<String>) -> Self {
        Self::new(Role::User, Some(text.into()), None)
    }

    /// A reply from the model, including fallback replies.
    pub fn model_reply(text: impl Into<String>) -> Self {
        Self::new(Role::Model, Some(text.into()), None)
    }

    /// Reassembles the captured image this message carries, if any.
    pub fn image(&self) -> Option<CapturedImage> {
        match (&self.image_data, &self.mime_type) {
            (Some(data), Some(mime_type)) => Some(CapturedImage {
                data: data.clone(),
                mime_type: mime_type.clone(),
            }),
            _ => None,
        }
    }

    /// Contract check: at least one of text/image, and an image always has
    /// a mime type. Constructors uphold this; the store re-checks loaded
    /// payloads and the encoder fails fast on violations.
    pub fn is_valid(&self) -> bool {
        let has_text = self.text.as_deref().is_some_and(|t| !t.is_empty());
        let has_image = self.image_data.is_some();
        (has_text || has_image) && (!has_image || self.mime_type.is_some())
    }
}
