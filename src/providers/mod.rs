use crate::capture::CapturedImage;
use crate::session::message::Message;
use async_trait::async_trait;

pub mod base_client;
pub mod gemini;

/// A generation backend for the companion. `reply` always yields
/// user-facing text: provider failures are absorbed into canned fallbacks
/// inside the implementation and never surface to callers.
#[async_trait]
pub trait ReplyProvider: Send + Sync {
    async fn reply(
        &self,
        history: &[Message],
        new_text: Option<&str>,
        new_image: Option<&CapturedImage>,
    ) -> String;
}
