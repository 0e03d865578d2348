use crate::models::{ChatReply, ChatRequest, ReplySource};
use crate::ports::ChatResponder;

/// Shown when neither responder answers
pub const APOLOGY_REPLY: &str =
    "क्षमा करें, मुझे तकनीकी समस्या हो रही है। थोड़ी देर में फिर कोशिश करें। 🙏";

/// Shown when the webhook answers with empty text
pub const NOT_UNDERSTOOD_REPLY: &str =
    "मुझे आपका सवाल समझने में समस्या हो रही है। कृपया फिर से पूछें।";

/// Shown when the fallback answers with empty text
pub const FALLBACK_EMPTY_REPLY: &str =
    "मुझे आपकी मदद करने में समस्या हो रही है। कृपया फिर से कोशिश करें।";

/// Relay trying the primary responder, then the fallback, then apologising.
///
/// The relay never fails; every failure is logged and degrades to the next
/// source.
pub struct ChatRelay<P, F>
where
    P: ChatResponder,
    F: ChatResponder,
{
    primary: P,
    fallback: F,
}

impl<P, F> ChatRelay<P, F>
where
    P: ChatResponder,
    F: ChatResponder,
{
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    /// Ask a question
    pub async fn ask(&self, request: &ChatRequest) -> ChatReply {
        match self.primary.respond(request).await {
            Ok(text) => {
                tracing::info!(responder = self.primary.name(), "Chat answered");
                return ChatReply {
                    text: non_empty_or(text, NOT_UNDERSTOOD_REPLY),
                    source: ReplySource::Webhook,
                };
            }
            Err(e) => {
                tracing::warn!(
                    responder = self.primary.name(),
                    error = %e,
                    "Primary chat responder failed, trying fallback"
                );
            }
        }

        match self.fallback.respond(request).await {
            Ok(text) => {
                tracing::info!(responder = self.fallback.name(), "Chat answered by fallback");
                ChatReply {
                    text: non_empty_or(text, FALLBACK_EMPTY_REPLY),
                    source: ReplySource::Fallback,
                }
            }
            Err(e) => {
                tracing::warn!(
                    responder = self.fallback.name(),
                    error = %e,
                    "Fallback chat responder failed"
                );
                ChatReply { text: APOLOGY_REPLY.to_string(), source: ReplySource::Apology }
            }
        }
    }
}

fn non_empty_or(text: String, default: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}
