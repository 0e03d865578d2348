use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where the farmer was when asking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    pub user_type: String,
    pub app: String,
}

impl Default for ChatContext {
    fn default() -> Self {
        Self { page: None, user_type: "farmer".to_string(), app: "agriscout".to_string() }
    }
}

/// Body posted to the assistant webhook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub context: ChatContext,
}

impl ChatRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            session_id: None,
            timestamp: Utc::now(),
            context: ChatContext::default(),
        }
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.context.page = Some(page.into());
        self
    }
}

/// Which responder produced a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    Webhook,
    Fallback,
    Apology,
}

/// Reply shown to the farmer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub text: String,
    pub source: ReplySource,
}
