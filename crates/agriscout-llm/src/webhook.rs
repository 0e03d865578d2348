use agriscout_core::error::{AgriError, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::extract::extract_reply;
use crate::models::ChatRequest;
use crate::ports::ChatResponder;

fn build_client(service: &str, timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AgriError::upstream(service, format!("Failed to build client: {}", e)))
}

/// POST `body` as JSON and parse the JSON answer
async fn post_json<B: Serialize + ?Sized>(
    client: &reqwest::Client,
    service: &str,
    url: &str,
    body: &B,
) -> Result<Value> {
    let response = client
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(|e| AgriError::upstream(service, format!("Request to {} failed: {}", url, e)))?;

    if !response.status().is_success() {
        return Err(AgriError::upstream(service, format!("HTTP {}", response.status())));
    }

    response
        .json()
        .await
        .map_err(|e| AgriError::upstream(service, format!("Invalid response body: {}", e)))
}

/// Remote assistant webhook
pub struct WebhookChatClient {
    /// Webhook URL (e.g., "https://n8n.example.com/webhook/agriscout")
    url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl WebhookChatClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self { url: url.into(), client: build_client("webhook", timeout)? })
    }
}

#[async_trait]
impl ChatResponder for WebhookChatClient {
    async fn respond(&self, request: &ChatRequest) -> Result<String> {
        let body = post_json(&self.client, "webhook", &self.url, request).await?;
        Ok(extract_reply(&body))
    }

    fn name(&self) -> &str {
        "webhook"
    }
}

/// Service type sent to the local endpoint
const LOCAL_SERVICE_TYPE: &str = "crop_analysis";

/// Body accepted by the local `/api/ai/chat` endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LocalChatBody<'a> {
    query: &'a str,
    service_type: &'a str,
}

/// Local `/api/ai/chat` endpoint used when the webhook is unavailable.
///
/// The reply is extracted from the `data` field of the answer; an answer
/// without `data` counts as a failure.
pub struct LocalChatClient {
    url: String,
    client: reqwest::Client,
}

impl LocalChatClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self { url: url.into(), client: build_client("fallback", timeout)? })
    }
}

#[async_trait]
impl ChatResponder for LocalChatClient {
    async fn respond(&self, request: &ChatRequest) -> Result<String> {
        let body = LocalChatBody { query: &request.query, service_type: LOCAL_SERVICE_TYPE };
        let answer = post_json(&self.client, "fallback", &self.url, &body).await?;

        match answer.get("data") {
            Some(data) if !data.is_null() => Ok(extract_reply(data)),
            _ => Err(AgriError::upstream("fallback", "Response has no data field")),
        }
    }

    fn name(&self) -> &str {
        "fallback"
    }
}
