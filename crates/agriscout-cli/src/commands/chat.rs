//! Chat command implementation

use crate::cli::ChatArgs;
use crate::config_loader::{load_config_with_overrides, request_timeout};
use crate::output::OutputWriter;
use crate::output_types::ChatOutput;
use agriscout_core::config::CliConfigOverrides;
use agriscout_llm::{ChatRelay, ChatRequest, LocalChatClient, ReplySource, WebhookChatClient};
use anyhow::{bail, Result};
use std::path::Path;

pub async fn execute(
    args: ChatArgs,
    config_path: Option<&Path>,
    output: &OutputWriter,
) -> Result<()> {
    let question = args.message.trim();
    if question.is_empty() {
        bail!("Message is empty");
    }

    let overrides = CliConfigOverrides {
        webhook_url: args.webhook_url,
        fallback_chat_url: args.fallback_chat_url,
        ..Default::default()
    };
    let config = load_config_with_overrides(config_path, overrides)?;
    let timeout = request_timeout(&config);

    let relay = ChatRelay::new(
        WebhookChatClient::new(&config.webhook_url.value, timeout)?,
        LocalChatClient::new(&config.fallback_chat_url.value, timeout)?,
    );

    let mut request = ChatRequest::new(question).with_page("cli");
    if let Some(session) = args.session {
        request = request.with_session(session);
    }

    let reply = relay.ask(&request).await;
    tracing::debug!(source = ?reply.source, "Chat reply received");

    if output.is_json() {
        return output.result(ChatOutput { reply: reply.text, source: reply.source });
    }

    println!("{}", reply.text);
    match reply.source {
        ReplySource::Webhook => {}
        ReplySource::Fallback => output.warning("Answered by the local fallback"),
        ReplySource::Apology => output.warning("No assistant endpoint answered"),
    }

    Ok(())
}
