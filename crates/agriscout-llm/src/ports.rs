//! Chat port definitions

use agriscout_core::error::Result;
use async_trait::async_trait;

use crate::models::ChatRequest;

/// Port for answering a farmer's question
#[async_trait]
pub trait ChatResponder: Send + Sync {
    /// Produce reply text for a request
    async fn respond(&self, request: &ChatRequest) -> Result<String>;

    /// Name used in logs
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: ChatResponder + ?Sized> ChatResponder for Box<T> {
    async fn respond(&self, request: &ChatRequest) -> Result<String> {
        (**self).respond(request).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
