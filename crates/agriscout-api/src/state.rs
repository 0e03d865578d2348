use agriscout_core::error::Result;
use agriscout_core::ports::Geocoder;
use agriscout_draw::DrawingSession;
use agriscout_geo::{NominatimGeocoder, GeodesicAreaEstimator};
use agriscout_llm::{ChatRelay, ChatResponder, LocalChatClient, WebhookChatClient};
use agriscout_store::MemoryFieldStore;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::ApiConfig;
use crate::services::insights::{InsightProvider, PlaceholderInsights};

/// Drawing session served by the API
pub type FieldSession = DrawingSession<MemoryFieldStore, GeodesicAreaEstimator>;

/// Webhook first, then the local chat endpoint
pub type AssistantRelay = ChatRelay<Box<dyn ChatResponder>, Box<dyn ChatResponder>>;

pub struct AppState {
    /// Single-writer session; every request locks it for its whole mutation
    pub session: RwLock<FieldSession>,
    pub geocoder: Arc<dyn Geocoder>,
    pub relay: AssistantRelay,
    pub insights: Arc<dyn InsightProvider>,
}

impl AppState {
    pub fn new(
        session: FieldSession,
        geocoder: Arc<dyn Geocoder>,
        relay: AssistantRelay,
        insights: Arc<dyn InsightProvider>,
    ) -> Self {
        Self { session: RwLock::new(session), geocoder, relay, insights }
    }

    /// Wire the production adapters from configuration
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let session = DrawingSession::new(MemoryFieldStore::new(), GeodesicAreaEstimator::new())
            .with_containment_mode(config.containment_mode);

        let geocoder = NominatimGeocoder::new(&config.geocoder_url, config.request_timeout)?;

        let primary: Box<dyn ChatResponder> =
            Box::new(WebhookChatClient::new(&config.webhook_url, config.request_timeout)?);
        let fallback: Box<dyn ChatResponder> =
            Box::new(LocalChatClient::new(&config.fallback_chat_url, config.request_timeout)?);

        Ok(Self::new(
            session,
            Arc::new(geocoder),
            ChatRelay::new(primary, fallback),
            Arc::new(PlaceholderInsights::new()),
        ))
    }
}
