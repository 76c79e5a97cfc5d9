//! In-memory provider for handler and router tests.

use crate::state::{AppConfig, AppState};
use async_trait::async_trait;
use relay_core::{
    BoxedProviderClient, OutboundRequest, ProviderClient, ProviderResponse, RelayError,
    RelayResult,
};
use std::sync::{Arc, Mutex};

enum Reply {
    Respond(ProviderResponse),
    Fail(String),
}

/// Answers every call the same way and remembers what it was sent
pub(crate) struct RecordingProvider {
    reply: Reply,
    calls: Mutex<Vec<OutboundRequest>>,
}

impl RecordingProvider {
    pub(crate) fn responding(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Respond(ProviderResponse::new(status, body)),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Fail(message.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn calls(&self) -> Vec<OutboundRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProviderClient for RecordingProvider {
    async fn send(&self, request: OutboundRequest) -> RelayResult<ProviderResponse> {
        self.calls.lock().unwrap().push(request);
        match &self.reply {
            Reply::Respond(response) => Ok(response.clone()),
            Reply::Fail(message) => Err(RelayError::Transport(message.clone())),
        }
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}

pub(crate) fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
    }
}

pub(crate) fn test_state(provider: &Arc<RecordingProvider>) -> AppState {
    AppState::with_provider(test_config(), provider.clone() as BoxedProviderClient)
}
