//! # Chimoney Client
//!
//! reqwest-backed `ProviderClient` for the Chimoney REST API.
//! One outbound call per request, no retries, body relayed as raw bytes.

use crate::config::{ChimoneyConfig, API_KEY_HEADER};
use async_trait::async_trait;
use relay_core::{
    HttpMethod, OutboundRequest, ProviderClient, ProviderResponse, RelayError, RelayResult,
};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use tracing::{debug, instrument, warn};

/// Chimoney provider client
pub struct ChimoneyClient {
    config: ChimoneyConfig,
    client: Client,
}

impl ChimoneyClient {
    /// Create a new client; a timeout is set only when one is configured
    pub fn new(config: ChimoneyConfig) -> RelayResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| RelayError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl ProviderClient for ChimoneyClient {
    #[instrument(skip(self, request), fields(operation = %request.operation))]
    async fn send(&self, request: OutboundRequest) -> RelayResult<ProviderResponse> {
        let url = self.config.endpoint(request.operation.path());

        let mut builder = match request.operation.method() {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };

        builder = builder
            .header(ACCEPT, "application/json")
            .header(API_KEY_HEADER, &self.config.api_key);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        // .json() also sets content-type: application/json
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!("Calling Chimoney: {} {}", request.operation.method().as_str(), url);

        let response = builder
            .send()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let body = response
            .bytes()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        let relayed = ProviderResponse {
            status,
            content_type,
            body: body.to_vec(),
        };

        if !relayed.is_success() {
            warn!("Chimoney returned status={} for {}", status, request.operation);
        }

        Ok(relayed)
    }

    fn provider_name(&self) -> &'static str {
        "chimoney"
    }
}
