//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the provider client and server configuration.
//!
//! Configuration is layered: an optional `config/gateway.toml` supplies
//! defaults and the environment (after `.env`) overrides them. The provider
//! API key is accepted from the environment only.

use relay_chimoney::{ChimoneyClient, ChimoneyConfig};
use relay_core::BoxedProviderClient;
use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Build through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                anyhow::anyhow!("PORT must be a number between 0 and 65535, got {:?}", raw)
            })?,
            None => 8080,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Provider the relay routes forward to
    pub provider: BoxedProviderClient,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState backed by the Chimoney client
    pub fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let file = load_gateway_file()?;
        let lookup = layered_lookup(file.defaults());

        let config = AppConfig::from_lookup(&lookup)?;
        let chimoney = ChimoneyConfig::from_lookup(&lookup)
            .map_err(|e| anyhow::anyhow!("Failed to initialize Chimoney: {}", e))?;

        tracing::info!(
            "Chimoney base URL: {} (sandbox={}, timeout={:?})",
            chimoney.api_base_url,
            chimoney.is_sandbox(),
            chimoney.timeout
        );

        let client = ChimoneyClient::new(chimoney)
            .map_err(|e| anyhow::anyhow!("Failed to initialize Chimoney: {}", e))?;

        Ok(Self::with_provider(config, Arc::new(client)))
    }

    /// Create with an explicit provider (tests, alternative transports)
    pub fn with_provider(config: AppConfig, provider: BoxedProviderClient) -> Self {
        Self { provider, config }
    }
}

// =============================================================================
// Gateway file
// =============================================================================

/// Optional TOML defaults, `config/gateway.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayFile {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub provider: ProviderSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub environment: Option<String>,
}

/// No `api_key` here: a key in the file is a parse error.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderSection {
    pub base_url: Option<String>,
    pub sandbox: Option<bool>,
    pub timeout_secs: Option<u64>,
}

impl GatewayFile {
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Flatten into defaults keyed by the environment variable they stand in for
    pub fn defaults(&self) -> HashMap<&'static str, String> {
        let mut defaults = HashMap::new();

        if let Some(host) = &self.server.host {
            defaults.insert("HOST", host.clone());
        }
        if let Some(port) = self.server.port {
            defaults.insert("PORT", port.to_string());
        }
        if let Some(environment) = &self.server.environment {
            defaults.insert("ENVIRONMENT", environment.clone());
        }
        if let Some(base_url) = &self.provider.base_url {
            defaults.insert("CHIMONEY_BASE_URL", base_url.clone());
        }
        if let Some(sandbox) = self.provider.sandbox {
            defaults.insert("CHIMONEY_SANDBOX", sandbox.to_string());
        }
        if let Some(timeout) = self.provider.timeout_secs {
            defaults.insert("CHIMONEY_TIMEOUT_SECS", timeout.to_string());
        }

        defaults
    }
}

/// Environment first, file defaults second
pub fn layered_lookup(
    defaults: HashMap<&'static str, String>,
) -> impl Fn(&str) -> Option<String> {
    move |key| std::env::var(key).ok().or_else(|| defaults.get(key).cloned())
}

/// Load gateway defaults from config file
fn load_gateway_file() -> anyhow::Result<GatewayFile> {
    let config_paths = [
        "config/gateway.toml",
        "../config/gateway.toml",
        "../../config/gateway.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let file = GatewayFile::parse(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded gateway defaults from {}", path);
            return Ok(file);
        }
    }

    tracing::debug!("No gateway file found, using environment only");
    Ok(GatewayFile::default())
}
