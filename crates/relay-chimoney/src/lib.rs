//! # relay-chimoney
//!
//! Chimoney provider client for the relay gateway.
//!
//! Every outbound call carries the configured API key in `X-API-KEY` and
//! targets a fixed path under one base URL (production by default, sandbox
//! on request). Responses come back as raw bytes with their status so the
//! API layer can relay them unchanged.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use relay_chimoney::{ChimoneyClient, ChimoneyConfig};
//! use relay_core::{OutboundRequest, ProviderClient, VerifyPaymentRequest};
//!
//! let client = ChimoneyClient::new(ChimoneyConfig::from_env()?)?;
//!
//! let request: VerifyPaymentRequest = serde_json::from_str(r#"{"id":"pay_1"}"#)?;
//! let response = client.send(OutboundRequest::from_relay(request)?).await?;
//! ```

pub mod client;
pub mod config;

// Re-exports
pub use client::ChimoneyClient;
pub use config::{ChimoneyConfig, API_KEY_HEADER, PRODUCTION_BASE_URL, SANDBOX_BASE_URL};
