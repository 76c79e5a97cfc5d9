//! # relay-core
//!
//! Core types and traits for the Chimoney relay gateway.
//!
//! This crate provides:
//! - `ProviderClient` trait for implementing provider transports
//! - `Operation`, `OutboundRequest` and `ProviderResponse` for the relay flow
//! - Typed request schemas with their outbound payload mappings
//! - `RelayError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use relay_core::{OutboundRequest, P2pTransferRequest};
//!
//! let request: P2pTransferRequest = serde_json::from_str("{}")?;
//! let outbound = OutboundRequest::from_relay(request)?;
//! // outbound.body == {"debitCurrency": "USD", "interledgerWallets": []}
//!
//! let response = provider.send(outbound).await?;
//! ```

pub mod error;
pub mod provider;
pub mod request;

// Re-exports for convenience
pub use error::{RelayError, RelayResult, MISSING_USER_ID};
pub use provider::{
    BoxedProviderClient, HttpMethod, Operation, OutboundRequest, ProviderClient, ProviderResponse,
};
pub use request::{
    CreateUserPayload, CreateUserRequest, IssuePaymentPointerPayload, IssuePaymentPointerRequest,
    P2pTransferPayload, P2pTransferRequest, RelayRequest, UserDetailsRequest,
    VerifyPaymentPayload, VerifyPaymentRequest, DEFAULT_DEBIT_CURRENCY, DEFAULT_ILP_USERNAME,
};
