//! # Provider Client Trait
//!
//! The seam between the HTTP surface and the payment provider.
//! Handlers build an `OutboundRequest`, hand it to a `ProviderClient`,
//! and relay the `ProviderResponse` they get back.
//!
//! ```text
//! ┌──────────────┐   OutboundRequest   ┌──────────────────────┐
//! │ route handler│ ──────────────────▶ │ ProviderClient (dyn) │
//! │  (relay-api) │ ◀────────────────── │  ├── ChimoneyClient  │
//! └──────────────┘   ProviderResponse  │  └── test fakes      │
//!                                      └──────────────────────┘
//! ```

use crate::error::{RelayError, RelayResult};
use crate::request::RelayRequest;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// HTTP method used for an outbound call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// The provider operations the gateway relays to.
///
/// Each operation owns its method and path relative to the provider base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Multi-currency wallet (account) creation
    CreateUser,
    /// Interledger wallet address issuance
    IssuePaymentPointer,
    /// Payout to interledger wallet addresses
    InterledgerPayout,
    /// Payment verification
    VerifyPayment,
    /// Multi-currency wallet lookup
    GetWallet,
}

impl Operation {
    pub fn method(&self) -> HttpMethod {
        match self {
            Operation::GetWallet => HttpMethod::Get,
            _ => HttpMethod::Post,
        }
    }

    /// Path relative to the provider base URL
    pub fn path(&self) -> &'static str {
        match self {
            Operation::CreateUser => "/multicurrency-wallets/create",
            Operation::IssuePaymentPointer => "/accounts/issue-wallet-address",
            Operation::InterledgerPayout => "/payouts/interledger-wallet-address",
            Operation::VerifyPayment => "/payment/verify",
            Operation::GetWallet => "/multicurrency-wallets/get",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::CreateUser => "create_user",
            Operation::IssuePaymentPointer => "issue_payment_pointer",
            Operation::InterledgerPayout => "interledger_payout",
            Operation::VerifyPayment => "verify_payment",
            Operation::GetWallet => "get_wallet",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single call to be made against the provider
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub operation: Operation,
    /// JSON body (write-style operations)
    pub body: Option<serde_json::Value>,
    /// Query parameters (read-style operations)
    pub query: Vec<(String, String)>,
}

impl OutboundRequest {
    /// Build a JSON-bodied request for the given operation
    pub fn json<T: Serialize>(operation: Operation, payload: &T) -> RelayResult<Self> {
        Ok(Self {
            operation,
            body: Some(serde_json::to_value(payload)?),
            query: Vec::new(),
        })
    }

    /// Build a request from a typed relay request, applying its field mapping
    pub fn from_relay<R: RelayRequest>(request: R) -> RelayResult<Self> {
        Self::json(R::OPERATION, &request.into_payload())
    }

    /// Build a bodiless request with query parameters
    pub fn query(operation: Operation, params: Vec<(String, String)>) -> Self {
        Self {
            operation,
            body: None,
            query: params,
        }
    }
}

/// What the provider answered, kept byte-for-byte
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl ProviderResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON.
    ///
    /// Fails with `InvalidUpstreamJson` rather than a parse error so callers
    /// can tell a bad provider body apart from a transport failure.
    pub fn json(&self) -> RelayResult<serde_json::Value> {
        serde_json::from_slice(&self.body).map_err(|_| RelayError::InvalidUpstreamJson)
    }
}

/// Core trait for provider implementations.
///
/// One call in, one response out. Implementations never retry.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Issue exactly one outbound call.
    ///
    /// Any completed HTTP exchange is `Ok`, whatever its status.
    /// Only failures to complete the exchange are `Err(RelayError::Transport)`.
    async fn send(&self, request: OutboundRequest) -> RelayResult<ProviderResponse>;

    /// Provider name (for logging and health output)
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared provider client (dynamic dispatch)
pub type BoxedProviderClient = Arc<dyn ProviderClient>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::P2pTransferRequest;
    use serde_json::json;

    struct EchoProvider;

    #[async_trait]
    impl ProviderClient for EchoProvider {
        async fn send(&self, request: OutboundRequest) -> RelayResult<ProviderResponse> {
            let body = serde_json::to_vec(&request.body)?;
            Ok(ProviderResponse::new(201, body))
        }

        fn provider_name(&self) -> &'static str {
            "echo"
        }
    }

    #[test]
    fn test_operation_routing_table() {
        assert_eq!(Operation::CreateUser.path(), "/multicurrency-wallets/create");
        assert_eq!(Operation::GetWallet.path(), "/multicurrency-wallets/get");
        assert_eq!(Operation::GetWallet.method(), HttpMethod::Get);

        assert_eq!(Operation::IssuePaymentPointer.path(), "/accounts/issue-wallet-address");
        assert_eq!(Operation::InterledgerPayout.path(), "/payouts/interledger-wallet-address");
        assert_eq!(Operation::VerifyPayment.path(), "/payment/verify");

        for op in [
            Operation::CreateUser,
            Operation::IssuePaymentPointer,
            Operation::InterledgerPayout,
            Operation::VerifyPayment,
        ] {
            assert_eq!(op.method(), HttpMethod::Post, "{}", op);
        }
    }

    #[test]
    fn test_from_relay_uses_operation_and_defaults() {
        let request: P2pTransferRequest = serde_json::from_value(json!({})).unwrap();
        let outbound = OutboundRequest::from_relay(request).unwrap();

        assert_eq!(outbound.operation, Operation::InterledgerPayout);
        assert_eq!(
            outbound.body,
            Some(json!({"debitCurrency": "USD", "interledgerWallets": []}))
        );
        assert!(outbound.query.is_empty());
    }

    #[test]
    fn test_provider_response_json() {
        let ok = ProviderResponse::new(200, r#"{"status":"success"}"#);
        assert_eq!(ok.json().unwrap(), json!({"status": "success"}));

        let bad = ProviderResponse::new(200, "<html>bad gateway</html>");
        assert!(matches!(bad.json(), Err(RelayError::InvalidUpstreamJson)));
    }

    #[test]
    fn test_is_success() {
        assert!(ProviderResponse::new(204, "").is_success());
        assert!(!ProviderResponse::new(400, "{}").is_success());
        assert!(!ProviderResponse::new(500, "{}").is_success());
    }

    #[tokio::test]
    async fn test_dyn_dispatch() {
        let provider: BoxedProviderClient = Arc::new(EchoProvider);
        let request = OutboundRequest::json(Operation::VerifyPayment, &json!({"id": "p1"})).unwrap();

        let response = provider.send(request).await.unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(response.json().unwrap(), json!({"id": "p1"}));
        assert_eq!(provider.provider_name(), "echo");
    }
}
