//! # Request Schemas and Outbound Payloads
//!
//! Typed shapes for what callers send and what the provider receives.
//!
//! Field values are opaque to the gateway: whatever JSON the caller sends
//! for a mapped field is forwarded unchanged. Defaults are applied only when
//! a field is absent. An explicit `null` or an empty value is forwarded as given.

use crate::error::{RelayError, RelayResult};
use crate::provider::{Operation, OutboundRequest};
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder username used when issuing a payment pointer without one
pub const DEFAULT_ILP_USERNAME: &str = "default.user";

/// Currency debited by a payout when the caller does not name one
pub const DEFAULT_DEBIT_CURRENCY: &str = "USD";

/// A write-style request that maps onto exactly one provider operation.
pub trait RelayRequest: DeserializeOwned + Send {
    /// Provider operation this request is forwarded to
    const OPERATION: Operation;

    /// Body the provider expects
    type Payload: Serialize;

    /// Apply the fixed field mapping and defaults
    fn into_payload(self) -> Self::Payload;

    /// Read the request out of a JSON object body
    fn from_object(object: Map<String, Value>) -> RelayResult<Self> {
        serde_json::from_value(Value::Object(object))
            .map_err(|e| RelayError::InvalidRequest(e.to_string()))
    }
}

/// Keeps an explicit `null` as `Some(Value::Null)`; only an absent field is `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

// =============================================================================
// create-user
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub email: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub phone_number: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    pub name: Value,
    pub email: Value,
    pub phone_number: Value,
}

impl RelayRequest for CreateUserRequest {
    const OPERATION: Operation = Operation::CreateUser;
    type Payload = CreateUserPayload;

    fn into_payload(self) -> CreateUserPayload {
        CreateUserPayload {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone_number: self.phone_number.unwrap_or_default(),
        }
    }
}

// =============================================================================
// issue-payment-pointer
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssuePaymentPointerRequest {
    #[serde(default, rename = "userID", deserialize_with = "present")]
    pub user_id: Option<Value>,
    #[serde(default, rename = "ilpUsername", deserialize_with = "present")]
    pub ilp_username: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssuePaymentPointerPayload {
    #[serde(rename = "userID")]
    pub user_id: Value,
    #[serde(rename = "ilpUsername")]
    pub ilp_username: Value,
}

impl RelayRequest for IssuePaymentPointerRequest {
    const OPERATION: Operation = Operation::IssuePaymentPointer;
    type Payload = IssuePaymentPointerPayload;

    fn into_payload(self) -> IssuePaymentPointerPayload {
        IssuePaymentPointerPayload {
            user_id: self.user_id.unwrap_or_default(),
            ilp_username: self
                .ilp_username
                .unwrap_or_else(|| Value::from(DEFAULT_ILP_USERNAME)),
        }
    }
}

// =============================================================================
// p2p-transfer
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct P2pTransferRequest {
    #[serde(default, deserialize_with = "present")]
    pub debit_currency: Option<Value>,
    /// Wallet entries are opaque to the gateway and forwarded as-is
    #[serde(default, deserialize_with = "present")]
    pub interledger_wallets: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct P2pTransferPayload {
    pub debit_currency: Value,
    pub interledger_wallets: Value,
}

impl RelayRequest for P2pTransferRequest {
    const OPERATION: Operation = Operation::InterledgerPayout;
    type Payload = P2pTransferPayload;

    fn into_payload(self) -> P2pTransferPayload {
        P2pTransferPayload {
            debit_currency: self
                .debit_currency
                .unwrap_or_else(|| Value::from(DEFAULT_DEBIT_CURRENCY)),
            interledger_wallets: self
                .interledger_wallets
                .unwrap_or_else(|| Value::Array(Vec::new())),
        }
    }
}

// =============================================================================
// verify-payment
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyPaymentRequest {
    #[serde(default, deserialize_with = "present")]
    pub id: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifyPaymentPayload {
    pub id: Value,
}

impl RelayRequest for VerifyPaymentRequest {
    const OPERATION: Operation = Operation::VerifyPayment;
    type Payload = VerifyPaymentPayload;

    fn into_payload(self) -> VerifyPaymentPayload {
        VerifyPaymentPayload {
            id: self.id.unwrap_or_default(),
        }
    }
}

// =============================================================================
// get-user-details (read-style)
// =============================================================================

/// Lookup request. The id may arrive as a query parameter or in a JSON body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserDetailsRequest {
    #[serde(default)]
    pub id: Option<Value>,
}

impl UserDetailsRequest {
    /// Resolve the request from a query-string id (preferred) and a raw body.
    ///
    /// A body that is empty or not a JSON object simply yields no id.
    pub fn from_parts(query_id: Option<String>, body: &[u8]) -> Self {
        if let Some(id) = query_id.filter(|id| !id.is_empty()) {
            return Self {
                id: Some(Value::String(id)),
            };
        }

        if body.is_empty() {
            return Self::default();
        }

        serde_json::from_slice(body).unwrap_or_default()
    }

    /// The identifier as it will be sent upstream, if one was given.
    ///
    /// Strings and numbers are accepted; `null`, `""` and anything else is missing.
    pub fn user_id(&self) -> Option<String> {
        match &self.id {
            Some(Value::String(id)) if !id.is_empty() => Some(id.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Validate and turn into the wallet lookup call
    pub fn into_outbound(self) -> RelayResult<OutboundRequest> {
        let id = self.user_id().ok_or_else(RelayError::missing_user_id)?;
        Ok(OutboundRequest::query(
            Operation::GetWallet,
            vec![("id".to_string(), id)],
        ))
    }
}
