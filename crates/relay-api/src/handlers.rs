//! # Request Handlers
//!
//! Axum request handlers for the relay gateway.
//! Every relay route builds one outbound request, sends it, and hands the
//! provider's status and body back to the caller untouched.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use relay_core::{
    CreateUserRequest, IssuePaymentPointerRequest, OutboundRequest, P2pTransferRequest,
    ProviderResponse, RelayError, RelayRequest, UserDetailsRequest, VerifyPaymentRequest,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

pub const WELCOME_MESSAGE: &str = "Welcome to the Chimoney Flask API!";

// =============================================================================
// Request/Response Types
// =============================================================================

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Query string of the lookup route
#[derive(Debug, Default, Deserialize)]
pub struct UserDetailsParams {
    #[serde(default)]
    pub id: Option<String>,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);
pub type ApiResult<T> = Result<T, ApiError>;

fn relay_error_to_response(err: RelayError) -> ApiError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(err.to_string())))
}

/// Write routes accept any JSON object body
pub type ObjectBody = Result<Json<Map<String, Value>>, JsonRejection>;

/// Invalid JSON and non-object bodies are a 400
fn rejection_to_response(rejection: JsonRejection) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(rejection.body_text())),
    )
}

/// Relay the provider's answer: same status, same bytes
fn passthrough(response: ProviderResponse) -> Response {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let content_type = response
        .content_type
        .as_deref()
        .and_then(|ct| HeaderValue::from_str(ct).ok())
        .unwrap_or_else(|| HeaderValue::from_static("application/json"));

    (status, [(CONTENT_TYPE, content_type)], response.body).into_response()
}

/// Send one outbound request inside a correlation span
async fn forward(state: &AppState, outbound: OutboundRequest) -> ApiResult<ProviderResponse> {
    let request_id = Uuid::new_v4();
    let operation = outbound.operation;
    let span = info_span!("relay", %request_id, %operation);

    async move {
        info!("Forwarding to {}", state.provider.provider_name());

        let response = state.provider.send(outbound).await.map_err(|e| {
            error!("Outbound call failed: {}", e);
            relay_error_to_response(e)
        })?;

        info!("Provider answered status={}", response.status);
        Ok::<_, ApiError>(response)
    }
    .instrument(span)
    .await
}

/// Shared body of the write-style routes
async fn relay<R: RelayRequest>(state: &AppState, payload: ObjectBody) -> ApiResult<Response> {
    let Json(object) = payload.map_err(|rejection| {
        warn!("Rejected {} request: {}", R::OPERATION, rejection.body_text());
        rejection_to_response(rejection)
    })?;

    let request = R::from_object(object).map_err(relay_error_to_response)?;
    let outbound = OutboundRequest::from_relay(request).map_err(relay_error_to_response)?;
    let response = forward(state, outbound).await?;

    Ok(passthrough(response))
}

// =============================================================================
// Handlers
// =============================================================================

/// Welcome message at the root
pub async fn welcome() -> impl IntoResponse {
    Json(serde_json::json!({ "message": WELCOME_MESSAGE }))
}

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "chimoney-relay",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": state.provider.provider_name(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Create a multi-currency wallet account
pub async fn create_user(
    State(state): State<AppState>,
    payload: ObjectBody,
) -> ApiResult<Response> {
    relay::<CreateUserRequest>(&state, payload).await
}

/// Issue an interledger wallet address (payment pointer)
pub async fn issue_payment_pointer(
    State(state): State<AppState>,
    payload: ObjectBody,
) -> ApiResult<Response> {
    relay::<IssuePaymentPointerRequest>(&state, payload).await
}

/// Pay out to interledger wallet addresses
pub async fn p2p_transfer(
    State(state): State<AppState>,
    payload: ObjectBody,
) -> ApiResult<Response> {
    relay::<P2pTransferRequest>(&state, payload).await
}

/// Verify a payment by id
pub async fn verify_payment(
    State(state): State<AppState>,
    payload: ObjectBody,
) -> ApiResult<Response> {
    relay::<VerifyPaymentRequest>(&state, payload).await
}

/// Look up a wallet.
///
/// The id comes from `?id=` or, failing that, an `id` field in a JSON body.
/// A missing id short-circuits with 400 before anything is sent upstream.
pub async fn get_user_details(
    State(state): State<AppState>,
    params: Result<Query<UserDetailsParams>, QueryRejection>,
    body: Bytes,
) -> ApiResult<Response> {
    let query_id = params.ok().and_then(|Query(params)| params.id);

    let outbound = UserDetailsRequest::from_parts(query_id, &body)
        .into_outbound()
        .map_err(|e| {
            warn!("Rejected wallet lookup: {}", e);
            relay_error_to_response(e)
        })?;

    let mut response = forward(&state, outbound).await?;

    if let Err(e) = response.json() {
        error!(
            "Wallet lookup returned a non-JSON body (status={})",
            response.status
        );
        return Err(relay_error_to_response(e));
    }

    response.content_type = Some("application/json".to_string());
    Ok(passthrough(response))
}
