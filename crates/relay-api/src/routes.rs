//! # Routes
//!
//! Axum router configuration for the relay gateway.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  / - Welcome message
/// - GET  /health - Health check
///
/// - Relays (one provider call each):
///   - POST /create-user
///   - POST /issue-payment-pointer
///   - POST /p2p-transfer
///   - POST /verify-payment
///   - GET  /get-user-details
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let relay_routes = Router::new()
        .route("/create-user", post(handlers::create_user))
        .route("/issue-payment-pointer", post(handlers::issue_payment_pointer))
        .route("/p2p-transfer", post(handlers::p2p_transfer))
        .route("/verify-payment", post(handlers::verify_payment))
        .route("/get-user-details", get(handlers::get_user_details));

    Router::new()
        .route("/", get(handlers::welcome))
        .route("/health", get(handlers::health))
        .merge(relay_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
