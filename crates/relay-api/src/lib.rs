//! # relay-api
//!
//! HTTP API layer for the Chimoney relay gateway.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - One relay endpoint per provider operation
//! - Layered configuration (environment over `config/gateway.toml`)
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Welcome message |
//! | GET | `/health` | Health check |
//! | POST | `/create-user` | Create a multi-currency wallet |
//! | POST | `/issue-payment-pointer` | Issue an interledger wallet address |
//! | POST | `/p2p-transfer` | Pay out to interledger wallets |
//! | POST | `/verify-payment` | Verify a payment |
//! | GET | `/get-user-details` | Look up a wallet by `id` |

pub mod handlers;
pub mod routes;
pub mod state;

#[cfg(test)]
mod testing;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
