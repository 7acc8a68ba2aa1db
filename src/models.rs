// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies for every route. Requests derive
//! `Deserialize`, responses derive `Serialize`, and all of them derive
//! `ToSchema` for the OpenAPI document.
//!
//! Required string fields default to empty so that a missing key is reported
//! by the handler's own validation with a `{"error": ...}` body.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::completion::ParsedIntent;

// =============================================================================
// Health
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `healthy`
    pub status: String,
    /// Service name
    pub service: String,
    /// Crate version
    pub version: String,
}

// =============================================================================
// Balance
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BalanceResponse {
    /// Queried address, echoed as given
    pub address: String,
    /// Balance in lamports
    pub lamports: u64,
    /// Balance in SOL
    pub sol: f64,
}

// =============================================================================
// AI Assistant
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AiRequest {
    /// Question for the assistant
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AiResponse {
    /// Assistant reply
    pub response: String,
}

// =============================================================================
// Transactions
// =============================================================================

/// Query parameters for `/simulate_tx`.
///
/// All fields are optional strings; presence and numeric checks happen in the
/// handler so their order is fixed.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SimulateTxQuery {
    /// Sender (fee payer) address
    pub from_pubkey: Option<String>,
    /// Recipient address
    pub to_pubkey: Option<String>,
    /// Amount in SOL, decimal notation
    #[param(value_type = f64, example = 0.5)]
    pub amount_sol: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SimulateTxResponse {
    /// Hex-encoded unsigned transaction
    pub unsigned_tx: String,
    pub from: String,
    pub to: String,
    /// Amount in SOL, as encoded in the transaction
    pub amount_sol: f64,
    /// Amount in lamports
    pub lamports: u64,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct BroadcastRequest {
    /// Hex-encoded signed transaction
    #[serde(default)]
    pub signed_transaction: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BroadcastResponse {
    /// Transaction signature (base58)
    pub signature: String,
    pub message: String,
    /// Block explorer URL
    pub explorer_url: String,
}

// =============================================================================
// Intent Parsing
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct TransactionIntentRequest {
    /// Free-text instruction, e.g. "Send 0.5 SOL to ..."
    #[serde(default)]
    pub user_message: String,
    /// Connected wallet address (sender)
    #[serde(default)]
    pub wallet_address: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TransactionIntentResponse {
    pub intent: ParsedIntent,
    pub from_address: String,
    /// Human-readable confirmation
    pub message: String,
}
