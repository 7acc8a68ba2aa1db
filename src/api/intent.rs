// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Natural-language transfer intent parsing.

use axum::{extract::State, Json};

use crate::{
    api::extract::ApiJson,
    completion::{intent::INTENT_INSTRUCTION, parse_intent, CompletionRequest},
    error::{ApiError, ErrorBody},
    models::{TransactionIntentRequest, TransactionIntentResponse},
    state::AppState,
};

/// Turn a message like "send 0.5 SOL to ..." into a validated transfer intent.
///
/// The intent is only a draft; the client still builds, signs and broadcasts
/// the transaction through the other endpoints.
#[utoipa::path(
    post,
    path = "/parse_transaction_intent",
    tag = "Assistant",
    request_body = TransactionIntentRequest,
    responses(
        (status = 200, description = "Intent extracted", body = TransactionIntentResponse),
        (status = 400, description = "Empty input, unrecognised intent, or missing recipient/amount", body = ErrorBody),
        (status = 500, description = "Model failed or returned malformed JSON", body = ErrorBody)
    )
)]
pub async fn parse_transaction_intent(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TransactionIntentRequest>,
) -> Result<Json<TransactionIntentResponse>, ApiError> {
    if request.user_message.trim().is_empty() {
        return Err(ApiError::invalid_input("User message cannot be empty"));
    }
    if request.wallet_address.trim().is_empty() {
        return Err(ApiError::invalid_input("Wallet address is required"));
    }

    let reply = state
        .model
        .complete(CompletionRequest::json(INTENT_INSTRUCTION, &request.user_message))
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "intent completion failed");
            ApiError::upstream_model(format!("Failed to parse intent: {e}"))
        })?;

    let intent = parse_intent(&reply).inspect_err(|e| {
        tracing::debug!(error = %e, "model reply rejected");
    })?;

    Ok(Json(TransactionIntentResponse {
        message: intent.confirmation_message(),
        intent,
        from_address: request.wallet_address,
    }))
}
