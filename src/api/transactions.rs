// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction endpoints: unsigned transfer construction and broadcast of
//! client-signed transactions.

use axum::{extract::State, Json};

use crate::{
    api::extract::{ApiJson, ApiQuery},
    blockchain::{lamports_to_sol, sol_to_lamports, Pubkey, TransferInstruction},
    error::{ApiError, ErrorBody},
    models::{BroadcastRequest, BroadcastResponse, SimulateTxQuery, SimulateTxResponse},
    state::AppState,
};

/// Build an unsigned SOL transfer.
///
/// The transaction is assembled locally and returned hex-encoded; the fee
/// payer signature slot and recent blockhash are left for the signing wallet
/// to fill in.
#[utoipa::path(
    get,
    path = "/simulate_tx",
    tag = "Transactions",
    params(SimulateTxQuery),
    responses(
        (status = 200, description = "Unsigned transaction created", body = SimulateTxResponse),
        (status = 400, description = "Invalid addresses or amount", body = ErrorBody)
    )
)]
pub async fn simulate_tx(
    ApiQuery(query): ApiQuery<SimulateTxQuery>,
) -> Result<Json<SimulateTxResponse>, ApiError> {
    let from = query.from_pubkey.as_deref().unwrap_or_default().trim();
    let to = query.to_pubkey.as_deref().unwrap_or_default().trim();
    if from.is_empty() || to.is_empty() {
        return Err(ApiError::invalid_input("Missing from_pubkey or to_pubkey"));
    }

    let lamports = sol_to_lamports(query.amount_sol.as_deref().unwrap_or_default())
        .map_err(|e| ApiError::invalid_input(e.to_string()))?;

    let from_key: Pubkey = from
        .parse()
        .map_err(|e| ApiError::invalid_input(format!("Invalid from_pubkey: {e}")))?;
    let to_key: Pubkey = to
        .parse()
        .map_err(|e| ApiError::invalid_input(format!("Invalid to_pubkey: {e}")))?;

    let unsigned_tx = TransferInstruction::new(from_key, to_key, lamports)
        .into_unsigned_transaction()
        .to_hex();

    tracing::debug!(%from_key, %to_key, lamports, "built unsigned transfer");

    Ok(Json(SimulateTxResponse {
        unsigned_tx,
        from: from.to_string(),
        to: to.to_string(),
        amount_sol: lamports_to_sol(lamports),
        lamports,
        message: "Unsigned transaction created successfully".to_string(),
    }))
}

/// Broadcast a client-signed transaction.
#[utoipa::path(
    post,
    path = "/broadcast_tx",
    tag = "Transactions",
    request_body = BroadcastRequest,
    responses(
        (status = 200, description = "Transaction submitted", body = BroadcastResponse),
        (status = 400, description = "Invalid hex or rejected by the node", body = ErrorBody)
    )
)]
pub async fn broadcast_tx(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<BroadcastRequest>,
) -> Result<Json<BroadcastResponse>, ApiError> {
    let raw = request.signed_transaction.trim();
    if raw.is_empty() {
        return Err(ApiError::invalid_input("Signed transaction is required"));
    }

    let tx_bytes = hex::decode(raw)
        .map_err(|e| ApiError::invalid_input(format!("Invalid transaction hex: {e}")))?;

    let signature = state
        .ledger
        .send_raw_transaction(&tx_bytes)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, bytes = tx_bytes.len(), "broadcast rejected");
            ApiError::upstream_rpc(format!("Failed to broadcast transaction: {e}"))
        })?;

    tracing::info!(%signature, cluster = %state.cluster.name, "transaction broadcast");

    Ok(Json(BroadcastResponse {
        explorer_url: state.cluster.explorer_tx_url(&signature),
        signature,
        message: "Transaction broadcasted successfully".to_string(),
    }))
}
