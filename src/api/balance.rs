// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain balance query endpoint.

use axum::{extract::State, Json};

use crate::{
    api::extract::ApiPath,
    blockchain::{lamports_to_sol, Pubkey, MIN_ADDRESS_LEN},
    error::{ApiError, ErrorBody},
    models::BalanceResponse,
    state::AppState,
};

/// Get the native SOL balance of an address.
#[utoipa::path(
    get,
    path = "/balance/{address}",
    tag = "Wallet",
    params(
        ("address" = String, Path, description = "Base58 Solana address")
    ),
    responses(
        (status = 200, description = "Balance retrieved successfully", body = BalanceResponse),
        (status = 400, description = "Invalid address or RPC failure", body = ErrorBody)
    )
)]
pub async fn get_balance(
    State(state): State<AppState>,
    ApiPath(address): ApiPath<String>,
) -> Result<Json<BalanceResponse>, ApiError> {
    // Cheap length gate before touching the node
    if address.chars().count() < MIN_ADDRESS_LEN {
        return Err(ApiError::invalid_input("Invalid Solana address"));
    }

    let pubkey: Pubkey = address
        .parse()
        .map_err(|e| ApiError::invalid_input(format!("Invalid Solana address: {e}")))?;

    let lamports = state.ledger.get_balance(&pubkey).await.map_err(|e| {
        tracing::warn!(%address, error = %e, "balance lookup failed");
        ApiError::upstream_rpc(format!("Failed to fetch balance: {e}"))
    })?;

    Ok(Json(BalanceResponse {
        address,
        lamports,
        sol: lamports_to_sol(lamports),
    }))
}

/// `/balance` and `/balance/` with no address segment.
pub async fn missing_address() -> ApiError {
    ApiError::invalid_input("Invalid Solana address")
}
