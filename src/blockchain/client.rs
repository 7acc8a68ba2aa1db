// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Solana JSON-RPC client for blockchain interactions.

use async_trait::async_trait;
use base64ct::{Base64, Encoding};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};

use super::types::{ClusterConfig, Pubkey};

/// Commitment level used for balance reads and preflight simulation.
const DEFAULT_COMMITMENT: &str = "finalized";

/// Ledger operations the gateway needs from a Solana node.
#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// Balance of `address` in lamports.
    async fn get_balance(&self, address: &Pubkey) -> Result<u64, SolanaClientError>;

    /// Submit an already-signed wire transaction; returns its signature.
    async fn send_raw_transaction(&self, tx_bytes: &[u8]) -> Result<String, SolanaClientError>;
}

/// Solana JSON-RPC client.
#[derive(Debug, Clone)]
pub struct SolanaClient {
    /// Parsed RPC endpoint
    rpc_url: url::Url,
    /// HTTP client (connection pool shared across requests)
    http: reqwest::Client,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// `getBalance` result envelope.
#[derive(Deserialize)]
struct ContextValue<T> {
    value: T,
}

impl SolanaClient {
    /// Create a new client for the specified cluster.
    pub fn new(cluster: &ClusterConfig) -> Result<Self, SolanaClientError> {
        let rpc_url: url::Url = cluster
            .rpc_url
            .parse()
            .map_err(|e: url::ParseError| SolanaClientError::InvalidRpcUrl(e.to_string()))?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| SolanaClientError::Transport(e.to_string()))?;

        Ok(Self {
            rpc_url,
            http,
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, SolanaClientError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };

        let response = self
            .http
            .post(self.rpc_url.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| SolanaClientError::Transport(e.to_string()))?;

        let status = response.status();
        let body: RpcResponse<T> = response.json().await.map_err(|e| {
            SolanaClientError::InvalidResponse(format!("{method} (HTTP {status}): {e}"))
        })?;

        if let Some(err) = body.error {
            tracing::debug!(method, code = err.code, "RPC call rejected");
            return Err(SolanaClientError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        body.result.ok_or_else(|| {
            SolanaClientError::InvalidResponse(format!("{method}: response has no result"))
        })
    }
}

#[async_trait]
impl LedgerRpc for SolanaClient {
    async fn get_balance(&self, address: &Pubkey) -> Result<u64, SolanaClientError> {
        let result: ContextValue<u64> = self
            .call(
                "getBalance",
                json!([address.to_string(), { "commitment": DEFAULT_COMMITMENT }]),
            )
            .await?;
        Ok(result.value)
    }

    async fn send_raw_transaction(&self, tx_bytes: &[u8]) -> Result<String, SolanaClientError> {
        let encoded = Base64::encode_string(tx_bytes);
        self.call(
            "sendTransaction",
            json!([
                encoded,
                {
                    "encoding": "base64",
                    "skipPreflight": false,
                    "preflightCommitment": DEFAULT_COMMITMENT,
                }
            ]),
        )
        .await
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, thiserror::Error)]
pub enum SolanaClientError {
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("RPC transport error: {0}")]
    Transport(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Invalid RPC response: {0}")]
    InvalidResponse(String),
}
