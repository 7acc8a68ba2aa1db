// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Mock collaborators and request helpers shared by handler tests.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::{
    blockchain::{ClusterConfig, LedgerRpc, Pubkey, SolanaClientError},
    completion::{CompletionError, CompletionModel, CompletionRequest, ResponseFormat},
    state::AppState,
};

pub const ALICE: &str = "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T";
pub const BOB: &str = "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM";

#[derive(Default)]
pub struct MockLedger {
    pub balance: u64,
    pub fail_with: Option<String>,
    pub signature: String,
    pub calls: AtomicUsize,
    pub submitted: Mutex<Option<Vec<u8>>>,
}

impl MockLedger {
    pub fn with_balance(balance: u64) -> Self {
        Self {
            balance,
            ..Self::default()
        }
    }

    pub fn with_signature(signature: &str) -> Self {
        Self {
            signature: signature.to_string(),
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), SolanaClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.fail_with {
            Some(message) => Err(SolanaClientError::Rpc {
                code: -32002,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl LedgerRpc for MockLedger {
    async fn get_balance(&self, _address: &Pubkey) -> Result<u64, SolanaClientError> {
        self.check()?;
        Ok(self.balance)
    }

    async fn send_raw_transaction(&self, tx_bytes: &[u8]) -> Result<String, SolanaClientError> {
        self.check()?;
        *self.submitted.lock().unwrap() = Some(tx_bytes.to_vec());
        Ok(self.signature.clone())
    }
}

#[derive(Default)]
pub struct MockModel {
    pub reply: String,
    pub fail_with: Option<String>,
    pub calls: AtomicUsize,
    pub last_request: Mutex<Option<(String, String, ResponseFormat)>>,
}

impl MockModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<(String, String, ResponseFormat)> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionModel for MockModel {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some((
            request.system.to_string(),
            request.user.to_string(),
            request.response_format,
        ));
        match &self.fail_with {
            Some(message) => Err(CompletionError::Transport(message.clone())),
            None => Ok(self.reply.clone()),
        }
    }
}

pub fn test_state(ledger: Arc<MockLedger>, model: Arc<MockModel>) -> AppState {
    AppState::new(ledger, model, ClusterConfig::mainnet_beta())
}

pub fn test_router(ledger: Arc<MockLedger>, model: Arc<MockModel>) -> Router {
    super::router(
        test_state(ledger, model),
        &["http://localhost:3000".to_string(), "https://*.vercel.app".to_string()],
    )
}

/// Send a request and return the status with the parsed JSON body.
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
