// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Hosted language-model integration.
//!
//! The gateway only needs a single capability from the model provider:
//! complete a system instruction plus user text, optionally constrained to a
//! JSON object. [`CompletionModel`] is that seam; [`OpenAiClient`] is the
//! production implementation.

use async_trait::async_trait;

pub mod intent;
pub mod openai;

pub use intent::{parse_intent, Confidence, IntentAction, IntentError, ParsedIntent};
pub use openai::OpenAiClient;

/// System instruction for the free-form assistant endpoint.
pub const ASSISTANT_INSTRUCTION: &str = "You are a helpful Solana blockchain assistant. \
Provide clear, concise answers about Solana transactions, wallets, and blockchain concepts.";

/// Output format requested from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Text,
    /// Model must reply with a single JSON object.
    JsonObject,
}

/// A single-turn completion request.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub system: &'a str,
    pub user: &'a str,
    pub response_format: ResponseFormat,
}

impl<'a> CompletionRequest<'a> {
    pub fn text(system: &'a str, user: &'a str) -> Self {
        Self {
            system,
            user,
            response_format: ResponseFormat::Text,
        }
    }

    pub fn json(system: &'a str, user: &'a str) -> Self {
        Self {
            system,
            user,
            response_format: ResponseFormat::JsonObject,
        }
    }
}

/// Chat-completion capability.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, CompletionError>;
}

/// Errors returned by a completion provider.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("Invalid model endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Model request failed: {0}")]
    Transport(String),

    #[error("Model API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Model returned an unusable response: {0}")]
    InvalidResponse(String),
}
