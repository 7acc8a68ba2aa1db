// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! ChainHelper Gateway - Solana + AI Assistant Service
//!
//! Stateless HTTP gateway in front of a Solana RPC node and a hosted
//! chat-completion model. Transactions are never signed here: transfers are
//! built unsigned for the client's wallet, and only client-signed bytes are
//! broadcast.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum), CORS policy, OpenAPI document
//! - `blockchain` - Solana RPC client and transaction wire format
//! - `completion` - Completion-model client and intent extraction
//! - `config` - Environment configuration
//! - `logging` - Tracing subscriber setup

pub mod api;
pub mod blockchain;
pub mod completion;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod state;
