// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain integration module for Solana.
//!
//! This module provides functionality for:
//! - Querying native SOL balances
//! - Building unsigned system-program transfers
//! - Broadcasting client-signed transactions

pub mod client;
pub mod transactions;
pub mod types;

pub use client::{LedgerRpc, SolanaClient, SolanaClientError};
pub use transactions::{Transaction, TransactionError, TransferInstruction};
pub use types::*;
