// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain types and constants.

use std::{fmt, str::FromStr};

/// Number of lamports in one SOL.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Number of fractional digits carried by a lamport amount.
const SOL_DECIMALS: usize = 9;

/// Shortest base58 string that can encode a 32-byte key (all zero bytes).
pub const MIN_ADDRESS_LEN: usize = 32;

/// Solana mainnet-beta public RPC endpoint.
pub const MAINNET_BETA_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// Explorer cluster name for mainnet-beta.
pub const MAINNET_BETA_CLUSTER: &str = "mainnet-beta";

/// Solana block explorer base URL.
pub const EXPLORER_BASE_URL: &str = "https://explorer.solana.com";

/// System program id (all-zero key, `11111111111111111111111111111111`).
pub const SYSTEM_PROGRAM_ID: Pubkey = Pubkey([0u8; 32]);

/// Solana cluster configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterConfig {
    /// Explorer cluster name (`mainnet-beta`, `devnet`, `testnet`)
    pub name: String,
    /// JSON-RPC endpoint URL
    pub rpc_url: String,
}

impl ClusterConfig {
    pub fn new(name: impl Into<String>, rpc_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rpc_url: rpc_url.into(),
        }
    }

    /// Solana mainnet-beta over the public RPC endpoint.
    pub fn mainnet_beta() -> Self {
        Self::new(MAINNET_BETA_CLUSTER, MAINNET_BETA_RPC_URL)
    }

    /// Block explorer link for a transaction signature on this cluster.
    pub fn explorer_tx_url(&self, signature: &str) -> String {
        format!(
            "{EXPLORER_BASE_URL}/tx/{signature}?cluster={}",
            self.name
        )
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self::mainnet_beta()
    }
}

/// A 32-byte Solana account address.
///
/// Parsed from and displayed as base58.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pubkey(pub [u8; 32]);

impl Pubkey {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl FromStr for Pubkey {
    type Err = PubkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PubkeyError::Empty);
        }
        // 44 chars is the longest base58 encoding of 32 bytes
        if s.len() > 44 {
            return Err(PubkeyError::WrongLength(s.len()));
        }

        let decoded = bs58::decode(s)
            .into_vec()
            .map_err(|e| PubkeyError::InvalidBase58(e.to_string()))?;

        let bytes: [u8; 32] = decoded
            .as_slice()
            .try_into()
            .map_err(|_| PubkeyError::WrongSize(decoded.len()))?;

        Ok(Self(bytes))
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

/// Errors raised while parsing an account address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PubkeyError {
    #[error("address is empty")]
    Empty,

    #[error("address has invalid length {0}")]
    WrongLength(usize),

    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("address decodes to {0} bytes, expected 32")]
    WrongSize(usize),
}

/// Errors raised while converting a SOL amount to lamports.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount is required")]
    Missing,

    #[error("Amount must be a decimal number, got `{0}`")]
    Invalid(String),

    #[error("Amount must be greater than 0")]
    NotPositive,

    #[error("Amount is smaller than one lamport (0.000000001 SOL)")]
    BelowOneLamport,

    #[error("Amount exceeds the maximum representable lamport value")]
    Overflow,
}

/// Convert a decimal SOL amount to lamports using integer arithmetic.
///
/// Accepts `[+|-]digits[.digits]` (either side of the point may be empty,
/// not both). Digits beyond the ninth fractional place are rounded half-up.
pub fn sol_to_lamports(raw: &str) -> Result<u64, AmountError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Missing);
    }

    if let Some(magnitude) = trimmed.strip_prefix('-') {
        // Well-formed negatives (and -0) are reported as non-positive.
        parse_decimal(magnitude).map_err(|_| AmountError::Invalid(trimmed.to_string()))?;
        return Err(AmountError::NotPositive);
    }

    let magnitude = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let (lamports, any_nonzero) =
        parse_decimal(magnitude).map_err(|e| match e {
            AmountError::Overflow => AmountError::Overflow,
            _ => AmountError::Invalid(trimmed.to_string()),
        })?;

    match (lamports, any_nonzero) {
        (0, false) => Err(AmountError::NotPositive),
        (0, true) => Err(AmountError::BelowOneLamport),
        (value, _) => Ok(value),
    }
}

/// Parse an unsigned decimal into lamports, also reporting whether any digit
/// was non-zero.
fn parse_decimal(s: &str) -> Result<(u64, bool), AmountError> {
    let (whole, frac) = s.split_once('.').unwrap_or((s, ""));

    if whole.is_empty() && frac.is_empty() {
        return Err(AmountError::Invalid(s.to_string()));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmountError::Invalid(s.to_string()));
    }

    let any_nonzero = whole.bytes().chain(frac.bytes()).any(|b| b != b'0');

    let whole_value: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| AmountError::Overflow)?
    };

    let frac_bytes = frac.as_bytes();
    let mut frac_value: u64 = 0;
    for i in 0..SOL_DECIMALS {
        let digit = frac_bytes.get(i).map(|b| b - b'0').unwrap_or(0);
        frac_value = frac_value * 10 + u64::from(digit);
    }
    let round_up = frac_bytes
        .get(SOL_DECIMALS)
        .is_some_and(|b| *b >= b'5');

    let lamports = whole_value
        .checked_mul(LAMPORTS_PER_SOL)
        .and_then(|v| v.checked_add(frac_value))
        .and_then(|v| v.checked_add(u64::from(round_up)))
        .ok_or(AmountError::Overflow)?;

    Ok((lamports, any_nonzero))
}

/// Lamports expressed in SOL.
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}
