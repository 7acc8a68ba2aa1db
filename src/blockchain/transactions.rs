// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Unsigned transfer construction for Solana.
//!
//! Transactions are built in the legacy wire format:
//!
//! ```text
//! shortvec<signature>  (64 bytes each)
//! message:
//!   header             [num_required_signatures, num_readonly_signed, num_readonly_unsigned]
//!   shortvec<pubkey>   (32 bytes each)
//!   recent_blockhash   (32 bytes)
//!   shortvec<instruction>
//!     program_id_index u8
//!     shortvec<u8>     account indices
//!     shortvec<u8>     instruction data
//! ```
//!
//! Nothing here is signed. The fee payer's signature slot is zero-filled and
//! the recent blockhash is left zeroed; the wallet that signs the transaction
//! is expected to replace both.

use super::types::{Pubkey, SYSTEM_PROGRAM_ID};

/// Length of an ed25519 signature.
pub const SIGNATURE_LEN: usize = 64;

/// Length of a blockhash.
pub const HASH_LEN: usize = 32;

/// System program instruction discriminant for `Transfer`.
const SYSTEM_TRANSFER_TAG: u32 = 2;

/// A compiled instruction referencing accounts by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledInstruction {
    pub program_id_index: u8,
    pub accounts: Vec<u8>,
    pub data: Vec<u8>,
}

/// Message header describing signer / writable layout of `account_keys`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    pub num_required_signatures: u8,
    pub num_readonly_signed_accounts: u8,
    pub num_readonly_unsigned_accounts: u8,
}

/// Legacy transaction message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: MessageHeader,
    pub account_keys: Vec<Pubkey>,
    pub recent_blockhash: [u8; HASH_LEN],
    pub instructions: Vec<CompiledInstruction>,
}

/// Legacy transaction: signatures followed by the message they cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub signatures: Vec<[u8; SIGNATURE_LEN]>,
    pub message: Message,
}

/// Decoded system-program transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferInstruction {
    pub from: Pubkey,
    pub to: Pubkey,
    pub lamports: u64,
}

impl TransferInstruction {
    pub fn new(from: Pubkey, to: Pubkey, lamports: u64) -> Self {
        Self { from, to, lamports }
    }

    /// Build an unsigned transaction containing only this transfer, with
    /// `from` as fee payer.
    pub fn into_unsigned_transaction(self) -> Transaction {
        let mut data = Vec::with_capacity(12);
        data.extend_from_slice(&SYSTEM_TRANSFER_TAG.to_le_bytes());
        data.extend_from_slice(&self.lamports.to_le_bytes());

        // Account keys must be unique, so a self-transfer references slot 0 twice.
        let (account_keys, accounts) = if self.from == self.to {
            (vec![self.from, SYSTEM_PROGRAM_ID], vec![0, 0])
        } else {
            (vec![self.from, self.to, SYSTEM_PROGRAM_ID], vec![0, 1])
        };
        let program_id_index = (account_keys.len() - 1) as u8;

        let message = Message {
            header: MessageHeader {
                num_required_signatures: 1,
                num_readonly_signed_accounts: 0,
                num_readonly_unsigned_accounts: 1,
            },
            account_keys,
            recent_blockhash: [0u8; HASH_LEN],
            instructions: vec![CompiledInstruction {
                program_id_index,
                accounts,
                data,
            }],
        };

        Transaction {
            signatures: vec![[0u8; SIGNATURE_LEN]],
            message,
        }
    }

    /// Extract the first system transfer from a transaction.
    pub fn from_transaction(tx: &Transaction) -> Result<Self, TransactionError> {
        let keys = &tx.message.account_keys;
        let key_at = |index: u8| {
            keys.get(usize::from(index))
                .copied()
                .ok_or(TransactionError::AccountIndexOutOfRange(index))
        };

        for ix in &tx.message.instructions {
            if key_at(ix.program_id_index)? != SYSTEM_PROGRAM_ID {
                continue;
            }
            if ix.data.len() != 12 || ix.data[..4] != SYSTEM_TRANSFER_TAG.to_le_bytes() {
                continue;
            }
            let [from_index, to_index] = ix.accounts[..] else {
                return Err(TransactionError::Malformed(
                    "transfer must reference exactly two accounts".to_string(),
                ));
            };
            let mut amount = [0u8; 8];
            amount.copy_from_slice(&ix.data[4..12]);

            return Ok(Self {
                from: key_at(from_index)?,
                to: key_at(to_index)?,
                lamports: u64::from_le_bytes(amount),
            });
        }

        Err(TransactionError::NoTransfer)
    }
}

impl Transaction {
    /// Serialize to the wire format.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        encode_len(&mut out, self.signatures.len());
        for sig in &self.signatures {
            out.extend_from_slice(sig);
        }
        self.message.serialize_into(&mut out);
        out
    }

    /// Parse a transaction from its wire format.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = Reader::new(bytes);

        let sig_count = reader.read_len()?;
        let mut signatures = Vec::with_capacity(sig_count);
        for _ in 0..sig_count {
            signatures.push(reader.read_array::<SIGNATURE_LEN>()?);
        }

        let header = MessageHeader {
            num_required_signatures: reader.read_u8()?,
            num_readonly_signed_accounts: reader.read_u8()?,
            num_readonly_unsigned_accounts: reader.read_u8()?,
        };

        let key_count = reader.read_len()?;
        let mut account_keys = Vec::with_capacity(key_count);
        for _ in 0..key_count {
            account_keys.push(Pubkey::new(reader.read_array::<32>()?));
        }

        let recent_blockhash = reader.read_array::<HASH_LEN>()?;

        let ix_count = reader.read_len()?;
        let mut instructions = Vec::with_capacity(ix_count);
        for _ in 0..ix_count {
            let program_id_index = reader.read_u8()?;
            let accounts_len = reader.read_len()?;
            let accounts = reader.read_bytes(accounts_len)?.to_vec();
            let data_len = reader.read_len()?;
            let data = reader.read_bytes(data_len)?.to_vec();
            instructions.push(CompiledInstruction {
                program_id_index,
                accounts,
                data,
            });
        }

        if !reader.is_empty() {
            return Err(TransactionError::TrailingBytes(reader.remaining()));
        }

        Ok(Self {
            signatures,
            message: Message {
                header,
                account_keys,
                recent_blockhash,
                instructions,
            },
        })
    }

    /// Hex encoding of the serialized transaction.
    pub fn to_hex(&self) -> String {
        hex::encode(self.serialize())
    }
}

impl Message {
    fn serialize_into(&self, out: &mut Vec<u8>) {
        out.push(self.header.num_required_signatures);
        out.push(self.header.num_readonly_signed_accounts);
        out.push(self.header.num_readonly_unsigned_accounts);

        encode_len(out, self.account_keys.len());
        for key in &self.account_keys {
            out.extend_from_slice(key.as_bytes());
        }

        out.extend_from_slice(&self.recent_blockhash);

        encode_len(out, self.instructions.len());
        for ix in &self.instructions {
            out.push(ix.program_id_index);
            encode_len(out, ix.accounts.len());
            out.extend_from_slice(&ix.accounts);
            encode_len(out, ix.data.len());
            out.extend_from_slice(&ix.data);
        }
    }
}

/// Append a compact-u16 ("shortvec") length prefix.
fn encode_len(out: &mut Vec<u8>, len: usize) {
    let mut rem = len as u16;
    loop {
        let mut byte = (rem & 0x7f) as u8;
        rem >>= 7;
        if rem == 0 {
            out.push(byte);
            break;
        }
        byte |= 0x80;
        out.push(byte);
    }
}

/// Cursor over a byte slice used by [`Transaction::deserialize`].
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn read_u8(&mut self) -> Result<u8, TransactionError> {
        let byte = *self
            .bytes
            .get(self.pos)
            .ok_or(TransactionError::UnexpectedEof)?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], TransactionError> {
        if self.remaining() < len {
            return Err(TransactionError::UnexpectedEof);
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], TransactionError> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.read_bytes(N)?);
        Ok(array)
    }

    /// Decode a compact-u16 length (at most three bytes).
    fn read_len(&mut self) -> Result<usize, TransactionError> {
        let mut value: usize = 0;
        for i in 0..3 {
            let byte = self.read_u8()?;
            value |= usize::from(byte & 0x7f) << (7 * i);
            if byte & 0x80 == 0 {
                if value > usize::from(u16::MAX) {
                    return Err(TransactionError::InvalidLength);
                }
                return Ok(value);
            }
        }
        Err(TransactionError::InvalidLength)
    }
}

/// Errors raised while decoding a transaction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionError {
    #[error("unexpected end of transaction bytes")]
    UnexpectedEof,

    #[error("invalid compact-u16 length prefix")]
    InvalidLength,

    #[error("{0} trailing bytes after transaction")]
    TrailingBytes(usize),

    #[error("account index {0} out of range")]
    AccountIndexOutOfRange(u8),

    #[error("transaction contains no system transfer")]
    NoTransfer,

    #[error("malformed transaction: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> Pubkey {
        Pubkey::new([byte; 32])
    }

    #[test]
    fn transfer_round_trips_through_hex() {
        let transfer = TransferInstruction::new(key(7), key(9), 500_000_000);
        let encoded = transfer.into_unsigned_transaction().to_hex();

        let bytes = hex::decode(&encoded).expect("valid hex");
        let decoded = Transaction::deserialize(&bytes).expect("decodes");
        assert_eq!(
            TransferInstruction::from_transaction(&decoded).expect("transfer"),
            transfer
        );
    }

    #[test]
    fn unsigned_transfer_layout() {
        let tx = TransferInstruction::new(key(1), key(2), 42).into_unsigned_transaction();
        let bytes = tx.serialize();

        // 1 + 64 signature, 3 header, 1 + 96 keys, 32 blockhash,
        // 1 + (1 + 1 + 2 + 1 + 12) instruction
        assert_eq!(bytes.len(), 1 + 64 + 3 + 1 + 96 + 32 + 1 + 17);
        assert_eq!(bytes[0], 1);
        assert!(bytes[1..65].iter().all(|b| *b == 0));
        assert_eq!(&bytes[65..68], &[1, 0, 1]);
        assert_eq!(bytes[68], 3);

        let data_start = bytes.len() - 12;
        assert_eq!(&bytes[data_start..data_start + 4], &[2, 0, 0, 0]);
        assert_eq!(&bytes[data_start + 4..], &42u64.to_le_bytes());
    }

    #[test]
    fn shortvec_encodes_multi_byte_lengths() {
        let mut out = Vec::new();
        encode_len(&mut out, 0x7f);
        encode_len(&mut out, 0x80);
        encode_len(&mut out, 0x3fff);
        encode_len(&mut out, 0x4000);
        assert_eq!(out, vec![0x7f, 0x80, 0x01, 0xff, 0x7f, 0x80, 0x80, 0x01]);

        let mut reader = Reader::new(&out);
        assert_eq!(reader.read_len().unwrap(), 0x7f);
        assert_eq!(reader.read_len().unwrap(), 0x80);
        assert_eq!(reader.read_len().unwrap(), 0x3fff);
        assert_eq!(reader.read_len().unwrap(), 0x4000);
        assert!(reader.is_empty());
    }

    #[test]
    fn deserialize_rejects_truncated_and_padded_input() {
        let bytes = TransferInstruction::new(key(3), key(4), 1)
            .into_unsigned_transaction()
            .serialize();

        assert_eq!(
            Transaction::deserialize(&bytes[..bytes.len() - 1]),
            Err(TransactionError::UnexpectedEof)
        );

        let mut padded = bytes.clone();
        padded.push(0);
        assert_eq!(
            Transaction::deserialize(&padded),
            Err(TransactionError::TrailingBytes(1))
        );
    }

    #[test]
    fn self_transfer_deduplicates_account_keys() {
        let transfer = TransferInstruction::new(key(8), key(8), 5);
        let tx = transfer.into_unsigned_transaction();
        assert_eq!(tx.message.account_keys, vec![key(8), SYSTEM_PROGRAM_ID]);

        let decoded = Transaction::deserialize(&tx.serialize()).expect("decodes");
        assert_eq!(
            TransferInstruction::from_transaction(&decoded).expect("transfer"),
            transfer
        );
    }

    #[test]
    fn from_transaction_requires_a_transfer() {
        let mut tx = TransferInstruction::new(key(5), key(6), 10).into_unsigned_transaction();
        tx.message.instructions[0].data = vec![0, 0, 0, 0];
        assert_eq!(
            TransferInstruction::from_transaction(&tx),
            Err(TransactionError::NoTransfer)
        );
    }
}
