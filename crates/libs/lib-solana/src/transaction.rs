//! # Transfer Transactions
//!
//! Builds the placeholder system-program transfer the orchestrator submits,
//! and converts it to and from the base64 wire form.
//!
//! The transfer instruction is encoded by hand:
//!
//! ```text
//! program: 11111111111111111111111111111111 (system program)
//! accounts: [from (signer, writable), to (writable)]
//! data: u32 LE instruction index (2 = Transfer) ++ u64 LE lamports
//! ```

use lib_core::chain::TransferTransaction;
use lib_utils::b64::{b64_decode, b64_encode};
use solana_sdk::{
    hash::Hash,
    instruction::{AccountMeta, Instruction},
    message::Message,
    pubkey::Pubkey,
    signature::Keypair,
    transaction::Transaction,
};
use std::str::FromStr;
use thiserror::Error;

/// The system program: 32 zero bytes.
pub const SYSTEM_PROGRAM_ID: Pubkey = Pubkey::new_from_array([0u8; 32]);

/// System program `Transfer` instruction index.
const SYSTEM_TRANSFER_IX_INDEX: u32 = 2;

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("Invalid public key {0}")]
    InvalidPubkey(String),

    #[error("Invalid blockhash {0}")]
    InvalidBlockhash(String),

    #[error("Signing failed: {0}")]
    Sign(String),

    #[error("Failed to encode transaction: {0}")]
    Encode(String),

    #[error("Failed to decode transaction: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, TransactionError>;

/// System-program transfer of `lamports` from `from` to `to`.
pub fn transfer_instruction(from: &Pubkey, to: &Pubkey, lamports: u64) -> Instruction {
    let mut data = Vec::with_capacity(12);
    data.extend_from_slice(&SYSTEM_TRANSFER_IX_INDEX.to_le_bytes());
    data.extend_from_slice(&lamports.to_le_bytes());

    Instruction {
        program_id: SYSTEM_PROGRAM_ID,
        accounts: vec![AccountMeta::new(*from, true), AccountMeta::new(*to, false)],
        data,
    }
}

fn parse_pubkey(value: &str) -> Result<Pubkey> {
    Pubkey::from_str(value).map_err(|e| TransactionError::InvalidPubkey(format!("{}: {}", value, e)))
}

/// Unsigned transaction for `transfer`, with its blockhash already set.
pub fn build_transfer(transfer: &TransferTransaction) -> Result<Transaction> {
    let fee_payer = parse_pubkey(&transfer.fee_payer)?;
    let from = parse_pubkey(&transfer.from)?;
    let to = parse_pubkey(&transfer.to)?;
    let blockhash = Hash::from_str(&transfer.recent_blockhash)
        .map_err(|e| TransactionError::InvalidBlockhash(format!("{}: {}", transfer.recent_blockhash, e)))?;

    let instruction = transfer_instruction(&from, &to, transfer.lamports);
    let message = Message::new_with_blockhash(&[instruction], Some(&fee_payer), &blockhash);
    Ok(Transaction::new_unsigned(message))
}

/// Build and sign `transfer` with `keypair`.
pub fn sign_transfer(transfer: &TransferTransaction, keypair: &Keypair) -> Result<Transaction> {
    let mut transaction = build_transfer(transfer)?;
    let blockhash = transaction.message.recent_blockhash;
    transaction
        .try_sign(&[keypair], blockhash)
        .map_err(|e| TransactionError::Sign(e.to_string()))?;
    Ok(transaction)
}

/// bincode + base64, as accepted by `sendTransaction`.
pub fn encode_wire(transaction: &Transaction) -> Result<String> {
    let bytes = bincode::serialize(transaction).map_err(|e| TransactionError::Encode(e.to_string()))?;
    Ok(b64_encode(bytes))
}

pub fn decode_wire(wire: &str) -> Result<Transaction> {
    let bytes = b64_decode(wire).map_err(|e| TransactionError::Decode(e.to_string()))?;
    bincode::deserialize(&bytes).map_err(|e| TransactionError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signature::Signer;

    fn self_transfer(keypair: &Keypair, lamports: u64) -> TransferTransaction {
        let payer = keypair.pubkey().to_string();
        TransferTransaction::self_transfer(&payer, lamports, &Hash::new_from_array([7u8; 32]).to_string())
    }

    #[test]
    fn test_transfer_instruction_layout() {
        let from = Keypair::new().pubkey();
        let ix = transfer_instruction(&from, &from, 100);

        assert_eq!(ix.program_id.to_string(), "11111111111111111111111111111111");
        assert_eq!(ix.data.len(), 12);
        assert_eq!(&ix.data[..4], &[2, 0, 0, 0]);
        assert_eq!(&ix.data[4..], &100u64.to_le_bytes());
        assert!(ix.accounts[0].is_signer);
    }

    #[test]
    fn test_self_transfer_dedups_accounts() {
        let keypair = Keypair::new();
        let tx = build_transfer(&self_transfer(&keypair, 100)).unwrap();

        // payer + system program
        assert_eq!(tx.message.account_keys.len(), 2);
        assert_eq!(tx.message.account_keys[0], keypair.pubkey());
        assert_eq!(tx.message.header.num_required_signatures, 1);
    }

    #[test]
    fn test_signed_wire_roundtrip_verifies() {
        let keypair = Keypair::new();
        let signed = sign_transfer(&self_transfer(&keypair, 1000), &keypair).unwrap();

        let decoded = decode_wire(&encode_wire(&signed).unwrap()).unwrap();

        assert_eq!(decoded.signatures, signed.signatures);
        assert!(decoded.verify().is_ok());
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let keypair = Keypair::new();
        let mut transfer = self_transfer(&keypair, 100);
        transfer.recent_blockhash = "not-a-hash".to_string();
        assert!(matches!(build_transfer(&transfer), Err(TransactionError::InvalidBlockhash(_))));

        transfer.from = "0OIl".to_string();
        assert!(matches!(build_transfer(&transfer), Err(TransactionError::InvalidPubkey(_))));

        assert!(decode_wire("AAAA").is_err());
    }

    #[test]
    fn test_signing_with_wrong_key_fails() {
        let payer = Keypair::new();
        let other = Keypair::new();
        assert!(matches!(
            sign_transfer(&self_transfer(&payer, 100), &other),
            Err(TransactionError::Sign(_))
        ));
    }
}
