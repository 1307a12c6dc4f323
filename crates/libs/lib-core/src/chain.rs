//! # Chain Collaborators
//!
//! Contracts for the two external collaborators the orchestrator drives:
//!
//! - [`WalletAdapter`]: the user's wallet provider (browser extension or a
//!   local keypair). Owns connection state and signing.
//! - [`NetworkClient`]: a Solana RPC endpoint. Blockhashes, submission,
//!   confirmation and balances.
//!
//! Both traits are `?Send`: in the browser everything runs on one event loop
//! and the implementations hold `JsValue`s.
//!
//! The only transaction the core ever builds is a [`TransferTransaction`]: a
//! system-program transfer of a nominal lamport amount from the payer to
//! itself. It stands in for a real swap/mint instruction.

use crate::error::{NetworkError, WalletError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Confirmation depth awaited for a signature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        }
    }

    /// Whether a status reported by the node satisfies this commitment.
    ///
    /// `finalized` satisfies everything, `confirmed` satisfies `confirmed`
    /// and `processed`.
    pub fn is_satisfied_by(&self, reported: Commitment) -> bool {
        reported.rank() >= self.rank()
    }

    fn rank(&self) -> u8 {
        match self {
            Commitment::Processed => 0,
            Commitment::Confirmed => 1,
            Commitment::Finalized => 2,
        }
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Commitment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "processed" => Ok(Commitment::Processed),
            "confirmed" => Ok(Commitment::Confirmed),
            "finalized" => Ok(Commitment::Finalized),
            other => Err(format!("unknown commitment level '{}'", other)),
        }
    }
}

/// Unsigned self-transfer handed to the wallet for signing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferTransaction {
    pub fee_payer: String,
    pub from: String,
    pub to: String,
    pub lamports: u64,
    pub recent_blockhash: String,
}

impl TransferTransaction {
    /// Placeholder instruction: `payer` sends `lamports` to itself and pays the fee.
    pub fn self_transfer(payer: &str, lamports: u64, recent_blockhash: &str) -> Self {
        Self {
            fee_payer: payer.to_string(),
            from: payer.to_string(),
            to: payer.to_string(),
            lamports,
            recent_blockhash: recent_blockhash.to_string(),
        }
    }
}

/// What a wallet hands back after signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignedTransaction {
    /// Signed wire transaction (base64) that still has to be sent to the network.
    Wire(String),
    /// The wallet broadcast the transaction itself; this is its signature.
    Submitted(String),
}

/// Final status of a signature once the node reports it at the requested depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationStatus {
    Confirmed { slot: u64 },
    /// Landed but the runtime rejected it.
    Failed { slot: u64, reason: String },
}

/// Wallet provider contract.
#[async_trait(?Send)]
pub trait WalletAdapter {
    /// Base58 address of the connected account.
    fn public_address(&self) -> Option<String>;

    fn is_connected(&self) -> bool;

    /// Ask the provider to connect; resolves to the connected address.
    async fn connect(&self) -> Result<String, WalletError>;

    async fn disconnect(&self) -> Result<(), WalletError>;

    /// Sign `transaction`. The user may reject, which surfaces as a [`WalletError`].
    async fn sign_transaction(&self, transaction: &TransferTransaction) -> Result<SignedTransaction, WalletError>;
}

/// Solana RPC contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait(?Send)]
pub trait NetworkClient {
    /// Latest blockhash as a base58 string.
    async fn latest_blockhash(&self) -> Result<String, NetworkError>;

    /// Submit a signed wire transaction; resolves to its signature.
    async fn send_transaction(&self, wire_base64: &str) -> Result<String, NetworkError>;

    /// Wait until `signature` reaches `commitment`. The client's own polling
    /// policy bounds the wait.
    async fn confirm_transaction(&self, signature: &str, commitment: Commitment) -> Result<ConfirmationStatus, NetworkError>;

    /// Native balance in lamports.
    async fn get_balance(&self, address: &str) -> Result<u64, NetworkError>;
}

/// Sign with the wallet and forward to the network, yielding the signature.
pub async fn submit_via_wallet<W, N>(
    wallet: &W,
    network: &N,
    transaction: &TransferTransaction,
) -> crate::error::Result<String>
where
    W: WalletAdapter + ?Sized,
    N: NetworkClient + ?Sized,
{
    match wallet.sign_transaction(transaction).await? {
        SignedTransaction::Wire(wire) => Ok(network.send_transaction(&wire).await?),
        SignedTransaction::Submitted(signature) => Ok(signature),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commitment_ordering() {
        assert!(Commitment::Confirmed.is_satisfied_by(Commitment::Finalized));
        assert!(Commitment::Confirmed.is_satisfied_by(Commitment::Confirmed));
        assert!(!Commitment::Confirmed.is_satisfied_by(Commitment::Processed));
        assert!(!Commitment::Finalized.is_satisfied_by(Commitment::Confirmed));
    }

    #[test]
    fn test_commitment_parse() {
        assert_eq!("Confirmed".parse::<Commitment>(), Ok(Commitment::Confirmed));
        assert!("recent".parse::<Commitment>().is_err());
    }

    #[test]
    fn test_self_transfer_shape() {
        let tx = TransferTransaction::self_transfer("Payer111", 100, "Hash111");
        assert_eq!(tx.from, tx.to);
        assert_eq!(tx.fee_payer, "Payer111");
        assert_eq!(tx.lamports, 100);
        assert_eq!(tx.recent_blockhash, "Hash111");
    }
}
