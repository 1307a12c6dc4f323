//! # Solana RPC Client
//!
//! Wrapper around the nonblocking Solana RPC client that implements
//! [`NetworkClient`] for native callers of the swap orchestrator.
//!
//! ## Features
//!
//! - **Blockhashes**: latest blockhash as base58
//! - **Submission**: decode a base64 wire transaction and send it (no implicit confirmation)
//! - **Confirmation**: poll signature statuses until the requested commitment is reached
//! - **Balances**: native lamport balance for an address
//!
//! ## Confirmation Policy
//!
//! The client polls `getSignatureStatuses` every `poll_interval` up to
//! `max_polls` times. That bound is the only timeout applied to a submitted
//! transaction; the orchestrator adds none of its own.
//!
//! ## Example
//!
//! ```rust,no_run
//! use lib_core::chain::{Commitment, NetworkClient};
//! use lib_solana::client::SolanaClient;
//!
//! # async fn example() -> Result<(), lib_core::error::NetworkError> {
//! let client = SolanaClient::builder()
//!     .rpc_url("https://api.devnet.solana.com")
//!     .build();
//!
//! let blockhash = client.latest_blockhash().await?;
//! println!("Latest blockhash: {}", blockhash);
//! # Ok(())
//! # }
//! ```

use crate::transaction::decode_wire;
use async_trait::async_trait;
use lib_core::chain::{Commitment, ConfirmationStatus, NetworkClient};
use lib_core::config::Config;
use lib_core::error::NetworkError;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_commitment_config::CommitmentConfig;
use solana_sdk::{hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Map the core commitment level onto the RPC one.
pub fn commitment_config(commitment: Commitment) -> CommitmentConfig {
    match commitment {
        Commitment::Processed => CommitmentConfig::processed(),
        Commitment::Confirmed => CommitmentConfig::confirmed(),
        Commitment::Finalized => CommitmentConfig::finalized(),
    }
}

/// High-level Solana RPC client wrapper.
///
/// The connection is lazy: nothing is requested until a method is called.
pub struct SolanaClient {
    rpc: Arc<RpcClient>,
    poll_interval: Duration,
    max_polls: u32,
}

/// Builder for configuring [`SolanaClient`].
#[derive(Debug, Clone)]
pub struct SolanaClientBuilder {
    rpc_url: String,
    commitment: Commitment,
    poll_interval: Duration,
    max_polls: u32,
}

impl Default for SolanaClientBuilder {
    fn default() -> Self {
        let config = Config::default();
        Self {
            rpc_url: config.rpc_url,
            commitment: config.commitment,
            poll_interval: Duration::from_millis(u64::from(config.confirm_poll_ms)),
            max_polls: config.confirm_max_polls,
        }
    }
}

impl SolanaClientBuilder {
    /// Set the RPC endpoint.
    pub fn rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = url.into();
        self
    }

    /// Default commitment for reads (blockhash, balance).
    pub fn commitment(mut self, commitment: Commitment) -> Self {
        self.commitment = commitment;
        self
    }

    /// Delay between signature status checks.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Status checks before giving up on a signature.
    pub fn max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = max_polls;
        self
    }

    pub fn build(self) -> SolanaClient {
        info!("🔗 Connecting to Solana RPC: {}", self.rpc_url);

        SolanaClient {
            rpc: Arc::new(RpcClient::new_with_commitment(
                self.rpc_url,
                commitment_config(self.commitment),
            )),
            poll_interval: self.poll_interval,
            max_polls: self.max_polls.max(1),
        }
    }
}

impl SolanaClient {
    pub fn builder() -> SolanaClientBuilder {
        SolanaClientBuilder::default()
    }

    /// Client for the transaction endpoint and polling policy in `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::builder()
            .rpc_url(config.rpc_url.clone())
            .commitment(config.commitment)
            .poll_interval(Duration::from_millis(u64::from(config.confirm_poll_ms)))
            .max_polls(config.confirm_max_polls)
            .build()
    }

    /// Client for the balance endpoint in `config`.
    pub fn balance_client(config: &Config) -> Self {
        Self::builder()
            .rpc_url(config.balance_rpc_url.clone())
            .commitment(config.commitment)
            .build()
    }

    pub fn rpc_url(&self) -> String {
        self.rpc.url()
    }

    /// Get the latest blockhash from the blockchain.
    ///
    /// Blockhashes expire after ~60 seconds, so fetch one right before
    /// building the transaction.
    pub async fn get_latest_blockhash(&self) -> anyhow::Result<Hash> {
        self.rpc
            .get_latest_blockhash()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to get latest blockhash: {}", e))
    }

    /// Submit a signed transaction without waiting for confirmation.
    pub async fn send_signed(&self, transaction: &Transaction) -> anyhow::Result<Signature> {
        self.rpc
            .send_transaction(transaction)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send transaction: {}", e))
    }

    /// Native balance in lamports.
    pub async fn get_lamports(&self, pubkey: &Pubkey) -> anyhow::Result<u64> {
        self.rpc
            .get_balance(pubkey)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to get balance: {}", e))
    }

    /// One status check. `None` while the signature has not reached `commitment`.
    async fn poll_status(&self, signature: &Signature, commitment: Commitment) -> anyhow::Result<Option<ConfirmationStatus>> {
        let response = self
            .rpc
            .get_signature_statuses(&[*signature])
            .await
            .map_err(|e| anyhow::anyhow!("Failed to get signature status: {}", e))?;

        let status = match response.value.into_iter().next().flatten() {
            Some(status) => status,
            None => return Ok(None),
        };

        if let Some(err) = status.err {
            return Ok(Some(ConfirmationStatus::Failed {
                slot: status.slot,
                reason: err.to_string(),
            }));
        }

        if status.satisfies_commitment(commitment_config(commitment)) {
            Ok(Some(ConfirmationStatus::Confirmed { slot: status.slot }))
        } else {
            Ok(None)
        }
    }
}

fn rpc_error(err: anyhow::Error) -> NetworkError {
    NetworkError::Rpc(format!("{:#}", err))
}

#[async_trait(?Send)]
impl NetworkClient for SolanaClient {
    async fn latest_blockhash(&self) -> Result<String, NetworkError> {
        let blockhash = self.get_latest_blockhash().await.map_err(rpc_error)?;
        Ok(blockhash.to_string())
    }

    async fn send_transaction(&self, wire_base64: &str) -> Result<String, NetworkError> {
        let transaction =
            decode_wire(wire_base64).map_err(|e| NetworkError::InvalidResponse(e.to_string()))?;
        let signature = self.send_signed(&transaction).await.map_err(rpc_error)?;
        debug!(%signature, "Transaction sent");
        Ok(signature.to_string())
    }

    async fn confirm_transaction(&self, signature: &str, commitment: Commitment) -> Result<ConfirmationStatus, NetworkError> {
        let parsed = Signature::from_str(signature)
            .map_err(|e| NetworkError::InvalidResponse(format!("Invalid signature {}: {}", signature, e)))?;

        for attempt in 1..=self.max_polls {
            if let Some(status) = self.poll_status(&parsed, commitment).await.map_err(rpc_error)? {
                debug!(%signature, attempt, ?status, "Signature settled");
                return Ok(status);
            }
            tokio::time::sleep(self.poll_interval).await;
        }

        Err(NetworkError::ConfirmationTimeout {
            signature: signature.to_string(),
            attempts: self.max_polls,
        })
    }

    async fn get_balance(&self, address: &str) -> Result<u64, NetworkError> {
        let pubkey = Pubkey::from_str(address)
            .map_err(|e| NetworkError::InvalidResponse(format!("Invalid address {}: {}", address, e)))?;
        self.get_lamports(&pubkey).await.map_err(rpc_error)
    }
}
