//! Solana JSON-RPC client over `gloo-net`.
//!
//! Implements [`NetworkClient`] for the browser with the envelopes in
//! [`shared::dto::rpc`]. Confirmation polls `getSignatureStatuses` on a
//! `gloo-timers` delay; `confirm_poll_ms` x `confirm_max_polls` bounds the wait.

use crate::services::wallet::is_base58_pubkey;
use async_trait::async_trait;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use lib_core::chain::{Commitment, ConfirmationStatus, NetworkClient};
use lib_core::config::Config;
use lib_core::error::NetworkError;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use shared::dto::rpc::{LatestBlockhash, RpcContextValue, RpcRequest, RpcResponse, SignatureStatus};
use std::cell::Cell;

pub struct JsonRpcClient {
    url: String,
    commitment: Commitment,
    poll_interval_ms: u32,
    max_polls: u32,
    next_id: Cell<u64>,
}

impl JsonRpcClient {
    pub fn new(url: impl Into<String>, commitment: Commitment) -> Self {
        let defaults = Config::default();
        Self {
            url: url.into(),
            commitment,
            poll_interval_ms: defaults.confirm_poll_ms,
            max_polls: defaults.confirm_max_polls,
            next_id: Cell::new(1),
        }
    }

    /// Client for the transaction endpoint and polling policy in `config`.
    pub fn from_config(config: &Config) -> Self {
        Self {
            poll_interval_ms: config.confirm_poll_ms,
            max_polls: config.confirm_max_polls.max(1),
            ..Self::new(config.rpc_url.clone(), config.commitment)
        }
    }

    /// Client for the balance endpoint in `config`.
    pub fn balance_client(config: &Config) -> Self {
        Self::new(config.balance_rpc_url.clone(), config.commitment)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn next_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        id
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, NetworkError> {
        let request = RpcRequest::new(self.next_id(), method, params);
        log::debug!("RPC {} -> {}", method, self.url);

        let response = Request::post(&self.url)
            .json(&request)
            .map_err(|e| NetworkError::Rpc(e.to_string()))?
            .send()
            .await
            .map_err(|e| NetworkError::Rpc(e.to_string()))?;

        if !response.ok() {
            return Err(NetworkError::Rpc(format!(
                "{} failed with HTTP {} {}",
                method,
                response.status(),
                response.status_text()
            )));
        }

        let envelope: RpcResponse<T> = response
            .json()
            .await
            .map_err(|e| NetworkError::InvalidResponse(format!("{}: {}", method, e)))?;

        envelope.into_result().map_err(NetworkError::Rpc)
    }
}

/// Read one `getSignatureStatuses` entry. `None` while the signature is
/// unknown or has not reached `commitment`.
///
/// Nodes that omit `confirmationStatus` report rooted signatures with
/// `confirmations: null`, which counts as finalized.
pub fn interpret_status(status: Option<&SignatureStatus>, commitment: Commitment) -> Option<ConfirmationStatus> {
    let status = status?;

    if let Some(err) = status.err.as_ref().filter(|err| !err.is_null()) {
        return Some(ConfirmationStatus::Failed {
            slot: status.slot,
            reason: err.to_string(),
        });
    }

    let reported = match status.confirmation_status.as_deref() {
        Some(level) => level.parse::<Commitment>().ok()?,
        None if status.confirmations.is_none() => Commitment::Finalized,
        None => Commitment::Processed,
    };

    commitment
        .is_satisfied_by(reported)
        .then_some(ConfirmationStatus::Confirmed { slot: status.slot })
}

#[async_trait(?Send)]
impl NetworkClient for JsonRpcClient {
    async fn latest_blockhash(&self) -> Result<String, NetworkError> {
        let latest: RpcContextValue<LatestBlockhash> = self
            .call("getLatestBlockhash", json!([{ "commitment": self.commitment.as_str() }]))
            .await?;
        Ok(latest.value.blockhash)
    }

    async fn send_transaction(&self, wire_base64: &str) -> Result<String, NetworkError> {
        let signature: String = self
            .call(
                "sendTransaction",
                json!([wire_base64, { "encoding": "base64", "preflightCommitment": self.commitment.as_str() }]),
            )
            .await?;
        log::debug!("Transaction sent: {}", signature);
        Ok(signature)
    }

    async fn confirm_transaction(&self, signature: &str, commitment: Commitment) -> Result<ConfirmationStatus, NetworkError> {
        for attempt in 1..=self.max_polls {
            let statuses: RpcContextValue<Vec<Option<SignatureStatus>>> = self
                .call("getSignatureStatuses", json!([[signature]]))
                .await?;

            let first = statuses.value.first().and_then(Option::as_ref);
            if let Some(status) = interpret_status(first, commitment) {
                log::debug!("Signature {} settled after {} checks: {:?}", signature, attempt, status);
                return Ok(status);
            }

            TimeoutFuture::new(self.poll_interval_ms).await;
        }

        Err(NetworkError::ConfirmationTimeout {
            signature: signature.to_string(),
            attempts: self.max_polls,
        })
    }

    async fn get_balance(&self, address: &str) -> Result<u64, NetworkError> {
        if !is_base58_pubkey(address) {
            return Err(NetworkError::InvalidResponse(format!("Invalid address {}", address)));
        }

        let balance: RpcContextValue<u64> = self
            .call("getBalance", json!([address, { "commitment": self.commitment.as_str() }]))
            .await?;
        Ok(balance.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(raw: &str) -> SignatureStatus {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_unknown_signature_is_pending() {
        assert_eq!(interpret_status(None, Commitment::Confirmed), None);
    }

    #[test]
    fn test_status_reaches_commitment() {
        let processed = status(r#"{"slot":72,"confirmations":0,"err":null,"confirmationStatus":"processed"}"#);
        assert_eq!(interpret_status(Some(&processed), Commitment::Confirmed), None);
        assert_eq!(
            interpret_status(Some(&processed), Commitment::Processed),
            Some(ConfirmationStatus::Confirmed { slot: 72 })
        );

        let finalized = status(r#"{"slot":80,"confirmations":null,"err":null,"confirmationStatus":"finalized"}"#);
        assert_eq!(
            interpret_status(Some(&finalized), Commitment::Confirmed),
            Some(ConfirmationStatus::Confirmed { slot: 80 })
        );
    }

    #[test]
    fn test_rooted_status_without_level_counts_as_finalized() {
        let rooted = status(r#"{"slot":90,"confirmations":null,"err":null}"#);
        assert_eq!(
            interpret_status(Some(&rooted), Commitment::Finalized),
            Some(ConfirmationStatus::Confirmed { slot: 90 })
        );

        let young = status(r#"{"slot":91,"confirmations":3,"err":null}"#);
        assert_eq!(interpret_status(Some(&young), Commitment::Confirmed), None);
    }

    #[test]
    fn test_runtime_error_fails_regardless_of_level() {
        let failed = status(
            r#"{"slot":73,"confirmations":1,"err":{"InstructionError":[0,{"Custom":1}]},"confirmationStatus":"processed"}"#,
        );

        let Some(ConfirmationStatus::Failed { slot, reason }) = interpret_status(Some(&failed), Commitment::Confirmed) else {
            panic!("expected a failed status");
        };
        assert_eq!(slot, 73);
        assert!(reason.contains("InstructionError"));
    }

    #[test]
    fn test_clients_follow_config() {
        let config = Config::default();

        let tx = JsonRpcClient::from_config(&config);
        assert_eq!(tx.url(), "https://api.devnet.solana.com");
        assert_eq!(tx.poll_interval_ms, 500);
        assert_eq!(tx.max_polls, 120);

        let balance = JsonRpcClient::balance_client(&config);
        assert_eq!(balance.url(), "https://devnet.sonic.game");
        assert_eq!(balance.next_id(), 1);
        assert_eq!(balance.next_id(), 2);
    }
}
