//! # Keypair Wallet
//!
//! A [`WalletAdapter`] backed by a local keypair, for driving the orchestrator
//! outside the browser.
//!
//! ## Features
//! - Load a secret key from a JSON byte array (`solana-keygen` format) or base58
//! - "Connect" means a keypair is loaded; "disconnect" drops it
//! - Sign the placeholder transfer and hand back the wire transaction

use crate::transaction::{encode_wire, sign_transfer};
use async_trait::async_trait;
use lib_core::chain::{SignedTransaction, TransferTransaction, WalletAdapter};
use lib_core::error::WalletError;
use parking_lot::RwLock;
use solana_sdk::signature::{Keypair, Signer};
use std::fs;
use std::path::Path;
use tracing::info;

/// Parse a secret key from a JSON byte array or a base58 string.
///
/// Accepts a 32-byte seed or a full 64-byte keypair.
pub fn parse_keypair(contents: &str) -> Result<Keypair, WalletError> {
    let contents = contents.trim();

    let bytes: Vec<u8> = if contents.starts_with('[') {
        serde_json::from_str(contents)
            .map_err(|e| WalletError::Provider(format!("Invalid JSON keypair: {}", e)))?
    } else {
        bs58::decode(contents)
            .into_vec()
            .map_err(|e| WalletError::Provider(format!("Invalid base58 keypair: {}", e)))?
    };

    match bytes.len() {
        32 => {
            let mut seed = [0u8; 32];
            seed.copy_from_slice(&bytes);
            Ok(Keypair::new_from_array(seed))
        }
        64 => Keypair::try_from(bytes.as_slice())
            .map_err(|e| WalletError::Provider(format!("Invalid keypair bytes: {}", e))),
        n => Err(WalletError::Provider(format!("Expected 32 or 64 bytes, got {}", n))),
    }
}

/// Wallet holding an optional local keypair.
pub struct KeypairWallet {
    /// Keypair restored by `connect` after a disconnect.
    source: Option<String>,
    keypair: RwLock<Option<Keypair>>,
}

impl KeypairWallet {
    /// Connected wallet for `keypair`.
    pub fn new(keypair: Keypair) -> Self {
        Self {
            source: None,
            keypair: RwLock::new(Some(keypair)),
        }
    }

    /// Disconnected wallet that loads `secret` (JSON array or base58) on connect.
    pub fn from_secret(secret: impl Into<String>) -> Self {
        Self {
            source: Some(secret.into()),
            keypair: RwLock::new(None),
        }
    }

    /// Read a keypair file, e.g. `~/.config/solana/id.json`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WalletError> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| WalletError::ProviderNotFound(format!("{}: {}", path.as_ref().display(), e)))?;
        let keypair = parse_keypair(&contents)?;
        Ok(Self {
            source: Some(contents),
            keypair: RwLock::new(Some(keypair)),
        })
    }
}

#[async_trait(?Send)]
impl WalletAdapter for KeypairWallet {
    fn public_address(&self) -> Option<String> {
        self.keypair.read().as_ref().map(|kp| kp.pubkey().to_string())
    }

    fn is_connected(&self) -> bool {
        self.keypair.read().is_some()
    }

    async fn connect(&self) -> Result<String, WalletError> {
        if let Some(address) = self.public_address() {
            return Ok(address);
        }

        let source = self
            .source
            .as_deref()
            .ok_or_else(|| WalletError::ProviderNotFound("no keypair configured".to_string()))?;
        let keypair = parse_keypair(source)?;
        let address = keypair.pubkey().to_string();
        *self.keypair.write() = Some(keypair);

        info!(%address, "Keypair wallet connected");
        Ok(address)
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        *self.keypair.write() = None;
        Ok(())
    }

    async fn sign_transaction(&self, transaction: &TransferTransaction) -> Result<SignedTransaction, WalletError> {
        let guard = self.keypair.read();
        let keypair = guard.as_ref().ok_or(WalletError::NotConnected)?;

        let signed = sign_transfer(transaction, keypair).map_err(|e| WalletError::Provider(e.to_string()))?;
        let wire = encode_wire(&signed).map_err(|e| WalletError::Provider(e.to_string()))?;
        Ok(SignedTransaction::Wire(wire))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::decode_wire;

    #[test]
    fn test_parse_keypair_formats() {
        let keypair = Keypair::new();
        let seed = keypair.secret_bytes().to_vec();

        let from_json = parse_keypair(&serde_json::to_string(&seed).unwrap()).unwrap();
        assert_eq!(from_json.pubkey(), keypair.pubkey());

        let from_b58 = parse_keypair(&bs58::encode(&seed).into_string()).unwrap();
        assert_eq!(from_b58.pubkey(), keypair.pubkey());

        let full = keypair.to_bytes().to_vec();
        let from_full = parse_keypair(&serde_json::to_string(&full).unwrap()).unwrap();
        assert_eq!(from_full.pubkey(), keypair.pubkey());

        assert!(parse_keypair("[1, 2, 3]").is_err());
        assert!(parse_keypair("0OIl").is_err());
    }

    #[tokio::test]
    async fn test_connect_and_disconnect() {
        let keypair = Keypair::new();
        let expected = keypair.pubkey().to_string();
        let wallet = KeypairWallet::from_secret(bs58::encode(keypair.secret_bytes()).into_string());
        assert!(!wallet.is_connected());

        assert_eq!(wallet.connect().await.unwrap(), expected);
        assert_eq!(wallet.public_address(), Some(expected));

        wallet.disconnect().await.unwrap();
        assert!(!wallet.is_connected());
        assert_eq!(wallet.public_address(), None);
    }

    #[tokio::test]
    async fn test_sign_produces_verifiable_wire() {
        let keypair = Keypair::new();
        let payer = keypair.pubkey().to_string();
        let wallet = KeypairWallet::new(keypair);
        let transfer = TransferTransaction::self_transfer(&payer, 100, "EkSnNWid2cvwEVnVx9aBqawnmiCNiDgp3gUdkDPTKN1N");

        let signed = wallet.sign_transaction(&transfer).await.unwrap();

        let SignedTransaction::Wire(wire) = signed else {
            panic!("expected a wire transaction");
        };
        assert!(decode_wire(&wire).unwrap().verify().is_ok());
    }

    #[tokio::test]
    async fn test_disconnected_wallet_cannot_sign() {
        let wallet = KeypairWallet::from_secret("[]");
        let transfer = TransferTransaction::self_transfer("x", 1, "y");

        assert_eq!(wallet.sign_transaction(&transfer).await, Err(WalletError::NotConnected));
    }
}
