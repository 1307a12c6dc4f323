//! # Error Handling
//!
//! Error types for the swap core, following the `thiserror` pattern.
//!
//! ## Error Categories
//!
//! 1. **Local** - never reach the network
//!    - [`PreconditionError`]: wallet not connected, bad amount, same token on both sides
//!    - [`CatalogError`]: unknown token id, malformed catalog
//!
//! 2. **Collaborator** - raised by the wallet provider, the RPC node or storage
//!    - [`WalletError`]: signing rejected, provider missing
//!    - [`NetworkError`]: blockhash, submission, confirmation or balance failures
//!    - [`StorageError`]: ledger read/write failures (tolerated, see [`crate::model::store`])
//!
//! 3. **Operation** - what a submission attempt resolves to
//!    - [`SwapError`]
//!
//! Collaborator messages are kept verbatim: `SwapError` displays the raw text
//! for signing, network and operation failures so the toast shows exactly what
//! the wallet or node said.
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{NetworkError, SwapError};
//!
//! let err: SwapError = NetworkError::Rpc("Blockhash not found".to_string()).into();
//! assert_eq!(err.to_string(), "Blockhash not found");
//! ```

use thiserror::Error;

/// Convenience type alias for `Result<T, SwapError>`.
pub type Result<T> = std::result::Result<T, SwapError>;

/// A submission was refused before anything touched the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("Wallet not connected")]
    WalletNotConnected,

    /// Missing, non-numeric or non-positive amount. Carries the raw input.
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("Cannot swap {0} for itself")]
    SameToken(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Unknown token: {0}")]
    UnknownToken(String),

    #[error("Duplicate token id: {0}")]
    DuplicateId(String),

    #[error("Token {0} must have a positive unit price")]
    NonPositivePrice(String),

    #[error("Catalog needs at least two tokens")]
    TooSmall,
}

/// Errors raised by a wallet provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("Wallet not connected")]
    NotConnected,

    #[error("Wallet provider not found: {0}")]
    ProviderNotFound(String),

    /// The provider refused or failed; the message is the provider's own.
    #[error("{0}")]
    Provider(String),
}

/// Errors raised by the network client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// Transport or node error, message kept as reported.
    #[error("{0}")]
    Rpc(String),

    #[error("Invalid RPC response: {0}")]
    InvalidResponse(String),

    #[error("Transaction {signature} was not confirmed after {attempts} status checks")]
    ConfirmationTimeout { signature: String, attempts: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage read failed: {0}")]
    Read(String),

    #[error("Storage write failed: {0}")]
    Write(String),
}

/// Outcome of a failed submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwapError {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// The wallet did not produce a signature.
    #[error("{0}")]
    Signing(String),

    /// Blockhash fetch, submission or confirmation failed.
    #[error("{0}")]
    Network(String),

    #[error("Another transaction is already in progress")]
    InFlight,

    /// The caller cancelled before settlement; the ledger was not written.
    #[error("Operation cancelled before settlement")]
    Cancelled,

    /// Anything else that went wrong after validation.
    #[error("{0}")]
    Operation(String),
}

impl SwapError {
    pub fn is_precondition(&self) -> bool {
        matches!(self, SwapError::Precondition(_))
    }
}

impl From<WalletError> for SwapError {
    fn from(err: WalletError) -> Self {
        SwapError::Signing(err.to_string())
    }
}

impl From<NetworkError> for SwapError {
    fn from(err: NetworkError) -> Self {
        SwapError::Network(err.to_string())
    }
}
