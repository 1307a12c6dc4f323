//! # Core Library
//!
//! Swap/mint orchestration and the local balance ledger.
//!
//! - [`model::catalog`] - the static token catalog
//! - [`model::convert`] - amount conversion and the two-sided swap form
//! - [`model::store`] - key-value storage and the balance ledger on top of it
//! - [`model::balance`] - native balance snapshots
//! - [`chain`] - contracts for the wallet provider and the network client
//! - [`session`] - per-session wallet bookkeeping (connect/disconnect toasts)
//! - [`orchestrator`] - the submission state machine and its async driver
//! - [`notify`] - notification sink and the toast texts

pub mod chain;
pub mod config;
pub mod error;
pub mod model;
pub mod notify;
pub mod orchestrator;
pub mod session;

// Re-export commonly used types
pub use chain::{Commitment, NetworkClient, WalletAdapter};
pub use config::Config;
pub use error::{PreconditionError, Result, SwapError};
pub use model::catalog::{Catalog, Token};
pub use model::convert::SwapForm;
pub use model::store::{BalanceLedger, KeyValueStore, MemoryStore};
pub use notify::NotificationSink;
pub use orchestrator::{Orchestrator, Settlement};
pub use session::WalletSession;
pub use tokio_util::sync::CancellationToken;
