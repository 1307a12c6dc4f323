//! # Data Transfer Objects (DTOs)
//!
//! Data structures that cross a process or storage boundary.
//!
//! ## Module Organization
//!
//! - [`ledger`] - The `localStorage` balance document
//! - [`notification`] - Toast events surfaced to the user
//! - [`rpc`] - Solana JSON-RPC 2.0 envelopes
//!
//! ## Example JSON
//!
//! ### Ledger document (storage key `tokenBalances`)
//!
//! ```text
//! { "MAIZE": 3.0, "USDC": 7.0 }
//! ```
//!
//! ### Notification
//!
//! ```text
//! {
//!   "kind": "operation-succeeded",
//!   "title": "Swap successful!",
//!   "description": "You've successfully swapped 1 MAIZE to 2.340000 USDC.",
//!   "severity": "info",
//!   "durationMs": 5000
//! }
//! ```

pub mod ledger;
pub mod notification;
pub mod rpc;

pub use ledger::*;
pub use notification::*;
pub use rpc::*;
