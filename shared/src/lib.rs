//! # Shared Data Transfer Objects Library
//!
//! This library defines the data contracts between the swap core, the browser
//! app and the outside world. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects
//!   - **[`dto::ledger`]**: The persisted balance document (`{ "USDC": 7.0 }`)
//!   - **[`dto::notification`]**: Toast events emitted by the core
//!   - **[`dto::rpc`]**: Solana JSON-RPC request/response envelopes used by the browser client
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::format_address`]**: Format wallet addresses for display
//!   - **[`utils::truncate_address`]**: Truncate addresses with ellipsis
//!
//! ## Wire Format
//!
//! - The ledger document is a bare JSON object keyed by token symbol, with no version field
//! - Notification and RPC types use **camelCase** field names, matching the browser side
//! - Optional fields are omitted from JSON when `None`
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::ledger::LedgerDocument;
//! use shared::utils::truncate_address;
//!
//! let doc = LedgerDocument::from_json(r#"{"USDC": 2}"#).unwrap();
//! assert_eq!(doc.get("USDC"), Some(2.0));
//!
//! let display = truncate_address("8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL");
//! assert_eq!(display, "8W6Q...JKAL");
//! ```

pub mod dto;
pub mod utils;

pub use dto::*;
pub use utils::*;
