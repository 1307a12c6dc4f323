//! # Solana Library
//!
//! Native implementations of the swap core's collaborators: an RPC
//! [`client::SolanaClient`] and a keypair-backed [`wallet::KeypairWallet`],
//! plus the transfer builder they share.

pub mod client;
pub mod transaction;
pub mod wallet;

// Re-export commonly used types from root for convenience
pub use client::SolanaClient;
pub use wallet::KeypairWallet;
