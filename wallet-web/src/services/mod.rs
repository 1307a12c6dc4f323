//! Browser-side collaborators of the swap core

pub mod rpc;
pub mod storage;
pub mod wallet;

pub use rpc::JsonRpcClient;
pub use storage::LocalStorageStore;
pub use wallet::{BrowserWallet, WalletProvider, WalletState};
