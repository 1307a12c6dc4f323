//! UI Components

pub mod navbar;
pub mod swap_card;
pub mod toaster;
pub mod token_balance;
pub mod token_card;
pub mod wallet_menu;

pub use navbar::Navbar;
pub use swap_card::SwapCard;
pub use toaster::Toaster;
pub use token_balance::TokenBalance;
pub use token_card::TokenCard;
pub use wallet_menu::WalletMenu;
