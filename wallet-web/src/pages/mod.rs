//! Page modules

pub mod home;
pub mod not_found;
pub mod swap;
pub mod token;

pub use home::HomePage;
pub use not_found::NotFound;
pub use swap::SwapPage;
pub use token::TokenPage;
