//! Browser helpers

pub mod constants;
pub mod format;
pub mod js;
