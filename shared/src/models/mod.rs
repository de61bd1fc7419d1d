//! Data models
//!
//! Pure value objects exchanged across the bridge. Created per call,
//! never cached.

pub mod print_request;
pub mod printer_config;
pub mod printer_info;

// Re-exports
pub use print_request::*;
pub use printer_config::*;
pub use printer_info::*;
