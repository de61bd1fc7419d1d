//! Error codes for the printer bridge
//!
//! Across the bridge boundary failures are reported through
//! [`PrintResponse`](crate::PrintResponse) only. The codes here classify
//! failures on the host side (logs, CLI exit status) and are never required
//! by the web application.
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 9xxx: System errors (92xx: printing)

mod codes;

pub use codes::{ErrorCode, InvalidErrorCode};
