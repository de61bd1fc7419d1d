//! Print result envelope
//!
//! Print failures are returned as values, never raised across the bridge.
//! In Rust the envelope is a tagged result; on the wire it keeps the flat
//! shape the web application reads:
//!
//! ```json
//! { "success": true }
//! { "success": false, "error": "Printer offline" }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ErrorCode;

/// Result of a print request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "WireResponse", try_from = "WireResponse")]
pub enum PrintResponse {
    /// Printed without error
    Ok,
    /// Failed; `message` is never empty
    Err { message: String },
}

/// Flat `{ success, error? }` shape
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireResponse {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl PrintResponse {
    /// Successful response
    pub fn ok() -> Self {
        Self::Ok
    }

    /// Failed response
    ///
    /// An empty message is replaced by the generic print failure message.
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            ErrorCode::PrintFailed.message().to_string()
        } else {
            message
        };
        Self::Err { message }
    }

    /// Collapse a result into an envelope, using the error's display text
    pub fn from_result<E: fmt::Display>(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self::Ok,
            Err(e) => Self::failure(e.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Error message, present only on failure
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Ok => None,
            Self::Err { message } => Some(message),
        }
    }

    /// Convert back to a `Result` for `?`-style callers
    pub fn into_result(self) -> Result<(), String> {
        match self {
            Self::Ok => Ok(()),
            Self::Err { message } => Err(message),
        }
    }
}

impl From<PrintResponse> for WireResponse {
    fn from(response: PrintResponse) -> Self {
        match response {
            PrintResponse::Ok => Self {
                success: true,
                error: None,
            },
            PrintResponse::Err { message } => Self {
                success: false,
                error: Some(message),
            },
        }
    }
}

impl TryFrom<WireResponse> for PrintResponse {
    type Error = String;

    fn try_from(wire: WireResponse) -> Result<Self, Self::Error> {
        let error = wire.error.filter(|e| !e.trim().is_empty());
        match (wire.success, error) {
            (true, None) => Ok(Self::Ok),
            (true, Some(e)) => Err(format!(
                "inconsistent print response: success with error \"{}\"",
                e
            )),
            (false, error) => Ok(Self::failure(error.unwrap_or_default())),
        }
    }
}

impl fmt::Display for PrintResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("success"),
            Self::Err { message } => write!(f, "failed: {}", message),
        }
    }
}
