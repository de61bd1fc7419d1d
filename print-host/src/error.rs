//! Host error types
//!
//! Errors never cross the bridge: [`HostBridge`](crate::HostBridge) turns
//! them into [`PrintResponse`] failures using their display text.

use bridge_printer::PrintError;
use shared::{ErrorCode, PrintResponse, PrinterRole};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Print(#[from] PrintError),

    #[error("No printer configured for role {0}")]
    RoleNotConfigured(PrinterRole),

    #[error("No printer specified")]
    NoPrinterSpecified,

    #[error("Invalid print payload: {0}")]
    InvalidPayload(String),
}

impl HostError {
    /// Classify for logs and exit status
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Io(_) => ErrorCode::InternalError,
            Self::Serialization(_) => ErrorCode::InvalidFormat,
            Self::Print(e) => print_error_code(e),
            Self::RoleNotConfigured(_) | Self::NoPrinterSpecified => {
                ErrorCode::PrinterNotConfigured
            }
            Self::InvalidPayload(_) => ErrorCode::InvalidRequest,
        }
    }
}

fn print_error_code(err: &PrintError) -> ErrorCode {
    match err {
        PrintError::Offline(_) | PrintError::Connection(_) => ErrorCode::PrinterOffline,
        PrintError::Timeout(_) => ErrorCode::TimeoutError,
        PrintError::InvalidConfig(_) => ErrorCode::ConfigError,
        PrintError::InvalidData(_) => ErrorCode::InvalidRequest,
        PrintError::Unsupported(_) => ErrorCode::PrintingNotSupported,
        PrintError::Io(_) => ErrorCode::PrintFailed,
        #[cfg(windows)]
        PrintError::WindowsPrinter(_) => ErrorCode::PrinterNotAvailable,
    }
}

impl From<HostError> for PrintResponse {
    fn from(err: HostError) -> Self {
        PrintResponse::failure(err.to_string())
    }
}

pub type HostResult<T> = Result<T, HostError>;
