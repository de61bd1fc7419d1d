//! The bridge a host environment implements
//!
//! Every operation is a stateless, single-shot async request. No ordering is
//! guaranteed between concurrent calls and no cancellation is defined.
//! Retries, if any, are the implementation's business.

use async_trait::async_trait;

use crate::models::{PrintRequest, PrinterConfig, PrinterInfo};
use crate::response::PrintResponse;

/// Printing capability supplied by the host
///
/// None of the operations can fail at this layer:
/// - configuration lookup always yields a config (unset roles are `""`)
/// - print failures come back as [`PrintResponse::Err`]
/// - enumeration yields an empty list when nothing is found, with at most
///   one entry marked as default
#[async_trait]
pub trait PrinterBridge: Send + Sync {
    /// Configured printer names per role
    async fn get_printer_config(&self) -> PrinterConfig;

    /// Print a job
    async fn print(&self, request: PrintRequest) -> PrintResponse;

    /// Enumerate available printers
    async fn list_printers(&self) -> Vec<PrinterInfo>;
}
