//! Printer bridge contract
//!
//! Data shapes exchanged between the web application and the host
//! environment that owns the printers, plus the [`PrinterBridge`] trait the
//! host implements. Both sides import these types explicitly.
//!
//! Wire format is JSON with camelCase keys:
//!
//! ```json
//! { "printInvoiceK80": "Epson-K80", "printInvoiceA4": "", "printLabel": "" }
//! { "success": false, "error": "Printer offline" }
//! [{ "name": "EPSON_TM", "displayName": "Epson TM-T82", "description": "", "status": 0, "isDefault": true }]
//! ```

pub mod bridge;
pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use bridge::PrinterBridge;
pub use error::{ErrorCode, InvalidErrorCode};
pub use models::{
    Align, PrintContent, PrintLine, PrintRequest, PrinterConfig, PrinterInfo, PrinterRole,
    SeparatorStyle, TextSize, normalize_default,
};
pub use response::PrintResponse;
pub use serde::{Deserialize, Serialize};
