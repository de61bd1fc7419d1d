//! # bridge-printer
//!
//! ESC/POS thermal printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ESC/POS command building
//! - Code page encoding (GBK for Chinese printers, Windows-874 for Thai printers)
//! - Network printing (TCP port 9100)
//! - Windows driver printing and printer enumeration
//!
//! WHAT to print and WHICH printer to use is decided by the host
//! (see the `print-host` crate).
//!
//! ## Example
//!
//! ```ignore
//! use bridge_printer::{EscPosBuilder, NetworkPrinter, Printer, TextEncoding};
//!
//! let mut builder = EscPosBuilder::with_encoding(48, TextEncoding::thai());
//! builder.center();
//! builder.double_size();
//! builder.line("ใบเสร็จรับเงิน");
//! builder.reset_size();
//! builder.sep_double();
//! builder.left();
//! builder.line_lr("รวม", "120.00");
//! builder.cut_feed(3);
//!
//! let printer = NetworkPrinter::from_socket_addr("192.168.1.100:9100".parse()?);
//! printer.print(&builder.build()).await?;
//! ```

mod encoding;
mod error;
mod escpos;
mod printer;

// Re-exports
pub use encoding::{DEFAULT_THAI_CODE_PAGE, TextEncoding};
pub use error::{PrintError, PrintResult};
pub use escpos::{EscPosBuilder, QR_MAX_DATA, WIDTH_58MM, WIDTH_80MM};
pub use printer::{
    DEFAULT_PORT, DriverPrinter, NetworkPrinter, Printer, driver_printers, print_driver_sync,
};

#[cfg(windows)]
pub use printer::WindowsPrinter;
