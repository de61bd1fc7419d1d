//! Reference host for the printer bridge
//!
//! [`HostBridge`] implements [`shared::PrinterBridge`] on top of
//! `bridge-printer`: it resolves a request to a network or driver printer,
//! renders the payload to ESC/POS bytes, and reports every outcome as a
//! [`shared::PrintResponse`].
//!
//! # Example
//!
//! ```no_run
//! use print_host::{HostBridge, HostConfig};
//! use shared::{PrintContent, PrintRequest, PrinterBridge, PrinterRole};
//!
//! # async fn run() -> print_host::HostResult<()> {
//! let bridge = HostBridge::new(HostConfig::from_env())?;
//! let request = PrintRequest::for_role(PrinterRole::InvoiceK80, PrintContent::text(["Hello"]));
//! let response = bridge.print(request).await;
//! if let Some(message) = response.error() {
//!     eprintln!("print failed: {}", message);
//! }
//! # Ok(())
//! # }
//! ```

pub mod bridge;
pub mod config;
pub mod error;
pub mod logger;
pub mod render;
pub mod store;
pub mod target;

pub use bridge::HostBridge;
pub use config::HostConfig;
pub use error::{HostError, HostResult};
pub use render::Renderer;
pub use store::ConfigStore;
pub use target::PrinterTarget;
