//! Printer adapters for sending ESC/POS data
//!
//! Supports:
//! - Network printers (TCP port 9100)
//! - Windows driver printers (via Win32 API)

use crate::error::{PrintError, PrintResult};
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{info, instrument, warn};

/// Default raw printing port
pub const DEFAULT_PORT: u16 = 9100;

/// Trait for printer adapters
#[allow(async_fn_in_trait)]
pub trait Printer {
    /// Send raw ESC/POS data to the printer
    async fn print(&self, data: &[u8]) -> PrintResult<()>;

    /// Check if the printer is online/reachable
    async fn is_online(&self) -> bool;
}

/// A printer installed in the operating system spooler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverPrinter {
    /// Spooler name, used to address the printer
    pub name: String,
    /// Port the spooler sends jobs to (e.g. "IP_192.168.1.50", "USB001")
    pub port: String,
    /// Driver name
    pub driver: String,
    /// Free-text comment set by the administrator
    pub comment: String,
    /// Raw spooler status bits
    pub status: u32,
    /// Whether this is the system default printer
    pub is_default: bool,
}

/// Enumerate spooler printers
///
/// Returns an empty list on platforms without driver printing.
pub fn driver_printers() -> PrintResult<Vec<DriverPrinter>> {
    #[cfg(windows)]
    {
        WindowsPrinter::enumerate()
    }
    #[cfg(not(windows))]
    {
        Ok(Vec::new())
    }
}

/// Send raw data to a spooler printer by name, blocking the current thread
pub fn print_driver_sync(name: &str, data: &[u8]) -> PrintResult<()> {
    #[cfg(windows)]
    {
        let name = WindowsPrinter::resolve(Some(name))?;
        WindowsPrinter::new(&name).print_sync(data)
    }
    #[cfg(not(windows))]
    {
        let _ = data;
        Err(PrintError::Unsupported(format!(
            "driver printer '{}' (driver printing requires Windows)",
            name
        )))
    }
}

/// Network printer (TCP port 9100)
///
/// Most thermal printers support raw TCP printing on port 9100.
#[derive(Debug, Clone)]
pub struct NetworkPrinter {
    addr: SocketAddr,
    timeout: Duration,
}

impl NetworkPrinter {
    /// Create from an already resolved socket address
    pub fn from_socket_addr(addr: SocketAddr) -> Self {
        Self {
            addr,
            timeout: Duration::from_secs(5),
        }
    }

    /// Set connection timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn connect_error(&self, e: std::io::Error) -> PrintError {
        match e.kind() {
            ErrorKind::ConnectionRefused
            | ErrorKind::HostUnreachable
            | ErrorKind::NetworkUnreachable => PrintError::Offline(self.addr.to_string()),
            _ => PrintError::Connection(format!("{}: {}", self.addr, e)),
        }
    }
}

impl Printer for NetworkPrinter {
    #[instrument(skip(data), fields(addr = %self.addr, data_len = data.len()))]
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        info!("Connecting to printer");

        let mut stream = tokio::time::timeout(self.timeout, TcpStream::connect(self.addr))
            .await
            .map_err(|_| PrintError::Timeout(format!("Connection timeout: {}", self.addr)))?
            .map_err(|e| self.connect_error(e))?;

        info!("Connected, sending {} bytes", data.len());

        stream.write_all(data).await.map_err(|e| {
            PrintError::Io(std::io::Error::new(
                e.kind(),
                format!("Write failed: {}", e),
            ))
        })?;

        stream.flush().await?;
        stream.shutdown().await?;

        info!("Print job sent successfully");
        Ok(())
    }

    #[instrument(fields(addr = %self.addr))]
    async fn is_online(&self) -> bool {
        let check_timeout = Duration::from_millis(500);

        match tokio::time::timeout(check_timeout, TcpStream::connect(self.addr)).await {
            Ok(Ok(_)) => {
                info!("Printer online");
                true
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Printer offline");
                false
            }
            Err(_) => {
                warn!("Printer check timeout");
                false
            }
        }
    }
}

/// Windows driver printer
///
/// Uses Win32 API to print through installed printer drivers.
#[cfg(windows)]
pub struct WindowsPrinter {
    name: String,
}

#[cfg(windows)]
impl WindowsPrinter {
    /// Create a printer with a specific name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    /// List available printer names (filters out virtual printers)
    pub fn list() -> PrintResult<Vec<String>> {
        Ok(Self::enumerate()?.into_iter().map(|p| p.name).collect())
    }

    /// Enumerate local and connected printers with driver details
    ///
    /// Virtual printers (file, XPS, OneNote, ...) are filtered out by port name.
    pub fn enumerate() -> PrintResult<Vec<DriverPrinter>> {
        use windows::Win32::Graphics::Printing::{
            EnumPrintersW, PRINTER_ENUM_CONNECTIONS, PRINTER_ENUM_LOCAL, PRINTER_INFO_2W,
        };

        let default_name = Self::default_printer().unwrap_or_else(|e| {
            warn!(error = %e, "default printer lookup failed");
            None
        });

        unsafe {
            let flags = PRINTER_ENUM_LOCAL | PRINTER_ENUM_CONNECTIONS;
            let mut needed: u32 = 0;
            let mut returned: u32 = 0;

            let _ = EnumPrintersW(flags, None, 2, None, &mut needed, &mut returned);

            if needed == 0 {
                return Ok(Vec::new());
            }

            let mut buf: Vec<u8> = vec![0; needed as usize];
            EnumPrintersW(
                flags,
                None,
                2,
                Some(buf.as_mut_slice()),
                &mut needed,
                &mut returned,
            )
            .map_err(|_| PrintError::WindowsPrinter("EnumPrintersW failed".to_string()))?;

            let ptr = buf.as_ptr() as *const PRINTER_INFO_2W;
            let slice = std::slice::from_raw_parts(ptr, returned as usize);

            let mut result = Vec::with_capacity(slice.len());
            for info in slice.iter() {
                if info.pPrinterName.is_null() {
                    continue;
                }
                let name = wide_to_string(info.pPrinterName);
                let port = wide_to_string(info.pPortName);

                if Self::is_virtual_port(&port) {
                    continue;
                }

                let is_default = default_name.as_deref() == Some(name.as_str());
                result.push(DriverPrinter {
                    name,
                    port,
                    driver: wide_to_string(info.pDriverName),
                    comment: wide_to_string(info.pComment),
                    status: info.Status,
                    is_default,
                });
            }

            Ok(result)
        }
    }

    /// Check if a port is a virtual printer port
    fn is_virtual_port(port: &str) -> bool {
        let p = port.to_lowercase();
        p == "file:"
            || p == "portprompt:"
            || p == "xpsport:"
            || p.starts_with("onenote")
            || p == "nul:"
            || p.starts_with("wfsport:")
    }

    /// Get the default printer name
    pub fn default_printer() -> PrintResult<Option<String>> {
        use windows::Win32::Graphics::Printing::GetDefaultPrinterW;
        use windows::core::PWSTR;

        unsafe {
            let mut needed: u32 = 0;
            let _ = GetDefaultPrinterW(None, &mut needed);

            if needed == 0 {
                return Ok(None);
            }

            let mut buf: Vec<u16> = vec![0; needed as usize];
            let ok = GetDefaultPrinterW(Some(PWSTR(buf.as_mut_ptr())), &mut needed);

            if !ok.as_bool() {
                return Ok(None);
            }

            let name = PWSTR(buf.as_mut_ptr())
                .to_string()
                .map_err(|e| PrintError::WindowsPrinter(format!("UTF-16 decode failed: {}", e)))?;

            Ok(Some(name))
        }
    }

    /// Resolve a printer name - returns the name if valid, or default/first available
    pub fn resolve(name: Option<&str>) -> PrintResult<String> {
        if let Some(name) = name {
            let printers = Self::list()?;
            if printers.iter().any(|p| p == name) {
                return Ok(name.to_string());
            }
            return Err(PrintError::WindowsPrinter(format!(
                "Printer not found: {}",
                name
            )));
        }

        if let Some(default) = Self::default_printer()? {
            return Ok(default);
        }

        let printers = Self::list()?;
        printers
            .first()
            .cloned()
            .ok_or_else(|| PrintError::WindowsPrinter("No printers available".to_string()))
    }

    /// Check if printer is online (includes network port detection for IP printers)
    pub fn check_online(name: &str) -> PrintResult<bool> {
        use std::net::{TcpStream, ToSocketAddrs};
        use windows::Win32::Graphics::Printing::{
            ClosePrinter, GetPrinterW, OpenPrinterW, PRINTER_HANDLE, PRINTER_INFO_5W,
            PRINTER_INFO_6, PRINTER_STATUS_OFFLINE,
        };
        use windows::core::PCWSTR;

        unsafe {
            let mut handle: PRINTER_HANDLE = PRINTER_HANDLE::default();
            let name_w = to_wide(name);

            OpenPrinterW(PCWSTR::from_raw(name_w.as_ptr()), &mut handle, None)
                .map_err(|_| PrintError::WindowsPrinter("OpenPrinterW failed".to_string()))?;

            // PRINTER_INFO_6 carries the status
            let mut needed6: u32 = 0;
            let _ = GetPrinterW(handle, 6, None, &mut needed6);

            if needed6 > 0 {
                let mut buf6: Vec<u8> = vec![0; needed6 as usize];
                if GetPrinterW(handle, 6, Some(buf6.as_mut_slice()), &mut needed6).is_ok() {
                    let info6 = *(buf6.as_ptr() as *const PRINTER_INFO_6);
                    if (info6.dwStatus & PRINTER_STATUS_OFFLINE) != 0 {
                        let _ = ClosePrinter(handle);
                        return Ok(false);
                    }
                }
            }

            // PRINTER_INFO_5 carries the port name
            let mut needed5: u32 = 0;
            let _ = GetPrinterW(handle, 5, None, &mut needed5);

            let port = if needed5 > 0 {
                let mut buf5: Vec<u8> = vec![0; needed5 as usize];
                if GetPrinterW(handle, 5, Some(buf5.as_mut_slice()), &mut needed5).is_ok() {
                    let info5 = *(buf5.as_ptr() as *const PRINTER_INFO_5W);
                    wide_to_string(info5.pPortName)
                } else {
                    String::new()
                }
            } else {
                String::new()
            };

            let _ = ClosePrinter(handle);

            // IP_xxx ports: try the raw port
            let lower = port.to_lowercase();
            if lower.starts_with("ip_") {
                let host = lower.trim_start_matches("ip_");
                let host = host.split(',').next().unwrap_or(host);

                let timeout = Duration::from_millis(400);
                if let Ok(mut iter) = format!("{}:{}", host, DEFAULT_PORT).to_socket_addrs()
                    && let Some(addr) = iter.next()
                {
                    return Ok(TcpStream::connect_timeout(&addr, timeout).is_ok());
                }
                return Ok(false);
            }

            // Non-IP printers are online unless marked offline
            Ok(true)
        }
    }

    /// Send raw ESC/POS data synchronously (for use from sync/blocking contexts)
    pub fn print_sync(&self, data: &[u8]) -> PrintResult<()> {
        self.write_raw(data)
    }

    fn write_raw(&self, data: &[u8]) -> PrintResult<()> {
        use core::ffi::c_void;
        use windows::Win32::Graphics::Printing::{
            ClosePrinter, DOC_INFO_1W, EndDocPrinter, EndPagePrinter, OpenPrinterW, PRINTER_HANDLE,
            StartDocPrinterW, StartPagePrinter, WritePrinter,
        };
        use windows::core::{PCWSTR, PWSTR};

        unsafe {
            if !Self::check_online(&self.name).unwrap_or(true) {
                return Err(PrintError::Offline(self.name.clone()));
            }

            let mut handle: PRINTER_HANDLE = PRINTER_HANDLE::default();
            let name_w = to_wide(&self.name);

            OpenPrinterW(PCWSTR::from_raw(name_w.as_ptr()), &mut handle, None)
                .map_err(|_| PrintError::WindowsPrinter("OpenPrinterW failed".to_string()))?;

            let doc_name_w = to_wide("Raw Document");
            let datatype_w = to_wide("RAW");
            let doc_info = DOC_INFO_1W {
                pDocName: PWSTR(doc_name_w.as_ptr() as *mut _),
                pOutputFile: PWSTR::null(),
                pDatatype: PWSTR(datatype_w.as_ptr() as *mut _),
            };

            if StartDocPrinterW(handle, 1, &doc_info as *const DOC_INFO_1W) == 0 {
                let _ = ClosePrinter(handle);
                return Err(PrintError::WindowsPrinter(
                    "StartDocPrinter failed".to_string(),
                ));
            }

            if !StartPagePrinter(handle).as_bool() {
                let _ = EndDocPrinter(handle);
                let _ = ClosePrinter(handle);
                return Err(PrintError::WindowsPrinter(
                    "StartPagePrinter failed".to_string(),
                ));
            }

            let mut written: u32 = 0;
            let ok = WritePrinter(
                handle,
                data.as_ptr() as *const c_void,
                data.len() as u32,
                &mut written,
            );

            let _ = EndPagePrinter(handle);
            let _ = EndDocPrinter(handle);
            let _ = ClosePrinter(handle);

            if !ok.as_bool() {
                return Err(PrintError::WindowsPrinter(
                    "WritePrinter failed".to_string(),
                ));
            }

            if written != data.len() as u32 {
                return Err(PrintError::WindowsPrinter("Incomplete write".to_string()));
            }

            Ok(())
        }
    }
}

#[cfg(windows)]
fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

#[cfg(windows)]
fn wide_to_string(p: windows::core::PWSTR) -> String {
    if p.is_null() {
        return String::new();
    }
    unsafe { p.to_string().unwrap_or_default() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_print_sends_bytes() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            socket.read_to_end(&mut received).await.unwrap();
            received
        });

        let printer = NetworkPrinter::from_socket_addr(addr);
        printer.print(b"\x1B@hello").await.unwrap();

        assert_eq!(server.await.unwrap(), b"\x1B@hello");
    }

    #[tokio::test]
    async fn test_print_to_closed_port_is_offline() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let printer = NetworkPrinter::from_socket_addr(addr);
        let err = printer.print(b"x").await.unwrap_err();
        assert!(matches!(err, PrintError::Offline(_)), "{:?}", err);
        assert!(!printer.is_online().await);
    }

    #[cfg(not(windows))]
    #[test]
    fn test_driver_printing_unsupported() {
        assert!(driver_printers().unwrap().is_empty());
        assert!(matches!(
            print_driver_sync("Epson-K80", b"x"),
            Err(PrintError::Unsupported(_))
        ));
    }
}
