//! Printer identifier resolution
//!
//! A printer identifier is either a network address or a spooler name:
//! - `tcp://192.168.1.50:9100`, `192.168.1.50:9100`, `192.168.1.50` → network
//! - anything else (e.g. `EPSON TM-T82 Receipt`) → driver printer

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use bridge_printer::{DEFAULT_PORT, PrintError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrinterTarget {
    Network(SocketAddr),
    Driver(String),
}

impl PrinterTarget {
    pub fn parse(identifier: &str) -> Result<Self, PrintError> {
        let id = identifier.trim();
        if id.is_empty() {
            return Err(PrintError::InvalidConfig("empty printer identifier".into()));
        }

        if let Some(addr) = id.strip_prefix("tcp://") {
            let addr = addr.trim_end_matches('/');
            return parse_network(addr)
                .ok_or_else(|| PrintError::InvalidConfig(format!("Invalid address: {}", addr)));
        }

        Ok(parse_network(id).unwrap_or_else(|| Self::Driver(id.to_string())))
    }
}

fn parse_network(s: &str) -> Option<PrinterTarget> {
    if let Ok(addr) = s.parse::<SocketAddr>() {
        return Some(PrinterTarget::Network(addr));
    }
    s.parse::<IpAddr>()
        .ok()
        .map(|ip| PrinterTarget::Network(SocketAddr::new(ip, DEFAULT_PORT)))
}

impl fmt::Display for PrinterTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(addr) => write!(f, "tcp://{}", addr),
            Self::Driver(name) => f.write_str(name),
        }
    }
}
