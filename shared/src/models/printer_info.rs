//! Printer enumeration records

use serde::{Deserialize, Serialize};

/// Snapshot of one discovered printer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrinterInfo {
    /// Stable machine identifier
    pub name: String,
    /// Human-readable label
    pub display_name: String,
    /// Driver/device description
    pub description: String,
    /// Host-defined status code, passed through untouched
    pub status: i64,
    /// System default at enumeration time
    pub is_default: bool,
}

/// Keep at most one default printer
///
/// The first entry flagged as default wins; later flags are cleared.
pub fn normalize_default(printers: &mut [PrinterInfo]) {
    let mut seen = false;
    for printer in printers.iter_mut() {
        if printer.is_default {
            if seen {
                printer.is_default = false;
            }
            seen = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printer(name: &str, is_default: bool) -> PrinterInfo {
        PrinterInfo {
            name: name.into(),
            display_name: name.into(),
            description: String::new(),
            status: 0,
            is_default,
        }
    }

    #[test]
    fn test_wire_shape() {
        let info = PrinterInfo {
            name: "EPSON_TM".into(),
            display_name: "Epson TM-T82".into(),
            description: "EPSON TM-T82 Receipt".into(),
            status: 0x80,
            is_default: true,
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["displayName"], "Epson TM-T82");
        assert_eq!(json["isDefault"], true);
        assert_eq!(json["status"], 128);

        let back: PrinterInfo = serde_json::from_value(json).unwrap();
        assert_eq!(back, info);
    }

    #[test]
    fn test_normalize_default_keeps_first() {
        let mut printers = vec![printer("a", false), printer("b", true), printer("c", true)];
        normalize_default(&mut printers);
        let defaults: Vec<_> = printers.iter().filter(|p| p.is_default).collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].name, "b");
    }

    #[test]
    fn test_normalize_default_empty_and_none() {
        let mut empty: Vec<PrinterInfo> = Vec::new();
        normalize_default(&mut empty);
        assert!(empty.is_empty());

        let mut none = vec![printer("a", false), printer("b", false)];
        normalize_default(&mut none);
        assert!(none.iter().all(|p| !p.is_default));
    }
}
