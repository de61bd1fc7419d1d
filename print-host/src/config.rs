use std::path::PathBuf;
use std::time::Duration;

use bridge_printer::{DEFAULT_THAI_CODE_PAGE, TextEncoding, WIDTH_80MM};
use shared::{PrinterConfig, PrinterRole};

const DEFAULT_WORK_DIR: &str = "./print-host";

/// Host configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | ./print-host | Role mapping and logs |
/// | PRINTER_INVOICE_K80 | (unset) | Overrides the invoiceK80 printer |
/// | PRINTER_INVOICE_A4 | (unset) | Overrides the invoiceA4 printer |
/// | PRINTER_LABEL | (unset) | Overrides the label printer |
/// | PAPER_WIDTH | 48 | Characters per line for rendered jobs |
/// | TEXT_ENCODING | thai | `thai` or `gbk` |
/// | THAI_CODE_PAGE | 26 | ESC t table used for Thai text |
/// | PRINT_TIMEOUT_MS | 5000 | Printer connect timeout |
/// | LOG_LEVEL | info | Default tracing filter |
/// | LOG_JSON | false | JSON log output |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/print-host PRINTER_INVOICE_K80=192.168.1.50 print-host list
/// ```
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Working directory for `printers.json` and logs
    pub work_dir: PathBuf,
    /// Role overrides from the environment (empty = not overridden)
    pub printer_overrides: PrinterConfig,
    /// Characters per line
    pub paper_width: usize,
    /// Code page for rendered text
    pub encoding: TextEncoding,
    /// Printer connect timeout (milliseconds)
    pub print_timeout_ms: u64,
    pub log_level: String,
    pub log_json: bool,
}

impl HostConfig {
    /// Defaults rooted at `work_dir`, ignoring the environment
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            printer_overrides: PrinterConfig::default(),
            paper_width: WIDTH_80MM,
            encoding: TextEncoding::thai(),
            print_timeout_ms: 5000,
            log_level: "info".into(),
            log_json: false,
        }
    }

    /// Load from environment variables
    ///
    /// Unset or unparsable variables fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(lookup("WORK_DIR").unwrap_or_else(|| DEFAULT_WORK_DIR.into()));

        for (key, role) in [
            ("PRINTER_INVOICE_K80", PrinterRole::InvoiceK80),
            ("PRINTER_INVOICE_A4", PrinterRole::InvoiceA4),
            ("PRINTER_LABEL", PrinterRole::Label),
        ] {
            if let Some(name) = lookup(key) {
                config.printer_overrides.set(role, name);
            }
        }

        if let Some(width) = lookup("PAPER_WIDTH")
            .and_then(|v| v.parse().ok())
            .filter(|w: &usize| *w > 0)
        {
            config.paper_width = width;
        }

        let code_page = lookup("THAI_CODE_PAGE")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_THAI_CODE_PAGE);
        config.encoding = lookup("TEXT_ENCODING")
            .and_then(|v| TextEncoding::parse(&v, code_page))
            .unwrap_or(TextEncoding::Thai { code_page });

        config.print_timeout_ms = lookup("PRINT_TIMEOUT_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(config.print_timeout_ms);
        config.log_level = lookup("LOG_LEVEL").unwrap_or(config.log_level);
        config.log_json = lookup("LOG_JSON")
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);

        config
    }

    /// Path of the persisted role mapping
    pub fn store_path(&self) -> PathBuf {
        self.work_dir.join("printers.json")
    }

    /// Directory for rolling log files
    pub fn log_dir(&self) -> PathBuf {
        self.work_dir.join("logs")
    }

    pub fn print_timeout(&self) -> Duration {
        Duration::from_millis(self.print_timeout_ms)
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WORK_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = HostConfig::from_lookup(lookup(&[]));
        assert_eq!(config.work_dir, PathBuf::from("./print-host"));
        assert_eq!(config.paper_width, 48);
        assert_eq!(config.encoding, TextEncoding::thai());
        assert_eq!(config.print_timeout(), Duration::from_secs(5));
        assert_eq!(config.printer_overrides, PrinterConfig::default());
        assert!(!config.log_json);
    }

    #[test]
    fn test_default_ignores_environment() {
        let config = HostConfig::default();
        assert_eq!(config.work_dir, PathBuf::from("./print-host"));
        assert_eq!(config.printer_overrides, PrinterConfig::default());
        assert_eq!(config.paper_width, WIDTH_80MM);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides() {
        let config = HostConfig::from_lookup(lookup(&[
            ("WORK_DIR", "/tmp/ph"),
            ("PRINTER_INVOICE_K80", "192.168.1.50"),
            ("PAPER_WIDTH", "32"),
            ("TEXT_ENCODING", "gbk"),
            ("PRINT_TIMEOUT_MS", "1500"),
            ("LOG_JSON", "true"),
        ]));
        assert_eq!(config.store_path(), PathBuf::from("/tmp/ph/printers.json"));
        assert_eq!(
            config.printer_overrides.printer_for(PrinterRole::InvoiceK80),
            Some("192.168.1.50")
        );
        assert_eq!(config.paper_width, 32);
        assert_eq!(config.encoding, TextEncoding::Gbk);
        assert_eq!(config.print_timeout_ms, 1500);
        assert!(config.log_json);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = HostConfig::from_lookup(lookup(&[
            ("PAPER_WIDTH", "0"),
            ("TEXT_ENCODING", "ebcdic"),
            ("THAI_CODE_PAGE", "21"),
            ("PRINT_TIMEOUT_MS", "soon"),
        ]));
        assert_eq!(config.paper_width, 48);
        assert_eq!(config.encoding, TextEncoding::Thai { code_page: 21 });
        assert_eq!(config.print_timeout_ms, 5000);
    }
}
