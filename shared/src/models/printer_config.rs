//! Printer role configuration

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logical printer purpose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrinterRole {
    /// Compact thermal invoice receipts (80mm)
    #[serde(rename = "invoiceK80")]
    InvoiceK80,
    /// Full-page invoice documents
    #[serde(rename = "invoiceA4")]
    InvoiceA4,
    /// Label printing
    #[serde(rename = "label")]
    Label,
}

impl PrinterRole {
    pub const ALL: [PrinterRole; 3] = [Self::InvoiceK80, Self::InvoiceA4, Self::Label];

    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvoiceK80 => "invoiceK80",
            Self::InvoiceA4 => "invoiceA4",
            Self::Label => "label",
        }
    }
}

impl fmt::Display for PrinterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrinterRole {
    type Err = String;

    /// Accepts wire names ("invoiceK80") and CLI names ("invoice-k80", "k80")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "invoicek80" | "k80" | "printinvoicek80" => Ok(Self::InvoiceK80),
            "invoicea4" | "a4" | "printinvoicea4" => Ok(Self::InvoiceA4),
            "label" | "printlabel" => Ok(Self::Label),
            _ => Err(format!("unknown printer role: {}", s)),
        }
    }
}

/// Which named printer serves each role
///
/// Every field is always a string; an empty string means the role is unset.
/// Missing or `null` fields deserialize to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrinterConfig {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub print_invoice_k80: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub print_invoice_a4: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub print_label: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl PrinterConfig {
    /// Printer identifier for a role, `None` when unset
    pub fn printer_for(&self, role: PrinterRole) -> Option<&str> {
        let name = match role {
            PrinterRole::InvoiceK80 => &self.print_invoice_k80,
            PrinterRole::InvoiceA4 => &self.print_invoice_a4,
            PrinterRole::Label => &self.print_label,
        };
        let name = name.trim();
        if name.is_empty() { None } else { Some(name) }
    }

    /// Assign a printer to a role (empty string clears it)
    pub fn set(&mut self, role: PrinterRole, name: impl Into<String>) {
        let slot = match role {
            PrinterRole::InvoiceK80 => &mut self.print_invoice_k80,
            PrinterRole::InvoiceA4 => &mut self.print_invoice_a4,
            PrinterRole::Label => &mut self.print_label,
        };
        *slot = name.into();
    }

    /// Overlay non-empty fields of `other` onto this config
    pub fn merge(&mut self, other: &PrinterConfig) {
        for role in PrinterRole::ALL {
            if let Some(name) = other.printer_for(role) {
                self.set(role, name);
            }
        }
    }
}
