//! Print request payload
//!
//! ```json
//! {
//!   "role": "invoiceK80",
//!   "copies": 1,
//!   "content": {
//!     "type": "lines",
//!     "lines": [
//!       { "type": "text", "text": "ใบเสร็จรับเงิน", "align": "center", "size": "double" },
//!       { "type": "separator" },
//!       { "type": "pair", "left": "รวม", "right": "120.00" }
//!     ]
//!   }
//! }
//! ```

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use super::PrinterRole;

/// One print job
///
/// The target printer is `printer_name` when given, otherwise the printer
/// configured for `role`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<PrinterRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub printer_name: Option<String>,
    #[serde(default = "default_copies")]
    pub copies: u32,
    pub content: PrintContent,
}

fn default_copies() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

impl PrintRequest {
    /// Print to the printer configured for a role
    pub fn for_role(role: PrinterRole, content: PrintContent) -> Self {
        Self {
            role: Some(role),
            printer_name: None,
            copies: 1,
            content,
        }
    }

    /// Print to an explicitly named printer
    pub fn for_printer(name: impl Into<String>, content: PrintContent) -> Self {
        Self {
            role: None,
            printer_name: Some(name.into()),
            copies: 1,
            content,
        }
    }

    pub fn with_copies(mut self, copies: u32) -> Self {
        self.copies = copies;
        self
    }
}

/// What to print
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PrintContent {
    /// Pre-rendered printer data, base64 encoded, sent unchanged
    Raw { data: String },
    /// Structured lines rendered to ESC/POS by the host
    Lines {
        lines: Vec<PrintLine>,
        #[serde(default = "default_true")]
        cut: bool,
        #[serde(default, rename = "openDrawer")]
        open_drawer: bool,
    },
}

impl PrintContent {
    /// Raw content from bytes
    pub fn raw(bytes: &[u8]) -> Self {
        Self::Raw {
            data: STANDARD.encode(bytes),
        }
    }

    /// Line content with a trailing cut
    pub fn lines(lines: Vec<PrintLine>) -> Self {
        Self::Lines {
            lines,
            cut: true,
            open_drawer: false,
        }
    }

    /// Plain text lines, one [`PrintLine::Text`] per line
    pub fn text<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::lines(lines.into_iter().map(PrintLine::text).collect())
    }
}

/// Horizontal alignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Character size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextSize {
    #[default]
    Normal,
    DoubleHeight,
    DoubleWidth,
    Double,
}

/// Separator line character
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SeparatorStyle {
    #[default]
    Single,
    Double,
    Underscore,
}

fn default_qr_size() -> u8 {
    6
}

/// One rendered line (or block) of a print job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PrintLine {
    Text {
        text: String,
        #[serde(default)]
        align: Align,
        #[serde(default)]
        bold: bool,
        #[serde(default)]
        size: TextSize,
    },
    /// Left text and right text on one line
    Pair { left: String, right: String },
    Separator {
        #[serde(default)]
        style: SeparatorStyle,
    },
    Feed { lines: u8 },
    QrCode {
        data: String,
        #[serde(default = "default_qr_size")]
        size: u8,
    },
}

impl PrintLine {
    /// Left-aligned normal text
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            align: Align::Left,
            bold: false,
            size: TextSize::Normal,
        }
    }

    pub fn pair(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::Pair {
            left: left.into(),
            right: right.into(),
        }
    }
}
