//! ESC/POS command builder
//!
//! Provides a fluent API for building ESC/POS print data.

use crate::encoding::TextEncoding;
use crate::error::{PrintError, PrintResult};

/// Characters per line on 58mm paper
pub const WIDTH_58MM: usize = 32;
/// Characters per line on 80mm paper
pub const WIDTH_80MM: usize = 48;

/// Largest payload a QR code symbol can store (numeric mode, version 40)
pub const QR_MAX_DATA: usize = 7089;

/// ESC/POS command builder
///
/// Builds ESC/POS byte sequences for thermal printers. Text is converted to
/// the configured [`TextEncoding`] as it is written; command bytes are never
/// re-encoded.
pub struct EscPosBuilder {
    buf: Vec<u8>,
    width: usize,
    encoding: TextEncoding,
}

impl EscPosBuilder {
    /// Create a builder for `width` characters per line
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 48 characters
    pub fn with_encoding(width: usize, encoding: TextEncoding) -> Self {
        let mut buf = Vec::with_capacity(4096);
        // Initialize printer (ESC @), then select the code page
        buf.extend_from_slice(&[0x1B, 0x40]);
        buf.extend_from_slice(&encoding.select_sequence());
        Self {
            buf,
            width,
            encoding,
        }
    }

    // === Text Output ===

    /// Write text in the printer code page
    pub fn text(&mut self, s: &str) -> &mut Self {
        let encoded = self.encoding.encode_text(s);
        self.buf.extend_from_slice(&encoded);
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.text(s);
        self.buf.push(b'\n');
        self
    }

    /// Write empty line
    pub fn newline(&mut self) -> &mut Self {
        self.buf.push(b'\n');
        self
    }

    /// Write multiple empty lines
    pub fn feed(&mut self, lines: u8) -> &mut Self {
        // ESC d n - Print and feed n lines
        self.buf.extend_from_slice(&[0x1B, 0x64, lines]);
        self
    }

    // === Alignment ===

    /// Align text to center
    pub fn center(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x01]);
        self
    }

    /// Align text to left (default)
    pub fn left(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x00]);
        self
    }

    /// Align text to right
    pub fn right(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x02]);
        self
    }

    // === Text Style ===

    /// Enable bold text
    pub fn bold(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x01]);
        self
    }

    /// Disable bold text
    pub fn bold_off(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x00]);
        self
    }

    /// Double width and height
    pub fn double_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x11]);
        self
    }

    /// Double height only
    pub fn double_height(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x01]);
        self
    }

    /// Double width only
    pub fn double_width(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x10]);
        self
    }

    /// Reset to normal size
    pub fn reset_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x00]);
        self
    }

    // === Separators ===

    /// Print a line of '=' characters
    pub fn sep_double(&mut self) -> &mut Self {
        self.line(&"=".repeat(self.width))
    }

    /// Print a line of '-' characters
    pub fn sep_single(&mut self) -> &mut Self {
        self.line(&"-".repeat(self.width))
    }

    /// Print a line of '_' characters
    pub fn sep_underscore(&mut self) -> &mut Self {
        self.line(&"_".repeat(self.width))
    }

    // === Layout Helpers ===

    /// Print left and right text on the same line
    ///
    /// Left text is left-aligned, right text is right-aligned,
    /// with spaces filling the gap. Widths are measured in printed columns
    /// of the configured encoding.
    pub fn line_lr(&mut self, left: &str, right: &str) -> &mut Self {
        let lw = self.encoding.width(left);
        let rw = self.encoding.width(right);

        if lw + rw >= self.width {
            // Too long, just print with space
            self.text(left);
            self.text(" ");
            self.line(right);
        } else {
            let spaces = self.width - lw - rw;
            self.text(left);
            self.text(&" ".repeat(spaces));
            self.line(right);
        }
        self
    }

    // === Paper Control ===

    /// Full cut after feeding n lines (GS V 66 n)
    ///
    /// The printer manages the cutter-to-head distance itself, so the next
    /// ticket starts with less wasted paper than separate feed + cut.
    pub fn cut_feed(&mut self, lines: u8) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x56, 0x42, lines]);
        self
    }

    // === Cash Drawer ===

    /// Open cash drawer (pin 2)
    pub fn open_drawer(&mut self) -> &mut Self {
        // ESC p m t1 t2 - Generate pulse on pin m
        self.buf.extend_from_slice(&[0x1B, 0x70, 0x00, 25, 250]);
        self
    }

    // === QR Code ===

    /// Print a QR code
    ///
    /// Size: 1-16 (module size in dots). The payload is stored in the printer
    /// code page and must be 1..=[`QR_MAX_DATA`] bytes once encoded.
    pub fn qr_code(&mut self, data: &str, size: u8) -> PrintResult<&mut Self> {
        let data_bytes = self.encoding.encode_data(data);
        if data_bytes.is_empty() {
            return Err(PrintError::InvalidData("QR data is empty".into()));
        }
        if data_bytes.len() > QR_MAX_DATA {
            return Err(PrintError::InvalidData(format!(
                "QR data is {} bytes, limit is {}",
                data_bytes.len(),
                QR_MAX_DATA
            )));
        }
        let size = size.clamp(1, 16);

        // Function 165: Select model (Model 2)
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, 0x04, 0x00, 0x31, 0x41, 0x32, 0x00]);

        // Function 167: Set module size
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x43, size]);

        // Function 169: Set error correction (L)
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x45, 0x30]);

        // Function 180: Store data (pL pH count the 3 header bytes too)
        let len = data_bytes.len() + 3;
        let p_l = (len & 0xFF) as u8;
        let p_h = (len >> 8) as u8;
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, p_l, p_h, 0x31, 0x50, 0x30]);
        self.buf.extend_from_slice(&data_bytes);

        // Function 181: Print
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x51, 0x30]);

        Ok(self)
    }

    // === Build ===

    /// Finish the job and return the printer bytes
    pub fn build(mut self) -> Vec<u8> {
        let exit = self.encoding.exit_sequence();
        self.buf.extend_from_slice(&exit);
        self.buf
    }
}
