//! Code page encoding for thermal printers
//!
//! Thermal printers do not understand UTF-8. Text has to be converted to the
//! code page the printer is switched to:
//! - GBK for Chinese printers (FS & / FS C 1)
//! - Windows-874 (TIS-620) for Thai printers (ESC t n)
//!
//! This module provides utilities for:
//! - Calculating printed column widths
//! - Truncating/padding strings to column widths
//! - Converting UTF-8 text to the printer code page

/// Epson "Thai Character Code 18" table
pub const DEFAULT_THAI_CODE_PAGE: u8 = 26;

/// Text encoding used by the target printer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextEncoding {
    /// GBK with Chinese mode enabled
    #[default]
    Gbk,
    /// Windows-874, selected with `ESC t code_page`
    Thai { code_page: u8 },
}

impl TextEncoding {
    /// Thai encoding with the default code page table
    pub fn thai() -> Self {
        Self::Thai {
            code_page: DEFAULT_THAI_CODE_PAGE,
        }
    }

    /// Parse from a config value ("gbk" | "thai")
    pub fn parse(value: &str, thai_code_page: u8) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gbk" | "chinese" => Some(Self::Gbk),
            "thai" | "tis-620" | "windows-874" => Some(Self::Thai {
                code_page: thai_code_page,
            }),
            _ => None,
        }
    }

    /// Printed width of a single character in columns
    pub fn char_width(&self, c: char) -> usize {
        match self {
            Self::Gbk => {
                let mut tmp = [0u8; 4];
                let (cow, _, _) = encoding_rs::GBK.encode(c.encode_utf8(&mut tmp));
                cow.len()
            }
            Self::Thai { .. } => {
                if is_thai_combining(c) {
                    0
                } else {
                    1
                }
            }
        }
    }

    /// Printed width of a string in columns
    pub fn width(&self, s: &str) -> usize {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Truncate a string to fit within a column width
    ///
    /// Combining marks following a kept base character are kept with it.
    pub fn truncate(&self, s: &str, max_width: usize) -> String {
        let mut width = 0;
        let mut result = String::new();
        for c in s.chars() {
            let char_width = self.char_width(c);
            if width + char_width > max_width {
                break;
            }
            result.push(c);
            width += char_width;
        }
        result
    }

    /// Pad a string to a specific column width
    ///
    /// If the string is longer than the width, it will be truncated.
    pub fn pad(&self, s: &str, width: usize, align_right: bool) -> String {
        let current_width = self.width(s);
        if current_width >= width {
            return self.truncate(s, width);
        }
        let spaces = width - current_width;
        if align_right {
            format!("{}{}", " ".repeat(spaces), s)
        } else {
            format!("{}{}", s, " ".repeat(spaces))
        }
    }

    /// Encode printable text for the printer code page
    ///
    /// ASCII (including `\n`) passes through unchanged. Characters the code
    /// page cannot represent print as `?`. With GBK, a Euro sign is printed by
    /// briefly switching to PC858.
    pub fn encode_text(&self, s: &str) -> Vec<u8> {
        let mut out = Vec::with_capacity(s.len());
        match self {
            Self::Gbk => encode_gbk(s, &mut out),
            Self::Thai { .. } => encode_chars(encoding_rs::WINDOWS_874, s, &mut out),
        }
        out
    }

    /// Encode data bytes (e.g. a QR payload) without any mode switching
    pub fn encode_data(&self, s: &str) -> Vec<u8> {
        let mut out = Vec::with_capacity(s.len());
        encode_chars(self.codec(), s, &mut out);
        out
    }

    /// Commands that switch the printer into this encoding
    ///
    /// Must follow every ESC @, which resets the printer to its default table.
    pub(crate) fn select_sequence(&self) -> Vec<u8> {
        match self {
            // FS & (enable Chinese mode), FS C 1 (select GBK)
            Self::Gbk => vec![0x1C, 0x26, 0x1C, 0x43, 0x01],
            // FS . (cancel Chinese mode), ESC t n (select code table)
            Self::Thai { code_page } => vec![0x1C, 0x2E, 0x1B, 0x74, *code_page],
        }
    }

    /// Commands emitted at the end of a job
    pub(crate) fn exit_sequence(&self) -> Vec<u8> {
        match self {
            // FS . (cancel Chinese mode)
            Self::Gbk => vec![0x1C, 0x2E],
            Self::Thai { .. } => Vec::new(),
        }
    }

    fn codec(&self) -> &'static encoding_rs::Encoding {
        match self {
            Self::Gbk => encoding_rs::GBK,
            Self::Thai { .. } => encoding_rs::WINDOWS_874,
        }
    }
}

/// GBK has no printable Euro sign: switch to PC858 for it and back to Chinese mode
fn encode_gbk(s: &str, out: &mut Vec<u8>) {
    let mut parts = s.split('€').peekable();
    while let Some(part) = parts.next() {
        encode_chars(encoding_rs::GBK, part, out);
        if parts.peek().is_some() {
            // Exit Chinese -> PC858 -> Euro -> Enter Chinese
            out.extend_from_slice(&[0x1C, 0x2E, 0x1B, 0x74, 19, 0xD5, 0x1C, 0x26]);
        }
    }
}

/// Encode char by char so an unmappable character becomes a single '?'
fn encode_chars(codec: &'static encoding_rs::Encoding, s: &str, out: &mut Vec<u8>) {
    if s.is_ascii() {
        out.extend_from_slice(s.as_bytes());
        return;
    }
    let mut tmp = [0u8; 4];
    for c in s.chars() {
        let (bytes, _, had_errors) = codec.encode(c.encode_utf8(&mut tmp));
        if had_errors {
            out.push(b'?');
        } else {
            out.extend_from_slice(&bytes);
        }
    }
}

/// Thai vowel and tone marks that stack on the previous character
fn is_thai_combining(c: char) -> bool {
    matches!(c, '\u{0E31}' | '\u{0E34}'..='\u{0E3A}' | '\u{0E47}'..='\u{0E4E}')
}
