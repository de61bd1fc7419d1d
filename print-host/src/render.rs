//! Turns a print payload into printer bytes

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bridge_printer::{EscPosBuilder, TextEncoding};
use shared::{Align, PrintContent, PrintLine, SeparatorStyle, TextSize};
use tracing::instrument;

use crate::error::{HostError, HostResult};

/// Upper bound on `copies` for a single request
pub const MAX_COPIES: u32 = 99;

/// Renders [`PrintContent`] for a given paper width and code page
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    width: usize,
    encoding: TextEncoding,
}

impl Renderer {
    pub fn new(width: usize, encoding: TextEncoding) -> Self {
        Self { width, encoding }
    }

    /// Render `copies` copies of the content
    #[instrument(skip(self, content))]
    pub fn render(&self, content: &PrintContent, copies: u32) -> HostResult<Vec<u8>> {
        if copies == 0 || copies > MAX_COPIES {
            return Err(HostError::InvalidPayload(format!(
                "copies must be between 1 and {}, got {}",
                MAX_COPIES, copies
            )));
        }

        let single = match content {
            PrintContent::Raw { data } => STANDARD
                .decode(data.trim())
                .map_err(|e| HostError::InvalidPayload(format!("raw data is not base64: {}", e)))?,
            PrintContent::Lines {
                lines,
                cut,
                open_drawer,
            } => self.render_lines(lines, *cut, *open_drawer)?,
        };

        if single.is_empty() {
            return Err(HostError::InvalidPayload("nothing to print".into()));
        }

        Ok(single.repeat(copies as usize))
    }

    fn render_lines(&self, lines: &[PrintLine], cut: bool, open_drawer: bool) -> HostResult<Vec<u8>> {
        let mut b = EscPosBuilder::with_encoding(self.width, self.encoding);

        for line in lines {
            match line {
                PrintLine::Text {
                    text,
                    align,
                    bold,
                    size,
                } => {
                    match align {
                        Align::Left => b.left(),
                        Align::Center => b.center(),
                        Align::Right => b.right(),
                    };
                    if *bold {
                        b.bold();
                    }
                    match size {
                        TextSize::Normal => {}
                        TextSize::DoubleHeight => {
                            b.double_height();
                        }
                        TextSize::DoubleWidth => {
                            b.double_width();
                        }
                        TextSize::Double => {
                            b.double_size();
                        }
                    }
                    b.line(text);
                    if *size != TextSize::Normal {
                        b.reset_size();
                    }
                    if *bold {
                        b.bold_off();
                    }
                    if *align != Align::Left {
                        b.left();
                    }
                }
                PrintLine::Pair { left, right } => {
                    b.line_lr(left, right);
                }
                PrintLine::Separator { style } => {
                    match style {
                        SeparatorStyle::Single => b.sep_single(),
                        SeparatorStyle::Double => b.sep_double(),
                        SeparatorStyle::Underscore => b.sep_underscore(),
                    };
                }
                PrintLine::Feed { lines } => {
                    b.feed(*lines);
                }
                PrintLine::QrCode { data, size } => {
                    b.center();
                    b.qr_code(data, *size)?;
                    b.newline().left();
                }
            }
        }

        if open_drawer {
            b.open_drawer();
        }
        if cut {
            b.cut_feed(3);
        }

        Ok(b.build())
    }
}
