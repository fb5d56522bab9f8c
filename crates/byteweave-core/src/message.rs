//! The in-flight message accumulator and the finished record it renders to.

use byteweave_decode::{TimeSpan, Timestamp};
use serde::Serialize;

use crate::config::DisplayFormat;

/// The single in-progress message under construction.
///
/// Text fields hold one char per absorbed byte; hex fields hold
/// space-separated two-digit uppercase pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Accumulator {
    pub(crate) span: TimeSpan,
    pub(crate) address: Option<String>,
    pub(crate) text: String,
    pub(crate) hex: String,
    pub(crate) mosi_text: String,
    pub(crate) mosi_hex: String,
    pub(crate) miso_text: String,
    pub(crate) miso_hex: String,
}

impl Accumulator {
    pub(crate) fn new(span: TimeSpan) -> Self {
        Self {
            span,
            address: None,
            text: String::new(),
            hex: String::new(),
            mosi_text: String::new(),
            mosi_hex: String::new(),
            miso_text: String::new(),
            miso_hex: String::new(),
        }
    }

    pub(crate) fn set_address(&mut self, value: u8) {
        self.address = Some(format!("{value:#x}"));
    }

    pub(crate) fn push_data(&mut self, value: u8) {
        self.text.push(value as char);
        push_hex(&mut self.hex, value);
    }

    pub(crate) fn push_duplex(&mut self, mosi: Option<u8>, miso: Option<u8>) {
        if let Some(value) = mosi {
            self.mosi_text.push(value as char);
            push_hex(&mut self.mosi_hex, value);
        }
        if let Some(value) = miso {
            self.miso_text.push(value as char);
            push_hex(&mut self.miso_hex, value);
        }
    }

    pub(crate) fn advance_end(&mut self, end: Timestamp) {
        self.span.end = end;
    }

    /// Whether any byte has been absorbed on any channel.
    pub(crate) fn has_content(&self) -> bool {
        !(self.text.is_empty() && self.mosi_text.is_empty() && self.miso_text.is_empty())
    }

    pub(crate) fn is_empty(&self) -> bool {
        !self.has_content() && self.address.is_none()
    }

    /// Render into a finished record.
    ///
    /// Deterministic: rendering the same accumulator twice yields identical
    /// records.
    pub(crate) fn render(&self, format: DisplayFormat, delimiter: Option<char>) -> MessageRecord {
        let (onedir, mosi, miso) = match format {
            DisplayFormat::Hex => (&self.hex, &self.mosi_hex, &self.miso_hex),
            DisplayFormat::Ascii => (&self.text, &self.mosi_text, &self.miso_text),
        };

        let mut formatted = String::new();
        if let Some(address) = &self.address {
            formatted.push_str("address: ");
            formatted.push_str(address);
            formatted.push_str("; ");
        }
        formatted.push_str(trim_delimiter(onedir, format, delimiter));
        if !mosi.is_empty() || !miso.is_empty() {
            formatted.push_str("MOSI: ");
            formatted.push_str(mosi);
            formatted.push_str(" MISO: ");
            formatted.push_str(miso);
        }

        MessageRecord {
            span: self.span,
            formatted,
            address: self.address.clone(),
            text: populated(&self.text),
            hex: populated(&self.hex),
            mosi_text: populated(&self.mosi_text),
            mosi_hex: populated(&self.mosi_hex),
            miso_text: populated(&self.miso_text),
            miso_hex: populated(&self.miso_hex),
        }
    }
}

fn push_hex(field: &mut String, value: u8) {
    if !field.is_empty() {
        field.push(' ');
    }
    field.push_str(&format!("{value:02X}"));
}

/// The configured delimiter terminates a message; it stays in the raw
/// fields but is not echoed in the one-line rendering.
fn trim_delimiter<'a>(
    payload: &'a str,
    format: DisplayFormat,
    delimiter: Option<char>,
) -> &'a str {
    let Some(delim) = delimiter else {
        return payload;
    };
    match format {
        DisplayFormat::Ascii => payload.strip_suffix(delim).unwrap_or(payload),
        DisplayFormat::Hex => {
            let suffix = format!("{:02X}", delim as u32);
            match payload.strip_suffix(suffix.as_str()) {
                Some(rest) => rest.trim_end(),
                None => payload,
            }
        }
    }
}

/// A finished, immutable message. Only populated fields serialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRecord {
    pub span: TimeSpan,
    pub formatted: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "str", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
    #[serde(rename = "mosi_str", skip_serializing_if = "Option::is_none")]
    pub mosi_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mosi_hex: Option<String>,
    #[serde(rename = "miso_str", skip_serializing_if = "Option::is_none")]
    pub miso_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub miso_hex: Option<String>,
}

impl MessageRecord {
    /// Bar text for display: the configured prefix plus the braced body.
    pub fn display(&self, prefix: &str) -> String {
        format!("{prefix}{{{}}}", self.formatted)
    }
}

fn populated(field: &str) -> Option<String> {
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acc() -> Accumulator {
        Accumulator::new(TimeSpan::new(Timestamp(0), Timestamp(1_000)))
    }

    #[test]
    fn hex_bytes_are_space_separated() {
        let mut acc = acc();
        acc.push_data(0x48);
        acc.push_data(0x69);
        assert_eq!(acc.hex, "48 69");
        assert_eq!(acc.text, "Hi");
    }

    #[test]
    fn address_formats_lowercase_with_prefix() {
        let mut acc = acc();
        acc.set_address(0x50);
        assert_eq!(acc.address.as_deref(), Some("0x50"));
        acc.set_address(0xAB);
        assert_eq!(acc.address.as_deref(), Some("0xab"));
    }

    #[test]
    fn render_hex_with_address() {
        let mut acc = acc();
        acc.set_address(0x50);
        acc.push_data(0x01);
        let record = acc.render(DisplayFormat::Hex, None);
        assert_eq!(record.formatted, "address: 0x50; 01");
        assert_eq!(record.hex.as_deref(), Some("01"));
        assert_eq!(record.mosi_hex, None);
    }

    #[test]
    fn render_duplex_labels() {
        let mut acc = acc();
        acc.push_duplex(Some(0x10), Some(0x20));
        let record = acc.render(DisplayFormat::Hex, None);
        assert_eq!(record.formatted, "MOSI: 10 MISO: 20");
        assert_eq!(record.text, None);
    }

    #[test]
    fn render_one_sided_duplex_keeps_both_labels() {
        let mut acc = acc();
        acc.push_duplex(None, Some(0x20));
        let record = acc.render(DisplayFormat::Hex, None);
        assert_eq!(record.formatted, "MOSI:  MISO: 20");
        assert_eq!(record.mosi_hex, None);
        assert_eq!(record.miso_hex.as_deref(), Some("20"));
    }

    #[test]
    fn empty_fields_never_reach_the_rendering() {
        let mut acc = acc();
        acc.push_data(b'x');
        let record = acc.render(DisplayFormat::Ascii, None);
        assert!(!record.formatted.contains("address:"));
        assert!(!record.formatted.contains("MOSI"));
        assert_eq!(record.address, None);
        assert_eq!(record.mosi_text, None);
        assert_eq!(record.miso_hex, None);
    }

    #[test]
    fn trailing_delimiter_is_trimmed_from_the_rendering_only() {
        let mut acc = acc();
        acc.push_data(b'H');
        acc.push_data(b'i');
        acc.push_data(b'\n');

        let ascii = acc.render(DisplayFormat::Ascii, Some('\n'));
        assert_eq!(ascii.formatted, "Hi");
        assert_eq!(ascii.text.as_deref(), Some("Hi\n"));

        let hex = acc.render(DisplayFormat::Hex, Some('\n'));
        assert_eq!(hex.formatted, "48 69");
        assert_eq!(hex.hex.as_deref(), Some("48 69 0A"));
    }

    #[test]
    fn lone_delimiter_renders_empty() {
        let mut acc = acc();
        acc.push_data(b'\n');
        let record = acc.render(DisplayFormat::Hex, Some('\n'));
        assert_eq!(record.formatted, "");
        assert_eq!(record.hex.as_deref(), Some("0A"));
    }

    #[test]
    fn interior_delimiter_is_untouched() {
        let mut acc = acc();
        acc.push_data(b'a');
        acc.push_data(b'\n');
        acc.push_data(b'b');
        let record = acc.render(DisplayFormat::Ascii, Some('\n'));
        assert_eq!(record.formatted, "a\nb");
    }

    #[test]
    fn rendering_is_idempotent() {
        let mut acc = acc();
        acc.set_address(0x3c);
        acc.push_data(0xDE);
        acc.push_duplex(Some(0x01), None);
        let first = acc.render(DisplayFormat::Hex, Some(';'));
        let second = acc.render(DisplayFormat::Hex, Some(';'));
        assert_eq!(first, second);
    }

    #[test]
    fn display_wraps_in_braces_with_prefix() {
        let mut acc = acc();
        acc.push_data(b'H');
        acc.push_data(b'i');
        let record = acc.render(DisplayFormat::Ascii, None);
        assert_eq!(record.display(""), "{Hi}");
        assert_eq!(record.display("uart "), "uart {Hi}");
    }
}
