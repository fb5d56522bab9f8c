use std::str::FromStr;
use std::time::Duration;

/// Fallback packet gap applied when the configured timeout is unset or zero.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_micros(500);

/// Message delimiter choices offered by the configuration surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    None,
    #[default]
    NewLine,
    Null,
    Space,
    Semicolon,
    Tab,
    /// An arbitrary delimiter byte.
    Custom(char),
}

impl Delimiter {
    pub fn as_char(&self) -> Option<char> {
        match self {
            Delimiter::None => None,
            Delimiter::NewLine => Some('\n'),
            Delimiter::Null => Some('\0'),
            Delimiter::Space => Some(' '),
            Delimiter::Semicolon => Some(';'),
            Delimiter::Tab => Some('\t'),
            Delimiter::Custom(c) => Some(*c),
        }
    }
}

impl FromStr for Delimiter {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "none" => Self::None,
            "newline" => Self::NewLine,
            "null" => Self::Null,
            "space" => Self::Space,
            "semicolon" => Self::Semicolon,
            "tab" => Self::Tab,
            // Unknown labels fall back to the newline delimiter.
            _ => Self::NewLine,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayFormat {
    Ascii,
    #[default]
    Hex,
}

impl FromStr for DisplayFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "ascii" => Self::Ascii,
            "hex" => Self::Hex,
            _ => Self::Hex,
        })
    }
}

/// Read-only engine configuration, fixed for the lifetime of a run.
#[derive(Debug, Clone, Default)]
pub struct ConcatConfig {
    pub delimiter: Delimiter,
    /// Maximum gap between adjacent events of one message; zero means unset.
    pub timeout: Duration,
    pub display_format: DisplayFormat,
    /// Literal prefix applied to every displayed record by the consumer.
    pub prefix: String,
}

impl ConcatConfig {
    /// The configured timeout, substituting [`DEFAULT_TIMEOUT`] when unset.
    pub fn effective_timeout(&self) -> Duration {
        if self.timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            self.timeout
        }
    }
}
