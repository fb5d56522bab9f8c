//! Decoded-event model shared by the bus decoders and the concatenation engine.

pub mod frame;
pub mod i2c;
pub mod spi;
pub mod uart;

pub use frame::{FrameError, RawFrame};
pub use i2c::I2cFrame;
pub use spi::SpiTransfer;
pub use uart::UartChar;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Nanoseconds from capture start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    pub fn from_micros(us: u64) -> Self {
        Timestamp(us * 1_000)
    }

    pub fn as_nanos(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeSpan {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `at`.
    pub fn instant(at: Timestamp) -> Self {
        Self { start: at, end: at }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_nanos(self.end.0.saturating_sub(self.start.0))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SampleRate(pub f64); // Hz

impl SampleRate {
    /// Span covered by the sample range `first..=last`.
    pub fn span(&self, first: u64, last: u64) -> TimeSpan {
        let ns_per_sample = 1e9 / self.0;
        TimeSpan::new(
            Timestamp((first as f64 * ns_per_sample) as u64),
            Timestamp((last as f64 * ns_per_sample) as u64),
        )
    }
}

/// One decoded low-level bus occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    /// Single-direction data byte (UART, or I2C data).
    Byte { value: u8, span: TimeSpan },
    /// I2C address byte.
    Address { value: u8, span: TimeSpan },
    /// I2C start condition.
    Start { span: TimeSpan },
    /// I2C stop condition.
    Stop { span: TimeSpan },
    /// One SPI clock byte; either side may be absent.
    Duplex {
        mosi: Option<u8>,
        miso: Option<u8>,
        span: TimeSpan,
    },
}

impl BusEvent {
    pub fn span(&self) -> TimeSpan {
        match *self {
            BusEvent::Byte { span, .. }
            | BusEvent::Address { span, .. }
            | BusEvent::Start { span }
            | BusEvent::Stop { span }
            | BusEvent::Duplex { span, .. } => span,
        }
    }
}
