//! The event-to-message state machine.
//!
//! One accumulator lives at a time. A boundary comes from a repeated
//! address byte, a stop condition, an inter-event gap over the timeout, or
//! a configured delimiter byte; each emits at most one record per event.

use std::time::Duration;

use byteweave_decode::{BusEvent, TimeSpan};
use log::debug;

use crate::classify::{classify, EventClass};
use crate::config::{ConcatConfig, DisplayFormat};
use crate::message::{Accumulator, MessageRecord};

pub struct Concatenator {
    delimiter: Option<char>,
    timeout: Duration,
    format: DisplayFormat,
    current: Option<Accumulator>,
}

impl Concatenator {
    pub fn new(cfg: &ConcatConfig) -> Self {
        Self {
            delimiter: cfg.delimiter.as_char(),
            timeout: cfg.effective_timeout(),
            format: cfg.display_format,
            current: None,
        }
    }

    /// Feed one event; at most one record comes out.
    pub fn push(&mut self, event: &BusEvent) -> Option<MessageRecord> {
        let span = event.span();
        let fresh = self.current.is_none();
        let mut acc = self
            .current
            .take()
            .unwrap_or_else(|| Accumulator::new(span));

        match classify(event) {
            EventClass::Start => {
                self.current = Some(acc);
                None
            }
            EventClass::Address(value) => {
                if acc.has_content() {
                    debug!("address repeat, flushing current message");
                    let record = acc.render(self.format, self.delimiter);
                    let mut next = Accumulator::new(span);
                    next.set_address(value);
                    self.current = Some(next);
                    Some(record)
                } else {
                    acc.set_address(value);
                    self.current = Some(acc);
                    None
                }
            }
            EventClass::Stop => {
                if acc.has_content() {
                    debug!("stop condition, flushing current message");
                    Some(acc.render(self.format, self.delimiter))
                } else {
                    None
                }
            }
            EventClass::Data(value) => {
                if !fresh && self.gap_exceeded(&acc, span) {
                    debug!("gap over {:?}, flushing current message", self.timeout);
                    let record = acc.render(self.format, self.delimiter);
                    let mut next = Accumulator::new(span);
                    next.push_data(value);
                    self.current = Some(next);
                    // One record per event: the delimiter rule is not
                    // evaluated again after a gap flush.
                    return Some(record);
                }
                acc.push_data(value);
                acc.advance_end(span.end);
                if self.delimiter == Some(value as char) {
                    debug!("delimiter byte, flushing current message");
                    return Some(acc.render(self.format, self.delimiter));
                }
                self.current = Some(acc);
                None
            }
            EventClass::Duplex { mosi, miso } => {
                if !fresh && self.gap_exceeded(&acc, span) {
                    debug!("gap over {:?}, flushing current message", self.timeout);
                    let record = acc.render(self.format, self.delimiter);
                    let mut next = Accumulator::new(span);
                    next.push_duplex(mosi, miso);
                    self.current = Some(next);
                    return Some(record);
                }
                acc.push_duplex(mosi, miso);
                acc.advance_end(span.end);
                self.current = Some(acc);
                None
            }
        }
    }

    /// End-of-stream flush, driven by the consumer.
    pub fn finish(&mut self) -> Option<MessageRecord> {
        let acc = self.current.take()?;
        if acc.is_empty() {
            return None;
        }
        debug!("end of stream, flushing current message");
        Some(acc.render(self.format, self.delimiter))
    }

    fn gap_exceeded(&self, acc: &Accumulator, span: TimeSpan) -> bool {
        // An exactly-equal gap keeps the message together.
        (span.start.as_nanos() as u128)
            > acc.span.end.as_nanos() as u128 + self.timeout.as_nanos()
    }
}
