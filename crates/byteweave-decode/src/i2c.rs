use crate::{BusEvent, TimeSpan, Timestamp};

/// One decoded I2C transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I2cFrame {
    pub address: u8,
    /// Direction bit: true for a read transaction.
    pub read: bool,
    pub data: Vec<u8>,
    pub acked: bool,
}

impl I2cFrame {
    /// Expand into the wire-order event sequence: start condition, address
    /// byte, data bytes, stop condition.
    ///
    /// Event spans divide `span` evenly; the last event absorbs the
    /// rounding remainder so the sequence ends exactly at `span.end`.
    pub fn events(&self, span: TimeSpan) -> Vec<BusEvent> {
        let slots = self.data.len() as u64 + 3;
        let width = (span.end.0 - span.start.0) / slots;
        let slot = |i: u64| {
            let start = Timestamp(span.start.0 + i * width);
            let end = if i + 1 == slots {
                span.end
            } else {
                Timestamp(span.start.0 + (i + 1) * width)
            };
            TimeSpan::new(start, end)
        };

        let mut events = Vec::with_capacity(self.data.len() + 3);
        events.push(BusEvent::Start { span: slot(0) });
        events.push(BusEvent::Address {
            value: self.address,
            span: slot(1),
        });
        for (i, &value) in self.data.iter().enumerate() {
            events.push(BusEvent::Byte {
                value,
                span: slot(i as u64 + 2),
            });
        }
        events.push(BusEvent::Stop {
            span: slot(slots - 1),
        });
        events
    }
}
