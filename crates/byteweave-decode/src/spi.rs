use crate::{BusEvent, TimeSpan, Timestamp};

/// One decoded SPI transfer (an enable-active run of clock bytes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpiTransfer {
    pub cpol: bool,
    pub cpha: bool,
    pub mosi: Vec<u8>,
    pub miso: Vec<u8>,
}

impl SpiTransfer {
    /// SPI mode number (CPOL << 1 | CPHA).
    pub fn mode(&self) -> u8 {
        (self.cpol as u8) << 1 | self.cpha as u8
    }

    /// Expand into one duplex event per clock byte. The shorter side is
    /// absent past its end. Event spans divide `span` evenly, the last one
    /// absorbing the rounding remainder.
    pub fn events(&self, span: TimeSpan) -> Vec<BusEvent> {
        let len = self.mosi.len().max(self.miso.len());
        if len == 0 {
            return Vec::new();
        }
        let slots = len as u64;
        let width = (span.end.0 - span.start.0) / slots;
        (0..len)
            .map(|i| {
                let start = Timestamp(span.start.0 + i as u64 * width);
                let end = if i + 1 == len {
                    span.end
                } else {
                    Timestamp(span.start.0 + (i as u64 + 1) * width)
                };
                BusEvent::Duplex {
                    mosi: self.mosi.get(i).copied(),
                    miso: self.miso.get(i).copied(),
                    span: TimeSpan::new(start, end),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_number() {
        let transfer = SpiTransfer {
            cpol: true,
            cpha: false,
            mosi: Vec::new(),
            miso: Vec::new(),
        };
        assert_eq!(transfer.mode(), 2);
    }

    #[test]
    fn pads_the_shorter_side() {
        let transfer = SpiTransfer {
            cpol: false,
            cpha: false,
            mosi: vec![0x10, 0x11, 0x12],
            miso: vec![0x20],
        };
        let events = transfer.events(TimeSpan::new(Timestamp(0), Timestamp(3_000)));

        assert_eq!(events.len(), 3);
        assert!(matches!(
            events[0],
            BusEvent::Duplex {
                mosi: Some(0x10),
                miso: Some(0x20),
                ..
            }
        ));
        assert!(matches!(
            events[2],
            BusEvent::Duplex {
                mosi: Some(0x12),
                miso: None,
                ..
            }
        ));
        assert_eq!(events[2].span().end, Timestamp(3_000));
    }

    #[test]
    fn empty_transfer_yields_nothing() {
        let transfer = SpiTransfer {
            cpol: false,
            cpha: true,
            mosi: Vec::new(),
            miso: Vec::new(),
        };
        assert!(transfer
            .events(TimeSpan::instant(Timestamp(42)))
            .is_empty());
    }
}
