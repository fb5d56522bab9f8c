use crate::{BusEvent, TimeSpan};

/// One decoded UART character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartChar {
    pub byte: u8,
    pub parity_ok: bool,
}

impl UartChar {
    pub fn event(&self, span: TimeSpan) -> BusEvent {
        BusEvent::Byte {
            value: self.byte,
            span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Timestamp;

    #[test]
    fn carries_the_byte_through() {
        let ch = UartChar {
            byte: b'H',
            parity_ok: true,
        };
        let span = TimeSpan::new(Timestamp(0), Timestamp(100));
        assert_eq!(ch.event(span), BusEvent::Byte { value: b'H', span });
    }
}
