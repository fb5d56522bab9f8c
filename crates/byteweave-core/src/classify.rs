use byteweave_decode::BusEvent;

/// Shape of one incoming event, carrying the payload the accumulator needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventClass {
    /// Single-direction data byte.
    Data(u8),
    Address(u8),
    Start,
    Stop,
    Duplex { mosi: Option<u8>, miso: Option<u8> },
}

/// Determine an event's shape. Total over the event model; frames that do
/// not map onto it are rejected earlier, at the wire bridge.
pub fn classify(event: &BusEvent) -> EventClass {
    match *event {
        BusEvent::Byte { value, .. } => EventClass::Data(value),
        BusEvent::Address { value, .. } => EventClass::Address(value),
        BusEvent::Start { .. } => EventClass::Start,
        BusEvent::Stop { .. } => EventClass::Stop,
        BusEvent::Duplex { mosi, miso, .. } => EventClass::Duplex { mosi, miso },
    }
}
