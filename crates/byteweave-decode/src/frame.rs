//! JSON wire bridge for replaying captured decoder output.
//!
//! One frame per line. The `type` strings are the ones the upstream
//! analyzers emit: `data` (UART/I2C data byte), `address`, `start`, `stop`
//! and `result` (one SPI clock byte).

use serde::Deserialize;
use thiserror::Error;

use crate::{BusEvent, TimeSpan, Timestamp};

#[derive(Debug, Clone, Deserialize)]
pub struct RawFrame {
    #[serde(rename = "type")]
    pub kind: String,
    pub start_ns: u64,
    pub end_ns: u64,
    #[serde(default)]
    pub data: Option<u8>,
    #[serde(default)]
    pub address: Option<u8>,
    #[serde(default)]
    pub mosi: Option<u8>,
    #[serde(default)]
    pub miso: Option<u8>,
}

/// A frame that cannot be mapped onto a [`BusEvent`].
///
/// Such frames are skipped by the consumer; they never abort the stream.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("unrecognized frame type `{0}`")]
    UnrecognizedType(String),
    #[error("`{kind}` frame is missing its `{field}` field")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },
}

impl TryFrom<RawFrame> for BusEvent {
    type Error = FrameError;

    fn try_from(frame: RawFrame) -> Result<Self, FrameError> {
        let span = TimeSpan::new(Timestamp(frame.start_ns), Timestamp(frame.end_ns));
        match frame.kind.as_str() {
            "data" => {
                let value = frame.data.ok_or(FrameError::MissingField {
                    kind: "data",
                    field: "data",
                })?;
                Ok(BusEvent::Byte { value, span })
            }
            "address" => {
                let value = frame.address.ok_or(FrameError::MissingField {
                    kind: "address",
                    field: "address",
                })?;
                Ok(BusEvent::Address { value, span })
            }
            "start" => Ok(BusEvent::Start { span }),
            "stop" => Ok(BusEvent::Stop { span }),
            "result" => Ok(BusEvent::Duplex {
                mosi: frame.mosi,
                miso: frame.miso,
                span,
            }),
            _ => Err(FrameError::UnrecognizedType(frame.kind)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(kind: &str) -> RawFrame {
        RawFrame {
            kind: kind.to_string(),
            start_ns: 100,
            end_ns: 200,
            data: None,
            address: None,
            mosi: None,
            miso: None,
        }
    }

    #[test]
    fn data_frame_maps_to_byte() {
        let frame = RawFrame {
            data: Some(0x48),
            ..raw("data")
        };
        let event = BusEvent::try_from(frame).unwrap();
        assert_eq!(
            event,
            BusEvent::Byte {
                value: 0x48,
                span: TimeSpan::new(Timestamp(100), Timestamp(200)),
            }
        );
    }

    #[test]
    fn result_frame_keeps_absent_sides() {
        let frame = RawFrame {
            miso: Some(0x20),
            ..raw("result")
        };
        match BusEvent::try_from(frame).unwrap() {
            BusEvent::Duplex { mosi, miso, .. } => {
                assert_eq!(mosi, None);
                assert_eq!(miso, Some(0x20));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn unknown_type_is_a_typed_error() {
        let err = BusEvent::try_from(raw("glitch")).unwrap_err();
        assert_eq!(err, FrameError::UnrecognizedType("glitch".to_string()));
        assert_eq!(err.to_string(), "unrecognized frame type `glitch`");
    }

    #[test]
    fn missing_required_field() {
        let err = BusEvent::try_from(raw("address")).unwrap_err();
        assert_eq!(
            err,
            FrameError::MissingField {
                kind: "address",
                field: "address",
            }
        );
    }
}
