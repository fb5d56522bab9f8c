//! Core engine: configuration, event classification, message concatenation.

pub mod classify;
pub mod concat;
pub mod config;
pub mod message;

pub use classify::{classify, EventClass};
pub use concat::Concatenator;
pub use config::{ConcatConfig, Delimiter, DisplayFormat, DEFAULT_TIMEOUT};
pub use message::MessageRecord;
