//! Error types for the MIDI output port.
//!
//! None of these reach sketch code: `MidiOutputPort` logs them and degrades
//! to a no-op, but keeps the last one around for inspection.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("MIDI device enumeration failed: {0}")]
    DeviceEnumeration(String),

    #[error("failed to open MIDI device {device}: {reason}")]
    DeviceOpen { device: String, reason: String },

    #[error("MIDI disabled (no output device matches {0:?})")]
    NoMatchingDevice(String),

    #[error("no default MIDI receiver: {0}")]
    NoDefaultDevice(String),

    #[error("MIDI send error: {0}")]
    MessageSend(String),

    #[error("MIDI close error: {0}")]
    DeviceClose(String),

    #[error("invalid MIDI output config: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::InvalidConfig(e.to_string())
    }
}

#[cfg(feature = "midi-io")]
impl From<midir::InitError> for Error {
    fn from(e: midir::InitError) -> Self {
        Error::DeviceEnumeration(e.to_string())
    }
}

#[cfg(feature = "midi-io")]
impl From<midir::SendError> for Error {
    fn from(e: midir::SendError) -> Self {
        Error::MessageSend(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
