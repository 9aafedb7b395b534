use serde::Deserialize;
use std::env;

use crate::error::{Error, Result};

pub const ENV_HINT: &str = "MIDI_OUT_HINT";
pub const ENV_CHANNEL: &str = "MIDI_OUT_CHANNEL";
pub const ENV_STRICT: &str = "MIDI_OUT_STRICT";

/// How a sketch wants its output picked. The channel is kept as given and
/// clamped when the port is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PortConfig {
    pub name_hint: String,
    pub channel: i32,
    pub strict: bool,
}

impl PortConfig {
    pub fn new(name_hint: impl Into<String>, channel: i32, strict: bool) -> Self {
        Self {
            name_hint: name_hint.into(),
            channel,
            strict,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Defaults overridden by `MIDI_OUT_HINT`, `MIDI_OUT_CHANNEL` and
    /// `MIDI_OUT_STRICT` when set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(hint) = lookup(ENV_HINT) {
            config.name_hint = hint;
        }
        if let Some(raw) = lookup(ENV_CHANNEL) {
            config.channel = raw
                .trim()
                .parse()
                .map_err(|_| Error::InvalidConfig(format!("{ENV_CHANNEL}={raw:?}")))?;
        }
        if let Some(raw) = lookup(ENV_STRICT) {
            config.strict = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => return Err(Error::InvalidConfig(format!("{ENV_STRICT}={raw:?}"))),
            };
        }
        Ok(config)
    }
}
