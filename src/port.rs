//! `MidiOutputPort`: one output connection plus a fixed channel.
//!
//! Every host interaction is fault-isolated. Failures are logged, remembered
//! in `last_error`, and the port degrades to a disconnected or no-op state.

use tracing::{debug, info, warn};

use crate::config::PortConfig;
use crate::error::{Error, Result};
use crate::host::{DeviceDescriptor, MidiHost, OutputConnection};
use crate::message::{clamp_channel, ChannelMessage};

pub const NO_DEVICE_NAME: &str = "(none)";
pub const DEFAULT_RECEIVER_NAME: &str = "System default receiver";

pub struct MidiOutputPort<H: MidiHost> {
    host: H,
    channel: u8,
    connection: Option<H::Connection>,
    current_index: Option<usize>,
    current_name: String,
    last_error: Option<Error>,
}

impl<H: MidiHost> MidiOutputPort<H> {
    /// Never fails: when nothing can be opened the port comes up
    /// disconnected and says so in the log.
    pub fn new(host: H, name_hint: &str, channel: i32, strict: bool) -> Self {
        let mut port = Self {
            host,
            channel: clamp_channel(channel),
            connection: None,
            current_index: None,
            current_name: NO_DEVICE_NAME.to_string(),
            last_error: None,
        };
        port.connect_preferred(name_hint, strict);
        port
    }

    pub fn from_config(host: H, config: &PortConfig) -> Self {
        Self::new(host, &config.name_hint, config.channel, config.strict)
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    pub fn current_name(&self) -> &str {
        &self.current_name
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Most recent failure since the port last connected successfully.
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// Rotate to the next available output, wrapping after the last one.
    pub fn cycle_to_next(&mut self) -> bool {
        let outputs = self.refresh_outputs();
        if outputs.is_empty() {
            info!("No MIDI outputs available to cycle.");
            return false;
        }
        let next = self.current_index.map_or(0, |i| i + 1) % outputs.len();
        self.current_index = Some(next);
        self.reconnect(&outputs[next])
    }

    pub fn note_on(&mut self, note: u8, velocity: u8) -> bool {
        self.send(ChannelMessage::note_on(self.channel, note, velocity))
    }

    pub fn note_off(&mut self, note: u8) -> bool {
        self.send(ChannelMessage::note_off(self.channel, note))
    }

    pub fn control_change(&mut self, cc_number: u8, value: u8) -> bool {
        self.send(ChannelMessage::control_change(self.channel, cc_number, value))
    }

    /// Release receiver then device. Safe to call any number of times.
    pub fn close(&mut self) {
        if let Some(mut conn) = self.connection.take() {
            if let Err(e) = conn.close_receiver() {
                self.record(e);
            }
            if let Err(e) = conn.close_device() {
                self.record(e);
            }
        }
        self.current_name = NO_DEVICE_NAME.to_string();
    }

    /// Close whatever is open, then open `device`. On failure the port is
    /// left disconnected.
    pub fn reconnect(&mut self, device: &DeviceDescriptor) -> bool {
        self.close();
        match self.host.open(device) {
            Ok(conn) => {
                self.install(conn, &device.name);
                true
            }
            Err(e) => {
                self.record(e);
                false
            }
        }
    }

    pub fn send(&mut self, msg: ChannelMessage) -> bool {
        let Some(conn) = self.connection.as_mut() else {
            debug!(?msg, "MIDI output disconnected, dropping message");
            return false;
        };
        match conn.send(&msg.to_bytes()) {
            Ok(()) => true,
            Err(e) => {
                self.record(e);
                false
            }
        }
    }

    fn connect_preferred(&mut self, name_hint: &str, strict: bool) {
        if let Err(e) = self.try_connect_preferred(name_hint, strict) {
            self.record(e);
        }
    }

    fn try_connect_preferred(&mut self, name_hint: &str, strict: bool) -> Result<()> {
        let outputs = self.refresh_outputs();
        let target = match outputs.iter().position(|d| d.matches_hint(name_hint)) {
            Some(i) => Some(i),
            None if !strict && !outputs.is_empty() => Some(0),
            None => None,
        };

        if let Some(i) = target {
            self.current_index = Some(i);
            self.reconnect(&outputs[i]);
            return Ok(());
        }

        if strict {
            return Err(Error::NoMatchingDevice(name_hint.to_string()));
        }

        self.close();
        let conn = self.host.open_default()?;
        self.install(conn, DEFAULT_RECEIVER_NAME);
        Ok(())
    }

    /// Query the host afresh. An enumeration failure reads as an empty table.
    fn refresh_outputs(&mut self) -> Vec<DeviceDescriptor> {
        match self.host.outputs() {
            Ok(outputs) => outputs,
            Err(e) => {
                self.record(e);
                Vec::new()
            }
        }
    }

    fn install(&mut self, conn: H::Connection, name: &str) {
        self.connection = Some(conn);
        self.current_name = name.to_string();
        self.last_error = None;
        info!("MIDI -> {}", self.current_name);
    }

    fn record(&mut self, e: Error) {
        warn!("{e}");
        self.last_error = Some(e);
    }
}

impl<H: MidiHost> Drop for MidiOutputPort<H> {
    fn drop(&mut self) {
        self.close();
    }
}
