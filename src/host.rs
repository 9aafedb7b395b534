//! The seam between the port and whatever MIDI stack the platform provides.
//!
//! Device tables are volatile: DAWs open and close virtual buses while a
//! sketch is running, so callers query `outputs()` every time they need it.

use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceDescriptor {
    pub id: String,
    pub name: String,
    pub description: String,
    pub vendor: String,
    pub accepts_connections: bool,
}

impl DeviceDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            vendor: String::new(),
            accepts_connections: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = vendor.into();
        self
    }

    pub fn with_accepts_connections(mut self, accepts: bool) -> Self {
        self.accepts_connections = accepts;
        self
    }

    /// Case-insensitive substring match over name, description and vendor.
    /// An empty (or all-whitespace) hint matches nothing.
    pub fn matches_hint(&self, hint: &str) -> bool {
        let hint = hint.trim().to_lowercase();
        if hint.is_empty() {
            return false;
        }
        let hay = format!("{} {} {}", self.name, self.description, self.vendor).to_lowercase();
        hay.contains(&hint)
    }
}

/// An open connection to one output. Closing happens in two steps: the
/// logical receiver first, then the device that owns it.
pub trait OutputConnection {
    fn send(&mut self, bytes: &[u8]) -> Result<()>;

    fn close_receiver(&mut self) -> Result<()>;

    fn close_device(&mut self) -> Result<()>;
}

pub trait MidiHost {
    type Connection: OutputConnection;

    /// Every visible device, output-capable or not.
    fn devices(&self) -> Result<Vec<DeviceDescriptor>>;

    fn open(&self, device: &DeviceDescriptor) -> Result<Self::Connection>;

    fn open_default(&self) -> Result<Self::Connection>;

    /// Devices that accept outbound connections, in enumeration order.
    fn outputs(&self) -> Result<Vec<DeviceDescriptor>> {
        let mut devices = self.devices()?;
        devices.retain(|d| d.accepts_connections);
        Ok(devices)
    }
}
