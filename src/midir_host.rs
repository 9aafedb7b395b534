use midir::{InitError, MidiOutput, MidiOutputConnection};

use crate::error::{Error, Result};
use crate::host::{DeviceDescriptor, MidiHost, OutputConnection};

pub const DEFAULT_CLIENT_NAME: &str = "midi-out";

const BACKEND: &str = if cfg!(target_os = "macos") {
    "CoreMIDI"
} else if cfg!(target_os = "windows") {
    "WinMM"
} else if cfg!(target_os = "linux") {
    "ALSA"
} else {
    "midir"
};

/// Host backed by the platform MIDI stack through `midir`.
///
/// A fresh `MidiOutput` client is created for every enumeration and open,
/// since `midir` consumes the client when connecting.
#[derive(Debug, Clone)]
pub struct MidirHost {
    client_name: String,
}

impl MidirHost {
    pub fn new() -> Self {
        Self::with_client_name(DEFAULT_CLIENT_NAME)
    }

    pub fn with_client_name(client_name: impl Into<String>) -> Self {
        Self {
            client_name: client_name.into(),
        }
    }

    fn client(&self) -> std::result::Result<MidiOutput, InitError> {
        MidiOutput::new(&self.client_name)
    }
}

impl Default for MidirHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MidiHost for MidirHost {
    type Connection = MidirConnection;

    fn devices(&self) -> Result<Vec<DeviceDescriptor>> {
        let midi_out = self.client()?;
        let ports = midi_out.ports();
        let mut infos = Vec::with_capacity(ports.len());
        for port in ports {
            let name = midi_out
                .port_name(&port)
                .unwrap_or_else(|_| "<unknown>".to_string());
            let id = port.id();
            infos.push(
                DeviceDescriptor::new(id.clone(), name)
                    .with_description(id)
                    .with_vendor(BACKEND),
            );
        }
        Ok(infos)
    }

    fn open(&self, device: &DeviceDescriptor) -> Result<MidirConnection> {
        let open_error = |reason: String| Error::DeviceOpen {
            device: device.name.clone(),
            reason,
        };
        let midi_out = self.client().map_err(|e| open_error(e.to_string()))?;
        let port = midi_out
            .find_port_by_id(device.id.clone())
            .ok_or_else(|| open_error("output port not found".to_string()))?;
        let conn = midi_out
            .connect(&port, &self.client_name)
            .map_err(|e| open_error(e.to_string()))?;
        Ok(MidirConnection { conn: Some(conn) })
    }

    /// Unix stacks let us publish a virtual output that any DAW can pick up,
    /// which is the closest thing `midir` has to a system receiver.
    #[cfg(unix)]
    fn open_default(&self) -> Result<MidirConnection> {
        use midir::os::unix::VirtualOutput;

        let midi_out = self
            .client()
            .map_err(|e| Error::NoDefaultDevice(e.to_string()))?;
        let conn = midi_out
            .create_virtual(&self.client_name)
            .map_err(|e| Error::NoDefaultDevice(e.to_string()))?;
        Ok(MidirConnection { conn: Some(conn) })
    }

    #[cfg(not(unix))]
    fn open_default(&self) -> Result<MidirConnection> {
        Err(Error::NoDefaultDevice(format!(
            "{BACKEND} has no virtual output ports"
        )))
    }
}

pub struct MidirConnection {
    conn: Option<MidiOutputConnection>,
}

impl OutputConnection for MidirConnection {
    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        match self.conn.as_mut() {
            Some(conn) => Ok(conn.send(bytes)?),
            None => Err(Error::MessageSend("connection already closed".to_string())),
        }
    }

    fn close_receiver(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            // midir hands the client back on close; it owns the device, so
            // releasing it here also releases the port.
            drop(conn.close());
        }
        Ok(())
    }

    fn close_device(&mut self) -> Result<()> {
        Ok(())
    }
}
