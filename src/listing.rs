use std::io::{self, Write};

use crate::host::MidiHost;

/// Print every output that accepts connections to stdout.
pub fn list_outputs<H: MidiHost>(host: &H) {
    let stdout = io::stdout();
    let _ = write_outputs(host, &mut stdout.lock());
}

pub fn write_outputs<H: MidiHost, W: Write>(host: &H, out: &mut W) -> io::Result<()> {
    writeln!(out, "MIDI outputs (accept connections):")?;
    let outputs = match host.outputs() {
        Ok(outputs) => outputs,
        Err(e) => {
            tracing::warn!("{e}");
            return Ok(());
        }
    };
    for info in outputs {
        writeln!(
            out,
            "  - {} - {} [{}]",
            info.name, info.description, info.vendor
        )?;
    }
    Ok(())
}

pub fn outputs_json<H: MidiHost>(host: &H) -> Vec<u8> {
    let outputs = match host.outputs() {
        Ok(outputs) => outputs,
        Err(_) => return b"[]".to_vec(),
    };
    serde_json::to_vec(&outputs).unwrap_or_else(|_| b"[]".to_vec())
}
