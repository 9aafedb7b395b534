//! Print the MIDI outputs a sketch could connect to, then try the one
//! `MIDI_OUT_HINT` points at.

use midi_out::{list_outputs, MidiOutputPort, MidirHost, PortConfig};

fn main() {
    midi_out::logging::init();

    let host = MidirHost::with_client_name("list-midi-outputs");
    list_outputs(&host);

    let config = match PortConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };
    if config.name_hint.is_empty() {
        return;
    }
    let port = MidiOutputPort::from_config(host, &config);
    println!("Selected: {}", port.current_name());
}
