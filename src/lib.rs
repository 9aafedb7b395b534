//! MIDI output for sketches: pick a device by name hint, send notes and CCs
//! on one channel, and let go of the device cleanly.
//!
//! The Rust API lives in [`MidiOutputPort`]. Sketch runtimes that load the
//! `cdylib` go through the `midi_out_*` C functions below, which keep ports
//! in a handle table (handle 0 is never valid).

pub mod config;
pub mod error;
pub mod host;
pub mod listing;
pub mod logging;
pub mod message;
#[cfg(feature = "midi-io")]
pub mod midir_host;
pub mod port;

pub use config::PortConfig;
pub use error::{Error, Result};
pub use host::{DeviceDescriptor, MidiHost, OutputConnection};
pub use listing::{list_outputs, outputs_json, write_outputs};
pub use message::ChannelMessage;
#[cfg(feature = "midi-io")]
pub use midir_host::MidirHost;
pub use port::{MidiOutputPort, DEFAULT_RECEIVER_NAME, NO_DEVICE_NAME};

#[cfg(feature = "midi-io")]
pub mod ffi {
    use once_cell::sync::Lazy;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Mutex, MutexGuard, PoisonError};

    use crate::{listing, logging, MidiOutputPort, MidirHost, PortConfig};

    type Port = MidiOutputPort<MidirHost>;

    static NEXT_HANDLE: AtomicU32 = AtomicU32::new(1);
    static PORTS: Lazy<Mutex<HashMap<u32, Port>>> = Lazy::new(|| Mutex::new(HashMap::new()));

    fn next_handle() -> u32 {
        NEXT_HANDLE.fetch_add(1, Ordering::Relaxed)
    }

    fn ports() -> MutexGuard<'static, HashMap<u32, Port>> {
        PORTS.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn register(port: Port) -> u32 {
        let id = next_handle();
        ports().insert(id, port);
        id
    }

    fn with_port<T>(handle: u32, missing: T, f: impl FnOnce(&mut Port) -> T) -> T {
        match ports().get_mut(&handle) {
            Some(port) => f(port),
            None => missing,
        }
    }

    unsafe fn str_arg<'a>(ptr: *const u8, len: u32) -> Option<&'a str> {
        if ptr.is_null() || len == 0 {
            return Some("");
        }
        let bytes = std::slice::from_raw_parts(ptr, len as usize);
        std::str::from_utf8(bytes).ok()
    }

    fn status(ok: bool) -> i32 {
        if ok {
            0
        } else {
            -1
        }
    }

    #[no_mangle]
    pub extern "C" fn midi_out_init_logging() -> i32 {
        status(logging::init())
    }

    #[no_mangle]
    pub unsafe extern "C" fn midi_out_list_outputs(out_ptr: *mut u8, out_cap: u32) -> u32 {
        write_buffer(listing::outputs_json(&MidirHost::new()), out_ptr, out_cap)
    }

    #[no_mangle]
    pub extern "C" fn midi_out_print_outputs() {
        listing::list_outputs(&MidirHost::new());
    }

    /// A null or empty hint matches nothing. Returns 0 only if the hint is
    /// not UTF-8; a port that found no device still gets a handle.
    #[no_mangle]
    pub unsafe extern "C" fn midi_out_open(
        hint_ptr: *const u8,
        hint_len: u32,
        channel: i32,
        strict: u32,
    ) -> u32 {
        let hint = match str_arg(hint_ptr, hint_len) {
            Some(s) => s,
            None => return 0,
        };
        register(MidiOutputPort::new(
            MidirHost::new(),
            hint,
            channel,
            strict != 0,
        ))
    }

    #[no_mangle]
    pub unsafe extern "C" fn midi_out_open_config(json_ptr: *const u8, json_len: u32) -> u32 {
        let json = match str_arg(json_ptr, json_len) {
            Some(s) if !s.is_empty() => s,
            _ => return 0,
        };
        match PortConfig::from_json(json) {
            Ok(config) => register(MidiOutputPort::from_config(MidirHost::new(), &config)),
            Err(e) => {
                tracing::warn!("{e}");
                0
            }
        }
    }

    #[no_mangle]
    pub extern "C" fn midi_out_cycle(handle: u32) -> i32 {
        with_port(handle, -1, |port| status(port.cycle_to_next()))
    }

    #[no_mangle]
    pub unsafe extern "C" fn midi_out_current_name(
        handle: u32,
        out_ptr: *mut u8,
        out_cap: u32,
    ) -> u32 {
        let name = with_port(handle, None, |port| Some(port.current_name().to_string()));
        match name {
            Some(name) => write_buffer(name.into_bytes(), out_ptr, out_cap),
            None => 0,
        }
    }

    // Data arguments arrive as JS numbers; truncating to u8 keeps the low
    // seven bits the port masks to anyway.
    #[no_mangle]
    pub extern "C" fn midi_out_note_on(handle: u32, note: i32, velocity: i32) -> i32 {
        with_port(handle, -1, |port| {
            status(port.note_on(note as u8, velocity as u8))
        })
    }

    #[no_mangle]
    pub extern "C" fn midi_out_note_off(handle: u32, note: i32) -> i32 {
        with_port(handle, -1, |port| status(port.note_off(note as u8)))
    }

    #[no_mangle]
    pub extern "C" fn midi_out_cc(handle: u32, cc_number: i32, value: i32) -> i32 {
        with_port(handle, -1, |port| {
            status(port.control_change(cc_number as u8, value as u8))
        })
    }

    #[no_mangle]
    pub extern "C" fn midi_out_close(handle: u32) {
        // Dropping the port closes receiver and device.
        let _ = ports().remove(&handle);
    }

    unsafe fn write_buffer(bytes: Vec<u8>, out_ptr: *mut u8, out_cap: u32) -> u32 {
        let needed = bytes.len() as u32;
        if out_ptr.is_null() || out_cap < needed {
            return needed;
        }
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), out_ptr, bytes.len());
        needed
    }

}
