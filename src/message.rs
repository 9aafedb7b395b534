pub const NOTE_OFF: u8 = 0x80;
pub const NOTE_ON: u8 = 0x90;
pub const CONTROL_CHANGE: u8 = 0xB0;

const DATA_MASK: u8 = 0x7F;
const MAX_CHANNEL: i32 = 15;

/// Clamp any caller-supplied channel into 0..=15.
pub fn clamp_channel(channel: i32) -> u8 {
    channel.clamp(0, MAX_CHANNEL) as u8
}

/// A 3-byte channel-voice message. Data bytes are always masked to 7 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelMessage {
    pub status: u8,
    pub data1: u8,
    pub data2: u8,
}

impl ChannelMessage {
    fn new(command: u8, channel: u8, data1: u8, data2: u8) -> Self {
        Self {
            status: command | (channel & 0x0F),
            data1: data1 & DATA_MASK,
            data2: data2 & DATA_MASK,
        }
    }

    pub fn note_on(channel: u8, note: u8, velocity: u8) -> Self {
        Self::new(NOTE_ON, channel, note, velocity)
    }

    pub fn note_off(channel: u8, note: u8) -> Self {
        Self::new(NOTE_OFF, channel, note, 0)
    }

    pub fn control_change(channel: u8, cc_number: u8, value: u8) -> Self {
        Self::new(CONTROL_CHANGE, channel, cc_number, value)
    }

    pub fn to_bytes(self) -> [u8; 3] {
        [self.status, self.data1, self.data2]
    }
}
