//! The translation core: raw [`ShortMessage`](struct.ShortMessage.html)s to and from typed
//! [`MidiMessage`](../enum.MidiMessage.html)s.
//!
//! Decoding is total: any combination of nibbles and data bytes produces some message, falling
//! back to `MidiMessage::Undefined` for system sub-codes with no defined meaning. Encoding is
//! partial: `Undefined` and `SysEx` have no short-message form and fail with an `EncodeError`.

use crate::{
    message::{Channel, ChannelMessage, MidiEvent, MidiMessage},
    prelude::*,
};

/// The velocity substituted when a `NoteOn` with velocity 0 is decoded as a note-off.
const RELEASE_VEL: u7 = u7::new(64);

/// A raw MIDI short message, split into its four wire-level fields.
///
/// This is the exact shape platform drivers deliver and accept: the status byte split into its
/// two nibbles, plus up to two 7-bit data bytes. All fields are restricted integers, so a
/// `ShortMessage` is in range by construction.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShortMessage {
    /// The high nibble of the status byte, selecting the message type.
    ///
    /// `8 ..= 14` are channel-voice messages and `15` is a system message. Values below 8 do not
    /// occur in valid status bytes (the top bit of a status byte is always set).
    pub status: u4,
    /// The low nibble of the status byte: the raw hardware channel (0-based) for channel-voice
    /// messages, or the sub-code for system messages.
    pub channel: u4,
    /// The first data byte.
    pub data1: u7,
    /// The second data byte.
    pub data2: u7,
}
impl ShortMessage {
    /// Assemble a short message from its four fields.
    #[inline]
    pub const fn new(status: u4, channel: u4, data1: u7, data2: u7) -> ShortMessage {
        ShortMessage {
            status,
            channel,
            data1,
            data2,
        }
    }

    /// Split a raw MIDI packet into a short message.
    ///
    /// The status byte is split into its two nibbles, data bytes are masked to 7 bits and missing
    /// data bytes default to zero (system realtime messages are a single byte on the wire).
    /// Returns `None` only for an empty slice.
    #[inline]
    pub fn from_bytes(raw: &[u8]) -> Option<ShortMessage> {
        let status_byte = *raw.get(0)?;
        let data = |idx: usize| u7::from_int_lossy(raw.get(idx).copied().unwrap_or(0));
        Some(ShortMessage {
            status: u4::new(status_byte >> 4),
            channel: u4::new(status_byte & 0xF),
            data1: data(1),
            data2: data(2),
        })
    }

    /// The recombined status byte: status nibble on top, channel/sub-code nibble below.
    #[inline]
    pub fn status_byte(&self) -> u8 {
        self.status.as_int() << 4 | self.channel.as_int()
    }

    /// Encode this short message as standard MIDI bytes, without doing any allocations.
    /// Must be supplied with a small scratch buffer.
    ///
    /// The returned slice has the correct wire length for the message kind: 3 bytes for most
    /// messages, 2 for program change, channel aftertouch and song select, 1 for system realtime
    /// messages and tune request.
    ///
    /// ```
    /// use midiwire::{num::{u4, u7}, ShortMessage};
    ///
    /// let short = ShortMessage::new(u4::new(0xC), u4::new(7), u7::new(42), u7::new(0));
    /// let mut buf = [0; 3];
    /// assert_eq!(short.encode_bytes(&mut buf), &[0xC7, 42]);
    /// ```
    #[inline]
    pub fn encode_bytes<'a>(&self, buf: &'a mut [u8; 3]) -> &'a [u8] {
        *buf = [self.status_byte(), self.data1.as_int(), self.data2.as_int()];
        &buf[..self.wire_len()]
    }

    fn wire_len(&self) -> usize {
        match self.status.as_int() {
            0xC | 0xD => 2,
            0xF => match self.channel.as_int() {
                // Song position carries both data bytes.
                0x2 => 3,
                // MTC quarter frame and song select carry one.
                0x1 | 0x3 => 2,
                _ => 1,
            },
            _ => 3,
        }
    }

    /// Unpack a short message from the packed 32-bit word layout used by PortMidi-style drivers
    /// (`status byte | data1 << 8 | data2 << 16`).
    ///
    /// Out-of-range data bytes are masked to 7 bits; the top byte of the word is ignored.
    #[inline]
    pub fn from_packed(word: u32) -> ShortMessage {
        ShortMessage {
            status: u4::new((word as u8) >> 4),
            channel: u4::new(word as u8),
            data1: u7::from_int_lossy((word >> 8) as u8),
            data2: u7::from_int_lossy((word >> 16) as u8),
        }
    }

    /// Pack this short message into the 32-bit word layout used by PortMidi-style drivers.
    #[inline]
    pub fn as_packed(&self) -> u32 {
        self.status_byte() as u32
            | (self.data1.as_int() as u32) << 8
            | (self.data2.as_int() as u32) << 16
    }
}

/// How the codec resolves the note-off ambiguity in the MIDI standard.
///
/// The standard allows a `NoteOn` with velocity 0 to stand in for a `NoteOff`, and devices
/// disagree on which form they speak. The mode is chosen once, when the codec is constructed; it
/// is not a per-call parameter.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoteOffMode {
    /// The default interpretation:
    ///
    /// - Status 8 decodes to `NoteOff` with its release velocity intact.
    /// - Status 9 with velocity 0 decodes to `NoteOff` with a substitute release velocity of 64.
    /// - `NoteOff` encodes to status 8.
    Standard,
    /// The legacy interpretation for devices that speak only `NoteOn`:
    ///
    /// - Status 9 decodes to `NoteOn` unchanged, velocity 0 included.
    /// - `NoteOff` encodes to status 9 with velocity 0; the release velocity is discarded.
    /// - Status 8 is never produced by encoding. Should one arrive anyway it still decodes to
    ///   `NoteOff`, keeping the decode direction total.
    ZeroVelocityNoteOn,
}
impl Default for NoteOffMode {
    #[inline]
    fn default() -> NoteOffMode {
        NoteOffMode::Standard
    }
}

/// The stateless translator between short messages and typed messages.
///
/// A `Codec` holds nothing but the immutable [`NoteOffMode`](enum.NoteOffMode.html) flag, so it
/// is `Copy` and safe to share across any number of threads without synchronization: every call
/// depends only on its arguments.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Codec {
    note_off_mode: NoteOffMode,
}
impl Codec {
    /// Create a codec with the given note-off mode.
    #[inline]
    pub const fn new(note_off_mode: NoteOffMode) -> Codec {
        Codec { note_off_mode }
    }

    /// The note-off mode this codec was constructed with.
    #[inline]
    pub fn note_off_mode(&self) -> NoteOffMode {
        self.note_off_mode
    }

    /// Decode a short message into a typed message.
    ///
    /// This function is total: every short message decodes to *some* `MidiMessage`. System
    /// sub-codes with no defined meaning, as well as status nibbles below 8 (which cannot occur
    /// in a valid status byte), decode to `MidiMessage::Undefined`.
    pub fn decode(&self, raw: ShortMessage) -> MidiMessage {
        let (k, v) = (raw.data1, raw.data2);
        let msg = match raw.status.as_int() {
            0x8 => ChannelMessage::NoteOff { key: k, vel: v },
            0x9 => match self.note_off_mode {
                NoteOffMode::Standard if v.as_int() == 0 => ChannelMessage::NoteOff {
                    key: k,
                    vel: RELEASE_VEL,
                },
                _ => ChannelMessage::NoteOn { key: k, vel: v },
            },
            0xA => ChannelMessage::Aftertouch { key: k, vel: v },
            0xB => ChannelMessage::Controller {
                controller: k,
                value: v,
            },
            0xC => ChannelMessage::ProgramChange { program: k },
            0xD => ChannelMessage::ChannelAftertouch { vel: k },
            0xE => {
                // Note the little-endian order: the first data byte is the least significant.
                let bend = (v.as_int() as u16) << 7 | k.as_int() as u16;
                ChannelMessage::PitchBend {
                    bend: PitchBend(u14::new(bend)),
                }
            }
            0xF => return self.decode_system(raw.channel, k, v),
            _ => return MidiMessage::Undefined,
        };
        MidiMessage::Channel {
            channel: Channel::from_raw(raw.channel),
            msg,
        }
    }

    fn decode_system(&self, sub: u4, data1: u7, data2: u7) -> MidiMessage {
        match sub.as_int() {
            0x2 => {
                let beats = (data2.as_int() as u16) << 7 | data1.as_int() as u16;
                MidiMessage::SongPosition(u14::new(beats))
            }
            0x3 => MidiMessage::SongSelect(data1),
            0x6 => MidiMessage::TuneRequest,
            0x8 => MidiMessage::TimingClock,
            0xA => MidiMessage::Start,
            0xB => MidiMessage::Continue,
            0xC => MidiMessage::Stop,
            0xE => MidiMessage::ActiveSensing,
            0xF => MidiMessage::Reset,
            // Sub-codes 0, 1, 4, 5, 7, 9 and 13: sysex framing, MTC and reserved slots.
            _ => MidiMessage::Undefined,
        }
    }

    /// Decode a short message and pair it with the driver's timestamp.
    ///
    /// This is the entry point a driver receive loop calls once per delivered packet.
    #[inline]
    pub fn decode_event(&self, timestamp: u32, raw: ShortMessage) -> MidiEvent {
        MidiEvent {
            timestamp,
            message: self.decode(raw),
        }
    }

    /// Encode a typed message into a short message for transmission.
    ///
    /// Fails with an [`EncodeError`](../enum.EncodeError.html) for `Undefined` and `SysEx`,
    /// which have no short-message form. Out-of-range pitch bend values are not a failure case:
    /// they were already saturated when the `PitchBend` value was constructed.
    pub fn encode(&self, msg: &MidiMessage) -> Result<ShortMessage, EncodeError> {
        const ZERO: u7 = u7::new(0);
        let system = |sub: u8, data1: u7, data2: u7| {
            ShortMessage::new(u4::new(0xF), u4::new(sub), data1, data2)
        };
        Ok(match msg {
            MidiMessage::Channel { channel, msg } => {
                let (status, data1, data2) = self.encode_channel(*msg);
                ShortMessage::new(status, channel.as_raw(), data1, data2)
            }
            MidiMessage::SysEx(_) => return Err(EncodeError::SysEx),
            MidiMessage::SongPosition(beats) => {
                let raw = beats.as_int();
                system(0x2, u7::new((raw & 0x7F) as u8), u7::new((raw >> 7) as u8))
            }
            MidiMessage::SongSelect(song) => system(0x3, *song, ZERO),
            MidiMessage::TuneRequest => system(0x6, ZERO, ZERO),
            MidiMessage::TimingClock => system(0x8, ZERO, ZERO),
            MidiMessage::Start => system(0xA, ZERO, ZERO),
            MidiMessage::Continue => system(0xB, ZERO, ZERO),
            MidiMessage::Stop => system(0xC, ZERO, ZERO),
            MidiMessage::ActiveSensing => system(0xE, ZERO, ZERO),
            MidiMessage::Reset => system(0xF, ZERO, ZERO),
            MidiMessage::Undefined => return Err(EncodeError::Undefined),
        })
    }

    fn encode_channel(&self, msg: ChannelMessage) -> (u4, u7, u7) {
        const ZERO: u7 = u7::new(0);
        match msg {
            ChannelMessage::NoteOff { key, vel } => match self.note_off_mode {
                NoteOffMode::Standard => (u4::new(0x8), key, vel),
                // The release velocity cannot be represented in this mode.
                NoteOffMode::ZeroVelocityNoteOn => (u4::new(0x9), key, ZERO),
            },
            ChannelMessage::NoteOn { key, vel } => (u4::new(0x9), key, vel),
            ChannelMessage::Aftertouch { key, vel } => (u4::new(0xA), key, vel),
            ChannelMessage::Controller { controller, value } => (u4::new(0xB), controller, value),
            ChannelMessage::ProgramChange { program } => (u4::new(0xC), program, ZERO),
            ChannelMessage::ChannelAftertouch { vel } => (u4::new(0xD), vel, ZERO),
            ChannelMessage::PitchBend { bend } => {
                let raw = bend.0.as_int();
                (
                    u4::new(0xE),
                    u7::new((raw & 0x7F) as u8),
                    u7::new((raw >> 7) as u8),
                )
            }
        }
    }
}
