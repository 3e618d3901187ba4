//! The structured, semantically typed side of the codec.
//!
//! A [`MidiMessage`](enum.MidiMessage.html) is either a channel-voice message (a
//! [`ChannelMessage`](enum.ChannelMessage.html) tagged with its [`Channel`](struct.Channel.html))
//! or one of the system-level messages. All of these are pure values: no shared state, no
//! back-references, equality by value.

use crate::prelude::*;

/// A logical MIDI channel number, in the range `1 ..= 16`.
///
/// The wire format carries the channel as a 0-based nibble; this type holds the 1-based number
/// musicians and applications use. The codec converts between the two representations, so raw
/// channel 0 always corresponds to logical channel 1.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Channel(u8);
impl Channel {
    /// Create a channel from its 1-based number.
    ///
    /// Returns `None` if `number` is outside of `1 ..= 16`.
    #[inline]
    pub fn new(number: u8) -> Option<Channel> {
        if (1..=16).contains(&number) {
            Some(Channel(number))
        } else {
            None
        }
    }

    /// The 1-based channel number, in `1 ..= 16`.
    #[inline]
    pub fn number(self) -> u8 {
        self.0
    }

    /// Create a channel from the 0-based nibble found on the wire.
    #[inline]
    pub fn from_raw(raw: u4) -> Channel {
        Channel(raw.as_int() + 1)
    }

    /// The 0-based nibble used on the wire, in `0 ..= 15`.
    #[inline]
    pub fn as_raw(self) -> u4 {
        u4::new(self.0 - 1)
    }
}
impl fmt::Display for Channel {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
#[cfg(feature = "serde")]
impl serde::Serialize for Channel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.0, serializer)
    }
}
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Channel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Channel, D::Error> {
        let raw = <u8 as serde::Deserialize>::deserialize(deserializer)?;
        Channel::new(raw).ok_or_else(|| serde::de::Error::custom("midi channel out of range 1..=16"))
    }
}

/// A channel-voice message, that is, a MIDI message associated to a particular channel.
/// These messages make the bulk of most MIDI traffic.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChannelMessage {
    /// Indicates that the given key should stop playing.
    NoteOff { key: u7, vel: u7 },
    /// Indicates that the given key should start playing with the given velocity.
    NoteOn { key: u7, vel: u7 },
    /// Indicates that the playing pressure of a given key has changed (polyphonic aftertouch).
    Aftertouch { key: u7, vel: u7 },
    /// Changes the value of a particular MIDI controller.
    ///
    /// Refer to the MIDI spec for particular controller IDs.
    Controller { controller: u7, value: u7 },
    /// Indicates that the current channel should change program (also called instrument).
    ProgramChange { program: u7 },
    /// Indicates that the playing pressure of the entire channel has changed.
    ChannelAftertouch { vel: u7 },
    /// Indicates a new pitch bend for the entire channel.
    PitchBend { bend: PitchBend },
}

/// A structured MIDI message, as decoded from (or encodable to) a short message.
///
/// Channel-voice messages are nested under the `Channel` variant; everything else is a
/// system-level message. The MIDI standard subdivides system messages into System Common
/// (`SysEx`, `SongPosition`, `SongSelect`, `TuneRequest`) and System Realtime (the rest), but the
/// distinction carries no extra data, so the type is kept flat.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MidiMessage {
    /// A message associated to a channel, carrying note playback data.
    /// This is the most common MIDI message type.
    Channel {
        /// The logical channel this message is associated to.
        channel: Channel,
        /// The type of message sent and its associated data.
        msg: ChannelMessage,
    },
    /// A **sys**tem-**ex**clusive message, carrying arbitrary data bytes.
    ///
    /// The payload excludes the `0xF0`/`0xF7` framing bytes. SysEx messages have no
    /// short-message form: they pass through the codec as values only, and must be transmitted
    /// through the driver's raw byte path.
    SysEx(Vec<u8>),
    /// The number of MIDI beats (6 x MIDI clocks) that have elapsed since the start of the
    /// sequence.
    SongPosition(u14),
    /// Select a given song index.
    SongSelect(u7),
    /// Used with analog synthesizers to request that all oscillators be tuned.
    TuneRequest,
    /// Used to synchronize MIDI devices.
    /// If sent, these should be sent 24 times per quarter note.
    TimingClock,
    /// Indicates MIDI devices to start playing at the beginning of the sequence.
    Start,
    /// Indicates MIDI devices to continue playing from the current song position.
    Continue,
    /// Indicates MIDI devices to stop playing immediately.
    Stop,
    /// Used to make sure that a connection is still alive.
    /// Once one of these messages is transmitted, a message should arrive every 300ms or else
    /// the connection is considered broken.
    ActiveSensing,
    /// Indicates MIDI devices to reset to the power-up condition.
    Reset,
    /// A system message with a sub-code that has no defined meaning.
    ///
    /// Decoding falls back to this variant rather than failing, so the decode direction is total.
    /// The original sub-code is not retained, which is why `Undefined` cannot be encoded back.
    Undefined,
}
impl MidiMessage {
    /// Returns the channel and inner channel message if this message is actually a channel
    /// message.
    #[inline]
    pub fn as_channel(&self) -> Option<(Channel, ChannelMessage)> {
        match self {
            &MidiMessage::Channel { channel, msg } => Some((channel, msg)),
            _ => None,
        }
    }

    /// Returns `true` if this message is a channel-voice message.
    ///
    /// Mutually exclusive with `is_system`.
    #[inline]
    pub fn is_channel(&self) -> bool {
        self.as_channel().is_some()
    }

    /// Returns `true` if this message is a system-level message (everything that is not
    /// associated to a channel, `Undefined` included).
    #[inline]
    pub fn is_system(&self) -> bool {
        !self.is_channel()
    }
}

/// A decoded message paired with the timestamp the driver delivered it at.
///
/// Timestamps count milliseconds since an epoch decided by the driver layer (usually the moment
/// the MIDI system was started). The codec carries them through opaquely.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiEvent {
    /// Milliseconds since the driver's epoch.
    pub timestamp: u32,
    /// The decoded message.
    pub message: MidiMessage,
}
