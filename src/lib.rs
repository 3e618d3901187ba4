//! # Overview
//!
//! `midiwire` translates between the raw MIDI "short message" wire format and typed
//! [`MidiMessage`](enum.MidiMessage.html) values, in both directions.
//!
//! Platform drivers (ALSA, CoreMIDI, PortMidi, [`midir`](https://docs.rs/midir), ...) deliver
//! incoming MIDI as small packets of raw bytes plus a timestamp. The [`Codec`](struct.Codec.html)
//! turns those packets into typed [`MidiEvent`](struct.MidiEvent.html)s for application code, and
//! turns application-built messages back into raw bytes for transmission:
//!
//! ```rust
//! use midiwire::{ChannelMessage, Codec, MidiMessage, ShortMessage};
//!
//! let codec = Codec::default();
//!
//! let raw = ShortMessage::from_bytes(&[0x90, 60, 100]).unwrap();
//! match codec.decode(raw) {
//!     MidiMessage::Channel {
//!         channel,
//!         msg: ChannelMessage::NoteOn { key, vel },
//!     } => {
//!         println!("note {} on channel {} at velocity {}", key, channel, vel);
//!     }
//!     other => println!("something else: {:?}", other),
//! }
//! ```
//!
//! The reverse direction produces a [`ShortMessage`](struct.ShortMessage.html) ready to hand to
//! the driver's raw-write path:
//!
//! ```rust
//! use midiwire::{num::u7, Channel, ChannelMessage, Codec, MidiMessage};
//!
//! let codec = Codec::default();
//! let msg = MidiMessage::Channel {
//!     channel: Channel::new(1).unwrap(),
//!     msg: ChannelMessage::ProgramChange {
//!         program: u7::new(12),
//!     },
//! };
//! let short = codec.encode(&msg).unwrap();
//!
//! let mut buf = [0; 3];
//! assert_eq!(short.encode_bytes(&mut buf), &[0xC0, 12]);
//! ```
//!
//! # Decoding never fails
//!
//! Every short message decodes to *some* `MidiMessage`: system messages with no defined meaning
//! become [`MidiMessage::Undefined`](enum.MidiMessage.html#variant.Undefined) instead of an error,
//! so a driver callback loop is never interrupted by unrecognized hardware bytes.
//!
//! Encoding is partial: `Undefined` and `SysEx` messages have no short-message form, and
//! [`Codec::encode`](struct.Codec.html#method.encode) fails with an
//! [`EncodeError`](enum.EncodeError.html) for them. SysEx payloads must be transmitted through the
//! driver's raw byte path.
//!
//! # The note-off ambiguity
//!
//! The MIDI standard allows a `NoteOn` with velocity 0 to stand in for a `NoteOff`. How the codec
//! resolves this is selected once, at construction time, through
//! [`NoteOffMode`](enum.NoteOffMode.html). See its documentation for the exact rules of each mode.
//!
//! # About features
//!
//! - The `std` feature (enabled by default) integrates with the `std` library. Disabling it makes
//!   the crate `no_std + alloc`; only the `std::error::Error` impl on `EncodeError` is lost.
//! - The `midir-io` feature bridges the codec to [`midir`](https://docs.rs/midir) ports through
//!   the extension traits in the [`midir`](midir/index.html) module.
//! - The `serde` feature derives `Serialize`/`Deserialize` for all public value types, with
//!   range-checked deserialization for the restricted integer types.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

mod prelude {
    pub(crate) use crate::{
        error::EncodeError,
        primitive::{u14, u4, u7, PitchBend},
    };
    pub(crate) use alloc::vec::Vec;
    pub(crate) use core::fmt;
}

mod codec;
mod error;
mod message;
mod primitive;

#[cfg(feature = "midir-io")]
pub mod midir;

pub use crate::{
    codec::{Codec, NoteOffMode, ShortMessage},
    error::EncodeError,
    message::{Channel, ChannelMessage, MidiEvent, MidiMessage},
    primitive::PitchBend,
};

/// Exotically-sized integers used by the MIDI standard.
pub mod num {
    pub use crate::primitive::{u14, u4, u7};
}

#[cfg(test)]
mod test;
