//! Bridges the codec to [`midir`](https://docs.rs/midir) input and output ports.
//!
//! `midir` speaks raw bytes; these extension traits run every packet through a
//! [`Codec`](../struct.Codec.html) so that application code only ever sees typed
//! [`MidiEvent`](../struct.MidiEvent.html)s and [`MidiMessage`](../enum.MidiMessage.html)s.
//!
//! Only available with the `midir-io` feature enabled.

use crate::{Codec, MidiEvent, MidiMessage, ShortMessage};
use midir::{
    ConnectError, MidiInput, MidiInputConnection, MidiInputPort, MidiOutputConnection, SendError,
};

pub use midir::*;

/// Send typed messages through a `midir` output connection.
pub trait CodecOutExt {
    /// Encode `msg` through `codec` and send it.
    ///
    /// Messages with no short-message form (`Undefined`, `SysEx`) are reported as
    /// `SendError::InvalidData`; nothing is written in that case. SysEx payloads should go
    /// through [`MidiOutputConnection::send`] directly, with the framing bytes added.
    fn send_message(&mut self, codec: &Codec, msg: &MidiMessage) -> Result<(), SendError>;
}
impl CodecOutExt for MidiOutputConnection {
    fn send_message(&mut self, codec: &Codec, msg: &MidiMessage) -> Result<(), SendError> {
        let short = codec
            .encode(msg)
            .map_err(|err| SendError::InvalidData(err.message()))?;
        let mut buf = [0; 3];
        self.send(short.encode_bytes(&mut buf))
    }
}

/// Receive typed events from a `midir` input port.
pub trait CodecInExt {
    /// Connect to `port`, decoding every delivered packet through `codec` and invoking
    /// `on_event` once per event.
    ///
    /// `midir` timestamps are microseconds; they are converted to the millisecond `u32`
    /// timestamps carried by [`MidiEvent`]. Packets too short to carry a status byte are
    /// dropped.
    ///
    /// The callback runs on the driver's thread and must not panic: an unwind crossing back
    /// into the driver layer aborts the receive loop.
    fn connect_codec<F>(
        self,
        codec: Codec,
        port: &MidiInputPort,
        port_name: &str,
        on_event: F,
    ) -> Result<MidiInputConnection<()>, ConnectError<MidiInput>>
    where
        F: FnMut(MidiEvent) + Send + 'static;
}
impl CodecInExt for MidiInput {
    fn connect_codec<F>(
        self,
        codec: Codec,
        port: &MidiInputPort,
        port_name: &str,
        mut on_event: F,
    ) -> Result<MidiInputConnection<()>, ConnectError<MidiInput>>
    where
        F: FnMut(MidiEvent) + Send + 'static,
    {
        self.connect(
            port,
            port_name,
            move |timestamp, raw, _| {
                if let Some(short) = ShortMessage::from_bytes(raw) {
                    on_event(codec.decode_event((timestamp / 1000) as u32, short));
                }
            },
            (),
        )
    }
}
