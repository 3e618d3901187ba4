use core::fmt;

/// The error produced when a message has no short-message representation.
///
/// Decoding never fails: every short message decodes to *some* `MidiMessage`, falling back to
/// `MidiMessage::Undefined` for unrecognized system sub-codes. Encoding is the partial direction,
/// and it fails loudly rather than silently producing a malformed short message.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum EncodeError {
    /// `MidiMessage::Undefined` carries no record of the sub-code it was decoded from, so it
    /// cannot be turned back into wire bytes.
    ///
    /// Sending a previously-decoded `Undefined` message back out is a programmer error.
    Undefined,
    /// SysEx payloads are variable-length and do not fit the short-message format.
    ///
    /// They must be transmitted through the driver's raw byte path instead.
    SysEx,
}
impl EncodeError {
    /// Get the informative message on why the message could not be encoded.
    #[inline]
    pub fn message(&self) -> &'static str {
        match self {
            EncodeError::Undefined => "undefined system messages have no short-message form",
            EncodeError::SysEx => "sysex messages have no short-message form, use the raw byte path",
        }
    }
}
impl fmt::Display for EncodeError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "cannot encode: {}", self.message())
    }
}
#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}
