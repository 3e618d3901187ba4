use crate::{
    num::{u4, u7},
    Channel, ChannelMessage, Codec, EncodeError, MidiMessage, NoteOffMode, PitchBend, ShortMessage,
};

fn short(status: u8, channel: u8, data1: u8, data2: u8) -> ShortMessage {
    ShortMessage::new(
        u4::new(status),
        u4::new(channel),
        u7::new(data1),
        u7::new(data2),
    )
}

fn chan(number: u8) -> Channel {
    Channel::new(number).unwrap()
}

/// Check that decode and encode are exact inverses over the given pairs.
fn test_equiv(codec: &Codec, list: &[(ShortMessage, MidiMessage)]) {
    for (raw, msg) in list {
        assert_eq!(&codec.decode(*raw), msg);
        assert_eq!(&codec.encode(msg).unwrap(), raw);
    }
}

#[test]
fn channel_msg() {
    use crate::ChannelMessage::{
        Aftertouch, ChannelAftertouch, Controller, NoteOff, NoteOn, PitchBend, ProgramChange,
    };
    let codec = Codec::default();
    test_equiv(
        &codec,
        &[
            (
                short(0x8, 0, 0, 63),
                MidiMessage::Channel {
                    channel: chan(1),
                    msg: NoteOff {
                        key: u7::new(0),
                        vel: u7::new(63),
                    },
                },
            ),
            (
                short(0x8, 10, 127, 0),
                MidiMessage::Channel {
                    channel: chan(11),
                    msg: NoteOff {
                        key: u7::new(127),
                        vel: u7::new(0),
                    },
                },
            ),
            (
                short(0x9, 7, 121, 127),
                MidiMessage::Channel {
                    channel: chan(8),
                    msg: NoteOn {
                        key: u7::new(121),
                        vel: u7::new(127),
                    },
                },
            ),
            (
                short(0xA, 15, 60, 1),
                MidiMessage::Channel {
                    channel: chan(16),
                    msg: Aftertouch {
                        key: u7::new(60),
                        vel: u7::new(1),
                    },
                },
            ),
            (
                short(0xB, 2, 7, 100),
                MidiMessage::Channel {
                    channel: chan(3),
                    msg: Controller {
                        controller: u7::new(7),
                        value: u7::new(100),
                    },
                },
            ),
            (
                short(0xC, 7, 121, 0),
                MidiMessage::Channel {
                    channel: chan(8),
                    msg: ProgramChange {
                        program: u7::new(121),
                    },
                },
            ),
            (
                short(0xD, 4, 90, 0),
                MidiMessage::Channel {
                    channel: chan(5),
                    msg: ChannelAftertouch { vel: u7::new(90) },
                },
            ),
            (
                short(0xE, 0, 0, 64),
                MidiMessage::Channel {
                    channel: chan(1),
                    msg: PitchBend {
                        bend: crate::PitchBend::from_int(0),
                    },
                },
            ),
            (
                short(0xE, 0, 127, 127),
                MidiMessage::Channel {
                    channel: chan(1),
                    msg: PitchBend {
                        bend: crate::PitchBend::from_int(0x1FFF),
                    },
                },
            ),
            (
                short(0xE, 0, 0, 0),
                MidiMessage::Channel {
                    channel: chan(1),
                    msg: PitchBend {
                        bend: crate::PitchBend::from_int(-0x2000),
                    },
                },
            ),
        ],
    );
}

#[test]
fn note_on_zero_velocity_is_note_off() {
    let codec = Codec::default();
    let on_zero = MidiMessage::Channel {
        channel: chan(1),
        msg: ChannelMessage::NoteOn {
            key: u7::new(60),
            vel: u7::new(0),
        },
    };
    // Encoding is faithful, but the decoded result is a note-off with release velocity 64.
    // This is the one documented non-round-trip of the default mode.
    let encoded = codec.encode(&on_zero).unwrap();
    assert_eq!(encoded, short(0x9, 0, 60, 0));
    assert_eq!(
        codec.decode(encoded),
        MidiMessage::Channel {
            channel: chan(1),
            msg: ChannelMessage::NoteOff {
                key: u7::new(60),
                vel: u7::new(64),
            },
        }
    );
}

#[test]
fn zero_velocity_note_on_mode() {
    let codec = Codec::new(NoteOffMode::ZeroVelocityNoteOn);
    assert_eq!(codec.note_off_mode(), NoteOffMode::ZeroVelocityNoteOn);

    // Note-offs travel as status 9 with velocity 0; the release velocity is discarded.
    let off = MidiMessage::Channel {
        channel: chan(4),
        msg: ChannelMessage::NoteOff {
            key: u7::new(72),
            vel: u7::new(100),
        },
    };
    assert_eq!(codec.encode(&off).unwrap(), short(0x9, 3, 72, 0));

    // Status 9 decodes unchanged, velocity 0 included.
    assert_eq!(
        codec.decode(short(0x9, 3, 72, 0)),
        MidiMessage::Channel {
            channel: chan(4),
            msg: ChannelMessage::NoteOn {
                key: u7::new(72),
                vel: u7::new(0),
            },
        }
    );

    // An incoming status 8 still decodes, keeping decode total.
    assert_eq!(
        codec.decode(short(0x8, 3, 72, 40)),
        MidiMessage::Channel {
            channel: chan(4),
            msg: ChannelMessage::NoteOff {
                key: u7::new(72),
                vel: u7::new(40),
            },
        }
    );
}

#[test]
fn pitch_bend_round_trip() {
    let codec = Codec::default();
    for n in -8192..=8191_i16 {
        let msg = MidiMessage::Channel {
            channel: chan(6),
            msg: ChannelMessage::PitchBend {
                bend: PitchBend::from_int(n),
            },
        };
        let back = codec.decode(codec.encode(&msg).unwrap());
        assert_eq!(back, msg);
        match back.as_channel() {
            Some((_, ChannelMessage::PitchBend { bend })) => assert_eq!(bend.as_int(), n),
            other => panic!("expected pitch bend, got {:?}", other),
        }
    }
}

#[test]
fn pitch_bend_saturates() {
    let codec = Codec::default();
    let bent = |n: i16| {
        codec
            .encode(&MidiMessage::Channel {
                channel: chan(1),
                msg: ChannelMessage::PitchBend {
                    bend: PitchBend::from_int(n),
                },
            })
            .unwrap()
    };
    assert_eq!(bent(20000), bent(8191));
    assert_eq!(bent(-20000), bent(-8192));
    assert_eq!(PitchBend::from_int(8191), PitchBend::max_raw_value());
    assert_eq!(PitchBend::from_int(-8192), PitchBend::min_raw_value());
    assert_eq!(PitchBend::from_int(0), PitchBend::mid_raw_value());
}

#[test]
fn system_msg() {
    use crate::MidiMessage::*;
    let codec = Codec::default();
    test_equiv(
        &codec,
        &[
            (
                short(0xF, 0x2, 0x08, 0x01),
                SongPosition(crate::num::u14::new(136)),
            ),
            (short(0xF, 0x3, 1, 0), SongSelect(u7::new(1))),
            (short(0xF, 0x6, 0, 0), TuneRequest),
            (short(0xF, 0x8, 0, 0), TimingClock),
            (short(0xF, 0xA, 0, 0), Start),
            (short(0xF, 0xB, 0, 0), Continue),
            (short(0xF, 0xC, 0, 0), Stop),
            (short(0xF, 0xE, 0, 0), ActiveSensing),
            (short(0xF, 0xF, 0, 0), Reset),
        ],
    );
}

#[test]
fn undefined_subcodes_decode_totally() {
    let codec = Codec::default();
    for &sub in &[0x0, 0x1, 0x4, 0x5, 0x7, 0x9, 0xD] {
        for &data1 in &[0, 1, 64, 127] {
            for &data2 in &[0, 64, 127] {
                assert_eq!(
                    codec.decode(short(0xF, sub, data1, data2)),
                    MidiMessage::Undefined,
                );
            }
        }
    }
    // Status nibbles below 8 have no channel-voice meaning either.
    for status in 0..8 {
        assert_eq!(codec.decode(short(status, 3, 12, 34)), MidiMessage::Undefined);
    }
}

#[test]
fn unencodable_messages_fail() {
    let codec = Codec::default();
    assert_eq!(
        codec.encode(&MidiMessage::Undefined),
        Err(EncodeError::Undefined)
    );
    assert_eq!(
        codec.encode(&MidiMessage::SysEx(vec![1, 2, 3])),
        Err(EncodeError::SysEx)
    );
    assert_eq!(
        codec.encode(&MidiMessage::SysEx(Vec::new())),
        Err(EncodeError::SysEx)
    );
    assert!(EncodeError::SysEx.to_string().contains("sysex"));
}

#[test]
fn concrete_examples() {
    let codec = Codec::default();
    assert_eq!(
        codec.decode(short(0x9, 0, 60, 100)),
        MidiMessage::Channel {
            channel: chan(1),
            msg: ChannelMessage::NoteOn {
                key: u7::new(60),
                vel: u7::new(100),
            },
        }
    );
    assert_eq!(
        codec.decode(short(0xE, 5, 0, 64)),
        MidiMessage::Channel {
            channel: chan(6),
            msg: ChannelMessage::PitchBend {
                bend: PitchBend::from_int(0),
            },
        }
    );
    assert_eq!(
        codec
            .encode(&MidiMessage::Channel {
                channel: chan(1),
                msg: ChannelMessage::ProgramChange {
                    program: u7::new(12),
                },
            })
            .unwrap(),
        short(0xC, 0, 12, 0)
    );
}

#[test]
fn wire_bytes() {
    let cases: &[(&[u8], ShortMessage)] = &[
        (&[0x90, 64, 32], short(0x9, 0, 64, 32)),
        (&[0x87, 121, 127], short(0x8, 7, 121, 127)),
        (&[0xC7, 121], short(0xC, 7, 121, 0)),
        (&[0xDA, 90], short(0xD, 10, 90, 0)),
        (&[0xF2, 0x08, 0x01], short(0xF, 0x2, 0x08, 0x01)),
        (&[0xF3, 1], short(0xF, 0x3, 1, 0)),
        (&[0xF8], short(0xF, 0x8, 0, 0)),
        (&[0xFE], short(0xF, 0xE, 0, 0)),
    ];
    for (bytes, msg) in cases {
        assert_eq!(ShortMessage::from_bytes(bytes), Some(*msg));
        let mut buf = [0; 3];
        assert_eq!(msg.encode_bytes(&mut buf), *bytes);
    }

    assert_eq!(ShortMessage::from_bytes(&[]), None);
    // Data bytes are masked to 7 bits on the way in.
    assert_eq!(
        ShortMessage::from_bytes(&[0x95, 0xFF, 0x80]),
        Some(short(0x9, 5, 0x7F, 0x00))
    );
}

#[test]
fn packed_words() {
    let msg = short(0x9, 0, 60, 100);
    assert_eq!(msg.as_packed(), 0x0064_3C90);
    assert_eq!(ShortMessage::from_packed(0x0064_3C90), msg);

    for msg in &[
        short(0x8, 15, 127, 1),
        short(0xC, 3, 42, 0),
        short(0xF, 0x2, 0x08, 0x01),
    ] {
        assert_eq!(ShortMessage::from_packed(msg.as_packed()), *msg);
    }

    // The top byte of the word is ignored and data bytes are masked.
    assert_eq!(
        ShortMessage::from_packed(0xFF00_9085),
        ShortMessage::from_packed(0x0000_1085)
    );
}

#[test]
fn channel_numbering() {
    assert_eq!(Channel::new(0), None);
    assert_eq!(Channel::new(17), None);
    assert_eq!(Channel::new(16).unwrap().number(), 16);
    assert_eq!(Channel::from_raw(u4::new(0)).number(), 1);
    assert_eq!(Channel::from_raw(u4::new(15)).number(), 16);
    assert_eq!(chan(16).as_raw(), u4::new(15));
    assert_eq!(chan(3).to_string(), "3");
}

#[test]
fn decode_event_carries_timestamp() {
    let codec = Codec::default();
    let ev = codec.decode_event(12345, short(0xF, 0x8, 0, 0));
    assert_eq!(ev.timestamp, 12345);
    assert_eq!(ev.message, MidiMessage::TimingClock);
}

#[cfg(feature = "serde")]
mod serde_support {
    use super::*;

    #[test]
    fn message_round_trip() {
        let msgs = vec![
            MidiMessage::Channel {
                channel: chan(2),
                msg: ChannelMessage::NoteOn {
                    key: u7::new(60),
                    vel: u7::new(100),
                },
            },
            MidiMessage::SysEx(vec![0x7E, 0x7F, 0x09, 0x01]),
            MidiMessage::SongPosition(crate::num::u14::new(136)),
            MidiMessage::Undefined,
        ];
        for msg in msgs {
            let json = serde_json::to_string(&msg).unwrap();
            let back: MidiMessage = serde_json::from_str(&json).unwrap();
            assert_eq!(back, msg);
        }
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert!(serde_json::from_str::<crate::num::u7>("200").is_err());
        assert!(serde_json::from_str::<crate::num::u7>("127").is_ok());
        assert!(serde_json::from_str::<Channel>("0").is_err());
        assert!(serde_json::from_str::<Channel>("16").is_ok());
    }
}
