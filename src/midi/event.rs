// MIDI note events
// The engine consumes and emits only note-on/note-off; everything else on
// the wire is ignored at parse time.

use serde::{Deserialize, Serialize};

const NOTE_ON: u8 = 0x90;
const NOTE_OFF: u8 = 0x80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MidiEvent {
    NoteOn { channel: u8, note: u8, velocity: u8 },
    NoteOff { channel: u8, note: u8, velocity: u8 },
}

impl MidiEvent {
    /// Parse a raw MIDI message
    ///
    /// Only note messages produce an event. A note-on with velocity 0 is a
    /// note-off, per the MIDI running-status convention.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 3 {
            return None;
        }

        let status = bytes[0] & 0xF0;
        let channel = bytes[0] & 0x0F;
        let note = bytes[1];
        let velocity = bytes[2];

        match status {
            NOTE_ON if velocity == 0 => Some(MidiEvent::NoteOff {
                channel,
                note,
                velocity: 0,
            }),
            NOTE_ON => Some(MidiEvent::NoteOn {
                channel,
                note,
                velocity,
            }),
            NOTE_OFF => Some(MidiEvent::NoteOff {
                channel,
                note,
                velocity,
            }),
            _ => None,
        }
    }

    /// Raw wire form of this event
    pub fn to_bytes(&self) -> [u8; 3] {
        match *self {
            MidiEvent::NoteOn {
                channel,
                note,
                velocity,
            } => [NOTE_ON | (channel & 0x0F), note, velocity],
            MidiEvent::NoteOff {
                channel,
                note,
                velocity,
            } => [NOTE_OFF | (channel & 0x0F), note, velocity],
        }
    }

    pub fn channel(&self) -> u8 {
        match *self {
            MidiEvent::NoteOn { channel, .. } | MidiEvent::NoteOff { channel, .. } => channel,
        }
    }

    pub fn note(&self) -> u8 {
        match *self {
            MidiEvent::NoteOn { note, .. } | MidiEvent::NoteOff { note, .. } => note,
        }
    }
}

/// MIDI event with an absolute timestamp in seconds.
/// This is the audio-rate output of the engine; `time` is host wall-clock
/// time at which the event should sound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedMidiEvent {
    pub event: MidiEvent,
    pub time: f64,
}
