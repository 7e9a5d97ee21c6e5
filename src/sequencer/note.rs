// Note representation for the sequencer
// A note is a quantized event with tick position, pitch, duration, and velocity

use serde::{Deserialize, Serialize};

/// A musical note inside a clip.
///
/// Positions and durations are in ticks (see [`crate::sequencer::PPQN`]),
/// relative to the start of the owning clip. Notes are immutable once
/// finalized; the recorder builds them and the clip owns them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Start position in ticks, `0 <= tick < clip length`
    pub tick: u32,

    /// MIDI note number (0-127, where 60 = C4)
    pub number: u8,

    /// Duration in ticks, always >= 1
    pub duration: u32,

    /// MIDI velocity (0-127)
    pub velocity: u8,
}

impl Note {
    /// Creates a new note
    ///
    /// Internal constructor with contract checks; host-supplied notes go
    /// through [`crate::sequencer::Clip::new`] which validates instead of
    /// panicking.
    pub fn new(tick: u32, number: u8, duration: u32, velocity: u8) -> Self {
        assert!(number <= 127, "MIDI note number must be 0-127");
        assert!(velocity <= 127, "MIDI velocity must be 0-127");
        assert!(duration > 0, "Note duration must be > 0");

        Self {
            tick,
            number,
            duration,
            velocity,
        }
    }

    /// First tick after this note ends
    pub fn end_tick(&self) -> u32 {
        self.tick + self.duration
    }
}
