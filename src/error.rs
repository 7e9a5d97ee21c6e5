// Control-boundary errors
// The real-time path never surfaces these; they only occur while validating
// host-supplied payloads (clip definitions) before they reach the scheduler.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    #[error("clip length must be at least 1 tick")]
    EmptyClip,

    #[error("note at tick {tick} is outside clip of length {length}")]
    NoteOutOfRange { tick: u32, length: u32 },

    #[error("note at tick {tick} has zero duration")]
    ZeroDurationNote { tick: u32 },

    #[error("duplicate note at (tick {tick}, number {number})")]
    DuplicateNote { tick: u32, number: u8 },

    #[error("MIDI value {value} out of range 0-127")]
    InvalidMidiValue { value: u8 },
}
