// Note recorder - turns live note-on/off input into finalized clip notes
// Start ticks are clip-relative; the scheduler flushes every hold before the
// loop counter wraps, so a hold never spans the clip boundary.

use crate::sequencer::clip::Clip;
use crate::sequencer::note::Note;
use std::collections::HashMap;

/// A note currently held down during recording
#[derive(Debug, Clone, Copy)]
struct HeldNote {
    start_tick: u32,
    velocity: u8,
}

/// Live input recorder.
///
/// One hold per note number (monophonic-per-number policy). Every operation
/// takes the active clip explicitly; finalized notes are appended to it and
/// returned so the caller can notify the editor.
#[derive(Debug, Default)]
pub struct NoteRecorder {
    held: HashMap<u8, HeldNote>,
}

impl NoteRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of notes currently held
    pub fn held_count(&self) -> usize {
        self.held.len()
    }

    /// Open a hold for `number` at `tick`.
    ///
    /// A retrigger of an already-held number finalizes the previous hold at
    /// `tick` before opening the new one; the closed note (if any) is
    /// returned.
    pub fn note_on(&mut self, number: u8, velocity: u8, tick: u32, clip: &mut Clip) -> Option<Note> {
        let closed = self.close(number, tick, clip);
        self.held.insert(
            number,
            HeldNote {
                start_tick: tick,
                velocity,
            },
        );
        closed
    }

    /// Close the hold for `number` at `tick`, if one exists.
    /// A note-off with no matching hold is benign and ignored.
    pub fn note_off(&mut self, number: u8, tick: u32, clip: &mut Clip) -> Option<Note> {
        self.close(number, tick, clip)
    }

    /// Close every hold at `at_tick` and clear the recorder.
    /// Used when the loop wraps and when recording is disarmed.
    pub fn finalize_all(&mut self, at_tick: u32, clip: &mut Clip) -> Vec<Note> {
        let held = std::mem::take(&mut self.held);

        let mut closed = Vec::with_capacity(held.len());
        for (number, hold) in held {
            if let Some(note) = Self::finalize(number, hold, at_tick, clip) {
                closed.push(note);
            }
        }
        closed
    }

    fn close(&mut self, number: u8, at_tick: u32, clip: &mut Clip) -> Option<Note> {
        let hold = self.held.remove(&number)?;
        Self::finalize(number, hold, at_tick, clip)
    }

    /// Duration floor of 1 tick: a zero-length hold (closed within the same
    /// tick it started) still becomes a playable note.
    fn finalize(number: u8, hold: HeldNote, at_tick: u32, clip: &mut Clip) -> Option<Note> {
        let duration = at_tick.saturating_sub(hold.start_tick).max(1);
        let note = Note {
            tick: hold.start_tick,
            number,
            duration,
            velocity: hold.velocity,
        };
        clip.append_note(note).then_some(note)
    }
}
