// Clip - loopable container of quantized notes
// A clip answers "which notes start at tick T" for the scheduler while the
// recorder appends to it, so notes live in an append-only arena with a
// tick -> index multimap maintained incrementally on every append.

use crate::error::EngineError;
use crate::sequencer::note::Note;
use std::collections::HashMap;

/// Unique identifier for clips, assigned by the external editor
pub type ClipId = String;

/// A clip of recorded notes over a fixed tick length.
///
/// Invariants: `length > 0`, every note satisfies `tick < length`, and no
/// two notes share the same `(tick, number)` pair.
#[derive(Debug, Clone)]
pub struct Clip {
    id: ClipId,
    length: u32,

    /// Append-only note arena; indices stay stable for the session
    notes: Vec<Note>,

    /// Tick -> arena indices, in append order per tick
    index: HashMap<u32, Vec<usize>>,
}

impl Clip {
    /// Build a clip from a host-supplied definition, validating every note.
    pub fn new(id: impl Into<ClipId>, length: u32, notes: &[Note]) -> Result<Self, EngineError> {
        if length == 0 {
            return Err(EngineError::EmptyClip);
        }

        let mut clip = Self {
            id: id.into(),
            length,
            notes: Vec::with_capacity(notes.len()),
            index: HashMap::new(),
        };

        for note in notes {
            clip.validate(note)?;
            if clip.contains(note.tick, note.number) {
                return Err(EngineError::DuplicateNote {
                    tick: note.tick,
                    number: note.number,
                });
            }
            clip.push(*note);
        }

        Ok(clip)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Loop length in ticks
    pub fn length(&self) -> u32 {
        self.length
    }

    /// All notes, in append order
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// All notes whose position equals `tick % length`, in append order.
    pub fn notes_for_tick(&self, tick: u32) -> impl Iterator<Item = &Note> + '_ {
        self.index
            .get(&(tick % self.length))
            .into_iter()
            .flatten()
            .map(|&slot| &self.notes[slot])
    }

    /// Whether a note already starts at `(tick, number)`
    pub fn contains(&self, tick: u32, number: u8) -> bool {
        self.index
            .get(&tick)
            .is_some_and(|slots| slots.iter().any(|&slot| self.notes[slot].number == number))
    }

    /// Append one finalized note (recorder path).
    ///
    /// The tick is folded into the clip range; an exact `(tick, number)`
    /// duplicate is skipped. Returns whether the note was added.
    pub fn append_note(&mut self, note: Note) -> bool {
        let note = Note {
            tick: note.tick % self.length,
            duration: note.duration.max(1),
            ..note
        };

        if self.contains(note.tick, note.number) {
            return false;
        }

        self.push(note);
        true
    }

    fn validate(&self, note: &Note) -> Result<(), EngineError> {
        if note.duration == 0 {
            return Err(EngineError::ZeroDurationNote { tick: note.tick });
        }
        if note.tick >= self.length {
            return Err(EngineError::NoteOutOfRange {
                tick: note.tick,
                length: self.length,
            });
        }
        if note.number > 127 {
            return Err(EngineError::InvalidMidiValue { value: note.number });
        }
        if note.velocity > 127 {
            return Err(EngineError::InvalidMidiValue {
                value: note.velocity,
            });
        }
        Ok(())
    }

    fn push(&mut self, note: Note) {
        let slot = self.notes.len();
        self.notes.push(note);
        self.index.entry(note.tick).or_default().push(slot);
    }
}
