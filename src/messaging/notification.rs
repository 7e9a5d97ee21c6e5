// Notification types - audio thread -> control thread
// Tagged by an `event` field on the wire, mirroring the command `action` tag.

use crate::sequencer::note::Note;
use crate::sequencer::switcher::PendingSwitch;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum Notification {
    /// A clip switch became effective
    NowPlayingClip { id: String },

    /// The recorder finalized a note into the active clip; the editor
    /// persists it on its side of the boundary
    NoteAdded {
        tick: u32,
        number: u8,
        duration: u32,
        velocity: u8,
    },

    /// A `queueClip` command was accepted
    ClipQueued { id: String, timestamp: f64 },

    /// The queue was cleared
    ClipQueueCleared,

    /// Reply to `getQueueStatus`
    QueueStatus { queue: Vec<PendingSwitch> },
}

impl Notification {
    pub(crate) fn note_added(note: Note) -> Self {
        Self::NoteAdded {
            tick: note.tick,
            number: note.number,
            duration: note.duration,
            velocity: note.velocity,
        }
    }
}
