// Command types - control thread -> audio thread
// Applied as instantaneous state replacements at the start of a callback,
// never mid-advance. The serde shape (an `action` tag plus camelCase
// payload fields) is the host message contract.

use crate::midi::config::MidiConfiguration;
use crate::midi::event::MidiEvent;
use crate::sequencer::note::Note;
use crate::sequencer::transport::TransportSnapshot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Command {
    /// Register or replace a clip
    DefineClip {
        id: String,
        length: u32,
        notes: Vec<Note>,
    },

    /// Switch to `id` on the next callback
    PlayClip { id: String },

    /// Switch to `id` once `timestamp` is reached (<= 0 means immediately)
    ScheduleClip { id: String, timestamp: f64 },

    /// Drop the pending immediate/scheduled switch
    CancelScheduledClip,

    /// Append a switch to the ordered queue
    QueueClip { id: String, timestamp: f64 },

    /// Drop the whole queue
    ClearClipQueue,

    /// Ask for a `queueStatus` notification
    GetQueueStatus,

    /// Replace the MIDI routing/arm configuration
    SetMidiConfig { config: MidiConfiguration },

    /// Replace the transport snapshot
    SetTransport { transport: TransportSnapshot },

    /// Live performance input, tagged with its arrival time in seconds
    MidiInput { event: MidiEvent, time: f64 },
}
