// Piano-roll sequencer engine
// Tick-accurate clip playback, gapless clip switching, and live note
// recording, driven by a host transport clock inside a real-time callback.

pub mod engine;
pub mod error;
pub mod messaging;
pub mod midi;
pub mod sequencer;

// Re-export commonly used types for convenience
pub use engine::SequencerEngine;
pub use error::EngineError;
pub use messaging::channels::{
    create_command_channel, create_notification_channel, DEFAULT_CHANNEL_CAPACITY,
};
pub use messaging::command::Command;
pub use messaging::notification::Notification;
pub use midi::config::MidiConfiguration;
pub use midi::event::{MidiEvent, TimedMidiEvent};
pub use sequencer::clip::{Clip, ClipId};
pub use sequencer::note::Note;
pub use sequencer::recorder::NoteRecorder;
pub use sequencer::scheduler::{LOOKAHEAD_SECONDS, TickScheduler};
pub use sequencer::switcher::{ClipSwitchController, PendingSwitch};
pub use sequencer::transport::TransportSnapshot;
pub use sequencer::PPQN;
