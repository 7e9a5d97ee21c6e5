// Sequencer module
// Clip data model, transport snapshot, clip switching, recording and the
// tick-accurate scheduler that drives them.

pub mod clip;
pub mod note;
pub mod recorder;
pub mod scheduler;
pub mod switcher;
pub mod transport;

pub use clip::{Clip, ClipId};
pub use note::Note;
pub use recorder::NoteRecorder;
pub use scheduler::{LOOKAHEAD_SECONDS, TickScheduler};
pub use switcher::{ClipSwitchController, PendingSwitch};
pub use transport::TransportSnapshot;

/// Pulses (ticks) per quarter note. Every musical position in the engine is
/// expressed in this resolution.
pub const PPQN: u32 = 24;
