// MIDI boundary types
// Channel-carrying note events and the routing/arm configuration

pub mod config;
pub mod event;

pub use config::MidiConfiguration;
pub use event::{MidiEvent, TimedMidiEvent};
