// MIDI routing and record-arm configuration
// Recording is active only when both the host and the plugin are armed.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MidiConfiguration {
    pub host_recording_armed: bool,
    pub plugin_recording_armed: bool,

    /// Input channel filter: -1 accepts every channel, 0-15 a single one
    pub input_channel: i8,

    /// Channel stamped on every emitted note event (0-15)
    pub output_channel: u8,
}

impl MidiConfiguration {
    /// Both arm flags set
    pub fn recording_armed(&self) -> bool {
        self.host_recording_armed && self.plugin_recording_armed
    }

    /// Whether input on `channel` passes the filter
    pub fn accepts_input_channel(&self, channel: u8) -> bool {
        self.input_channel < 0 || self.input_channel as u8 == channel
    }
}

impl Default for MidiConfiguration {
    fn default() -> Self {
        Self {
            host_recording_armed: false,
            plugin_recording_armed: false,
            input_channel: -1,
            output_channel: 0,
        }
    }
}
