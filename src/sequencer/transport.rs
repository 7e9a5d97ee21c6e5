// Transport snapshot - read-only view of the host clock
// Replaced wholesale on every host transport update; the scheduler keeps at
// most one snapshot and derives all musical-time math from it.

use crate::sequencer::PPQN;
use serde::{Deserialize, Serialize};

/// Per-callback view of the host transport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportSnapshot {
    pub playing: bool,

    /// Tempo in beats per minute, > 0
    #[serde(rename = "tempo")]
    pub tempo_bpm: f64,

    /// Bar index the host is currently in
    pub current_bar: u32,

    /// Wall-clock time (seconds) at which the current bar started
    pub current_bar_started: f64,

    /// Beats per bar, > 0
    pub time_sig_numerator: u32,
}

impl TransportSnapshot {
    /// Beat position of the current bar's first beat
    pub fn bar_start_beats(&self) -> f64 {
        (self.current_bar as u64 * self.time_sig_numerator as u64) as f64
    }

    /// Absolute tick of the current bar's first tick
    pub fn bar_start_tick(&self) -> i64 {
        self.current_bar as i64 * self.time_sig_numerator as i64 * PPQN as i64
    }

    /// Continuous beat position at `time`, extrapolated from the bar start
    pub fn beat_position_at(&self, time: f64) -> f64 {
        self.bar_start_beats() + (self.tempo_bpm / 60.0) * (time - self.current_bar_started)
    }

    /// Absolute tick at `time`, floored to the last started tick
    pub fn absolute_tick_at(&self, time: f64) -> i64 {
        (self.beat_position_at(time) * PPQN as f64).floor() as i64
    }

    /// Real-time duration of one tick in seconds
    pub fn seconds_per_tick(&self) -> f64 {
        60.0 / (self.tempo_bpm * PPQN as f64)
    }
}
