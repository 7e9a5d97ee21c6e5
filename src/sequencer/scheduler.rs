// Tick scheduler - the real-time heart of the engine
//
// Converts the host transport clock into a monotonic stream of musical ticks
// under a fixed lookahead window and emits timestamped note events for the
// active clip. The single catch-up while-loop is what guarantees no tick is
// skipped even when a callback arrives late: ticks are processed in strictly
// increasing order across callbacks, and everything downstream relies on
// that ordering.

use crate::messaging::notification::Notification;
use crate::midi::config::MidiConfiguration;
use crate::midi::event::{MidiEvent, TimedMidiEvent};
use crate::sequencer::clip::{Clip, ClipId};
use crate::sequencer::recorder::NoteRecorder;
use crate::sequencer::switcher::{ClipSwitchController, PendingSwitch};
use crate::sequencer::transport::TransportSnapshot;
use std::collections::HashMap;

/// How far ahead of the callback time events are scheduled. Large enough
/// that every event lands inside the next block, small enough that the host
/// can still honor the timestamps.
pub const LOOKAHEAD_SECONDS: f64 = 0.05;

/// Shaved off every note-off timestamp so the off strictly precedes the next
/// on of the same tick cycle, even for 1-tick notes.
const NOTE_OFF_EPSILON: f64 = 0.001;

/// Clip id the scheduler targets before the host selects one
pub const DEFAULT_CLIP_ID: &str = "default";

pub struct TickScheduler {
    /// Absolute monotonic tick counter; -1 means "not yet started"
    ticks: i64,

    /// Absolute tick of the bar the current play phase locked onto
    starting_ticks: i64,

    is_playing: bool,
    transport: Option<TransportSnapshot>,

    clips: HashMap<ClipId, Clip>,
    current_clip_id: ClipId,

    switcher: ClipSwitchController,
    recorder: NoteRecorder,
    config: MidiConfiguration,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self {
            ticks: -1,
            starting_ticks: 0,
            is_playing: false,
            transport: None,
            clips: HashMap::new(),
            current_clip_id: DEFAULT_CLIP_ID.to_string(),
            switcher: ClipSwitchController::new(),
            recorder: NoteRecorder::new(),
            config: MidiConfiguration::default(),
        }
    }

    // --- control-channel state replacements, applied between callbacks ---

    /// Register or replace a clip. Holders of the same id keep playing the
    /// new version from the next callback on.
    pub fn define_clip(&mut self, clip: Clip) {
        self.clips.insert(clip.id().to_string(), clip);
    }

    pub fn play_clip(&mut self, id: ClipId) {
        self.switcher.set_immediate(id);
    }

    /// A timestamp at or before zero behaves as an immediate switch
    pub fn schedule_clip(&mut self, id: ClipId, timestamp: f64) {
        if timestamp <= 0.0 {
            self.switcher.set_immediate(id);
        } else {
            self.switcher.schedule(id, timestamp);
        }
    }

    pub fn cancel_scheduled_clip(&mut self) {
        self.switcher.cancel_pending();
    }

    pub fn queue_clip(&mut self, id: ClipId, timestamp: f64) {
        self.switcher.enqueue(id, timestamp);
    }

    pub fn clear_clip_queue(&mut self) {
        self.switcher.clear_queue();
    }

    pub fn queue_snapshot(&self) -> Vec<PendingSwitch> {
        self.switcher.queue_snapshot()
    }

    /// Install a new transport snapshot, replacing the previous one
    /// wholesale.
    ///
    /// Clearing `is_playing` re-arms the start edge, so the next callback
    /// recomputes `starting_ticks` from the newly reported bar and tick
    /// timestamps stay phase-locked through tempo and bar updates.
    pub fn set_transport(&mut self, transport: TransportSnapshot) {
        self.transport = Some(transport);
        self.is_playing = false;
    }

    /// Swap the MIDI configuration. An armed -> disarmed transition closes
    /// every held recorder note at the current tick before the swap, rather
    /// than discarding them.
    pub fn set_midi_config(
        &mut self,
        config: MidiConfiguration,
        notifications: &mut Vec<Notification>,
    ) {
        if self.config.recording_armed() && !config.recording_armed() {
            if let Some(clip) = self.clips.get_mut(&self.current_clip_id) {
                // before the first tick of a play phase the counter is -1;
                // close at tick 0 rather than at the folded end of the clip
                let at_tick = self.ticks.max(0).rem_euclid(clip.length() as i64) as u32;
                for note in self.recorder.finalize_all(at_tick, clip) {
                    notifications.push(Notification::note_added(note));
                }
            }
        }
        self.config = config;
    }

    // --- live input ---

    /// Route one live note event to the recorder, under the recording gate:
    /// both arm flags set, transport rolling since before the event, and the
    /// event's channel passing the input filter. Anything else is a silent
    /// no-op.
    pub fn handle_midi_input(
        &mut self,
        event: MidiEvent,
        time: f64,
        notifications: &mut Vec<Notification>,
    ) {
        if !self.config.recording_armed() {
            return;
        }
        let Some(transport) = self.transport else {
            return;
        };
        if !transport.playing || transport.current_bar_started > time {
            return;
        }
        if !self.config.accepts_input_channel(event.channel()) {
            return;
        }
        let Some(clip) = self.clips.get_mut(&self.current_clip_id) else {
            return;
        };

        let tick = transport
            .absolute_tick_at(time)
            .rem_euclid(clip.length() as i64) as u32;

        let closed = match event {
            MidiEvent::NoteOn { note, velocity, .. } => {
                self.recorder.note_on(note, velocity, tick, clip)
            }
            MidiEvent::NoteOff { note, .. } => self.recorder.note_off(note, tick, clip),
        };

        if let Some(note) = closed {
            notifications.push(Notification::note_added(note));
        }
    }

    // --- per-callback processing ---

    /// Advance the scheduler for one audio callback starting at `now`.
    ///
    /// Emits note events (timestamped within `[now, now + lookahead]`) into
    /// `events` and editor notifications into `notifications`.
    pub fn process(
        &mut self,
        now: f64,
        events: &mut Vec<TimedMidiEvent>,
        notifications: &mut Vec<Notification>,
    ) {
        // 1. resolve due clip switches; an id naming no registered clip
        //    never becomes current and fires no notification
        for id in self.switcher.resolve(now) {
            if self.clips.contains_key(&id) {
                notifications.push(Notification::NowPlayingClip { id: id.clone() });
                self.current_clip_id = id;
            }
        }

        // 2. without a clip and a transport snapshot there is nothing to do
        let Some(transport) = self.transport else {
            return;
        };
        let Some(clip) = self.clips.get_mut(&self.current_clip_id) else {
            return;
        };

        // 3. start edge: lock phase to the bar the host reports. Rewind one
        //    tick so the catch-up loop below lands exactly on the bar's
        //    first tick (it pre-increments before evaluating).
        if !self.is_playing && transport.playing && transport.current_bar_started <= now {
            self.is_playing = true;
            self.starting_ticks = transport.bar_start_tick();
            self.ticks = self.starting_ticks - 1;
        }

        // 4. stop edge: the tick counter is deliberately left where it is;
        //    a fresh start recomputes it from the reported bar
        if !transport.playing && self.is_playing {
            self.is_playing = false;
        }

        // 5. advance up to the lookahead horizon
        let scheduler_time = now + LOOKAHEAD_SECONDS;
        if !transport.playing || transport.current_bar_started > scheduler_time {
            return;
        }

        let absolute_tick = transport.absolute_tick_at(scheduler_time);
        let length = clip.length() as i64;
        let clip_position = absolute_tick.rem_euclid(length);

        // loop wrap: the modulo counter rolled over, so close any note still
        // held before it can bleed across. Holds end at the exclusive loop
        // end, so a note held from tick T gets duration `length - T`.
        // Skipped while the counter sits at -1 (start edge just re-armed):
        // no tick has played yet, so nothing can have wrapped.
        if self.config.recording_armed()
            && self.ticks >= 0
            && self.ticks.rem_euclid(length) > clip_position
        {
            for note in self.recorder.finalize_all(clip.length(), clip) {
                notifications.push(Notification::note_added(note));
            }
        }

        let seconds_per_tick = transport.seconds_per_tick();
        let channel = self.config.output_channel;

        while self.ticks < absolute_tick {
            self.ticks += 1;

            let tick_moment = transport.current_bar_started
                + (self.ticks - self.starting_ticks) as f64 * seconds_per_tick;

            for note in clip.notes_for_tick(self.ticks.rem_euclid(length) as u32) {
                events.push(TimedMidiEvent {
                    event: MidiEvent::NoteOn {
                        channel,
                        note: note.number,
                        velocity: note.velocity,
                    },
                    time: tick_moment,
                });
                events.push(TimedMidiEvent {
                    event: MidiEvent::NoteOff {
                        channel,
                        note: note.number,
                        velocity: note.velocity,
                    },
                    time: tick_moment + note.duration as f64 * seconds_per_tick
                        - NOTE_OFF_EPSILON,
                });
            }
        }
    }

    // --- inspection ---

    pub fn ticks(&self) -> i64 {
        self.ticks
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn current_clip_id(&self) -> &str {
        &self.current_clip_id
    }

    pub fn clip(&self, id: &str) -> Option<&Clip> {
        self.clips.get(id)
    }

    pub fn current_clip(&self) -> Option<&Clip> {
        self.clips.get(&self.current_clip_id)
    }

    pub fn midi_config(&self) -> &MidiConfiguration {
        &self.config
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}
