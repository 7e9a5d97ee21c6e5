// Sequencer engine - per-callback shell around the tick scheduler
// Drains the command channel, applies each command as an instantaneous state
// replacement, runs the scheduler, and publishes notifications. This is the
// only entry point the audio callback needs.

use ringbuf::traits::{Consumer, Producer};

use crate::messaging::channels::{CommandConsumer, NotificationProducer};
use crate::messaging::command::Command;
use crate::messaging::notification::Notification;
use crate::midi::event::TimedMidiEvent;
use crate::sequencer::clip::Clip;
use crate::sequencer::scheduler::TickScheduler;

pub struct SequencerEngine {
    scheduler: TickScheduler,
    command_rx: CommandConsumer,
    notification_tx: NotificationProducer,

    // scratch buffers reused across callbacks; cleared, capacity retained,
    // so the steady-state callback does not grow the heap
    events: Vec<TimedMidiEvent>,
    notifications: Vec<Notification>,
}

impl SequencerEngine {
    pub fn new(command_rx: CommandConsumer, notification_tx: NotificationProducer) -> Self {
        Self {
            scheduler: TickScheduler::new(),
            command_rx,
            notification_tx,
            events: Vec::with_capacity(256),
            notifications: Vec::with_capacity(64),
        }
    }

    /// Run one audio callback starting at `now` (seconds).
    ///
    /// Returns the note events due within the lookahead window, sorted
    /// ascending by timestamp.
    pub fn process_block(&mut self, now: f64) -> &[TimedMidiEvent] {
        self.events.clear();

        while let Some(command) = self.command_rx.try_pop() {
            self.apply_command(command);
        }

        self.scheduler
            .process(now, &mut self.events, &mut self.notifications);

        // intra-callback ordering guarantee; stable, so an on/off pair with
        // equal timestamps keeps its emission order
        self.events.sort_by(|a, b| a.time.total_cmp(&b.time));

        self.flush_notifications();
        &self.events
    }

    fn apply_command(&mut self, command: Command) {
        match command {
            Command::DefineClip { id, length, notes } => {
                // a malformed definition registers nothing; the host
                // observes the missing clip through queue/now-playing status
                if let Ok(clip) = Clip::new(id, length, &notes) {
                    self.scheduler.define_clip(clip);
                }
            }
            Command::PlayClip { id } => self.scheduler.play_clip(id),
            Command::ScheduleClip { id, timestamp } => self.scheduler.schedule_clip(id, timestamp),
            Command::CancelScheduledClip => self.scheduler.cancel_scheduled_clip(),
            Command::QueueClip { id, timestamp } => {
                self.scheduler.queue_clip(id.clone(), timestamp);
                self.notifications
                    .push(Notification::ClipQueued { id, timestamp });
            }
            Command::ClearClipQueue => {
                self.scheduler.clear_clip_queue();
                self.notifications.push(Notification::ClipQueueCleared);
            }
            Command::GetQueueStatus => {
                self.notifications.push(Notification::QueueStatus {
                    queue: self.scheduler.queue_snapshot(),
                });
            }
            Command::SetMidiConfig { config } => self
                .scheduler
                .set_midi_config(config, &mut self.notifications),
            Command::SetTransport { transport } => self.scheduler.set_transport(transport),
            Command::MidiInput { event, time } => self
                .scheduler
                .handle_midi_input(event, time, &mut self.notifications),
        }
    }

    fn flush_notifications(&mut self) {
        for notification in self.notifications.drain(..) {
            // a saturated ring drops the notification rather than blocking
            let _ = self.notification_tx.try_push(notification);
        }
    }

    /// Read access to the real-time state, for host-side status queries
    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }
}
