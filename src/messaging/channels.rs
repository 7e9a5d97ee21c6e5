// Lock-free communication channels
// Single-producer/single-consumer ring buffers: the control thread pushes
// commands, the audio callback pops them (and the reverse for
// notifications). Neither side ever blocks.

use crate::messaging::command::Command;
use crate::messaging::notification::Notification;
use ringbuf::{HeapRb, traits::Split};

/// Default capacity for both channel directions; a burst larger than this
/// between two callbacks drops the overflow.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

pub type CommandProducer = ringbuf::HeapProd<Command>;
pub type CommandConsumer = ringbuf::HeapCons<Command>;

pub fn create_command_channel(capacity: usize) -> (CommandProducer, CommandConsumer) {
    let rb = HeapRb::<Command>::new(capacity);
    rb.split()
}

pub type NotificationProducer = ringbuf::HeapProd<Notification>;
pub type NotificationConsumer = ringbuf::HeapCons<Notification>;

pub fn create_notification_channel(
    capacity: usize,
) -> (NotificationProducer, NotificationConsumer) {
    let rb = HeapRb::<Notification>::new(capacity);
    rb.split()
}
