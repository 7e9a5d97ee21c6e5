// Messaging - control-thread <-> audio-thread communication
// Command and notification types plus the lock-free channels carrying them

pub mod channels;
pub mod command;
pub mod notification;

pub use channels::{
    create_command_channel, create_notification_channel, CommandConsumer, CommandProducer,
    NotificationConsumer, NotificationProducer,
};
pub use command::Command;
pub use notification::Notification;
