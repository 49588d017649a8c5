//! Notification channels: concrete behaviors for a [`BehaviorChain`].
//!
//! [`BehaviorChain`]: crate::domain::BehaviorChain

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use crate::application::ApplicationError;
use crate::domain::{Behavior, Message};
use crate::infrastructure::traits::MessageSink;

/// Supported delivery channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Email,
    Sms,
    Slack,
    /// Writes to the application log instead of the message sink
    Log,
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 4] = [
        ChannelKind::Email,
        ChannelKind::Sms,
        ChannelKind::Slack,
        ChannelKind::Log,
    ];

    /// Identifier used in config and on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            ChannelKind::Email => "email",
            ChannelKind::Sms => "sms",
            ChannelKind::Slack => "slack",
            ChannelKind::Log => "log",
        }
    }

    /// Human readable label used in delivered lines.
    pub fn label(&self) -> &'static str {
        match self {
            ChannelKind::Email => "email",
            ChannelKind::Sms => "SMS",
            ChannelKind::Slack => "Slack",
            ChannelKind::Log => "log",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ChannelKind {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ApplicationError::UnknownChannel(s.to_string()))
    }
}

/// Parse channel names, keeping their order.
pub fn parse_channels<S: AsRef<str>>(names: &[S]) -> Result<Vec<ChannelKind>, ApplicationError> {
    names.iter().map(|name| name.as_ref().parse()).collect()
}

/// One channel bound to its delivery sink.
pub struct Channel {
    kind: ChannelKind,
    sender: Option<String>,
    sink: Arc<dyn MessageSink>,
}

impl Channel {
    pub fn new(kind: ChannelKind, sender: Option<String>, sink: Arc<dyn MessageSink>) -> Self {
        Self { kind, sender, sink }
    }

    /// Line delivered for `message`.
    pub fn render(&self, message: &Message) -> String {
        let line = format!("Sending {} notification: {}", self.kind.label(), message);
        match &self.sender {
            Some(sender) => format!("[{}] {}", sender, line),
            None => line,
        }
    }
}

impl Behavior for Channel {
    fn name(&self) -> &str {
        self.kind.id()
    }

    fn invoke(&self, message: &Message) {
        let line = self.render(message);
        match self.kind {
            ChannelKind::Log => info!(target: "rcompose::notify", "{}", line),
            kind => {
                info!(channel = kind.id(), "delivering notification");
                self.sink.emit(&line);
            }
        }
    }
}
