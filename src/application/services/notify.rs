//! Notification service
//!
//! Builds a behavior chain out of delivery channels and fires it.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::channels::{Channel, ChannelKind};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{BehaviorChain, Message};
use crate::infrastructure::traits::MessageSink;

/// Service for sending a message through an ordered set of channels.
pub struct NotificationService {
    sink: Arc<dyn MessageSink>,
    sender: Option<String>,
}

impl NotificationService {
    pub fn new(sink: Arc<dyn MessageSink>, sender: Option<String>) -> Self {
        Self { sink, sender }
    }

    /// Chain delivering through `channels`; the first channel delivers first.
    pub fn build_chain(&self, channels: &[ChannelKind]) -> ApplicationResult<BehaviorChain> {
        let (first, rest) = channels
            .split_first()
            .ok_or(ApplicationError::EmptyChain)?;

        let chain = rest
            .iter()
            .fold(BehaviorChain::new(self.channel(*first)), |chain, kind| {
                chain.decorate(self.channel(*kind))
            });
        debug!("built chain: {:?}", chain.names());
        Ok(chain)
    }

    /// Deliver `message` once through every channel. Returns the number of deliveries.
    #[instrument(level = "debug", skip(self))]
    pub fn send(&self, channels: &[ChannelKind], message: &Message) -> ApplicationResult<usize> {
        let chain = self.build_chain(channels)?;
        chain.invoke(message);
        Ok(chain.len())
    }

    fn channel(&self, kind: ChannelKind) -> Channel {
        Channel::new(kind, self.sender.clone(), Arc::clone(&self.sink))
    }
}
