//! Inbound relay event stream.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::port::outbound::relay::{RelayEvent, RelayEventStream};

/// Channel-backed stream of events produced by the relay reader task.
pub struct WsEventStream {
    events: mpsc::Receiver<RelayEvent>,
}

impl WsEventStream {
    pub(crate) fn new(events: mpsc::Receiver<RelayEvent>) -> Self {
        Self { events }
    }
}

#[async_trait]
impl RelayEventStream for WsEventStream {
    async fn next_event(&mut self) -> Option<RelayEvent> {
        self.events.recv().await
    }
}
