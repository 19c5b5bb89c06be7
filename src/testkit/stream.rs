//! Mock [`RelayEventStream`] implementations for testing.
//!
//! - [`ScriptedEventStream`]: a fixed event queue, then end-of-stream.
//! - [`ChannelEventStream`]: channel-backed stream with an external control
//!   handle, for tests that need on-demand event delivery.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::port::outbound::relay::{RelayEvent, RelayEventStream};

// ---------------------------------------------------------------------------
// ScriptedEventStream
// ---------------------------------------------------------------------------

/// A stream that yields a fixed list of events and then ends.
pub struct ScriptedEventStream {
    events: VecDeque<RelayEvent>,
}

impl ScriptedEventStream {
    pub fn new(events: Vec<RelayEvent>) -> Self {
        Self {
            events: events.into(),
        }
    }

    /// Events not yet consumed.
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

#[async_trait]
impl RelayEventStream for ScriptedEventStream {
    async fn next_event(&mut self) -> Option<RelayEvent> {
        self.events.pop_front()
    }
}

// ---------------------------------------------------------------------------
// ChannelEventStream
// ---------------------------------------------------------------------------

/// A stream controlled externally via a [`ChannelEventStreamHandle`].
pub struct ChannelEventStream {
    event_rx: mpsc::Receiver<Option<RelayEvent>>,
}

/// Control handle for a [`ChannelEventStream`].
#[derive(Clone)]
pub struct ChannelEventStreamHandle {
    event_tx: mpsc::Sender<Option<RelayEvent>>,
}

impl ChannelEventStreamHandle {
    /// Send an event to the stream.
    pub async fn send(&self, event: RelayEvent) {
        let _ = self.event_tx.send(Some(event)).await;
    }

    /// Signal end-of-stream (causes `next_event` to return `None`).
    pub async fn close(&self) {
        let _ = self.event_tx.send(None).await;
    }
}

/// Create a [`ChannelEventStream`] and its control handle.
pub fn channel_event_stream(buffer: usize) -> (ChannelEventStream, ChannelEventStreamHandle) {
    let (event_tx, event_rx) = mpsc::channel(buffer);
    (
        ChannelEventStream { event_rx },
        ChannelEventStreamHandle { event_tx },
    )
}

#[async_trait]
impl RelayEventStream for ChannelEventStream {
    async fn next_event(&mut self) -> Option<RelayEvent> {
        match self.event_rx.recv().await {
            Some(Some(event)) => Some(event),
            Some(None) | None => None,
        }
    }
}
