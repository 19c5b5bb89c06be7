//! Relay port for subscriptions, bid submission and inbound events.
//!
//! The relay connection is split in two halves: a shared [`RelayClient`]
//! used concurrently by handlers to issue requests, and a single
//! [`RelayEventStream`] owned by the event loop.

use async_trait::async_trait;

use crate::domain::bid::OpportunityBid;
use crate::domain::id::{BidId, ChainId};
use crate::domain::opportunity::Opportunity;
use crate::domain::status::BidStatusUpdate;
use crate::error::Error;

/// Events received from the relay.
#[derive(Debug, Clone)]
pub enum RelayEvent {
    /// A new opportunity was published.
    Opportunity(Opportunity),
    /// A previously submitted bid changed status.
    BidStatus(BidStatusUpdate),
    /// Connection lost. No further events follow.
    Disconnected {
        /// The disconnection reason.
        reason: String,
    },
}

/// Request side of a relay connection.
///
/// Implementations must be safe to share between concurrently running
/// handlers.
#[async_trait]
pub trait RelayClient: Send + Sync {
    /// Subscribe to opportunities for the given chains.
    async fn subscribe(&self, chain_ids: &[ChainId]) -> Result<(), Error>;

    /// Submit a signed bid and return the relay-assigned bid id.
    async fn submit_bid(&self, bid: &OpportunityBid) -> Result<BidId, Error>;

    /// Close the connection.
    ///
    /// Idempotent: closing an already closed connection does nothing.
    async fn close(&self);

    /// Whether `close()` has been called or the connection was lost.
    fn is_closed(&self) -> bool;

    /// Get the relay name for logging/debugging.
    fn relay_name(&self) -> &'static str;
}

/// Inbound event side of a relay connection.
#[async_trait]
pub trait RelayEventStream: Send {
    /// Receive the next relay event.
    ///
    /// Returns `None` when the stream is closed.
    async fn next_event(&mut self) -> Option<RelayEvent>;
}
