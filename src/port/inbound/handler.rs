//! Handler contracts for inbound relay events.
//!
//! Each inbound event kind has its own handler contract. Handlers return
//! nothing: every failure inside a handler is reported and contained there,
//! so the loop driving them never has to decide what to do with one.

use async_trait::async_trait;

use crate::domain::opportunity::Opportunity;
use crate::domain::status::BidStatusUpdate;

/// Consumer of opportunity notifications.
///
/// Invoked once per opportunity, possibly concurrently for distinct
/// opportunities.
#[async_trait]
pub trait OpportunityHandler: Send + Sync {
    async fn on_opportunity(&self, opportunity: Opportunity);
}

/// Consumer of bid status updates.
///
/// Invoked once per update, concurrently with other updates and with
/// opportunity handling.
#[async_trait]
pub trait BidStatusHandler: Send + Sync {
    async fn on_bid_status(&self, update: BidStatusUpdate);
}
