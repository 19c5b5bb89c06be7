//! Relay event loop.
//!
//! Pulls events off a [`RelayEventStream`] and hands each one to its handler
//! on a separate task, so a slow signature or submission never holds up the
//! events behind it.

use std::sync::Arc;

use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info};

use crate::port::inbound::handler::{BidStatusHandler, OpportunityHandler};
use crate::port::outbound::relay::{RelayEvent, RelayEventStream};

/// Drive handlers from `stream` until the connection goes away.
///
/// Returns the disconnect reason once every handler still in flight has
/// finished.
pub async fn run_event_loop<S>(
    stream: &mut S,
    opportunities: Arc<dyn OpportunityHandler>,
    statuses: Arc<dyn BidStatusHandler>,
) -> String
where
    S: RelayEventStream + ?Sized,
{
    let mut in_flight = JoinSet::new();

    let reason = loop {
        tokio::select! {
            event = stream.next_event() => match event {
                Some(RelayEvent::Opportunity(opportunity)) => {
                    debug!(opportunity_id = %opportunity.opportunity_id(), "Dispatching opportunity");
                    let handler = Arc::clone(&opportunities);
                    in_flight.spawn(async move { handler.on_opportunity(opportunity).await });
                }
                Some(RelayEvent::BidStatus(update)) => {
                    debug!(bid_id = %update.id, "Dispatching bid status");
                    let handler = Arc::clone(&statuses);
                    in_flight.spawn(async move { handler.on_bid_status(update).await });
                }
                Some(RelayEvent::Disconnected { reason }) => break reason,
                None => break "event stream ended".to_string(),
            },
            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                reap(joined);
            }
        }
    };

    info!(reason = %reason, in_flight = in_flight.len(), "Relay event stream closed");

    while let Some(joined) = in_flight.join_next().await {
        reap(joined);
    }

    reason
}

fn reap(joined: Result<(), JoinError>) {
    if let Err(e) = joined {
        if e.is_panic() {
            error!(error = %e, "Event handler panicked");
        }
    }
}
