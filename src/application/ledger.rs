//! In-memory bid ledger.
//!
//! Tracks which opportunities have already been claimed for bidding and
//! which opportunity each acknowledged bid belongs to. Claims carry a
//! deadline and are dropped once it passes, so the ledger only remembers
//! opportunities a redelivery could still matter for.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::id::{BidId, OpportunityId};

/// Concurrency-safe record of claimed opportunities and live bids.
///
/// Each opportunity id is claimed by at most one handler, and each bid id
/// is written only by the handler that submitted it.
#[derive(Debug, Default)]
pub struct BidLedger {
    /// Claimed opportunities and the unix time their claim lapses.
    claimed: DashMap<OpportunityId, u64>,
    bids: DashMap<BidId, OpportunityId>,
    last_pruned: AtomicU64,
}

impl BidLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim an opportunity for bidding until `expires_at`.
    ///
    /// Returns `false` if a claim made earlier is still live at `now`.
    /// Lapsed claims are pruned at most once per second of `now`.
    pub fn try_claim(&self, opportunity_id: &OpportunityId, now: u64, expires_at: u64) -> bool {
        if self.last_pruned.fetch_max(now, Ordering::SeqCst) < now {
            self.prune_claims(now);
        }

        match self.claimed.entry(opportunity_id.clone()) {
            Entry::Occupied(mut slot) if *slot.get() <= now => {
                slot.insert(expires_at);
                true
            }
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(expires_at);
                true
            }
        }
    }

    /// Drop every claim that lapsed at or before `now`.
    ///
    /// Returns the number of claims removed.
    pub fn prune_claims(&self, now: u64) -> usize {
        let before = self.claimed.len();
        self.claimed.retain(|_, expires_at| *expires_at > now);
        before.saturating_sub(self.claimed.len())
    }

    /// Associate an acknowledged bid with its opportunity.
    pub fn record(&self, bid_id: BidId, opportunity_id: OpportunityId) {
        self.bids.insert(bid_id, opportunity_id);
    }

    /// Opportunity a bid was placed on, if known.
    pub fn opportunity_for(&self, bid_id: &BidId) -> Option<OpportunityId> {
        self.bids.get(bid_id).map(|entry| entry.value().clone())
    }

    /// Forget a bid that reached a terminal status.
    pub fn settle(&self, bid_id: &BidId) -> Option<OpportunityId> {
        self.bids.remove(bid_id).map(|(_, opportunity_id)| opportunity_id)
    }

    /// Number of bids awaiting a terminal status.
    pub fn open_bids(&self) -> usize {
        self.bids.len()
    }

    /// Number of live opportunity claims.
    pub fn claimed(&self) -> usize {
        self.claimed.len()
    }
}
