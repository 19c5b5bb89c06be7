//! Recording [`RelayClient`] for testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::bid::OpportunityBid;
use crate::domain::id::{BidId, ChainId};
use crate::error::Result;
use crate::port::outbound::relay::RelayClient;

/// A relay client with scripted subscribe/submit results.
///
/// Each call pops the next result from the corresponding queue. When the
/// queue is exhausted, `subscribe` succeeds and `submit_bid` returns
/// `bid-{n}` where `n` counts submissions from 1.
pub struct ScriptedRelay {
    subscribe_results: Mutex<VecDeque<Result<()>>>,
    submit_results: Mutex<VecDeque<Result<BidId>>>,
    submit_delay: Option<Duration>,
    subscriptions: Mutex<Vec<Vec<ChainId>>>,
    submitted: Mutex<Vec<OpportunityBid>>,
    subscribe_count: AtomicU32,
    submit_count: AtomicU32,
    close_count: AtomicU32,
    submits_in_flight: AtomicU32,
    peak_submits_in_flight: AtomicU32,
    closed: AtomicBool,
}

impl ScriptedRelay {
    pub fn new() -> Self {
        Self {
            subscribe_results: Mutex::new(VecDeque::new()),
            submit_results: Mutex::new(VecDeque::new()),
            submit_delay: None,
            subscriptions: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
            subscribe_count: AtomicU32::new(0),
            submit_count: AtomicU32::new(0),
            close_count: AtomicU32::new(0),
            submits_in_flight: AtomicU32::new(0),
            peak_submits_in_flight: AtomicU32::new(0),
            closed: AtomicBool::new(false),
        }
    }

    pub fn with_subscribe_results(self, results: Vec<Result<()>>) -> Self {
        *self.subscribe_results.lock() = results.into();
        self
    }

    pub fn with_submit_results(self, results: Vec<Result<BidId>>) -> Self {
        *self.submit_results.lock() = results.into();
        self
    }

    /// Delay every submission, to keep several in flight at once.
    pub fn with_submit_delay(mut self, delay: Duration) -> Self {
        self.submit_delay = Some(delay);
        self
    }

    /// Chain lists passed to each `subscribe()` call.
    pub fn subscriptions(&self) -> Vec<Vec<ChainId>> {
        self.subscriptions.lock().clone()
    }

    /// Bids passed to `submit_bid()`, in call order.
    pub fn submitted(&self) -> Vec<OpportunityBid> {
        self.submitted.lock().clone()
    }

    pub fn subscribe_count(&self) -> u32 {
        self.subscribe_count.load(Ordering::SeqCst)
    }

    pub fn submit_count(&self) -> u32 {
        self.submit_count.load(Ordering::SeqCst)
    }

    pub fn close_count(&self) -> u32 {
        self.close_count.load(Ordering::SeqCst)
    }

    /// Highest number of `submit_bid()` calls seen running at once.
    pub fn peak_submits_in_flight(&self) -> u32 {
        self.peak_submits_in_flight.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedRelay {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RelayClient for ScriptedRelay {
    async fn subscribe(&self, chain_ids: &[ChainId]) -> Result<()> {
        self.subscribe_count.fetch_add(1, Ordering::SeqCst);
        self.subscriptions.lock().push(chain_ids.to_vec());
        self.subscribe_results.lock().pop_front().unwrap_or(Ok(()))
    }

    async fn submit_bid(&self, bid: &OpportunityBid) -> Result<BidId> {
        let n = self.submit_count.fetch_add(1, Ordering::SeqCst) + 1;
        self.submitted.lock().push(bid.clone());

        let running = self.submits_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_submits_in_flight.fetch_max(running, Ordering::SeqCst);
        if let Some(delay) = self.submit_delay {
            tokio::time::sleep(delay).await;
        }
        self.submits_in_flight.fetch_sub(1, Ordering::SeqCst);
        let scripted = self.submit_results.lock().pop_front();
        scripted.unwrap_or_else(|| Ok(BidId::new(format!("bid-{n}"))))
    }

    async fn close(&self) {
        self.close_count.fetch_add(1, Ordering::SeqCst);
        self.closed.store(true, Ordering::SeqCst);
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn relay_name(&self) -> &'static str {
        "mock"
    }
}
