//! Searcher agent: turns relay opportunities into signed bids.
//!
//! The agent owns the opportunity → policy → signature → submission
//! pipeline and the reporting of bid status updates. Each opportunity is
//! handled in isolation: a failure at any step is reported with the
//! opportunity id and the opportunity is dropped, with no retry. Nothing a
//! handler does can end the event stream.

use std::future::Future;
use std::slice;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use super::config::SearcherConfig;
use super::dispatch::run_event_loop;
use super::ledger::BidLedger;
use super::outcome::{BidOutcome, BidStage};
use super::state::{AgentState, StateCell};
use crate::domain::opportunity::Opportunity;
use crate::domain::status::BidStatusUpdate;
use crate::error::{Error, Result};
use crate::port::inbound::handler::{BidStatusHandler, OpportunityHandler};
use crate::port::outbound::policy::BidPolicy;
use crate::port::outbound::relay::{RelayClient, RelayEventStream};
use crate::port::outbound::signer::BidSigner;

/// Source of the current unix time in seconds.
pub type Clock = Arc<dyn Fn() -> u64 + Send + Sync>;

/// Current unix time in seconds from the system clock.
#[must_use]
pub fn system_clock() -> Clock {
    Arc::new(|| u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0))
}

/// Searcher agent for a single chain on a single relay.
pub struct SearcherAgent {
    config: SearcherConfig,
    relay: Arc<dyn RelayClient>,
    policy: Arc<dyn BidPolicy>,
    signer: Arc<dyn BidSigner>,
    ledger: BidLedger,
    state: StateCell,
    clock: Clock,
}

impl SearcherAgent {
    pub fn new(
        config: SearcherConfig,
        relay: Arc<dyn RelayClient>,
        policy: Arc<dyn BidPolicy>,
        signer: Arc<dyn BidSigner>,
    ) -> Self {
        Self {
            config,
            relay,
            policy,
            signer,
            ledger: BidLedger::new(),
            state: StateCell::new(),
            clock: system_clock(),
        }
    }

    /// Replace the clock used for bid deadlines.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &SearcherConfig {
        &self.config
    }

    pub fn state(&self) -> AgentState {
        self.state.get()
    }

    pub fn ledger(&self) -> &BidLedger {
        &self.ledger
    }

    /// Subscribe to the configured chain.
    ///
    /// On failure the relay connection is closed and the agent ends up
    /// `Closed`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidState` if the agent was already started, or
    /// the subscription error.
    pub async fn start(&self) -> Result<()> {
        self.state
            .transition(AgentState::Subscribing)
            .map_err(|found| Error::InvalidState {
                expected: AgentState::Created.as_str(),
                found: found.as_str(),
            })?;

        let chain_id = &self.config.chain_id;
        match self.relay.subscribe(slice::from_ref(chain_id)).await {
            Ok(()) => {
                if let Err(found) = self.state.transition(AgentState::Active) {
                    warn!(state = %found, "Agent closed while subscribing");
                    return Err(Error::InvalidState {
                        expected: AgentState::Subscribing.as_str(),
                        found: found.as_str(),
                    });
                }
                info!(
                    chain_id = %chain_id,
                    relay = self.relay.relay_name(),
                    "Subscribed to chain {chain_id}. Waiting for opportunities..."
                );
                Ok(())
            }
            Err(e) => {
                error!(chain_id = %chain_id, error = %e, "Failed to subscribe");
                self.relay.close().await;
                let _ = self.state.transition(AgentState::Closed);
                Err(e)
            }
        }
    }

    /// Handle relay events until the connection closes.
    ///
    /// Returns the disconnect reason. The agent is `Closed` afterwards.
    pub async fn run<S>(self: &Arc<Self>, stream: &mut S) -> String
    where
        S: RelayEventStream + ?Sized,
    {
        let reason = run_event_loop(
            stream,
            Arc::clone(self) as Arc<dyn OpportunityHandler>,
            Arc::clone(self) as Arc<dyn BidStatusHandler>,
        )
        .await;

        warn!(reason = %reason, "Relay connection closed");
        self.shutdown().await;
        reason
    }

    /// Handle relay events until the connection closes or `shutdown`
    /// resolves.
    ///
    /// On shutdown the relay connection is closed and the event loop keeps
    /// running until the relay acknowledges, so handlers already in flight
    /// finish instead of being aborted. If the relay has not closed the
    /// stream within `grace`, the remaining handlers are dropped.
    ///
    /// Returns the disconnect reason, or `None` when stopped by `shutdown`.
    pub async fn run_until<S, F>(
        self: &Arc<Self>,
        stream: &mut S,
        shutdown: F,
        grace: Duration,
    ) -> Option<String>
    where
        S: RelayEventStream + ?Sized,
        F: Future<Output = ()>,
    {
        let run = self.run(stream);
        tokio::pin!(run);

        tokio::select! {
            reason = &mut run => return Some(reason),
            () = shutdown => {}
        }

        info!("Shutdown requested, waiting for in-flight handlers");
        self.shutdown().await;

        if timeout(grace, run).await.is_err() {
            warn!(grace = ?grace, "Relay did not close in time, dropping in-flight handlers");
        }
        None
    }

    /// Close the relay connection and mark the agent `Closed`.
    pub async fn shutdown(&self) {
        self.relay.close().await;
        if let Ok(previous) = self.state.transition(AgentState::Closed) {
            debug!(previous = %previous, "Searcher agent closed");
        }
    }

    /// Run one opportunity through policy, signing and submission.
    pub async fn process_opportunity(&self, opportunity: &Opportunity) -> BidOutcome {
        let opportunity_id = opportunity.opportunity_id().clone();

        if opportunity.chain_id() != &self.config.chain_id {
            return BidOutcome::WrongChain {
                opportunity_id,
                chain_id: opportunity.chain_id().clone(),
            };
        }

        let now = (self.clock)();
        let claim_expires = now.saturating_add(self.config.validity.as_secs());
        if !self.ledger.try_claim(&opportunity_id, now, claim_expires) {
            return BidOutcome::Duplicate { opportunity_id };
        }

        let params = match self.policy.evaluate(opportunity, now) {
            Ok(Some(params)) => params,
            Ok(None) => {
                return BidOutcome::Skipped {
                    opportunity_id,
                    policy: self.policy.name(),
                }
            }
            Err(e) => {
                return BidOutcome::Failed {
                    opportunity_id,
                    stage: BidStage::Policy,
                    reason: e.to_string(),
                }
            }
        };

        let bid = match self.signer.sign(opportunity, &params, (self.clock)()) {
            Ok(bid) => bid,
            Err(e) => {
                return BidOutcome::Failed {
                    opportunity_id,
                    stage: BidStage::Signing,
                    reason: e.to_string(),
                }
            }
        };

        match self.relay.submit_bid(&bid).await {
            Ok(bid_id) => {
                self.ledger.record(bid_id.clone(), opportunity_id.clone());
                BidOutcome::Submitted {
                    opportunity_id,
                    bid_id,
                }
            }
            Err(e) => BidOutcome::Failed {
                opportunity_id,
                stage: BidStage::Submission,
                reason: e.to_string(),
            },
        }
    }

    /// Report a bid status update and return the reported line.
    pub fn process_bid_status(&self, update: &BidStatusUpdate) -> String {
        let line = update.to_string();
        let opportunity_id = if update.status.is_terminal() {
            self.ledger.settle(&update.id)
        } else {
            self.ledger.opportunity_for(&update.id)
        };

        match opportunity_id {
            Some(opportunity_id) => info!(
                bid_id = %update.id,
                opportunity_id = %opportunity_id,
                status = update.status.tag(),
                "{line}"
            ),
            None => info!(bid_id = %update.id, status = update.status.tag(), "{line}"),
        }

        line
    }
}

/// Emit the line for a bid outcome at a level matching its severity.
fn report(outcome: &BidOutcome) {
    let opportunity_id = outcome.opportunity_id();
    match outcome {
        BidOutcome::Submitted { bid_id, .. } => {
            info!(opportunity_id = %opportunity_id, bid_id = %bid_id, "{outcome}");
        }
        BidOutcome::Failed {
            stage: BidStage::Submission,
            ..
        } => {
            warn!(opportunity_id = %opportunity_id, stage = "submission", "{outcome}");
        }
        BidOutcome::Failed { stage, .. } => {
            error!(opportunity_id = %opportunity_id, stage = stage.as_str(), "{outcome}");
        }
        BidOutcome::Skipped { .. }
        | BidOutcome::Duplicate { .. }
        | BidOutcome::WrongChain { .. } => {
            debug!(opportunity_id = %opportunity_id, "{outcome}");
        }
    }
}

#[async_trait]
impl OpportunityHandler for SearcherAgent {
    async fn on_opportunity(&self, opportunity: Opportunity) {
        let outcome = self.process_opportunity(&opportunity).await;
        report(&outcome);
    }
}

#[async_trait]
impl BidStatusHandler for SearcherAgent {
    async fn on_bid_status(&self, update: BidStatusUpdate) {
        self.process_bid_status(&update);
    }
}
