//! Validated searcher configuration.

use std::time::Duration;

use alloy_primitives::U256;
use url::Url;

use crate::domain::bid::DEFAULT_BID_VALIDITY;
use crate::domain::id::ChainId;

/// Everything the searcher needs to know about its target, resolved and
/// validated at startup. The signing key is not part of it.
#[derive(Debug, Clone)]
pub struct SearcherConfig {
    /// Relay base URL.
    pub endpoint: Url,
    /// Chain to bid on.
    pub chain_id: ChainId,
    /// Bid amount for the fixed policy, in the smallest unit.
    pub bid_amount: U256,
    /// How long each bid stays valid.
    pub validity: Duration,
}

impl SearcherConfig {
    #[must_use]
    pub fn new(endpoint: Url, chain_id: impl Into<ChainId>) -> Self {
        Self {
            endpoint,
            chain_id: chain_id.into(),
            bid_amount: U256::from(100u64),
            validity: DEFAULT_BID_VALIDITY,
        }
    }

    #[must_use]
    pub fn with_bid_amount(mut self, amount: U256) -> Self {
        self.bid_amount = amount;
        self
    }

    #[must_use]
    pub fn with_validity(mut self, validity: Duration) -> Self {
        self.validity = validity;
        self
    }
}
