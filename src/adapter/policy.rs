//! Bid policy implementations.

use std::time::Duration;

use alloy_primitives::U256;

use crate::domain::bid::BidParams;
use crate::domain::opportunity::Opportunity;
use crate::error::PolicyError;
use crate::port::outbound::policy::BidPolicy;

/// Bids a fixed amount on every opportunity with a fixed validity window.
#[derive(Debug, Clone)]
pub struct FixedBidPolicy {
    amount: U256,
    validity: Duration,
}

impl FixedBidPolicy {
    #[must_use]
    pub const fn new(amount: U256, validity: Duration) -> Self {
        Self { amount, validity }
    }

    #[must_use]
    pub const fn amount(&self) -> U256 {
        self.amount
    }

    #[must_use]
    pub const fn validity(&self) -> Duration {
        self.validity
    }
}

impl BidPolicy for FixedBidPolicy {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn evaluate(
        &self,
        _opportunity: &Opportunity,
        now: u64,
    ) -> Result<Option<BidParams>, PolicyError> {
        let valid_until = now
            .checked_add(self.validity.as_secs())
            .ok_or(PolicyError::DeadlineOverflow)?;
        BidParams::new(self.amount, valid_until, now).map(Some)
    }
}
