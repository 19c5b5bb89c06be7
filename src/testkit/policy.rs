//! Configurable [`BidPolicy`] for testing.

use alloy_primitives::U256;

use crate::domain::bid::BidParams;
use crate::domain::opportunity::Opportunity;
use crate::error::PolicyError;
use crate::port::outbound::policy::BidPolicy;

enum Decision {
    Bid { amount: U256, validity_secs: u64 },
    Decline,
    Fail(PolicyError),
}

/// A policy that always bids, always declines, or always fails.
pub struct StubPolicy {
    decision: Decision,
}

impl StubPolicy {
    /// Bid `amount`, valid for `validity_secs` from the evaluation time.
    pub fn new(amount: U256, validity_secs: u64) -> Self {
        Self {
            decision: Decision::Bid {
                amount,
                validity_secs,
            },
        }
    }

    pub fn declining() -> Self {
        Self {
            decision: Decision::Decline,
        }
    }

    pub fn failing(error: PolicyError) -> Self {
        Self {
            decision: Decision::Fail(error),
        }
    }
}

impl BidPolicy for StubPolicy {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn evaluate(
        &self,
        _opportunity: &Opportunity,
        now: u64,
    ) -> Result<Option<BidParams>, PolicyError> {
        match &self.decision {
            Decision::Bid {
                amount,
                validity_secs,
            } => BidParams::new(*amount, now.saturating_add(*validity_secs), now).map(Some),
            Decision::Decline => Ok(None),
            Decision::Fail(error) => Err(error.clone()),
        }
    }
}
