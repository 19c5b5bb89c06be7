//! Bid parameters and signed bids.

use std::time::Duration;

use alloy_primitives::{Address, Bytes, U256};

use super::id::OpportunityId;
use crate::error::PolicyError;

/// Default bid validity window: 24 hours.
pub const DEFAULT_BID_VALIDITY: Duration = Duration::from_secs(60 * 60 * 24);

/// Parameters of a bid: how much to pay and until when the bid holds.
///
/// Built fresh for every opportunity. The deadline is checked against the
/// caller's clock at construction, so a `BidParams` value always had a
/// future deadline when it was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidParams {
    amount: U256,
    valid_until: u64,
}

impl BidParams {
    /// Create bid parameters.
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::DeadlineNotInFuture` if `valid_until <= now`.
    pub fn new(amount: U256, valid_until: u64, now: u64) -> Result<Self, PolicyError> {
        if valid_until <= now {
            return Err(PolicyError::DeadlineNotInFuture { valid_until, now });
        }
        Ok(Self {
            amount,
            valid_until,
        })
    }

    /// Bid amount in the native token's smallest unit.
    #[must_use]
    pub const fn amount(&self) -> U256 {
        self.amount
    }

    /// Unix timestamp (seconds) after which the bid is void.
    #[must_use]
    pub const fn valid_until(&self) -> u64 {
        self.valid_until
    }

    /// Whether the bid is still valid at `now`.
    #[must_use]
    pub const fn is_valid_at(&self, now: u64) -> bool {
        self.valid_until > now
    }
}

/// A signed bid ready for submission to the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpportunityBid {
    /// Opportunity this bid was derived from.
    pub opportunity_id: OpportunityId,
    /// Permission key copied from the opportunity.
    pub permission_key: Bytes,
    /// Bid amount in the smallest unit.
    pub amount: U256,
    /// Unix timestamp (seconds) after which the bid is void.
    pub valid_until: u64,
    /// Address of the signer that will execute the opportunity.
    pub executor: Address,
    /// 65-byte ECDSA signature, 0x-prefixed hex.
    pub signature: String,
}
