//! Deterministic [`BidSigner`] for testing.

use alloy_primitives::Address;

use crate::domain::bid::{BidParams, OpportunityBid};
use crate::domain::opportunity::Opportunity;
use crate::error::SigningError;
use crate::port::outbound::signer::BidSigner;

/// Executor address reported by [`StubSigner`].
pub const STUB_EXECUTOR: Address = Address::repeat_byte(0x11);

/// A signer that produces a fixed dummy signature, or always fails.
pub struct StubSigner {
    failure: Option<String>,
}

impl StubSigner {
    pub fn new() -> Self {
        Self { failure: None }
    }

    /// A signer whose every `sign()` call fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
        }
    }
}

impl Default for StubSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl BidSigner for StubSigner {
    fn sign(
        &self,
        opportunity: &Opportunity,
        params: &BidParams,
        _now: u64,
    ) -> Result<OpportunityBid, SigningError> {
        if let Some(reason) = &self.failure {
            return Err(SigningError::Signature(reason.clone()));
        }
        Ok(OpportunityBid {
            opportunity_id: opportunity.opportunity_id().clone(),
            permission_key: opportunity.permission_key().clone(),
            amount: params.amount(),
            valid_until: params.valid_until(),
            executor: STUB_EXECUTOR,
            signature: format!("0x{}", "ab".repeat(65)),
        })
    }

    fn executor(&self) -> Address {
        STUB_EXECUTOR
    }
}
