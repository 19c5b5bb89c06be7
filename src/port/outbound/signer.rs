//! Signer port: turns bid parameters into a relay-submittable bid.

use alloy_primitives::Address;

use crate::domain::bid::{BidParams, OpportunityBid};
use crate::domain::opportunity::Opportunity;
use crate::error::SigningError;

/// Signs bids for opportunities.
///
/// Signing is a pure function of its inputs: the same opportunity, params
/// and key always produce the same bid.
pub trait BidSigner: Send + Sync {
    /// Sign `params` for `opportunity`.
    ///
    /// `now` is the unix time in seconds used to reject already expired
    /// parameters.
    ///
    /// # Errors
    ///
    /// Returns `SigningError::Expired` if `params` are no longer valid at
    /// `now`, or `SigningError::Signature` if the signature cannot be made.
    fn sign(
        &self,
        opportunity: &Opportunity,
        params: &BidParams,
        now: u64,
    ) -> Result<OpportunityBid, SigningError>;

    /// Address of the account bids are signed with.
    fn executor(&self) -> Address;
}
