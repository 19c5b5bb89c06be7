//! Bid policy port: decides whether and how much to bid.

use crate::domain::bid::BidParams;
use crate::domain::opportunity::Opportunity;
use crate::error::PolicyError;

/// Bid valuation policy.
///
/// Implementations must not touch shared mutable state; they may be called
/// concurrently for different opportunities.
pub trait BidPolicy: Send + Sync {
    /// Policy name for logging.
    fn name(&self) -> &'static str;

    /// Evaluate an opportunity at unix time `now` (seconds).
    ///
    /// Returns `Ok(None)` to pass on the opportunity.
    ///
    /// # Errors
    ///
    /// Returns a `PolicyError` if bid parameters cannot be computed.
    fn evaluate(
        &self,
        opportunity: &Opportunity,
        now: u64,
    ) -> Result<Option<BidParams>, PolicyError>;
}
