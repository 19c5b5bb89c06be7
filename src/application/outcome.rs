//! Per-opportunity bid outcomes.

use std::fmt;

use crate::domain::id::{BidId, ChainId, OpportunityId};

/// Pipeline step at which a bid attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidStage {
    Policy,
    Signing,
    Submission,
}

impl BidStage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Policy => "policy",
            Self::Signing => "signing",
            Self::Submission => "submission",
        }
    }
}

/// Result of handling one opportunity.
///
/// The `Display` form is the line reported for the opportunity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BidOutcome {
    /// The relay accepted the bid.
    Submitted {
        opportunity_id: OpportunityId,
        bid_id: BidId,
    },
    /// The bid attempt was abandoned.
    Failed {
        opportunity_id: OpportunityId,
        stage: BidStage,
        reason: String,
    },
    /// The policy chose not to bid.
    Skipped {
        opportunity_id: OpportunityId,
        policy: &'static str,
    },
    /// The opportunity was already handled.
    Duplicate { opportunity_id: OpportunityId },
    /// The opportunity belongs to another chain.
    WrongChain {
        opportunity_id: OpportunityId,
        chain_id: ChainId,
    },
}

impl BidOutcome {
    #[must_use]
    pub fn opportunity_id(&self) -> &OpportunityId {
        match self {
            Self::Submitted { opportunity_id, .. }
            | Self::Failed { opportunity_id, .. }
            | Self::Skipped { opportunity_id, .. }
            | Self::Duplicate { opportunity_id }
            | Self::WrongChain { opportunity_id, .. } => opportunity_id,
        }
    }

    #[must_use]
    pub const fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted { .. })
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for BidOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submitted {
                opportunity_id,
                bid_id,
            } => write!(
                f,
                "Successful bid. Opportunity id {opportunity_id} Bid id {bid_id}"
            ),
            Self::Failed {
                opportunity_id,
                reason,
                ..
            } => write!(f, "Failed to bid on opportunity {opportunity_id}: {reason}"),
            Self::Skipped {
                opportunity_id,
                policy,
            } => write!(
                f,
                "Skipped opportunity {opportunity_id}: {policy} policy declined to bid"
            ),
            Self::Duplicate { opportunity_id } => {
                write!(f, "Ignored duplicate opportunity {opportunity_id}")
            }
            Self::WrongChain {
                opportunity_id,
                chain_id,
            } => write!(
                f,
                "Ignored opportunity {opportunity_id} for unsubscribed chain {chain_id}"
            ),
        }
    }
}
