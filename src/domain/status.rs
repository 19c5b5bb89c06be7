//! Bid lifecycle status updates.

use std::fmt;

use super::id::BidId;

/// Status of a submitted bid as reported by the relay.
///
/// The relay may introduce new statuses at any time; tags this crate does
/// not know are kept verbatim in [`BidStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BidStatus {
    /// Accepted by the relay, auction not yet run.
    Pending,
    /// Included in an on-chain transaction.
    Submitted {
        /// Transaction hash.
        result: String,
        /// Position of the bid within the multicall.
        index: u32,
    },
    /// Lost the auction.
    Lost {
        /// Transaction hash of the winning execution, if any.
        result: Option<String>,
    },
    /// Won the auction and executed.
    Won {
        /// Transaction hash, if reported.
        result: Option<String>,
    },
    /// Deadline passed before execution.
    Expired,
    /// A status tag not known to this crate.
    Other {
        /// Raw status tag.
        tag: String,
    },
}

impl BidStatus {
    /// Build a status from its wire parts.
    ///
    /// Never fails: a known tag missing the fields it requires, or an
    /// unknown tag, becomes [`BidStatus::Other`].
    #[must_use]
    pub fn from_parts(tag: &str, result: Option<String>, index: Option<u32>) -> Self {
        match (tag, result, index) {
            ("pending", _, _) => Self::Pending,
            ("submitted", Some(result), Some(index)) => Self::Submitted { result, index },
            ("lost", result, _) => Self::Lost { result },
            ("won", result, _) => Self::Won { result },
            ("expired", _, _) => Self::Expired,
            (tag, _, _) => Self::Other {
                tag: tag.to_string(),
            },
        }
    }

    /// Raw status tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Submitted { .. } => "submitted",
            Self::Lost { .. } => "lost",
            Self::Won { .. } => "won",
            Self::Expired => "expired",
            Self::Other { tag } => tag,
        }
    }

    /// Whether no further updates are expected for the bid.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Lost { .. } | Self::Won { .. } | Self::Expired)
    }
}

impl fmt::Display for BidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag().replace('_', " "))?;
        match self {
            Self::Submitted { result, index } => {
                write!(f, ", transaction {result}, index {index} of multicall")
            }
            Self::Lost {
                result: Some(result),
            } => write!(f, ", transaction {result}"),
            _ => Ok(()),
        }
    }
}

/// A status update for one bid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidStatusUpdate {
    pub id: BidId,
    pub status: BidStatus,
}

impl BidStatusUpdate {
    #[must_use]
    pub fn new(id: impl Into<BidId>, status: BidStatus) -> Self {
        Self {
            id: id.into(),
            status,
        }
    }
}

impl fmt::Display for BidStatusUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bid status for bid {}: {}", self.id, self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submitted_line_includes_transaction_and_index() {
        let update = BidStatusUpdate::new(
            "b-1",
            BidStatus::from_parts("submitted", Some("0xabc".into()), Some(2)),
        );
        assert_eq!(
            update.to_string(),
            "Bid status for bid b-1: submitted, transaction 0xabc, index 2 of multicall"
        );
    }

    #[test]
    fn lost_line_includes_transaction() {
        let update =
            BidStatusUpdate::new("b-1", BidStatus::from_parts("lost", Some("0xdef".into()), None));
        assert_eq!(
            update.to_string(),
            "Bid status for bid b-1: lost, transaction 0xdef"
        );
    }

    #[test]
    fn lost_without_result_has_no_details() {
        let update = BidStatusUpdate::new("b-1", BidStatus::from_parts("lost", None, None));
        assert_eq!(update.to_string(), "Bid status for bid b-1: lost");
    }

    #[test]
    fn won_ignores_result_in_line() {
        let update =
            BidStatusUpdate::new("b-2", BidStatus::from_parts("won", Some("0x1".into()), None));
        assert_eq!(update.to_string(), "Bid status for bid b-2: won");
        assert!(update.status.is_terminal());
    }

    #[test]
    fn unknown_tag_is_kept_and_underscores_become_spaces() {
        let status = BidStatus::from_parts("simulation_failed", Some("x".into()), Some(1));
        assert_eq!(
            status,
            BidStatus::Other {
                tag: "simulation_failed".into()
            }
        );

        let update = BidStatusUpdate::new("b-9", status);
        assert_eq!(update.to_string(), "Bid status for bid b-9: simulation failed");
        assert!(!update.status.is_terminal());
    }

    #[test]
    fn submitted_missing_index_falls_back_to_tag_only() {
        let status = BidStatus::from_parts("submitted", Some("0xabc".into()), None);
        assert_eq!(status.tag(), "submitted");
        assert_eq!(status.to_string(), "submitted");
    }

    #[test]
    fn pending_is_not_terminal() {
        assert!(!BidStatus::Pending.is_terminal());
        assert!(BidStatus::Expired.is_terminal());
    }
}
