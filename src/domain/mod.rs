//! Relay-agnostic domain types: identifiers, opportunities, bids and statuses.

pub mod bid;
pub mod id;
pub mod opportunity;
pub mod status;
