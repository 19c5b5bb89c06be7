//! Application services (use cases).
//!
//! The searcher agent orchestrates the domain types and the ports: it
//! subscribes through a [`RelayClient`](crate::port::outbound::relay::RelayClient), runs
//! every opportunity through a [`BidPolicy`](crate::port::outbound::policy::BidPolicy) and a
//! [`BidSigner`](crate::port::outbound::signer::BidSigner), and reports bid status updates.

pub mod config;
pub mod dispatch;
pub mod ledger;
pub mod outcome;
pub mod searcher;
pub mod state;
