//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`stream`]: mock [`RelayEventStream`](crate::port::outbound::relay::RelayEventStream)
//!   implementations, `ScriptedEventStream` and `ChannelEventStream`.
//! - [`relay`]: `ScriptedRelay`, a recording [`RelayClient`](crate::port::outbound::relay::RelayClient).
//! - [`signer`]: `StubSigner`, a deterministic [`BidSigner`](crate::port::outbound::signer::BidSigner).
//! - [`policy`]: `StubPolicy`, a [`BidPolicy`](crate::port::outbound::policy::BidPolicy)
//!   with a fixed decision.
//! - [`domain`]: builders for opportunities and status updates.

pub mod domain;
pub mod policy;
pub mod relay;
pub mod signer;
pub mod stream;
