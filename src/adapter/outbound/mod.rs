//! Outbound adapters (driven side).

pub mod relay;
pub mod signer;
