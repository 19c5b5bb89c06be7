//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod policy;
pub mod relay;
pub mod signer;
