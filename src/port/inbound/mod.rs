//! Inbound (driving) ports consumed by the relay event loop.

pub mod handler;
