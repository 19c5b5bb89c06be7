//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points between the searcher agent and the
//! systems it talks to. Adapters implement them; the application layer only
//! ever sees the traits.
//!
//! ```text
//!            ┌───────────────┐   opportunity / status   ┌──────────────────┐
//!  relay ───▶│ RelayEvent-   │─────────────────────────▶│ Opportunity- /   │
//!            │ Stream        │                          │ BidStatusHandler │
//!            └───────────────┘                          └────────┬─────────┘
//!                                                                │
//!            ┌───────────────┐   BidPolicy, BidSigner            │
//!  relay ◀───│ RelayClient   │◀──────────────────────────────────┘
//!            └───────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`inbound`] - Event handler contracts driven by the relay event loop
//! - [`outbound`] - Relay transport, bid signing, bid policy

pub mod inbound;
pub mod outbound;
