//! Relay searcher: an automated bidder for an auction relay.
//!
//! The searcher subscribes to a relay for one chain, receives execution
//! opportunities as they are published, prices each one with a bid policy,
//! signs the bid as EIP-712 typed data, and submits it back to the relay. Bid
//! status updates pushed by the relay are reported as they arrive.
//!
//! # Architecture
//!
//! The crate follows a ports-and-adapters layout:
//!
//! - [`domain`] - Opportunities, bid parameters, signed bids and statuses
//! - [`port`] - Traits at the boundaries: relay, signer, policy and handlers
//! - [`adapter`] - WebSocket relay client, EIP-712 signer, fixed bid policy, CLI
//! - [`application`] - The searcher agent and its event loop
//! - [`infrastructure`] - Configuration, logging and runtime wiring
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `testkit` - Expose the [`testkit`] mocks to integration tests
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use relay_searcher::adapter::outbound::relay::client::WsRelayClient;
//! use relay_searcher::adapter::outbound::relay::options::{websocket_url, RelayOptions};
//! use relay_searcher::adapter::outbound::signer::Eip712BidSigner;
//! use relay_searcher::adapter::policy::FixedBidPolicy;
//! use relay_searcher::application::config::SearcherConfig;
//! use relay_searcher::application::searcher::SearcherAgent;
//!
//! # async fn run() -> relay_searcher::error::Result<()> {
//! let config = SearcherConfig::new("http://localhost:9000".parse()?, "op_sepolia");
//! let signer = Eip712BidSigner::from_hex("0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80")?;
//! let url = websocket_url(&config.endpoint)?;
//! let (client, mut events) = WsRelayClient::connect(url, &RelayOptions::default()).await?;
//!
//! let policy = FixedBidPolicy::new(config.bid_amount, config.validity);
//! let agent = Arc::new(SearcherAgent::new(
//!     config,
//!     Arc::new(client),
//!     Arc::new(policy),
//!     Arc::new(signer),
//! ));
//! agent.start().await?;
//! let reason = agent.run(&mut events).await;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
