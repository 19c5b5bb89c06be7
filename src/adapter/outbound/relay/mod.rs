//! Auction relay WebSocket adapter.
//!
//! Implements [`RelayClient`](crate::port::outbound::relay::RelayClient) and
//! [`RelayEventStream`](crate::port::outbound::relay::RelayEventStream) over a single
//! WebSocket connection.
//!
//! # Usage
//!
//! ```ignore
//! let url = websocket_url(&endpoint)?;
//! let (client, events) = WsRelayClient::connect(url, &RelayOptions::default()).await?;
//! client.subscribe(&[chain_id]).await?;
//! ```

pub mod client;
pub mod dto;
pub mod options;
pub mod stream;
