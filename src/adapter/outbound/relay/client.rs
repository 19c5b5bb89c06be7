//! Relay WebSocket client.
//!
//! One connection carries both request/response traffic (subscribe, bid
//! submission) and server pushes (opportunities, bid statuses). The
//! connection is driven by two background tasks:
//!
//! - **writer**: owns the sink and sends every outbound frame, so requests
//!   from concurrent handlers never contend for the socket.
//! - **reader**: owns the source, resolves pending requests by id, forwards
//!   pushes to the event channel and answers pings.
//!
//! The client does not reconnect. When the connection drops the reader
//! emits [`RelayEvent::Disconnected`], fails all pending requests and exits.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, trace, warn};
use url::Url;
use uuid::Uuid;

use super::dto::{
    self, method, Inbound, PostBidParams, PostBidResult, RelayRequest, RelayResponse,
    ResponseStatus, SubscribeParams,
};
use super::options::RelayOptions;
use super::stream::WsEventStream;
use crate::domain::bid::OpportunityBid;
use crate::domain::id::{BidId, ChainId};
use crate::error::{Error, RelayError, Result};
use crate::port::outbound::relay::{RelayClient, RelayEvent};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type PendingRequests = Arc<DashMap<String, oneshot::Sender<RelayResponse>>>;

/// State shared between the client handle and its reader task.
struct Shared {
    pending: PendingRequests,
    /// Set once `close()` has been called.
    close_requested: AtomicBool,
    /// Set by the reader when the connection is gone.
    disconnected: AtomicBool,
}

impl Shared {
    fn is_closed(&self) -> bool {
        self.close_requested.load(Ordering::SeqCst) || self.disconnected.load(Ordering::SeqCst)
    }

    /// Register a waiter for the response to request `id`.
    ///
    /// Both closing paths set their flag before clearing `pending`, so a
    /// waiter inserted after the clear always sees the flag here.
    fn register(&self, id: &str) -> Result<oneshot::Receiver<RelayResponse>> {
        let (tx, rx) = oneshot::channel();
        self.pending.insert(id.to_string(), tx);

        if self.is_closed() {
            self.pending.remove(id);
            return Err(Error::Connection("connection closed".into()));
        }
        Ok(rx)
    }
}

/// WebSocket client for the auction relay.
pub struct WsRelayClient {
    url: Url,
    outbound: mpsc::UnboundedSender<Message>,
    shared: Arc<Shared>,
    request_timeout: Duration,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl WsRelayClient {
    /// Connect to the relay WebSocket at `url`.
    ///
    /// Returns the request handle and the inbound event stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails (network issues, invalid URL,
    /// TLS handshake failure, etc.).
    pub async fn connect(url: Url, options: &RelayOptions) -> Result<(Self, WsEventStream)> {
        info!(url = %url, "Connecting to relay");

        let (ws, response) = connect_async(url.as_str()).await?;

        info!(status = %response.status(), "Relay connected");

        Ok(Self::from_stream(url, ws, options))
    }

    fn from_stream(url: Url, ws: WsStream, options: &RelayOptions) -> (Self, WsEventStream) {
        let (sink, source) = ws.split();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(options.event_buffer);

        let shared = Arc::new(Shared {
            pending: Arc::new(DashMap::new()),
            close_requested: AtomicBool::new(false),
            disconnected: AtomicBool::new(false),
        });

        let writer = tokio::spawn(write_loop(sink, outbound_rx));
        let reader = tokio::spawn(read_loop(
            source,
            outbound_tx.clone(),
            event_tx,
            Arc::clone(&shared),
        ));

        let client = Self {
            url,
            outbound: outbound_tx,
            shared,
            request_timeout: options.request_timeout,
            tasks: Mutex::new(vec![writer, reader]),
        };

        (client, WsEventStream::new(event_rx))
    }

    /// Send a request and wait for its response.
    async fn request<P: Serialize>(&self, method: &'static str, params: P) -> Result<Value> {
        if self.is_closed() {
            return Err(Error::Connection("connection closed".into()));
        }

        let id = Uuid::new_v4().to_string();
        let json = serde_json::to_string(&RelayRequest {
            id: id.clone(),
            method,
            params,
        })?;

        let rx = self.shared.register(&id)?;

        trace!(request_id = %id, method, "Sending relay request");
        if self.outbound.send(Message::Text(json)).is_err() {
            self.shared.pending.remove(&id);
            return Err(Error::Connection("connection closed".into()));
        }

        let response = match tokio::time::timeout(self.request_timeout, rx).await {
            Ok(Ok(response)) => response,
            Ok(Err(_)) => return Err(Error::Connection("connection closed".into())),
            Err(_) => {
                self.shared.pending.remove(&id);
                return Err(RelayError::Timeout {
                    method,
                    timeout: self.request_timeout,
                }
                .into());
            }
        };

        match response.status {
            ResponseStatus::Success => Ok(response.result),
            ResponseStatus::Error => Err(RelayError::Rejected(response.error_message()).into()),
        }
    }
}

#[async_trait]
impl RelayClient for WsRelayClient {
    async fn subscribe(&self, chain_ids: &[ChainId]) -> Result<()> {
        info!(chains = ?chain_ids, "Subscribing to chains");
        self.request(method::SUBSCRIBE, SubscribeParams::new(chain_ids))
            .await
            .map(|_| ())
    }

    async fn submit_bid(&self, bid: &OpportunityBid) -> Result<BidId> {
        let result = self
            .request(method::POST_OPPORTUNITY_BID, PostBidParams::from(bid))
            .await?;

        serde_json::from_value::<PostBidResult>(result)
            .map(|r| BidId::new(r.id))
            .map_err(|e| {
                RelayError::UnexpectedResponse {
                    method: method::POST_OPPORTUNITY_BID,
                    reason: e.to_string(),
                }
                .into()
            })
    }

    async fn close(&self) {
        if self.shared.close_requested.swap(true, Ordering::SeqCst) {
            return;
        }

        info!(url = %self.url, "Closing relay connection");
        if !self.shared.disconnected.load(Ordering::SeqCst) {
            // Writer exits after flushing the close frame.
            let _ = self.outbound.send(Message::Close(None));
        }
        self.shared.pending.clear();
    }

    fn is_closed(&self) -> bool {
        self.shared.is_closed()
    }

    fn relay_name(&self) -> &'static str {
        "websocket"
    }
}

impl Drop for WsRelayClient {
    fn drop(&mut self) {
        for task in self.tasks.lock().drain(..) {
            task.abort();
        }
    }
}

async fn write_loop(
    mut sink: SplitSink<WsStream, Message>,
    mut outbound: mpsc::UnboundedReceiver<Message>,
) {
    while let Some(msg) = outbound.recv().await {
        let closing = matches!(msg, Message::Close(_));
        if let Err(e) = sink.send(msg).await {
            warn!(error = %e, "Failed to send frame to relay");
            break;
        }
        if closing {
            break;
        }
    }
    debug!("Relay writer stopped");
}

async fn read_loop(
    mut source: SplitStream<WsStream>,
    outbound: mpsc::UnboundedSender<Message>,
    events: mpsc::Sender<RelayEvent>,
    shared: Arc<Shared>,
) {
    let reason = loop {
        let Some(frame) = source.next().await else {
            break "stream ended".to_string();
        };

        match frame {
            Ok(Message::Text(text)) => {
                trace!(bytes = text.len(), "Received relay text frame");
                let event = match dto::decode(&text) {
                    Ok(Inbound::Response(response)) => {
                        match shared.pending.remove(&response.id) {
                            Some((_, waiter)) => {
                                let _ = waiter.send(response);
                            }
                            None => debug!(request_id = %response.id, "Response for unknown request"),
                        }
                        continue;
                    }
                    Ok(Inbound::Opportunity(opportunity)) => RelayEvent::Opportunity(opportunity),
                    Ok(Inbound::BidStatus(update)) => RelayEvent::BidStatus(update),
                    Ok(Inbound::Ignored { tag }) => {
                        debug!(tag = %tag, "Ignoring relay update");
                        continue;
                    }
                    Err(e) => {
                        warn!(
                            error = %e,
                            id = e.id.as_deref().unwrap_or("unknown"),
                            bytes = text.len(),
                            "Failed to parse relay message"
                        );
                        continue;
                    }
                };

                if events.send(event).await.is_err() {
                    break "event receiver dropped".to_string();
                }
            }
            Ok(Message::Ping(data)) => {
                trace!("Received ping");
                let _ = outbound.send(Message::Pong(data));
            }
            Ok(Message::Close(frame)) => {
                info!(frame = ?frame, "Relay closed connection");
                break frame.map_or_else(
                    || "closed by relay".to_string(),
                    |f| format!("closed by relay: {}", f.reason),
                );
            }
            Ok(_) => {}
            Err(e) => {
                error!(error = %e, "Relay WebSocket error");
                break e.to_string();
            }
        }
    };

    shared.disconnected.store(true, Ordering::SeqCst);
    // Dropping the waiters fails every in-flight request.
    shared.pending.clear();
    let _ = events.send(RelayEvent::Disconnected { reason }).await;
    debug!("Relay reader stopped");
}
