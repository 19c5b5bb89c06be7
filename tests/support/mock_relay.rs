//! Minimal in-process relay speaking the WebSocket protocol.
//!
//! Accepts a single connection. Every request is recorded and answered by
//! the responder; pushes and a server-side close are driven by the test.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

/// Decides the reply to a request. `None` leaves it unanswered.
pub type Responder = Box<dyn Fn(&Value) -> Option<Value> + Send>;

pub struct MockRelay {
    /// HTTP base URL of the relay.
    pub endpoint: Url,
    requests: mpsc::UnboundedReceiver<Value>,
    frames: mpsc::UnboundedSender<Message>,
}

impl MockRelay {
    pub async fn start(responder: Responder) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let (request_tx, requests) = mpsc::unbounded_channel();
        let (frames, mut frame_rx) = mpsc::unbounded_channel::<Message>();

        tokio::spawn(async move {
            let (tcp, _) = listener.accept().await.expect("accept");
            let mut ws = tokio_tungstenite::accept_async(tcp).await.expect("handshake");

            loop {
                tokio::select! {
                    frame = ws.next() => match frame {
                        Some(Ok(Message::Text(text))) => {
                            let request: Value = serde_json::from_str(&text).expect("request json");
                            if let Some(reply) = responder(&request) {
                                if ws.send(Message::Text(reply.to_string())).await.is_err() {
                                    break;
                                }
                            }
                            let _ = request_tx.send(request);
                        }
                        Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                        Some(Ok(_)) => {}
                    },
                    outgoing = frame_rx.recv() => match outgoing {
                        Some(message) => {
                            if ws.send(message).await.is_err() {
                                break;
                            }
                        }
                        None => break,
                    },
                }
            }
        });

        Self {
            endpoint: Url::parse(&format!("http://{addr}")).expect("endpoint"),
            requests,
            frames,
        }
    }

    /// A relay that accepts every request: subscriptions succeed and bids
    /// are numbered `b-1`, `b-2`, ...
    pub async fn accepting() -> Self {
        let counter = std::sync::atomic::AtomicUsize::new(0);
        Self::start(Box::new(move |request| {
            let result = match request["method"].as_str() {
                Some("post_opportunity_bid") => {
                    let n = counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst) + 1;
                    serde_json::json!({"id": format!("b-{n}"), "status": "OK"})
                }
                _ => Value::Null,
            };
            Some(super::fixtures::success(request, result))
        }))
        .await
    }

    pub fn push(&self, update: &Value) {
        let _ = self.frames.send(Message::Text(update.to_string()));
    }

    pub fn push_raw(&self, text: &str) {
        let _ = self.frames.send(Message::Text(text.to_string()));
    }

    /// Close the connection from the relay side.
    pub fn close(&self) {
        let _ = self.frames.send(Message::Close(None));
    }

    /// Next request received, waiting up to five seconds.
    pub async fn next_request(&mut self) -> Value {
        tokio::time::timeout(Duration::from_secs(5), self.requests.recv())
            .await
            .expect("timed out waiting for request")
            .expect("relay stopped")
    }
}
