//! Composition root: wires the relay, signer and policy into a searcher.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tracing::{error, info};

use crate::adapter::outbound::relay::client::WsRelayClient;
use crate::adapter::outbound::relay::options::{websocket_url, RelayOptions};
use crate::adapter::outbound::relay::stream::WsEventStream;
use crate::adapter::outbound::signer::Eip712BidSigner;
use crate::adapter::policy::FixedBidPolicy;
use crate::application::config::SearcherConfig;
use crate::application::searcher::SearcherAgent;
use crate::error::{Error, Result};
use crate::port::outbound::relay::RelayClient;
use crate::port::outbound::signer::BidSigner;

/// How long a shutdown waits for the relay to close the connection.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// A subscribed searcher and the event stream that drives it.
pub struct RunningSearcher {
    pub agent: Arc<SearcherAgent>,
    pub events: WsEventStream,
}

impl RunningSearcher {
    /// Handle relay events until the connection closes. Returns the
    /// disconnect reason.
    pub async fn run(mut self) -> String {
        self.agent.run(&mut self.events).await
    }

    /// Handle relay events until the connection closes or `shutdown`
    /// resolves, letting in-flight handlers finish. Returns the disconnect
    /// reason, or `None` when stopped by `shutdown`.
    pub async fn run_until<F>(mut self, shutdown: F) -> Option<String>
    where
        F: Future<Output = ()>,
    {
        self.agent
            .run_until(&mut self.events, shutdown, SHUTDOWN_GRACE)
            .await
    }
}

/// Build the signer from a hex private key and log its address.
///
/// # Errors
///
/// Returns `SigningError::InvalidKey` if the key is malformed.
pub fn build_signer(private_key: &str) -> Result<Eip712BidSigner> {
    let signer = Eip712BidSigner::from_hex(private_key)?;
    info!(executor = %signer.executor(), "Using account {}", signer.executor());
    Ok(signer)
}

/// Connect to the relay, subscribe to the configured chain and return the
/// running searcher.
///
/// # Errors
///
/// Fails on an invalid key, an endpoint with an unsupported scheme, a
/// connection failure, or a rejected subscription.
pub async fn launch(
    config: SearcherConfig,
    private_key: &str,
    options: &RelayOptions,
) -> Result<RunningSearcher> {
    let signer = build_signer(private_key)?;
    let url = websocket_url(&config.endpoint)?;

    let (client, events) = WsRelayClient::connect(url, options).await?;
    let relay: Arc<dyn RelayClient> = Arc::new(client);

    let policy = FixedBidPolicy::new(config.bid_amount, config.validity);
    let agent = Arc::new(SearcherAgent::new(
        config,
        relay,
        Arc::new(policy),
        Arc::new(signer),
    ));
    agent.start().await?;

    Ok(RunningSearcher { agent, events })
}

/// Run the searcher until the relay disconnects or Ctrl-C is received.
///
/// # Errors
///
/// Returns startup failures, and `Error::Connection` if the relay drops the
/// connection.
pub async fn run(config: SearcherConfig, private_key: &str, options: &RelayOptions) -> Result<()> {
    info!(
        endpoint = %config.endpoint,
        chain_id = %config.chain_id,
        bid = %config.bid_amount,
        validity_secs = config.validity.as_secs(),
        "relay-searcher starting"
    );

    let searcher = launch(config, private_key, options).await?;

    match searcher.run_until(ctrl_c()).await {
        Some(reason) => Err(Error::Connection(format!("relay connection lost: {reason}"))),
        None => Ok(()),
    }
}

async fn ctrl_c() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
