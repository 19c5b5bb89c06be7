//! Relay connection options and endpoint handling.

use std::time::Duration;

use url::Url;

use crate::error::{ConfigError, Result};

/// Path of the WebSocket API relative to the relay base URL.
const WS_PATH: &str = "v1/ws";

/// Connection options for the relay client.
#[derive(Debug, Clone)]
pub struct RelayOptions {
    /// How long to wait for the response to a request.
    pub request_timeout: Duration,
    /// Capacity of the inbound event channel.
    pub event_buffer: usize,
}

impl Default for RelayOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            event_buffer: 1_024,
        }
    }
}

/// Derive the relay WebSocket URL from its HTTP base URL.
///
/// `http` maps to `ws` and `https` to `wss`; `ws`/`wss` URLs are kept. The
/// WebSocket path is appended to the base path.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for any other scheme.
pub fn websocket_url(endpoint: &Url) -> Result<Url> {
    let scheme = match endpoint.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => {
            return Err(ConfigError::InvalidValue {
                field: "endpoint",
                reason: format!("unsupported scheme '{other}'"),
            }
            .into())
        }
    };

    let mut base = endpoint.clone();
    base.set_scheme(scheme).map_err(|()| ConfigError::InvalidValue {
        field: "endpoint",
        reason: format!("cannot use scheme '{scheme}'"),
    })?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    Ok(base.join(WS_PATH)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ws(endpoint: &str) -> String {
        websocket_url(&Url::parse(endpoint).unwrap())
            .unwrap()
            .to_string()
    }

    #[test]
    fn https_endpoint_maps_to_wss() {
        assert_eq!(
            ws("https://per-staging.dourolabs.app/"),
            "wss://per-staging.dourolabs.app/v1/ws"
        );
    }

    #[test]
    fn http_endpoint_without_trailing_slash_keeps_path() {
        assert_eq!(ws("http://localhost:9000/relay"), "ws://localhost:9000/relay/v1/ws");
    }

    #[test]
    fn websocket_endpoint_is_accepted() {
        assert_eq!(ws("ws://127.0.0.1:1234"), "ws://127.0.0.1:1234/v1/ws");
    }

    #[test]
    fn other_schemes_are_rejected() {
        let err = websocket_url(&Url::parse("ftp://example.com").unwrap()).unwrap_err();
        assert!(err.to_string().contains("endpoint"));
    }
}
