//! Command-line interface definitions.
//!
//! Every option can also be supplied through the environment, which the
//! binary populates from a `.env` file before parsing.

use std::path::PathBuf;
use std::time::Duration;

use alloy_primitives::U256;
use clap::Parser;
use url::Url;

use crate::application::config::SearcherConfig;

/// Auction relay searcher: bids a fixed amount on every opportunity
#[derive(Parser, Debug)]
#[command(name = "relay-searcher")]
#[command(version)]
pub struct Cli {
    /// Relay base URL (http or https)
    #[arg(long, env = "SEARCHER_ENDPOINT")]
    pub endpoint: Url,

    /// Chain to subscribe to
    #[arg(long, env = "SEARCHER_CHAIN_ID")]
    pub chain_id: String,

    /// Bid amount in the smallest unit of the native token
    #[arg(long, env = "SEARCHER_BID", default_value = "100", value_parser = parse_amount)]
    pub bid: U256,

    /// Hex private key (0x-prefixed) used to sign bids
    #[arg(long, env = "SEARCHER_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// Seconds each bid stays valid
    #[arg(
        long,
        env = "SEARCHER_VALIDITY_SECS",
        default_value_t = 86_400,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub validity_secs: u64,

    /// Optional TOML file with [logging] and [relay] sections
    #[arg(long, env = "SEARCHER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level or filter directive (overrides the config file)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (overrides the config file)
    #[arg(long, value_parser = ["pretty", "json"])]
    pub log_format: Option<String>,
}

impl Cli {
    /// Searcher configuration derived from the arguments.
    #[must_use]
    pub fn searcher_config(&self) -> SearcherConfig {
        SearcherConfig::new(self.endpoint.clone(), self.chain_id.as_str())
            .with_bid_amount(self.bid)
            .with_validity(Duration::from_secs(self.validity_secs))
    }
}

fn parse_amount(raw: &str) -> std::result::Result<U256, String> {
    U256::from_str_radix(raw.trim(), 10).map_err(|e| format!("invalid amount '{raw}': {e}"))
}
