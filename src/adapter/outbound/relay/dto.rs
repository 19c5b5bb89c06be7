//! Relay WebSocket message types.
//!
//! Requests carry a client-chosen `id` echoed back in the response:
//! ```json
//! {"id":"7c1e...","method":"subscribe","params":{"chain_ids":["sepolia"]}}
//! {"id":"7c1e...","status":"success","result":null}
//! ```
//!
//! Server pushes carry a `type` tag instead:
//! ```json
//! {"type":"new_opportunity","opportunity":{"opportunity_id":"...", ...}}
//! {"type":"bid_status_update","status":{"id":"...","bid_status":{"type":"submitted","result":"0x...","index":0}}}
//! ```

use std::str::FromStr;

use alloy_primitives::{hex, Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::bid::OpportunityBid;
use crate::domain::id::ChainId;
use crate::domain::opportunity::{Opportunity, TokenAmount};
use crate::domain::status::{BidStatus, BidStatusUpdate};

/// Request method names.
pub mod method {
    pub const SUBSCRIBE: &str = "subscribe";
    pub const POST_OPPORTUNITY_BID: &str = "post_opportunity_bid";
}

/// A request sent to the relay.
#[derive(Debug, Serialize)]
pub struct RelayRequest<P> {
    pub id: String,
    pub method: &'static str,
    pub params: P,
}

#[derive(Debug, Serialize)]
pub struct SubscribeParams {
    pub chain_ids: Vec<String>,
}

impl SubscribeParams {
    pub fn new(chain_ids: &[ChainId]) -> Self {
        Self {
            chain_ids: chain_ids.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostBidParams {
    pub opportunity_id: String,
    pub opportunity_bid: BidPayload,
}

/// Wire form of a signed bid. Amounts and deadlines are decimal strings.
#[derive(Debug, Serialize)]
pub struct BidPayload {
    pub permission_key: String,
    pub amount: String,
    pub executor: String,
    pub signature: String,
    pub valid_until: String,
}

impl From<&OpportunityBid> for PostBidParams {
    fn from(bid: &OpportunityBid) -> Self {
        Self {
            opportunity_id: bid.opportunity_id.to_string(),
            opportunity_bid: BidPayload {
                permission_key: hex::encode_prefixed(&bid.permission_key),
                amount: bid.amount.to_string(),
                executor: bid.executor.to_checksum(None),
                signature: bid.signature.clone(),
                valid_until: bid.valid_until.to_string(),
            },
        }
    }
}

/// Response to a client request.
#[derive(Debug, Clone, Deserialize)]
pub struct RelayResponse {
    pub id: String,
    pub status: ResponseStatus,
    #[serde(default)]
    pub result: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

impl RelayResponse {
    /// Human-readable error message carried by an error response.
    pub fn error_message(&self) -> String {
        match &self.result {
            Value::String(s) => s.clone(),
            Value::Null => "unknown relay error".to_string(),
            other => other.to_string(),
        }
    }
}

/// Result payload of a successful `post_opportunity_bid`.
#[derive(Debug, Deserialize)]
pub struct PostBidResult {
    pub id: String,
}

/// Server-pushed updates.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RelayUpdate {
    NewOpportunity { opportunity: OpportunityDto },
    BidStatusUpdate { status: BidStatusDto },
}

#[derive(Debug, Deserialize)]
pub struct TokenAmountDto {
    pub token: String,
    pub amount: String,
}

#[derive(Debug, Deserialize)]
pub struct OpportunityDto {
    pub opportunity_id: String,
    pub chain_id: String,
    pub permission_key: String,
    pub target_contract: String,
    #[serde(default)]
    pub target_calldata: Option<String>,
    #[serde(default)]
    pub target_call_value: Option<String>,
    #[serde(default)]
    pub sell_tokens: Vec<TokenAmountDto>,
    #[serde(default)]
    pub buy_tokens: Vec<TokenAmountDto>,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BidStatusDto {
    pub id: String,
    pub bid_status: RawBidStatus,
}

#[derive(Debug, Deserialize)]
pub struct RawBidStatus {
    #[serde(rename = "type")]
    pub tag: String,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub index: Option<u32>,
}

impl From<BidStatusDto> for BidStatusUpdate {
    fn from(dto: BidStatusDto) -> Self {
        let result = dto.bid_status.result.and_then(|value| match value {
            Value::String(s) => Some(s),
            Value::Null => None,
            other => Some(other.to_string()),
        });
        Self::new(
            dto.id,
            BidStatus::from_parts(&dto.bid_status.tag, result, dto.bid_status.index),
        )
    }
}

fn parse_field<T: FromStr>(field: &'static str, raw: &str) -> Result<T, DecodeError>
where
    T::Err: std::fmt::Display,
{
    T::from_str(raw).map_err(|e| DecodeError::new(format!("invalid {field}: {e}")))
}

fn parse_tokens(field: &'static str, tokens: Vec<TokenAmountDto>) -> Result<Vec<TokenAmount>, DecodeError> {
    tokens
        .into_iter()
        .map(|t| {
            Ok(TokenAmount::new(
                parse_field::<Address>(field, &t.token)?,
                parse_field::<U256>(field, &t.amount)?,
            ))
        })
        .collect()
}

impl TryFrom<OpportunityDto> for Opportunity {
    type Error = DecodeError;

    fn try_from(dto: OpportunityDto) -> Result<Self, Self::Error> {
        let mut builder = Opportunity::builder()
            .opportunity_id(dto.opportunity_id)
            .chain_id(dto.chain_id)
            .permission_key(parse_field::<Bytes>("permission_key", &dto.permission_key)?)
            .target_contract(parse_field::<Address>("target_contract", &dto.target_contract)?)
            .sell_tokens(parse_tokens("sell_tokens", dto.sell_tokens)?)
            .buy_tokens(parse_tokens("buy_tokens", dto.buy_tokens)?);

        if let Some(calldata) = dto.target_calldata {
            builder = builder.target_calldata(parse_field::<Bytes>("target_calldata", &calldata)?);
        }
        if let Some(value) = dto.target_call_value {
            builder = builder.target_call_value(parse_field::<U256>("target_call_value", &value)?);
        }
        if let Some(version) = dto.version {
            builder = builder.version(version);
        }

        builder.build().map_err(|e| DecodeError::new(e.to_string()))
    }
}

/// A frame that could not be turned into a response or update.
#[derive(Debug, thiserror::Error)]
#[error("{reason}")]
pub struct DecodeError {
    pub reason: String,
    /// Bid or opportunity id recovered from the frame, if any.
    pub id: Option<String>,
}

impl DecodeError {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            id: None,
        }
    }

    fn with_id(mut self, id: Option<String>) -> Self {
        self.id = id;
        self
    }
}

/// A decoded inbound frame.
#[derive(Debug)]
pub enum Inbound {
    Response(RelayResponse),
    Opportunity(Opportunity),
    BidStatus(BidStatusUpdate),
    /// An update with a `type` this crate does not handle.
    Ignored { tag: String },
}

/// Best-effort id of whatever a malformed frame describes.
fn recover_id(value: &Value) -> Option<String> {
    let candidates = [
        value.pointer("/status/id"),
        value.pointer("/opportunity/opportunity_id"),
        value.get("id"),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(|v| v.as_str().map(str::to_string))
}

/// Decode a text frame from the relay.
///
/// # Errors
///
/// Returns a `DecodeError` (with any id that could be recovered) if the
/// frame is not valid JSON or does not match a known shape.
pub fn decode(text: &str) -> Result<Inbound, DecodeError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| DecodeError::new(format!("invalid JSON: {e}")))?;

    let Some(tag) = value.get("type").and_then(Value::as_str).map(str::to_string) else {
        return serde_json::from_value::<RelayResponse>(value.clone())
            .map(Inbound::Response)
            .map_err(|e| DecodeError::new(format!("invalid response: {e}")).with_id(recover_id(&value)));
    };

    if !matches!(tag.as_str(), "new_opportunity" | "bid_status_update") {
        return Ok(Inbound::Ignored { tag });
    }

    let id = recover_id(&value);
    let update = serde_json::from_value::<RelayUpdate>(value)
        .map_err(|e| DecodeError::new(format!("invalid {tag}: {e}")).with_id(id.clone()))?;

    match update {
        RelayUpdate::NewOpportunity { opportunity } => Opportunity::try_from(opportunity)
            .map(Inbound::Opportunity)
            .map_err(|e| e.with_id(id)),
        RelayUpdate::BidStatusUpdate { status } => Ok(Inbound::BidStatus(status.into())),
    }
}
