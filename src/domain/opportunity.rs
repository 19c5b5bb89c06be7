//! Opportunity type with builder pattern.
//!
//! An `Opportunity` is published by the relay and consumed once by the
//! searcher. It is immutable after construction; use `Opportunity::builder()`
//! to create one.

use std::fmt;

use alloy_primitives::{Address, Bytes, U256};

use super::id::{ChainId, OpportunityId};

/// Error returned when building an Opportunity fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpportunityBuildError {
    /// Opportunity ID is required but was not provided.
    MissingOpportunityId,
    /// Chain ID is required but was not provided.
    MissingChainId,
    /// Permission key is required but was not provided.
    MissingPermissionKey,
    /// Target contract is required but was not provided.
    MissingTargetContract,
}

impl fmt::Display for OpportunityBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingOpportunityId => write!(f, "opportunity_id is required"),
            Self::MissingChainId => write!(f, "chain_id is required"),
            Self::MissingPermissionKey => write!(f, "permission_key is required"),
            Self::MissingTargetContract => write!(f, "target_contract is required"),
        }
    }
}

impl std::error::Error for OpportunityBuildError {}

/// A token and amount pair on one side of an opportunity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAmount {
    /// ERC-20 token contract.
    pub token: Address,
    /// Amount in the token's smallest unit.
    pub amount: U256,
}

impl TokenAmount {
    #[must_use]
    pub const fn new(token: Address, amount: U256) -> Self {
        Self { token, amount }
    }
}

/// An execution opportunity published by the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opportunity {
    opportunity_id: OpportunityId,
    chain_id: ChainId,
    permission_key: Bytes,
    target_contract: Address,
    target_calldata: Bytes,
    target_call_value: U256,
    sell_tokens: Vec<TokenAmount>,
    buy_tokens: Vec<TokenAmount>,
    version: String,
}

impl Opportunity {
    /// Create a new builder for constructing an Opportunity.
    pub fn builder() -> OpportunityBuilder {
        OpportunityBuilder::new()
    }

    pub fn opportunity_id(&self) -> &OpportunityId {
        &self.opportunity_id
    }

    pub fn chain_id(&self) -> &ChainId {
        &self.chain_id
    }

    /// Key the relay uses to group competing bids for the same execution.
    pub fn permission_key(&self) -> &Bytes {
        &self.permission_key
    }

    pub fn target_contract(&self) -> Address {
        self.target_contract
    }

    pub fn target_calldata(&self) -> &Bytes {
        &self.target_calldata
    }

    pub fn target_call_value(&self) -> U256 {
        self.target_call_value
    }

    /// Tokens the searcher receives when executing.
    pub fn sell_tokens(&self) -> &[TokenAmount] {
        &self.sell_tokens
    }

    /// Tokens the searcher must provide when executing.
    pub fn buy_tokens(&self) -> &[TokenAmount] {
        &self.buy_tokens
    }

    /// Opportunity format version as published by the relay.
    pub fn version(&self) -> &str {
        &self.version
    }
}

/// Builder for constructing `Opportunity` instances.
///
/// # Example
///
/// ```ignore
/// let opportunity = Opportunity::builder()
///     .opportunity_id("op-1")
///     .chain_id("sepolia")
///     .permission_key(key)
///     .target_contract(contract)
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct OpportunityBuilder {
    opportunity_id: Option<OpportunityId>,
    chain_id: Option<ChainId>,
    permission_key: Option<Bytes>,
    target_contract: Option<Address>,
    target_calldata: Bytes,
    target_call_value: U256,
    sell_tokens: Vec<TokenAmount>,
    buy_tokens: Vec<TokenAmount>,
    version: Option<String>,
}

impl OpportunityBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opportunity_id(mut self, id: impl Into<OpportunityId>) -> Self {
        self.opportunity_id = Some(id.into());
        self
    }

    pub fn chain_id(mut self, chain_id: impl Into<ChainId>) -> Self {
        self.chain_id = Some(chain_id.into());
        self
    }

    pub fn permission_key(mut self, key: Bytes) -> Self {
        self.permission_key = Some(key);
        self
    }

    pub fn target_contract(mut self, contract: Address) -> Self {
        self.target_contract = Some(contract);
        self
    }

    pub fn target_calldata(mut self, calldata: Bytes) -> Self {
        self.target_calldata = calldata;
        self
    }

    pub fn target_call_value(mut self, value: U256) -> Self {
        self.target_call_value = value;
        self
    }

    pub fn sell_tokens(mut self, tokens: Vec<TokenAmount>) -> Self {
        self.sell_tokens = tokens;
        self
    }

    pub fn buy_tokens(mut self, tokens: Vec<TokenAmount>) -> Self {
        self.buy_tokens = tokens;
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Build the Opportunity.
    ///
    /// Calldata, call value and token lists default to empty/zero; the
    /// version defaults to `v1`.
    ///
    /// # Errors
    ///
    /// Returns `OpportunityBuildError` if any required field is missing.
    pub fn build(self) -> Result<Opportunity, OpportunityBuildError> {
        let opportunity_id = self
            .opportunity_id
            .ok_or(OpportunityBuildError::MissingOpportunityId)?;
        let chain_id = self.chain_id.ok_or(OpportunityBuildError::MissingChainId)?;
        let permission_key = self
            .permission_key
            .ok_or(OpportunityBuildError::MissingPermissionKey)?;
        let target_contract = self
            .target_contract
            .ok_or(OpportunityBuildError::MissingTargetContract)?;

        Ok(Opportunity {
            opportunity_id,
            chain_id,
            permission_key,
            target_contract,
            target_calldata: self.target_calldata,
            target_call_value: self.target_call_value,
            sell_tokens: self.sell_tokens,
            buy_tokens: self.buy_tokens,
            version: self.version.unwrap_or_else(|| "v1".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_builder() -> OpportunityBuilder {
        Opportunity::builder()
            .opportunity_id("op-1")
            .chain_id("sepolia")
            .permission_key(Bytes::from(vec![0xde, 0xad]))
            .target_contract(Address::repeat_byte(0x11))
    }

    #[test]
    fn builder_applies_defaults() {
        let opp = make_builder().build().unwrap();

        assert_eq!(opp.opportunity_id().as_str(), "op-1");
        assert_eq!(opp.chain_id().as_str(), "sepolia");
        assert_eq!(opp.version(), "v1");
        assert_eq!(opp.target_call_value(), U256::ZERO);
        assert!(opp.target_calldata().is_empty());
        assert!(opp.sell_tokens().is_empty());
    }

    #[test]
    fn builder_fails_without_opportunity_id() {
        let result = Opportunity::builder()
            .chain_id("sepolia")
            .permission_key(Bytes::new())
            .target_contract(Address::ZERO)
            .build();

        assert_eq!(
            result.unwrap_err(),
            OpportunityBuildError::MissingOpportunityId
        );
    }

    #[test]
    fn builder_fails_without_permission_key() {
        let result = Opportunity::builder()
            .opportunity_id("op-1")
            .chain_id("sepolia")
            .target_contract(Address::ZERO)
            .build();

        assert_eq!(
            result.unwrap_err(),
            OpportunityBuildError::MissingPermissionKey
        );
    }

    #[test]
    fn builder_keeps_token_lists() {
        let token = TokenAmount::new(Address::repeat_byte(0x22), U256::from(5u64));
        let opp = make_builder()
            .sell_tokens(vec![token.clone()])
            .buy_tokens(vec![token.clone(), token])
            .build()
            .unwrap();

        assert_eq!(opp.sell_tokens().len(), 1);
        assert_eq!(opp.buy_tokens().len(), 2);
    }
}
