//! EIP-712 bid signer.
//!
//! Bids are signed as EIP-712 typed data so the relay (and the on-chain
//! adapter contract) can recover the executor address from the signature.
//! The domain binds the signature to the opportunity's target contract.

use std::borrow::Cow;
use std::str::FromStr;

use alloy_primitives::{hex, Address, B256, U256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::{Eip712Domain, SolStruct};
use tracing::debug;

use crate::domain::bid::{BidParams, OpportunityBid};
use crate::domain::opportunity::Opportunity;
use crate::error::SigningError;
use crate::port::outbound::signer::BidSigner;

/// EIP-712 domain name of the opportunity adapter contract.
const DOMAIN_NAME: &str = "OpportunityAdapter";

/// EIP-712 domain version of the opportunity adapter contract.
const DOMAIN_VERSION: &str = "1";

mod typed {
    alloy_sol_types::sol! {
        #[derive(Debug)]
        struct OpportunityBid {
            string opportunityId;
            bytes permissionKey;
            uint256 amount;
            uint256 validUntil;
        }
    }
}

/// Parse a `0x`-prefixed hex private key.
///
/// The key is never echoed back in errors.
///
/// # Errors
///
/// Returns `SigningError::InvalidKey` if the string is not `0x`-prefixed
/// hex or does not encode a valid secp256k1 secret key.
pub fn parse_private_key(raw: &str) -> Result<PrivateKeySigner, SigningError> {
    let raw = raw.trim();
    let digits = raw
        .strip_prefix("0x")
        .ok_or_else(|| SigningError::InvalidKey("expected 0x-prefixed hex".to_string()))?;

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(SigningError::InvalidKey(
            "expected 0x-prefixed hex".to_string(),
        ));
    }

    PrivateKeySigner::from_str(raw).map_err(|e| SigningError::InvalidKey(e.to_string()))
}

/// Signs bids with a local secp256k1 key.
///
/// ECDSA nonces are derived deterministically (RFC 6979), so identical
/// inputs always yield identical signatures.
pub struct Eip712BidSigner {
    signer: PrivateKeySigner,
}

impl Eip712BidSigner {
    #[must_use]
    pub const fn new(signer: PrivateKeySigner) -> Self {
        Self { signer }
    }

    /// Create a signer from a `0x`-prefixed hex private key.
    ///
    /// # Errors
    ///
    /// Returns `SigningError::InvalidKey` if the key is malformed.
    pub fn from_hex(raw: &str) -> Result<Self, SigningError> {
        parse_private_key(raw).map(Self::new)
    }

    fn domain(opportunity: &Opportunity) -> Eip712Domain {
        Eip712Domain::new(
            Some(Cow::Borrowed(DOMAIN_NAME)),
            Some(Cow::Borrowed(DOMAIN_VERSION)),
            None,
            Some(opportunity.target_contract()),
            None,
        )
    }

    /// EIP-712 signing hash of a bid.
    pub(crate) fn signing_hash(opportunity: &Opportunity, params: &BidParams) -> B256 {
        let payload = typed::OpportunityBid {
            opportunityId: opportunity.opportunity_id().to_string(),
            permissionKey: opportunity.permission_key().clone(),
            amount: params.amount(),
            validUntil: U256::from(params.valid_until()),
        };
        payload.eip712_signing_hash(&Self::domain(opportunity))
    }
}

impl BidSigner for Eip712BidSigner {
    fn sign(
        &self,
        opportunity: &Opportunity,
        params: &BidParams,
        now: u64,
    ) -> Result<OpportunityBid, SigningError> {
        if !params.is_valid_at(now) {
            return Err(SigningError::Expired {
                valid_until: params.valid_until(),
                now,
            });
        }

        let hash = Self::signing_hash(opportunity, params);
        let signature = self
            .signer
            .sign_hash_sync(&hash)
            .map_err(|e| SigningError::Signature(e.to_string()))?;

        debug!(
            opportunity_id = %opportunity.opportunity_id(),
            hash = %hash,
            "Signed bid"
        );

        Ok(OpportunityBid {
            opportunity_id: opportunity.opportunity_id().clone(),
            permission_key: opportunity.permission_key().clone(),
            amount: params.amount(),
            valid_until: params.valid_until(),
            executor: self.signer.address(),
            signature: hex::encode_prefixed(signature.as_bytes()),
        })
    }

    fn executor(&self) -> Address {
        self.signer.address()
    }
}
