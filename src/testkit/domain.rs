//! Builders for domain primitives used across tests.

use alloy_primitives::{Address, Bytes, U256};

use crate::domain::opportunity::{Opportunity, TokenAmount};
use crate::domain::status::{BidStatus, BidStatusUpdate};
use crate::port::outbound::relay::RelayEvent;

/// Chain used by [`make_opportunity`].
pub const TEST_CHAIN: &str = "sepolia";

/// Opportunity adapter contract used by [`make_opportunity`].
pub const TEST_TARGET: Address = Address::repeat_byte(0x42);

/// Create an opportunity on [`TEST_CHAIN`].
pub fn make_opportunity(id: &str) -> Opportunity {
    make_opportunity_on(id, TEST_CHAIN)
}

/// Create an opportunity on the given chain.
pub fn make_opportunity_on(id: &str, chain_id: &str) -> Opportunity {
    Opportunity::builder()
        .opportunity_id(id)
        .chain_id(chain_id)
        .permission_key(Bytes::from(vec![0xde, 0xad, 0xbe, 0xef]))
        .target_contract(TEST_TARGET)
        .target_calldata(Bytes::from(vec![0x01, 0x02]))
        .target_call_value(U256::ZERO)
        .sell_tokens(vec![TokenAmount::new(
            Address::repeat_byte(0x01),
            U256::from(1_000u64),
        )])
        .buy_tokens(vec![TokenAmount::new(
            Address::repeat_byte(0x02),
            U256::from(2_000u64),
        )])
        .build()
        .expect("test opportunity is complete")
}

/// Create an [`Opportunity`](RelayEvent::Opportunity) event.
pub fn opportunity_event(id: &str) -> RelayEvent {
    RelayEvent::Opportunity(make_opportunity(id))
}

/// Create a [`BidStatus`](RelayEvent::BidStatus) event.
pub fn status_event(bid_id: &str, status: BidStatus) -> RelayEvent {
    RelayEvent::BidStatus(BidStatusUpdate::new(bid_id, status))
}

/// Create a [`Disconnected`](RelayEvent::Disconnected) event.
pub fn disconnect_event(reason: &str) -> RelayEvent {
    RelayEvent::Disconnected {
        reason: reason.to_string(),
    }
}
