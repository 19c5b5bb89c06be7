//! Shared constants and wire payloads.

use serde_json::{json, Value};

/// Well-known development key (first account of the default test mnemonic).
pub const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Checksummed address of [`TEST_KEY`].
pub const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

pub const TEST_CHAIN: &str = "sepolia";

/// A `new_opportunity` push for `id` on [`TEST_CHAIN`].
pub fn opportunity_push(id: &str) -> Value {
    json!({
        "type": "new_opportunity",
        "opportunity": {
            "opportunity_id": id,
            "chain_id": TEST_CHAIN,
            "permission_key": "0xdeadbeef",
            "target_contract": "0x4242424242424242424242424242424242424242",
            "target_calldata": "0x0102",
            "target_call_value": "0",
            "sell_tokens": [
                {"token": "0x0101010101010101010101010101010101010101", "amount": "1000"}
            ],
            "buy_tokens": [
                {"token": "0x0202020202020202020202020202020202020202", "amount": "2000"}
            ],
            "version": "v1"
        }
    })
}

/// A `bid_status_update` push.
pub fn status_push(bid_id: &str, bid_status: Value) -> Value {
    json!({
        "type": "bid_status_update",
        "status": {"id": bid_id, "bid_status": bid_status}
    })
}

/// A success response to `request`.
pub fn success(request: &Value, result: Value) -> Value {
    json!({"id": request["id"], "status": "success", "result": result})
}

/// An error response to `request`.
pub fn failure(request: &Value, message: &str) -> Value {
    json!({"id": request["id"], "status": "error", "result": message})
}

/// Poll `condition` every 10ms until it holds, for up to five seconds.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + std::time::Duration::from_secs(5);
    while !condition() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not met within 5s"
        );
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
}
