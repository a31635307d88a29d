//! JSON-RPC 2.0 envelope shared by the EVM and Solana services

use serde_json::{json, Value};

use crate::domain::repositories::JsonTransport;
use crate::shared::error::TokenError;
use crate::shared::types::TokenResult;

/// Call `method` on the node behind `transport` and return its `result`
pub async fn json_rpc_call(
    transport: &dyn JsonTransport,
    method: &str,
    params: Value,
) -> TokenResult<Value> {
    let body = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": method,
        "params": params,
    });

    let response = transport.post_json("", body).await?;

    if let Some(error) = response.get("error").filter(|e| !e.is_null()) {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(TokenError::network(format!("{} failed: {}", method, message)));
    }

    response
        .get("result")
        .cloned()
        .ok_or_else(|| TokenError::decode(format!("{} response has no result", method)))
}
