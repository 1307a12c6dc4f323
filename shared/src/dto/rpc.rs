//! Solana JSON-RPC 2.0 envelopes.
//!
//! Only the handful of methods the browser client calls are modelled:
//! `getLatestBlockhash`, `sendTransaction`, `getSignatureStatuses` and
//! `getBalance`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC request body.
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Value,
}

impl<'a> RpcRequest<'a> {
    pub fn new(id: u64, method: &'a str, params: Value) -> Self {
        Self { jsonrpc: "2.0", id, method, params }
    }
}

/// JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// JSON-RPC response body. Exactly one of `result`/`error` is set by a
/// well-behaved node.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct RpcResponse<T> {
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

impl<T> RpcResponse<T> {
    /// Collapse the envelope into a `Result`, keeping the node's error text.
    pub fn into_result(self) -> Result<T, String> {
        match (self.result, self.error) {
            (_, Some(err)) => Err(format!("{} (code {})", err.message, err.code)),
            (Some(result), None) => Ok(result),
            (None, None) => Err("RPC response carried neither result nor error".to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcContext {
    pub slot: u64,
}

/// `{ context, value }` wrapper used by most read methods.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcContextValue<T> {
    pub context: RpcContext,
    pub value: T,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestBlockhash {
    pub blockhash: String,
    pub last_valid_block_height: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureStatus {
    pub slot: u64,
    #[serde(default)]
    pub confirmations: Option<u64>,
    #[serde(default)]
    pub err: Option<Value>,
    #[serde(default)]
    pub confirmation_status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_envelope() {
        let req = RpcRequest::new(7, "getBalance", json!(["addr", {"commitment": "confirmed"}]));
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["id"], 7);
        assert_eq!(value["method"], "getBalance");
    }

    #[test]
    fn test_latest_blockhash_response() {
        let raw = r#"{"jsonrpc":"2.0","id":1,"result":{"context":{"slot":2792},
            "value":{"blockhash":"EkSnNWid2cvwEVnVx9aBqawnmiCNiDgp3gUdkDPTKN1N","lastValidBlockHeight":3090}}}"#;
        let resp: RpcResponse<RpcContextValue<LatestBlockhash>> = serde_json::from_str(raw).unwrap();
        let value = resp.into_result().unwrap();
        assert_eq!(value.context.slot, 2792);
        assert_eq!(value.value.blockhash, "EkSnNWid2cvwEVnVx9aBqawnmiCNiDgp3gUdkDPTKN1N");
        assert_eq!(value.value.last_valid_block_height, 3090);
    }

    #[test]
    fn test_signature_statuses_with_pending_entry() {
        let raw = r#"{"jsonrpc":"2.0","id":1,"result":{"context":{"slot":82},
            "value":[null,{"slot":72,"confirmations":10,"err":null,"confirmationStatus":"confirmed"}]}}"#;
        let resp: RpcResponse<RpcContextValue<Vec<Option<SignatureStatus>>>> =
            serde_json::from_str(raw).unwrap();
        let statuses = resp.into_result().unwrap().value;
        assert!(statuses[0].is_none());
        let status = statuses[1].as_ref().unwrap();
        assert_eq!(status.confirmation_status.as_deref(), Some("confirmed"));
        assert!(status.err.is_none());
    }

    #[test]
    fn test_error_envelope() {
        let raw = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32002,"message":"Transaction simulation failed"}}"#;
        let resp: RpcResponse<String> = serde_json::from_str(raw).unwrap();
        let err = resp.into_result().unwrap_err();
        assert!(err.contains("Transaction simulation failed"));
        assert!(err.contains("-32002"));
    }
}
