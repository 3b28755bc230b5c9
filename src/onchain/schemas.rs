use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct RpcRequest<'a, P: Serialize> {
    pub method: &'a str,
    pub params: [P; 1],
}

#[derive(Deserialize, Debug)]
pub struct RpcResponse<R> {
    pub result: RpcResult<R>,
}

/// rippled reports failures inside `result` with an HTTP 200 status.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum RpcResult<R> {
    Error(RpcError),
    Ok(R),
}

#[derive(Deserialize, Debug)]
pub struct RpcError {
    pub error: String,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct AccountParams<'a> {
    pub account: &'a str,
    pub ledger_index: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<serde_json::Value>,
}

#[derive(Deserialize, Debug)]
pub struct AccountInfoResult {
    pub account_data: AccountData,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct AccountData {
    /// XRP balance in drops.
    pub balance: String,
}

#[derive(Deserialize, Debug)]
pub struct AccountLinesResult {
    pub lines: Vec<TrustLine>,
    #[serde(default)]
    pub marker: Option<serde_json::Value>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct TrustLine {
    /// Counterparty of the line, the issuer from the holder's side.
    pub account: String,
    pub currency: String,
    pub balance: String,
    pub limit: String,
}
