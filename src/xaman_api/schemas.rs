use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct PayloadBody<'a> {
    pub txjson: serde_json::Value,
    pub options: PayloadOptions,
    pub custom_meta: CustomMeta<'a>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadOptions {
    pub submit: bool,
    /// Minutes before an unanswered payload expires.
    pub expire: u64,
}

#[derive(Serialize, Debug)]
pub struct CustomMeta<'a> {
    pub instruction: &'a str,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct SignInTx {
    pub transaction_type: &'static str,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CreatedPayload {
    pub uuid: String,
    pub next: PayloadNext,
    #[serde(default)]
    pub refs: PayloadRefs,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PayloadNext {
    pub always: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PayloadRefs {
    #[serde(default)]
    pub qr_png: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PayloadDetails {
    pub meta: PayloadMeta,
    #[serde(default)]
    pub response: PayloadResponse,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PayloadMeta {
    #[serde(default)]
    pub signed: bool,
    #[serde(default)]
    pub resolved: bool,
    #[serde(default)]
    pub expired: bool,
    #[serde(default)]
    pub cancelled: bool,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PayloadResponse {
    #[serde(default)]
    pub txid: Option<String>,
    #[serde(default)]
    pub dispatched_result: Option<String>,
    #[serde(default)]
    pub account: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CancelledPayload {
    pub result: CancelResult,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CancelResult {
    pub cancelled: bool,
    /// `OK`, or why the payload could not be withdrawn (`ALREADY_OPENED`, ...).
    #[serde(default)]
    pub reason: String,
}
