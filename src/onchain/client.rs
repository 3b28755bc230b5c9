use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::{de::DeserializeOwned, Serialize};

use crate::{executor::capabilities::LedgerQuery, recipients::address::is_valid_address};

use super::{
    constants::{ACCOUNT_LINES_PAGE_LIMIT, ACCOUNT_NOT_FOUND, NATIVE_CURRENCY},
    schemas::{
        AccountData, AccountInfoResult, AccountLinesResult, AccountParams, RpcRequest,
        RpcResponse, RpcResult, TrustLine,
    },
    tx::drops_to_xrp,
};

const VALIDATED: &str = "validated";

/// JSON-RPC client for a rippled node with transient-failure retries.
#[derive(Clone)]
pub struct XrplClient {
    url: String,
    http: ClientWithMiddleware,
}

impl XrplClient {
    pub fn new(rpc_url: &str) -> Self {
        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_secs(1), Duration::from_secs(5))
            .build_with_max_retries(5);

        let http = ClientBuilder::new(reqwest::Client::new())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Self {
            url: rpc_url.to_string(),
            http,
        }
    }

    async fn request<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> eyre::Result<RpcResult<R>> {
        let body = serde_json::to_vec(&RpcRequest {
            method,
            params: [params],
        })?;

        let response = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .inspect_err(|e| tracing::error!("XRPL request `{method}` failed: {e}"))?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            eyre::bail!("XRPL node answered `{method}` with {status}: {text}")
        }

        let envelope = serde_json::from_str::<RpcResponse<R>>(&text).inspect_err(|e| {
            tracing::error!("Failed to deserialize `{method}` response: {e}\n {text}")
        })?;

        Ok(envelope.result)
    }

    /// Account root of `address`, or `None` when the account is not funded.
    pub async fn account_info(&self, address: &str) -> eyre::Result<Option<AccountData>> {
        let params = AccountParams {
            account: address,
            ledger_index: VALIDATED,
            limit: None,
            marker: None,
        };

        match self.request::<_, AccountInfoResult>("account_info", params).await? {
            RpcResult::Ok(result) => Ok(Some(result.account_data)),
            RpcResult::Error(err) if err.error == ACCOUNT_NOT_FOUND => Ok(None),
            RpcResult::Error(err) => eyre::bail!(
                "account_info failed: {} {}",
                err.error,
                err.error_message.unwrap_or_default()
            ),
        }
    }

    /// All trust lines of `address`, following pagination markers.
    pub async fn account_lines(&self, address: &str) -> eyre::Result<Vec<TrustLine>> {
        let mut lines = vec![];
        let mut marker = None;

        loop {
            let params = AccountParams {
                account: address,
                ledger_index: VALIDATED,
                limit: Some(ACCOUNT_LINES_PAGE_LIMIT),
                marker: marker.take(),
            };

            match self
                .request::<_, AccountLinesResult>("account_lines", params)
                .await?
            {
                RpcResult::Ok(page) => {
                    lines.extend(page.lines);
                    match page.marker {
                        Some(next) => marker = Some(next),
                        None => return Ok(lines),
                    }
                }
                RpcResult::Error(err) if err.error == ACCOUNT_NOT_FOUND => return Ok(lines),
                RpcResult::Error(err) => eyre::bail!(
                    "account_lines failed: {} {}",
                    err.error,
                    err.error_message.unwrap_or_default()
                ),
            }
        }
    }
}

fn find_line<'a>(lines: &'a [TrustLine], currency: &str, issuer: &str) -> Option<&'a TrustLine> {
    lines
        .iter()
        .find(|line| line.currency == currency && line.account == issuer)
}

#[async_trait]
impl LedgerQuery for XrplClient {
    async fn get_balance(
        &self,
        address: &str,
        currency: &str,
        issuer: Option<&str>,
    ) -> eyre::Result<f64> {
        match issuer {
            None if currency == NATIVE_CURRENCY => {
                let Some(account) = self.account_info(address).await? else {
                    return Ok(0.0);
                };
                Ok(drops_to_xrp(account.balance.parse::<u64>()?))
            }
            None => eyre::bail!("issued currency {currency} needs an issuer"),
            // an issuer can always pay out its own currency
            Some(issuer) if issuer == address => Ok(f64::INFINITY),
            Some(issuer) => {
                let lines = self.account_lines(address).await?;
                match find_line(&lines, currency, issuer) {
                    Some(line) => Ok(line.balance.parse::<f64>()?.max(0.0)),
                    None => Ok(0.0),
                }
            }
        }
    }

    async fn has_trust_line(
        &self,
        address: &str,
        currency: &str,
        issuer: &str,
    ) -> eyre::Result<bool> {
        let lines = self.account_lines(address).await?;
        Ok(find_line(&lines, currency, issuer).is_some())
    }

    async fn validate_address(&self, address: &str) -> eyre::Result<bool> {
        if !is_valid_address(address) {
            return Ok(false);
        }

        Ok(self.account_info(address).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        distribution::{token::TokenConfig, typedefs::DistributionMethod},
        test_utils::{ADDR_A, ISSUER},
    };

    #[test]
    fn rpc_errors_are_read_from_result() {
        let raw = r#"{"result":{"error":"actNotFound","error_message":"Account not found.","status":"error"}}"#;

        let response: RpcResponse<AccountInfoResult> = serde_json::from_str(raw).unwrap();

        assert!(matches!(response.result, RpcResult::Error(e) if e.error == ACCOUNT_NOT_FOUND));
    }

    #[test]
    fn account_info_result_is_parsed() {
        let raw = format!(
            r#"{{"result":{{"account_data":{{"Account":"{ADDR_A}","Balance":"25000000","Sequence":7,"Flags":0}},"status":"success","validated":true}}}}"#
        );

        let response: RpcResponse<AccountInfoResult> = serde_json::from_str(&raw).unwrap();

        let RpcResult::Ok(result) = response.result else {
            panic!("expected a successful result");
        };
        assert_eq!(result.account_data.balance, "25000000");
        assert_eq!(drops_to_xrp(result.account_data.balance.parse().unwrap()), 25.0);
    }

    #[test]
    fn trust_lines_are_matched_by_currency_and_issuer() {
        let raw = format!(
            r#"{{"result":{{"account":"{ADDR_A}","lines":[{{"account":"{ISSUER}","currency":"USD","balance":"12.5","limit":"1000","limit_peer":"0"}}],"status":"success"}}}}"#
        );

        let response: RpcResponse<AccountLinesResult> = serde_json::from_str(&raw).unwrap();
        let RpcResult::Ok(page) = response.result else {
            panic!("expected a successful result");
        };

        assert!(page.marker.is_none());
        assert_eq!(find_line(&page.lines, "USD", ISSUER).unwrap().balance, "12.5");
        assert!(find_line(&page.lines, "EUR", ISSUER).is_none());
        assert!(find_line(&page.lines, "USD", ADDR_A).is_none());
    }

    #[test]
    fn lowercase_hex_code_matches_ledger_line() {
        let code = "534F4C4F00000000000000000000000000000000";
        let lines = vec![TrustLine {
            account: ISSUER.to_string(),
            currency: code.to_string(),
            balance: "3".to_string(),
            limit: "100".to_string(),
        }];
        let token = TokenConfig::new(
            &code.to_ascii_lowercase(),
            Some(ISSUER),
            1.0,
            DistributionMethod::Equal,
        )
        .unwrap();

        assert!(find_line(&lines, &token.ledger_currency_code(), ISSUER).is_some());
    }
}
