use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client, Method,
};

use crate::utils::fetch::{send_http_request, RequestParams};

use super::{
    constants::{API_KEY_HEADER, API_SECRET_HEADER, PAYLOAD_PATH},
    schemas::{
        CancelledPayload, CreatedPayload, CustomMeta, PayloadBody, PayloadDetails, PayloadOptions,
    },
};

/// Payload endpoints the signer relies on.
#[async_trait]
pub trait PayloadApi: Send + Sync {
    async fn create_payload(
        &self,
        txjson: serde_json::Value,
        options: PayloadOptions,
        instruction: &str,
    ) -> eyre::Result<CreatedPayload>;

    async fn get_payload(&self, uuid: &str) -> eyre::Result<PayloadDetails>;

    async fn cancel_payload(&self, uuid: &str) -> eyre::Result<CancelledPayload>;
}

/// Thin client for the Xaman platform payload endpoints.
#[derive(Clone)]
pub struct XamanApi {
    base_url: String,
    client: Client,
    headers: HeaderMap,
}

impl XamanApi {
    pub fn new(base_url: &str, api_key: &str, api_secret: &str) -> eyre::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, HeaderValue::from_str(api_key)?);
        headers.insert(API_SECRET_HEADER, HeaderValue::from_str(api_secret)?);

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
            headers,
        })
    }

    fn payload_url(&self) -> String {
        format!("{}/{PAYLOAD_PATH}", self.base_url)
    }
}

#[async_trait]
impl PayloadApi for XamanApi {
    async fn create_payload(
        &self,
        txjson: serde_json::Value,
        options: PayloadOptions,
        instruction: &str,
    ) -> eyre::Result<CreatedPayload> {
        let body = PayloadBody {
            txjson,
            options,
            custom_meta: CustomMeta { instruction },
        };

        let url = self.payload_url();
        let request_params = RequestParams {
            url: &url,
            method: Method::POST,
            body: Some(body),
            headers: Some(self.headers.clone()),
        };

        send_http_request::<CreatedPayload>(&self.client, request_params).await
    }

    async fn get_payload(&self, uuid: &str) -> eyre::Result<PayloadDetails> {
        let url = format!("{}/{uuid}", self.payload_url());
        let request_params = RequestParams {
            url: &url,
            method: Method::GET,
            body: None::<serde_json::Value>,
            headers: Some(self.headers.clone()),
        };

        send_http_request::<PayloadDetails>(&self.client, request_params).await
    }

    async fn cancel_payload(&self, uuid: &str) -> eyre::Result<CancelledPayload> {
        let url = format!("{}/{uuid}", self.payload_url());
        let request_params = RequestParams {
            url: &url,
            method: Method::DELETE,
            body: None::<serde_json::Value>,
            headers: Some(self.headers.clone()),
        };

        send_http_request::<CancelledPayload>(&self.client, request_params).await
    }
}
