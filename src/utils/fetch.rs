use reqwest::{header::HeaderMap, Client, Method};
use serde::{de::DeserializeOwned, Serialize};

#[derive(Clone)]
pub struct RequestParams<'a, S: Serialize> {
    pub url: &'a str,
    pub method: Method,
    pub body: Option<S>,
    pub headers: Option<HeaderMap>,
}

pub async fn send_http_request<R: DeserializeOwned>(
    client: &Client,
    request_params: RequestParams<'_, impl Serialize>,
) -> eyre::Result<R> {
    let mut request = client.request(request_params.method.clone(), request_params.url);

    if let Some(body) = &request_params.body {
        request = request.json(&body);
    }

    if let Some(headers) = request_params.headers.as_ref() {
        request = request.headers(headers.clone());
    }

    let response = request
        .send()
        .await
        .inspect_err(|e| tracing::error!("Request failed: {}", e))?;

    let status = response.status();

    let text = response
        .text()
        .await
        .inspect_err(|e| tracing::error!("Failed to retrieve response text: {}", e))?;

    if !status.is_success() {
        eyre::bail!("Status code not 200: {status}, {text}")
    }

    let deserialized_body = serde_json::from_str::<R>(&text)
        .inspect_err(|e| tracing::error!("Failed to deserialize response: {}\n {} ", e, text))?;

    Ok(deserialized_body)
}
