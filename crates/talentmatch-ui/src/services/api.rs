//! JSON fetch wrapper used by page scripts.

use gloo::console;
use gloo_net::http::{Method, Request};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::http::{ApiError, HttpMethod, RequestOptions, check_response};
use crate::i18n::TranslationBundle;

const fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// Send a JSON API request and decode the response body.
///
/// Default `Content-Type: application/json` is merged under the caller headers.
/// Non-success statuses become [`ApiError::Status`] carrying the server's `message`.
///
/// # Errors
/// Returns [`ApiError`] for transport failures, non-success statuses and bodies that
/// do not decode into `T`. Every error is also logged to the console.
pub async fn api_request<T: DeserializeOwned>(
    url: &str,
    options: RequestOptions,
    bundle: &TranslationBundle,
) -> Result<T, ApiError> {
    let result = send(url, &options, bundle).await;
    if let Err(err) = &result {
        console::error!(bundle.text("api.error_prefix", "API request error:"), err.to_string());
    }
    result
}

async fn send<T: DeserializeOwned>(
    url: &str,
    options: &RequestOptions,
    bundle: &TranslationBundle,
) -> Result<T, ApiError> {
    let mut request = Request::new(url).method(method(options.method));
    for (name, value) in options.merged_headers() {
        request = request.header(&name, &value);
    }
    if let Some(body) = &options.body {
        request = request.body(body.as_str());
    }
    let response = request
        .send()
        .await
        .map_err(|err| ApiError::Transport(err.to_string()))?;
    let status = response.status();
    let ok = response.ok();
    let body = match response.json::<Value>().await {
        Ok(body) => body,
        Err(_) if !ok => Value::Null,
        Err(err) => return Err(ApiError::Decode(err.to_string())),
    };
    let body = check_response(
        status,
        ok,
        body,
        &bundle.text("api.request_failed", "Request failed"),
    )?;
    serde_json::from_value(body).map_err(|err| ApiError::Decode(err.to_string()))
}
