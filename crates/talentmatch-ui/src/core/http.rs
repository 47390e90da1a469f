//! Request shaping and error mapping for the JSON fetch wrapper.
//!
//! # Design
//! - Default headers are merged under caller headers; caller values win, names compare
//!   case-insensitively.
//! - Non-success responses surface the server's `message` field when present.

use serde_json::Value;
use thiserror::Error;

/// Header sent with every API call unless the caller overrides it.
pub const DEFAULT_HEADERS: [(&str, &str); 1] = [("Content-Type", "application/json")];

/// HTTP verbs used by the pages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET.
    #[default]
    Get,
    /// POST.
    Post,
    /// PUT.
    Put,
    /// PATCH.
    Patch,
    /// DELETE.
    Delete,
}

/// Caller options for an API request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Verb.
    pub method: HttpMethod,
    /// Extra or overriding headers.
    pub headers: Vec<(String, String)>,
    /// Serialized request body.
    pub body: Option<String>,
}

impl RequestOptions {
    /// POST with a JSON body.
    #[must_use]
    pub fn post_json(body: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            body: Some(body.into()),
            ..Self::default()
        }
    }

    /// Headers after merging the defaults.
    #[must_use]
    pub fn merged_headers(&self) -> Vec<(String, String)> {
        merge_headers(&DEFAULT_HEADERS, &self.headers)
    }
}

/// Failures surfaced by the API wrapper.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Server answered with a non-success status.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server message or localized fallback.
        message: String,
    },
    /// The request never completed.
    #[error("request failed: {0}")]
    Transport(String),
    /// The response body was not the expected JSON.
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Merge defaults with caller headers, caller last.
#[must_use]
pub fn merge_headers(
    defaults: &[(&str, &str)],
    overrides: &[(String, String)],
) -> Vec<(String, String)> {
    let mut merged: Vec<(String, String)> = defaults
        .iter()
        .filter(|(name, _)| {
            !overrides
                .iter()
                .any(|(other, _)| other.eq_ignore_ascii_case(name))
        })
        .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
        .collect();
    merged.extend(overrides.iter().cloned());
    merged
}

/// Message for a failed response: the body's `message` string, else `fallback`.
#[must_use]
pub fn failure_message(body: &Value, fallback: &str) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map_or_else(|| fallback.to_string(), ToString::to_string)
}

/// Map a completed response into the body or an [`ApiError::Status`].
///
/// # Errors
/// Returns [`ApiError::Status`] when `ok` is false.
pub fn check_response(
    status: u16,
    ok: bool,
    body: Value,
    fallback: &str,
) -> Result<Value, ApiError> {
    if ok {
        return Ok(body);
    }
    Err(ApiError::Status {
        status,
        message: failure_message(&body, fallback),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn caller_headers_override_defaults() {
        let options = RequestOptions {
            headers: vec![
                ("content-type".to_string(), "text/plain".to_string()),
                ("X-Trace".to_string(), "1".to_string()),
            ],
            ..RequestOptions::default()
        };
        assert_eq!(
            options.merged_headers(),
            vec![
                ("content-type".to_string(), "text/plain".to_string()),
                ("X-Trace".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let options = RequestOptions::post_json("{}");
        assert_eq!(options.method, HttpMethod::Post);
        assert_eq!(
            options.merged_headers(),
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn failure_uses_server_message() {
        let err = check_response(422, false, json!({"message": "岗位不存在"}), "请求失败")
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 422,
                message: "岗位不存在".to_string()
            }
        );
        assert_eq!(err.to_string(), "岗位不存在");
    }

    #[test]
    fn failure_falls_back_when_message_missing() {
        assert_eq!(failure_message(&json!({"error": "x"}), "请求失败"), "请求失败");
        assert_eq!(failure_message(&json!({"message": "  "}), "fallback"), "fallback");
        assert_eq!(failure_message(&Value::Null, "fallback"), "fallback");
    }

    #[test]
    fn success_passes_body_through() {
        let body = json!({"ok": true});
        assert_eq!(check_response(200, true, body.clone(), "x").unwrap(), body);
    }
}
