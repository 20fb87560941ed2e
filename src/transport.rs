//! Shared HTTP transport with bounded exponential-backoff retry.
//!
//! Every resource call funnels through [`Transport::request`]: the request
//! is rebuilt for each attempt, retryable failures are re-attempted up to
//! the configured limit, and the last observed error is surfaced unchanged.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tokio::time::sleep;

use crate::config::{ClientConfig, RetryConfig};
use crate::error::{extract_error_message, AipolabsError, Result};
use crate::logging::redact_headers;

const API_KEY_HEADER: &str = "x-api-key";

pub(crate) struct Transport {
    http: reqwest::Client,
    config: ClientConfig,
    retry: RetryConfig,
}

impl Transport {
    pub fn new(config: ClientConfig, retry: RetryConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| AipolabsError::validation("api key contains invalid header bytes"))?;
        headers.insert(API_KEY_HEADER, api_key);

        tracing::debug!(
            base_url = %config.base_url,
            headers = ?redact_headers(&headers),
            "creating transport"
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(AipolabsError::from)?;

        Ok(Self {
            http,
            config,
            retry,
        })
    }

    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        self.request(Method::GET, path, query, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    pub async fn patch(&self, path: &str, body: &Value) -> Result<Value> {
        self.request(Method::PATCH, path, &[], Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.request(Method::DELETE, path, &[], None).await
    }

    /// Perform one logical call: up to `max_attempts` sequential attempts,
    /// sleeping the backoff delay before each retry. Terminal errors return
    /// immediately; a retryable error on the final attempt is returned
    /// as-is, kind and message intact.
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value> {
        let mut attempt: u32 = 0;
        loop {
            if attempt > 0 {
                let delay = self.retry.backoff(attempt);
                tracing::warn!(
                    %method,
                    path,
                    attempt = attempt + 1,
                    max_attempts = self.retry.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    "retrying request"
                );
                sleep(delay).await;
            }

            match self.send_once(method.clone(), path, query, body).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt + 1 < self.retry.max_attempts => {
                    tracing::warn!(%method, path, error = %err, "request failed, will retry");
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn send_once(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = self
            .config
            .base_url
            .join(path)
            .map_err(|e| AipolabsError::validation(format!("invalid request path {path}: {e}")))?;

        let mut request = self.http.request(method, url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        handle_response(status, text)
    }
}

/// Map a raw response to a parsed body or a typed error.
///
/// Success bodies that fail to parse as JSON degrade to the raw text with a
/// warning rather than failing the call; error bodies contribute their
/// `message`/`error` field (or raw text) to the mapped error.
fn handle_response(status: StatusCode, text: String) -> Result<Value> {
    if status.is_success() {
        if text.is_empty() {
            return Ok(Value::Null);
        }
        return match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::warn!(%status, error = %err, "error parsing json response");
                Ok(Value::String(text))
            }
        };
    }

    let message = extract_error_message(&text);
    Err(AipolabsError::from_status(status, message, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_with_json_body() {
        let value = handle_response(StatusCode::OK, r#"{"success": true}"#.to_string()).unwrap();
        assert_eq!(value, serde_json::json!({"success": true}));
    }

    #[test]
    fn test_success_with_empty_body() {
        let value = handle_response(StatusCode::NO_CONTENT, String::new()).unwrap();
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn test_success_with_unparsable_body_degrades_to_text() {
        let value = handle_response(StatusCode::OK, "not json".to_string()).unwrap();
        assert_eq!(value, Value::String("not json".to_string()));
    }

    #[test]
    fn test_error_carries_extracted_message_and_raw_body() {
        let err = handle_response(
            StatusCode::UNAUTHORIZED,
            r#"{"message": "Unauthorized"}"#.to_string(),
        )
        .unwrap_err();
        match err {
            AipolabsError::Authentication {
                message,
                status,
                body,
            } => {
                assert_eq!(message, "Unauthorized");
                assert_eq!(status, 401);
                assert_eq!(body, r#"{"message": "Unauthorized"}"#);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
