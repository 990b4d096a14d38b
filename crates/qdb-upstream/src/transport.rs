/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use crate::error::AdapterError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// HTTP transport for the upstream provider.
///
/// Executes a single request attempt and classifies the outcome; it has
/// no retry loop of its own — the fetch coordinator in `qdb-engine`
/// owns retry policy so that backoff can be shared across all callers
/// of a transport, not just this one.
pub struct Transport {
  client: Client,
  base_url: String,
}

impl Transport {
  pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AdapterError> {
    let client = Client::builder()
      .timeout(timeout)
      .user_agent("qdb-upstream/0.1")
      .build()
      .map_err(|e| AdapterError::Unknown(format!("failed to build HTTP client: {e}")))?;

    Ok(Self { client, base_url: base_url.into() })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Execute one GET request against `path` with `params` and decode
  /// the JSON body as `T`. Never retries; callers classify the returned
  /// error and decide whether to retry.
  #[instrument(skip(self, params), fields(path = %path))]
  pub async fn get<T>(&self, path: &str, params: &HashMap<String, String>) -> Result<T, AdapterError>
  where
    T: DeserializeOwned,
  {
    let mut url = self
      .join_path(path)
      .map_err(|e| AdapterError::Unknown(format!("invalid base URL: {e}")))?;

    url.query_pairs_mut().extend_pairs(params);
    debug!("requesting {}", url);

    let response = self.client.get(url).send().await.map_err(classify_transport_error)?;

    let status = response.status();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
      return Err(AdapterError::Unauthorized(format!("upstream returned {status}")));
    }
    if status == reqwest::StatusCode::NOT_FOUND {
      return Err(AdapterError::NotFound);
    }
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
      warn!("upstream returned {}, treating as transient", status);
      return Err(AdapterError::Transient(format!("upstream returned {status}")));
    }
    if !status.is_success() {
      return Err(AdapterError::Unknown(format!("unexpected upstream status {status}")));
    }

    let text = response
      .text()
      .await
      .map_err(|e| AdapterError::Transient(format!("failed to read response body: {e}")))?;

    serde_json::from_str(&text)
      .map_err(|e| AdapterError::Unknown(format!("failed to decode response: {e}; body: {text}")))
  }

  fn join_path(&self, path: &str) -> Result<reqwest::Url, url::ParseError> {
    let base = reqwest::Url::parse(&self.base_url)?;
    base.join(path)
  }
}

fn classify_transport_error(err: reqwest::Error) -> AdapterError {
  if err.is_timeout() || err.is_connect() {
    AdapterError::Transient(format!("transport error: {err}"))
  } else {
    AdapterError::Unknown(format!("transport error: {err}"))
  }
}

impl std::fmt::Debug for Transport {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Transport").field("base_url", &self.base_url).finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_transport_creation() {
    let transport = Transport::new("http://127.0.0.1:8127", Duration::from_secs(10)).unwrap();
    assert_eq!(transport.base_url(), "http://127.0.0.1:8127");
  }

  #[tokio::test]
  async fn test_404_maps_to_not_found() {
    let server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::path("/missing"))
      .respond_with(wiremock::ResponseTemplate::new(404))
      .mount(&server)
      .await;

    let transport = Transport::new(server.uri(), Duration::from_secs(5)).unwrap();
    let result: Result<serde_json::Value, AdapterError> =
      transport.get("/missing", &HashMap::new()).await;
    assert!(matches!(result, Err(AdapterError::NotFound)));
  }

  #[tokio::test]
  async fn test_429_maps_to_transient() {
    let server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::path("/throttled"))
      .respond_with(wiremock::ResponseTemplate::new(429))
      .mount(&server)
      .await;

    let transport = Transport::new(server.uri(), Duration::from_secs(5)).unwrap();
    let result: Result<serde_json::Value, AdapterError> =
      transport.get("/throttled", &HashMap::new()).await;
    assert!(matches!(result, Err(AdapterError::Transient(_))));
  }

  #[tokio::test]
  async fn test_401_maps_to_unauthorized() {
    let server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::path("/secure"))
      .respond_with(wiremock::ResponseTemplate::new(401))
      .mount(&server)
      .await;

    let transport = Transport::new(server.uri(), Duration::from_secs(5)).unwrap();
    let result: Result<serde_json::Value, AdapterError> =
      transport.get("/secure", &HashMap::new()).await;
    assert!(matches!(result, Err(AdapterError::Unauthorized(_))));
  }

  #[tokio::test]
  async fn test_success_decodes_body() {
    let server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::path("/ok"))
      .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": 1})))
      .mount(&server)
      .await;

    let transport = Transport::new(server.uri(), Duration::from_secs(5)).unwrap();
    let result: serde_json::Value = transport.get("/ok", &HashMap::new()).await.unwrap();
    assert_eq!(result["value"], 1);
  }
}
