// Mutuals - platform/http.rs
//
// reqwest-backed `Transport` for the GitHub REST API.
//
// GitHub reports errors as JSON bodies (`{"message": "Not Found", ...}`)
// with a 4xx status, so the body is decoded regardless of status and the
// message is left for `core::fetch::decode_body` to surface verbatim. Only
// a non-JSON body on an error status becomes `FetchError::Status`.

use crate::core::fetch::Transport;
use crate::util::constants;
use crate::util::error::FetchError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// HTTP transport rooted at an API base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a client for `base_url` (trailing slash optional).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(constants::API_ACCEPT_HEADER));

        // GitHub rejects requests without a User-Agent.
        let client = Client::builder()
            .user_agent(format!("mutuals/{}", constants::APP_VERSION))
            .default_headers(headers)
            .timeout(timeout)
            .pool_max_idle_per_host(8)
            .build()
            .map_err(|e| FetchError::Network {
                url: base_url.to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, path: &str) -> Result<Value, FetchError> {
        let url = self.url_for(path);
        tracing::debug!(url = %url, "GET");

        let network = |e: reqwest::Error| FetchError::Network {
            url: url.clone(),
            source: Box::new(e),
        };

        let response = self.client.get(&url).send().await.map_err(network)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(network)?;

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(body) => {
                if !status.is_success() {
                    tracing::debug!(url = %url, status = status.as_u16(), "API error status");
                }
                Ok(body)
            }
            Err(_) if !status.is_success() => Err(FetchError::Status {
                url,
                status: status.as_u16(),
            }),
            Err(source) => Err(FetchError::Decode { url, source }),
        }
    }
}
