use nearstay_core::{NearstayError, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

use crate::config::DataApiConfig;
use crate::request::HttpRequest;

/// Headroom over the server-side query timeout before the HTTP call is abandoned.
const TRANSPORT_TIMEOUT_SLACK: Duration = Duration::from_secs(5);

/// HTTP client for the Couchbase Data API.
///
/// Dispatches exactly one call per request and never retries.
#[derive(Clone)]
pub struct DataApiClient {
    http: Client,
    base_url: String,
}

impl DataApiClient {
    pub fn new(config: &DataApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.query_timeout + TRANSPORT_TIMEOUT_SLACK)
            .build()
            .map_err(|e| NearstayError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Send a built request and return the raw body, still undecoded.
    pub async fn send(&self, request: &HttpRequest) -> Result<Value> {
        let url = format!("{}{}", self.base_url, request.path);

        debug!(
            "Executing Data API statement ({} args): {}",
            request.body.args.len(),
            request.body.statement
        );

        let mut builder = self.http.request(request.method.clone(), &url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let resp = builder
            .json(&request.body)
            .send()
            .await
            .map_err(|e| {
                error!("Data API request to {} failed: {}", url, e);
                NearstayError::Upstream(e.to_string())
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body_text = resp.text().await.unwrap_or_default();
            error!("Data API query failed ({}): {}", status, body_text);
            return Err(NearstayError::UpstreamStatus {
                status: status.as_u16(),
                body: body_text,
            });
        }

        let body_text = resp
            .text()
            .await
            .map_err(|e| NearstayError::Upstream(e.to_string()))?;
        debug!("Data API query succeeded: {} ({} bytes)", status, body_text.len());
        Ok(Value::String(body_text))
    }
}
