use nearstay_core::{Credentials, NearstayError, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_QUERY_CONTEXT: &str = "default:`travel-sample`.`inventory`";
pub const DEFAULT_QUERY_TIMEOUT_MS: u64 = 10_000;

/// Configuration for reaching the Couchbase Data API query service.
#[derive(Debug, Clone)]
pub struct DataApiConfig {
    pub base_url: String,
    pub credentials: Credentials,
    pub query_context: String,
    pub query_timeout: Duration,
}

impl DataApiConfig {
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self> {
        let parsed = url::Url::parse(base_url)
            .map_err(|e| NearstayError::Config(format!("invalid Data API URL {base_url:?}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(NearstayError::Config(format!(
                "Data API URL must be http or https, got {}",
                parsed.scheme()
            )));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            query_context: DEFAULT_QUERY_CONTEXT.to_string(),
            query_timeout: Duration::from_millis(DEFAULT_QUERY_TIMEOUT_MS),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| NearstayError::Config(format!("{key} is not set")))
        };

        let credentials = Credentials::new(
            required("DATA_API_USERNAME")?,
            required("DATA_API_PASSWORD")?,
        );
        let mut config = Self::new(&required("DATA_API_URL")?, credentials)?;

        if let Some(context) = lookup("DATA_API_QUERY_CONTEXT").filter(|v| !v.is_empty()) {
            config.query_context = context;
        }
        if let Some(raw) = lookup("DATA_API_TIMEOUT_MS") {
            let ms: u64 = raw.parse().map_err(|_| {
                NearstayError::Config(format!("DATA_API_TIMEOUT_MS is not a number: {raw}"))
            })?;
            config.query_timeout = Duration::from_millis(ms);
        }

        Ok(config)
    }

    pub fn with_query_context(mut self, query_context: impl Into<String>) -> Self {
        self.query_context = query_context.into();
        self
    }

    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }

    /// Server-side timeout in the duration syntax the query service accepts.
    pub fn timeout_param(&self) -> String {
        format!("{}ms", self.query_timeout.as_millis())
    }
}
