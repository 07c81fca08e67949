use crate::error::{GatewayError, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://oi-server.onrender.com/chat/completions";
pub const DEFAULT_MODEL: &str = "replicate/black-forest-labs/flux-1.1-pro";
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub customer_id: Option<String>,
    pub default_model: String,
    pub host: String,
    pub port: u16,
    pub request_timeout: Option<Duration>,
    pub max_body_bytes: usize,
    pub json_logs: bool,
    pub log_file: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            customer_id: None,
            default_model: DEFAULT_MODEL.to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            json_logs: false,
            log_file: None,
        }
    }
}

impl GatewayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup, so tests don't have to touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        GatewayConfig {
            endpoint: non_empty("PIXELGATE_ENDPOINT").unwrap_or(defaults.endpoint),
            api_key: non_empty("PIXELGATE_API_KEY"),
            customer_id: non_empty("PIXELGATE_CUSTOMER_ID"),
            default_model: non_empty("PIXELGATE_DEFAULT_MODEL").unwrap_or(defaults.default_model),
            host: non_empty("HOST").unwrap_or(defaults.host),
            port: non_empty("PORT")
                .and_then(|port| port.parse().ok())
                .unwrap_or(defaults.port),
            request_timeout: non_empty("PIXELGATE_REQUEST_TIMEOUT_SECS")
                .and_then(|secs| secs.parse().ok())
                .map(Duration::from_secs),
            max_body_bytes: non_empty("PIXELGATE_MAX_BODY_BYTES")
                .and_then(|bytes| bytes.parse().ok())
                .unwrap_or(defaults.max_body_bytes),
            json_logs: non_empty("PIXELGATE_LOG_FORMAT").map_or(false, |val| val == "json"),
            log_file: non_empty("PIXELGATE_LOG_FILE"),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_credentials(
        mut self,
        api_key: impl Into<String>,
        customer_id: impl Into<String>,
    ) -> Self {
        self.api_key = Some(api_key.into());
        self.customer_id = Some(customer_id.into());
        self
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_none() {
            return Err(GatewayError::Config(
                "PIXELGATE_API_KEY is required".into(),
            ));
        }
        if self.customer_id.is_none() {
            return Err(GatewayError::Config(
                "PIXELGATE_CUSTOMER_ID is required".into(),
            ));
        }
        if !self.endpoint.starts_with("http") {
            return Err(GatewayError::Config(format!(
                "Endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
