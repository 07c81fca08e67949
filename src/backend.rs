use crate::{
    config::GatewayConfig,
    error::{GatewayError, Result},
    logger,
    models::{ChatCompletionRequest, UpstreamReply},
};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
};

const CUSTOMER_ID: HeaderName = HeaderName::from_static("customerid");

#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Sends one completion request. Non-2xx statuses come back as a reply, not an error.
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<UpstreamReply>;
}

#[derive(Clone)]
pub struct ChatCompletionsClient {
    client: Client,
    endpoint: String,
    headers: HeaderMap,
}

impl ChatCompletionsClient {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            headers: Self::build_headers(config)?,
        })
    }

    fn build_headers(config: &GatewayConfig) -> Result<HeaderMap> {
        let header = |value: String| {
            HeaderValue::from_str(&value)
                .map_err(|e| GatewayError::Config(format!("Invalid header value: {}", e)))
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            header(format!("Bearer {}", config.api_key.as_deref().unwrap_or_default()))?,
        );
        headers.insert(
            CUSTOMER_ID,
            header(config.customer_id.clone().unwrap_or_default())?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GenerationBackend for ChatCompletionsClient {
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<UpstreamReply> {
        log::info!("Requesting image from {} with model: {}", self.endpoint, request.model);
        let _timer = logger::timer("upstream chat completion");

        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                log::error!("Upstream request to {} failed: {}", self.endpoint, e);
                GatewayError::Internal(format!("Upstream request failed: {}", e))
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| {
                log::error!("Failed to read upstream body: {}", e);
                GatewayError::Internal(format!("Failed to read upstream body: {}", e))
            })?;

        log::debug!("Upstream replied {} ({} bytes)", status, body.len());
        Ok(UpstreamReply { status, body })
    }
}
