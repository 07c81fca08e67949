use crate::{
    backend::{ChatCompletionsClient, GenerationBackend},
    config::GatewayConfig,
    error::{GatewayError, Result, PROMPT_REQUIRED},
    extract::extract_image_url,
    models::{
        ChatCompletionRequest, GenerationSettings, ImageGenerationRequest, ImageGenerationResponse,
    },
    prompt,
};
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct Gateway {
    backend: Arc<dyn GenerationBackend>,
    default_model: String,
}

impl Gateway {
    pub fn new(backend: Arc<dyn GenerationBackend>, default_model: impl Into<String>) -> Self {
        Self {
            backend,
            default_model: default_model.into(),
        }
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let client = ChatCompletionsClient::new(config)?;
        Ok(Self::new(Arc::new(client), config.default_model.clone()))
    }

    /// Entry point for raw request bodies. A body that isn't JSON at all is an internal
    /// error; once it parses, the prompt rule is checked before anything else.
    pub async fn generate_from_json(&self, body: &[u8]) -> Result<ImageGenerationResponse> {
        let body: Value = serde_json::from_slice(body).map_err(|e| {
            log::error!("Unreadable request body: {}", e);
            GatewayError::Internal(format!("Invalid request body: {}", e))
        })?;
        self.generate(ImageGenerationRequest::from_json(&body)).await
    }

    pub async fn generate(&self, request: ImageGenerationRequest) -> Result<ImageGenerationResponse> {
        let original_prompt = match request.prompt_text() {
            Some(p) => p.to_string(),
            None => {
                log::warn!("Rejected request without a prompt");
                return Err(GatewayError::Validation(PROMPT_REQUIRED.to_string()));
            }
        };

        let settings = request.settings(&self.default_model);
        let enhanced = prompt::compose(
            &original_prompt,
            GenerationSettings::key(&settings.style),
            GenerationSettings::key(&settings.aspect_ratio),
            GenerationSettings::key(&settings.quality),
        );
        log::debug!("Enhanced prompt: {}", enhanced);

        let upstream_request =
            ChatCompletionRequest::single_user_message(settings.model.clone(), &enhanced);
        let reply = self.backend.complete(&upstream_request).await?;

        if !reply.is_success() {
            log::error!("AI API Error: {} {}", reply.status, reply.body);
            return Err(GatewayError::Upstream {
                status: reply.status,
                body: reply.body,
            });
        }

        let payload: Value = serde_json::from_str(&reply.body).map_err(|e| {
            log::error!("Upstream returned invalid JSON: {} {}", e, reply.body);
            GatewayError::Internal(format!("Upstream returned invalid JSON: {}", e))
        })?;

        let image_url = match extract_image_url(&payload) {
            Some(url) => url,
            None => {
                log::error!("No image URL found in response: {}", payload);
                return Err(GatewayError::Extraction { payload });
            }
        };

        log::info!("Image generated with model {}: {}", settings.model, image_url);

        Ok(ImageGenerationResponse {
            success: true,
            image_url,
            prompt: enhanced,
            original_prompt,
            settings,
            timestamp: chrono::Utc::now().timestamp_millis(),
        })
    }
}
