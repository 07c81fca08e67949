use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub const PROMPT_REQUIRED: &str = "Prompt is required";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream error: API returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Extraction error: no image URL in upstream response")]
    Extraction { payload: Value },

    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// JSON body returned to the caller for every failed request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
    #[serde(rename = "responseData", skip_serializing_if = "Option::is_none")]
    pub response_data: Option<Value>,
}

impl GatewayError {
    pub fn status(&self) -> u16 {
        match self {
            GatewayError::Validation(_) => 400,
            GatewayError::Upstream { status, .. } if *status >= 500 => 500,
            GatewayError::Upstream { .. } => 400,
            GatewayError::Extraction { .. } => 500,
            GatewayError::PayloadTooLarge { .. } => 413,
            GatewayError::Internal(_) | GatewayError::Config(_) => 500,
        }
    }

    /// Advisory flag for the client; nothing in the gateway retries on its own.
    pub fn retryable(&self) -> Option<bool> {
        match self {
            GatewayError::Upstream { status, .. } => Some(*status >= 500 || *status == 429),
            GatewayError::Internal(_) => Some(true),
            GatewayError::PayloadTooLarge { .. } => Some(false),
            _ => None,
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        match self {
            GatewayError::Validation(msg) => ErrorBody {
                error: msg.clone(),
                details: None,
                retryable: None,
                response_data: None,
            },
            GatewayError::Upstream { status, body } => ErrorBody {
                error: "Failed to generate image".to_string(),
                details: Some(format!("API returned {}: {}", status, body)),
                retryable: self.retryable(),
                response_data: None,
            },
            GatewayError::Extraction { payload } => ErrorBody {
                error: "No image URL in response".to_string(),
                details: Some(
                    "The AI service returned a response but no image URL was found".to_string(),
                ),
                retryable: None,
                response_data: Some(payload.clone()),
            },
            GatewayError::PayloadTooLarge { limit } => ErrorBody {
                error: "Request body too large".to_string(),
                details: Some(format!("Request body exceeds the {} byte limit", limit)),
                retryable: self.retryable(),
                response_data: None,
            },
            GatewayError::Internal(msg) | GatewayError::Config(msg) => ErrorBody {
                error: "Internal server error".to_string(),
                details: Some(msg.clone()),
                retryable: self.retryable(),
                response_data: None,
            },
        }
    }
}

#[cfg(feature = "server")]
impl actix_web::ResponseError for GatewayError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::from_u16(self.status())
            .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code()).json(self.to_body())
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
