use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_ASPECT_RATIO: &str = "square";
pub const DEFAULT_QUALITY: &str = "standard";

/// Incoming body of `POST /api/generate`.
///
/// Fields are kept as raw JSON: options of an unexpected type are treated as unknown keys
/// and echoed back untouched. Absent and `null` fields are both unset.
#[derive(Debug, Clone, Default)]
pub struct ImageGenerationRequest {
    pub prompt: Option<Value>,
    pub style: Option<Value>,
    pub aspect_ratio: Option<Value>,
    pub quality: Option<Value>,
    pub model: Option<Value>,
}

fn field(body: &Value, name: &str) -> Option<Value> {
    body.get(name).filter(|v| !v.is_null()).cloned()
}

impl ImageGenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(Value::String(prompt.into())),
            ..Default::default()
        }
    }

    /// Reads the known fields from a JSON body. Anything that isn't an object has no fields.
    pub fn from_json(body: &Value) -> Self {
        Self {
            prompt: field(body, "prompt"),
            style: field(body, "style"),
            aspect_ratio: field(body, "aspectRatio"),
            quality: field(body, "quality"),
            model: field(body, "model"),
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(Value::String(style.into()));
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: impl Into<String>) -> Self {
        self.aspect_ratio = Some(Value::String(aspect_ratio.into()));
        self
    }

    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = Some(Value::String(quality.into()));
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(Value::String(model.into()));
        self
    }

    /// The prompt text, if it is a string with something besides whitespace in it.
    pub fn prompt_text(&self) -> Option<&str> {
        self.prompt
            .as_ref()
            .and_then(Value::as_str)
            .filter(|p| !p.trim().is_empty())
    }

    /// Fills in the defaults for every option that was not supplied.
    pub fn settings(&self, default_model: &str) -> GenerationSettings {
        let or = |value: &Option<Value>, default: &str| {
            value
                .clone()
                .unwrap_or_else(|| Value::String(default.to_string()))
        };
        GenerationSettings {
            style: or(&self.style, ""),
            aspect_ratio: or(&self.aspect_ratio, DEFAULT_ASPECT_RATIO),
            quality: or(&self.quality, DEFAULT_QUALITY),
            model: or(&self.model, default_model),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSettings {
    pub style: Value,
    pub aspect_ratio: Value,
    pub quality: Value,
    pub model: Value,
}

impl GenerationSettings {
    /// Option text used for modifier lookups; non-string values match no key.
    pub fn key(value: &Value) -> &str {
        value.as_str().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGenerationResponse {
    pub success: bool,
    pub image_url: String,
    pub prompt: String,
    pub original_prompt: String,
    pub settings: GenerationSettings,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}
