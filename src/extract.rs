//! Image URL extraction from the upstream payload.
//!
//! Upstream services disagree on where the URL lives, so each known shape gets its own
//! rule. Rules run in order and the first hit wins.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

pub type Extractor = fn(&Value) -> Option<String>;

static IMAGE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)https?://[^\s]+\.(?:jpg|jpeg|png|gif|webp)").expect("valid image url regex")
});

pub const EXTRACTORS: &[(&str, Extractor)] = &[
    ("content_regex", from_content_regex),
    ("content_verbatim", from_content_verbatim),
    ("url_field", from_url_field),
    ("image_url_field", from_image_url_field),
    ("bare_string", from_bare_string),
];

fn first_choice_content(payload: &Value) -> Option<&str> {
    payload
        .get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
}

pub fn from_content_regex(payload: &Value) -> Option<String> {
    let content = first_choice_content(payload)?;
    IMAGE_URL.find(content).map(|m| m.as_str().to_string())
}

/// Content must begin with `http` as sent; leading whitespace is not skipped.
pub fn from_content_verbatim(payload: &Value) -> Option<String> {
    let content = first_choice_content(payload)?;
    content
        .starts_with("http")
        .then(|| content.trim().to_string())
}

fn non_empty_str_field(payload: &Value, field: &str) -> Option<String> {
    payload
        .get(field)?
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub fn from_url_field(payload: &Value) -> Option<String> {
    non_empty_str_field(payload, "url")
}

pub fn from_image_url_field(payload: &Value) -> Option<String> {
    non_empty_str_field(payload, "image_url")
}

pub fn from_bare_string(payload: &Value) -> Option<String> {
    payload
        .as_str()
        .filter(|s| s.starts_with("http"))
        .map(str::to_string)
}

pub fn extract_image_url(payload: &Value) -> Option<String> {
    EXTRACTORS.iter().find_map(|(name, extract)| {
        let url = extract(payload)?;
        log::debug!("Image URL found by rule '{}'", name);
        Some(url)
    })
}
