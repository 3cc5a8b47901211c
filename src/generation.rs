//! Request and response model of the generation service.
//!
//! Field names follow the service's camelCase JSON. Responses are decoded
//! strictly: a missing required field fails the whole decode rather than
//! producing a half-filled result.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::i18n::SelectedLanguages;

/// Kind of content to generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    #[default]
    Email,
    Newsletter,
    Article,
    SocialPost,
}

impl ContentType {
    pub fn all() -> [ContentType; 4] {
        [
            ContentType::Email,
            ContentType::Newsletter,
            ContentType::Article,
            ContentType::SocialPost,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Email => "email",
            ContentType::Newsletter => "newsletter",
            ContentType::Article => "article",
            ContentType::SocialPost => "social-post",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ContentType::Email => "Email",
            ContentType::Newsletter => "Newsletter",
            ContentType::Article => "Article",
            ContentType::SocialPost => "Social Post",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Friendly,
    Formal,
}

impl Tone {
    pub fn all() -> [Tone; 4] {
        [Tone::Professional, Tone::Casual, Tone::Friendly, Tone::Formal]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Casual => "casual",
            Tone::Friendly => "friendly",
            Tone::Formal => "formal",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Length {
    Short,
    #[default]
    Medium,
    Long,
}

impl Length {
    pub fn all() -> [Length; 3] {
        [Length::Short, Length::Medium, Length::Long]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Length::Short => "short",
            Length::Medium => "medium",
            Length::Long => "long",
        }
    }

    /// Word range the service aims for, as shown in pickers.
    pub fn word_range(&self) -> &'static str {
        match self {
            Length::Short => "150-300 words",
            Length::Medium => "300-600 words",
            Length::Long => "600-1200 words",
        }
    }
}

macro_rules! impl_wire_str {
    ($ty:ident, $label:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> Result<Self> {
                let wanted = s.trim().to_lowercase();
                match $ty::all().into_iter().find(|v| v.as_str() == wanted) {
                    Some(value) => Ok(value),
                    None => {
                        let options: Vec<_> = $ty::all().iter().map(|v| v.as_str()).collect();
                        bail!(
                            "Unknown {} '{}' (expected one of: {})",
                            $label,
                            s,
                            options.join(", ")
                        )
                    }
                }
            }
        }
    };
}

impl_wire_str!(ContentType, "content type");
impl_wire_str!(Tone, "tone");
impl_wire_str!(Length, "length");

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub prompt: String,
    pub content_type: ContentType,
    pub target_languages: SelectedLanguages,
    pub tone: Tone,
    pub length: Length,
}

/// Best-effort statistics attached to a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetadata {
    pub word_count: u64,
    pub character_count: u64,
    /// Minutes
    #[serde(rename = "estimatedReadingTime")]
    pub estimated_reading_time_minutes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    /// Language code; may be absent from the catalog
    pub language: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ContentMetadata>,
}

/// Successful reply of `POST /api/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    pub original_content: GeneratedContent,
    pub translations: Vec<GeneratedContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens_used: Option<u64>,
    #[serde(rename = "processingTime")]
    pub processing_time_ms: u64,
}

impl GenerationResponse {
    /// Token throughput, rounded to the nearest integer.
    ///
    /// `None` when the service did not report token usage or reported a zero
    /// processing time.
    pub fn tokens_per_second(&self) -> Option<u64> {
        let tokens = self.total_tokens_used?;
        if self.processing_time_ms == 0 {
            return None;
        }
        let seconds = self.processing_time_ms as f64 / 1000.0;
        Some((tokens as f64 / seconds).round() as u64)
    }
}

/// Error body sent by the service with non-2xx replies.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

/// Reply of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response_json() -> serde_json::Value {
        serde_json::json!({
            "originalContent": {
                "language": "en",
                "content": "Welcome aboard!",
                "metadata": {
                    "wordCount": 2,
                    "characterCount": 15,
                    "estimatedReadingTime": 1
                }
            },
            "translations": [
                {
                    "language": "es",
                    "content": "¡Bienvenido a bordo!"
                }
            ],
            "totalTokensUsed": 1200,
            "processingTime": 800
        })
    }

    // ==================== Enum Tests ====================

    #[test]
    fn test_defaults() {
        assert_eq!(ContentType::default(), ContentType::Email);
        assert_eq!(Tone::default(), Tone::Professional);
        assert_eq!(Length::default(), Length::Medium);
    }

    #[test]
    fn test_content_type_wire_values() {
        let json = serde_json::to_string(&ContentType::all()).expect("Should serialize");
        assert_eq!(json, r#"["email","newsletter","article","social-post"]"#);
    }

    #[test]
    fn test_from_str_accepts_wire_values() {
        assert_eq!("social-post".parse::<ContentType>().unwrap(), ContentType::SocialPost);
        assert_eq!("Casual".parse::<Tone>().unwrap(), Tone::Casual);
        assert_eq!(" long ".parse::<Length>().unwrap(), Length::Long);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "tweet".parse::<ContentType>().unwrap_err().to_string();
        assert!(err.contains("Unknown content type 'tweet'"));
        assert!(err.contains("social-post"));
    }

    #[test]
    fn test_display_matches_wire_value() {
        for tone in Tone::all() {
            let json = serde_json::to_value(tone).unwrap();
            assert_eq!(json, tone.to_string());
        }
    }

    // ==================== Request Tests ====================

    #[test]
    fn test_request_serialization() {
        let request = GenerationRequest {
            prompt: "hello".to_string(),
            content_type: ContentType::Email,
            target_languages: SelectedLanguages::from_iter(["es"]),
            tone: Tone::Professional,
            length: Length::Medium,
        };

        let json = serde_json::to_value(&request).expect("Should serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "prompt": "hello",
                "contentType": "email",
                "targetLanguages": ["es"],
                "tone": "professional",
                "length": "medium"
            })
        );
    }

    // ==================== Response Tests ====================

    #[test]
    fn test_response_deserialization() {
        let response: GenerationResponse =
            serde_json::from_value(sample_response_json()).expect("Should deserialize");

        assert_eq!(response.original_content.language, "en");
        let metadata = response.original_content.metadata.expect("Has metadata");
        assert_eq!(metadata.word_count, 2);
        assert_eq!(metadata.estimated_reading_time_minutes, 1);
        assert_eq!(response.translations.len(), 1);
        assert!(response.translations[0].metadata.is_none());
        assert_eq!(response.total_tokens_used, Some(1200));
        assert_eq!(response.processing_time_ms, 800);
    }

    #[test]
    fn test_response_without_token_count() {
        let mut json = sample_response_json();
        json.as_object_mut().unwrap().remove("totalTokensUsed");

        let response: GenerationResponse = serde_json::from_value(json).expect("Should deserialize");
        assert!(response.total_tokens_used.is_none());
        assert!(response.tokens_per_second().is_none());
    }

    #[test]
    fn test_response_missing_required_field_is_rejected() {
        let mut json = sample_response_json();
        json.as_object_mut().unwrap().remove("processingTime");

        assert!(serde_json::from_value::<GenerationResponse>(json).is_err());
    }

    #[test]
    fn test_response_wrong_type_is_rejected() {
        let mut json = sample_response_json();
        json["translations"] = serde_json::json!("not a list");

        assert!(serde_json::from_value::<GenerationResponse>(json).is_err());
    }

    #[test]
    fn test_tokens_per_second() {
        let response: GenerationResponse =
            serde_json::from_value(sample_response_json()).expect("Should deserialize");
        // 1200 tokens / 0.8s
        assert_eq!(response.tokens_per_second(), Some(1500));
    }

    #[test]
    fn test_tokens_per_second_zero_time() {
        let mut response: GenerationResponse =
            serde_json::from_value(sample_response_json()).expect("Should deserialize");
        response.processing_time_ms = 0;
        assert!(response.tokens_per_second().is_none());
    }

    // ==================== Error Body Tests ====================

    #[test]
    fn test_error_body_with_detail() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail": "Prompt is required"}"#).expect("Should deserialize");
        assert_eq!(body.detail.as_deref(), Some("Prompt is required"));
    }

    #[test]
    fn test_error_body_without_detail() {
        let body: ErrorBody = serde_json::from_str(r#"{"error": "x"}"#).expect("Should deserialize");
        assert!(body.detail.is_none());
    }
}
