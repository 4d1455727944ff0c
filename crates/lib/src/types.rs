use crate::errors::{GenerationError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of documents the tool can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContentType {
    #[default]
    #[serde(rename = "Press Release")]
    PressRelease,
    #[serde(rename = "Guest Column")]
    GuestColumn,
    #[serde(rename = "Leadership Article")]
    LeadershipArticle,
    #[serde(rename = "Blog Post")]
    BlogPost,
    #[serde(rename = "Social Media")]
    SocialMedia,
}

impl ContentType {
    /// All content types, in selector order.
    pub const ALL: [ContentType; 5] = [
        ContentType::PressRelease,
        ContentType::GuestColumn,
        ContentType::LeadershipArticle,
        ContentType::BlogPost,
        ContentType::SocialMedia,
    ];

    /// The human-readable label shown in the selector.
    pub fn label(self) -> &'static str {
        match self {
            ContentType::PressRelease => "Press Release",
            ContentType::GuestColumn => "Guest Column",
            ContentType::LeadershipArticle => "Leadership Article",
            ContentType::BlogPost => "Blog Post",
            ContentType::SocialMedia => "Social Media",
        }
    }

    /// The label lower-cased with spaces replaced by underscores, e.g. `blog_post`.
    pub fn file_stem(self) -> String {
        self.label().to_lowercase().replace(' ', "_")
    }

    /// The download name for a rendered document of this type.
    pub fn pdf_file_name(self) -> String {
        format!("{}.pdf", self.file_stem())
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a string names no known content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownContentType(pub String);

impl fmt::Display for UnknownContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown content type: '{}'", self.0)
    }
}

impl std::error::Error for UnknownContentType {}

impl FromStr for ContentType {
    type Err = UnknownContentType;

    /// Accepts either the display label or the file stem.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentType::ALL
            .into_iter()
            .find(|ct| ct.label() == s || ct.file_stem() == s)
            .ok_or_else(|| UnknownContentType(s.to_string()))
    }
}

/// A validated request for one piece of content.
///
/// Only [`GenerationRequest::new`] builds one, so `sector` and `topic` are
/// always trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    content_type: ContentType,
    sector: String,
    topic: String,
}

impl GenerationRequest {
    pub fn new(
        content_type: ContentType,
        sector: &str,
        topic: &str,
    ) -> Result<Self, ValidationError> {
        let sector = sector.trim();
        let topic = topic.trim();
        if sector.is_empty() {
            return Err(ValidationError::MissingSector);
        }
        if topic.is_empty() {
            return Err(ValidationError::MissingTopic);
        }
        Ok(Self {
            content_type,
            sector: sector.to_string(),
            topic: topic.to_string(),
        })
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn sector(&self) -> &str {
        &self.sector
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }
}

/// Successfully generated text. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub content_type: ContentType,
    pub text: String,
}

/// The outcome of one generation attempt.
pub type GenerationResult = Result<GeneratedContent, GenerationError>;

/// The parameters of a single completion call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

/// Connection settings for the completion provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model_name")]
    pub model_name: String,
    /// Optional cap on completion length; `None` leaves it to the provider.
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    crate::constants::DEFAULT_API_URL.to_string()
}

fn default_model_name() -> String {
    crate::constants::DEFAULT_MODEL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    crate::constants::DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model_name: default_model_name(),
            max_tokens: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
