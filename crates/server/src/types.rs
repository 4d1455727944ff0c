use crate::session::{Notice, Session, SessionState};
use contentgen::{ContentType, GeneratedContent};
use serde::{Deserialize, Serialize};

/// The generation form, posted as `application/x-www-form-urlencoded` or JSON.
#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    /// A label (`Blog Post`) or file stem (`blog_post`). Defaults to Press Release.
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub sector: String,
    #[serde(default)]
    pub topic: String,
}

#[derive(Debug, Deserialize)]
pub struct CredentialForm {
    #[serde(default)]
    pub api_key: String,
}

#[derive(Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub result: T,
}

/// A snapshot of one session, as reported by `GET /api/session`.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub state: SessionState,
    pub generating: bool,
    pub content_type: ContentType,
    pub sector: String,
    pub topic: String,
    pub result: Option<GeneratedContent>,
    pub download_available: bool,
    pub has_session_key: bool,
    pub notice: Option<Notice>,
}

impl SessionView {
    pub fn from_session(session: &Session) -> Self {
        Self {
            state: session.state(),
            generating: session.state() == SessionState::Generating,
            content_type: session.content_type(),
            sector: session.sector().to_string(),
            topic: session.topic().to_string(),
            result: session.result().cloned(),
            download_available: session.result().is_some(),
            has_session_key: session.credential().is_some(),
            notice: session.notice().cloned(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContentTypeInfo {
    pub label: &'static str,
    pub value: String,
    pub file_name: String,
}

impl From<ContentType> for ContentTypeInfo {
    fn from(content_type: ContentType) -> Self {
        Self {
            label: content_type.label(),
            value: content_type.file_stem(),
            file_name: content_type.pdf_file_name(),
        }
    }
}
