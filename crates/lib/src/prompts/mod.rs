//! # Prompt Templates
//!
//! The template registry: one fixed instruction per [`ContentType`], each with
//! a `{sector}` and a `{topic}` slot.

pub mod content;

use crate::types::ContentType;
use content::*;
use regex::Regex;
use std::sync::LazyLock;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid placeholder regex"));

/// An immutable prompt with named `{placeholder}` slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    text: &'static str,
}

impl PromptTemplate {
    pub const fn new(text: &'static str) -> Self {
        Self { text }
    }

    /// The raw template text, placeholders included.
    pub fn text(&self) -> &'static str {
        self.text
    }

    /// The distinct placeholder names, in order of first appearance.
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for caps in PLACEHOLDER_RE.captures_iter(self.text) {
            if let Some(name) = caps.get(1).map(|m| m.as_str()) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Substitutes `sector` and `topic` verbatim. The values are not escaped,
    /// so braces inside them are left untouched.
    pub fn fill(&self, sector: &str, topic: &str) -> String {
        PLACEHOLDER_RE
            .replace_all(self.text, |caps: &regex::Captures| match &caps[1] {
                "sector" => sector.to_string(),
                "topic" => topic.to_string(),
                _ => caps[0].to_string(),
            })
            .into_owned()
    }
}

/// Returns the template for a content type. Total over the closed set.
pub fn template_for(content_type: ContentType) -> PromptTemplate {
    match content_type {
        ContentType::PressRelease => PromptTemplate::new(PRESS_RELEASE_TEMPLATE),
        ContentType::GuestColumn => PromptTemplate::new(GUEST_COLUMN_TEMPLATE),
        ContentType::LeadershipArticle => PromptTemplate::new(LEADERSHIP_ARTICLE_TEMPLATE),
        ContentType::BlogPost => PromptTemplate::new(BLOG_POST_TEMPLATE),
        ContentType::SocialMedia => PromptTemplate::new(SOCIAL_MEDIA_TEMPLATE),
    }
}
