//! Custom slide shown in the display-mode rotation

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlideType {
    Image,
    Youtube,
    Text,
}

impl SlideType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlideType::Image => "IMAGE",
            SlideType::Youtube => "YOUTUBE",
            SlideType::Text => "TEXT",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "IMAGE" => Some(SlideType::Image),
            "YOUTUBE" => Some(SlideType::Youtube),
            "TEXT" => Some(SlideType::Text),
            _ => None,
        }
    }
}

pub const MIN_SLIDE_SECONDS: i32 = 3;
pub const MAX_SLIDE_SECONDS: i32 = 600;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomSlide {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub slide_type: SlideType,
    pub title: Option<String>,
    /// Image URL, YouTube video id, or text body depending on `slide_type`.
    pub content: String,
    pub display_seconds: i32,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SlideContent {
    pub slide_type: SlideType,
    pub title: Option<String>,
    pub content: String,
    pub display_seconds: i32,
    pub sort_order: i32,
    pub is_active: bool,
}

impl CustomSlide {
    pub fn new(tenant_id: Uuid, input: SlideContent) -> Result<Self, DomainError> {
        let now = Utc::now();
        let mut slide = Self {
            id: Uuid::new_v4(),
            tenant_id,
            slide_type: input.slide_type,
            title: None,
            content: String::new(),
            display_seconds: 0,
            sort_order: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        slide.apply(input)?;
        Ok(slide)
    }

    pub fn apply(&mut self, input: SlideContent) -> Result<(), DomainError> {
        if !(MIN_SLIDE_SECONDS..=MAX_SLIDE_SECONDS).contains(&input.display_seconds) {
            return Err(DomainError::validation(format!(
                "display_seconds must be between {} and {}",
                MIN_SLIDE_SECONDS, MAX_SLIDE_SECONDS
            )));
        }
        let content = input.content.trim();
        self.content = match input.slide_type {
            SlideType::Image => {
                if !(content.starts_with("https://") || content.starts_with("http://") || content.starts_with('/')) {
                    return Err(DomainError::validation("Image slides need an http(s) or uploaded URL"));
                }
                content.to_string()
            }
            SlideType::Youtube => youtube_video_id(content)
                .ok_or_else(|| DomainError::validation("Not a YouTube URL or video id"))?,
            SlideType::Text => {
                if content.is_empty() {
                    return Err(DomainError::validation("Text slides need content"));
                }
                content.to_string()
            }
        };
        self.slide_type = input.slide_type;
        self.title = input.title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
        self.display_seconds = input.display_seconds;
        self.sort_order = input.sort_order;
        self.is_active = input.is_active;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Extract the 11-character video id from a watch/share/embed/shorts URL,
/// or accept a bare id.
pub fn youtube_video_id(input: &str) -> Option<String> {
    static URL: OnceLock<Regex> = OnceLock::new();
    static BARE: OnceLock<Regex> = OnceLock::new();

    let bare = BARE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("valid regex"));
    if bare.is_match(input) {
        return Some(input.to_string());
    }

    let url = URL.get_or_init(|| {
        Regex::new(
            r"^(?:https?://)?(?:www\.|m\.)?(?:youtube\.com/(?:watch\?(?:[^#]*&)?v=|embed/|shorts/)|youtu\.be/)([A-Za-z0-9_-]{11})(?:[?&#/].*)?$",
        )
        .expect("valid regex")
    });
    url.captures(input)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(slide_type: SlideType, content: &str) -> SlideContent {
        SlideContent {
            slide_type,
            title: Some("  Welcome ".to_string()),
            content: content.to_string(),
            display_seconds: 15,
            sort_order: 0,
            is_active: true,
        }
    }

    #[test]
    fn test_youtube_ids() {
        let id = Some("dQw4w9WgXcQ".to_string());
        assert_eq!(youtube_video_id("dQw4w9WgXcQ"), id);
        assert_eq!(youtube_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), id);
        assert_eq!(youtube_video_id("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ&t=5"), id);
        assert_eq!(youtube_video_id("https://youtu.be/dQw4w9WgXcQ?si=abc"), id);
        assert_eq!(youtube_video_id("https://youtube.com/shorts/dQw4w9WgXcQ"), id);
        assert_eq!(youtube_video_id("https://example.com/watch?v=dQw4w9WgXcQ"), None);
        assert_eq!(youtube_video_id("short"), None);
    }

    #[test]
    fn test_slide_content_rules() {
        let slide = CustomSlide::new(Uuid::nil(), input(SlideType::Youtube, "https://youtu.be/dQw4w9WgXcQ")).unwrap();
        assert_eq!(slide.content, "dQw4w9WgXcQ");
        assert_eq!(slide.title.as_deref(), Some("Welcome"));

        assert!(CustomSlide::new(Uuid::nil(), input(SlideType::Image, "ftp://x/y.png")).is_err());
        assert!(CustomSlide::new(Uuid::nil(), input(SlideType::Image, "/uploads/t/a.png")).is_ok());
        assert!(CustomSlide::new(Uuid::nil(), input(SlideType::Text, "   ")).is_err());
    }

    #[test]
    fn test_display_seconds_bounds() {
        let mut bad = input(SlideType::Text, "Hello");
        bad.display_seconds = 1;
        assert!(CustomSlide::new(Uuid::nil(), bad).is_err());
    }
}
