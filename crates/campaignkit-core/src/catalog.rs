//! Content-type and platform vocabularies.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Creative format requested by a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Testimonial,
    Demo,
    Slideshow,
    TalkingHead,
    TextOverVideo,
    HookDemo,
    ScreenRecording,
    Voiceover,
    Faceless,
    Custom,
}

impl ContentType {
    /// Every known content type.
    pub const ALL: [Self; 10] = [
        Self::Testimonial,
        Self::Demo,
        Self::Slideshow,
        Self::TalkingHead,
        Self::TextOverVideo,
        Self::HookDemo,
        Self::ScreenRecording,
        Self::Voiceover,
        Self::Faceless,
        Self::Custom,
    ];

    /// Choices offered when building a campaign, in display order.
    pub const WIZARD_CHOICES: [Self; 6] = [
        Self::Testimonial,
        Self::Demo,
        Self::Slideshow,
        Self::TalkingHead,
        Self::Voiceover,
        Self::ScreenRecording,
    ];

    /// Stable identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Testimonial => "testimonial",
            Self::Demo => "demo",
            Self::Slideshow => "slideshow",
            Self::TalkingHead => "talking_head",
            Self::TextOverVideo => "text_over_video",
            Self::HookDemo => "hook_demo",
            Self::ScreenRecording => "screen_recording",
            Self::Voiceover => "voiceover",
            Self::Faceless => "faceless",
            Self::Custom => "custom",
        }
    }

    /// Label shown in the campaign builder.
    #[must_use]
    pub const fn wizard_label(self) -> &'static str {
        match self {
            Self::Demo => "Hook + Demo",
            other => other.card_label(),
        }
    }

    /// Label shown on campaign cards.
    #[must_use]
    pub const fn card_label(self) -> &'static str {
        match self {
            Self::Testimonial => "Testimonial",
            Self::Demo => "Demo",
            Self::Slideshow => "Slideshow",
            Self::TalkingHead => "Talking Head",
            Self::TextOverVideo => "Text Over Video",
            Self::HookDemo => "Hook + Demo",
            Self::ScreenRecording => "Screen Recording",
            Self::Voiceover => "Voiceover",
            Self::Faceless => "Faceless",
            Self::Custom => "Custom",
        }
    }

    /// One-line description for builder choices.
    #[must_use]
    pub const fn description(self) -> Option<&'static str> {
        match self {
            Self::Testimonial => Some("Creator talks about your product"),
            Self::Demo => Some("Problem → Solution format"),
            Self::Slideshow => Some("Image carousel with text"),
            Self::TalkingHead => Some("Direct to camera review"),
            Self::Voiceover => Some("Voice + B-roll footage"),
            Self::ScreenRecording => Some("App/product walkthrough"),
            Self::TextOverVideo | Self::HookDemo | Self::Faceless | Self::Custom => None,
        }
    }

    /// Card label for a raw id, falling back to the id itself.
    #[must_use]
    pub fn card_label_for(id: &str) -> &str {
        id.parse::<Self>().map_or(id, |c| c.card_label())
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ContentType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.id() == needle)
            .ok_or_else(|| CatalogError::UnknownContentType(s.to_string()))
    }
}

/// Distribution channel for campaign content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Tiktok,
    Youtube,
    Instagram,
    Twitter,
}

impl Platform {
    /// Every platform, in display order.
    pub const ALL: [Self; 4] = [Self::Tiktok, Self::Youtube, Self::Instagram, Self::Twitter];

    /// Stable identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Tiktok => "tiktok",
            Self::Youtube => "youtube",
            Self::Instagram => "instagram",
            Self::Twitter => "twitter",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tiktok => "TikTok",
            Self::Youtube => "YouTube Shorts",
            Self::Instagram => "Instagram Reels",
            Self::Twitter => "Twitter/X",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Platform {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.id() == needle)
            .ok_or_else(|| CatalogError::UnknownPlatform(s.to_string()))
    }
}

/// Badge text for a raw platform id: first letter upper-cased.
#[must_use]
pub fn platform_badge(id: &str) -> String {
    let mut chars = id.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
