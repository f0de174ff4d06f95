use crate::engine::assets::lookup::LookupError;
use crate::interaction::waypoint::HillKey;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Text card shown over the scene. Only `title` is required; the rest depends
/// on where the card is displayed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentCard {
    pub title: String,
    #[serde(default)]
    pub paragraphs: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub button_text: Option<String>,
    #[serde(default)]
    pub button_action: Option<String>,
    #[serde(default)]
    pub link_text: Option<String>,
    #[serde(default)]
    pub link_url: Option<String>,
}

impl ContentCard {
    /// Body text: the description if present, otherwise the paragraphs joined
    /// by blank lines.
    pub fn body_text(&self) -> String {
        match &self.description {
            Some(description) => description.clone(),
            None => self.paragraphs.join("\n\n"),
        }
    }
}

/// `info.content.json`: hill cards keyed by waypoint key. The file's `cards`
/// section belongs to the home page and is skipped.
#[derive(Asset, TypePath, Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct InfoContent {
    #[serde(default)]
    pub hills: HashMap<String, ContentCard>,
}

impl InfoContent {
    pub fn hill_card(&self, hill: HillKey) -> Result<&ContentCard, LookupError> {
        self.hills
            .get(hill.waypoint_key())
            .ok_or_else(|| LookupError::ContentCard {
                section: "hills",
                key: hill.waypoint_key().to_string(),
            })
    }

    /// Hill card from the content file, or the built-in text when the file is
    /// missing or has no entry.
    pub fn hill_card_or_builtin(content: Option<&Self>, hill: HillKey) -> ContentCard {
        content
            .and_then(|content| content.hill_card(hill).ok())
            .cloned()
            .unwrap_or_else(|| builtin_hill_card(hill))
    }
}

pub fn builtin_hill_card(hill: HillKey) -> ContentCard {
    let (title, description) = match hill {
        HillKey::Hill1 => (
            "Hill 1",
            "This is the first hill showcasing foundational concepts and core technologies. \
             Explore the basics of web development and architecture.",
        ),
        HillKey::Hill2 => (
            "Hill 2",
            "The second hill features advanced techniques and patterns. \
             Discover optimization strategies and best practices in modern development.",
        ),
        HillKey::Hill3 => (
            "Hill 3",
            "The final hill presents cutting-edge technologies and innovations. \
             Experience the latest advancements in web development and 3D graphics.",
        ),
    };

    ContentCard {
        title: title.to_string(),
        description: Some(description.to_string()),
        ..default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str = r#"{
        "cards": {
            "1": { "title": "Get in Touch", "paragraphs": ["Say hi.", "Or don't."], "buttonText": "Contact Me" },
            "3": { "title": "Hi there", "paragraphs": ["Intro"], "buttonAction": "navigate:/cloud-station" }
        },
        "hills": {
            "hill2": { "title": "Second", "description": "Patterns", "linkText": "Read", "linkUrl": "https://example.org" }
        }
    }"#;

    fn content() -> InfoContent {
        serde_json::from_str(CONTENT).unwrap()
    }

    #[test]
    fn missing_hill_card_reports_section_and_key() {
        assert_eq!(
            content().hill_card(HillKey::Hill1),
            Err(LookupError::ContentCard {
                section: "hills",
                key: "hill1".to_string()
            })
        );
    }

    #[test]
    fn hill_cards_fall_back_to_builtin_text() {
        let content = content();
        let card = InfoContent::hill_card_or_builtin(Some(&content), HillKey::Hill2);
        assert_eq!(card.title, "Second");
        assert_eq!(card.link_url.as_deref(), Some("https://example.org"));

        let fallback = InfoContent::hill_card_or_builtin(Some(&content), HillKey::Hill3);
        assert_eq!(fallback.title, "Hill 3");
        assert!(fallback.body_text().starts_with("The final hill"));

        let without_file = InfoContent::hill_card_or_builtin(None, HillKey::Hill1);
        assert_eq!(without_file.title, "Hill 1");
    }

    #[test]
    fn paragraphs_are_used_without_a_description() {
        let card = ContentCard {
            title: "Get in Touch".to_string(),
            paragraphs: vec!["Say hi.".to_string(), "Or don't.".to_string()],
            ..default()
        };
        assert_eq!(card.body_text(), "Say hi.\n\nOr don't.");
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let content: InfoContent = serde_json::from_str("{}").unwrap();
        assert!(content.hills.is_empty());
        assert!(content.hill_card(HillKey::Hill1).is_err());
    }
}
