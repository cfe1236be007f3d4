use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// A single news card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headline {
    pub title: String,
    /// Plain text, HTML already stripped
    pub description: String,
    pub source: String,
    pub link: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Headline {
    pub fn new(title: impl Into<String>, description: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            source: source.into(),
            link: None,
            published_at: None,
        }
    }

    /// Publication time as local `HH:MM`, empty when unknown
    pub fn time_label(&self) -> String {
        self.published_at
            .map(|dt| dt.with_timezone(&Local).format("%H:%M").to_string())
            .unwrap_or_default()
    }

    /// First `max_chars` characters of the description
    pub fn description_preview(&self, max_chars: usize) -> String {
        if max_chars == 0 {
            return String::new();
        }
        let mut chars = self.description.chars();
        let preview: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{}...", preview)
        } else {
            preview
        }
    }
}

/// Headlines shown when the feed cannot be reached
pub fn fallback_headlines() -> Vec<Headline> {
    vec![
        Headline::new(
            "Tech News: minimalist designs are trending",
            "Designers are focusing on clean lines and negative space.",
            "Design Weekly",
        ),
        Headline::new(
            "Weather Update: Sunny week ahead",
            "Expect clear skies for the next 7 days.",
            "Weather Daily",
        ),
        Headline::new(
            "Stock Market hits record highs",
            "Global markets are rallying today.",
            "Finance Now",
        ),
    ]
}
