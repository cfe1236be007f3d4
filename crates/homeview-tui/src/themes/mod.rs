//! Built-in color themes

mod dracula;
mod nord;

use crate::theme::Theme;

/// Load a theme by name, falling back to Gruvbox Dark
pub fn load_theme(name: &str) -> Theme {
    match name.to_lowercase().as_str() {
        "nord" => nord::default(),
        "dracula" => dracula::default(),
        "gruvbox-dark" | "gruvbox" => Theme::default(),
        other => {
            tracing::warn!("Unknown theme '{}', using gruvbox-dark", other);
            Theme::default()
        }
    }
}

/// Get list of available theme names
pub fn available_themes() -> Vec<&'static str> {
    vec!["gruvbox-dark", "nord", "dracula"]
}
