use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::carousel::PanelSpec;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub interaction: InteractionConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub news: NewsConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (notes, log file)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// A single entry of the rotation, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Panel identifier: "weather", "news", "calendar" or "notes"
    pub id: String,
    /// How long the panel stays visible before auto-advancing
    #[serde(default = "default_panel_duration")]
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Master switch for automatic rotation at startup
    #[serde(default = "default_true")]
    pub auto_rotate: bool,
    /// Quiet period after the last scroll sample before the index settles
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Panels in rotation order
    #[serde(default = "default_panels")]
    pub panels: Vec<PanelConfig>,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            auto_rotate: default_true(),
            debounce_ms: default_debounce_ms(),
            panels: default_panels(),
        }
    }
}

impl CarouselConfig {
    /// Panel specs handed to the rotation scheduler
    pub fn panel_specs(&self) -> Vec<PanelSpec> {
        self.panels
            .iter()
            .map(|p| PanelSpec::new(p.id.clone(), p.duration_ms))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// Inactivity period after which rotation resumes
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_ms: u64,
    /// Press duration that toggles auto-rotation
    #[serde(default = "default_long_press")]
    pub long_press_ms: u64,
    /// How long the feedback toast stays on screen
    #[serde(default = "default_feedback_ms")]
    pub feedback_ms: u64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_ms: default_idle_timeout(),
            long_press_ms: default_long_press(),
            feedback_ms: default_feedback_ms(),
        }
    }
}

/// Geometry and easing of the liquid pagination indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Marker diameter in layout units
    #[serde(default = "default_marker_diameter")]
    pub marker_diameter: f64,
    /// Gap between markers in layout units
    #[serde(default = "default_marker_gap")]
    pub marker_gap: f64,
    /// Pill width at rest, as a multiple of the marker diameter
    #[serde(default = "default_pill_width_ratio")]
    pub pill_width_ratio: f64,
    /// Maximum markers shown before switching to windowed mode
    #[serde(default = "default_visible_budget")]
    pub visible_budget: usize,
    /// Weight of the cubic curve against linear progress for the pill edges
    #[serde(default = "default_ease_blend")]
    pub ease_blend: f64,
    /// Extra scale applied to the marker under the pill
    #[serde(default = "default_neighbor_scale_boost")]
    pub neighbor_scale_boost: f64,
    /// Opacity of markers away from the pill
    #[serde(default = "default_rest_opacity")]
    pub rest_opacity: f64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            marker_diameter: default_marker_diameter(),
            marker_gap: default_marker_gap(),
            pill_width_ratio: default_pill_width_ratio(),
            visible_budget: default_visible_budget(),
            ease_blend: default_ease_blend(),
            neighbor_scale_boost: default_neighbor_scale_boost(),
            rest_opacity: default_rest_opacity(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Clock refresh period in milliseconds
    #[serde(default = "default_clock_tick")]
    pub clock_tick_ms: u64,
    /// Color theme: "gruvbox-dark", "nord" or "dracula"
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Smooth scrolling configuration
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            clock_tick_ms: default_clock_tick(),
            theme: default_theme(),
            scroll: ScrollConfig::default(),
        }
    }
}

/// Easing curve used by scroll animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    None,
    Linear,
    Cubic,
    Quintic,
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate scroll transitions
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Duration of one scroll animation
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    /// Easing curve
    #[serde(default = "default_easing")]
    pub easing: EasingType,
    /// Rows moved per wheel notch / arrow key
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
    /// Frame rate while an animation is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: default_easing(),
            scroll_lines: default_scroll_lines(),
            animation_fps: default_animation_fps(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    /// RSS/Atom feed to show in the news panel
    #[serde(default = "default_news_url")]
    pub feed_url: String,
    /// Label shown when the feed does not name its source
    #[serde(default = "default_news_source")]
    pub source_name: String,
    /// How long fetched headlines are reused
    #[serde(default = "default_news_cache")]
    pub cache_secs: u64,
    /// Number of headlines kept from the feed
    #[serde(default = "default_news_items")]
    pub max_items: usize,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            feed_url: default_news_url(),
            source_name: default_news_source(),
            cache_secs: default_news_cache(),
            max_items: default_news_items(),
            request_timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_city")]
    pub city: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            city: default_city(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("homeview")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_panel_duration() -> u64 {
    15_000
}

fn default_debounce_ms() -> u64 {
    100
}

fn default_panels() -> Vec<PanelConfig> {
    [
        ("weather", 15_000),
        ("news", 20_000),
        ("calendar", 15_000),
        ("notes", 15_000),
    ]
    .into_iter()
    .map(|(id, duration_ms)| PanelConfig {
        id: id.to_string(),
        duration_ms,
    })
    .collect()
}

fn default_idle_timeout() -> u64 {
    30_000
}

fn default_long_press() -> u64 {
    1_000
}

fn default_feedback_ms() -> u64 {
    2_000
}

fn default_marker_diameter() -> f64 {
    8.0
}

fn default_marker_gap() -> f64 {
    8.0
}

fn default_pill_width_ratio() -> f64 {
    2.5
}

fn default_visible_budget() -> usize {
    5
}

fn default_ease_blend() -> f64 {
    0.7
}

fn default_neighbor_scale_boost() -> f64 {
    0.3
}

fn default_rest_opacity() -> f64 {
    0.4
}

fn default_tick_rate() -> u64 {
    100
}

fn default_clock_tick() -> u64 {
    1_000
}

fn default_theme() -> String {
    "gruvbox-dark".to_string()
}

fn default_animation_duration() -> u64 {
    400
}

fn default_easing() -> EasingType {
    EasingType::Cubic
}

fn default_scroll_lines() -> u16 {
    3
}

fn default_animation_fps() -> u32 {
    60
}

fn default_news_url() -> String {
    "https://news.google.com/rss?hl=ja&gl=JP&ceid=JP:ja".to_string()
}

fn default_news_source() -> String {
    "Google News".to_string()
}

fn default_news_cache() -> u64 {
    1800 // 30 minutes
}

fn default_news_items() -> usize {
    5
}

fn default_timeout() -> u64 {
    15
}

fn default_city() -> String {
    "Tokyo".to_string()
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        if let Some(panel) = self.carousel.panels.iter().find(|p| p.duration_ms == 0) {
            return Err(crate::Error::Config(format!(
                "panel '{}' has a zero duration",
                panel.id
            )));
        }
        if self.pagination.visible_budget == 0 {
            return Err(crate::Error::Config(
                "pagination.visible_budget must be at least 1".to_string(),
            ));
        }
        if self.pagination.marker_diameter <= 0.0 {
            return Err(crate::Error::Config(
                "pagination.marker_diameter must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.pagination.ease_blend) {
            return Err(crate::Error::Config(
                "pagination.ease_blend must be within [0, 1]".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/homeview/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("homeview")
            .join("config.toml")
    }

    /// Get the notes file path
    pub fn notes_path(&self) -> PathBuf {
        self.data_dir().join("notes.json")
    }

    /// Get the log file path used while the terminal UI is running
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("homeview.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_panels() {
        let config = AppConfig::default();
        let ids: Vec<_> = config.carousel.panels.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["weather", "news", "calendar", "notes"]);
        assert_eq!(config.carousel.panels[1].duration_ms, 20_000);
        assert_eq!(config.carousel.debounce_ms, 100);
        assert_eq!(config.interaction.idle_timeout_ms, 30_000);
        assert_eq!(config.interaction.long_press_ms, 1_000);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [carousel]
            auto_rotate = false

            [[carousel.panels]]
            id = "weather"
            duration_ms = 5000

            [[carousel.panels]]
            id = "notes"
            "#,
        )
        .unwrap();

        assert!(!config.carousel.auto_rotate);
        assert_eq!(config.carousel.panels.len(), 2);
        assert_eq!(config.carousel.panels[1].duration_ms, 15_000);
        assert_eq!(config.pagination.visible_budget, 5);
        assert_eq!(config.ui.scroll.easing, EasingType::Cubic);
    }

    #[test]
    fn test_zero_duration_rejected() {
        let result = AppConfig::from_toml(
            r#"
            [[carousel.panels]]
            id = "weather"
            duration_ms = 0
            "#,
        );
        assert!(matches!(result, Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_roundtrip_default() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.carousel.panels, AppConfig::default().carousel.panels);
        assert_eq!(parsed.pagination, PaginationConfig::default());
    }

    #[test]
    fn test_expand_tilde_passthrough() {
        let path = std::path::Path::new("/var/lib/homeview");
        assert_eq!(expand_tilde(path), PathBuf::from("/var/lib/homeview"));
    }
}
