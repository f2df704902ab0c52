//! Reader configuration, loaded from `broadsheet.toml`.
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! the stock reader behavior.
//!
//! ```toml
//! [bridge]
//! article_url_prefix = "http://m.qdaily.com/mobile/articles/"
//!
//! [overlay]
//! settle_delay_ms = 1000
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{BroadsheetError, Result};

/// Environment variable naming a config file to load.
pub const CONFIG_ENV: &str = "BROADSHEET_CONFIG";

/// Bridge and link-routing settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Everything before the article id in an in-app article URL.
    pub article_url_prefix: String,
    /// Everything after the article id.
    pub article_url_suffix: String,
    /// Base URL that article bodies are loaded against.
    pub base_url: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            article_url_prefix: "http://m.qdaily.com/mobile/articles/".to_string(),
            article_url_suffix: ".html".to_string(),
            base_url: "http://m.qdaily.com".to_string(),
        }
    }
}

/// Feed list settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Page size used before the first sequence change.
    pub initial_page_size: usize,
    /// Distance from the bottom (px) at which end-reached fires.
    pub end_reached_threshold: f32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            initial_page_size: 28,
            end_reached_threshold: 300.0,
        }
    }
}

/// Floating overlay button timings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Fade duration in milliseconds.
    pub fade_ms: u32,
    /// Delay before a show/hide fade starts.
    pub show_delay_ms: u32,
    /// Delay before the overlay returns after a scroll gesture ends.
    pub settle_delay_ms: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            fade_ms: 100,
            show_delay_ms: 50,
            settle_delay_ms: 1000,
        }
    }
}

/// Article detail screen settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArticleConfig {
    /// Height of the bottom action bar in px.
    pub bottom_bar_height: f32,
    /// Duration of the bottom bar slide back in.
    pub bar_reveal_ms: u32,
    /// Delay between content load end and hiding the placeholder.
    pub loaded_reveal_delay_ms: u32,
}

impl Default for ArticleConfig {
    fn default() -> Self {
        Self {
            bottom_bar_height: 48.0,
            bar_reveal_ms: 100,
            loaded_reveal_delay_ms: 300,
        }
    }
}

/// Top-level reader configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BroadsheetConfig {
    pub bridge: BridgeConfig,
    pub feed: FeedConfig,
    pub overlay: OverlayConfig,
    pub article: ArticleConfig,
}

impl BroadsheetConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Load from an explicit path, then `BROADSHEET_CONFIG`, then defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match std::env::var(CONFIG_ENV) {
            Ok(env_path) => Self::load(Path::new(&env_path)),
            Err(_) => {
                log::warn!("{CONFIG_ENV} not set -- using default configuration");
                Ok(Self::default())
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.feed.initial_page_size == 0 {
            return Err(BroadsheetError::Config(
                "feed.initial_page_size must be at least 1".into(),
            ));
        }
        if self.bridge.article_url_prefix.is_empty() {
            return Err(BroadsheetError::Config(
                "bridge.article_url_prefix must not be empty".into(),
            ));
        }
        if self.feed.end_reached_threshold < 0.0 {
            return Err(BroadsheetError::Config(
                "feed.end_reached_threshold must not be negative".into(),
            ));
        }
        Ok(())
    }
}
