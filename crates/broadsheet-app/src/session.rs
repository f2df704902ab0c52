//! Recorded reader sessions: one JSON event per line.

use serde::Deserialize;

use broadsheet_types::error::Result;

use crate::home::Tab;
use crate::models::{Article, Feed, FeedPage};

/// One recorded input to the reader.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A feed fetch completed.
    FeedPage {
        tab: Tab,
        #[serde(default)]
        refresh: bool,
        page: FeedPage,
    },
    FeedFailed {
        tab: Tab,
        #[serde(default)]
        refresh: bool,
    },
    PullRefresh {
        tab: Tab,
    },
    SwitchTab {
        tab: Tab,
    },
    ScrollBegin,
    Scroll {
        offset: f32,
        viewport_height: f32,
        content_height: f32,
    },
    ScrollEnd,
    Tick {
        ms: u32,
    },
    Select {
        tab: Tab,
        index: usize,
    },
    /// The floating overlay button was pressed.
    Dash,
    ArticleInfo {
        feed: Feed,
    },
    ArticleDetail {
        article: Article,
    },
    ArticleFailed {
        message: String,
    },
    /// The content surface finished loading.
    LoadEnd,
    LoadError {
        description: String,
    },
    TapLink {
        index: usize,
    },
    /// Markup appended to the live article.
    InsertHtml {
        html: String,
    },
    /// The host pushed a message into the article content.
    HostMessage {
        name: String,
        #[serde(default)]
        options: serde_json::Value,
    },
    /// A raw payload posted by a content script.
    ContentMessage {
        raw: String,
    },
    Back,
}

/// Parse one session line.
pub fn parse_line(line: &str) -> Result<SessionEvent> {
    Ok(serde_json::from_str(line)?)
}

/// Parse a JSON-lines session. Blank lines and `#` comments are skipped;
/// unreadable lines are logged and skipped.
pub fn parse_session(text: &str) -> Vec<SessionEvent> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            match parse_line(line) {
                Ok(event) => Some(event),
                Err(e) => {
                    log::warn!("session line {}: {e}", i + 1);
                    None
                }
            }
        })
        .collect()
}
