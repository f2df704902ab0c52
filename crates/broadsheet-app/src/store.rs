//! Cached article details and infos keyed by article id.

use std::collections::HashMap;

use crate::models::{Article, Feed};

/// State of one fetch as reported by the data layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetch<T> {
    Failed(String),
    Done(T),
}

/// Article cache. Only successful, completed fetches change it.
#[derive(Debug, Default)]
pub struct ArticleStore {
    detail: HashMap<String, Article>,
    info: HashMap<String, Feed>,
}

impl ArticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a detail fetch. Returns whether the store changed.
    pub fn apply_detail(&mut self, fetch: Fetch<Article>) -> bool {
        match fetch {
            Fetch::Done(article) => {
                log::debug!("stored detail for article {}", article.id);
                self.detail.insert(article.id.clone(), article);
                true
            }
            Fetch::Failed(e) => {
                log::warn!("article detail fetch failed: {e}");
                false
            }
        }
    }

    /// Apply an info fetch; infos are keyed by their post id.
    pub fn apply_info(&mut self, fetch: Fetch<Feed>) -> bool {
        match fetch {
            Fetch::Done(feed) => {
                self.info.insert(feed.post.id.clone(), feed);
                true
            }
            Fetch::Failed(e) => {
                log::warn!("article info fetch failed: {e}");
                false
            }
        }
    }

    pub fn detail(&self, id: &str) -> Option<&Article> {
        self.detail.get(id)
    }

    pub fn info(&self, id: &str) -> Option<&Feed> {
        self.info.get(id)
    }
}
