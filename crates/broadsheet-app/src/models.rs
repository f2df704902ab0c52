//! Feed and article records as delivered by the content API.

use serde::{Deserialize, Deserializer};

use broadsheet_feed::FeedEntry;

/// Kind of a feed entry, which decides the detail screen it opens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedType {
    #[default]
    Article,
    /// Labs papers open the paper screen.
    Paper,
}

/// Summary of one post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Post {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub comment_count: Option<u32>,
    #[serde(default)]
    pub praise_count: Option<u32>,
}

/// One row of a feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Feed {
    #[serde(rename = "type", default)]
    pub kind: FeedType,
    pub post: Post,
}

impl FeedEntry for Feed {
    fn key(&self) -> &str {
        &self.post.id
    }
}

/// One page of a feed fetch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedPage {
    #[serde(default)]
    pub feeds: Vec<Feed>,
    /// Cursor for the page after this one.
    #[serde(default)]
    pub last_key: Option<String>,
    #[serde(default = "default_has_more")]
    pub has_more: bool,
}

fn default_has_more() -> bool {
    true
}

/// Full article body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Article {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub body: String,
}

/// Ids arrive as numbers from the feed API and as strings from links.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

#[cfg(test)]
pub(crate) fn feed(id: &str, kind: FeedType) -> Feed {
    Feed {
        kind,
        post: Post {
            id: id.to_string(),
            title: format!("post {id}"),
            comment_count: None,
            praise_count: None,
        },
    }
}
