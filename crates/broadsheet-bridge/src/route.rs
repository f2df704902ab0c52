//! Host-side routing of pressed links.

use broadsheet_types::config::BridgeConfig;

/// Where a pressed link should take the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// An in-app article, by id.
    Article { id: String },
    /// Anything else: opened in the external/ad view.
    External { url: String },
}

/// Recognizes article URLs of the form `{prefix}{id}{suffix}`.
///
/// The prefix may appear anywhere in the URL, and the id runs up to the
/// *last* occurrence of the suffix, so `.../articles/a.b.html` yields
/// `a.b`. An empty id is not an article.
#[derive(Debug, Clone)]
pub struct ArticleLinkMatcher {
    prefix: String,
    suffix: String,
}

impl ArticleLinkMatcher {
    pub fn new(prefix: &str, suffix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        }
    }

    pub fn from_config(config: &BridgeConfig) -> Self {
        Self::new(&config.article_url_prefix, &config.article_url_suffix)
    }

    /// Extract the article id from `url`, if it is an article URL.
    pub fn article_id<'a>(&self, url: &'a str) -> Option<&'a str> {
        let start = url.find(&self.prefix)? + self.prefix.len();
        let rest = &url[start..];
        let end = rest.rfind(&self.suffix)?;
        let id = &rest[..end];
        (!id.is_empty()).then_some(id)
    }

    pub fn classify(&self, url: &str) -> LinkTarget {
        match self.article_id(url) {
            Some(id) => LinkTarget::Article { id: id.to_string() },
            None => LinkTarget::External {
                url: url.to_string(),
            },
        }
    }
}

impl Default for ArticleLinkMatcher {
    fn default() -> Self {
        Self::from_config(&BridgeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_url_routes_to_article() {
        let m = ArticleLinkMatcher::default();
        assert_eq!(
            m.classify("http://m.qdaily.com/mobile/articles/38211.html"),
            LinkTarget::Article { id: "38211".into() }
        );
    }

    #[test]
    fn other_url_routes_to_external_with_raw_url() {
        let m = ArticleLinkMatcher::default();
        let url = "https://ads.example.com/landing?x=1";
        assert_eq!(m.classify(url), LinkTarget::External { url: url.into() });
    }

    #[test]
    fn empty_id_is_external() {
        let m = ArticleLinkMatcher::default();
        assert!(matches!(
            m.classify("http://m.qdaily.com/mobile/articles/.html"),
            LinkTarget::External { .. }
        ));
    }

    #[test]
    fn missing_suffix_is_external() {
        let m = ArticleLinkMatcher::default();
        assert_eq!(m.article_id("http://m.qdaily.com/mobile/articles/42"), None);
    }

    #[test]
    fn id_runs_to_last_suffix() {
        let m = ArticleLinkMatcher::default();
        assert_eq!(
            m.article_id("http://m.qdaily.com/mobile/articles/a.html.b.html"),
            Some("a.html.b")
        );
    }

    #[test]
    fn prefix_may_be_embedded() {
        let m = ArticleLinkMatcher::default();
        assert_eq!(
            m.article_id("redirect:http://m.qdaily.com/mobile/articles/7.html#top"),
            Some("7")
        );
    }

    #[test]
    fn custom_shape_from_config() {
        let cfg = BridgeConfig {
            article_url_prefix: "https://news.example/p/".into(),
            article_url_suffix: "/".into(),
            base_url: "https://news.example".into(),
        };
        let m = ArticleLinkMatcher::from_config(&cfg);
        assert_eq!(m.article_id("https://news.example/p/abc/"), Some("abc"));
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn extracted_id_matches_built_url(id in "[0-9a-z]{1,12}") {
                let m = ArticleLinkMatcher::default();
                let url = format!("http://m.qdaily.com/mobile/articles/{id}.html");
                prop_assert_eq!(m.classify(&url), LinkTarget::Article { id });
            }

            #[test]
            fn foreign_hosts_are_external(host in "[a-z]{3,10}") {
                let m = ArticleLinkMatcher::default();
                let url = format!("https://{host}.example/page.html");
                prop_assert_eq!(m.classify(&url), LinkTarget::External { url: url.clone() });
            }
        }
    }
}
