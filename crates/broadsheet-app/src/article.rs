//! Article detail screen: body loading, bottom bar and bridge messages.

use broadsheet_bridge::{ArticleLinkMatcher, BridgeMessage, HostEvent, LinkTarget, ScrollDirection};
use broadsheet_feed::animation::{Tween, easing};
use broadsheet_types::config::{ArticleConfig, BroadsheetConfig};

use crate::nav::{Navigator, Route};
use crate::store::ArticleStore;

/// A fetch the article screen needs before it can render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleRequest {
    Info(String),
    Detail(String),
}

/// Bottom bar counters. Zero counts are shown as no badge at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Badges {
    pub comments: Option<u32>,
    pub praise: Option<u32>,
}

fn badge(count: Option<u32>) -> Option<u32> {
    count.filter(|&n| n != 0)
}

// -----------------------------------------------------------------------
// BottomBar
// -----------------------------------------------------------------------

/// Vertical offset of the bottom bar: 0 is on screen, `height` is fully
/// pushed below the edge.
#[derive(Debug, Clone)]
pub struct BottomBar {
    offset: f32,
    height: f32,
    reveal_ms: u32,
    tween: Option<Tween>,
}

impl BottomBar {
    pub fn new(config: &ArticleConfig) -> Self {
        Self {
            offset: 0.0,
            height: config.bottom_bar_height,
            reveal_ms: config.bar_reveal_ms,
            tween: None,
        }
    }

    /// Snap offscreen.
    pub fn hide(&mut self) {
        self.tween = None;
        self.offset = self.height;
    }

    /// Ease back on screen.
    pub fn reveal(&mut self) {
        if self.offset == 0.0 && self.tween.is_none() {
            return;
        }
        self.tween = Some(Tween::new(self.offset, 0.0, self.reveal_ms, easing::ease_in_quad));
    }

    pub fn tick(&mut self, dt_ms: u32) -> f32 {
        if let Some(tween) = self.tween.as_mut() {
            self.offset = tween.tick(dt_ms);
            if tween.is_finished() {
                self.tween = None;
            }
        }
        self.offset
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }
}

// -----------------------------------------------------------------------
// ArticleScreen
// -----------------------------------------------------------------------

pub struct ArticleScreen {
    id: String,
    matcher: ArticleLinkMatcher,
    bar: BottomBar,
    loaded: bool,
    /// Time left before the loading placeholder goes away.
    reveal_in: Option<u32>,
    reveal_delay_ms: u32,
}

impl ArticleScreen {
    pub fn new(id: &str, config: &BroadsheetConfig) -> Self {
        Self {
            id: id.to_string(),
            matcher: ArticleLinkMatcher::from_config(&config.bridge),
            bar: BottomBar::new(&config.article),
            loaded: false,
            reveal_in: None,
            reveal_delay_ms: config.article.loaded_reveal_delay_ms,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Fetches for whatever the store does not have yet.
    pub fn mount(&self, store: &ArticleStore) -> Vec<ArticleRequest> {
        let mut requests = Vec::new();
        if store.info(&self.id).is_none() {
            requests.push(ArticleRequest::Info(self.id.clone()));
        }
        if store.detail(&self.id).is_none() {
            requests.push(ArticleRequest::Detail(self.id.clone()));
        }
        requests
    }

    /// Article HTML, once the detail is in the store.
    pub fn body<'a>(&self, store: &'a ArticleStore) -> Option<&'a str> {
        store.detail(&self.id).map(|a| a.body.as_str())
    }

    /// The content surface finished loading.
    pub fn on_load_end(&mut self) {
        if !self.loaded && self.reveal_in.is_none() {
            self.reveal_in = Some(self.reveal_delay_ms);
        }
    }

    pub fn on_load_error(&self, description: &str) {
        log::warn!("article {} failed to load: {description}", self.id);
    }

    pub fn tick(&mut self, dt_ms: u32) {
        if let Some(left) = self.reveal_in {
            if dt_ms >= left {
                self.reveal_in = None;
                self.loaded = true;
                log::debug!("article {} revealed", self.id);
            } else {
                self.reveal_in = Some(left - dt_ms);
            }
        }
        self.bar.tick(dt_ms);
    }

    /// React to a message from the content.
    pub fn handle(&mut self, event: HostEvent, nav: &mut Navigator) {
        match event {
            HostEvent::LinkPress(url) => self.on_link_press(&url, nav),
            HostEvent::Scroll(ScrollDirection::Down) => self.bar.hide(),
            HostEvent::Scroll(ScrollDirection::Up) => self.bar.reveal(),
            HostEvent::PicsPreview(preview) => nav.navigate(Route::PicsPreview {
                default_active_index: preview.cur,
                pics: preview.pics,
            }),
            HostEvent::App(message) => self.on_app_message(&message),
        }
    }

    fn on_app_message(&self, message: &BridgeMessage) {
        log::info!(
            "article {} ignoring bridge message {}",
            self.id,
            message.name
        );
    }

    /// Article links open in-app; anything else opens the external view.
    pub fn on_link_press(&self, url: &str, nav: &mut Navigator) {
        match self.matcher.classify(url) {
            LinkTarget::Article { id } => nav.navigate(Route::Article { id }),
            LinkTarget::External { url } => nav.navigate(Route::External { url }),
        }
    }

    pub fn badges(&self, store: &ArticleStore) -> Badges {
        match store.info(&self.id) {
            Some(info) => Badges {
                comments: badge(info.post.comment_count),
                praise: badge(info.post.praise_count),
            },
            None => Badges::default(),
        }
    }

    /// Whether the loading placeholder is gone.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn bar(&self) -> &BottomBar {
        &self.bar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Article, FeedType, feed};
    use crate::store::Fetch;
    use broadsheet_bridge::PicsPreview;
    use serde_json::json;

    fn screen(id: &str) -> ArticleScreen {
        ArticleScreen::new(id, &BroadsheetConfig::default())
    }

    #[test]
    fn mount_requests_missing_data() {
        let s = screen("5");
        let mut store = ArticleStore::new();
        assert_eq!(
            s.mount(&store),
            vec![
                ArticleRequest::Info("5".into()),
                ArticleRequest::Detail("5".into())
            ]
        );

        store.apply_detail(Fetch::Done(Article {
            id: "5".into(),
            body: "<p/>".into(),
        }));
        assert_eq!(s.mount(&store), vec![ArticleRequest::Info("5".into())]);
        assert_eq!(s.body(&store), Some("<p/>"));
    }

    #[test]
    fn placeholder_clears_after_reveal_delay() {
        let mut s = screen("1");
        s.tick(1000);
        assert!(!s.is_loaded());

        s.on_load_end();
        s.tick(299);
        assert!(!s.is_loaded());
        // A second load end must not restart the delay.
        s.on_load_end();
        s.tick(1);
        assert!(s.is_loaded());
    }

    #[test]
    fn scroll_down_snaps_bar_and_up_eases_back() {
        let mut s = screen("1");
        let mut nav = Navigator::new();

        s.handle(HostEvent::Scroll(ScrollDirection::Down), &mut nav);
        assert_eq!(s.bar().offset(), 48.0);

        s.handle(HostEvent::Scroll(ScrollDirection::Up), &mut nav);
        s.tick(50);
        // ease-in: a quarter of the way at half time.
        assert!((s.bar().offset() - 36.0).abs() < 1e-3);
        s.tick(50);
        assert_eq!(s.bar().offset(), 0.0);
    }

    #[test]
    fn link_press_routes_articles_in_app() {
        let s = screen("1");
        let mut nav = Navigator::new();
        s.on_link_press("http://m.qdaily.com/mobile/articles/38211.html", &mut nav);
        assert_eq!(nav.current(), &Route::Article { id: "38211".into() });

        s.on_link_press("https://ads.example/x", &mut nav);
        assert_eq!(
            nav.current(),
            &Route::External {
                url: "https://ads.example/x".into()
            }
        );
    }

    #[test]
    fn pics_preview_opens_viewer() {
        let mut s = screen("1");
        let mut nav = Navigator::new();
        let pics = vec![json!({"src": "a.png"}), json!({"src": "b.png"})];
        s.handle(
            HostEvent::PicsPreview(PicsPreview {
                cur: 1,
                pics: pics.clone(),
            }),
            &mut nav,
        );
        assert_eq!(
            nav.current(),
            &Route::PicsPreview {
                default_active_index: 1,
                pics
            }
        );
    }

    #[test]
    fn app_messages_do_not_navigate() {
        let mut s = screen("1");
        let mut nav = Navigator::new();
        s.handle(
            HostEvent::App(BridgeMessage::new("app::custom", json!({"k": 1}))),
            &mut nav,
        );
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn zero_badges_are_absent() {
        let s = screen("3");
        let mut store = ArticleStore::new();
        assert_eq!(s.badges(&store), Badges::default());

        let mut info = feed("3", FeedType::Article);
        info.post.comment_count = Some(0);
        info.post.praise_count = Some(12);
        store.apply_info(Fetch::Done(info));
        assert_eq!(
            s.badges(&store),
            Badges {
                comments: None,
                praise: Some(12)
            }
        );
    }
}
