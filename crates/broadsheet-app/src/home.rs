//! Home screen: the news and labs feed tabs and the floating dash button.

use serde::Deserialize;

use broadsheet_feed::{FeedList, FeedListener, RenderPlan, ScrollDirectionTracker, ScrollSample};
use broadsheet_types::config::BroadsheetConfig;

use crate::models::{Feed, FeedPage, FeedType};
use crate::nav::{Navigator, Route};

/// Home tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    News,
    Labs,
}

impl Tab {
    pub fn key(self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Labs => "labs",
        }
    }
}

/// A feed fetch the data layer should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    pub tab: Tab,
    /// `None` fetches the first page; otherwise the page after this key.
    pub key: Option<String>,
}

/// What a feed list reported during one call.
#[derive(Default)]
struct TabEvents {
    refresh: bool,
    load_more: bool,
    pressed: Option<Feed>,
    offset: Option<f32>,
}

impl FeedListener<Feed> for TabEvents {
    fn on_refresh(&mut self) {
        self.refresh = true;
    }

    fn on_load_more(&mut self, _cursor: Option<&str>) {
        self.load_more = true;
    }

    fn on_item_press(&mut self, item: &Feed) {
        self.pressed = Some(item.clone());
    }

    fn on_scroll(&mut self, sample: &ScrollSample) {
        self.offset = Some(sample.offset);
    }
}

// -----------------------------------------------------------------------
// FeedTab
// -----------------------------------------------------------------------

/// One paginated feed with its refresh state.
pub struct FeedTab {
    tab: Tab,
    list: FeedList<Feed>,
    refresh_pending: bool,
    has_more: bool,
    last_key: Option<String>,
}

impl FeedTab {
    fn new(tab: Tab, config: &BroadsheetConfig) -> Self {
        Self {
            tab,
            list: FeedList::new(&config.feed),
            refresh_pending: false,
            has_more: true,
            last_key: None,
        }
    }

    /// Request the first page. Always allowed.
    pub fn refresh(&mut self) -> FeedRequest {
        self.refresh_pending = true;
        self.list.set_refreshing(true);
        FeedRequest {
            tab: self.tab,
            key: None,
        }
    }

    /// Request the page after the last key.
    ///
    /// Ignored while a refresh is pending, before any content arrived,
    /// and when there is no key to page from.
    pub fn load_more(&self) -> Option<FeedRequest> {
        if self.refresh_pending || self.list.is_empty() {
            return None;
        }
        let key = self.last_key.clone()?;
        Some(FeedRequest {
            tab: self.tab,
            key: Some(key),
        })
    }

    /// Apply a fetched page. `refresh` pages replace the feed, others
    /// extend it.
    pub fn on_page(&mut self, page: FeedPage, refresh: bool) -> Option<RenderPlan> {
        self.has_more = page.has_more;
        self.last_key = page.last_key;
        if refresh {
            self.refresh_pending = false;
            self.list.set_refreshing(false);
            self.list.replace(page.feeds, page.has_more)
        } else {
            self.list.append(&page.feeds, page.has_more)
        }
    }

    pub fn on_fetch_failed(&mut self, refresh: bool) {
        log::warn!("{} feed fetch failed", self.tab.key());
        if refresh {
            self.refresh_pending = false;
            self.list.set_refreshing(false);
        }
    }

    pub fn list(&self) -> &FeedList<Feed> {
        &self.list
    }

    pub fn refresh_pending(&self) -> bool {
        self.refresh_pending
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn last_key(&self) -> Option<&str> {
        self.last_key.as_deref()
    }
}

// -----------------------------------------------------------------------
// HomeScreen
// -----------------------------------------------------------------------

/// The two feed tabs sharing one scroll tracker and overlay.
pub struct HomeScreen {
    news: FeedTab,
    labs: FeedTab,
    active: Tab,
    tracker: ScrollDirectionTracker,
}

impl HomeScreen {
    pub fn new(config: &BroadsheetConfig) -> Self {
        Self {
            news: FeedTab::new(Tab::News, config),
            labs: FeedTab::new(Tab::Labs, config),
            active: Tab::News,
            tracker: ScrollDirectionTracker::new(&config.overlay),
        }
    }

    /// Initial load of both tabs.
    pub fn mount(&mut self) -> Vec<FeedRequest> {
        vec![self.news.refresh(), self.labs.refresh()]
    }

    pub fn tab(&self, tab: Tab) -> &FeedTab {
        match tab {
            Tab::News => &self.news,
            Tab::Labs => &self.labs,
        }
    }

    fn tab_mut(&mut self, tab: Tab) -> &mut FeedTab {
        match tab {
            Tab::News => &mut self.news,
            Tab::Labs => &mut self.labs,
        }
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn set_active(&mut self, tab: Tab) {
        self.active = tab;
    }

    /// Pull-to-refresh on `tab`.
    pub fn pull_to_refresh(&mut self, tab: Tab) -> Option<FeedRequest> {
        let mut events = TabEvents::default();
        self.tab(tab).list.trigger_refresh(&mut events);
        events.refresh.then(|| self.tab_mut(tab).refresh())
    }

    pub fn on_page(&mut self, tab: Tab, page: FeedPage, refresh: bool) -> Option<RenderPlan> {
        let plan = self.tab_mut(tab).on_page(page, refresh);
        if let Some(plan) = &plan {
            log::debug!(
                "{} rerender: {} dirty row(s), footer {:?}",
                tab.key(),
                plan.dirty_rows().len(),
                plan.footer
            );
        }
        plan
    }

    pub fn on_fetch_failed(&mut self, tab: Tab, refresh: bool) {
        self.tab_mut(tab).on_fetch_failed(refresh);
    }

    /// Row `index` of `tab` was tapped. Returns whether it opened a screen.
    pub fn select(&mut self, tab: Tab, index: usize, nav: &mut Navigator) -> bool {
        let mut events = TabEvents::default();
        if !self.tab(tab).list.select(index, &mut events) {
            return false;
        }
        match events.pressed {
            Some(feed) => {
                Self::to_detail(&feed, nav);
                true
            }
            None => false,
        }
    }

    /// Papers open the paper screen; everything else opens an article.
    pub fn to_detail(feed: &Feed, nav: &mut Navigator) {
        let id = feed.post.id.clone();
        match feed.kind {
            FeedType::Paper => nav.navigate(Route::Paper { id }),
            FeedType::Article => nav.navigate(Route::Article { id }),
        }
    }

    /// The floating overlay button was pressed.
    pub fn to_dash(&self, nav: &mut Navigator) {
        nav.navigate(Route::Dash);
    }

    pub fn scroll_begin(&mut self) {
        self.tab(self.active).list.scroll_begin(&mut TabEvents::default());
        self.tracker.on_scroll_begin();
    }

    /// Feed a scroll sample of the active tab. Returns a load-more
    /// request when the end of the feed came into reach.
    pub fn scroll(&mut self, sample: ScrollSample) -> Option<FeedRequest> {
        let tab = self.active;
        let mut events = TabEvents::default();
        self.tab_mut(tab).list.on_scroll(sample, &mut events);
        if let Some(offset) = events.offset {
            self.tracker.on_scroll(offset);
        }
        if events.load_more {
            self.tab(tab).load_more()
        } else {
            None
        }
    }

    pub fn scroll_end(&mut self) {
        self.tab(self.active).list.scroll_end(&mut TabEvents::default());
        self.tracker.on_scroll_end();
    }

    /// Advance the overlay fade. Returns its opacity.
    pub fn tick(&mut self, dt_ms: u32) -> f32 {
        self.tracker.tick(dt_ms)
    }

    pub fn overlay_visible(&self) -> bool {
        self.tracker.overlay_visible()
    }

    pub fn overlay_opacity(&self) -> f32 {
        self.tracker.overlay().opacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::feed;
    use broadsheet_feed::Footer;

    fn page(ids: std::ops::Range<u32>, last_key: &str, has_more: bool) -> FeedPage {
        FeedPage {
            feeds: ids.map(|i| feed(&i.to_string(), FeedType::Article)).collect(),
            last_key: Some(last_key.into()),
            has_more,
        }
    }

    fn home() -> HomeScreen {
        HomeScreen::new(&BroadsheetConfig::default())
    }

    fn loaded_home() -> HomeScreen {
        let mut h = home();
        h.mount();
        h.on_page(Tab::News, page(0..10, "k10", true), true);
        h
    }

    #[test]
    fn mount_refreshes_both_tabs() {
        let mut h = home();
        let reqs = h.mount();
        assert_eq!(
            reqs,
            vec![
                FeedRequest { tab: Tab::News, key: None },
                FeedRequest { tab: Tab::Labs, key: None },
            ]
        );
        assert!(h.tab(Tab::News).refresh_pending());
        assert!(h.tab(Tab::News).list().refresh_control().refreshing);
    }

    #[test]
    fn load_more_blocked_while_refreshing() {
        let mut h = home();
        h.mount();
        assert_eq!(h.tab(Tab::News).load_more(), None);
    }

    #[test]
    fn load_more_blocked_on_empty_feed() {
        let mut h = home();
        h.mount();
        h.on_page(Tab::News, page(0..0, "k0", true), true);
        assert_eq!(h.tab(Tab::News).load_more(), None);
    }

    #[test]
    fn load_more_uses_last_key() {
        let h = loaded_home();
        assert_eq!(
            h.tab(Tab::News).load_more(),
            Some(FeedRequest {
                tab: Tab::News,
                key: Some("k10".into())
            })
        );
    }

    #[test]
    fn appended_page_extends_feed() {
        let mut h = loaded_home();
        let plan = h.on_page(Tab::News, page(10..38, "k38", false), false).unwrap();
        assert_eq!(plan.page_size, 27);
        assert_eq!(plan.footer, Footer::NoMore);
        assert_eq!(h.tab(Tab::News).list().len(), 38);
        assert_eq!(h.tab(Tab::News).last_key(), Some("k38"));
        assert!(!h.tab(Tab::News).has_more());
    }

    #[test]
    fn labs_pull_refreshes_labs() {
        let mut h = home();
        let req = h.pull_to_refresh(Tab::Labs).unwrap();
        assert_eq!(req.tab, Tab::Labs);
        assert!(h.tab(Tab::Labs).refresh_pending());
        assert!(!h.tab(Tab::News).refresh_pending());
    }

    #[test]
    fn failed_refresh_clears_pending() {
        let mut h = home();
        h.mount();
        h.on_fetch_failed(Tab::News, true);
        assert!(!h.tab(Tab::News).refresh_pending());
    }

    #[test]
    fn select_routes_by_feed_type() {
        let mut h = home();
        h.mount();
        h.on_page(
            Tab::Labs,
            FeedPage {
                feeds: vec![feed("7", FeedType::Paper), feed("8", FeedType::Article)],
                last_key: None,
                has_more: false,
            },
            true,
        );
        let mut nav = Navigator::new();

        assert!(h.select(Tab::Labs, 0, &mut nav));
        assert_eq!(nav.current(), &Route::Paper { id: "7".into() });
        assert!(h.select(Tab::Labs, 1, &mut nav));
        assert_eq!(nav.current(), &Route::Article { id: "8".into() });
        assert!(!h.select(Tab::Labs, 5, &mut nav));
    }

    #[test]
    fn scroll_near_end_requests_next_page() {
        let mut h = loaded_home();
        h.scroll_begin();
        let far = ScrollSample { offset: 0.0, viewport_height: 600.0, content_height: 3000.0 };
        assert_eq!(h.scroll(far), None);
        let near = ScrollSample { offset: 2200.0, viewport_height: 600.0, content_height: 3000.0 };
        assert_eq!(h.scroll(near).and_then(|r| r.key), Some("k10".into()));
        assert!(!h.overlay_visible());
    }

    #[test]
    fn scroll_end_brings_overlay_back() {
        let mut h = loaded_home();
        h.scroll_begin();
        for offset in [0.0, 100.0] {
            h.scroll(ScrollSample { offset, viewport_height: 600.0, content_height: 3000.0 });
        }
        h.tick(200);
        assert_eq!(h.overlay_opacity(), 0.0);
        h.scroll_end();
        h.tick(1000);
        h.tick(100);
        assert_eq!(h.overlay_opacity(), 1.0);
    }

    #[test]
    fn dash_button_navigates() {
        let h = home();
        let mut nav = Navigator::new();
        h.to_dash(&mut nav);
        assert_eq!(nav.current(), &Route::Dash);
    }
}
