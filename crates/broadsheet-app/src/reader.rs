//! Reader state: screens, store and navigation driven by session events.

use broadsheet_feed::ScrollSample;
use broadsheet_types::config::BroadsheetConfig;
use broadsheet_types::error::Result;

use crate::article::{ArticleRequest, ArticleScreen};
use crate::home::{FeedRequest, HomeScreen};
use crate::nav::{Navigator, Route};
use crate::session::SessionEvent;
use crate::store::{ArticleStore, Fetch};
use crate::surface::ContentSurface;

/// A fetch the reader asked the data layer for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Feed(FeedRequest),
    Article(ArticleRequest),
}

/// The article currently on screen with its content surface.
struct OpenArticle {
    screen: ArticleScreen,
    surface: ContentSurface,
    body_loaded: bool,
}

pub struct Reader {
    config: BroadsheetConfig,
    nav: Navigator,
    home: HomeScreen,
    store: ArticleStore,
    article: Option<OpenArticle>,
    requests: Vec<Request>,
}

impl Reader {
    pub fn new(config: BroadsheetConfig) -> Self {
        let home = HomeScreen::new(&config);
        Self {
            config,
            nav: Navigator::new(),
            home,
            store: ArticleStore::new(),
            article: None,
            requests: Vec::new(),
        }
    }

    /// Mount the home screen.
    pub fn start(&mut self) {
        let initial = self.home.mount();
        self.request_feeds(initial);
    }

    pub fn apply(&mut self, event: SessionEvent) -> Result<()> {
        match event {
            SessionEvent::FeedPage { tab, refresh, page } => {
                self.home.on_page(tab, page, refresh);
            }
            SessionEvent::FeedFailed { tab, refresh } => self.home.on_fetch_failed(tab, refresh),
            SessionEvent::PullRefresh { tab } => {
                let request = self.home.pull_to_refresh(tab);
                self.request_feeds(request);
            }
            SessionEvent::SwitchTab { tab } => self.home.set_active(tab),
            SessionEvent::ScrollBegin => self.home.scroll_begin(),
            SessionEvent::Scroll {
                offset,
                viewport_height,
                content_height,
            } => {
                let request = self.home.scroll(ScrollSample {
                    offset,
                    viewport_height,
                    content_height,
                });
                self.request_feeds(request);
            }
            SessionEvent::ScrollEnd => self.home.scroll_end(),
            SessionEvent::Tick { ms } => {
                self.home.tick(ms);
                if let Some(open) = self.article.as_mut() {
                    open.screen.tick(ms);
                }
            }
            SessionEvent::Select { tab, index } => {
                self.home.select(tab, index, &mut self.nav);
            }
            SessionEvent::Dash => self.home.to_dash(&mut self.nav),
            SessionEvent::ArticleInfo { feed } => {
                self.store.apply_info(Fetch::Done(feed));
            }
            SessionEvent::ArticleDetail { article } => {
                self.store.apply_detail(Fetch::Done(article));
                self.load_body();
            }
            SessionEvent::ArticleFailed { message } => {
                self.store.apply_detail(Fetch::Failed(message));
            }
            SessionEvent::LoadEnd => {
                if let Some(open) = self.article.as_mut() {
                    let attached = open.surface.finish_loading();
                    log::debug!("article {}: {attached} link(s) intercepted", open.screen.id());
                    open.screen.on_load_end();
                }
            }
            SessionEvent::LoadError { description } => {
                if let Some(open) = self.article.as_ref() {
                    open.screen.on_load_error(&description);
                }
            }
            SessionEvent::TapLink { index } => {
                if let Some(open) = self.article.as_mut() {
                    open.surface.tap(index);
                }
                self.drain_content();
            }
            SessionEvent::InsertHtml { html } => {
                if let Some(open) = self.article.as_mut() {
                    open.surface.insert_html(&html);
                }
            }
            SessionEvent::HostMessage { name, options } => {
                if let Some(open) = self.article.as_mut() {
                    open.surface.send_to_content(&name, options);
                }
                self.drain_content();
            }
            SessionEvent::ContentMessage { raw } => {
                if let Some(open) = self.article.as_mut() {
                    open.surface.post_raw(&raw);
                }
                self.drain_content();
            }
            SessionEvent::Back => {
                if !self.nav.can_go_back() {
                    log::debug!("back at home ignored");
                }
                self.nav.go_back();
            }
        }
        self.sync_route()
    }

    /// Deliver whatever the content posted to the article screen.
    fn drain_content(&mut self) {
        let Some(open) = self.article.as_mut() else {
            return;
        };
        for event in open.surface.pump() {
            open.screen.handle(event, &mut self.nav);
        }
    }

    /// Open or close the article surface to match the current route.
    fn sync_route(&mut self) -> Result<()> {
        let wanted = match self.nav.current() {
            Route::Article { id } => id.clone(),
            Route::Home => {
                self.close_article();
                return Ok(());
            }
            // Overlays on top of an article keep it alive underneath.
            _ => return Ok(()),
        };
        if self
            .article
            .as_ref()
            .is_some_and(|open| open.screen.id() == wanted)
        {
            return Ok(());
        }
        self.open_article(&wanted)
    }

    fn open_article(&mut self, id: &str) -> Result<()> {
        self.close_article();
        let screen = ArticleScreen::new(id, &self.config);
        let requests = screen.mount(&self.store);
        self.article = Some(OpenArticle {
            screen,
            surface: ContentSurface::new(&self.config.bridge.base_url)?,
            body_loaded: false,
        });
        for request in requests {
            log::info!("request {request:?}");
            self.requests.push(Request::Article(request));
        }
        self.load_body();
        Ok(())
    }

    fn close_article(&mut self) {
        if let Some(mut open) = self.article.take() {
            log::debug!("closing article {}", open.screen.id());
            open.surface.destroy();
        }
    }

    /// Hand the stored body to the surface once it is available.
    fn load_body(&mut self) {
        let Some(open) = self.article.as_mut() else {
            return;
        };
        if open.body_loaded {
            return;
        }
        if let Some(body) = open.screen.body(&self.store) {
            open.surface.load(body);
            open.body_loaded = true;
        }
    }

    fn request_feeds(&mut self, requests: impl IntoIterator<Item = FeedRequest>) {
        for request in requests {
            log::info!(
                "request {} feed{}",
                request.tab.key(),
                request
                    .key
                    .as_deref()
                    .map(|k| format!(" after {k}"))
                    .unwrap_or_default()
            );
            self.requests.push(Request::Feed(request));
        }
    }

    pub fn route(&self) -> &Route {
        self.nav.current()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn home(&self) -> &HomeScreen {
        &self.home
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    /// Links intercepted in the open article.
    pub fn intercepted_links(&self) -> Option<usize> {
        self.article
            .as_ref()
            .map(|open| open.surface.intercepted_links())
    }

    pub fn article_screen(&self) -> Option<&ArticleScreen> {
        self.article.as_ref().map(|open| &open.screen)
    }

    pub fn store(&self) -> &ArticleStore {
        &self.store
    }
}
