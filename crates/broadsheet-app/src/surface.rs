//! In-process article content surface.
//!
//! Stands in for the embedded web view: holds the article document, the
//! content end of the bridge with link interception installed, and the
//! host end that turns posted payloads into [`HostEvent`]s.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use broadsheet_bridge::loopback::{LoopbackInjector, LoopbackPoster};
use broadsheet_bridge::{
    ClickOutcome, ContentBridge, ContentDocument, HostBridge, HostEvent, HostTransport,
    HtmlDocument, LinkInterceptor, Loopback,
};
use broadsheet_types::error::Result;

type Inbox = Rc<RefCell<Vec<HostEvent>>>;

pub struct ContentSurface {
    loopback: Loopback,
    host: HostBridge<LoopbackInjector>,
    content: ContentBridge<LoopbackPoster>,
    /// Raw post channel for scripts that bypass the content bridge.
    raw: LoopbackPoster,
    document: HtmlDocument,
    interceptor: LinkInterceptor,
    inbox: Inbox,
}

impl ContentSurface {
    pub fn new(base_url: &str) -> Result<Self> {
        let loopback = Loopback::new();
        let inbox: Inbox = Rc::new(RefCell::new(Vec::new()));

        let mut host = HostBridge::new(loopback.injector());
        let links = Rc::clone(&inbox);
        host.set_on_link_press(Box::new(move |url| {
            links.borrow_mut().push(HostEvent::LinkPress(url.to_string()));
        }));
        let messages = Rc::clone(&inbox);
        host.set_on_bridge_message(Box::new(move |message| {
            messages.borrow_mut().push(HostEvent::from_message(message));
        }));

        Ok(Self {
            content: ContentBridge::new(loopback.poster()),
            raw: loopback.poster(),
            host,
            loopback,
            document: HtmlDocument::new(base_url)?,
            interceptor: LinkInterceptor::new(),
            inbox,
        })
    }

    /// Replace the document with `html`. Handlers registered for the
    /// previous document are dropped.
    pub fn load(&mut self, html: &str) {
        self.document.load_html(html);
        self.content.reset();
        self.interceptor.on_ready(&self.document);
    }

    /// The document finished loading. Returns the links intercepted.
    pub fn finish_loading(&mut self) -> usize {
        self.document.finish_loading();
        self.interceptor.on_load_complete(&self.document)
    }

    /// Append markup to the live document and intercept its links.
    pub fn insert_html(&mut self, fragment: &str) -> usize {
        self.document.insert_html(fragment);
        self.interceptor.attach(&self.document)
    }

    /// The reader tapped the `index`-th link of the document.
    pub fn tap(&mut self, index: usize) -> ClickOutcome {
        let Some(link) = self.document.links().into_iter().nth(index) else {
            log::debug!("tap on missing link {index}");
            return ClickOutcome::Default;
        };
        let outcome = self
            .interceptor
            .activate(&self.document, link.id, &mut self.content);
        if outcome == ClickOutcome::Default {
            log::info!("link {} followed inside the content", link.href);
        }
        outcome
    }

    /// A content script posted `raw` to the host.
    pub fn post_raw(&mut self, raw: &str) {
        self.raw.post(raw.to_string());
    }

    /// Host → content message.
    pub fn send_to_content(&mut self, name: &str, options: Value) {
        self.host.send(name, options);
    }

    /// Run both sides' queues and collect what reached the host.
    pub fn pump(&mut self) -> Vec<HostEvent> {
        self.loopback.pump_content(&mut self.content);
        self.loopback.pump_host(&mut self.host);
        std::mem::take(&mut *self.inbox.borrow_mut())
    }

    /// Tear down the surface; queued injections are lost.
    pub fn destroy(&mut self) {
        self.loopback.destroy_content();
    }

    #[cfg(test)]
    pub fn content(&mut self) -> &mut ContentBridge<LoopbackPoster> {
        &mut self.content
    }

    pub fn intercepted_links(&self) -> usize {
        self.interceptor.intercepted_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use broadsheet_bridge::ScrollDirection;
    use serde_json::json;
    use std::cell::Cell;

    const BASE: &str = "http://m.qdaily.com";

    fn loaded(html: &str) -> ContentSurface {
        let mut s = ContentSurface::new(BASE).unwrap();
        s.load(html);
        s.finish_loading();
        s
    }

    #[test]
    fn bad_base_url_is_error() {
        assert!(ContentSurface::new("not a url").is_err());
    }

    #[test]
    fn links_attach_after_load() {
        let mut s = ContentSurface::new(BASE).unwrap();
        s.load(r#"<a href="/mobile/articles/1.html">one</a>"#);
        assert_eq!(s.intercepted_links(), 0);
        assert_eq!(s.finish_loading(), 1);
    }

    #[test]
    fn tapped_link_arrives_as_link_press() {
        let mut s = loaded(r#"<p><a href="/mobile/articles/9.html">nine</a></p>"#);
        assert_eq!(s.tap(0), ClickOutcome::Intercepted);
        assert_eq!(
            s.pump(),
            vec![HostEvent::LinkPress(
                "http://m.qdaily.com/mobile/articles/9.html".into()
            )]
        );
        assert!(s.pump().is_empty());
    }

    #[test]
    fn tap_before_load_is_default() {
        let mut s = ContentSurface::new(BASE).unwrap();
        s.load(r#"<a href="/x">x</a>"#);
        assert_eq!(s.tap(0), ClickOutcome::Default);
        assert_eq!(s.tap(4), ClickOutcome::Default);
        assert!(s.pump().is_empty());
    }

    #[test]
    fn inserted_links_are_intercepted_once() {
        let mut s = loaded(r#"<a href="/a">a</a>"#);
        assert_eq!(s.insert_html(r#"<a href="/b">b</a>"#), 1);
        assert_eq!(s.intercepted_links(), 2);
        assert_eq!(s.tap(1), ClickOutcome::Intercepted);
    }

    #[test]
    fn raw_posts_are_classified() {
        let mut s = loaded("");
        s.post_raw(r#"{"name":"_toNative::onScroll","options":"down"}"#);
        s.post_raw("not json");
        s.post_raw(r#"{"name":"qdaily::picsPreview","options":{"cur":0,"pics":[]}}"#);
        let events = s.pump();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], HostEvent::Scroll(ScrollDirection::Down));
        assert!(matches!(events[1], HostEvent::PicsPreview(_)));
    }

    #[test]
    fn host_messages_reach_content_handlers() {
        let mut s = loaded("");
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        s.content()
            .register_handler("theme", Box::new(move |_| h.set(h.get() + 1)));
        s.send_to_content("theme", json!("dark"));
        assert_eq!(hits.get(), 0);
        s.pump();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn reload_drops_content_handlers() {
        let mut s = loaded("");
        s.content().register_handler("theme", Box::new(|_| {}));
        s.load("<p>next</p>");
        assert!(s.content().handlers().names().is_empty());
    }

    #[test]
    fn destroyed_surface_drops_injections() {
        let mut s = loaded("");
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        s.content()
            .register_handler("ping", Box::new(move |_| h.set(h.get() + 1)));
        s.send_to_content("ping", Value::Null);
        s.destroy();
        s.pump();
        assert_eq!(hits.get(), 0);
    }
}
