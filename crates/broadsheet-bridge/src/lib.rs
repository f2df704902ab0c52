//! Bridge between the host application and embedded article content.
//!
//! Messages are JSON objects `{ "name": ..., "options": ... }` carried over
//! a single string channel in each direction. The host side
//! ([`HostBridge`]) special-cases link presses and hands everything else
//! to a generic callback; the content side ([`ContentBridge`]) fans
//! messages out to the handlers registered for their name.
//!
//! [`LinkInterceptor`] reroutes link activation in a [`ContentDocument`]
//! through the bridge, and [`ArticleLinkMatcher`] decides on the host
//! whether a pressed URL opens an in-app article or an external view.

pub mod channel;
pub mod codec;
pub mod document;
pub mod event;
pub mod intercept;
pub mod loopback;
pub mod registry;
pub mod route;

#[cfg(test)]
pub(crate) mod test_utils;

// -----------------------------------------------------------------------
// Public re-exports
// -----------------------------------------------------------------------

pub use channel::{ContentBridge, ContentTransport, Delivery, HostBridge, HostTransport};
pub use codec::{BridgeMessage, decode, encode};
pub use document::{ContentDocument, HtmlDocument, Link, LinkId, ReadyState};
pub use event::{HostEvent, PicsPreview, ScrollDirection};
pub use intercept::{ClickOutcome, LinkInterceptor};
pub use loopback::Loopback;
pub use registry::HandlerRegistry;
pub use route::{ArticleLinkMatcher, LinkTarget};

/// Host-directed link press; `options` is the URL string.
pub const LINK_PRESS: &str = "_toNative::onLinkPress";

/// Host-directed scroll direction; `options` is `"up"` or `"down"`.
pub const SCROLL: &str = "_toNative::onScroll";

/// Image preview request; `options` is `{ cur, pics }`.
pub const PICS_PREVIEW: &str = "qdaily::picsPreview";
