//! Link interception on the content side.
//!
//! Attaching is explicit and driven by lifecycle hooks: call
//! [`LinkInterceptor::on_ready`] when the surface is ready and
//! [`LinkInterceptor::on_load_complete`] after every load, replacement or
//! mutation. Each attach pass picks up links it has not seen yet, so
//! dynamically inserted links are covered and existing ones are never
//! intercepted twice.

use std::collections::HashSet;

use serde_json::Value;

use crate::channel::{ContentBridge, HostTransport};
use crate::document::{ContentDocument, LinkId, ReadyState};
use crate::LINK_PRESS;

/// Result of activating a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Default navigation suppressed; a link-press message was sent.
    Intercepted,
    /// The link is not intercepted; the surface navigates normally.
    Default,
}

/// Tracks which links of the current document are intercepted.
#[derive(Debug, Default)]
pub struct LinkInterceptor {
    attached: HashSet<LinkId>,
    generation: Option<u64>,
    awaiting_load: bool,
}

impl LinkInterceptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface-ready hook. Attaches now when the document has finished
    /// loading, otherwise defers to [`on_load_complete`](Self::on_load_complete).
    pub fn on_ready<D: ContentDocument + ?Sized>(&mut self, doc: &D) -> usize {
        match doc.ready_state() {
            ReadyState::Complete => self.attach(doc),
            ReadyState::Loading => {
                self.awaiting_load = true;
                0
            }
        }
    }

    /// Load-complete hook.
    pub fn on_load_complete<D: ContentDocument + ?Sized>(&mut self, doc: &D) -> usize {
        self.awaiting_load = false;
        self.attach(doc)
    }

    /// Attach interception to every link not yet intercepted. Returns how
    /// many links were newly attached.
    pub fn attach<D: ContentDocument + ?Sized>(&mut self, doc: &D) -> usize {
        if self.generation != Some(doc.generation()) {
            // Whole document replaced: its old elements are gone.
            self.attached.clear();
            self.generation = Some(doc.generation());
        }
        let added = doc
            .links()
            .into_iter()
            .filter(|link| self.attached.insert(link.id))
            .count();
        if added > 0 {
            log::debug!("intercepting {added} new link(s)");
        }
        added
    }

    /// Whether an attach is pending on the next load-complete signal.
    pub fn awaiting_load(&self) -> bool {
        self.awaiting_load
    }

    pub fn is_intercepted(&self, id: LinkId) -> bool {
        self.attached.contains(&id)
    }

    pub fn intercepted_count(&self) -> usize {
        self.attached.len()
    }

    /// A link was activated in the content.
    ///
    /// Intercepted links send `_toNative::onLinkPress` with their target
    /// URL instead of navigating.
    pub fn activate<D, T>(&self, doc: &D, id: LinkId, bridge: &mut ContentBridge<T>) -> ClickOutcome
    where
        D: ContentDocument + ?Sized,
        T: HostTransport,
    {
        if self.generation != Some(doc.generation()) || !self.attached.contains(&id) {
            return ClickOutcome::Default;
        }
        let Some(link) = doc.links().into_iter().find(|l| l.id == id) else {
            return ClickOutcome::Default;
        };
        bridge.call_handler(LINK_PRESS, Value::String(link.href));
        ClickOutcome::Intercepted
    }
}
