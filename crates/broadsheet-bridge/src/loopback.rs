//! In-memory transport connecting a host and a content endpoint.
//!
//! Models the two independent event loops of a host and its content
//! surface: payloads queue in each direction, in order, until the
//! receiving side pumps them. Destroying the content side discards
//! anything still in flight and drops later injections.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::channel::{ContentBridge, ContentTransport, HostBridge, HostTransport};

type Queue = Rc<RefCell<VecDeque<String>>>;

/// A pair of ordered, unbounded payload queues.
#[derive(Debug, Clone, Default)]
pub struct Loopback {
    to_content: Queue,
    to_host: Queue,
    destroyed: Rc<Cell<bool>>,
}

/// Host-owned end: injects into the content queue.
#[derive(Debug)]
pub struct LoopbackInjector {
    queue: Queue,
    destroyed: Rc<Cell<bool>>,
}

/// Content-owned end: posts into the host queue.
#[derive(Debug)]
pub struct LoopbackPoster {
    queue: Queue,
}

impl Loopback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport for a [`HostBridge`].
    pub fn injector(&self) -> LoopbackInjector {
        LoopbackInjector {
            queue: Rc::clone(&self.to_content),
            destroyed: Rc::clone(&self.destroyed),
        }
    }

    /// Transport for a [`ContentBridge`].
    pub fn poster(&self) -> LoopbackPoster {
        LoopbackPoster {
            queue: Rc::clone(&self.to_host),
        }
    }

    /// Deliver queued host → content payloads. Returns how many were
    /// processed.
    pub fn pump_content<T: HostTransport>(&self, content: &mut ContentBridge<T>) -> usize {
        let mut delivered = 0;
        // Pop one at a time: handlers may not hold the queue borrow.
        loop {
            let next = self.to_content.borrow_mut().pop_front();
            let Some(payload) = next else { break };
            content.dispatch(&payload);
            delivered += 1;
        }
        delivered
    }

    /// Deliver queued content → host payloads.
    pub fn pump_host<T: ContentTransport>(&self, host: &mut HostBridge<T>) -> usize {
        let mut delivered = 0;
        loop {
            let next = self.to_host.borrow_mut().pop_front();
            let Some(payload) = next else { break };
            host.on_host_message(&payload);
            delivered += 1;
        }
        delivered
    }

    /// Tear down the content surface; in-flight injections are lost.
    pub fn destroy_content(&self) {
        let lost = self.pending_to_content();
        if lost > 0 {
            log::debug!("content destroyed with {lost} undelivered payload(s)");
        }
        self.to_content.borrow_mut().clear();
        self.destroyed.set(true);
    }

    pub fn pending_to_content(&self) -> usize {
        self.to_content.borrow().len()
    }
}

impl ContentTransport for LoopbackInjector {
    fn inject(&mut self, payload: String) {
        if self.destroyed.get() {
            log::debug!("content surface gone, dropping injection");
            return;
        }
        self.queue.borrow_mut().push_back(payload);
    }
}

impl HostTransport for LoopbackPoster {
    fn post(&mut self, payload: String) {
        self.queue.borrow_mut().push_back(payload);
    }
}
