//! Host and content endpoints of the bridge.
//!
//! Each endpoint owns the transport primitive that reaches the *other*
//! side. Sends are fire-and-forget: one encoded payload per call, no
//! acknowledgement, no history. Inbound payloads that fail to decode are
//! logged and dropped without affecting later messages.

use serde_json::Value;

use crate::codec::{self, BridgeMessage};
use crate::registry::{ContentHandler, HandlerRegistry};
use crate::LINK_PRESS;

// -----------------------------------------------------------------------
// Transport primitives
// -----------------------------------------------------------------------

/// Content → host primitive supplied by the content surface.
pub trait HostTransport {
    /// Emit one payload toward the host.
    fn post(&mut self, payload: String);
}

/// Host → content primitive supplied by the content surface.
///
/// Injection is asynchronous: the content side processes the payload on
/// its own event loop, some time after `inject` returns.
pub trait ContentTransport {
    /// Queue one payload for delivery into the content.
    fn inject(&mut self, payload: String);
}

// -----------------------------------------------------------------------
// HostBridge
// -----------------------------------------------------------------------

/// What happened to an inbound host payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Routed to the link-press callback.
    LinkPress,
    /// Routed to the generic message callback.
    Message,
    /// Decoded, but no callback was registered for it.
    NoListener,
    /// Could not be decoded, or a link press without a URL; dropped.
    Malformed,
}

/// Host end of the bridge.
pub struct HostBridge<T: ContentTransport> {
    transport: T,
    on_link_press: Option<Box<dyn FnMut(&str)>>,
    on_bridge_message: Option<Box<dyn FnMut(BridgeMessage)>>,
}

impl<T: ContentTransport> HostBridge<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            on_link_press: None,
            on_bridge_message: None,
        }
    }

    /// Set the callback for `_toNative::onLinkPress`.
    pub fn set_on_link_press(&mut self, callback: Box<dyn FnMut(&str)>) {
        self.on_link_press = Some(callback);
    }

    /// Set the callback for every other message.
    pub fn set_on_bridge_message(&mut self, callback: Box<dyn FnMut(BridgeMessage)>) {
        self.on_bridge_message = Some(callback);
    }

    /// Encode and inject a message into the content.
    pub fn send_to_content(&mut self, message: &BridgeMessage) {
        log::debug!("host -> content: {}", message.name);
        self.transport.inject(codec::encode(message));
    }

    /// Shorthand for [`send_to_content`](Self::send_to_content).
    pub fn send(&mut self, name: &str, options: Value) {
        self.send_to_content(&BridgeMessage::new(name, options));
    }

    /// Entry point for payloads posted by the content.
    ///
    /// Only the exact link-press name is special-cased; every other name,
    /// reserved-looking or not, goes to the generic callback.
    pub fn on_host_message(&mut self, raw: &str) -> Delivery {
        let message = match codec::decode(raw) {
            Ok(m) => m,
            Err(e) => {
                log::warn!("dropping inbound bridge payload: {e}");
                return Delivery::Malformed;
            }
        };

        if message.name == LINK_PRESS {
            let Some(url) = message.options.as_str() else {
                log::warn!("dropping link press without a URL: {}", message.options);
                return Delivery::Malformed;
            };
            let Some(callback) = self.on_link_press.as_mut() else {
                return Delivery::NoListener;
            };
            callback(url);
            return Delivery::LinkPress;
        }

        match self.on_bridge_message.as_mut() {
            Some(callback) => {
                log::debug!("content -> host: {}", message.name);
                callback(message);
                Delivery::Message
            }
            None => Delivery::NoListener,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}

// -----------------------------------------------------------------------
// ContentBridge
// -----------------------------------------------------------------------

/// Content end of the bridge; owns the handler registry.
pub struct ContentBridge<T: HostTransport> {
    transport: T,
    handlers: HandlerRegistry,
}

impl<T: HostTransport> ContentBridge<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            handlers: HandlerRegistry::new(),
        }
    }

    /// Encode and post a message to the host.
    pub fn send_to_host(&mut self, message: &BridgeMessage) {
        self.transport.post(codec::encode(message));
    }

    /// Shorthand for [`send_to_host`](Self::send_to_host).
    pub fn call_handler(&mut self, name: &str, options: Value) {
        self.send_to_host(&BridgeMessage::new(name, options));
    }

    /// Append a handler for messages named `name`.
    pub fn register_handler(&mut self, name: &str, handler: ContentHandler) {
        self.handlers.register(name, handler);
    }

    /// Decode an injected payload and run its handlers.
    ///
    /// Returns the number of handlers invoked.
    pub fn dispatch(&mut self, raw: &str) -> usize {
        match codec::decode(raw) {
            Ok(message) => self.handlers.dispatch(&message.name, &message.options),
            Err(e) => {
                log::warn!("content dropped bridge payload: {e}");
                0
            }
        }
    }

    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    /// Forget all handlers (the content document was replaced).
    pub fn reset(&mut self) {
        self.handlers.clear();
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}
