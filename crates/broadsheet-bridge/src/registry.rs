//! Content-side handler registry.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

/// Callback invoked with a message's `options` payload.
pub type ContentHandler = Box<dyn FnMut(&Value)>;

/// Message name → handlers, in registration order.
///
/// Registration only ever appends: a name can carry any number of
/// handlers, the same closure may be registered twice, and nothing is
/// removed until [`HandlerRegistry::clear`].
pub struct HandlerRegistry {
    handlers: HashMap<String, Vec<ContentHandler>>,
}

impl HandlerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Append a handler for `name`.
    pub fn register(&mut self, name: &str, handler: ContentHandler) {
        self.handlers.entry(name.to_string()).or_default().push(handler);
    }

    /// Invoke every handler for `name` in order. Returns how many ran.
    pub fn dispatch(&mut self, name: &str, options: &Value) -> usize {
        let Some(list) = self.handlers.get_mut(name) else {
            return 0;
        };
        for handler in list.iter_mut() {
            handler(options);
        }
        list.len()
    }

    /// Number of handlers registered under `name`.
    pub fn handler_count(&self, name: &str) -> usize {
        self.handlers.get(name).map_or(0, Vec::len)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Drop every handler (the content surface was torn down).
    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: Vec<(&str, usize)> = self
            .names()
            .into_iter()
            .map(|n| (n, self.handler_count(n)))
            .collect();
        f.debug_struct("HandlerRegistry").field("handlers", &counts).finish()
    }
}
