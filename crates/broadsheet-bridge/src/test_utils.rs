//! Shared test utilities for the bridge.
//!
//! Provides a [`RecordingTransport`] that keeps every payload handed to
//! it, in either direction, for assertion.

use crate::channel::{ContentTransport, HostTransport};
use crate::codec::{self, BridgeMessage};

/// A transport that records payloads instead of delivering them.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub payloads: Vec<String>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode every recorded payload.
    pub fn messages(&self) -> Vec<BridgeMessage> {
        self.payloads
            .iter()
            .filter_map(|p| codec::decode(p).ok())
            .collect()
    }

    /// Names of every recorded message, in order.
    pub fn names(&self) -> Vec<String> {
        self.messages().into_iter().map(|m| m.name).collect()
    }
}

impl HostTransport for RecordingTransport {
    fn post(&mut self, payload: String) {
        self.payloads.push(payload);
    }
}

impl ContentTransport for RecordingTransport {
    fn inject(&mut self, payload: String) {
        self.payloads.push(payload);
    }
}
