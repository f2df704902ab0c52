//! Typed view of messages arriving at the host.

use serde::Deserialize;
use serde_json::Value;

use crate::codec::BridgeMessage;
use crate::{LINK_PRESS, PICS_PREVIEW, SCROLL};

/// Direction reported by `_toNative::onScroll`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    /// Parse the wire form (`"up"` / `"down"`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// Payload of an image preview request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PicsPreview {
    /// Index of the tapped image within `pics`.
    pub cur: usize,
    /// Image descriptors, opaque to the bridge.
    #[serde(default)]
    pub pics: Vec<Value>,
}

/// A host-side message classified by name.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// A link inside the content was activated.
    LinkPress(String),
    /// The content scrolled in a direction.
    Scroll(ScrollDirection),
    /// The content asked to preview its images.
    PicsPreview(PicsPreview),
    /// Any other message, including reserved names with unusable payloads.
    App(BridgeMessage),
}

impl HostEvent {
    /// Classify a decoded message.
    pub fn from_message(message: BridgeMessage) -> Self {
        match message.name.as_str() {
            LINK_PRESS => match message.options.as_str() {
                Some(url) => Self::LinkPress(url.to_string()),
                None => {
                    log::warn!("link press without a URL: {:?}", message.options);
                    Self::App(message)
                }
            },
            SCROLL => match message.options.as_str().and_then(ScrollDirection::parse) {
                Some(dir) => Self::Scroll(dir),
                None => {
                    log::warn!("unknown scroll direction: {:?}", message.options);
                    Self::App(message)
                }
            },
            PICS_PREVIEW => match serde_json::from_value::<PicsPreview>(message.options.clone()) {
                Ok(preview) => Self::PicsPreview(preview),
                Err(e) => {
                    log::warn!("bad pics preview payload: {e}");
                    Self::App(message)
                }
            },
            _ => Self::App(message),
        }
    }

    /// The wire name this event was classified from.
    pub fn name(&self) -> &str {
        match self {
            Self::LinkPress(_) => LINK_PRESS,
            Self::Scroll(_) => SCROLL,
            Self::PicsPreview(_) => PICS_PREVIEW,
            Self::App(m) => &m.name,
        }
    }
}

impl From<BridgeMessage> for HostEvent {
    fn from(message: BridgeMessage) -> Self {
        Self::from_message(message)
    }
}
