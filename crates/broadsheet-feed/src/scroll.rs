//! Scroll direction tracking for the overlay affordance.
//!
//! Scrolling down (offset increasing) hides the overlay, scrolling up
//! shows it, and ending a gesture brings it back after a longer settle
//! delay.

use broadsheet_types::config::OverlayConfig;

use crate::overlay::Overlay;

/// A show/hide request derived from scroll samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlaySignal {
    Show { delay_ms: u32 },
    Hide,
}

/// Turns a stream of scroll offsets into overlay signals.
///
/// Signals are only derived while a gesture is active, and the first
/// sample of each gesture only seeds the comparison. Every sample
/// updates the last position regardless.
#[derive(Debug, Clone)]
pub struct ScrollDirectionTracker {
    last_position: f32,
    scrolling: bool,
    seeded: bool,
    overlay: Overlay,
    show_delay_ms: u32,
    settle_delay_ms: u32,
}

impl ScrollDirectionTracker {
    pub fn new(config: &OverlayConfig) -> Self {
        Self {
            last_position: 0.0,
            scrolling: false,
            seeded: false,
            overlay: Overlay::new(config),
            show_delay_ms: config.show_delay_ms,
            settle_delay_ms: config.settle_delay_ms,
        }
    }

    pub fn on_scroll_begin(&mut self) {
        self.scrolling = true;
        self.seeded = false;
    }

    /// Feed one scroll sample; returns the signal it produced, if any.
    pub fn on_scroll(&mut self, position: f32) -> Option<OverlaySignal> {
        let previous = self.last_position;
        self.last_position = position;

        if !self.scrolling {
            return None;
        }
        if !self.seeded {
            self.seeded = true;
            return None;
        }

        let signal = if position > previous {
            OverlaySignal::Hide
        } else if position < previous {
            OverlaySignal::Show {
                delay_ms: self.show_delay_ms,
            }
        } else {
            return None;
        };
        self.apply(signal);
        Some(signal)
    }

    /// End of gesture: always asks for the overlay after the settle delay.
    pub fn on_scroll_end(&mut self) -> OverlaySignal {
        self.scrolling = false;
        let signal = OverlaySignal::Show {
            delay_ms: self.settle_delay_ms,
        };
        self.apply(signal);
        signal
    }

    fn apply(&mut self, signal: OverlaySignal) {
        let started = match signal {
            OverlaySignal::Hide => self.overlay.hide(self.show_delay_ms),
            OverlaySignal::Show { delay_ms } => self.overlay.show(delay_ms),
        };
        if started {
            log::debug!("overlay {signal:?}");
        }
    }

    /// Advance the overlay fade.
    pub fn tick(&mut self, dt_ms: u32) -> f32 {
        self.overlay.tick(dt_ms)
    }

    pub fn last_position(&self) -> f32 {
        self.last_position
    }

    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay.is_visible()
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }
}

impl Default for ScrollDirectionTracker {
    fn default() -> Self {
        Self::new(&OverlayConfig::default())
    }
}
