//! Floating overlay visibility with idempotent fades.

use broadsheet_types::config::OverlayConfig;

use crate::animation::{Tween, easing};

/// A fade-in/fade-out overlay (the floating logo button on the home feed).
///
/// `show` while visible and `hide` while hidden are no-ops: only real
/// visibility changes start a fade.
#[derive(Debug, Clone)]
pub struct Overlay {
    visible: bool,
    opacity: f32,
    fade: Option<Tween>,
    fade_ms: u32,
    transitions: u32,
}

impl Overlay {
    /// A fully visible overlay.
    pub fn new(config: &OverlayConfig) -> Self {
        Self {
            visible: true,
            opacity: 1.0,
            fade: None,
            fade_ms: config.fade_ms,
            transitions: 0,
        }
    }

    /// Start fading in after `delay_ms`. Returns whether a fade started.
    pub fn show(&mut self, delay_ms: u32) -> bool {
        if self.visible {
            return false;
        }
        self.visible = true;
        self.start_fade(1.0, delay_ms);
        true
    }

    /// Start fading out after `delay_ms`. Returns whether a fade started.
    pub fn hide(&mut self, delay_ms: u32) -> bool {
        if !self.visible {
            return false;
        }
        self.visible = false;
        self.start_fade(0.0, delay_ms);
        true
    }

    fn start_fade(&mut self, target: f32, delay_ms: u32) {
        self.transitions += 1;
        // Start from wherever an interrupted fade left the opacity.
        self.fade = Some(Tween::delayed(
            self.opacity,
            target,
            delay_ms,
            self.fade_ms,
            easing::linear,
        ));
    }

    /// Advance the running fade. Returns the current opacity.
    pub fn tick(&mut self, dt_ms: u32) -> f32 {
        if let Some(fade) = self.fade.as_mut() {
            self.opacity = fade.tick(dt_ms);
            if fade.is_finished() {
                self.fade = None;
            }
        }
        self.opacity
    }

    /// Target visibility (what the overlay is fading toward).
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_animating(&self) -> bool {
        self.fade.is_some()
    }

    /// Number of fades started so far.
    pub fn transitions(&self) -> u32 {
        self.transitions
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new(&OverlayConfig::default())
    }
}
