//! Easing curves and time-based tweens for overlay and bar motion.

/// Easing curves. Input is clamped to `[0.0, 1.0]`.
pub mod easing {
    pub fn linear(t: f32) -> f32 {
        t.clamp(0.0, 1.0)
    }

    /// Quadratic ease-in (slow start).
    pub fn ease_in_quad(t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        t * t
    }
}

/// Interpolates a value over a fixed duration, optionally after a delay.
#[derive(Debug, Clone)]
pub struct Tween {
    pub start: f32,
    pub end: f32,
    /// Time before interpolation begins, in milliseconds.
    pub delay_ms: u32,
    pub duration_ms: u32,
    /// Time since the tween was created, delay included.
    pub elapsed_ms: u32,
    pub easing: fn(f32) -> f32,
}

impl Tween {
    pub fn new(start: f32, end: f32, duration_ms: u32, easing: fn(f32) -> f32) -> Self {
        Self::delayed(start, end, 0, duration_ms, easing)
    }

    pub fn delayed(
        start: f32,
        end: f32,
        delay_ms: u32,
        duration_ms: u32,
        easing: fn(f32) -> f32,
    ) -> Self {
        Self {
            start,
            end,
            delay_ms,
            duration_ms,
            elapsed_ms: 0,
            easing,
        }
    }

    /// Advance by `dt_ms` and return the current value.
    pub fn tick(&mut self, dt_ms: u32) -> f32 {
        self.elapsed_ms = self
            .elapsed_ms
            .saturating_add(dt_ms)
            .min(self.delay_ms.saturating_add(self.duration_ms));
        self.value()
    }

    /// Current value without advancing time.
    pub fn value(&self) -> f32 {
        let running = self.elapsed_ms.saturating_sub(self.delay_ms);
        let t = if self.duration_ms > 0 {
            running as f32 / self.duration_ms as f32
        } else if self.elapsed_ms >= self.delay_ms {
            1.0
        } else {
            0.0
        };
        self.start + (self.end - self.start) * (self.easing)(t)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.delay_ms.saturating_add(self.duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tween_linear() {
        let mut tw = Tween::new(0.0, 100.0, 100, easing::linear);
        assert_eq!(tw.tick(0), 0.0);
        assert_eq!(tw.tick(50), 50.0);
        assert_eq!(tw.tick(50), 100.0);
        assert!(tw.is_finished());
    }

    #[test]
    fn tween_holds_start_during_delay() {
        let mut tw = Tween::delayed(1.0, 0.0, 50, 100, easing::linear);
        assert_eq!(tw.tick(40), 1.0);
        assert_eq!(tw.value(), 1.0);
        assert!((tw.tick(60) - 0.5).abs() < 1e-6);
        assert_eq!(tw.tick(1000), 0.0);
        assert!(tw.is_finished());
    }

    #[test]
    fn zero_duration_jumps_after_delay() {
        let mut tw = Tween::delayed(0.0, 48.0, 10, 0, easing::linear);
        assert_eq!(tw.value(), 0.0);
        assert_eq!(tw.tick(10), 48.0);
        assert!(tw.is_finished());
    }

    #[test]
    fn ease_in_is_slow_at_start() {
        let mut tw = Tween::new(0.0, 100.0, 100, easing::ease_in_quad);
        let v = tw.tick(50);
        assert!((v - 25.0).abs() < 0.01);
    }

    #[test]
    fn easing_bounds() {
        for f in [easing::linear, easing::ease_in_quad] {
            assert_eq!(f(0.0), 0.0);
            assert_eq!(f(1.0), 1.0);
            assert_eq!(f(-3.0), 0.0);
            assert_eq!(f(7.0), 1.0);
        }
    }
}
