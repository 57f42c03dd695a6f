//! Minimal tweening engine: easing curves, single-value tweens and
//! from-state timelines over element groups.

pub mod ease;
pub mod timeline;

pub use ease::Ease;
pub use timeline::{Frame, FromVars, Position, Step, Timeline};

/// Interpolates one value between `start` and `start + duration` (seconds).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarTween {
    pub from: f64,
    pub to: f64,
    pub start: f64,
    pub duration: f64,
    pub ease: Ease,
}

impl ScalarTween {
    pub fn new(from: f64, to: f64, duration: f64, ease: Ease) -> Self {
        Self { from, to, start: 0.0, duration, ease }
    }

    pub fn progress(&self, t: f64) -> f64 {
        if self.duration <= 0.0 {
            return if t >= self.start { 1.0 } else { 0.0 };
        }
        ((t - self.start) / self.duration).clamp(0.0, 1.0)
    }

    pub fn value_at(&self, t: f64) -> f64 {
        self.from + (self.to - self.from) * self.ease.apply(self.progress(t))
    }

    pub fn is_complete(&self, t: f64) -> bool {
        t >= self.start + self.duration.max(0.0)
    }
}
