/// Monotonic elapsed-time source fed with `performance.now()` readings.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    origin_ms: f64,
}

impl Clock {
    pub fn new(now_ms: f64) -> Self {
        Self { origin_ms: now_ms }
    }

    /// Seconds since the clock was created. Never negative.
    pub fn elapsed(&self, now_ms: f64) -> f64 {
        ((now_ms - self.origin_ms) / 1000.0).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_in_seconds() {
        let clock = Clock::new(1_000.0);
        assert_eq!(clock.elapsed(1_000.0), 0.0);
        assert!((clock.elapsed(3_500.0) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn earlier_readings_clamp_to_zero() {
        let clock = Clock::new(500.0);
        assert_eq!(clock.elapsed(100.0), 0.0);
    }
}
