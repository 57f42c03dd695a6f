/// Easing curves. Each maps progress in [0, 1] onto eased progress with
/// `apply(0) == 0` and `apply(1) == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Ease {
    Linear,
    #[default]
    Power1Out,
    Power2Out,
    Power3Out,
    Power2InOut,
    /// Overshoots past the end before settling. The payload is the overshoot strength.
    BackOut(f64),
}

impl Ease {
    pub fn apply(self, p: f64) -> f64 {
        let p = p.clamp(0.0, 1.0);
        match self {
            Ease::Linear => p,
            Ease::Power1Out => 1.0 - (1.0 - p).powi(2),
            Ease::Power2Out => 1.0 - (1.0 - p).powi(3),
            Ease::Power3Out => 1.0 - (1.0 - p).powi(4),
            Ease::Power2InOut => {
                if p < 0.5 {
                    4.0 * p.powi(3)
                } else {
                    1.0 - (-2.0 * p + 2.0).powi(3) / 2.0
                }
            }
            Ease::BackOut(s) => {
                let q = p - 1.0;
                1.0 + (s + 1.0) * q.powi(3) + s * q.powi(2)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 6] = [
        Ease::Linear,
        Ease::Power1Out,
        Ease::Power2Out,
        Ease::Power3Out,
        Ease::Power2InOut,
        Ease::BackOut(1.4),
    ];

    #[test]
    fn endpoints_are_fixed() {
        for ease in ALL {
            assert!(ease.apply(0.0).abs() < 1e-12, "{ease:?}");
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease:?}");
        }
    }

    #[test]
    fn out_of_range_progress_clamps() {
        assert_eq!(Ease::Power3Out.apply(-2.0), 0.0);
        assert_eq!(Ease::Power3Out.apply(7.0), 1.0);
    }

    #[test]
    fn back_out_overshoots() {
        let peak = (1..100)
            .map(|i| Ease::BackOut(1.4).apply(i as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn in_out_is_symmetric() {
        let e = Ease::Power2InOut;
        assert!((e.apply(0.5) - 0.5).abs() < 1e-12);
        assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn stronger_powers_lead_early() {
        let p = 0.3;
        assert!(Ease::Power3Out.apply(p) > Ease::Power2Out.apply(p));
        assert!(Ease::Power2Out.apply(p) > Ease::Power1Out.apply(p));
        assert!(Ease::Power1Out.apply(p) > Ease::Linear.apply(p));
    }
}
