use std::f64::consts::{PI, TAU};

/// Easing curves used by the page. Every curve maps 0 → 0 and 1 → 1 exactly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    Linear,
    /// Cubic deceleration.
    Power2Out,
    Power2InOut,
    /// Overshoots by `overshoot` before settling.
    BackOut(f64),
    ElasticOut { amplitude: f64, period: f64 },
    SineInOut,
}

impl Ease {
    pub const BACK: Ease = Ease::BackOut(1.7);
    pub const ELASTIC: Ease = Ease::ElasticOut { amplitude: 1.0, period: 0.3 };

    pub fn apply(self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Ease::Linear => t,
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power2InOut => {
                if t < 0.5 {
                    4.0 * t.powi(3)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Ease::BackOut(c) => {
                let u = t - 1.0;
                1.0 + (c + 1.0) * u.powi(3) + c * u.powi(2)
            }
            Ease::ElasticOut { amplitude, period } => {
                let a = amplitude.max(1.0);
                let shift = period / TAU * (1.0 / a).asin();
                a * 2f64.powf(-10.0 * t) * ((t - shift) * TAU / period).sin() + 1.0
            }
            Ease::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 6] = [
        Ease::Linear,
        Ease::Power2Out,
        Ease::Power2InOut,
        Ease::BACK,
        Ease::ELASTIC,
        Ease::SineInOut,
    ];

    #[test]
    fn endpoints_are_exact() {
        for ease in ALL {
            assert_eq!(ease.apply(0.0), 0.0, "{ease:?} at 0");
            assert_eq!(ease.apply(1.0), 1.0, "{ease:?} at 1");
            assert_eq!(ease.apply(-3.0), 0.0);
            assert_eq!(ease.apply(7.0), 1.0);
        }
    }

    #[test]
    fn back_out_overshoots() {
        let peak = (1..100)
            .map(|i| Ease::BACK.apply(i as f64 / 100.0))
            .fold(0.0, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn symmetric_curves_cross_half_at_midpoint() {
        assert!((Ease::SineInOut.apply(0.5) - 0.5).abs() < 1e-12);
        assert!((Ease::Power2InOut.apply(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn power2_out_is_front_loaded() {
        assert!(Ease::Power2Out.apply(0.25) > 0.25);
    }
}
