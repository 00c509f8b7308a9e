use crate::models::TrafficPattern;

/// Instantaneous request-rate multiplier for a pattern at `progress`.
/// Progress outside [0, 1] is clamped. The multiplier itself carries no
/// jitter; noise is applied downstream by the step generator.
pub fn multiplier(pattern: TrafficPattern, progress: f64) -> f64 {
    let progress = progress.clamp(0.0, 1.0);
    match pattern {
        TrafficPattern::Constant => 1.0,
        TrafficPattern::Gradual => 1.0 + 3.0 * progress,
        TrafficPattern::Spike => {
            if progress < 0.1 {
                1.0 + 40.0 * progress
            } else if progress > 0.9 {
                5.0 - 40.0 * (progress - 0.9)
            } else {
                5.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_is_always_one() {
        for step in 0..=10 {
            let progress = step as f64 / 10.0;
            assert_eq!(multiplier(TrafficPattern::Constant, progress), 1.0);
        }
    }

    #[test]
    fn gradual_ramps_linearly_to_four() {
        assert_eq!(multiplier(TrafficPattern::Gradual, 0.0), 1.0);
        assert_eq!(multiplier(TrafficPattern::Gradual, 0.5), 2.5);
        assert_eq!(multiplier(TrafficPattern::Gradual, 1.0), 4.0);
    }

    #[test]
    fn spike_ramps_holds_and_recovers() {
        assert!((multiplier(TrafficPattern::Spike, 0.0) - 1.0).abs() < 1e-9);
        assert!((multiplier(TrafficPattern::Spike, 0.05) - 3.0).abs() < 1e-9);
        assert_eq!(multiplier(TrafficPattern::Spike, 0.1), 5.0);
        assert_eq!(multiplier(TrafficPattern::Spike, 0.5), 5.0);
        assert_eq!(multiplier(TrafficPattern::Spike, 0.8), 5.0);
        assert!((multiplier(TrafficPattern::Spike, 0.95) - 3.0).abs() < 1e-9);
        assert!((multiplier(TrafficPattern::Spike, 1.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        assert_eq!(multiplier(TrafficPattern::Gradual, -1.0), 1.0);
        assert_eq!(multiplier(TrafficPattern::Gradual, 2.0), 4.0);
        assert!((multiplier(TrafficPattern::Spike, 1.5) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn multiplier_is_never_negative() {
        for pattern in [
            TrafficPattern::Constant,
            TrafficPattern::Gradual,
            TrafficPattern::Spike,
        ] {
            for step in 0..=100 {
                let progress = step as f64 / 100.0;
                assert!(multiplier(pattern, progress) >= 0.0);
            }
        }
    }
}
