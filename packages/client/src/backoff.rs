//! Exponential backoff with jitter.

use std::time::Duration;

use rand::Rng;

use crate::config::RetryConfig;

/// Delay to sleep before retry number `attempt` (zero-based: the delay after
/// the first failure is `attempt == 0`).
///
/// Doubles the base delay per attempt, caps at `max_delay`, then applies
/// uniform jitter of up to `±jitter_ratio` so synchronized clients do not
/// hammer a recovering service in lockstep.
#[must_use]
pub fn delay_for_attempt(attempt: u32, config: &RetryConfig) -> Duration {
    let exp = config
        .base_delay
        .saturating_mul(2u32.saturating_pow(attempt))
        .min(config.max_delay);

    let mut rng = rand::rng();
    let factor = 1.0 + rng.random_range(-config.jitter_ratio..=config.jitter_ratio);
    exp.mul_f64(factor.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_jitter() -> RetryConfig {
        RetryConfig {
            jitter_ratio: 0.0,
            ..RetryConfig::default()
        }
    }

    #[test]
    fn delay_doubles_per_attempt_without_jitter() {
        let config = no_jitter();
        assert_eq!(delay_for_attempt(0, &config), Duration::from_millis(500));
        assert_eq!(delay_for_attempt(1, &config), Duration::from_millis(1000));
        assert_eq!(delay_for_attempt(2, &config), Duration::from_millis(2000));
        assert_eq!(delay_for_attempt(3, &config), Duration::from_millis(4000));
    }

    #[test]
    fn delay_caps_at_max() {
        let config = no_jitter();
        // 500ms * 2^10 = 512s, well past the 30s cap.
        assert_eq!(delay_for_attempt(10, &config), Duration::from_secs(30));
        // Huge attempt numbers must not overflow.
        assert_eq!(delay_for_attempt(u32::MAX, &config), Duration::from_secs(30));
    }

    #[test]
    fn jittered_delay_stays_within_bounds() {
        let config = RetryConfig::default();
        for attempt in 0..6 {
            let nominal = delay_for_attempt(attempt, &no_jitter());
            for _ in 0..50 {
                let jittered = delay_for_attempt(attempt, &config);
                assert!(
                    jittered >= nominal.mul_f64(0.8) && jittered <= nominal.mul_f64(1.2),
                    "attempt {attempt}: {jittered:?} outside ±20% of {nominal:?}"
                );
            }
        }
    }
}
