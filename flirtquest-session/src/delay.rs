//! The simulated character's "typing…" pause.

use std::time::Duration;

use flirtquest_core::config::ThinkingDelay;
use rand::Rng;

/// Draw a pause uniformly from `[base_ms, base_ms + jitter_ms)`.
pub fn sample<R: Rng + ?Sized>(delay: &ThinkingDelay, rng: &mut R) -> Duration {
    let jitter = if delay.jitter_ms == 0 {
        0
    } else {
        rng.gen_range(0..delay.jitter_ms)
    };
    Duration::from_millis(delay.base_ms.saturating_add(jitter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn default_delay_is_bounded() {
        let mut rng = StdRng::seed_from_u64(4);
        let delay = ThinkingDelay::default();
        for _ in 0..200 {
            let ms = sample(&delay, &mut rng).as_millis();
            assert!((500..1200).contains(&ms), "{ms}ms out of range");
        }
    }

    #[test]
    fn zero_jitter_is_exact() {
        let mut rng = StdRng::seed_from_u64(4);
        let delay = ThinkingDelay { base_ms: 250, jitter_ms: 0 };
        assert_eq!(sample(&delay, &mut rng), Duration::from_millis(250));
        assert_eq!(sample(&ThinkingDelay::none(), &mut rng), Duration::ZERO);
    }
}
