//! Frame-rate independent exponential approach.
//!
//! Every smoothed scalar in the choreography moves a fraction of its
//! remaining distance toward its target each frame:
//!
//!   `value += (target - value) * min(1, dt * speed)`
//!
//! A single-pole low-pass: decelerating motion that never overshoots.

/// Fraction of the remaining distance covered this frame, in `[0, 1]`
#[inline]
pub fn approach_factor(dt: f32, speed: f32) -> f32 {
    (dt * speed).clamp(0.0, 1.0)
}

/// Move `current` toward `target` by `approach_factor(dt, speed)`
#[inline]
pub fn approach(current: f32, target: f32, dt: f32, speed: f32) -> f32 {
    let factor = approach_factor(dt, speed);
    if factor >= 1.0 {
        return target;
    }
    current + (target - current) * factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_saturates() {
        assert_eq!(approach_factor(1.0 / 60.0, 0.0), 0.0);
        assert!((approach_factor(1.0 / 60.0, 3.0) - 0.05).abs() < 1e-6);
        assert_eq!(approach_factor(1.0, 10.0), 1.0);
    }

    #[test]
    fn test_large_step_lands_exactly_on_target() {
        assert_eq!(approach(0.0, 1.9, 0.5, 4.0), 1.9);
    }

    #[test]
    fn test_zero_dt_holds_value() {
        assert_eq!(approach(0.3, 1.0, 0.0, 2.5), 0.3);
    }
}
