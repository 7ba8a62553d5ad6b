//! Control mechanics: bounded proportional steps for tuning a single knob.

/// Proportional against signed error: x' = clamp(x - k * error, lo, hi),
/// with `error = measured - target`.
#[inline]
pub fn p_against_error(x: f64, error: f64, k: f64, lo: f64, hi: f64) -> f64 {
    (x - k * error).clamp(lo, hi)
}

/// True when a step left the knob in place (pinned at a bound, or zero error).
#[inline]
pub fn stalled(before: f64, after: f64) -> bool {
    (before - after).abs() <= 1e-9 * before.abs().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_is_clamped() {
        assert_eq!(p_against_error(50.0, 0.5, 200.0, 0.0, 1000.0), 0.0);
        assert_eq!(p_against_error(50.0, -10.0, 200.0, 0.0, 1000.0), 1000.0);
        assert!(stalled(1000.0, 1000.0));
        assert!(!stalled(10.0, 11.0));
    }
}
