/// Maps `value` into the periodic interval that starts at `lo` and spans
/// `hi - lo`. `lo` is reachable, `hi` never is. The interval may run in
/// either direction; a zero-width interval collapses to `lo`.
pub fn wrap(lo: f64, hi: f64, value: f64) -> f64 {
    let range = hi - lo;
    if range == 0.0 || !range.is_finite() {
        return lo;
    }
    let wrapped = lo + (range + (value - lo) % range) % range;
    // -0.0 would otherwise leak out of exact multiples and fail bit equality.
    if wrapped == 0.0 {
        0.0
    } else {
        wrapped
    }
}

/// Clamps without panicking on inverted bounds; `lo` wins when they cross.
/// NaN maps to `lo`.
pub fn clamp(lo: f64, hi: f64, value: f64) -> f64 {
    if value.is_nan() || value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

/// Rounds to two decimals, halves toward positive infinity.
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_stays_in_forward_interval() {
        assert_eq!(wrap(0.0, 1.0, 0.25), 0.25);
        assert_eq!(wrap(0.0, 1.0, 1.25), 0.25);
        assert_eq!(wrap(0.0, 1.0, -0.25), 0.75);
        assert_eq!(wrap(0.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn wrap_handles_descending_interval() {
        // Interval from 775 down toward -2525 (width 3300).
        assert_eq!(wrap(775.0, -2525.0, 0.0), 0.0);
        assert_eq!(wrap(775.0, -2525.0, -600.0), -600.0);
        assert_eq!(wrap(775.0, -2525.0, -2525.0), 775.0);
        assert_eq!(wrap(-175.0, -3475.0, 0.0), -3300.0);
        assert_eq!(wrap(-175.0, -3475.0, -175.0), -175.0);
    }

    #[test]
    fn wrap_never_reaches_far_end() {
        for step in -500..500 {
            let value = step as f64 * 13.7;
            let wrapped = wrap(775.0, -2525.0, value);
            assert!(wrapped <= 775.0 && wrapped > -2525.0, "{value} -> {wrapped}");
        }
    }

    #[test]
    fn wrap_zero_range_returns_lo() {
        assert_eq!(wrap(3.0, 3.0, 42.0), 3.0);
    }

    #[test]
    fn clamp_tolerates_crossed_bounds() {
        assert_eq!(clamp(-10.0, 0.0, 5.0), 0.0);
        assert_eq!(clamp(-10.0, 0.0, -50.0), -10.0);
        assert_eq!(clamp(-10.0, 0.0, -3.0), -3.0);
    }

    #[test]
    fn clamp_maps_nan_to_lower_bound() {
        assert_eq!(clamp(0.0, 1.0, f64::NAN), 0.0);
        assert_eq!(clamp(-10.0, 0.0, f64::NAN), -10.0);
    }

    #[test]
    fn rounding_matches_half_up() {
        assert_eq!(round_hundredths(1.234), 1.23);
        assert_eq!(round_hundredths(1.235_000_1), 1.24);
        assert_eq!(round_hundredths(-2.125), -2.12);
        assert_eq!(round_hundredths(-0.004), 0.0);
    }
}
