use std::f64::consts::PI;

/// One full rotation of the wheel, in radians.
pub const FULL_TURN: f64 = 2.0 * PI;

/// Folds an angle into `[0, 2π)`. Negative inputs wrap forward.
pub fn normalize(radians: f64) -> f64 {
    let folded = radians.rem_euclid(FULL_TURN);
    // rem_euclid of a tiny negative value can round up to exactly 2π.
    if folded >= FULL_TURN { 0.0 } else { folded }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn identity_inside_range() {
        assert_eq!(normalize(0.0), 0.0);
        assert_eq!(normalize(PI), PI);
        assert_eq!(normalize(3.0 * FRAC_PI_2), 3.0 * FRAC_PI_2);
    }

    #[test]
    fn full_turns_fold_to_zero() {
        assert_eq!(normalize(FULL_TURN), 0.0);
        assert!((normalize(21.0 * FULL_TURN)).abs() < 1e-9);
    }

    #[test]
    fn negative_angles_wrap_forward() {
        assert!((normalize(-FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < 1e-12);
        assert!((normalize(-FULL_TURN - PI) - PI).abs() < 1e-9);
    }

    #[test]
    fn result_stays_below_full_turn() {
        for exp in 0..40 {
            let tiny = -(2.0f64.powi(-exp));
            let folded = normalize(tiny);
            assert!((0.0..FULL_TURN).contains(&folded), "failed for -2^-{exp}");
        }
    }
}
