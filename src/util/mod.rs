//! util — shared numeric helpers.
//!
//! Contains:
//! - percent(): the two-decimal percentage used throughout the reports.
//!
//! The rounding rule is add-half-then-truncate, not a library round; the
//! whole point of this crate is numeric parity with sqlite3_analyzer-style
//! output, so keep it exactly as written.

/// Percentage of `val` in `total`, rounded to two decimals by adding half of
/// the last kept digit and truncating. `total == 0` yields 0.
#[inline]
pub fn percent(val: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    ((val * 100.0 / total + 0.005) * 100.0) as i64 as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_zero_total_is_zero() {
        assert_eq!(percent(0.0, 0.0), 0.0);
        assert_eq!(percent(123.0, 0.0), 0.0);
        assert_eq!(percent(-5.0, 0.0), 0.0);
    }

    #[test]
    fn percent_truncates_after_adding_half() {
        // 1/3 -> 33.3333..; +0.005 -> 33.3383..; *100 trunc -> 3333 -> 33.33.
        assert_eq!(percent(1.0, 3.0), 33.33);
        // 2/3 -> 66.6666..; +0.005 -> 66.6716..; -> 66.67 (rounds up).
        assert_eq!(percent(2.0, 3.0), 66.67);
        assert_eq!(percent(1.0, 1.0), 100.0);
        assert_eq!(percent(0.0, 7.0), 0.0);
    }

    #[test]
    fn percent_small_fractions() {
        // 1/8 = 12.5 exactly; +0.005 does not push past 12.50.
        assert_eq!(percent(1.0, 8.0), 12.5);
        assert_eq!(percent(1.0, 10000.0), 0.01);
    }
}
