//! Display formatting for computed statistics.

use crate::stats::Stat;

/// Decimal places used when the caller does not choose a precision.
pub const DEFAULT_DECIMALS: usize = 4;

/// Placeholder shown for any undefined or not-applicable statistic.
pub const PLACEHOLDER: &str = "-";

/// Renders a statistic in fixed-point notation with exactly `decimals`
/// digits after the point.
///
/// Accepts a [`Stat`], a raw `f64`, or an `Option<f64>`. Sentinels, NaN
/// and infinities all render as [`PLACEHOLDER`].
///
/// # Examples
/// ```
/// use datagen_stats::format::format_number;
/// use datagen_stats::stats::Stat;
/// assert_eq!(format_number(3.14159, 2), "3.14");
/// assert_eq!(format_number(Stat::Value(2.0), 4), "2.0000");
/// assert_eq!(format_number(Stat::Empty, 4), "-");
/// assert_eq!(format_number(f64::NAN, 4), "-");
/// ```
pub fn format_number(value: impl Into<Stat>, decimals: usize) -> String {
    match value.into() {
        // + 0.0 keeps -0.0 from rendering as "-0.0000"
        Stat::Value(v) => format!("{:.*}", decimals, v + 0.0),
        Stat::Empty | Stat::NotApplicable => PLACEHOLDER.to_string(),
    }
}

/// [`format_number`] at [`DEFAULT_DECIMALS`] places.
pub fn format_default(value: impl Into<Stat>) -> String {
    format_number(value, DEFAULT_DECIMALS)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn exact_digit_count(v in -1e9_f64..1e9, decimals in 0_usize..10) {
            let s = format_number(v, decimals);
            match s.split_once('.') {
                Some((_, frac)) => prop_assert_eq!(frac.len(), decimals),
                None => prop_assert_eq!(decimals, 0),
            }
        }

        #[test]
        fn parses_back_within_half_unit(v in -1e6_f64..1e6, decimals in 0_usize..8) {
            let s = format_number(v, decimals);
            let parsed: f64 = s.parse().unwrap();
            let half_unit = 0.5 * 10f64.powi(-(decimals as i32));
            prop_assert!((parsed - v).abs() <= half_unit * (1.0 + 1e-9));
        }
    }
}
