//! Descriptive statistics over a single numeric sample.
//!
//! Every statistic is reported as a [`Stat`]: either a finite value or an
//! explicit sentinel. Degenerate inputs (empty samples, a single
//! observation, division by zero) never panic and never surface NaN.
//!
//! # Algorithms
//!
//! - **Sum / Mean**: Neumaier compensated summation, so `sum == n × mean`
//!   holds to within a few ulps regardless of `n`.
//! - **Variance**: two-pass sample variance with Bessel's correction
//!   (denominator `n − 1`).
//! - **Median / Min / Max**: taken from a sorted copy; the caller's sample
//!   is never reordered.
//! - **Mode**: values are rounded to 3 decimals before grouping, so
//!   floating noise such as `0.1 + 0.2` and `0.3` counts as one value.

use std::fmt;

/// A sample of numeric observations, already cleaned of non-numeric cells.
pub type Sample = [f64];

/// Decimal places values are rounded to before mode grouping.
pub const MODE_DECIMALS: i32 = 3;

/// More tied modal values than this are reported as [`Mode::Multiple`].
pub const MAX_LISTED_MODES: usize = 3;

/// Outcome of one statistic.
///
/// `Value` always holds a finite number. Anything the arithmetic cannot
/// define (empty input, zero denominators, infinities) is `Empty`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stat {
    /// A finite, defined statistic.
    Value(f64),
    /// Undefined for this input: empty sample or division by zero.
    Empty,
    /// Not meaningful for this input shape (e.g. a paired test on
    /// samples of different length).
    NotApplicable,
}

impl Stat {
    /// Wraps `value`, mapping NaN and infinities to [`Stat::Empty`].
    pub fn from_finite(value: f64) -> Self {
        if value.is_finite() {
            Stat::Value(value)
        } else {
            Stat::Empty
        }
    }

    /// Divides `num` by `den`, yielding `Empty` for a zero denominator.
    pub fn ratio(num: f64, den: f64) -> Self {
        if den == 0.0 {
            Stat::Empty
        } else {
            Stat::from_finite(num / den)
        }
    }

    /// Returns the defined value, if any.
    pub fn value(self) -> Option<f64> {
        match self {
            Stat::Value(v) => Some(v),
            Stat::Empty | Stat::NotApplicable => None,
        }
    }

    pub fn is_defined(self) -> bool {
        matches!(self, Stat::Value(_))
    }

    /// Applies `f` to a defined value and re-checks finiteness.
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            Stat::Value(v) => Stat::from_finite(f(v)),
            other => other,
        }
    }
}

impl From<f64> for Stat {
    fn from(value: f64) -> Self {
        Stat::from_finite(value)
    }
}

impl From<Option<f64>> for Stat {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Stat::Empty, Stat::from_finite)
    }
}

/// The modal value(s) of a sample.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// The sample is empty.
    Empty,
    /// Every value occurs exactly once.
    NoRepeats,
    /// More than [`MAX_LISTED_MODES`] values share the top frequency.
    Multiple,
    /// One to three tied modal values, ascending, rounded to 3 decimals.
    Values(Vec<f64>),
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Empty => f.write_str("-"),
            Mode::NoRepeats => f.write_str("None"),
            Mode::Multiple => f.write_str("Multiple"),
            Mode::Values(values) => {
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{v}")?;
                }
                Ok(())
            }
        }
    }
}

/// Summary statistics of one sample.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DescriptiveStats {
    pub n: usize,
    pub mean: Stat,
    pub median: Stat,
    pub mode: Mode,
    pub std_dev: Stat,
    /// Sample variance (denominator `n − 1`).
    pub variance: Stat,
    pub min: Stat,
    pub max: Stat,
    pub range: Stat,
    pub sum: Stat,
    /// `Σ xᵢ²` (raw, not centered).
    pub sum_of_squares: Stat,
}

impl DescriptiveStats {
    /// Statistics of an empty sample: every field is a sentinel.
    pub fn empty() -> Self {
        Self {
            n: 0,
            mean: Stat::Empty,
            median: Stat::Empty,
            mode: Mode::Empty,
            std_dev: Stat::Empty,
            variance: Stat::Empty,
            min: Stat::Empty,
            max: Stat::Empty,
            range: Stat::Empty,
            sum: Stat::Empty,
            sum_of_squares: Stat::Empty,
        }
    }

    /// Labelled display strings in panel order, numbers formatted to
    /// `decimals` places.
    pub fn display_rows(&self, decimals: usize) -> Vec<(&'static str, String)> {
        use crate::format::format_number;
        vec![
            ("N", self.n.to_string()),
            ("Mean", format_number(self.mean, decimals)),
            ("Median", format_number(self.median, decimals)),
            ("Mode", self.mode.to_string()),
            ("Std Dev", format_number(self.std_dev, decimals)),
            ("Variance", format_number(self.variance, decimals)),
            ("Min", format_number(self.min, decimals)),
            ("Max", format_number(self.max, decimals)),
            ("Range", format_number(self.range, decimals)),
            ("Sum", format_number(self.sum, decimals)),
            ("Sum of Squares", format_number(self.sum_of_squares, decimals)),
        ]
    }
}

impl Default for DescriptiveStats {
    fn default() -> Self {
        Self::empty()
    }
}

/// Computes descriptive statistics for `sample`.
///
/// Never fails. An empty sample yields [`DescriptiveStats::empty`]; a
/// single observation has an `Empty` variance and standard deviation.
///
/// # Complexity
/// Time: O(n log n) (sorting a copy), Space: O(n)
///
/// # Examples
/// ```
/// use datagen_stats::stats::{describe, Mode, Stat};
/// let s = describe(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
/// assert_eq!(s.n, 8);
/// assert_eq!(s.mean, Stat::Value(5.0));
/// assert_eq!(s.median, Stat::Value(4.5));
/// assert_eq!(s.mode, Mode::Values(vec![4.0]));
/// assert_eq!(s.range, Stat::Value(7.0));
/// ```
pub fn describe(sample: &Sample) -> DescriptiveStats {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("describe", n = sample.len()).entered();

    let n = sample.len();
    if n == 0 {
        return DescriptiveStats::empty();
    }
    let nf = n as f64;

    let sum = kahan_sum(sample);
    let mean = mean_of(sample);

    let mut sorted = sample.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    let min = sorted[0];
    let max = sorted[n - 1];

    let squared_deviations: f64 = sample.iter().map(|&x| (x - mean) * (x - mean)).sum();
    let variance = Stat::ratio(squared_deviations, nf - 1.0);
    let sum_of_squares: f64 = sample.iter().map(|&x| x * x).sum();

    DescriptiveStats {
        n,
        mean: Stat::from_finite(mean),
        median: Stat::from_finite(median_sorted(&sorted)),
        mode: mode(sample),
        std_dev: variance.map(f64::sqrt),
        variance,
        min: Stat::from_finite(min),
        max: Stat::from_finite(max),
        range: Stat::from_finite(max - min),
        sum: Stat::from_finite(sum),
        sum_of_squares: Stat::from_finite(sum_of_squares),
    }
}

/// Median of non-empty, ascending data: the middle element, or the
/// average of the two middle elements for even lengths.
fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        // Halve first: the plain sum overflows near f64::MAX.
        sorted[n / 2 - 1] / 2.0 + sorted[n / 2] / 2.0
    }
}

/// Modal value(s) of `sample` after rounding to [`MODE_DECIMALS`] places.
///
/// # Examples
/// ```
/// use datagen_stats::stats::{mode, Mode};
/// assert_eq!(mode(&[1.0, 1.0, 2.0, 2.0, 3.0]), Mode::Values(vec![1.0, 2.0]));
/// assert_eq!(mode(&[1.0, 2.0, 3.0]), Mode::NoRepeats);
/// assert_eq!(mode(&[0.1 + 0.2, 0.3]), Mode::Values(vec![0.3]));
/// ```
pub fn mode(sample: &Sample) -> Mode {
    if sample.is_empty() {
        return Mode::Empty;
    }

    let mut rounded: Vec<f64> = sample
        .iter()
        .map(|&x| round_to(x, MODE_DECIMALS) + 0.0) // + 0.0 folds -0.0 into 0.0
        .collect();
    rounded.sort_unstable_by(f64::total_cmp);

    // Run-length encode the sorted values; runs come out ascending.
    let mut runs: Vec<(f64, usize)> = Vec::new();
    for v in rounded {
        match runs.last_mut() {
            Some((last, count)) if last.total_cmp(&v).is_eq() => *count += 1,
            _ => runs.push((v, 1)),
        }
    }

    let max_freq = runs.iter().map(|&(_, c)| c).max().unwrap_or(0);
    if max_freq <= 1 {
        return Mode::NoRepeats;
    }
    let modes: Vec<f64> = runs
        .into_iter()
        .filter(|&(_, c)| c == max_freq)
        .map(|(v, _)| v)
        .collect();
    if modes.len() > MAX_LISTED_MODES {
        Mode::Multiple
    } else {
        Mode::Values(modes)
    }
}

/// Rounds half away from zero to `decimals` places.
///
/// Values too large to carry digits at that precision (`|value| × 10^d`
/// at or beyond 2⁵²) are returned unchanged instead of being scaled
/// into infinity.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    const INTEGRAL_LIMIT: f64 = 4_503_599_627_370_496.0; // 2^52
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    if !scaled.is_finite() || scaled.abs() >= INTEGRAL_LIMIT {
        return value;
    }
    scaled.round() / factor
}

/// Arithmetic mean of non-empty `data`. Falls back to summing `x / n`
/// when the plain sum overflows, so large finite samples keep a mean.
pub(crate) fn mean_of(data: &[f64]) -> f64 {
    let nf = data.len() as f64;
    let sum = kahan_sum(data);
    if sum.is_finite() {
        sum / nf
    } else {
        data.iter().map(|&x| x / nf).sum()
    }
}

// ---------------------------------------------------------------------------
// Kahan compensated summation
// ---------------------------------------------------------------------------

/// Neumaier compensated summation for O(ε) error independent of `n`.
///
/// This is an improved variant of Kahan summation that also handles the
/// case where the addend is larger in magnitude than the running sum.
///
/// Reference: Neumaier (1974), "Rundungsfehleranalyse einiger Verfahren
/// zur Summation endlicher Summen", *ZAMM* 54(1), pp. 39–51.
///
/// # Complexity
/// Time: O(n), Space: O(1)
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
