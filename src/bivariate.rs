//! Statistics over two paired samples.
//!
//! # Leading-prefix pairing
//!
//! Samples of unequal length are truncated to their common leading
//! length `n = min(len(x), len(y))` before anything is computed; the
//! surplus tail of the longer sample is ignored. The paired t statistic
//! is only reported when the *original* lengths agree.
//!
//! # Formulas
//!
//! With `Sxy = Σ(xᵢ − x̄)(yᵢ − ȳ)`, `Sxx = Σ(xᵢ − x̄)²`, `Syy = Σ(yᵢ − ȳ)²`:
//!
//! ```text
//! r         = Sxy / √(Sxx·Syy)
//! slope     = Sxy / Sxx,   intercept = ȳ − slope·x̄      (y regressed on x)
//! t_indep   = (x̄ − ȳ) / √(s²x/n + s²y/n),   s² = S/(n − 1)
//! t_paired  = d̄ / √(s²d/n),   dᵢ = xᵢ − yᵢ
//! ```
//!
//! `t_indep` always treats both groups as size `n`, including when the
//! inputs had different lengths and were truncated.

use crate::stats::{kahan_sum, mean_of, Sample, Stat};

/// Correlation, regression and t statistics for a pair of samples.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BivariateStats {
    /// Number of pairs actually used, after leading-prefix truncation.
    pub n: usize,
    /// Pearson product-moment correlation.
    pub correlation: Stat,
    pub r_squared: Stat,
    pub slope: Stat,
    pub intercept: Stat,
    pub t_independent: Stat,
    /// [`Stat::NotApplicable`] when the input lengths differ.
    pub t_paired: Stat,
}

impl BivariateStats {
    /// Labelled display strings in panel order. The paired t row is
    /// omitted when it does not apply.
    pub fn display_rows(&self, decimals: usize) -> Vec<(&'static str, String)> {
        use crate::format::format_number;
        let mut rows = vec![
            ("Correlation (r)", format_number(self.correlation, decimals)),
            ("R²", format_number(self.r_squared, decimals)),
            ("Slope", format_number(self.slope, decimals)),
            ("Intercept", format_number(self.intercept, decimals)),
            ("t (independent)", format_number(self.t_independent, decimals)),
        ];
        if self.is_paired() {
            rows.push(("t (paired)", format_number(self.t_paired, decimals)));
        }
        rows
    }

    /// Whether the inputs had equal length, so the paired test applies.
    pub fn is_paired(&self) -> bool {
        self.t_paired != Stat::NotApplicable
    }
}

/// Computes bivariate statistics for `x` and `y`.
///
/// Never fails. Zero variance, fewer than two pairs and other divisions
/// by zero yield [`Stat::Empty`] in the affected fields.
///
/// # Complexity
/// Time: O(n), Space: O(1)
///
/// # Examples
/// ```
/// use datagen_stats::bivariate::compare;
/// use datagen_stats::stats::Stat;
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [2.0, 4.0, 6.0, 8.0, 10.0];
/// let b = compare(&x, &y);
/// assert_eq!(b.correlation, Stat::Value(1.0));
/// assert_eq!(b.slope, Stat::Value(2.0));
/// assert_eq!(b.intercept, Stat::Value(0.0));
/// ```
pub fn compare(x: &Sample, y: &Sample) -> BivariateStats {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("compare", x_len = x.len(), y_len = y.len()).entered();

    let n = x.len().min(y.len());
    let paired = x.len() == y.len();

    #[cfg(feature = "tracing")]
    if !paired {
        tracing::debug!(pairs = n, "truncated to leading prefix");
    }

    let (x, y) = (&x[..n], &y[..n]);
    if n == 0 {
        return BivariateStats {
            n,
            correlation: Stat::Empty,
            r_squared: Stat::Empty,
            slope: Stat::Empty,
            intercept: Stat::Empty,
            t_independent: Stat::Empty,
            t_paired: if paired { Stat::Empty } else { Stat::NotApplicable },
        };
    }

    let nf = n as f64;
    let x_mean = mean_of(x);
    let y_mean = mean_of(y);

    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    let mut sum_y2 = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        sum_xy += dx * dy;
        sum_x2 += dx * dx;
        sum_y2 += dy * dy;
    }

    let correlation = Stat::ratio(sum_xy, (sum_x2 * sum_y2).sqrt());
    let slope = Stat::ratio(sum_xy, sum_x2);
    let intercept = slope.map(|b| y_mean - b * x_mean);

    BivariateStats {
        n,
        correlation,
        r_squared: correlation.map(|r| r * r),
        slope,
        intercept,
        t_independent: independent_t(x_mean, y_mean, sum_x2, sum_y2, nf),
        t_paired: if paired {
            paired_t(x, y)
        } else {
            Stat::NotApplicable
        },
    }
}

/// `(x̄ − ȳ) / √(s²x/n + s²y/n)` with both groups taken as size `n`.
fn independent_t(x_mean: f64, y_mean: f64, sum_x2: f64, sum_y2: f64, nf: f64) -> Stat {
    if nf < 2.0 {
        return Stat::Empty;
    }
    let x_var = sum_x2 / (nf - 1.0);
    let y_var = sum_y2 / (nf - 1.0);
    let pooled_se = (x_var / nf + y_var / nf).sqrt();
    Stat::ratio(x_mean - y_mean, pooled_se)
}

/// `d̄ / √(s²d/n)` over per-pair differences of equal-length samples.
fn paired_t(x: &[f64], y: &[f64]) -> Stat {
    let n = x.len();
    if n < 2 {
        return Stat::Empty;
    }
    let nf = n as f64;
    let diffs: Vec<f64> = x.iter().zip(y).map(|(a, b)| a - b).collect();
    let diff_mean = kahan_sum(&diffs) / nf;
    let diff_var = diffs
        .iter()
        .map(|d| (d - diff_mean) * (d - diff_mean))
        .sum::<f64>()
        / (nf - 1.0);
    let diff_se = (diff_var / nf).sqrt();
    Stat::ratio(diff_mean, diff_se)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
