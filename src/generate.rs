//! Synthetic data generation.
//!
//! Produces a column of numbers from a [`DistributionSpec`], drawing
//! uniform variates from a caller-supplied [`UniformSource`].
//!
//! # Supported Distributions
//!
//! | Distribution | Parameters | Draws per value | Value |
//! |---|---|---|---|
//! | [`Distribution::Normal`] | mean μ, std dev σ | 2 | μ + σ·z (Box–Muller) |
//! | [`Distribution::Uniform`] | min a, max b | 1 | a + u·(b − a) |
//! | [`Distribution::Sequence`] | start s, increment d | 0 | s + i·d |
//!
//! Every value is rounded half away from zero to the spec's decimal
//! places as the last step.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::random::UniformSource;
use crate::stats::round_to;

/// Most decimal places a spec may request; f64 carries ~15–17
/// significant digits.
pub const MAX_DECIMALS: u32 = 15;

/// Row offset generated columns are written at by default (the first
/// data row below the header rows).
pub const DEFAULT_START_ROW: usize = 3;

/// Error type for an invalid generation request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A distribution parameter is NaN or infinite.
    #[error("parameter `{name}` must be finite, got {value}")]
    NonFiniteParameter { name: &'static str, value: f64 },

    /// Row count is zero or negative.
    #[error("row count must be positive, got {0}")]
    InvalidCount(i64),

    /// Decimal places outside `0..=MAX_DECIMALS`.
    #[error("decimal places must be between 0 and 15, got {0}")]
    InvalidDecimals(i64),

    /// The distribution tag is not one of `normal`, `uniform`, `sequence`.
    #[error("unknown distribution `{0}` (expected normal, uniform or sequence)")]
    UnknownDistribution(String),
}

/// The shape of the generated data.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum Distribution {
    /// Gaussian with the given mean and standard deviation.
    Normal { mean: f64, std_dev: f64 },
    /// Continuous uniform between `min` and `max`.
    Uniform { min: f64, max: f64 },
    /// Arithmetic progression `start, start + increment, …`.
    Sequence { start: f64, increment: f64 },
}

impl Distribution {
    pub fn kind(&self) -> DistributionKind {
        match self {
            Distribution::Normal { .. } => DistributionKind::Normal,
            Distribution::Uniform { .. } => DistributionKind::Uniform,
            Distribution::Sequence { .. } => DistributionKind::Sequence,
        }
    }

    fn parameters(&self) -> [(&'static str, f64); 2] {
        match *self {
            Distribution::Normal { mean, std_dev } => [("mean", mean), ("std_dev", std_dev)],
            Distribution::Uniform { min, max } => [("min", min), ("max", max)],
            Distribution::Sequence { start, increment } => {
                [("start", start), ("increment", increment)]
            }
        }
    }

    /// Value at row `index`, before rounding.
    fn sample<S: UniformSource + ?Sized>(&self, index: usize, source: &mut S) -> f64 {
        match *self {
            Distribution::Normal { mean, std_dev } => mean + box_muller(source) * std_dev,
            Distribution::Uniform { min, max } => min + source.next_uniform() * (max - min),
            Distribution::Sequence { start, increment } => start + index as f64 * increment,
        }
    }
}

/// Distribution tag, as selected in the generator form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DistributionKind {
    Normal,
    Uniform,
    Sequence,
}

impl DistributionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistributionKind::Normal => "normal",
            DistributionKind::Uniform => "uniform",
            DistributionKind::Sequence => "sequence",
        }
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistributionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(DistributionKind::Normal),
            "uniform" => Ok(DistributionKind::Uniform),
            "sequence" => Ok(DistributionKind::Sequence),
            _ => Err(ValidationError::UnknownDistribution(s.to_string())),
        }
    }
}

/// A complete generation request: distribution, row count, precision.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistributionSpec {
    pub distribution: Distribution,
    pub count: usize,
    pub decimals: u32,
}

impl DistributionSpec {
    /// Creates a validated spec.
    ///
    /// # Errors
    /// Returns `Err` if a parameter is not finite, `count` is zero, or
    /// `decimals` exceeds [`MAX_DECIMALS`].
    pub fn new(
        distribution: Distribution,
        count: usize,
        decimals: u32,
    ) -> Result<Self, ValidationError> {
        let spec = Self {
            distribution,
            count,
            decimals,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn normal(
        mean: f64,
        std_dev: f64,
        count: usize,
        decimals: u32,
    ) -> Result<Self, ValidationError> {
        Self::new(Distribution::Normal { mean, std_dev }, count, decimals)
    }

    pub fn uniform(min: f64, max: f64, count: usize, decimals: u32) -> Result<Self, ValidationError> {
        Self::new(Distribution::Uniform { min, max }, count, decimals)
    }

    pub fn sequence(
        start: f64,
        increment: f64,
        count: usize,
        decimals: u32,
    ) -> Result<Self, ValidationError> {
        Self::new(Distribution::Sequence { start, increment }, count, decimals)
    }

    /// Checks the spec. Public fields may have been set directly (or
    /// deserialized), so [`generate`] re-validates before drawing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, value) in self.distribution.parameters() {
            if !value.is_finite() {
                return Err(ValidationError::NonFiniteParameter { name, value });
            }
        }
        if self.count == 0 {
            return Err(ValidationError::InvalidCount(0));
        }
        if self.decimals > MAX_DECIMALS {
            return Err(ValidationError::InvalidDecimals(i64::from(self.decimals)));
        }
        Ok(())
    }
}

/// Raw generator form values, one field per input.
///
/// Only the parameter pair belonging to `distribution` is read when
/// converting into a [`DistributionSpec`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorParams {
    pub distribution: String,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub start: f64,
    pub increment: f64,
    pub rows: i64,
    pub decimals: i64,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            distribution: DistributionKind::Normal.as_str().to_string(),
            mean: 50.0,
            std_dev: 10.0,
            min: 0.0,
            max: 100.0,
            start: 1.0,
            increment: 1.0,
            rows: 100,
            decimals: 2,
        }
    }
}

impl TryFrom<&GeneratorParams> for DistributionSpec {
    type Error = ValidationError;

    fn try_from(params: &GeneratorParams) -> Result<Self, Self::Error> {
        let distribution = match params.distribution.parse::<DistributionKind>()? {
            DistributionKind::Normal => Distribution::Normal {
                mean: params.mean,
                std_dev: params.std_dev,
            },
            DistributionKind::Uniform => Distribution::Uniform {
                min: params.min,
                max: params.max,
            },
            DistributionKind::Sequence => Distribution::Sequence {
                start: params.start,
                increment: params.increment,
            },
        };
        let count = usize::try_from(params.rows)
            .ok()
            .filter(|&c| c > 0)
            .ok_or(ValidationError::InvalidCount(params.rows))?;
        let decimals = u32::try_from(params.decimals)
            .ok()
            .filter(|&d| d <= MAX_DECIMALS)
            .ok_or(ValidationError::InvalidDecimals(params.decimals))?;
        DistributionSpec::new(distribution, count, decimals)
    }
}

impl TryFrom<GeneratorParams> for DistributionSpec {
    type Error = ValidationError;

    fn try_from(params: GeneratorParams) -> Result<Self, Self::Error> {
        DistributionSpec::try_from(&params)
    }
}

/// Generates `spec.count` values, each rounded to `spec.decimals` places.
///
/// Normal values consume two uniform draws each, uniform values one,
/// sequence values none. The spec is validated before any draw, so an
/// error leaves `source` untouched.
///
/// # Errors
/// Returns [`ValidationError`] if the spec is invalid.
///
/// # Examples
/// ```
/// use datagen_stats::generate::{generate, DistributionSpec};
/// use datagen_stats::random::create_rng;
///
/// let spec = DistributionSpec::sequence(10.0, 5.0, 4, 0).unwrap();
/// let values = generate(&spec, &mut create_rng(0)).unwrap();
/// assert_eq!(values, vec![10.0, 15.0, 20.0, 25.0]);
/// ```
pub fn generate<S: UniformSource + ?Sized>(
    spec: &DistributionSpec,
    source: &mut S,
) -> Result<Vec<f64>, ValidationError> {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "generate",
        distribution = %spec.distribution.kind(),
        count = spec.count,
        decimals = spec.decimals
    )
    .entered();

    if let Err(err) = spec.validate() {
        #[cfg(feature = "tracing")]
        tracing::warn!(error = %err, "rejected generation spec");
        return Err(err);
    }

    let decimals = spec.decimals as i32;
    Ok((0..spec.count)
        .map(|i| round_to(spec.distribution.sample(i, source), decimals))
        .collect())
}

/// A generated column and the row offset the host should write it at.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratedColumn {
    /// Zero-based row of the first value.
    pub start_row: usize,
    pub values: Vec<f64>,
}

impl GeneratedColumn {
    /// Zero-based row one past the last value.
    pub fn end_row(&self) -> usize {
        self.start_row + self.values.len()
    }
}

/// Like [`generate`], tagging the output with its destination row.
pub fn generate_column<S: UniformSource + ?Sized>(
    spec: &DistributionSpec,
    source: &mut S,
    start_row: usize,
) -> Result<GeneratedColumn, ValidationError> {
    Ok(GeneratedColumn {
        start_row,
        values: generate(spec, source)?,
    })
}

/// One standard normal deviate from two fresh uniform draws.
///
/// Uses the cosine branch of the Box–Muller transform and discards the
/// sine partner. `u1 == 0` is clamped to the smallest positive normal
/// f64 so the logarithm stays finite.
///
/// Reference: Box & Muller (1958), "A Note on the Generation of Random
/// Normal Deviates", *Ann. Math. Statist.* 29(2).
fn box_muller<S: UniformSource + ?Sized>(source: &mut S) -> f64 {
    let u1 = source.next_uniform().max(f64::MIN_POSITIVE);
    let u2 = source.next_uniform();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

// ============================================================================
// Tests
// ============================================================================


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn output_length_matches_count(
            seed in 0_u64..10000,
            count in 1_usize..200,
            kind in 0_u8..3,
        ) {
            let distribution = match kind {
                0 => Distribution::Normal { mean: 0.0, std_dev: 1.0 },
                1 => Distribution::Uniform { min: 0.0, max: 1.0 },
                _ => Distribution::Sequence { start: 0.0, increment: 1.0 },
            };
            let spec = DistributionSpec::new(distribution, count, 2).unwrap();
            let values = generate(&spec, &mut create_rng(seed)).unwrap();
            prop_assert_eq!(values.len(), count);
            prop_assert!(values.iter().all(|v| v.is_finite()));
        }

        #[test]
        fn uniform_stays_in_rounded_bounds(
            seed in 0_u64..10000,
            min in -1000.0_f64..0.0,
            width in 0.0_f64..1000.0,
        ) {
            let max = min + width;
            let spec = DistributionSpec::uniform(min, max, 50, 2).unwrap();
            let values = generate(&spec, &mut create_rng(seed)).unwrap();
            let (lo, hi) = (round_to(min, 2), round_to(max, 2));
            for v in values {
                prop_assert!(lo - 1e-9 <= v && v <= hi + 1e-9, "{} not in [{}, {}]", v, lo, hi);
            }
        }

        #[test]
        fn values_are_rounded_to_decimals(
            seed in 0_u64..10000,
            decimals in 0_u32..6,
        ) {
            let spec = DistributionSpec::normal(0.0, 100.0, 20, decimals).unwrap();
            let values = generate(&spec, &mut create_rng(seed)).unwrap();
            for v in values {
                prop_assert_eq!(round_to(v, decimals as i32), v);
            }
        }
    }
}
