//! # datagen-stats
//!
//! Statistics and synthetic-data engine behind the DataGen spreadsheet
//! add-in.
//!
//! The crate is pure computation over in-memory samples. It knows nothing
//! about worksheets, selections, or change events; the host reads cells,
//! hands cleaned samples to the calculators here, and formats the results
//! for display.
//!
//! ## Modules
//!
//! - [`stats`] — Univariate descriptive statistics and the per-field
//!   [`Stat`](stats::Stat) result type
//! - [`bivariate`] — Correlation, least-squares regression, and t statistics
//!   over paired samples
//! - [`random`] — The injectable uniform source used by the generator
//! - [`generate`] — Normal / uniform / sequence data generation
//! - [`format`] — Fixed-precision display strings with a `"-"` placeholder
//! - [`cells`] — Host boundary helpers: cell cleaning and selection dispatch
//!
//! ## Design Philosophy
//!
//! - **Undefined is a value**: empty samples and divisions by zero produce
//!   [`Stat::Empty`](stats::Stat::Empty), never NaN or a panic
//! - **Explicit randomness**: generation draws from a caller-supplied
//!   [`UniformSource`](random::UniformSource), so every run can be seeded
//! - **Property-based testing**: statistical invariants verified via proptest

pub mod bivariate;
pub mod cells;
pub mod format;
pub mod generate;
pub mod random;
pub mod stats;

pub use bivariate::{compare, BivariateStats};
pub use format::format_number;
pub use generate::{generate, DistributionSpec, ValidationError};
pub use random::{create_rng, UniformSource};
pub use stats::{describe, DescriptiveStats, Mode, Stat};
