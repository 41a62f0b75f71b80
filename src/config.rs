//! Generator configuration.
//!
//! Every tunable of a run lives in [`GeneratorConfig`]. The defaults
//! reproduce the reference dataset; the CLI overrides individual fields and
//! then calls [`GeneratorConfig::validate`] before anything is generated.

use std::path::PathBuf;

use anyhow::{Context, Result, bail, ensure};
use jiff::Span;
use jiff::civil::{Date, date};
use rand::Rng;

use crate::activity::DEFAULT_EMPLOYEES;
use crate::calendar::Quarter;
use crate::chain::ChainOffsets;

/// Largest day count a `jiff::Span` can hold.
pub const MAX_SPAN_DAYS: i64 = 7_304_484;

const MONTH_DAYS: i64 = 30;

/// A span of `days` days, or an error past [`MAX_SPAN_DAYS`].
pub(crate) fn span_days(days: i64) -> Result<Span> {
    Span::new()
        .try_days(days)
        .with_context(|| format!("{days} days is out of range for a date offset"))
}

/// Inclusive range of whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    pub min: i64,
    pub max: i64,
}

impl DayRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    #[cfg(test)]
    pub fn contains(self, days: i64) -> bool {
        (self.min..=self.max).contains(&days)
    }

    /// Uniform integer draw from `[min, max]`.
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> i64 {
        rng.random_range(self.min..=self.max)
    }

    fn check(self, name: &str) -> Result<()> {
        ensure!(
            self.min <= self.max,
            "{name}: range is inverted ({}..={})",
            self.min,
            self.max
        );
        ensure!(
            self.min >= -MAX_SPAN_DAYS && self.max <= MAX_SPAN_DAYS,
            "{name}: range {}..={} exceeds {MAX_SPAN_DAYS} days",
            self.min,
            self.max
        );
        Ok(())
    }
}

/// Immutable parameters of one generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of cases; ids run `1..=num_cases`.
    pub num_cases: u32,
    /// Seed for every random stream of the run.
    pub seed: u64,
    /// Probability that a case ever reaches enforcement proceedings.
    pub enforcement_probability: f64,
    /// Probability that an enforced case falls in the long tail.
    pub long_tail_probability: f64,
    /// Long-tail delay window in months, inclusive on both ends.
    pub long_tail_months: (i64, i64),
    /// Relative weights of the main-stream month buckets 1, 2, 3, ...
    pub main_stream_month_weights: Vec<f64>,
    /// First day a writ can be received.
    pub window_start: Date,
    /// Last day a writ can be received.
    pub window_end: Date,
    pub high_activity_quarter: Quarter,
    /// Sampling weight of days inside `high_activity_quarter`; other days weigh 1.0.
    pub seasonal_weight: f64,
    pub employees: Vec<String>,
    pub chain: ChainOffsets,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_cases: 35_000,
            seed: 42,
            enforcement_probability: 0.92,
            long_tail_probability: 0.06,
            long_tail_months: (5, 12),
            main_stream_month_weights: vec![0.10, 0.50, 0.20, 0.10],
            // Starts in late 2023 so early 2024 already has enforcement events.
            window_start: date(2023, 10, 1),
            window_end: date(2024, 12, 29),
            high_activity_quarter: Quarter::new(2024, 4),
            seasonal_weight: 1.2,
            employees: DEFAULT_EMPLOYEES.iter().map(|s| s.to_string()).collect(),
            chain: ChainOffsets::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn with_cases(mut self, num_cases: u32) -> Self {
        self.num_cases = num_cases;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_window(mut self, start: Date, end: Date) -> Self {
        self.window_start = start;
        self.window_end = end;
        self
    }

    /// Delay range of the long tail: from the first day after month
    /// `start - 1` through the last day of month `end`, 30-day months.
    pub fn long_tail_days(&self) -> DayRange {
        let (start, end) = self.long_tail_months;
        DayRange::new((start - 1) * MONTH_DAYS + 1, end * MONTH_DAYS)
    }

    /// Reject configurations that would fail late or produce silently
    /// malformed data.
    pub fn validate(&self) -> Result<()> {
        if self.window_end < self.window_start {
            bail!(
                "generation window ends ({}) before it starts ({})",
                self.window_end,
                self.window_start
            );
        }
        check_probability("enforcement probability", self.enforcement_probability)?;
        check_probability("long-tail probability", self.long_tail_probability)?;
        ensure!(
            self.seasonal_weight.is_finite() && self.seasonal_weight > 0.0,
            "seasonal weight must be a positive number, got {}",
            self.seasonal_weight
        );
        // The calendar's total weight must stay finite for weighted sampling.
        let window_days = (self.window_end - self.window_start).get_days() as f64 + 1.0;
        ensure!(
            (self.seasonal_weight * window_days).is_finite(),
            "seasonal weight {} is too large for a {window_days}-day window",
            self.seasonal_weight
        );
        ensure!(
            (1..=4).contains(&self.high_activity_quarter.quarter),
            "quarter must be 1-4, got {}",
            self.high_activity_quarter.quarter
        );

        let (start, end) = self.long_tail_months;
        ensure!(start >= 1, "long-tail months must start at 1 or later, got {start}");
        ensure!(
            start <= MAX_SPAN_DAYS / MONTH_DAYS && end <= MAX_SPAN_DAYS / MONTH_DAYS,
            "long-tail months {start}..={end} exceed the supported date range"
        );
        self.long_tail_days().check("long-tail months")?;

        ensure!(
            !self.main_stream_month_weights.is_empty(),
            "main-stream month weights are empty"
        );
        ensure!(
            self.main_stream_month_weights
                .iter()
                .all(|w| w.is_finite() && *w >= 0.0),
            "main-stream month weights must be non-negative numbers"
        );
        ensure!(
            self.main_stream_month_weights.iter().sum::<f64>() > 0.0,
            "main-stream month weights are all zero"
        );
        ensure!(
            self.main_stream_month_weights.iter().sum::<f64>().is_finite(),
            "main-stream month weights sum to infinity"
        );
        ensure!(
            self.main_stream_month_weights.len() as i64 <= MAX_SPAN_DAYS / MONTH_DAYS,
            "too many main-stream month buckets: {}",
            self.main_stream_month_weights.len()
        );

        ensure!(!self.employees.is_empty(), "employee roster is empty");
        self.chain.validate()
    }
}

fn check_probability(name: &str, p: f64) -> Result<()> {
    ensure!(
        p.is_finite() && (0.0..=1.0).contains(&p),
        "{name} must be within [0, 1], got {p}"
    );
    Ok(())
}

/// `<project_root>/data/activities.csv`, the project root being the
/// directory this crate was built from.
pub fn default_output_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("activities.csv")
}

pub(crate) fn check_range(name: &str, range: DayRange) -> Result<()> {
    range.check(name)
}
