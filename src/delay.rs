//! Enforcement-delay model.
//!
//! Whether a case reaches enforcement proceedings, and how long after the
//! writ arrived. Delays follow a two-regime mixture: a main stream spread
//! over near-term 30-day buckets and a long tail of stragglers.

use anyhow::{Context, Result};
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use crate::config::{DayRange, GeneratorConfig};
use crate::rng::RandomSources;

/// First day of a main-stream bucket, counted from the bucket's month start.
const BUCKET_FIRST_DAY: i64 = 10;
const MONTH_DAYS: i64 = 30;

/// A 1-based main-stream month bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthBucket(pub i64);

impl MonthBucket {
    /// `[(m-1)*30 + 10, m*30]`.
    pub fn day_range(self) -> DayRange {
        DayRange::new((self.0 - 1) * MONTH_DAYS + BUCKET_FIRST_DAY, self.0 * MONTH_DAYS)
    }
}

/// Sampled delay between writ receipt and enforcement proceedings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnforcementDelay {
    MainStream { bucket: MonthBucket, days: i64 },
    LongTail { days: i64 },
}

impl EnforcementDelay {
    pub fn days(self) -> i64 {
        match self {
            EnforcementDelay::MainStream { days, .. } | EnforcementDelay::LongTail { days } => days,
        }
    }

    pub fn is_long_tail(self) -> bool {
        matches!(self, EnforcementDelay::LongTail { .. })
    }
}

#[derive(Debug, Clone)]
pub struct EnforcementModel {
    enforcement_probability: f64,
    long_tail_probability: f64,
    buckets: WeightedIndex<f64>,
    long_tail: DayRange,
}

impl EnforcementModel {
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        let buckets = WeightedIndex::new(&config.main_stream_month_weights)
            .context("invalid main-stream month weights")?;
        Ok(Self {
            enforcement_probability: config.enforcement_probability,
            long_tail_probability: config.long_tail_probability,
            buckets,
            long_tail: config.long_tail_days(),
        })
    }

    /// Decide whether enforcement happens and, if so, its delay.
    ///
    /// Draw order: presence (array), regime (general), bucket (array, main
    /// stream only), day count (general).
    pub fn sample(&self, rng: &mut RandomSources) -> Option<EnforcementDelay> {
        if rng.array.random::<f64>() >= self.enforcement_probability {
            return None;
        }
        // Strictly greater: a draw equal to the long-tail probability lands
        // in the tail.
        let delay = if rng.general.random::<f64>() > self.long_tail_probability {
            let bucket = MonthBucket(self.buckets.sample(&mut rng.array) as i64 + 1);
            EnforcementDelay::MainStream {
                bucket,
                days: bucket.day_range().sample(&mut rng.general),
            }
        } else {
            EnforcementDelay::LongTail {
                days: self.long_tail.sample(&mut rng.general),
            }
        };
        Some(delay)
    }
}
