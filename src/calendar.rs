//! Anchor date sampling.
//!
//! Every case is anchored on the day its writ of execution was received.
//! Anchors are drawn with replacement from the daily calendar of the
//! generation window, with days in one high-activity quarter weighted up.

use anyhow::{Context, Result, ensure};
use jiff::ToSpan;
use jiff::civil::Date;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use crate::config::GeneratorConfig;

/// A calendar quarter of a specific year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quarter {
    pub year: i16,
    /// 1-4.
    pub quarter: i8,
}

impl Quarter {
    pub const fn new(year: i16, quarter: i8) -> Self {
        Self { year, quarter }
    }

    pub fn of(date: Date) -> Self {
        Self::new(date.year(), (date.month() - 1) / 3 + 1)
    }

    pub fn contains(self, date: Date) -> bool {
        Self::of(date) == self
    }
}

/// Weighted daily calendar over the generation window.
#[derive(Debug, Clone)]
pub struct AnchorCalendar {
    days: Vec<Date>,
    index: WeightedIndex<f64>,
}

impl AnchorCalendar {
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        ensure!(
            config.window_start <= config.window_end,
            "generation window is empty: {}..={}",
            config.window_start,
            config.window_end
        );
        let days: Vec<Date> = config
            .window_start
            .series(1.day())
            .take_while(|d| *d <= config.window_end)
            .collect();
        let weights: Vec<f64> = days
            .iter()
            .map(|d| {
                if config.high_activity_quarter.contains(*d) {
                    config.seasonal_weight
                } else {
                    1.0
                }
            })
            .collect();
        let index = WeightedIndex::new(&weights).context("invalid calendar day weights")?;
        Ok(Self { days, index })
    }

    pub fn days(&self) -> &[Date] {
        &self.days
    }

    /// Sampling weight of `date`, or `None` outside the window.
    #[cfg(test)]
    pub fn weight_of(&self, date: Date) -> Option<f64> {
        self.days
            .binary_search(&date)
            .ok()
            .and_then(|i| self.index.weight(i))
    }

    /// Draw `k` anchor dates independently.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, k: usize) -> Vec<Date> {
        (0..k).map(|_| self.days[self.index.sample(rng)]).collect()
    }
}
