//! Court-stage dates around the anchor.
//!
//! Writ-sent is the only event after the anchor. The four court stages walk
//! backwards, each one a random number of days before the previous.

use anyhow::{Context, Result, ensure};
use jiff::civil::Date;
use rand::Rng;

use crate::config::{DayRange, check_range, span_days};

/// Day offsets of each chain step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainOffsets {
    /// Anchor to writ sent to the bailiffs (forward).
    pub writ_sent: DayRange,
    /// Decision received to anchor.
    pub decision_received: DayRange,
    /// Decision made to decision received.
    pub decision_made: DayRange,
    /// Hearing scheduled to decision made.
    pub hearing_scheduled: DayRange,
    /// Claim filed to hearing scheduled.
    pub claim_filed: DayRange,
}

impl Default for ChainOffsets {
    fn default() -> Self {
        Self {
            writ_sent: DayRange::new(1, 7),
            decision_received: DayRange::new(7, 21),
            decision_made: DayRange::new(15, 45),
            hearing_scheduled: DayRange::new(20, 60),
            claim_filed: DayRange::new(1, 5),
        }
    }
}

impl ChainOffsets {
    pub fn validate(&self) -> Result<()> {
        check_range("writ-sent offset", self.writ_sent)?;
        ensure!(self.writ_sent.min >= 0, "writ-sent offset must not be negative");
        for (name, range) in [
            ("decision-received offset", self.decision_received),
            ("decision-made offset", self.decision_made),
            ("hearing-scheduled offset", self.hearing_scheduled),
            ("claim-filed offset", self.claim_filed),
        ] {
            check_range(name, range)?;
            ensure!(range.min >= 1, "{name} must be at least one day");
        }
        Ok(())
    }

    /// Longest possible distance from claim filing back to the anchor.
    pub fn max_lead_days(&self) -> i64 {
        self.decision_received.max
            + self.decision_made.max
            + self.hearing_scheduled.max
            + self.claim_filed.max
    }
}

/// The five derived dates of one case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseChain {
    pub writ_sent: Date,
    pub decision_received: Date,
    pub decision_made: Date,
    pub hearing_scheduled: Date,
    pub claim_filed: Date,
}

impl CaseChain {
    /// Draws the five offsets in field order from `rng`.
    pub fn sample<R: Rng + ?Sized>(
        anchor: Date,
        offsets: &ChainOffsets,
        rng: &mut R,
    ) -> Result<Self> {
        let writ_sent = anchor
            .checked_add(span_days(offsets.writ_sent.sample(rng))?)
            .context("writ-sent date out of range")?;
        let decision_received = anchor
            .checked_sub(span_days(offsets.decision_received.sample(rng))?)
            .context("decision-received date out of range")?;
        let decision_made = decision_received
            .checked_sub(span_days(offsets.decision_made.sample(rng))?)
            .context("decision-made date out of range")?;
        let hearing_scheduled = decision_made
            .checked_sub(span_days(offsets.hearing_scheduled.sample(rng))?)
            .context("hearing-scheduled date out of range")?;
        let claim_filed = hearing_scheduled
            .checked_sub(span_days(offsets.claim_filed.sample(rng))?)
            .context("claim-filed date out of range")?;
        Ok(Self {
            writ_sent,
            decision_received,
            decision_made,
            hearing_scheduled,
            claim_filed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_SPAN_DAYS;
    use jiff::ToSpan;
    use jiff::civil::date;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn days_between(earlier: Date, later: Date) -> i64 {
        (later - earlier).get_days() as i64
    }

    #[test]
    fn offsets_within_ranges() {
        let offsets = ChainOffsets::default();
        let anchor = date(2024, 6, 15);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..2000 {
            let c = CaseChain::sample(anchor, &offsets, &mut rng).unwrap();
            assert!(offsets.writ_sent.contains(days_between(anchor, c.writ_sent)));
            assert!(
                offsets
                    .decision_received
                    .contains(days_between(c.decision_received, anchor))
            );
            assert!(
                offsets
                    .decision_made
                    .contains(days_between(c.decision_made, c.decision_received))
            );
            assert!(
                offsets
                    .hearing_scheduled
                    .contains(days_between(c.hearing_scheduled, c.decision_made))
            );
            assert!(
                offsets
                    .claim_filed
                    .contains(days_between(c.claim_filed, c.hearing_scheduled))
            );
        }
    }

    #[test]
    fn strictly_ordered() {
        let offsets = ChainOffsets::default();
        let mut rng = StdRng::seed_from_u64(9);
        let anchor = date(2023, 10, 1);
        for _ in 0..1000 {
            let c = CaseChain::sample(anchor, &offsets, &mut rng).unwrap();
            assert!(c.claim_filed < c.hearing_scheduled);
            assert!(c.hearing_scheduled < c.decision_made);
            assert!(c.decision_made < c.decision_received);
            assert!(c.decision_received <= anchor);
            assert!(anchor <= c.writ_sent);
        }
    }

    #[test]
    fn claim_can_precede_window() {
        // The chain is unbounded backwards: an anchor on the first window day
        // still yields a claim up to `max_lead_days` earlier.
        let offsets = ChainOffsets::default();
        assert_eq!(offsets.max_lead_days(), 21 + 45 + 60 + 5);
        let anchor = date(2023, 10, 1);
        let earliest = anchor.checked_sub(offsets.max_lead_days().days()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let c = CaseChain::sample(anchor, &offsets, &mut rng).unwrap();
        assert!(c.claim_filed >= earliest);
        assert!(c.claim_filed < anchor);
    }

    #[test]
    fn overflow_is_an_error() {
        let offsets = ChainOffsets::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(CaseChain::sample(Date::MIN, &offsets, &mut rng).is_err());
    }

    #[test]
    fn largest_offset_fails_without_panicking() {
        let mut offsets = ChainOffsets::default();
        offsets.decision_made = DayRange::new(MAX_SPAN_DAYS, MAX_SPAN_DAYS);
        offsets.validate().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let err = CaseChain::sample(date(2024, 6, 15), &offsets, &mut rng).unwrap_err();
        assert!(err.to_string().contains("decision-made"), "{err}");
    }

    #[test]
    fn rejects_zero_backward_offset() {
        let mut offsets = ChainOffsets::default();
        offsets.claim_filed = DayRange::new(0, 5);
        assert!(offsets.validate().is_err());
        offsets.claim_filed = DayRange::new(6, 5);
        assert!(offsets.validate().is_err());
    }
}
