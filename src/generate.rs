//! The generation pass: anchors, per-case events, employees, shuffle.

use anyhow::{Context, Result};
use rand::seq::{IndexedRandom, SliceRandom};

use crate::activity::{ActivityRecord, ActivityType};
use crate::calendar::AnchorCalendar;
use crate::chain::CaseChain;
use crate::config::{GeneratorConfig, span_days};
use crate::delay::EnforcementModel;
use crate::rng::{RandomSources, shuffle_rng};

/// Aggregate counts of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub cases: u32,
    pub rows: usize,
    pub enforcement_cases: u32,
    pub long_tail_cases: u32,
    /// Days in the generation window.
    pub window_days: usize,
    /// Cases anchored in the high-activity quarter.
    pub high_activity_cases: u32,
}

impl Summary {
    pub fn enforcement_rate(&self) -> f64 {
        ratio(self.enforcement_cases, self.cases)
    }

    /// Share of enforced cases whose delay fell in the long tail.
    pub fn long_tail_rate(&self) -> f64 {
        ratio(self.long_tail_cases, self.enforcement_cases)
    }

    pub fn high_activity_rate(&self) -> f64 {
        ratio(self.high_activity_cases, self.cases)
    }
}

fn ratio(num: u32, den: u32) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Shuffled records plus the counts collected while building them.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<ActivityRecord>,
    pub summary: Summary,
}

/// Build the whole log for `config`.
///
/// The configuration is validated first. With the same configuration the
/// result is identical from run to run.
pub fn generate(config: &GeneratorConfig) -> Result<Dataset> {
    config.validate()?;

    let calendar = AnchorCalendar::new(config)?;
    let enforcement = EnforcementModel::new(config)?;
    let mut rng = RandomSources::new(config.seed);

    // All anchors are drawn before any per-case draw.
    let anchors = calendar.sample(&mut rng.general, config.num_cases as usize);

    let mut summary = Summary {
        cases: config.num_cases,
        window_days: calendar.days().len(),
        ..Summary::default()
    };
    let mut records = Vec::with_capacity(config.num_cases as usize * 7);
    let mut events = Vec::with_capacity(7);

    for (case_id, anchor) in (1..=config.num_cases).zip(anchors) {
        events.clear();
        events.push((ActivityType::WritReceived, anchor));
        if config.high_activity_quarter.contains(anchor) {
            summary.high_activity_cases += 1;
        }

        if let Some(delay) = enforcement.sample(&mut rng) {
            let date = anchor
                .checked_add(span_days(delay.days())?)
                .with_context(|| format!("case {case_id}: enforcement date out of range"))?;
            events.push((ActivityType::EnforcementOpened, date));
            summary.enforcement_cases += 1;
            if delay.is_long_tail() {
                summary.long_tail_cases += 1;
            }
        }

        let chain = CaseChain::sample(anchor, &config.chain, &mut rng.general)
            .with_context(|| format!("case {case_id}: anchor {anchor}"))?;
        events.extend([
            (ActivityType::WritSent, chain.writ_sent),
            (ActivityType::ClaimFiled, chain.claim_filed),
            (ActivityType::HearingScheduled, chain.hearing_scheduled),
            (ActivityType::DecisionMade, chain.decision_made),
            (ActivityType::DecisionReceived, chain.decision_received),
        ]);

        for &(activity_type, activity_date) in &events {
            let employee = config
                .employees
                .choose(&mut rng.general)
                .context("employee roster is empty")?;
            records.push(ActivityRecord {
                case_id,
                activity_type,
                activity_date,
                employee: employee.clone(),
            });
        }
    }

    shuffle_records(&mut records, config.seed);
    summary.rows = records.len();
    Ok(Dataset { records, summary })
}

/// Permute all rows with the run's dedicated shuffle stream.
pub fn shuffle_records(records: &mut [ActivityRecord], seed: u64) {
    records.shuffle(&mut shuffle_rng(seed));
}
