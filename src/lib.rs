//! Synthetic activity logs for debt-collection case processing.
//!
//! [`generate::generate`] builds the shuffled log for a
//! [`config::GeneratorConfig`]; [`output::write_csv`] writes it out.

pub mod activity;
pub mod calendar;
pub mod chain;
pub mod config;
pub mod delay;
pub mod generate;
pub mod output;
pub mod rng;

pub use activity::{ActivityRecord, ActivityType};
pub use config::GeneratorConfig;
pub use generate::{Dataset, Summary, generate};
