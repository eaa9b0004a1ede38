//! Stats module - Descriptive statistics and export

mod calculator;

pub use calculator::{ColumnStats, Statistics, StatsCalculator, StatsError};
