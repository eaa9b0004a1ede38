//! tabstats - CSV summary statistics & boxplot generation
//!
//! Loads a comma-delimited dataset, computes mean, median, and mode for
//! every numeric column, exports the results to CSV, and renders a
//! boxplot of the numeric columns.

pub mod charts;
pub mod data;
pub mod stats;
