//! Statistics Calculator Module
//! Computes mean, median, and mode for the numeric columns of a dataset
//! and handles export of the results.

use log::{error, info};
use polars::prelude::*;
use std::fmt;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

use crate::data::numeric_column_names;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("No data to process. Please load data first.")]
    NoData,
    #[error("No numerical columns found in the dataset.")]
    NoNumericColumns,
    #[error("No statistics to export. Please compute statistics first.")]
    NoStatistics,
    #[error("Failed to export statistics: {0}")]
    Export(String),
}

/// Mean, median, and mode for one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub column: String,
    pub mean: f64,
    pub median: f64,
    pub mode: f64,
}

/// Computed statistics, one entry per numeric column in source order.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    entries: Vec<ColumnStats>,
}

impl Statistics {
    /// Iterate entries in source column order.
    pub fn columns(&self) -> impl Iterator<Item = &ColumnStats> {
        self.entries.iter()
    }

    pub fn get(&self, column: &str) -> Option<&ColumnStats> {
        self.entries.iter().find(|e| e.column == column)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .entries
            .iter()
            .map(|e| e.column.len())
            .max()
            .unwrap_or(0)
            .max("column".len());
        writeln!(
            f,
            "{:<width$}  {:>12}  {:>12}  {:>12}",
            "column", "mean", "median", "mode"
        )?;
        for e in &self.entries {
            writeln!(
                f,
                "{:<width$}  {:>12.4}  {:>12.4}  {:>12.4}",
                e.column, e.mean, e.median, e.mode
            )?;
        }
        Ok(())
    }
}

/// Computes descriptive statistics and caches the most recent result.
pub struct StatsCalculator {
    statistics: Option<Statistics>,
}

impl Default for StatsCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsCalculator {
    pub fn new() -> Self {
        Self { statistics: None }
    }

    /// Compute mean, median, and mode for every numeric column.
    ///
    /// The result is cached on the calculator, replacing any prior one.
    pub fn compute_statistics(
        &mut self,
        df: Option<&DataFrame>,
    ) -> Result<&Statistics, StatsError> {
        let df = df.ok_or_else(|| {
            error!("No data to process. Please load data first.");
            StatsError::NoData
        })?;

        let numeric = numeric_column_names(df);
        if numeric.is_empty() {
            error!("No numerical columns found in the dataset.");
            return Err(StatsError::NoNumericColumns);
        }

        let mut entries = Vec::with_capacity(numeric.len());
        for name in numeric {
            let mut values = Self::column_values(df, &name);
            values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            entries.push(ColumnStats {
                column: name,
                mean: Self::mean(&values),
                median: Self::median(&values),
                mode: Self::mode(&values),
            });
        }

        info!("Statistics computed successfully.");
        Ok(self.statistics.insert(Statistics { entries }))
    }

    /// Get the most recently computed statistics, if any.
    pub fn get_statistics(&self) -> Option<&Statistics> {
        self.statistics.as_ref()
    }

    /// Export the cached statistics to a CSV file.
    ///
    /// Layout matches an index-style table: header `,mean,median,mode`,
    /// one row per numeric column with the column name as row label.
    /// Overwrites any existing file at `file_path`.
    pub fn export_statistics(&self, file_path: &Path) -> Result<(), StatsError> {
        let stats = self.statistics.as_ref().ok_or_else(|| {
            error!("No statistics to export. Please compute statistics first.");
            StatsError::NoStatistics
        })?;

        let names: Vec<String> = stats.columns().map(|e| e.column.clone()).collect();
        let means: Vec<f64> = stats.columns().map(|e| e.mean).collect();
        let medians: Vec<f64> = stats.columns().map(|e| e.median).collect();
        let modes: Vec<f64> = stats.columns().map(|e| e.mode).collect();

        let result = DataFrame::new(vec![
            Column::new("".into(), names),
            Column::new("mean".into(), means),
            Column::new("median".into(), medians),
            Column::new("mode".into(), modes),
        ])
        .and_then(|mut out| {
            let file = File::create(file_path)?;
            CsvWriter::new(file).finish(&mut out)
        })
        .map_err(|e| StatsError::Export(e.to_string()));

        match result {
            Ok(()) => {
                info!("Statistics exported successfully to {}", file_path.display());
                Ok(())
            }
            Err(e) => {
                error!("An error occurred while exporting statistics: {e}");
                Err(e)
            }
        }
    }

    /// Present (non-null, non-NaN) values of a column, cast to f64.
    fn column_values(df: &DataFrame, name: &str) -> Vec<f64> {
        df.column(name)
            .ok()
            .and_then(|col| col.cast(&DataType::Float64).ok())
            .and_then(|col| col.f64().ok().cloned())
            .map(|ca| ca.into_iter().flatten().filter(|v| !v.is_nan()).collect())
            .unwrap_or_default()
    }

    fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            return f64::NAN;
        }
        values.iter().sum::<f64>() / values.len() as f64
    }

    /// Middle of the sorted values; mean of the two middles for even counts.
    fn median(sorted: &[f64]) -> f64 {
        let n = sorted.len();
        if n == 0 {
            return f64::NAN;
        }
        if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        }
    }

    /// Most frequent value; ties resolve to the smallest tied value.
    fn mode(sorted: &[f64]) -> f64 {
        if sorted.is_empty() {
            return f64::NAN;
        }

        let mut best = sorted[0];
        let mut best_count = 0usize;
        let mut current = sorted[0];
        let mut count = 0usize;
        for &v in sorted {
            if v == current {
                count += 1;
            } else {
                if count > best_count {
                    best = current;
                    best_count = count;
                }
                current = v;
                count = 1;
            }
        }
        if count > best_count {
            best = current;
        }
        best
    }
}
