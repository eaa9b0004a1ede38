//! CSV Data Loader Module
//! Handles CSV file loading and post-parse validation using Polars.

use log::{error, info};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("No data. File is empty.")]
    EmptyData,
    #[error("Error parsing data: {0}")]
    Parse(String),
    #[error("All values in the dataset are null.")]
    Validation,
}

/// Column names whose dtype is numeric.
pub fn numeric_column_names(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| {
            matches!(
                col.dtype(),
                DataType::Float32
                    | DataType::Float64
                    | DataType::Int8
                    | DataType::Int16
                    | DataType::Int32
                    | DataType::Int64
                    | DataType::UInt8
                    | DataType::UInt16
                    | DataType::UInt32
                    | DataType::UInt64
            )
        })
        .map(|col| col.name().to_string())
        .collect()
}

/// Owns the session's dataset: loads a CSV with Polars and validates it.
pub struct DataLoader {
    df: Option<DataFrame>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            file_path: None,
        }
    }

    /// Load a CSV file and validate its contents.
    ///
    /// Checks run in order: file existence, empty parse result, all-null
    /// dataset. Any other parse failure is surfaced as `Parse` with the
    /// underlying error text. On success the new DataFrame replaces any
    /// previously loaded one.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame, LoaderError> {
        if !file_path.is_file() {
            error!("File not found. Please check the file path.");
            return Err(LoaderError::NotFound(file_path.to_path_buf()));
        }

        // Use lazy evaluation for memory efficiency, then collect
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .finish()
            .and_then(|lf| lf.collect())
            .map_err(|e| match e {
                PolarsError::NoData(_) => {
                    error!("No data. File is empty.");
                    LoaderError::EmptyData
                }
                other => {
                    error!("Error parsing data. Please check the file format.");
                    LoaderError::Parse(other.to_string())
                }
            })?;

        Self::validate(&df)?;

        self.file_path = Some(file_path.to_path_buf());
        self.df = Some(df);
        info!("Data loaded successfully.");
        self.df.as_ref().ok_or(LoaderError::EmptyData)
    }

    /// Reject structurally empty or entirely-null datasets.
    fn validate(df: &DataFrame) -> Result<(), LoaderError> {
        if df.width() == 0 || df.height() == 0 {
            error!("No data. File is empty.");
            return Err(LoaderError::EmptyData);
        }
        if df.get_columns().iter().all(|c| c.null_count() == c.len()) {
            error!("All values in the dataset are null.");
            return Err(LoaderError::Validation);
        }
        Ok(())
    }

    /// Get list of column names from loaded DataFrame.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get list of numeric column names.
    pub fn get_numeric_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(numeric_column_names)
            .unwrap_or_default()
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get a reference to the loaded DataFrame.
    pub fn get_dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    /// Get file path.
    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_temp_csv(name: &str, contents: &str) -> PathBuf {
        let path =
            std::env::temp_dir().join(format!("tabstats_loader_{}_{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_csv() {
        let path = write_temp_csv("ok.csv", "A,B,C\n1,4,a\n2,4,b\n2,5,c\n3,6,d\n");
        let mut loader = DataLoader::new();
        loader.load_csv(&path).unwrap();

        assert_eq!(loader.get_row_count(), 4);
        assert_eq!(loader.get_columns(), vec!["A", "B", "C"]);
        assert_eq!(loader.get_numeric_columns(), vec!["A", "B"]);
        assert_eq!(loader.get_file_path(), Some(&path));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_file_not_found() {
        let mut loader = DataLoader::new();
        let err = loader
            .load_csv(Path::new("non_existent_file.csv"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::NotFound(_)));
        assert!(loader.get_dataframe().is_none());
    }

    #[test]
    fn test_empty_file() {
        let path = write_temp_csv("empty.csv", "");
        let mut loader = DataLoader::new();
        let err = loader.load_csv(&path).unwrap_err();
        assert!(matches!(err, LoaderError::EmptyData));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_header_only_file() {
        let path = write_temp_csv("header_only.csv", "A,B\n");
        let mut loader = DataLoader::new();
        let err = loader.load_csv(&path).unwrap_err();
        assert!(matches!(err, LoaderError::EmptyData));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_all_null_data() {
        let path = write_temp_csv("all_null.csv", "A,B\n,\n,\n");
        let mut loader = DataLoader::new();
        let err = loader.load_csv(&path).unwrap_err();
        assert!(matches!(err, LoaderError::Validation));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_malformed_rows() {
        // A row with more fields than the header makes the parse fail.
        let path = write_temp_csv("ragged.csv", "A,B\n1,2\n1,2,3,4\n");
        let mut loader = DataLoader::new();
        let err = loader.load_csv(&path).unwrap_err();
        assert!(matches!(err, LoaderError::Parse(_)));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_reload_replaces_dataset() {
        let first = write_temp_csv("first.csv", "A,B\n1,2\n3,4\n");
        let second = write_temp_csv("second.csv", "X\n10\n20\n30\n");
        let mut loader = DataLoader::new();

        loader.load_csv(&first).unwrap();
        assert_eq!(loader.get_columns(), vec!["A", "B"]);

        loader.load_csv(&second).unwrap();
        assert_eq!(loader.get_columns(), vec!["X"]);
        assert_eq!(loader.get_row_count(), 3);
        fs::remove_file(first).ok();
        fs::remove_file(second).ok();
    }
}
