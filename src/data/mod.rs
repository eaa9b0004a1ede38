//! Data module - CSV loading and validation

mod loader;

pub use loader::{numeric_column_names, DataLoader, LoaderError};
