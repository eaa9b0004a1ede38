//! Charts module - Boxplot rendering

mod plotter;

pub use plotter::{BoxplotRenderer, PlotError};
