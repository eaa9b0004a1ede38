//! Boxplot Renderer Module
//! Renders a box-and-whisker chart of the numeric columns to an image file
//! using plotters.

use log::{error, info};
use plotters::prelude::*;
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

use crate::data::numeric_column_names;

const CHART_SIZE: (u32, u32) = (900, 600);
const BOX_COLOR: RGBColor = RGBColor(52, 152, 219);

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("No data to visualize. Please load data first.")]
    NoData,
    #[error("No numerical columns found in the dataset.")]
    NoNumericColumns,
    #[error("Failed to render boxplot: {0}")]
    Render(String),
}

/// Renders one vertical boxplot per numeric column.
pub struct BoxplotRenderer;

impl BoxplotRenderer {
    /// Render the boxplot to `output_path`, overwriting any existing file.
    ///
    /// The raster format follows the output path's extension. An optional
    /// `column_filter` restricts which numeric columns are plotted.
    pub fn render(
        df: Option<&DataFrame>,
        output_path: &Path,
        column_filter: Option<&[String]>,
    ) -> Result<(), PlotError> {
        let df = df.ok_or_else(|| {
            error!("No data to visualize. Please load data first.");
            PlotError::NoData
        })?;

        let mut columns = numeric_column_names(df);
        if let Some(filter) = column_filter {
            columns.retain(|c| filter.iter().any(|f| f == c));
        }
        if columns.is_empty() {
            error!("No numerical columns found in the dataset.");
            return Err(PlotError::NoNumericColumns);
        }

        let series: Vec<(String, Vec<f64>)> = columns
            .into_iter()
            .map(|name| {
                let values = Self::column_values(df, &name);
                (name, values)
            })
            .filter(|(_, values)| !values.is_empty())
            .collect();
        if series.is_empty() {
            error!("No numerical columns found in the dataset.");
            return Err(PlotError::NoNumericColumns);
        }

        Self::draw(&series, output_path).map_err(|e| {
            error!("An error occurred while visualizing data: {e}");
            PlotError::Render(e.to_string())
        })?;

        info!("Data visualization saved as '{}'.", output_path.display());
        Ok(())
    }

    fn draw(
        series: &[(String, Vec<f64>)],
        output_path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let labels: Vec<String> = series.iter().map(|(name, _)| name.clone()).collect();
        let quartiles: Vec<Quartiles> = series
            .iter()
            .map(|(_, values)| Quartiles::new(values))
            .collect();

        let (y_min, y_max) = Self::y_range(&quartiles);

        let root = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Boxplot of Numerical Data", ("sans-serif", 24))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(labels[..].into_segmented(), y_min..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .y_desc("Value")
            .draw()?;

        chart.draw_series(labels.iter().zip(quartiles.iter()).map(|(label, quart)| {
            Boxplot::new_vertical(SegmentValue::CenterOf(label), quart)
                .width(30)
                .whisker_width(0.5)
                .style(BOX_COLOR)
        }))?;

        root.present()?;
        Ok(())
    }

    /// Y-axis range covering every box, padded by 10%.
    fn y_range(quartiles: &[Quartiles]) -> (f32, f32) {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for quart in quartiles {
            let values = quart.values();
            min = min.min(values[0]);
            max = max.max(values[4]);
        }
        let pad = (max - min).abs() * 0.1;
        if pad == 0.0 {
            (min - 1.0, max + 1.0)
        } else {
            (min - pad, max + pad)
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
}
