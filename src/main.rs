//! tabstats - CSV summary statistics & boxplot CLI
//!
//! Loads a CSV file, prints mean/median/mode for its numeric columns,
//! saves a boxplot image, and exports the statistics to a CSV file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use tabstats::charts::BoxplotRenderer;
use tabstats::data::{DataLoader, LoaderError};
use tabstats::stats::StatsCalculator;

/// Validate that an input path points at an existing file.
fn existing_file(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("The file {value} does not exist"))
    }
}

/// Validate that an output path's parent directory exists.
fn writable_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => {
            Err(format!("The directory {} does not exist", dir.display()))
        }
        _ => Ok(path),
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "CSV summary statistics & boxplot CLI", long_about = None)]
struct Args {
    /// Input CSV file
    #[arg(value_parser = existing_file)]
    input_file: PathBuf,

    /// Output statistics file
    #[arg(
        long,
        default_value = "output/output_statistics.csv",
        value_parser = writable_path
    )]
    output: PathBuf,

    /// Output plot file
    #[arg(
        long,
        default_value = "output/data_boxplot.png",
        value_parser = writable_path
    )]
    plot: PathBuf,

    /// Restrict the boxplot to these numeric columns (comma-separated)
    #[arg(long, value_delimiter = ',')]
    columns: Option<Vec<String>>,
}

fn run(args: &Args) -> anyhow::Result<()> {
    let mut loader = DataLoader::new();
    loader.load_csv(&args.input_file)?;

    let mut calculator = StatsCalculator::new();
    let statistics = calculator.compute_statistics(loader.get_dataframe())?;
    println!("Computed Statistics:");
    print!("{statistics}");

    BoxplotRenderer::render(loader.get_dataframe(), &args.plot, args.columns.as_deref())?;
    calculator.export_statistics(&args.output)?;

    println!("\nData visualization saved as '{}'", args.plot.display());
    println!("Statistics exported to '{}'", args.output.display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if matches!(err.downcast_ref::<LoaderError>(), Some(LoaderError::NotFound(_))) {
                eprintln!("Error: {err}");
                eprintln!("Please make sure the CSV file exists in the specified path.");
            } else {
                eprintln!("An unexpected error occurred: {err}");
            }
            ExitCode::FAILURE
        }
    }
}
