//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::adapters::csv_adapter::{read_column_pairs, CsvAdapter};
use crate::adapters::csv_export;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::html_report::HtmlReportAdapter;
use crate::domain::aggregate::aggregate_yearly;
use crate::domain::analysis::{
    run_analysis, Analysis, AnalysisSettings, AxisRange, DEFAULT_TEMPERATURE_RANGE,
    DEFAULT_YEAR_RANGE,
};
use crate::domain::config_validation::{validate_analysis_config, validate_data_config};
use crate::domain::error::ClimtrendError;
use crate::domain::regression::{fit, RegressionModel};
use crate::domain::series::CoordinateSeries;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::ClimateDataPort;
use crate::ports::report_port::ReportPort;

const DEFAULT_OUTPUT: &str = "report.html";

#[derive(Parser, Debug)]
#[command(name = "climtrend", about = "Climate trend regression analysis")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the full analysis and write an HTML report
    Analyze {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        daily: Option<PathBuf>,
        #[arg(long)]
        atmosphere: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also write yearly.csv and models.csv into this directory
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },
    /// Print yearly average temperatures
    Yearly {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        daily: Option<PathBuf>,
    },
    /// Fit a regression line through two numeric columns of a CSV file
    Fit {
        #[arg(short, long)]
        input: PathBuf,
        /// Zero-based index of the x column
        #[arg(long)]
        x_column: usize,
        /// Zero-based index of the y column
        #[arg(long)]
        y_column: usize,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the default level.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("climtrend=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            config,
            daily,
            atmosphere,
            output,
            export_dir,
        } => run_analyze(
            config.as_deref(),
            daily.as_deref(),
            atmosphere.as_deref(),
            output.as_deref(),
            export_dir.as_deref(),
        ),
        Command::Yearly { config, daily } => run_yearly(config.as_deref(), daily.as_deref()),
        Command::Fit {
            input,
            x_column,
            y_column,
        } => run_fit(&input, x_column, y_column),
        Command::Validate { config } => run_validate(&config),
    }
}

fn fail(err: ClimtrendError) -> ExitCode {
    eprintln!("error: {err}");
    (&err).into()
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ClimtrendError> {
    FileConfigAdapter::from_file(path).map_err(|e| ClimtrendError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn load_optional_config(path: Option<&Path>) -> Result<FileConfigAdapter, ClimtrendError> {
    match path {
        Some(p) => {
            info!(path = %p.display(), "loading config");
            load_config(p)
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

pub fn build_settings(config: &dyn ConfigPort) -> Result<AnalysisSettings, ClimtrendError> {
    validate_analysis_config(config)?;

    let range = |prefix: &str, default: AxisRange| {
        AxisRange::new(
            config.get_double("analysis", &format!("{prefix}_min"), default.min),
            config.get_double("analysis", &format!("{prefix}_max"), default.max),
        )
    };

    let year_range = range("year_range", DEFAULT_YEAR_RANGE);
    let temperature_range = range("temperature_range", DEFAULT_TEMPERATURE_RANGE);

    Ok(AnalysisSettings {
        city: config
            .get_string("analysis", "city")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| AnalysisSettings::default().city),
        year_range,
        temperature_range,
    })
}

fn resolve_path(
    override_path: Option<&Path>,
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<PathBuf, ClimtrendError> {
    override_path
        .map(Path::to_path_buf)
        .or_else(|| config.get_path(section, key))
        .ok_or_else(|| ClimtrendError::ConfigMissing {
            section: section.into(),
            key: key.into(),
        })
}

/// `(daily_csv, atmosphere_csv)`; command-line paths take precedence.
pub fn resolve_data_paths(
    config: &dyn ConfigPort,
    daily: Option<&Path>,
    atmosphere: Option<&Path>,
) -> Result<(PathBuf, PathBuf), ClimtrendError> {
    Ok((
        resolve_path(daily, config, "data", "daily_csv")?,
        resolve_path(atmosphere, config, "data", "atmosphere_csv")?,
    ))
}

pub fn resolve_output(config: &dyn ConfigPort, output: Option<&Path>) -> PathBuf {
    output
        .map(Path::to_path_buf)
        .or_else(|| config.get_path("report", "output"))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
}

fn build_report_adapter(config: &dyn ConfigPort) -> Result<HtmlReportAdapter, ClimtrendError> {
    match config.get_path("report", "template_path") {
        Some(path) => {
            info!(path = %path.display(), "using custom report template");
            HtmlReportAdapter::from_template_file(&path)
        }
        None => Ok(HtmlReportAdapter::new()),
    }
}

/// Ingest → analyse → report, optionally exporting CSV summaries.
pub fn run_analysis_pipeline(
    data_port: &dyn ClimateDataPort,
    report_port: &dyn ReportPort,
    settings: &AnalysisSettings,
    output_path: &Path,
    export_dir: Option<&Path>,
) -> Result<Analysis, ClimtrendError> {
    // Stage 1: Ingest
    let daily = data_port.fetch_daily_temperatures()?;
    let atmosphere = data_port.fetch_atmosphere()?;

    // Stage 2: Aggregate, fit, chain
    let analysis = run_analysis(&daily, &atmosphere, settings)?;
    for skipped in &analysis.skipped {
        warn!(panel = %skipped.kind, reason = %skipped.reason, "panel skipped");
    }

    // Stage 3: Report
    report_port.write(&analysis, output_path)?;

    // Stage 4: Optional exports
    if let Some(dir) = export_dir {
        csv_export::write_yearly(&dir.join("yearly.csv"), &analysis.yearly)?;
        csv_export::write_models(&dir.join("models.csv"), &analysis)?;
        info!(dir = %dir.display(), "exported yearly and model summaries");
    }

    Ok(analysis)
}

pub fn print_summary(analysis: &Analysis) {
    if let (Some(first), Some(last)) = (analysis.yearly.first(), analysis.yearly.last()) {
        eprintln!(
            "\n=== {} ({} to {}, {} years) ===",
            analysis.city,
            first.year,
            last.year,
            analysis.yearly.len()
        );
    }
    for panel in &analysis.panels {
        let m = &panel.model;
        eprintln!(
            "{:<34} slope {:>9.3}  intercept {:>10.3}  r {:>6.3}  R^2 {:>6.3}",
            panel.kind.label(),
            m.slope,
            m.intercept,
            m.correlation,
            m.r_squared
        );
    }
    for skipped in &analysis.skipped {
        eprintln!("{:<34} skipped: {}", skipped.kind.label(), skipped.reason);
    }
}

fn run_analyze(
    config_path: Option<&Path>,
    daily: Option<&Path>,
    atmosphere: Option<&Path>,
    output: Option<&Path>,
    export_dir: Option<&Path>,
) -> ExitCode {
    let config = match load_optional_config(config_path) {
        Ok(c) => c,
        Err(e) => return fail(e),
    };
    let settings = match build_settings(&config) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };
    let (daily_path, atmosphere_path) = match resolve_data_paths(&config, daily, atmosphere) {
        Ok(p) => p,
        Err(e) => return fail(e),
    };
    let report = match build_report_adapter(&config) {
        Ok(r) => r,
        Err(e) => return fail(e),
    };
    let output_path = resolve_output(&config, output);

    let data_port = CsvAdapter::new(daily_path, atmosphere_path);
    match run_analysis_pipeline(&data_port, &report, &settings, &output_path, export_dir) {
        Ok(analysis) => {
            print_summary(&analysis);
            eprintln!("\nReport written to: {}", output_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn run_yearly(config_path: Option<&Path>, daily: Option<&Path>) -> ExitCode {
    let config = match load_optional_config(config_path) {
        Ok(c) => c,
        Err(e) => return fail(e),
    };
    let daily_path = match resolve_path(daily, &config, "data", "daily_csv") {
        Ok(p) => p,
        Err(e) => return fail(e),
    };

    // Only the daily file is read; the atmosphere path is never opened.
    let data_port = CsvAdapter::new(daily_path, PathBuf::new());
    let yearly = match data_port
        .fetch_daily_temperatures()
        .and_then(|samples| aggregate_yearly(&samples))
    {
        Ok(y) => y,
        Err(e) => return fail(e),
    };

    println!("year,mean_temperature,samples");
    for y in &yearly {
        println!("{},{:.3},{}", y.year, y.mean_value, y.sample_count);
    }
    ExitCode::SUCCESS
}

/// Fits `y_column` against `x_column` of a headed CSV file. Rows where either
/// column is blank are skipped.
pub fn fit_columns(
    path: &Path,
    x_column: usize,
    y_column: usize,
) -> Result<RegressionModel, ClimtrendError> {
    let series = CoordinateSeries::from_pairs(read_column_pairs(path, x_column, y_column)?)?;
    fit(&series)
}

fn run_fit(input: &Path, x_column: usize, y_column: usize) -> ExitCode {
    match fit_columns(input, x_column, y_column) {
        Ok(model) => {
            for (name, value) in model.fields() {
                println!("{name}: {value}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn run_validate(config_path: &Path) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => return fail(e),
    };

    if let Err(e) = validate_data_config(&config) {
        return fail(e);
    }
    let settings = match build_settings(&config) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };

    eprintln!("  city:              {}", settings.city);
    eprintln!(
        "  year range:        {} to {}",
        settings.year_range.min, settings.year_range.max
    );
    eprintln!(
        "  temperature range: {} to {}",
        settings.temperature_range.min, settings.temperature_range.max
    );
    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}
