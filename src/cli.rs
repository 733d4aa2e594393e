//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::console_report;
use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::returns_csv::write_returns_csv;
use crate::adapters::svg_chart::SvgChartAdapter;
use crate::domain::backtest::{self as backtest_engine, BacktestConfig, Report};
use crate::domain::config_validation::build_backtest_config;
use crate::domain::error::CapspreadError;
use crate::ports::chart_port::{Chart, ChartPort, ChartSeries};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_CHART_PATH: &str = "cumulative_returns.svg";
pub const CHART_TITLE: &str = "Cumulative Returns: Standard vs. Modified Strategy";
pub const CHART_Y_LABEL: &str = "Growth of 1 unit";

#[derive(Parser, Debug)]
#[command(
    name = "capspread",
    about = "Small-cap vs. large-cap spread strategy backtester"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run both spread strategies and print their annualized metrics
    Backtest {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Directory holding one <TICKER>.csv price file per ticker
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
        /// Where to write the cumulative growth chart (SVG)
        #[arg(long)]
        chart: Option<PathBuf>,
        /// Also write daily strategy returns and growth to this CSV file
        #[arg(long)]
        returns_csv: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the stored date range for each ticker in the universe
    Info {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            data_dir,
            chart,
            returns_csv,
            dry_run,
        } => run_backtest(
            config.as_ref(),
            data_dir.as_ref(),
            chart.as_ref(),
            returns_csv.as_ref(),
            dry_run,
        ),
        Command::Info { config, data_dir } => run_info(config.as_ref(), data_dir.as_ref()),
    }
}

pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, CapspreadError> {
    match path {
        Some(p) => {
            eprintln!("Loading config from {}", p.display());
            FileConfigAdapter::from_file(p)
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

/// Command-line value, then `[section] key`, then the built-in default.
pub fn resolve_path(
    cli_value: Option<&PathBuf>,
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: &str,
) -> PathBuf {
    cli_value
        .cloned()
        .or_else(|| config.get_string(section, key).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(default))
}

fn run_backtest(
    config_path: Option<&PathBuf>,
    data_dir: Option<&PathBuf>,
    chart_path: Option<&PathBuf>,
    returns_csv: Option<&PathBuf>,
    dry_run: bool,
) -> ExitCode {
    // Stage 1: Load and validate config
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let bt_config = match build_backtest_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let data_dir = resolve_path(data_dir, &adapter, "data", "dir", DEFAULT_DATA_DIR);
    let chart_path = resolve_path(
        chart_path,
        &adapter,
        "report",
        "chart_path",
        DEFAULT_CHART_PATH,
    );

    if dry_run {
        print_dry_run(&bt_config, &data_dir, &chart_path);
        return ExitCode::SUCCESS;
    }

    // Stages 2-5: fetch, compute, chart, report
    let data_port = CsvAdapter::new(data_dir);
    let chart_port = SvgChartAdapter::new();
    run_backtest_pipeline(
        &data_port,
        &chart_port,
        &bt_config,
        &chart_path,
        returns_csv.map(PathBuf::as_path),
    )
}

fn print_dry_run(config: &BacktestConfig, data_dir: &Path, chart_path: &Path) {
    eprintln!("Configuration:");
    eprintln!("  window:           {} to {} (exclusive)", config.start_date, config.end_date);
    eprintln!("  periods per year: {}", config.periods_per_year);
    eprintln!("  small cap:        {}", config.universe.small_cap);
    eprintln!("  large cap:        {}", config.universe.large_cap);
    eprintln!("  basket:           {}", config.universe.basket.join(", "));
    eprintln!("  data dir:         {}", data_dir.display());
    eprintln!("  chart:            {}", chart_path.display());
    eprintln!("\nDry run complete: configuration is valid");
}

pub fn growth_chart(report: &Report) -> Chart {
    Chart {
        title: CHART_TITLE.to_string(),
        y_label: CHART_Y_LABEL.to_string(),
        series: report
            .strategies
            .iter()
            .map(|s| ChartSeries {
                name: s.kind.label().to_string(),
                points: s.growth.clone(),
            })
            .collect(),
    }
}

pub fn run_backtest_pipeline(
    data_port: &dyn DataPort,
    chart_port: &dyn ChartPort,
    bt_config: &BacktestConfig,
    chart_path: &Path,
    returns_csv: Option<&Path>,
) -> ExitCode {
    eprintln!(
        "Fetching {} tickers, {} to {}",
        bt_config.universe.count(),
        bt_config.start_date,
        bt_config.end_date,
    );

    let report = match backtest_engine::run(data_port, bt_config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("  Aligned on {} trading days", report.aligned_days);

    if let Err(e) = chart_port.render(&growth_chart(&report), chart_path) {
        eprintln!("error: failed to write chart: {e}");
        return (&e).into();
    }
    eprintln!("Chart written to: {}", chart_path.display());

    if let Some(path) = returns_csv {
        if let Err(e) = write_returns_csv(&report, path) {
            eprintln!("error: failed to write returns: {e}");
            return (&e).into();
        }
        eprintln!("Returns written to: {}", path.display());
    }

    print!("{}", console_report::format_report(&report));
    ExitCode::SUCCESS
}

fn run_info(config_path: Option<&PathBuf>, data_dir: Option<&PathBuf>) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let bt_config = match build_backtest_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let data_dir = resolve_path(data_dir, &adapter, "data", "dir", DEFAULT_DATA_DIR);
    let data_port = CsvAdapter::new(data_dir);

    print_data_ranges(&data_port, &bt_config.universe.all_tickers())
}

/// Stored symbols that are not part of `tickers`, sorted.
pub fn unused_symbols(
    data_port: &dyn DataPort,
    tickers: &[String],
) -> Result<Vec<String>, CapspreadError> {
    let mut symbols = data_port.list_symbols()?;
    symbols.retain(|s| !tickers.contains(s));
    symbols.sort();
    Ok(symbols)
}

pub fn print_data_ranges(data_port: &dyn DataPort, tickers: &[String]) -> ExitCode {
    match unused_symbols(data_port, tickers) {
        Ok(unused) if !unused.is_empty() => {
            eprintln!("Also stored, outside the universe: {}", unused.join(", "));
        }
        Ok(_) => {}
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    let mut missing = 0usize;
    for ticker in tickers {
        match data_port.get_data_range(ticker) {
            Ok(Some((min_date, max_date, count))) => {
                println!("{}: {} rows, {} to {}", ticker, count, min_date, max_date);
            }
            Ok(None) => {
                eprintln!("{}: no data found", ticker);
                missing += 1;
            }
            Err(e) => {
                eprintln!("error querying {}: {}", ticker, e);
                missing += 1;
            }
        }
    }
    if missing > 0 {
        ExitCode::from(5)
    } else {
        ExitCode::SUCCESS
    }
}
