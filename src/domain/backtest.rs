//! Spread backtest pipeline.
//!
//! [`run`] fetches adjusted closes for the whole universe, aligns them on
//! their common trading days, and derives both strategy return series, their
//! growth curves and annualized metrics.

use chrono::NaiveDate;

use crate::domain::error::CapspreadError;
use crate::domain::metrics::{AnnualizedMetrics, TRADING_DAYS_PER_YEAR};
use crate::domain::returns::{cumulative_growth, equal_weight, pct_change};
use crate::domain::series::{Series, SeriesTable};
use crate::domain::strategy::{synthesize, StrategyKind};
use crate::domain::universe::Universe;
use crate::ports::data_port::DataPort;

pub const DEFAULT_START_DATE: (i32, u32, u32) = (2023, 1, 1);
pub const DEFAULT_END_DATE: (i32, u32, u32) = (2024, 1, 1);

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub start_date: NaiveDate,
    /// Exclusive.
    pub end_date: NaiveDate,
    pub periods_per_year: f64,
    pub universe: Universe,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            start_date: ymd(DEFAULT_START_DATE),
            end_date: ymd(DEFAULT_END_DATE),
            periods_per_year: TRADING_DAYS_PER_YEAR,
            universe: Universe::default(),
        }
    }
}

fn ymd((y, m, d): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyResult {
    pub kind: StrategyKind,
    pub returns: Series,
    pub growth: Series,
    pub metrics: AnnualizedMetrics,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub periods_per_year: f64,
    /// Trading days shared by every ticker's price series.
    pub aligned_days: usize,
    pub basket_returns: Series,
    /// Standard, then Modified.
    pub strategies: Vec<StrategyResult>,
}

impl Report {
    pub fn strategy(&self, kind: StrategyKind) -> Option<&StrategyResult> {
        self.strategies.iter().find(|s| s.kind == kind)
    }
}

/// Fetch every ticker in the universe and align on common dates. Any fetch
/// failure or empty series aborts the whole run.
pub fn fetch_price_table(
    data_port: &dyn DataPort,
    tickers: &[String],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<SeriesTable, CapspreadError> {
    let mut table = SeriesTable::new();
    for ticker in tickers {
        let prices = data_port.fetch_adjusted_close(ticker, start_date, end_date)?;
        if prices.is_empty() {
            return Err(CapspreadError::data(
                ticker,
                format!("no prices between {} and {}", start_date, end_date),
            ));
        }
        table.insert(ticker.clone(), prices);
    }
    Ok(table.aligned())
}

/// Run both strategies over `prices`, inner-joined on their common dates
/// before any returns are taken.
pub fn run_on_prices(
    prices: &SeriesTable,
    config: &BacktestConfig,
) -> Result<Report, CapspreadError> {
    let prices = prices.aligned();
    let aligned_days = prices.common_dates().len();
    if aligned_days < 2 {
        return Err(CapspreadError::InsufficientData { days: aligned_days });
    }

    let returns = prices.map(pct_change);
    let column = |ticker: &str| {
        returns
            .get(ticker)
            .ok_or_else(|| CapspreadError::data(ticker, "missing from price table"))
    };

    let universe = &config.universe;
    let small = column(universe.small_cap.as_str())?;
    let large = column(universe.large_cap.as_str())?;
    let constituents = universe
        .basket
        .iter()
        .map(|t| column(t.as_str()))
        .collect::<Result<Vec<_>, _>>()?;

    let basket_returns = equal_weight(&constituents);
    let synthesized = synthesize(small, large, &basket_returns);

    let strategies = StrategyKind::ALL
        .iter()
        .map(|&kind| {
            let daily = synthesized.get(kind).clone();
            let metrics = AnnualizedMetrics::compute(&daily.values(), config.periods_per_year);
            StrategyResult {
                kind,
                growth: cumulative_growth(&daily),
                returns: daily,
                metrics,
            }
        })
        .collect();

    Ok(Report {
        start_date: config.start_date,
        end_date: config.end_date,
        periods_per_year: config.periods_per_year,
        aligned_days,
        basket_returns,
        strategies,
    })
}

/// Fetch, transform and measure.
pub fn run(data_port: &dyn DataPort, config: &BacktestConfig) -> Result<Report, CapspreadError> {
    let tickers = config.universe.all_tickers();
    let prices = fetch_price_table(data_port, &tickers, config.start_date, config.end_date)?;
    run_on_prices(&prices, config)
}
