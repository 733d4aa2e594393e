#![allow(dead_code)]

use capspread::domain::backtest::BacktestConfig;
use capspread::domain::error::CapspreadError;
use capspread::domain::series::Series;
use capspread::domain::universe::Universe;
use capspread::ports::chart_port::{Chart, ChartPort};
use capspread::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct MockDataPort {
    pub data: HashMap<String, Series>,
    pub errors: HashMap<String, String>,
    pub requests: RefCell<Vec<String>>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn with_prices(mut self, ticker: &str, prices: Series) -> Self {
        self.data.insert(ticker.to_string(), prices);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_adjusted_close(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Series, CapspreadError> {
        self.requests.borrow_mut().push(ticker.to_string());
        if let Some(reason) = self.errors.get(ticker) {
            return Err(CapspreadError::DataUnavailable {
                ticker: ticker.to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(ticker)
            .map(|s| {
                s.iter()
                    .filter(|&(d, _)| d >= start_date && d < end_date)
                    .collect::<Series>()
            })
            .unwrap_or_default())
    }

    fn list_symbols(&self) -> Result<Vec<String>, CapspreadError> {
        let mut symbols: Vec<_> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, CapspreadError> {
        Ok(self.data.get(ticker).and_then(|s| {
            s.first_date()
                .zip(s.last_date())
                .map(|(a, b)| (a, b, s.len()))
        }))
    }
}

/// Records every chart it is asked to render.
pub struct RecordingChartPort {
    pub rendered: RefCell<Vec<(Chart, PathBuf)>>,
}

impl RecordingChartPort {
    pub fn new() -> Self {
        Self {
            rendered: RefCell::new(Vec::new()),
        }
    }
}

impl ChartPort for RecordingChartPort {
    fn render(&self, chart: &Chart, output_path: &Path) -> Result<(), CapspreadError> {
        self.rendered
            .borrow_mut()
            .push((chart.clone(), output_path.to_path_buf()));
        Ok(())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Prices on consecutive January 2023 dates starting at the 3rd.
pub fn prices(values: &[f64]) -> Series {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| (date(2023, 1, 3 + i as u32), v))
        .collect()
}

/// Prices that realise the given daily returns from a base of 100.
pub fn prices_from_returns(returns: &[f64]) -> Series {
    let mut level = 100.0;
    let mut values = vec![level];
    for r in returns {
        level *= 1.0 + r;
        values.push(level);
    }
    prices(&values)
}

pub fn small_universe() -> Universe {
    Universe {
        small_cap: "SML".into(),
        large_cap: "LRG".into(),
        basket: vec!["AAA".into(), "BBB".into(), "CCC".into()],
    }
}

pub fn sample_config() -> BacktestConfig {
    BacktestConfig {
        universe: small_universe(),
        ..BacktestConfig::default()
    }
}
