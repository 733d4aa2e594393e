//! CSV price-history adapter.
//!
//! Reads one `<TICKER>.csv` per ticker from a directory. Files use the usual
//! daily price-history export layout: a header row with a `Date` column and
//! an `Adj Close` column (`Close` is used when there is no adjusted column).

use crate::domain::error::CapspreadError;
use crate::domain::series::Series;
use crate::ports::config_port::DATE_FORMAT;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

const DATE_COLUMN: &str = "date";
const PRICE_COLUMNS: [&str; 3] = ["adj close", "adj_close", "close"];

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker))
    }

    /// Every row of the ticker's file, ascending by date.
    fn read_all(&self, ticker: &str) -> Result<Series, CapspreadError> {
        let path = self.csv_path(ticker);
        let content = fs::read_to_string(&path).map_err(|e| {
            CapspreadError::data(ticker, format!("failed to read {}: {}", path.display(), e))
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| CapspreadError::data(ticker, format!("CSV header error: {}", e)))?
            .clone();

        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let date_idx = column(DATE_COLUMN)
            .ok_or_else(|| CapspreadError::data(ticker, "missing Date column"))?;
        let price_idx = PRICE_COLUMNS
            .iter()
            .find_map(|&name| column(name))
            .ok_or_else(|| CapspreadError::data(ticker, "missing Adj Close column"))?;

        let mut series = Series::new();
        for result in rdr.records() {
            let record = result
                .map_err(|e| CapspreadError::data(ticker, format!("CSV parse error: {}", e)))?;

            let date_str = record.get(date_idx).unwrap_or("").trim();
            // exports sometimes carry a time component
            let date_str = date_str.split_whitespace().next().unwrap_or(date_str);
            let date = NaiveDate::parse_from_str(date_str, DATE_FORMAT).map_err(|e| {
                CapspreadError::data(ticker, format!("invalid date {:?}: {}", date_str, e))
            })?;

            let price_str = record.get(price_idx).unwrap_or("").trim();
            if price_str.is_empty() || price_str.eq_ignore_ascii_case("null") {
                continue;
            }
            let price: f64 = price_str.parse().map_err(|e| {
                CapspreadError::data(ticker, format!("invalid price {:?}: {}", price_str, e))
            })?;

            if series.insert(date, price).is_some() {
                return Err(CapspreadError::data(
                    ticker,
                    format!("duplicate row for {}", date),
                ));
            }
        }

        Ok(series)
    }
}

impl DataPort for CsvAdapter {
    fn fetch_adjusted_close(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Series, CapspreadError> {
        Ok(self
            .read_all(ticker)?
            .iter()
            .filter(|&(date, _)| date >= start_date && date < end_date)
            .collect())
    }

    fn list_symbols(&self) -> Result<Vec<String>, CapspreadError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| {
            CapspreadError::data(
                "*",
                format!(
                    "failed to read directory {}: {}",
                    self.base_path.display(),
                    e
                ),
            )
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| CapspreadError::data("*", format!("directory entry error: {}", e)))?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(ticker) = name_str.strip_suffix(".csv") {
                symbols.push(ticker.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, CapspreadError> {
        if !self.csv_path(ticker).exists() {
            return Ok(None);
        }
        let series = self.read_all(ticker)?;
        Ok(series
            .first_date()
            .zip(series.last_date())
            .map(|(first, last)| (first, last, series.len())))
    }
}
