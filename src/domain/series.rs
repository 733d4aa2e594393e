//! Date-indexed numeric series and inner-join alignment.
//!
//! A [`Series`] maps trading dates to values with dates kept in ascending
//! order. Prices, daily returns, strategy returns and growth curves all use
//! the same type. A [`SeriesTable`] keys series by ticker.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    points: BTreeMap<NaiveDate, f64>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: NaiveDate, value: f64) -> Option<f64> {
        self.points.insert(date, value)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.points.get(&date).copied()
    }

    /// (date, value) pairs in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.points.iter().map(|(&d, &v)| (d, v))
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.keys().copied()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.values().copied().collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.keys().next_back().copied()
    }

    /// Restrict to the given dates. Dates absent from this series are skipped.
    pub fn restrict_to(&self, dates: &[NaiveDate]) -> Series {
        dates
            .iter()
            .filter_map(|&d| self.get(d).map(|v| (d, v)))
            .collect()
    }
}

impl FromIterator<(NaiveDate, f64)> for Series {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, f64)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// Dates present in every input series, ascending. No inputs → no dates.
pub fn common_dates(series: &[&Series]) -> Vec<NaiveDate> {
    let Some((first, rest)) = series.split_first() else {
        return Vec::new();
    };
    let mut dates: BTreeSet<NaiveDate> = first.dates().collect();
    for s in rest {
        dates.retain(|d| s.points.contains_key(d));
    }
    dates.into_iter().collect()
}

/// Apply `f` pointwise over the inner join of the inputs. `f` receives the
/// values in input order.
pub fn combine<F>(series: &[&Series], f: F) -> Series
where
    F: Fn(&[f64]) -> f64,
{
    let dates = common_dates(series);
    let mut row = Vec::with_capacity(series.len());
    dates
        .into_iter()
        .map(|d| {
            row.clear();
            // common_dates guarantees presence
            row.extend(series.iter().filter_map(|s| s.get(d)));
            (d, f(&row))
        })
        .collect()
}

/// Ticker-keyed collection of series.
#[derive(Debug, Clone, Default)]
pub struct SeriesTable {
    columns: BTreeMap<String, Series>,
}

impl SeriesTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ticker: impl Into<String>, series: Series) {
        self.columns.insert(ticker.into(), series);
    }

    pub fn get(&self, ticker: &str) -> Option<&Series> {
        self.columns.get(ticker)
    }

    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Dates shared by every column.
    pub fn common_dates(&self) -> Vec<NaiveDate> {
        let refs: Vec<&Series> = self.columns.values().collect();
        common_dates(&refs)
    }

    /// Every column restricted to the dates shared by all columns.
    pub fn aligned(&self) -> SeriesTable {
        let dates = self.common_dates();
        SeriesTable {
            columns: self
                .columns
                .iter()
                .map(|(t, s)| (t.clone(), s.restrict_to(&dates)))
                .collect(),
        }
    }

    /// Apply `f` to every column, keeping tickers.
    pub fn map<F>(&self, f: F) -> SeriesTable
    where
        F: Fn(&Series) -> Series,
    {
        SeriesTable {
            columns: self
                .columns
                .iter()
                .map(|(t, s)| (t.clone(), f(s)))
                .collect(),
        }
    }
}
