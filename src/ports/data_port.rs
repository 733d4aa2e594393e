//! Market data access port.

use crate::domain::error::CapspreadError;
use crate::domain::series::Series;
use chrono::NaiveDate;

pub trait DataPort {
    /// Adjusted closing prices for `ticker` on trading dates in
    /// `[start_date, end_date)`, ascending.
    fn fetch_adjusted_close(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Series, CapspreadError>;

    fn list_symbols(&self) -> Result<Vec<String>, CapspreadError>;

    /// First date, last date and row count of everything stored for
    /// `ticker`, or `None` if nothing is stored.
    fn get_data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, CapspreadError>;
}
