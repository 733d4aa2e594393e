//! Configuration access port trait.

use crate::domain::error::CapspreadError;
use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;

    /// A YYYY-MM-DD date, or `None` if the key is absent.
    fn get_date(&self, section: &str, key: &str) -> Result<Option<NaiveDate>, CapspreadError> {
        let Some(raw) = self.get_string(section, key) else {
            return Ok(None);
        };
        NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
            .map(Some)
            .map_err(|_| CapspreadError::ConfigInvalid {
                section: section.into(),
                key: key.into(),
                reason: "invalid date format (expected YYYY-MM-DD)".into(),
            })
    }

    /// A floating-point value, or `None` if the key is absent. A present
    /// value that does not parse is an error.
    fn get_double(&self, section: &str, key: &str) -> Result<Option<f64>, CapspreadError> {
        let Some(raw) = self.get_string(section, key) else {
            return Ok(None);
        };
        raw.trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| CapspreadError::ConfigInvalid {
                section: section.into(),
                key: key.into(),
                reason: format!("expected a number, got {:?}", raw),
            })
    }
}
