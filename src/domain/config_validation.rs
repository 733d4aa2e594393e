//! Configuration validation and construction of [`BacktestConfig`].
//!
//! Every key is optional; absent keys fall back to the built-in window,
//! universe and trading-day count.

use crate::domain::backtest::BacktestConfig;
use crate::domain::error::CapspreadError;
use crate::domain::universe::{parse_codes, Universe};
use crate::ports::config_port::ConfigPort;

pub fn build_backtest_config(config: &dyn ConfigPort) -> Result<BacktestConfig, CapspreadError> {
    let defaults = BacktestConfig::default();

    let start_date = config
        .get_date("backtest", "start_date")?
        .unwrap_or(defaults.start_date);
    let end_date = config
        .get_date("backtest", "end_date")?
        .unwrap_or(defaults.end_date);
    if start_date >= end_date {
        return Err(invalid(
            "backtest",
            "start_date",
            "start_date must be before end_date",
        ));
    }

    let periods_per_year = config
        .get_double("backtest", "periods_per_year")?
        .unwrap_or(defaults.periods_per_year);
    if periods_per_year <= 0.0 || !periods_per_year.is_finite() {
        return Err(invalid(
            "backtest",
            "periods_per_year",
            "periods_per_year must be positive",
        ));
    }

    let universe = build_universe(config, defaults.universe)?;

    Ok(BacktestConfig {
        start_date,
        end_date,
        periods_per_year,
        universe,
    })
}

fn build_universe(config: &dyn ConfigPort, defaults: Universe) -> Result<Universe, CapspreadError> {
    let small_cap = ticker(config, "small_cap")?.unwrap_or(defaults.small_cap);
    let large_cap = ticker(config, "large_cap")?.unwrap_or(defaults.large_cap);
    let basket = match config.get_string("universe", "basket") {
        Some(raw) => {
            parse_codes(&raw).map_err(|e| invalid("universe", "basket", &e.to_string()))?
        }
        None => defaults.basket,
    };

    let universe = Universe {
        small_cap,
        large_cap,
        basket,
    };
    universe
        .validate()
        .map_err(|e| invalid("universe", "basket", &e.to_string()))?;
    Ok(universe)
}

fn ticker(config: &dyn ConfigPort, key: &str) -> Result<Option<String>, CapspreadError> {
    match config.get_string("universe", key) {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Err(invalid("universe", key, "ticker must not be empty")),
        Some(s) => Ok(Some(s.trim().to_uppercase())),
    }
}

fn invalid(section: &str, key: &str, reason: &str) -> CapspreadError {
    CapspreadError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;
    use chrono::NaiveDate;

    fn config(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn empty_config_uses_defaults() {
        let c = build_backtest_config(&config("[backtest]\n")).unwrap();
        assert_eq!(c, BacktestConfig::default());
    }

    #[test]
    fn overrides_window_and_periods() {
        let c = build_backtest_config(&config(
            "[backtest]\nstart_date = 2022-03-01\nend_date = 2022-09-01\nperiods_per_year = 250\n",
        ))
        .unwrap();
        assert_eq!(c.start_date, NaiveDate::from_ymd_opt(2022, 3, 1).unwrap());
        assert_eq!(c.end_date, NaiveDate::from_ymd_opt(2022, 9, 1).unwrap());
        assert_eq!(c.periods_per_year, 250.0);
    }

    #[test]
    fn rejects_bad_date_format() {
        let err = build_backtest_config(&config("[backtest]\nstart_date = 2022/03/01\n"))
            .unwrap_err();
        assert!(matches!(err, CapspreadError::ConfigInvalid { key, .. } if key == "start_date"));
    }

    #[test]
    fn rejects_inverted_window() {
        let err = build_backtest_config(&config(
            "[backtest]\nstart_date = 2024-01-01\nend_date = 2023-01-01\n",
        ))
        .unwrap_err();
        assert!(matches!(err, CapspreadError::ConfigInvalid { key, .. } if key == "start_date"));
    }

    #[test]
    fn rejects_non_positive_periods() {
        let err = build_backtest_config(&config("[backtest]\nperiods_per_year = 0\n"))
            .unwrap_err();
        assert!(
            matches!(err, CapspreadError::ConfigInvalid { key, .. } if key == "periods_per_year")
        );
    }

    #[test]
    fn rejects_mistyped_periods() {
        let err = build_backtest_config(&config("[backtest]\nperiods_per_year = 25O\n"))
            .unwrap_err();
        assert!(
            matches!(err, CapspreadError::ConfigInvalid { key, .. } if key == "periods_per_year")
        );
    }

    #[test]
    fn overrides_universe() {
        let c = build_backtest_config(&config(
            "[universe]\nsmall_cap = iwm\nlarge_cap = spy\nbasket = aapl, msft\n",
        ))
        .unwrap();
        assert_eq!(c.universe.small_cap, "IWM");
        assert_eq!(c.universe.large_cap, "SPY");
        assert_eq!(c.universe.basket, vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn rejects_duplicate_basket_ticker() {
        let err = build_backtest_config(&config("[universe]\nbasket = AAPL,AAPL\n")).unwrap_err();
        assert!(matches!(err, CapspreadError::ConfigInvalid { key, .. } if key == "basket"));
    }

    #[test]
    fn rejects_index_in_basket() {
        let err =
            build_backtest_config(&config("[universe]\nbasket = AAPL,^GSPC\n")).unwrap_err();
        assert!(matches!(err, CapspreadError::ConfigInvalid { reason, .. } if reason.contains("^GSPC")));
    }
}
