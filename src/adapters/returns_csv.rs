//! CSV export of daily strategy returns and growth curves.

use std::fs;
use std::path::Path;

use crate::domain::backtest::Report;
use crate::domain::error::CapspreadError;
use crate::domain::series::common_dates;

/// One row per date shared by every strategy series:
/// `date,<label>_return,<label>_growth,...`
pub fn write_returns_csv(report: &Report, output_path: &Path) -> Result<(), CapspreadError> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut wtr = csv::Writer::from_path(output_path).map_err(csv_err)?;

    let mut header = vec!["date".to_string()];
    for s in &report.strategies {
        header.push(format!("{}_return", s.kind.label()));
        header.push(format!("{}_growth", s.kind.label()));
    }
    wtr.write_record(&header).map_err(csv_err)?;

    let columns: Vec<_> = report
        .strategies
        .iter()
        .flat_map(|s| [&s.returns, &s.growth])
        .collect();
    for date in common_dates(&columns) {
        let mut row = vec![date.to_string()];
        row.extend(
            columns
                .iter()
                .filter_map(|c| c.get(date))
                .map(|v| v.to_string()),
        );
        wtr.write_record(&row).map_err(csv_err)?;
    }

    wtr.flush()?;
    Ok(())
}

fn csv_err(e: csv::Error) -> CapspreadError {
    CapspreadError::Io(std::io::Error::other(e))
}
