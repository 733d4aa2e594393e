//! Plain-text metrics report for stdout.

use crate::domain::backtest::Report;
use crate::domain::metrics::AnnualizedMetrics;

/// Three-line block for one strategy, followed by a blank line.
pub fn format_metrics(name: &str, metrics: &AnnualizedMetrics) -> String {
    let sharpe = metrics
        .sharpe_ratio
        .map(|s| format!("{:.2}", s))
        .unwrap_or_else(|| "n/a".to_string());

    format!(
        "{}:\n  Annualized Return: {:.2}%\n  Annualized Vol   : {:.2}%\n  Sharpe Ratio     : {}\n\n",
        name,
        metrics.annualized_return * 100.0,
        metrics.annualized_volatility * 100.0,
        sharpe
    )
}

pub fn format_report(report: &Report) -> String {
    report
        .strategies
        .iter()
        .map(|s| format_metrics(s.kind.label(), &s.metrics))
        .collect()
}
