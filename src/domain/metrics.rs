//! Annualized performance metrics for a daily-return series.

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnualizedMetrics {
    pub annualized_return: f64,
    pub annualized_volatility: f64,
    /// `None` when the daily standard deviation is zero or undefined.
    pub sharpe_ratio: Option<f64>,
}

impl AnnualizedMetrics {
    /// Zero risk-free rate. Volatility uses the sample (N-1) standard
    /// deviation; fewer than two observations give zero volatility.
    pub fn compute(returns: &[f64], periods_per_year: f64) -> Self {
        if returns.is_empty() {
            return Self {
                annualized_return: 0.0,
                annualized_volatility: 0.0,
                sharpe_ratio: None,
            };
        }

        let mean = mean(returns);
        let stddev = sample_stddev(returns, mean);
        let scale = periods_per_year.sqrt();

        let sharpe_ratio = if stddev != 0.0 && stddev.is_finite() {
            Some(mean / stddev * scale)
        } else {
            None
        };

        Self {
            annualized_return: (1.0 + mean).powf(periods_per_year) - 1.0,
            annualized_volatility: stddev * scale,
            sharpe_ratio,
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_stddev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}
