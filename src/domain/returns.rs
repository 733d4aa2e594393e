//! Daily return transforms: simple returns, equal-weight basket and
//! cumulative growth.

use super::series::{combine, Series};

/// Simple daily returns, `p[i] / p[i-1] - 1`. The first date has no prior
/// price and is dropped, so a series of length n yields max(n-1, 0) points.
pub fn pct_change(prices: &Series) -> Series {
    let points: Vec<_> = prices.iter().collect();
    points
        .windows(2)
        .map(|w| {
            let (_, prev) = w[0];
            let (date, curr) = w[1];
            (date, curr / prev - 1.0)
        })
        .collect()
}

/// Arithmetic mean of the constituents on every date they all share.
pub fn equal_weight(constituents: &[&Series]) -> Series {
    if constituents.is_empty() {
        return Series::new();
    }
    combine(constituents, |values| {
        values.iter().sum::<f64>() / values.len() as f64
    })
}

/// Growth of one unit: running product of `1 + r` in date order.
pub fn cumulative_growth(returns: &Series) -> Series {
    let mut growth = 1.0;
    returns
        .iter()
        .map(|(date, r)| {
            growth *= 1.0 + r;
            (date, growth)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 3, day).unwrap()
    }

    fn series(values: &[f64]) -> Series {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| (d(i as u32 + 1), v))
            .collect()
    }

    #[test]
    fn pct_change_drops_first_date() {
        let prices = series(&[100.0, 110.0, 99.0]);
        let returns = pct_change(&prices);

        assert_eq!(returns.len(), 2);
        assert_eq!(returns.first_date(), Some(d(2)));
        assert_relative_eq!(returns.get(d(2)).unwrap(), 0.10, epsilon = 1e-12);
        assert_relative_eq!(returns.get(d(3)).unwrap(), -0.10, epsilon = 1e-12);
    }

    #[test]
    fn pct_change_short_series_is_empty() {
        assert!(pct_change(&Series::new()).is_empty());
        assert!(pct_change(&series(&[42.0])).is_empty());
    }

    #[test]
    fn pct_change_constant_prices_are_exactly_zero() {
        let returns = pct_change(&series(&[50.0; 6]));
        assert!(returns.values().iter().all(|&r| r == 0.0));
    }

    #[test]
    fn pct_change_zero_price_is_not_trapped() {
        let returns = pct_change(&series(&[0.0, 10.0]));
        assert!(returns.get(d(2)).unwrap().is_infinite());
    }

    #[test]
    fn equal_weight_averages_per_date() {
        let a = series(&[0.01, 0.02]);
        let b = series(&[0.03, -0.02]);
        let c = series(&[0.02, 0.03]);
        let basket = equal_weight(&[&a, &b, &c]);

        assert_relative_eq!(basket.get(d(1)).unwrap(), 0.02, epsilon = 1e-12);
        assert_relative_eq!(basket.get(d(2)).unwrap(), 0.01, epsilon = 1e-12);
    }

    #[test]
    fn equal_weight_inner_joins_constituents() {
        let a = series(&[0.01, 0.02, 0.03]);
        let b: Series = [(d(2), 0.04), (d(3), 0.05)].into_iter().collect();
        let basket = equal_weight(&[&a, &b]);

        assert_eq!(basket.len(), 2);
        assert_eq!(basket.get(d(1)), None);
        assert_relative_eq!(basket.get(d(3)).unwrap(), 0.04, epsilon = 1e-12);
    }

    #[test]
    fn equal_weight_no_constituents() {
        assert!(equal_weight(&[]).is_empty());
    }

    #[test]
    fn cumulative_growth_is_prefix_product() {
        let growth = cumulative_growth(&series(&[0.10, -0.10, 0.05]));

        assert_relative_eq!(growth.get(d(1)).unwrap(), 1.10, epsilon = 1e-12);
        assert_relative_eq!(growth.get(d(2)).unwrap(), 0.99, epsilon = 1e-12);
        assert_relative_eq!(growth.get(d(3)).unwrap(), 1.0395, epsilon = 1e-12);
    }

    #[test]
    fn cumulative_growth_depends_on_date_order() {
        let forward = cumulative_growth(&series(&[0.10, -0.50]));
        let reversed = cumulative_growth(&series(&[-0.50, 0.10]));

        // same final value, different path
        assert_relative_eq!(
            forward.get(d(2)).unwrap(),
            reversed.get(d(2)).unwrap(),
            epsilon = 1e-12
        );
        assert_ne!(forward.get(d(1)), reversed.get(d(1)));
    }

    #[test]
    fn cumulative_growth_empty() {
        assert!(cumulative_growth(&Series::new()).is_empty());
    }

    proptest! {
        #[test]
        fn pct_change_length_and_values(prices in prop::collection::vec(1.0f64..1000.0, 0..25)) {
            let s = series(&prices);
            let returns = pct_change(&s);
            prop_assert_eq!(returns.len(), prices.len().saturating_sub(1));
            for (i, r) in returns.values().iter().enumerate() {
                prop_assert_eq!(*r, prices[i + 1] / prices[i] - 1.0);
            }
        }

        #[test]
        fn cumulative_growth_matches_product(returns in prop::collection::vec(-0.2f64..0.2, 1..25)) {
            let growth = cumulative_growth(&series(&returns));
            let expected: f64 = returns.iter().map(|r| 1.0 + r).product();
            let last = growth.values().last().copied().unwrap();
            prop_assert!((last - expected).abs() < 1e-9);
        }

        #[test]
        fn transforms_are_repeatable(prices in prop::collection::vec(1.0f64..1000.0, 0..25)) {
            let s = series(&prices);
            prop_assert_eq!(pct_change(&s), pct_change(&s));
            let r = pct_change(&s);
            prop_assert_eq!(cumulative_growth(&r), cumulative_growth(&r));
        }
    }
}
