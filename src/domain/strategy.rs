//! The two fixed long/short spread strategies.

use super::series::{combine, Series};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// Long small-cap, short large-cap.
    Standard,
    /// Long small-cap, short large-cap ex-basket.
    Modified,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 2] = [StrategyKind::Standard, StrategyKind::Modified];

    pub fn label(self) -> &'static str {
        match self {
            StrategyKind::Standard => "Standard_L600_S500",
            StrategyKind::Modified => "Modified_L600_ExM7",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyReturns {
    pub standard: Series,
    pub modified: Series,
}

impl StrategyReturns {
    pub fn get(&self, kind: StrategyKind) -> &Series {
        match kind {
            StrategyKind::Standard => &self.standard,
            StrategyKind::Modified => &self.modified,
        }
    }
}

/// `S - L`
pub fn standard_return(small: f64, large: f64) -> f64 {
    small - large
}

/// `S - (-L + B)`: the short leg is short large-cap plus long basket.
pub fn modified_return(small: f64, large: f64, basket: f64) -> f64 {
    let short_ex_basket = -large + basket;
    small - short_ex_basket
}

/// Build both strategy series over the dates shared by small-cap (S),
/// large-cap (L) and basket (B) returns.
pub fn synthesize(small: &Series, large: &Series, basket: &Series) -> StrategyReturns {
    let inputs = [small, large, basket];
    StrategyReturns {
        standard: combine(&inputs, |v| standard_return(v[0], v[1])),
        modified: combine(&inputs, |v| modified_return(v[0], v[1], v[2])),
    }
}
