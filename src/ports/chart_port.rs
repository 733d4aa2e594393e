//! Chart rendering port.

use crate::domain::error::CapspreadError;
use crate::domain::series::Series;
use std::path::Path;

/// A named line on a chart.
#[derive(Debug, Clone)]
pub struct ChartSeries {
    pub name: String,
    pub points: Series,
}

/// Line chart over a shared date axis.
#[derive(Debug, Clone)]
pub struct Chart {
    pub title: String,
    pub y_label: String,
    pub series: Vec<ChartSeries>,
}

pub trait ChartPort {
    fn render(&self, chart: &Chart, output_path: &Path) -> Result<(), CapspreadError>;
}
