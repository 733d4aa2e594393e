//! SVG line-chart rendering for growth curves.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use crate::domain::error::CapspreadError;
use crate::ports::chart_port::{Chart, ChartPort};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 480.0;
const PADDING_LEFT: f64 = 70.0;
const PADDING_RIGHT: f64 = 20.0;
const PADDING_TOP: f64 = 50.0;
const PADDING_BOTTOM: f64 = 50.0;
const COLORS: [&str; 4] = ["#1f77b4", "#ff7f0e", "#2ca02c", "#d62728"];

pub struct SvgChartAdapter;

impl SvgChartAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SvgChartAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartPort for SvgChartAdapter {
    fn render(&self, chart: &Chart, output_path: &Path) -> Result<(), CapspreadError> {
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(output_path, generate_line_chart_svg(chart))?;
        Ok(())
    }
}

/// Render every series on a shared date axis. X positions come from the
/// union of dates so series with gaps still line up.
pub fn generate_line_chart_svg(chart: &Chart) -> String {
    let mut dates: Vec<NaiveDate> = chart
        .series
        .iter()
        .flat_map(|s| s.points.dates())
        .collect();
    dates.sort();
    dates.dedup();

    let values: Vec<f64> = chart
        .series
        .iter()
        .flat_map(|s| s.points.values())
        .filter(|v| v.is_finite())
        .collect();

    let plot_width = WIDTH - PADDING_LEFT - PADDING_RIGHT;
    let plot_height = HEIGHT - PADDING_TOP - PADDING_BOTTOM;

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
        w = WIDTH,
        h = HEIGHT
    ));
    svg.push('\n');
    svg.push_str(&format!(
        "<rect width=\"{}\" height=\"{}\" fill=\"white\"/>\n",
        WIDTH, HEIGHT
    ));
    svg.push_str(&format!(
        "<text x=\"{:.1}\" y=\"28\" text-anchor=\"middle\" font-size=\"16\">{}</text>\n",
        WIDTH / 2.0,
        escape(&chart.title)
    ));
    svg.push_str(&format!(
        "<text x=\"18\" y=\"{y:.1}\" text-anchor=\"middle\" font-size=\"12\" transform=\"rotate(-90 18 {y:.1})\">{}</text>\n",
        escape(&chart.y_label),
        y = PADDING_TOP + plot_height / 2.0
    ));

    // axes
    let x0 = PADDING_LEFT;
    let y0 = HEIGHT - PADDING_BOTTOM;
    svg.push_str(&format!(
        "<line x1=\"{x0:.1}\" y1=\"{top:.1}\" x2=\"{x0:.1}\" y2=\"{y0:.1}\" stroke=\"black\"/>\n",
        top = PADDING_TOP
    ));
    svg.push_str(&format!(
        "<line x1=\"{x0:.1}\" y1=\"{y0:.1}\" x2=\"{right:.1}\" y2=\"{y0:.1}\" stroke=\"black\"/>\n",
        right = x0 + plot_width
    ));

    if dates.is_empty() || values.is_empty() {
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"12\">No data</text>\n",
            WIDTH / 2.0,
            HEIGHT / 2.0
        ));
        svg.push_str("</svg>\n");
        return svg;
    }

    let min_y = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max_y = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max_y - min_y;
    let scale_y = if range > 0.0 { plot_height / range } else { 1.0 };
    let scale_x = if dates.len() > 1 {
        plot_width / (dates.len() - 1) as f64
    } else {
        0.0
    };
    let y_of = |v: f64| {
        if range > 0.0 {
            y0 - (v - min_y) * scale_y
        } else {
            PADDING_TOP + plot_height / 2.0
        }
    };

    // y labels at min and max
    for v in [min_y, max_y] {
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"11\">{:.2}</text>\n",
            x0 - 6.0,
            y_of(v) + 4.0,
            v
        ));
    }

    // x labels at first and last date
    if let (Some(first), Some(last)) = (dates.first(), dates.last()) {
        svg.push_str(&format!(
            "<text x=\"{x0:.1}\" y=\"{:.1}\" text-anchor=\"start\" font-size=\"11\">{first}</text>\n",
            y0 + 18.0
        ));
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"11\">{last}</text>\n",
            x0 + plot_width,
            y0 + 18.0
        ));
    }

    for (i, series) in chart.series.iter().enumerate() {
        let color = COLORS[i % COLORS.len()];
        let points: Vec<String> = series
            .points
            .iter()
            .filter(|(_, v)| v.is_finite())
            .filter_map(|(date, v)| {
                let idx = dates.binary_search(&date).ok()?;
                Some(format!("{:.1},{:.1}", x0 + idx as f64 * scale_x, y_of(v)))
            })
            .collect();

        svg.push_str(&format!(
            "<polyline fill=\"none\" stroke=\"{}\" stroke-width=\"1.5\" points=\"{}\"/>\n",
            color,
            points.join(" ")
        ));

        // legend
        let ly = PADDING_TOP + 10.0 + i as f64 * 18.0;
        let lx = x0 + 12.0;
        svg.push_str(&format!(
            "<line x1=\"{lx:.1}\" y1=\"{ly:.1}\" x2=\"{:.1}\" y2=\"{ly:.1}\" stroke=\"{color}\" stroke-width=\"2\"/>\n",
            lx + 20.0
        ));
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\">{}</text>\n",
            lx + 26.0,
            ly + 4.0,
            escape(&series.name)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
