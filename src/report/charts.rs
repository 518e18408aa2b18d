use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use thiserror::Error;

use super::stats::ReportStatistics;

/// Errors raised while rendering a single chart.
///
/// Chart failures are contained by the aggregator: a failed chart is skipped,
/// never fatal to the report.
#[derive(Error, Debug)]
pub enum ChartError {
    /// The statistics contain no data for this chart
    #[error("No data for chart")]
    NoData,

    /// The plotting backend failed
    #[error("Chart render error: {0}")]
    Render(String),
}

fn render_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

/// Number of bins in the clause-length histogram
const HISTOGRAM_BINS: usize = 20;

/// Red-to-green severity palette indexed by tier (tier 1 first)
const TIER_COLORS: [RGBColor; 5] = [
    RGBColor(215, 48, 39),
    RGBColor(252, 141, 89),
    RGBColor(254, 224, 139),
    RGBColor(145, 207, 96),
    RGBColor(26, 152, 80),
];

/// Colors for the review-need split: review red, low-risk green
const REVIEW_COLORS: [RGBColor; 2] = [RGBColor(255, 76, 76), RGBColor(76, 175, 80)];

/// Bar fill for the label frequency chart
const BAR_COLOR: RGBColor = RGBColor(68, 114, 196);

/// Base hue for heatmap cells
const HEAT_COLOR: RGBColor = RGBColor(33, 102, 172);

/// Tier distribution pie chart, one slice per tier present, ascending.
pub fn render_tier_distribution(stats: &ReportStatistics, path: &Path) -> Result<(), ChartError> {
    let tiers = stats.tiers_ascending();
    if tiers.is_empty() {
        return Err(ChartError::NoData);
    }

    let slices: Vec<(String, f64, RGBColor)> = tiers
        .into_iter()
        .map(|(tier, count)| {
            (
                format!("Tier {}", tier),
                count as f64,
                TIER_COLORS[(tier as usize - 1).min(4)],
            )
        })
        .collect();

    let root = SVGBackend::new(path, (600, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let chart_area = root
        .titled("Clause Distribution by Tier", ("sans-serif", 22))
        .map_err(render_err)?;
    draw_pie(&chart_area, &slices)?;
    root.present().map_err(render_err)
}

/// Label frequency horizontal bar chart, most frequent label on top.
pub fn render_label_frequency(stats: &ReportStatistics, path: &Path) -> Result<(), ChartError> {
    let data = stats.labels_by_frequency();
    let max_count = match data.iter().map(|(_, c)| *c).max() {
        Some(max) if max > 0 => max as i32,
        _ => return Err(ChartError::NoData),
    };
    let rows = data.len() as i32;
    let names: Vec<String> = data.iter().map(|(name, _)| name.to_string()).collect();

    let root = SVGBackend::new(path, (900, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Number of Clauses per Label", ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(230)
        .build_cartesian_2d(0..max_count + 1, 0..rows)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc("Number of Clauses")
        .y_desc("Clause Label")
        .y_labels(names.len())
        .y_label_formatter(&|y| {
            // Row 0 is the bottom of the axis; most frequent label sits on top
            let row = rows - 1 - *y;
            names
                .get(row as usize)
                .cloned()
                .unwrap_or_default()
        })
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(data.iter().enumerate().map(|(i, (_, count))| {
            let y = rows - 1 - i as i32;
            Rectangle::new([(0, y), (*count as i32, y + 1)], BAR_COLOR.mix(0.8).filled())
        }))
        .map_err(render_err)?;

    root.present().map_err(render_err)
}

/// Label × tier contingency heatmap with integer-annotated cells.
pub fn render_tier_label_heatmap(stats: &ReportStatistics, path: &Path) -> Result<(), ChartError> {
    if stats.contingency.is_empty() {
        return Err(ChartError::NoData);
    }

    let labels: Vec<&String> = stats.contingency.keys().collect();
    let rows = labels.len() as i32;
    let max_cell = stats
        .contingency
        .values()
        .flat_map(|row| row.values())
        .copied()
        .max()
        .unwrap_or(1)
        .max(1);

    let root = SVGBackend::new(path, (900, 700)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Clause Labels vs Tier Heatmap", ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(230)
        .build_cartesian_2d(0..5, 0..rows)
        .map_err(render_err)?;

    let label_names: Vec<String> = labels.iter().map(|s| s.to_string()).collect();
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Tier")
        .x_labels(5)
        .x_label_formatter(&|x| {
            if (0..5).contains(x) {
                format!("Tier {}", x + 1)
            } else {
                String::new()
            }
        })
        .y_labels(label_names.len())
        .y_label_formatter(&|y| label_names.get(*y as usize).cloned().unwrap_or_default())
        .draw()
        .map_err(render_err)?;

    let annotation_style = TextStyle::from(("sans-serif", 13).into_font())
        .pos(Pos::new(HPos::Center, VPos::Center));

    for (row, label) in labels.iter().enumerate() {
        let tier_row = &stats.contingency[*label];
        for tier in 1..=5u8 {
            let count = tier_row.get(&tier).copied().unwrap_or(0);
            let x = (tier - 1) as i32;
            let y = row as i32;

            let intensity = count as f64 / max_cell as f64;
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x, y), (x + 1, y + 1)],
                    heat_cell_color(intensity).filled(),
                )))
                .map_err(render_err)?;

            let (px0, py0) = chart.backend_coord(&(x, y));
            let (px1, py1) = chart.backend_coord(&(x + 1, y + 1));
            root.draw(&Text::new(
                count.to_string(),
                ((px0 + px1) / 2, (py0 + py1) / 2),
                annotation_style.clone(),
            ))
            .map_err(render_err)?;
        }
    }

    root.present().map_err(render_err)
}

/// Clause length histogram: words per clause over a fixed bin count.
pub fn render_clause_length_distribution(
    stats: &ReportStatistics,
    path: &Path,
) -> Result<(), ChartError> {
    let word_counts = &stats.clause_word_counts;
    if word_counts.is_empty() {
        return Err(ChartError::NoData);
    }

    let max_words = word_counts.iter().copied().max().unwrap_or(0);
    let bin_width = (max_words + 1).div_ceil(HISTOGRAM_BINS).max(1);

    let mut bins = [0usize; HISTOGRAM_BINS];
    for words in word_counts {
        let bin = (words / bin_width).min(HISTOGRAM_BINS - 1);
        bins[bin] += 1;
    }
    let max_bin = *bins.iter().max().unwrap_or(&1) as i32;

    let root = SVGBackend::new(path, (800, 500)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Distribution of Clause Lengths", ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(50)
        .build_cartesian_2d(0..(bin_width * HISTOGRAM_BINS) as i32, 0..max_bin + 1)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Number of Words")
        .y_desc("Frequency")
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(bins.iter().enumerate().map(|(i, count)| {
            let x0 = (i * bin_width) as i32;
            let x1 = ((i + 1) * bin_width) as i32;
            Rectangle::new(
                [(x0, 0), (x1, *count as i32)],
                RGBColor(135, 206, 235).mix(0.9).filled(),
            )
        }))
        .map_err(render_err)?;

    root.present().map_err(render_err)
}

/// Binary review-need pie chart.
pub fn render_review_split(stats: &ReportStatistics, path: &Path) -> Result<(), ChartError> {
    let split = stats.review_split;
    if split.requires_review + split.low_risk == 0 {
        return Err(ChartError::NoData);
    }

    let mut slices = Vec::new();
    if split.requires_review > 0 {
        slices.push((
            "Requires Review".to_string(),
            split.requires_review as f64,
            REVIEW_COLORS[0],
        ));
    }
    if split.low_risk > 0 {
        slices.push(("Low Risk".to_string(), split.low_risk as f64, REVIEW_COLORS[1]));
    }

    let root = SVGBackend::new(path, (600, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let chart_area = root
        .titled(
            "Clauses Requiring Expert Review vs Low Risk",
            ("sans-serif", 20),
        )
        .map_err(render_err)?;
    draw_pie(&chart_area, &slices)?;
    root.present().map_err(render_err)
}

/// Interpolate the heatmap cell color from white toward the base hue.
fn heat_cell_color(intensity: f64) -> RGBColor {
    let t = intensity.clamp(0.0, 1.0);
    let lerp = |from: u8, to: u8| (from as f64 + (to as f64 - from as f64) * t).round() as u8;
    RGBColor(
        lerp(255, HEAT_COLOR.0),
        lerp(255, HEAT_COLOR.1),
        lerp(255, HEAT_COLOR.2),
    )
}

/// Draws a labelled pie from (label, value, color) slices.
///
/// Slices are drawn as polygon fans starting at twelve o'clock, proceeding
/// clockwise in the order given; each label carries its percentage share.
fn draw_pie<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    slices: &[(String, f64, RGBColor)],
) -> Result<(), ChartError> {
    let total: f64 = slices.iter().map(|(_, value, _)| value).sum();
    if total <= 0.0 {
        return Err(ChartError::NoData);
    }

    let (width, height) = root.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.32;

    let label_style =
        TextStyle::from(("sans-serif", 14).into_font()).pos(Pos::new(HPos::Center, VPos::Center));

    let mut angle = -std::f64::consts::FRAC_PI_2;
    for (label, value, color) in slices {
        let sweep = value / total * std::f64::consts::TAU;

        let steps = ((sweep / 0.02).ceil() as usize).max(2);
        let mut points = vec![center];
        for step in 0..=steps {
            let a = angle + sweep * step as f64 / steps as f64;
            points.push((
                center.0 + (radius * a.cos()).round() as i32,
                center.1 + (radius * a.sin()).round() as i32,
            ));
        }
        root.draw(&Polygon::new(points, color.filled()))
            .map_err(render_err)?;

        let mid = angle + sweep / 2.0;
        let share = value / total * 100.0;
        root.draw(&Text::new(
            format!("{} ({:.1}%)", label, share),
            (
                center.0 + (radius * 1.28 * mid.cos()).round() as i32,
                center.1 + (radius * 1.28 * mid.sin()).round() as i32,
            ),
            label_style.clone(),
        ))
        .map_err(render_err)?;

        angle += sweep;
    }

    Ok(())
}
