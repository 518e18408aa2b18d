//! Report aggregation.
//!
//! The aggregator is the pipeline's join point: it consumes the classified
//! clause collection and the final summary, computes the report statistics,
//! renders the fixed chart set, and assembles the narrative and charts into
//! a single report document. Per-chart failures degrade gracefully; a
//! missing summary is a hard precondition failure.

mod charts;
mod render;
mod stats;

pub use charts::ChartError;
pub use render::{parse_narrative, render_report, EmbeddedChart, NarrativeBlock};
pub use stats::{ReportStatistics, ReviewSplit};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::classify::ClassifiedClause;

/// The fixed chart set, in render and embed order: (artifact stem, title)
const CHART_SET: [(&str, &str); 5] = [
    ("tier_distribution", "Clause Distribution by Tier"),
    ("label_frequency", "Number of Clauses per Label"),
    ("tier_label_heatmap", "Clause Labels vs Tier Heatmap"),
    ("clause_length_distribution", "Distribution of Clause Lengths"),
    ("review_vs_lowrisk", "Clauses Requiring Expert Review vs Low Risk"),
];

/// Errors fatal to report aggregation
#[derive(Error, Debug)]
pub enum ReportError {
    /// The final summary artifact is missing; there is no partial narrative
    /// without it
    #[error("Summary file missing or unreadable: {}", .0.display())]
    MissingSummary(PathBuf),

    /// IO error while writing report artifacts
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Paths of the artifacts one aggregation produced
#[derive(Debug, Clone)]
pub struct ReportArtifacts {
    /// The rendered report document
    pub report_path: PathBuf,
    /// Chart images that were rendered and embedded, in order
    pub chart_paths: Vec<PathBuf>,
    /// Titles of charts skipped for missing data or render failures
    pub skipped_charts: Vec<String>,
}

/// Aggregates classification output and the final summary into the report.
pub struct ReportAggregator {
    run_dir: PathBuf,
}

impl ReportAggregator {
    /// Create an aggregator writing into the given run directory
    pub fn new(run_dir: impl Into<PathBuf>) -> Self {
        Self {
            run_dir: run_dir.into(),
        }
    }

    /// Build the report from a clause collection and the summary artifact.
    ///
    /// Statistics are computed from exactly the collection passed in; the
    /// summary is read from `summary_path` and its absence fails the whole
    /// report. Charts that cannot be rendered are skipped with a warning.
    pub fn build(
        &self,
        clauses: &[ClassifiedClause],
        summary_path: &Path,
    ) -> Result<ReportArtifacts, ReportError> {
        let summary_text = fs::read_to_string(summary_path)
            .map_err(|_| ReportError::MissingSummary(summary_path.to_path_buf()))?;

        let statistics = ReportStatistics::from_clauses(clauses);
        let charts_dir = self.run_dir.join("charts");
        fs::create_dir_all(&charts_dir)?;

        let mut rendered: Vec<(&str, PathBuf)> = Vec::new();
        let mut skipped: Vec<String> = Vec::new();

        for (stem, title) in CHART_SET {
            let chart_path = charts_dir.join(format!("{}.svg", stem));
            let outcome = match stem {
                "tier_distribution" => charts::render_tier_distribution(&statistics, &chart_path),
                "label_frequency" => charts::render_label_frequency(&statistics, &chart_path),
                "tier_label_heatmap" => charts::render_tier_label_heatmap(&statistics, &chart_path),
                "clause_length_distribution" => {
                    charts::render_clause_length_distribution(&statistics, &chart_path)
                }
                _ => charts::render_review_split(&statistics, &chart_path),
            };

            match outcome {
                Ok(()) => rendered.push((title, chart_path)),
                Err(ChartError::NoData) => {
                    debug!(chart = title, "Skipping chart with no backing data");
                    skipped.push(title.to_string());
                }
                Err(e) => {
                    warn!(chart = title, error = %e, "Skipping chart after render failure");
                    skipped.push(title.to_string());
                }
            }
        }

        // Embed only the charts whose image artifact is actually present
        let mut embedded = Vec::new();
        let mut chart_paths = Vec::new();
        for (title, chart_path) in rendered {
            match fs::read_to_string(&chart_path) {
                Ok(svg) => {
                    embedded.push(EmbeddedChart {
                        title: title.to_string(),
                        svg,
                    });
                    chart_paths.push(chart_path);
                }
                Err(e) => {
                    warn!(chart = title, error = %e, "Chart artifact missing at embed time");
                    skipped.push(title.to_string());
                }
            }
        }

        let report_path = self.run_dir.join("report.html");
        render_report(&summary_text, &embedded, &report_path)?;

        info!(
            charts = chart_paths.len(),
            skipped = skipped.len(),
            "Report written to {}",
            report_path.display()
        );

        Ok(ReportArtifacts {
            report_path,
            chart_paths,
            skipped_charts: skipped,
        })
    }
}
