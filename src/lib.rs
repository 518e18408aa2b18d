//! clauselens - contract clause analysis pipeline
//!
//! This library ingests a legal contract document, segments it into clauses,
//! classifies each clause into a risk tier, produces a hierarchical
//! abstractive summary of the whole document, and renders an aggregated
//! report combining the narrative with five statistical charts.
//!
//! The classification and summarization branches consume the same extracted
//! text and run concurrently; the report aggregator is the join point.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error as ThisError;
use tracing::info;

// Module declarations
/// Document processing: format handling, text extraction, and clause
/// segmentation.
pub mod processing;

/// Clause classification: the external classification capability, the label
/// codec, and the versioned label-to-tier mapping.
pub mod classify;

/// Text generation capability used by the summarizer.
///
/// Provides:
/// - The generation provider trait
/// - The OpenAI chat-completions client
/// - The fixed instruction templates
pub mod llm;

/// Hierarchical chunked summarization over overlapping text windows.
pub mod summary;

/// Report aggregation: statistics, chart rendering, and document assembly.
pub mod report;

/// Common types and configuration structures.
pub mod types;

/// Utility functions.
pub mod utils;

// Re-exports
pub use crate::types::{Error, PipelineConfig, Result};

use crate::classify::{
    write_clause_table, ClassifierProvider, ClauseClassifier, HttpClassifier, TierTable,
};
use crate::llm::{OpenAIClient, Provider};
use crate::processing::formats::extract_document;
use crate::processing::segment_clauses;
use crate::report::{ReportAggregator, ReportArtifacts};
use crate::summary::HierarchicalSummarizer;
use crate::utils::content_hash_id;

/// The stage of the pipeline a failure is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Document format detection and text extraction
    Extraction,
    /// Clause segmentation
    Segmentation,
    /// Clause classification and table export
    Classification,
    /// Hierarchical summarization
    Summarization,
    /// Report aggregation
    Report,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Extraction => "extraction",
            PipelineStage::Segmentation => "segmentation",
            PipelineStage::Classification => "classification",
            PipelineStage::Summarization => "summarization",
            PipelineStage::Report => "report",
        };
        f.write_str(name)
    }
}

/// A failed pipeline run, labeled with the stage that failed and the partial
/// artifacts that are still usable.
#[derive(Debug, ThisError)]
#[error("pipeline failed at {stage}: {source}")]
pub struct PipelineError {
    /// Stage the failure is attributed to
    pub stage: PipelineStage,
    /// Underlying error
    #[source]
    pub source: Error,
    /// Artifacts written before the failure that remain usable
    pub partial_artifacts: Vec<PathBuf>,
}

impl PipelineError {
    fn at(stage: PipelineStage, source: Error, partial_artifacts: Vec<PathBuf>) -> Self {
        Self {
            stage,
            source,
            partial_artifacts,
        }
    }
}

/// Artifacts of one successful pipeline run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Run id derived from the extracted document text
    pub run_id: String,
    /// Directory holding every artifact of this run
    pub run_dir: PathBuf,
    /// Number of clauses segmented and classified
    pub clause_count: usize,
    /// The classified clause table (CSV)
    pub clause_table: PathBuf,
    /// The final abstractive summary (plain text)
    pub summary_path: PathBuf,
    /// The rendered report and its chart artifacts
    pub report: ReportArtifacts,
}

/// Coordinates one contract analysis run end to end.
///
/// A pipeline owns its external capability clients and an immutable
/// configuration; each [`run`](ContractPipeline::run) is a self-contained,
/// cancelable unit of work. Dropping the run future cancels in-flight
/// external calls, and chart artifacts are only written at the aggregation
/// stage, after both branches completed, so a cancelled run never leaves a
/// corrupt report behind.
pub struct ContractPipeline {
    config: Arc<PipelineConfig>,
    classifier: Arc<dyn ClassifierProvider>,
    generator: Arc<dyn Provider>,
}

impl ContractPipeline {
    /// Create a pipeline with HTTP clients built from the configuration
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let classifier = Arc::new(HttpClassifier::new(config.classifier.clone())?);
        let generator = Arc::new(OpenAIClient::new(config.llm.clone())?);
        Ok(Self::with_providers(config, classifier, generator))
    }

    /// Create a pipeline with injected capability providers
    pub fn with_providers(
        config: PipelineConfig,
        classifier: Arc<dyn ClassifierProvider>,
        generator: Arc<dyn Provider>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            classifier,
            generator,
        }
    }

    /// The configuration this pipeline runs with
    pub fn get_config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Analyze a contract document file.
    ///
    /// Unsupported formats and documents with no extractable text fail at
    /// the extraction stage before any external call is made.
    pub async fn run(&self, document: &Path) -> std::result::Result<RunOutcome, PipelineError> {
        let text = extract_document(document)
            .await
            .map_err(|e| PipelineError::at(PipelineStage::Extraction, e.into(), Vec::new()))?;
        self.run_text(&text).await
    }

    /// Analyze already-extracted contract text.
    ///
    /// The classification and summarization branches run concurrently over
    /// the same text; the report aggregation starts only after both finish.
    /// A summarization failure is fatal to the run (fail-fast policy) but
    /// the error still names the clause table as a usable partial artifact.
    pub async fn run_text(&self, text: &str) -> std::result::Result<RunOutcome, PipelineError> {
        // Reject invalid windowing before any generation call is dispatched
        self.config
            .window
            .validate()
            .map_err(|e| PipelineError::at(PipelineStage::Summarization, e.into(), Vec::new()))?;

        let tiers = self
            .tier_table()
            .map_err(|e| PipelineError::at(PipelineStage::Classification, e, Vec::new()))?;

        let clauses = segment_clauses(text);
        let run_id = content_hash_id(text, "run-");
        let run_dir = self.config.output_dir.join(&run_id);
        info!(
            run = %run_id,
            clauses = clauses.len(),
            "Starting pipeline run"
        );

        let classifier = ClauseClassifier::new(
            Arc::clone(&self.classifier),
            tiers,
            self.config.classify_fan_out,
        );
        let summarizer = HierarchicalSummarizer::new(
            Arc::clone(&self.generator),
            self.config.window,
            self.config.summary_fan_out,
        );

        // The two branches share nothing mutable; run them concurrently
        let (classified, summary) = tokio::join!(
            classifier.classify_clauses(&clauses),
            summarizer.summarize(text)
        );

        fs::create_dir_all(&run_dir).map_err(|e| {
            PipelineError::at(PipelineStage::Classification, Error::Io(e), Vec::new())
        })?;

        let clause_table = run_dir.join("classified_clauses.csv");
        write_clause_table(&clause_table, &classified).map_err(|e| {
            PipelineError::at(PipelineStage::Classification, e.into(), Vec::new())
        })?;

        let summary_text = summary.map_err(|e| {
            PipelineError::at(
                PipelineStage::Summarization,
                e.into(),
                vec![clause_table.clone()],
            )
        })?;

        let summary_path = run_dir.join("summary.txt");
        fs::write(&summary_path, &summary_text).map_err(|e| {
            PipelineError::at(
                PipelineStage::Summarization,
                Error::Io(e),
                vec![clause_table.clone()],
            )
        })?;

        let aggregator = ReportAggregator::new(&run_dir);
        let artifacts = aggregator.build(&classified, &summary_path).map_err(|e| {
            PipelineError::at(
                PipelineStage::Report,
                e.into(),
                vec![clause_table.clone(), summary_path.clone()],
            )
        })?;

        info!(run = %run_id, "Pipeline run complete");

        Ok(RunOutcome {
            run_id,
            run_dir,
            clause_count: classified.len(),
            clause_table,
            summary_path,
            report: artifacts,
        })
    }

    /// Resolve the tier table: an external override when configured, the
    /// embedded artifact otherwise.
    fn tier_table(&self) -> Result<TierTable> {
        match &self.config.tier_table_path {
            Some(path) => TierTable::from_path(path)
                .map_err(|e| Error::Config(format!("tier table {}: {}", path.display(), e))),
            None => Ok(TierTable::embedded()),
        }
    }
}
