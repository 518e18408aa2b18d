use std::path::PathBuf;
use serde::{Deserialize, Serialize};

use crate::classify::ClassifierConfig;
use crate::summary::WindowConfig;
use crate::types::llm::LLMConfig;

/// Immutable configuration for one pipeline run.
///
/// The config is threaded explicitly through every component entry point so
/// runs stay independently testable and reentrant; nothing in the crate reads
/// ambient global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Windowing parameters for the chunked summarizer
    pub window: WindowConfig,
    /// Classification service configuration
    pub classifier: ClassifierConfig,
    /// Generation service configuration
    pub llm: LLMConfig,
    /// Maximum concurrent classification calls
    pub classify_fan_out: usize,
    /// Maximum concurrent per-window generation calls
    pub summary_fan_out: usize,
    /// Optional path to a tier table overriding the embedded one
    pub tier_table_path: Option<PathBuf>,
    /// Directory that receives per-run artifact subdirectories
    pub output_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            classifier: ClassifierConfig::default(),
            llm: LLMConfig::default(),
            classify_fan_out: 4,
            summary_fan_out: 4,
            tier_table_path: None,
            output_dir: PathBuf::from("output"),
        }
    }
}
