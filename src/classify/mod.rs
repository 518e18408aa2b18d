//! Clause classification and risk tiering.
//!
//! A [`ClauseClassifier`] sends each clause to the external classification
//! capability, resolves the predicted label id through the label codec, and
//! maps it onto a risk tier via the versioned tier table. Per-clause failures
//! degrade to the `UNKNOWN` label and the default tier so a flaky service
//! never costs the whole document.

mod labels;
mod provider;
mod tiers;

pub use labels::{ClauseLabel, LabelCodec, LabelCodecError};
pub use provider::{ClassifierConfig, ClassifierProvider, ClassifyError, HttpClassifier};
pub use tiers::{RiskTier, TierTable, TierTableError};

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::processing::Clause;

/// Label name recorded when classification is unavailable for a clause
pub const UNKNOWN_LABEL: &str = "UNKNOWN";

/// A clause together with its predicted label and resolved risk tier.
///
/// Never mutated after creation. `predicted_label_id` is absent when the
/// classification capability was unavailable for this clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedClause {
    /// Integer label id predicted by the model
    pub predicted_label_id: Option<u32>,
    /// Human-readable label name resolved through the codec
    pub predicted_label_name: String,
    /// Risk tier resolved through the tier table
    pub tier: RiskTier,
    /// The clause text itself
    pub clause_text: String,
}

impl ClassifiedClause {
    /// Number of whitespace-separated words in the clause
    pub fn word_count(&self) -> usize {
        self.clause_text.split_whitespace().count()
    }
}

/// Classifies clauses against the external model and resolves risk tiers.
pub struct ClauseClassifier {
    provider: Arc<dyn ClassifierProvider>,
    codec: LabelCodec,
    tiers: TierTable,
    fan_out: usize,
}

impl ClauseClassifier {
    /// Create a classifier over the given provider and tier table.
    ///
    /// `fan_out` bounds the number of concurrent classification calls.
    pub fn new(provider: Arc<dyn ClassifierProvider>, tiers: TierTable, fan_out: usize) -> Self {
        Self {
            provider,
            codec: LabelCodec::new(),
            tiers,
            fan_out: fan_out.max(1),
        }
    }

    /// The label codec used to resolve predicted ids
    pub fn codec(&self) -> &LabelCodec {
        &self.codec
    }

    /// Classify a single clause.
    ///
    /// Never fails: if the classification capability is unavailable the
    /// clause is tiered as unknown so partial results stay useful.
    pub async fn classify_clause(&self, clause: &Clause) -> ClassifiedClause {
        let outcome = match self.provider.classify(&clause.text).await {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(
                    clause = clause.index,
                    error = %e,
                    "Classification unavailable, tiering clause as unknown"
                );
                None
            }
        };
        self.resolve(clause, outcome)
    }

    /// Classify a sequence of clauses with bounded concurrency.
    ///
    /// Output order equals input (document) order. Failure of one clause
    /// never blocks or aborts the others.
    pub async fn classify_clauses(&self, clauses: &[Clause]) -> Vec<ClassifiedClause> {
        let semaphore = Arc::new(Semaphore::new(self.fan_out));
        let mut tasks = Vec::with_capacity(clauses.len());

        for clause in clauses {
            let provider = Arc::clone(&self.provider);
            let semaphore = Arc::clone(&semaphore);
            let text = clause.text.clone();

            tasks.push(tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                provider.classify(&text).await
            }));
        }

        let mut classified = Vec::with_capacity(clauses.len());
        for (clause, task) in clauses.iter().zip(tasks) {
            let outcome = match task.await {
                Ok(Ok(id)) => Some(id),
                Ok(Err(e)) => {
                    warn!(
                        clause = clause.index,
                        error = %e,
                        "Classification unavailable, tiering clause as unknown"
                    );
                    None
                }
                Err(e) => {
                    warn!(clause = clause.index, error = %e, "Classification task failed");
                    None
                }
            };
            classified.push(self.resolve(clause, outcome));
        }

        debug!(count = classified.len(), "Classified clauses");
        classified
    }

    fn resolve(&self, clause: &Clause, label_id: Option<u32>) -> ClassifiedClause {
        match label_id {
            Some(id) => {
                let name = self
                    .codec
                    .decode(id)
                    .map(str::to_string)
                    .unwrap_or_else(|_| UNKNOWN_LABEL.to_string());
                ClassifiedClause {
                    predicted_label_id: Some(id),
                    predicted_label_name: name,
                    tier: self.tiers.tier_for_id(&self.codec, id),
                    clause_text: clause.text.clone(),
                }
            }
            None => ClassifiedClause {
                predicted_label_id: None,
                predicted_label_name: UNKNOWN_LABEL.to_string(),
                tier: self.tiers.default_tier,
                clause_text: clause.text.clone(),
            },
        }
    }
}

/// Writes the classified clause table as CSV, in document order.
///
/// Columns: `predicted_label_id,predicted_label_name,tier,clause_text`.
pub fn write_clause_table(path: &Path, clauses: &[ClassifiedClause]) -> Result<(), ClassifyError> {
    let mut writer =
        csv::Writer::from_path(path).map_err(|e| ClassifyError::Export(e.to_string()))?;

    for clause in clauses {
        writer
            .serialize(clause)
            .map_err(|e| ClassifyError::Export(e.to_string()))?;
    }
    writer
        .flush()
        .map_err(|e| ClassifyError::Export(e.to_string()))?;
    Ok(())
}
