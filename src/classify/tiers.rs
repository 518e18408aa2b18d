use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::labels::LabelCodec;

/// Severity/review-priority bucket for a classified clause.
///
/// Tier 1 is the most review-worthy, tier 5 the least.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum RiskTier {
    /// Highest severity, always requires expert review
    Tier1,
    /// High severity
    Tier2,
    /// Moderate severity
    Tier3,
    /// Low severity
    Tier4,
    /// Lowest severity, boilerplate and metadata clauses
    Tier5,
}

impl RiskTier {
    /// The numeric tier value (1..=5)
    pub fn as_u8(self) -> u8 {
        match self {
            RiskTier::Tier1 => 1,
            RiskTier::Tier2 => 2,
            RiskTier::Tier3 => 3,
            RiskTier::Tier4 => 4,
            RiskTier::Tier5 => 5,
        }
    }

    /// Whether clauses of this tier belong in the "Requires Review" split
    pub fn requires_review(self) -> bool {
        self.as_u8() <= 2
    }
}

impl From<RiskTier> for u8 {
    fn from(tier: RiskTier) -> u8 {
        tier.as_u8()
    }
}

impl TryFrom<u8> for RiskTier {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(RiskTier::Tier1),
            2 => Ok(RiskTier::Tier2),
            3 => Ok(RiskTier::Tier3),
            4 => Ok(RiskTier::Tier4),
            5 => Ok(RiskTier::Tier5),
            other => Err(format!("tier out of range: {}", other)),
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tier {}", self.as_u8())
    }
}

/// Errors that can occur when loading a tier table
#[derive(Error, Debug)]
pub enum TierTableError {
    /// Error reading the table file
    #[error("Tier table read error: {0}")]
    ReadError(#[from] std::io::Error),

    /// Error parsing the table
    #[error("Tier table parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Versioned mapping from clause labels to risk tiers.
///
/// The table is a configuration artifact, keyed by label name so it survives
/// a model retrain that reshuffles integer ids. Resolution is total: a label
/// or id with no explicit entry resolves to the documented default tier
/// (tier 5, low risk) rather than failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierTable {
    /// Version of the tier assignment, bumped whenever the mapping is re-tuned
    pub version: String,
    /// Tier used for labels without an explicit entry
    pub default_tier: RiskTier,
    /// Explicit label-name to tier entries
    pub tiers: HashMap<String, RiskTier>,
}

/// The tier table shipped with the crate, tuned against the deployed
/// classifier model.
const EMBEDDED_TABLE: &str = include_str!("label_tiers.json");

impl TierTable {
    /// The embedded tier table.
    pub fn embedded() -> Self {
        // The embedded artifact is validated by unit test; a parse failure
        // here is a broken build, not a runtime condition.
        serde_json::from_str(EMBEDDED_TABLE).expect("embedded tier table is valid")
    }

    /// Load a tier table from an external JSON file, for auditing or
    /// re-tuning the mapping without a recompile.
    pub fn from_path(path: &Path) -> Result<Self, TierTableError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Resolve the tier for a label name.
    pub fn tier_for_name(&self, name: &str) -> RiskTier {
        self.tiers.get(name).copied().unwrap_or(self.default_tier)
    }

    /// Resolve the tier for a label id produced by the classifier.
    ///
    /// Ids outside the codec's domain resolve to the default tier.
    pub fn tier_for_id(&self, codec: &LabelCodec, id: u32) -> RiskTier {
        match codec.decode(id) {
            Ok(name) => self.tier_for_name(name),
            Err(_) => self.default_tier,
        }
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self::embedded()
    }
}
