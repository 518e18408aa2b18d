use std::collections::BTreeMap;

use serde::Serialize;

use crate::classify::ClassifiedClause;

/// Binary review-need split over the clause collection.
///
/// Tiers 1-2 require expert review; tiers 3-5 are low risk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReviewSplit {
    /// Clauses in tiers 1-2
    pub requires_review: usize,
    /// Clauses in tiers 3-5
    pub low_risk: usize,
}

/// Descriptive statistics derived from one classified clause collection.
///
/// All five distributions are computed in a single pass over the same
/// collection the report narrative is built from, so the charts and the
/// narrative can never disagree about the underlying data.
#[derive(Debug, Clone, Serialize)]
pub struct ReportStatistics {
    /// Total number of classified clauses
    pub total_clauses: usize,
    /// Clause count per tier (keyed by numeric tier)
    pub tier_counts: BTreeMap<u8, usize>,
    /// Clause count per predicted label
    pub label_counts: BTreeMap<String, usize>,
    /// Label × tier contingency table
    pub contingency: BTreeMap<String, BTreeMap<u8, usize>>,
    /// Words per clause, in document order
    pub clause_word_counts: Vec<usize>,
    /// Binary review-need split
    pub review_split: ReviewSplit,
}

impl ReportStatistics {
    /// Compute statistics over a clause collection.
    ///
    /// An empty collection produces empty (not erroring) statistics.
    pub fn from_clauses(clauses: &[ClassifiedClause]) -> Self {
        let mut tier_counts: BTreeMap<u8, usize> = BTreeMap::new();
        let mut label_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut contingency: BTreeMap<String, BTreeMap<u8, usize>> = BTreeMap::new();
        let mut clause_word_counts = Vec::with_capacity(clauses.len());
        let mut review_split = ReviewSplit::default();

        for clause in clauses {
            let tier = clause.tier.as_u8();
            *tier_counts.entry(tier).or_default() += 1;
            *label_counts
                .entry(clause.predicted_label_name.clone())
                .or_default() += 1;
            *contingency
                .entry(clause.predicted_label_name.clone())
                .or_default()
                .entry(tier)
                .or_default() += 1;
            clause_word_counts.push(clause.word_count());

            if clause.tier.requires_review() {
                review_split.requires_review += 1;
            } else {
                review_split.low_risk += 1;
            }
        }

        Self {
            total_clauses: clauses.len(),
            tier_counts,
            label_counts,
            contingency,
            clause_word_counts,
            review_split,
        }
    }

    /// Whether the statistics cover no clauses at all
    pub fn is_empty(&self) -> bool {
        self.total_clauses == 0
    }

    /// Tiers present in the collection with their counts, ascending by tier
    pub fn tiers_ascending(&self) -> Vec<(u8, usize)> {
        self.tier_counts.iter().map(|(t, c)| (*t, *c)).collect()
    }

    /// Labels with their counts, descending by count (ties broken by name so
    /// the ordering is deterministic)
    pub fn labels_by_frequency(&self) -> Vec<(&str, usize)> {
        let mut labels: Vec<(&str, usize)> = self
            .label_counts
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        labels.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::RiskTier;

    fn clause(label: &str, tier: RiskTier, text: &str) -> ClassifiedClause {
        ClassifiedClause {
            predicted_label_id: Some(0),
            predicted_label_name: label.to_string(),
            tier,
            clause_text: text.to_string(),
        }
    }

    fn sample() -> Vec<ClassifiedClause> {
        vec![
            clause("Termination For Convenience", RiskTier::Tier1, "either party may terminate"),
            clause("Payment Terms", RiskTier::Tier2, "payment is due within thirty days"),
            clause("Payment Terms", RiskTier::Tier2, "late payments accrue interest"),
            clause("Governing Law", RiskTier::Tier5, "delaware law governs"),
        ]
    }

    #[test]
    fn tier_histogram_sums_to_total() {
        let stats = ReportStatistics::from_clauses(&sample());
        assert_eq!(stats.total_clauses, 4);
        assert_eq!(stats.tier_counts.values().sum::<usize>(), 4);
    }

    #[test]
    fn contingency_row_and_column_sums_match_histograms() {
        let stats = ReportStatistics::from_clauses(&sample());

        for (label, row) in &stats.contingency {
            assert_eq!(row.values().sum::<usize>(), stats.label_counts[label]);
        }

        for (tier, count) in &stats.tier_counts {
            let column_sum: usize = stats
                .contingency
                .values()
                .filter_map(|row| row.get(tier))
                .sum();
            assert_eq!(column_sum, *count);
        }
    }

    #[test]
    fn review_split_covers_all_clauses() {
        let stats = ReportStatistics::from_clauses(&sample());
        assert_eq!(stats.review_split.requires_review, 3);
        assert_eq!(stats.review_split.low_risk, 1);
        assert_eq!(
            stats.review_split.requires_review + stats.review_split.low_risk,
            stats.total_clauses
        );
    }

    #[test]
    fn labels_sorted_by_descending_frequency() {
        let stats = ReportStatistics::from_clauses(&sample());
        let labels = stats.labels_by_frequency();
        assert_eq!(labels[0], ("Payment Terms", 2));
        for pair in labels.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }

    #[test]
    fn recomputation_is_identical() {
        let clauses = sample();
        let a = ReportStatistics::from_clauses(&clauses);
        let b = ReportStatistics::from_clauses(&clauses);
        assert_eq!(a.tier_counts, b.tier_counts);
        assert_eq!(a.label_counts, b.label_counts);
        assert_eq!(a.contingency, b.contingency);
        assert_eq!(a.clause_word_counts, b.clause_word_counts);
        assert_eq!(a.review_split, b.review_split);
    }

    #[test]
    fn empty_collection_yields_empty_statistics() {
        let stats = ReportStatistics::from_clauses(&[]);
        assert!(stats.is_empty());
        assert!(stats.tier_counts.is_empty());
        assert!(stats.label_counts.is_empty());
        assert!(stats.clause_word_counts.is_empty());
    }
}
