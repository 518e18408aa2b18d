use clauselens::classify::{ClassifiedClause, RiskTier};
use clauselens::report::{ReportAggregator, ReportError, ReportStatistics};

fn clause(id: u32, label: &str, tier: RiskTier, text: &str) -> ClassifiedClause {
    ClassifiedClause {
        predicted_label_id: Some(id),
        predicted_label_name: label.to_string(),
        tier,
        clause_text: text.to_string(),
    }
}

fn sample_clauses() -> Vec<ClassifiedClause> {
    vec![
        clause(
            41,
            "Termination For Convenience",
            RiskTier::Tier1,
            "Either party may terminate this Agreement upon thirty days notice.",
        ),
        clause(
            33,
            "Payment Terms",
            RiskTier::Tier2,
            "Payment is due within thirty days of invoice.",
        ),
        clause(
            33,
            "Payment Terms",
            RiskTier::Tier2,
            "Late payments accrue interest at two percent monthly.",
        ),
        clause(
            16,
            "Governing Law",
            RiskTier::Tier5,
            "This Agreement is governed by the laws of Delaware.",
        ),
    ]
}

const SUMMARY: &str = "**Overview**\nThe agreement covers services between two parties.\n\nKey Obligations:\n- TERMINATION: either party may exit on thirty days notice\n- PAYMENT: invoices are due within thirty days\nThe remainder of the contract is boilerplate.";

#[test]
fn report_renders_narrative_and_all_five_charts() {
    let dir = tempfile::tempdir().unwrap();
    let summary_path = dir.path().join("summary.txt");
    std::fs::write(&summary_path, SUMMARY).unwrap();

    let aggregator = ReportAggregator::new(dir.path());
    let artifacts = aggregator.build(&sample_clauses(), &summary_path).unwrap();

    assert_eq!(artifacts.chart_paths.len(), 5);
    assert!(artifacts.skipped_charts.is_empty());
    for path in &artifacts.chart_paths {
        assert!(path.exists(), "missing chart artifact {}", path.display());
        let svg = std::fs::read_to_string(path).unwrap();
        assert!(svg.contains("<svg"));
    }

    let html = std::fs::read_to_string(&artifacts.report_path).unwrap();
    assert!(html.contains("Comprehensive Contract Analysis Report"));
    assert!(html.contains("<h2>Overview</h2>"));
    assert!(html.contains("<h2>Key Obligations:</h2>"));
    // Colon-bearing bullet lines render as headings per the narrative rules
    assert!(html.contains("<h2>- TERMINATION: either party may exit on thirty days notice</h2>"));
    assert!(html.contains("<p>The remainder of the contract is boilerplate.</p>"));

    // Charts appear after the narrative, in the fixed order
    let tier_pos = html.find("Clause Distribution by Tier").unwrap();
    let review_pos = html
        .find("Clauses Requiring Expert Review vs Low Risk")
        .unwrap();
    assert!(tier_pos < review_pos);
}

#[test]
fn empty_clause_collection_skips_every_chart_but_keeps_narrative() {
    let dir = tempfile::tempdir().unwrap();
    let summary_path = dir.path().join("summary.txt");
    std::fs::write(&summary_path, SUMMARY).unwrap();

    let aggregator = ReportAggregator::new(dir.path());
    let artifacts = aggregator.build(&[], &summary_path).unwrap();

    assert!(artifacts.chart_paths.is_empty());
    assert_eq!(artifacts.skipped_charts.len(), 5);

    let html = std::fs::read_to_string(&artifacts.report_path).unwrap();
    assert!(html.contains("The remainder of the contract is boilerplate."));
    assert!(!html.contains("<svg"));
}

#[test]
fn missing_summary_is_a_hard_precondition_failure() {
    let dir = tempfile::tempdir().unwrap();
    let aggregator = ReportAggregator::new(dir.path());

    let missing = dir.path().join("no_such_summary.txt");
    let err = aggregator.build(&sample_clauses(), &missing).unwrap_err();
    assert!(matches!(err, ReportError::MissingSummary(_)));
}

#[test]
fn rebuilding_from_same_inputs_is_statistically_identical() {
    let clauses = sample_clauses();
    let a = ReportStatistics::from_clauses(&clauses);
    let b = ReportStatistics::from_clauses(&clauses);

    assert_eq!(a.tier_counts, b.tier_counts);
    assert_eq!(a.tier_counts.values().sum::<usize>(), clauses.len());
    assert_eq!(a.labels_by_frequency(), b.labels_by_frequency());
    assert_eq!(a.contingency, b.contingency);
}
