use freqcmp::compare::ComparisonRow;
use freqcmp::labels::{select_labels, LABEL_FLOOR, LABEL_TARGET};

fn row(gene: &str, x: f64, y: f64) -> ComparisonRow {
    ComparisonRow {
        gene: gene.to_string(),
        reference_fraction: x / 100.0,
        reference_percentage: x,
        reference_gene_sample_count: 1,
        reference_total_sample_count: 100,
        consortium_fraction: y / 100.0,
        consortium_percentage: y,
        consortium_gene_sample_count: 1,
        consortium_total_sample_count: 100,
    }
}

#[test]
fn high_frequency_point_is_a_primary_label() {
    let rows = vec![row("A", 35.0, 10.0), row("B", 2.0, 1.0)];
    let labels = select_labels(&rows);

    // A qualifies on x > 30; B fails both threshold tiers and only comes in
    // through the tertiary fallback (total label count <= 3)
    assert_eq!(labels[0].gene, "A");
    assert!(labels.iter().any(|l| l.gene == "B"));
    assert_eq!(labels.len(), 2);
}

#[test]
fn primary_clauses_cover_both_axes_and_delta() {
    let rows = vec![
        row("X_HIGH", 31.0, 0.0),
        row("Y_HIGH", 0.0, 31.0),
        row("CROSS1", 11.0, 21.0),
        row("CROSS2", 21.0, 11.0),
        row("DELTA", 1.0, 27.0),
    ];
    let labels = select_labels(&rows);
    let genes: Vec<&str> = labels.iter().map(|l| l.gene.as_str()).collect();
    assert_eq!(genes, ["X_HIGH", "Y_HIGH", "CROSS1", "CROSS2", "DELTA"]);
}

#[test]
fn secondary_tops_up_to_the_target_in_row_order() {
    // one primary, plenty of secondary candidates (x,y >= 5 each)
    let mut rows = vec![row("P", 40.0, 40.0)];
    for i in 0..10 {
        rows.push(row(&format!("S{}", i), 6.0, 6.0));
    }
    let labels = select_labels(&rows);
    assert_eq!(labels.len(), LABEL_TARGET);
    assert_eq!(labels[0].gene, "P");
    // top-up follows the original row order
    assert_eq!(labels[1].gene, "S0");
    assert_eq!(labels[labels.len() - 1].gene, "S6");
}

#[test]
fn no_top_up_once_primary_exceeds_target() {
    let mut rows = Vec::new();
    for i in 0..9 {
        rows.push(row(&format!("P{}", i), 40.0, 40.0));
    }
    rows.push(row("S", 6.0, 6.0));
    let labels = select_labels(&rows);
    assert_eq!(labels.len(), 9);
    assert!(!labels.iter().any(|l| l.gene == "S"));
}

#[test]
fn tertiary_fallback_fills_axis_huggers() {
    let rows = vec![row("A", 0.5, 0.2), row("B", 0.1, 0.1), row("C", 0.3, 0.0), row("D", 0.2, 0.9)];
    let labels = select_labels(&rows);
    assert_eq!(labels.len(), LABEL_FLOOR);
    let genes: Vec<&str> = labels.iter().map(|l| l.gene.as_str()).collect();
    assert_eq!(genes, ["A", "B", "C"]);
}

#[test]
fn a_gene_is_never_labeled_twice() {
    let rows = vec![row("A", 35.0, 35.0), row("B", 6.0, 6.0)];
    let labels = select_labels(&rows);
    let mut genes: Vec<&str> = labels.iter().map(|l| l.gene.as_str()).collect();
    genes.sort_unstable();
    genes.dedup();
    assert_eq!(genes.len(), labels.len());
}
