pub mod run;

use std::collections::HashMap;

use crate::cohort::FrequencyRow;

/// Rows where either cohort counts more than this many mutated samples
/// qualify for the per-gene sample-count chart data.
pub const COUNT_CHART_MIN: u64 = 5;
/// Cap on chart-data rows (both the per-gene count table and the
/// cancer-type distribution).
pub const CHART_MAX_ROWS: usize = 40;

/// One gene's frequencies in both cohorts, side by side. Produced by the
/// inner join; a gene present in only one cohort never appears (deviation is
/// undefined without both points).
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub gene: String,
    pub reference_fraction: f64,
    pub reference_percentage: f64,
    pub reference_gene_sample_count: u64,
    pub reference_total_sample_count: u64,
    pub consortium_fraction: f64,
    pub consortium_percentage: f64,
    pub consortium_gene_sample_count: u64,
    pub consortium_total_sample_count: u64,
}

/// Inner join on gene symbol, preserving the reference-side row order.
pub fn join(reference: &[FrequencyRow], consortium: &[FrequencyRow]) -> Vec<ComparisonRow> {
    let consortium_by_gene: HashMap<&str, &FrequencyRow> = consortium
        .iter()
        .map(|row| (row.gene.as_str(), row))
        .collect();

    reference
        .iter()
        .filter_map(|r| {
            consortium_by_gene.get(r.gene.as_str()).map(|c| ComparisonRow {
                gene: r.gene.clone(),
                reference_fraction: r.fraction,
                reference_percentage: r.percentage,
                reference_gene_sample_count: r.gene_sample_count,
                reference_total_sample_count: r.total_sample_count,
                consortium_fraction: c.fraction,
                consortium_percentage: c.percentage,
                consortium_gene_sample_count: c.gene_sample_count,
                consortium_total_sample_count: c.total_sample_count,
            })
        })
        .collect()
}

/// Chart data for the per-gene sample-count comparison: rows where either
/// cohort exceeds COUNT_CHART_MIN mutated samples, sorted by descending
/// reference count, capped at CHART_MAX_ROWS.
pub fn count_chart_rows(rows: &[ComparisonRow]) -> Vec<ComparisonRow> {
    let mut selected: Vec<ComparisonRow> = rows
        .iter()
        .filter(|r| {
            r.reference_gene_sample_count > COUNT_CHART_MIN
                || r.consortium_gene_sample_count > COUNT_CHART_MIN
        })
        .cloned()
        .collect();
    selected.sort_by(|a, b| {
        b.reference_gene_sample_count
            .cmp(&a.reference_gene_sample_count)
            .then_with(|| a.gene.cmp(&b.gene))
    });
    selected.truncate(CHART_MAX_ROWS);
    selected
}
