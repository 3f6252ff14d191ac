//! Deviation of paired mutation frequencies from the identity line.
//!
//! Inputs are percentage units (0..=100), x from the reference cohort and y
//! from the consortium cohort. The per-point error is the perpendicular
//! distance from (x, y) to y = x; the weighted variant scales by the larger
//! of the two frequencies so near-zero noise is down-weighted.

use std::collections::HashMap;

use crate::error::CompareError;

/// Genes seen in fewer cancer types than this are excluded from the ranked
/// per-gene aggregate.
pub const MIN_CANCER_TYPE_SUPPORT: usize = 3;

pub fn point_error(x: f64, y: f64) -> f64 {
    if x == y {
        return 0.0;
    }
    let delta = (x - y).abs();
    delta * 45f64.to_radians().sin()
}

pub fn weighted_point_error(x: f64, y: f64) -> f64 {
    point_error(x, y) * x.max(y) / 100.0
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deviation {
    pub rmsd: f64,
    pub weighted_rmsd: f64,
}

/// RMSD of the per-point errors over one cancer type's gene pairs, rounded
/// to 2 decimal places at the point of reporting.
pub fn deviation(points: &[(f64, f64)]) -> Result<Deviation, CompareError> {
    if points.is_empty() {
        return Err(CompareError::division_undefined("empty gene-pair set"));
    }
    let n = points.len() as f64;
    let mse: f64 = points
        .iter()
        .map(|&(x, y)| point_error(x, y).powi(2))
        .sum::<f64>()
        / n;
    let weighted_mse: f64 = points
        .iter()
        .map(|&(x, y)| weighted_point_error(x, y).powi(2))
        .sum::<f64>()
        / n;
    Ok(Deviation {
        rmsd: round2(mse.sqrt()),
        weighted_rmsd: round2(weighted_mse.sqrt()),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneDeviation {
    pub gene: String,
    pub rmsd: f64,
    pub weighted_rmsd: f64,
    /// Sum (not mean) of raw per-point errors across contributing types.
    pub error_sum: f64,
    pub cancer_type_count: usize,
}

/// Accumulates (x, y) frequency pairs per gene across cancer types; the
/// cross-type aggregate is computed once all per-type passes have finished.
#[derive(Debug, Default)]
pub struct GeneAggregator {
    by_gene: HashMap<String, Vec<(f64, f64)>>,
}

impl GeneAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, gene: &str, x: f64, y: f64) {
        self.by_gene
            .entry(gene.to_string())
            .or_default()
            .push((x, y));
    }

    pub fn is_empty(&self) -> bool {
        self.by_gene.is_empty()
    }

    /// All genes, sorted by descending RMSD then gene symbol.
    pub fn finish(&self) -> Vec<GeneDeviation> {
        let mut out: Vec<GeneDeviation> = self
            .by_gene
            .iter()
            .map(|(gene, pairs)| {
                let n = pairs.len() as f64;
                let error_sum: f64 = pairs.iter().map(|&(x, y)| point_error(x, y)).sum();
                let mse: f64 = pairs
                    .iter()
                    .map(|&(x, y)| point_error(x, y).powi(2))
                    .sum::<f64>()
                    / n;
                let weighted_mse: f64 = pairs
                    .iter()
                    .map(|&(x, y)| weighted_point_error(x, y).powi(2))
                    .sum::<f64>()
                    / n;
                GeneDeviation {
                    gene: gene.clone(),
                    rmsd: round2(mse.sqrt()),
                    weighted_rmsd: round2(weighted_mse.sqrt()),
                    error_sum,
                    cancer_type_count: pairs.len(),
                }
            })
            .collect();
        out.sort_by(|a, b| {
            b.rmsd
                .partial_cmp(&a.rmsd)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.gene.cmp(&b.gene))
        });
        out
    }

    /// The ranked aggregate: genes with insufficient cross-type support
    /// dropped.
    pub fn ranked(&self) -> Vec<GeneDeviation> {
        self.finish()
            .into_iter()
            .filter(|g| g.cancer_type_count >= MIN_CANCER_TYPE_SUPPORT)
            .collect()
    }
}
