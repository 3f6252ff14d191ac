pub mod consortium;
pub mod reference;

use std::collections::HashSet;
use std::path::Path;

pub use consortium::ConsortiumCohort;
pub use reference::{ReferenceCohort, ReferenceGateway, TsvReferenceGateway};

use crate::error::CompareError;

/// Per-gene mutation frequency within one (cohort, cancer-type) slice.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyRow {
    pub gene: String,
    /// Fraction of eligible samples carrying a qualifying mutation, 0..=1.
    pub fraction: f64,
    /// `fraction * 100`, exactly.
    pub percentage: f64,
    pub gene_sample_count: u64,
    pub total_sample_count: u64,
}

impl FrequencyRow {
    pub fn new(gene: impl Into<String>, gene_sample_count: u64, total_sample_count: u64) -> Self {
        let fraction = gene_sample_count as f64 / total_sample_count as f64;
        Self {
            gene: gene.into(),
            fraction,
            percentage: fraction * 100.0,
            gene_sample_count,
            total_sample_count,
        }
    }
}

/// Descending frequency, gene symbol as tiebreak; matches the reference
/// cohort's query ordering and keeps output byte-deterministic.
pub fn sort_rows(rows: &mut [FrequencyRow]) {
    rows.sort_by(|a, b| {
        b.fraction
            .partial_cmp(&a.fraction)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.gene.cmp(&b.gene))
    });
}

/// Sample whitelist for the special-case gene's sequencing-method
/// restriction: a comma-separated supplement with `#` comment lines; the
/// whitelist is the union of the specimen and donor id columns.
pub fn load_whitelist(path: &Path) -> Result<HashSet<String>, CompareError> {
    let source = path.display().to_string();
    let content = std::fs::read_to_string(path)
        .map_err(|e| CompareError::parse(&source, e.to_string()))?;

    let mut lines = content
        .lines()
        .filter(|l| !l.starts_with('#') && !l.trim().is_empty());
    let header = lines
        .next()
        .ok_or_else(|| CompareError::parse(&source, "empty whitelist"))?;
    let columns: Vec<&str> = header.split(',').map(|c| c.trim()).collect();
    let specimen = columns
        .iter()
        .position(|c| *c == "specimen_id")
        .ok_or_else(|| CompareError::parse(&source, "missing column 'specimen_id'"))?;
    let donor = columns
        .iter()
        .position(|c| *c == "donor_id")
        .ok_or_else(|| CompareError::parse(&source, "missing column 'donor_id'"))?;

    let mut ids = HashSet::new();
    for line in lines {
        let fields: Vec<&str> = line.split(',').map(|f| f.trim()).collect();
        if fields.len() <= specimen.max(donor) {
            continue;
        }
        if !fields[specimen].is_empty() {
            ids.insert(fields[specimen].to_string());
        }
        if !fields[donor].is_empty() {
            ids.insert(fields[donor].to_string());
        }
    }
    Ok(ids)
}
