use std::collections::HashSet;
use std::path::Path;

use tracing::warn;

use crate::error::CompareError;
use crate::io::table::Table;
use crate::mapping::CancerTypeMapping;
use crate::release::{MutationRecord, SampleRecord};

const COL_GENE: &str = "Hugo_Symbol";
const COL_TUMOR_SAMPLE: &str = "Tumor_Sample_Barcode";
const COL_VARIANT_TYPE: &str = "Variant_Type";
const COL_SAMPLE_ID: &str = "SAMPLE_ID";
const COL_ONCOTREE_CODE: &str = "ONCOTREE_CODE";
const COL_SEQ_ASSAY_ID: &str = "SEQ_ASSAY_ID";
const COL_PATIENT_ID: &str = "PATIENT_ID";

pub fn parse_mutations(path: &Path) -> Result<Vec<MutationRecord>, CompareError> {
    let source = path.display().to_string();
    let table = Table::read_tsv(path)?;
    let gene = table.column(COL_GENE, &source)?;
    let sample = table.column(COL_TUMOR_SAMPLE, &source)?;
    let variant = table.column(COL_VARIANT_TYPE, &source)?;

    Ok(table
        .rows
        .iter()
        .map(|row| MutationRecord {
            gene: row[gene].clone(),
            sample_id: row[sample].clone(),
            variant_type: row[variant].clone(),
        })
        .collect())
}

pub fn parse_samples(
    path: &Path,
    mapping: &CancerTypeMapping,
) -> Result<Vec<SampleRecord>, CompareError> {
    let source = path.display().to_string();
    let table = Table::read_tsv(path)?;
    let sample = table.column(COL_SAMPLE_ID, &source)?;
    let code = table.column(COL_ONCOTREE_CODE, &source)?;
    let panel = table.column(COL_SEQ_ASSAY_ID, &source)?;

    let mut misses = 0usize;
    let samples = table
        .rows
        .iter()
        .map(|row| {
            let cancer_type_code = row[code].clone();
            let rollup_code = match mapping.rollup_for(&cancer_type_code) {
                Some(rollup) => rollup.to_string(),
                None => {
                    misses += 1;
                    cancer_type_code.clone()
                }
            };
            SampleRecord {
                sample_id: row[sample].clone(),
                cancer_type_code,
                rollup_code,
                panel_id: row[panel].clone(),
            }
        })
        .collect();
    if misses > 0 {
        warn!(source, misses, "rollup lookup misses, original code reused");
    }

    Ok(samples)
}

pub fn parse_patients(path: &Path) -> Result<Vec<String>, CompareError> {
    let source = path.display().to_string();
    let table = Table::read_tsv(path)?;
    let patient = table.column(COL_PATIENT_ID, &source)?;
    Ok(table.rows.iter().map(|row| row[patient].clone()).collect())
}

/// Panel files are `key: value` blocks. Only `stable_id` and `gene_list`
/// matter; unknown keys are ignored. Gene lists are tab-separated and
/// upper-cased.
pub fn parse_panel(path: &Path) -> Result<(String, HashSet<String>), CompareError> {
    let source = path.display().to_string();
    let content = std::fs::read_to_string(path)
        .map_err(|e| CompareError::parse(&source, e.to_string()))?;

    let mut panel_id = None;
    let mut genes = HashSet::new();
    for line in content.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        match key.trim() {
            "stable_id" => panel_id = Some(value.trim().to_uppercase()),
            "gene_list" => {
                genes = value
                    .trim()
                    .split('\t')
                    .filter(|g| !g.is_empty())
                    .map(|g| g.to_uppercase())
                    .collect();
            }
            _ => {}
        }
    }

    let panel_id =
        panel_id.ok_or_else(|| CompareError::parse(&source, "missing 'stable_id' key"))?;
    Ok((panel_id, genes))
}
