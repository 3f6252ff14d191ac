pub mod fetch;
pub mod parser;

use std::collections::{HashMap, HashSet};

pub use fetch::{LocalReleaseFetcher, ReleaseFetcher, ReleaseFiles};

use crate::error::CompareError;
use crate::mapping::CancerTypeMapping;

/// Variant type counted toward mutation frequency. The reference cohort's
/// query is SNP-only; restricting the consortium side the same way keeps the
/// two cohorts comparable.
pub const SNP_VARIANT: &str = "SNP";

#[derive(Debug, Clone, PartialEq)]
pub struct MutationRecord {
    pub gene: String,
    pub sample_id: String,
    pub variant_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SampleRecord {
    pub sample_id: String,
    pub cancer_type_code: String,
    /// Top-level grouping; falls back to `cancer_type_code` itself when the
    /// code has no rollup entry.
    pub rollup_code: String,
    pub panel_id: String,
}

/// One consortium release, parsed into read-only in-memory tables.
#[derive(Debug)]
pub struct ReleaseDataset {
    pub mutations: Vec<MutationRecord>,
    pub samples: Vec<SampleRecord>,
    pub patient_ids: Vec<String>,
    /// panel id -> genes the sequencing assay covers
    pub panels: HashMap<String, HashSet<String>>,
    /// sample id -> panel id
    pub sample_panels: HashMap<String, String>,
    /// retained for resolving query codes in rollup mode
    mapping: CancerTypeMapping,
}

impl ReleaseDataset {
    pub fn load(
        files: &ReleaseFiles,
        mapping: &CancerTypeMapping,
    ) -> Result<Self, CompareError> {
        let mutations = parser::parse_mutations(&files.mutations)?;
        let samples = parser::parse_samples(&files.samples, mapping)?;
        let patient_ids = parser::parse_patients(&files.patients)?;

        let mut panels = HashMap::new();
        for panel_file in &files.panels {
            let (panel_id, genes) = parser::parse_panel(panel_file)?;
            panels.insert(panel_id, genes);
        }

        let sample_panels = samples
            .iter()
            .map(|s| (s.sample_id.clone(), s.panel_id.clone()))
            .collect();

        Ok(Self {
            mutations,
            samples,
            patient_ids,
            panels,
            sample_panels,
            mapping: mapping.clone(),
        })
    }

    /// Resolves a query code to its top-level rollup code, with the same
    /// identity fallback applied to samples at load time.
    pub fn rollup_code<'a>(&'a self, code: &'a str) -> &'a str {
        self.mapping.resolve_rollup(code)
    }

    pub fn unique_codes(&self, use_rollup: bool) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for sample in &self.samples {
            let code = if use_rollup {
                &sample.rollup_code
            } else {
                &sample.cancer_type_code
            };
            if seen.insert(code.clone()) {
                out.push(code.clone());
            }
        }
        out
    }

    /// Sample counts per cancer-type code, sorted descending; chart data for
    /// the cohort-distribution output.
    pub fn sample_counts_by_code(&self, use_rollup: bool) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for sample in &self.samples {
            let code = if use_rollup {
                sample.rollup_code.as_str()
            } else {
                sample.cancer_type_code.as_str()
            };
            *counts.entry(code).or_insert(0) += 1;
        }
        let mut out: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(code, n)| (code.to_string(), n))
            .collect();
        out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        out
    }
}
