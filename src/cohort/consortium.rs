use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::cohort::{sort_rows, FrequencyRow};
use crate::error::CompareError;
use crate::release::{MutationRecord, ReleaseDataset, SNP_VARIANT};

/// Per-gene mutation frequency over one cancer type of the consortium
/// release, restricted to samples whose sequencing panel actually covers the
/// gene. Without the panel restriction, under-covered panels would depress
/// frequency estimates for genes not universally sequenced.
pub struct ConsortiumCohort<'a> {
    dataset: &'a ReleaseDataset,
}

impl<'a> ConsortiumCohort<'a> {
    pub fn new(dataset: &'a ReleaseDataset) -> Self {
        Self { dataset }
    }

    /// Exact, case-sensitive match on the direct or rollup code.
    pub fn samples_for_code(&self, code: &str, use_rollup: bool) -> HashSet<&'a str> {
        self.dataset
            .samples
            .iter()
            .filter(|s| {
                let sample_code = if use_rollup {
                    &s.rollup_code
                } else {
                    &s.cancer_type_code
                };
                sample_code == code
            })
            .map(|s| s.sample_id.as_str())
            .collect()
    }

    /// SNP mutations whose sample belongs to the cancer type.
    pub fn mutations_for_code(&self, code: &str, use_rollup: bool) -> Vec<&'a MutationRecord> {
        let samples = self.samples_for_code(code, use_rollup);
        self.dataset
            .mutations
            .iter()
            .filter(|m| m.variant_type == SNP_VARIANT && samples.contains(m.sample_id.as_str()))
            .collect()
    }

    /// Further restricts to mutations whose gene is covered by the sample's
    /// assigned panel. Rows with no resolvable panel are dropped, counted,
    /// and reported; not fatal.
    pub fn mutations_in_panel(&self, code: &str, use_rollup: bool) -> Vec<&'a MutationRecord> {
        let all = self.mutations_for_code(code, use_rollup);
        let total = all.len();

        let mut no_panel = 0usize;
        let kept: Vec<&MutationRecord> = all
            .into_iter()
            .filter(|m| {
                let Some(panel_id) = self.dataset.sample_panels.get(&m.sample_id) else {
                    no_panel += 1;
                    return false;
                };
                let Some(genes) = self.dataset.panels.get(panel_id) else {
                    no_panel += 1;
                    return false;
                };
                genes.contains(&m.gene)
            })
            .collect();

        let dropped = total - kept.len();
        if no_panel > 0 {
            warn!(code, no_panel, "mutations dropped: sample panel unresolved");
        }
        debug!(code, total, dropped, "panel restriction applied");
        kept
    }

    /// Number of samples carrying the cancer-type code, rollup-resolved the
    /// same way `frequency` is.
    pub fn cohort_size(&self, code: &str, use_rollup: bool) -> usize {
        let code = if use_rollup {
            self.dataset.rollup_code(code)
        } else {
            code
        };
        self.samples_for_code(code, use_rollup).len()
    }

    /// Per-gene frequency: distinct mutated samples over the samples whose
    /// panel covers the gene. A sample whose assay never sequenced the gene
    /// is excluded from both numerator and denominator, so under-covered
    /// panels cannot depress the estimate. In rollup mode the query code is
    /// first resolved to its top-level code.
    pub fn frequency(
        &self,
        code: &str,
        use_rollup: bool,
    ) -> Result<Vec<FrequencyRow>, CompareError> {
        let code = if use_rollup {
            self.dataset.rollup_code(code)
        } else {
            code
        };

        let all_samples = self.samples_for_code(code, use_rollup);
        if all_samples.is_empty() {
            return Err(CompareError::division_undefined(format!(
                "cancer type '{}' has no samples in the consortium release",
                code
            )));
        }

        let mut samples_by_gene: HashMap<&str, HashSet<&str>> = HashMap::new();
        for mutation in self.mutations_in_panel(code, use_rollup) {
            samples_by_gene
                .entry(mutation.gene.as_str())
                .or_default()
                .insert(mutation.sample_id.as_str());
        }

        let mut rows: Vec<FrequencyRow> = samples_by_gene
            .into_iter()
            .map(|(gene, mutated)| {
                let eligible = all_samples
                    .iter()
                    .filter(|sample| self.panel_covers(sample, gene))
                    .count() as u64;
                FrequencyRow::new(gene, mutated.len() as u64, eligible)
            })
            .collect();
        sort_rows(&mut rows);
        Ok(rows)
    }

    fn panel_covers(&self, sample_id: &str, gene: &str) -> bool {
        self.dataset
            .sample_panels
            .get(sample_id)
            .and_then(|panel_id| self.dataset.panels.get(panel_id))
            .is_some_and(|genes| genes.contains(gene))
    }
}
