use anyhow::{Context, Result};
use tracing::info;

use crate::cohort::ConsortiumCohort;
use crate::compare::run::{compare_pair, PairOutcome};
use crate::ctx::Ctx;
use crate::mapping::CodePair;
use crate::pipeline::Stage;

/// One-off subtype splits that deviate from the regular mapping: a coarse
/// reference code compared against a finer-grained consortium subtype.
/// (reference code, consortium code, display label)
const DEVIATION_TARGETS: &[(&str, &str, &str)] = &[
    ("UCEC", "UEC", "Uterine Corpus Endometrial Carcinoma"),
    ("UCEC", "USC", "Uterine Corpus Endometrial Carcinoma"),
    ("BRCA", "IDC", "Breast Invasive Carcinoma"),
    ("BRCA", "ILC", "Breast Invasive Carcinoma"),
];

pub struct Stage4Deviations;

impl Stage4Deviations {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Stage4Deviations {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for Stage4Deviations {
    fn name(&self) -> &'static str {
        "stage4_deviations"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        if !ctx.run_deviations {
            info!("deviation overrides disabled");
            return Ok(());
        }
        let dataset = ctx.dataset.as_ref().context("release not loaded")?;
        let reference = ctx.reference.as_ref().context("reference not wired")?;
        let consortium = ConsortiumCohort::new(dataset);

        let mut results = Vec::new();
        let mut skipped = Vec::new();
        for (reference_code, consortium_code, label) in DEVIATION_TARGETS {
            let pair = CodePair {
                reference_code: reference_code.to_string(),
                consortium_code: consortium_code.to_string(),
                label: label.to_string(),
            };
            match compare_pair(&consortium, reference, &pair, false) {
                PairOutcome::Compared(result) => results.push(result),
                PairOutcome::Skipped(skip) => skipped.push(skip),
            }
        }
        info!(
            compared = results.len(),
            skipped = skipped.len(),
            "deviation overrides finished"
        );
        ctx.deviation_results = results;
        ctx.deviation_skipped = skipped;
        Ok(())
    }
}
