use anyhow::{Context, Result};
use tracing::info;

use crate::cohort::ConsortiumCohort;
use crate::compare::run::{compare_pair, PairOutcome, PassResult, SkippedCode};
use crate::ctx::{Ctx, RunMode};
use crate::metric::GeneAggregator;
use crate::pipeline::Stage;

/// One full comparison pass over the mapping's code pairs. Instantiated once
/// per run mode; each pass writes into its own namespace and they are never
/// merged.
pub struct Stage3Compare {
    mode: RunMode,
}

impl Stage3Compare {
    pub fn new(mode: RunMode) -> Self {
        Self { mode }
    }
}

impl Stage for Stage3Compare {
    fn name(&self) -> &'static str {
        "stage3_compare"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let pass = compute_pass(ctx, self.mode)?;
        info!(
            mode = self.mode.as_str(),
            compared = pass.results.len(),
            skipped = pass.skipped.len(),
            "pass finished"
        );
        ctx.passes.push(pass);
        Ok(())
    }
}

fn compute_pass(ctx: &Ctx, mode: RunMode) -> Result<PassResult> {
    let mapping = ctx.mapping.as_ref().context("mapping not loaded")?;
    let dataset = ctx.dataset.as_ref().context("release not loaded")?;
    let reference = ctx.reference.as_ref().context("reference not wired")?;
    let consortium = ConsortiumCohort::new(dataset);
    let use_rollup = mode.use_rollup();

    let mut results = Vec::new();
    let mut skipped: Vec<SkippedCode> = Vec::new();
    let mut aggregator = GeneAggregator::new();
    let mut sample_counts = Vec::new();

    for pair in mapping.pairs() {
        match compare_pair(&consortium, reference, pair, use_rollup) {
            PairOutcome::Skipped(skip) => skipped.push(skip),
            PairOutcome::Compared(result) => {
                for row in &result.rows {
                    aggregator.observe(
                        &row.gene,
                        row.reference_percentage,
                        row.consortium_percentage,
                    );
                }
                if let Some(first) = result.rows.first() {
                    let cohort_size =
                        consortium.cohort_size(&pair.consortium_code, use_rollup) as u64;
                    sample_counts.push((
                        pair.consortium_code.clone(),
                        first.reference_total_sample_count,
                        cohort_size,
                    ));
                }
                if result.deviation.is_none() {
                    skipped.push(SkippedCode {
                        reference_code: pair.reference_code.clone(),
                        consortium_code: pair.consortium_code.clone(),
                        cohort: "join".to_string(),
                        reason: "no genes shared between cohorts".to_string(),
                    });
                }
                results.push(result);
            }
        }
    }

    let gene_deviations_raw = aggregator.finish();
    let gene_deviations_ranked = aggregator.ranked();
    let code_distribution = dataset.sample_counts_by_code(use_rollup);

    Ok(PassResult {
        mode,
        results,
        skipped,
        gene_deviations_raw,
        gene_deviations_ranked,
        sample_counts,
        code_distribution,
    })
}
