use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::compare::run::{CodeResult, PassResult};
use crate::compare::{self, CHART_MAX_ROWS};
use crate::ctx::Ctx;
use crate::io::{report, tsv_writer};
use crate::mapping::CodePair;
use crate::metric::Deviation;
use crate::pipeline::Stage;

pub struct Stage5Output;

impl Stage5Output {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Stage5Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for Stage5Output {
    fn name(&self) -> &'static str {
        "stage5_output"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        for pass in &ctx.passes {
            let dir = ctx.output.mode_dir(pass.mode);
            write_pass(&dir, pass, ctx.special_gene.as_deref())?;
        }

        if !ctx.deviation_results.is_empty() {
            let dir = ctx.output.deviations_dir();
            for result in &ctx.deviation_results {
                write_code_result(&dir, result)?;
            }
        }

        let report_path = ctx.output.report_path();
        report::write_report(&report_path, ctx)?;
        info!(report = %report_path.display(), "outputs written");
        Ok(())
    }
}

fn write_pass(dir: &Path, pass: &PassResult, special_gene: Option<&str>) -> Result<()> {
    let raw = dir.join("raw_data");

    for result in pass.results.iter() {
        write_code_result(dir, result)?;

        let counts = compare::count_chart_rows(&result.rows);
        tsv_writer::write_sample_counts_by_gene(
            &dir.join("sample_counts_by_gene")
                .join(format!("{}.tsv", result.pair.consortium_code)),
            &counts,
        )?;
    }

    let deviations: Vec<(CodePair, Deviation)> = pass
        .results
        .iter()
        .filter_map(|r| r.deviation.map(|d| (r.pair.clone(), d)))
        .collect();
    tsv_writer::write_rmsd_by_cancer_type(&raw.join("rmsd_by_cancer_type.tsv"), &deviations)?;

    tsv_writer::write_gene_deviations(
        &raw.join("rmsd_by_gene_raw.tsv"),
        &pass.gene_deviations_raw,
    )?;
    tsv_writer::write_gene_deviations(&raw.join("rmsd_by_gene.tsv"), &pass.gene_deviations_ranked)?;
    if let Some(gene) = special_gene {
        let without: Vec<_> = pass
            .gene_deviations_ranked
            .iter()
            .filter(|g| g.gene != gene)
            .cloned()
            .collect();
        tsv_writer::write_gene_deviations(
            &raw.join(format!("rmsd_by_gene_excluding_{}.tsv", gene)),
            &without,
        )?;
    }

    tsv_writer::write_sample_counts_by_cancer_type(
        &dir.join("sample_counts_by_cancer_type.tsv"),
        &pass.sample_counts,
    )?;

    let mut distribution = pass.code_distribution.clone();
    distribution.truncate(CHART_MAX_ROWS);
    tsv_writer::write_code_distribution(&dir.join("code_distribution.tsv"), &distribution)?;

    Ok(())
}

fn write_code_result(dir: &Path, result: &CodeResult) -> Result<()> {
    tsv_writer::write_comparison_rows(
        &dir.join("raw_data")
            .join(format!("{}_results.tsv", result.pair.consortium_code)),
        &result.rows,
    )?;
    tsv_writer::write_labels(
        &dir.join("labels")
            .join(format!("{}_labels.tsv", result.pair.consortium_code)),
        &result.labels,
    )?;
    Ok(())
}
