use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::compare::run::PassResult;
use crate::ctx::Ctx;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseMeta {
    pub id: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RmsdByCancerType {
    pub reference_code: String,
    pub consortium_code: String,
    pub rmsd: f64,
    pub weighted_rmsd: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedCodeReport {
    pub reference_code: String,
    pub consortium_code: String,
    pub cohort: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassReport {
    pub mode: String,
    pub cancer_types_compared: usize,
    pub skipped: Vec<SkippedCodeReport>,
    pub rmsd_by_cancer_type: Vec<RmsdByCancerType>,
    pub ranked_gene_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub tool: String,
    pub version: String,
    pub release: ReleaseMeta,
    pub passes: Vec<PassReport>,
    pub deviation_overrides_compared: usize,
    pub deviation_overrides_skipped: Vec<SkippedCodeReport>,
    pub warnings: Vec<String>,
}

pub fn build_report(ctx: &Ctx) -> RunReport {
    RunReport {
        tool: "freqcmp".to_string(),
        version: ctx.tool_version.clone(),
        release: ReleaseMeta {
            id: ctx.release_id.clone(),
            version: ctx.release_version.clone(),
        },
        passes: ctx.passes.iter().map(pass_report).collect(),
        deviation_overrides_compared: ctx.deviation_results.len(),
        deviation_overrides_skipped: ctx
            .deviation_skipped
            .iter()
            .map(|s| SkippedCodeReport {
                reference_code: s.reference_code.clone(),
                consortium_code: s.consortium_code.clone(),
                cohort: s.cohort.clone(),
                reason: s.reason.clone(),
            })
            .collect(),
        warnings: ctx.warnings.clone(),
    }
}

fn pass_report(pass: &PassResult) -> PassReport {
    let mut rmsd_by_cancer_type: Vec<RmsdByCancerType> = pass
        .results
        .iter()
        .filter_map(|r| {
            r.deviation.map(|d| RmsdByCancerType {
                reference_code: r.pair.reference_code.clone(),
                consortium_code: r.pair.consortium_code.clone(),
                rmsd: d.rmsd,
                weighted_rmsd: d.weighted_rmsd,
            })
        })
        .collect();
    rmsd_by_cancer_type.sort_by(|a, b| {
        b.rmsd
            .partial_cmp(&a.rmsd)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.consortium_code.cmp(&b.consortium_code))
    });

    PassReport {
        mode: pass.mode.as_str().to_string(),
        cancer_types_compared: pass.results.len(),
        skipped: pass
            .skipped
            .iter()
            .map(|s| SkippedCodeReport {
                reference_code: s.reference_code.clone(),
                consortium_code: s.consortium_code.clone(),
                cohort: s.cohort.clone(),
                reason: s.reason.clone(),
            })
            .collect(),
        rmsd_by_cancer_type,
        ranked_gene_count: pass.gene_deviations_ranked.len(),
    }
}

pub fn write_report(path: &Path, ctx: &Ctx) -> Result<()> {
    let report = build_report(ctx);
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &report)?;
    Ok(())
}
