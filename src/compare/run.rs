use tracing::{info, warn};

use crate::cohort::{ConsortiumCohort, ReferenceCohort};
use crate::compare::{join, ComparisonRow};
use crate::ctx::RunMode;
use crate::error::CompareError;
use crate::labels::{select_labels, PointLabel};
use crate::mapping::CodePair;
use crate::metric::{self, Deviation, GeneDeviation};

/// The comparison of one cancer-type code pair.
#[derive(Debug, Clone)]
pub struct CodeResult {
    pub pair: CodePair,
    pub rows: Vec<ComparisonRow>,
    /// None when the join produced no gene pairs; the cancer type is still
    /// written out but contributes nothing to the metric tables.
    pub deviation: Option<Deviation>,
    pub labels: Vec<PointLabel>,
}

#[derive(Debug, Clone)]
pub struct SkippedCode {
    pub reference_code: String,
    pub consortium_code: String,
    pub cohort: String,
    pub reason: String,
}

pub enum PairOutcome {
    Compared(CodeResult),
    Skipped(SkippedCode),
}

/// One full pass over the mapping table in a single run mode.
#[derive(Debug)]
pub struct PassResult {
    pub mode: RunMode,
    pub results: Vec<CodeResult>,
    pub skipped: Vec<SkippedCode>,
    pub gene_deviations_raw: Vec<GeneDeviation>,
    pub gene_deviations_ranked: Vec<GeneDeviation>,
    /// (consortium code, reference total samples, consortium total samples)
    pub sample_counts: Vec<(String, u64, u64)>,
    /// consortium sample counts per code, descending
    pub code_distribution: Vec<(String, usize)>,
}

/// Compares one code pair. Errors in either cohort skip the pair; nothing
/// here terminates the batch.
pub fn compare_pair(
    consortium: &ConsortiumCohort<'_>,
    reference: &ReferenceCohort,
    pair: &CodePair,
    use_rollup: bool,
) -> PairOutcome {
    info!(
        reference_code = pair.reference_code.as_str(),
        consortium_code = pair.consortium_code.as_str(),
        "comparing cancer type"
    );

    let consortium_rows = match consortium.frequency(&pair.consortium_code, use_rollup) {
        Ok(rows) => rows,
        Err(e) => {
            warn!(
                consortium_code = pair.consortium_code.as_str(),
                error = %e,
                "skipping cancer type: consortium frequency unavailable"
            );
            return PairOutcome::Skipped(SkippedCode {
                reference_code: pair.reference_code.clone(),
                consortium_code: pair.consortium_code.clone(),
                cohort: "consortium".to_string(),
                reason: e.to_string(),
            });
        }
    };

    let reference_rows = match reference.frequency(&pair.reference_code) {
        Ok(rows) => rows,
        Err(e) => {
            warn!(
                reference_code = pair.reference_code.as_str(),
                error = %e,
                "skipping cancer type: reference frequency unavailable"
            );
            return PairOutcome::Skipped(SkippedCode {
                reference_code: pair.reference_code.clone(),
                consortium_code: pair.consortium_code.clone(),
                cohort: "reference".to_string(),
                reason: e.to_string(),
            });
        }
    };

    let rows = join(&reference_rows, &consortium_rows);
    let points: Vec<(f64, f64)> = rows
        .iter()
        .map(|r| (r.reference_percentage, r.consortium_percentage))
        .collect();

    let deviation = match metric::deviation(&points) {
        Ok(d) => {
            info!(
                consortium_code = pair.consortium_code.as_str(),
                rmsd = d.rmsd,
                weighted_rmsd = d.weighted_rmsd,
                gene_pairs = rows.len(),
                "deviation computed"
            );
            Some(d)
        }
        Err(CompareError::DivisionUndefined { .. }) => {
            warn!(
                consortium_code = pair.consortium_code.as_str(),
                "no shared genes between cohorts, deviation undefined"
            );
            None
        }
        Err(e) => {
            warn!(consortium_code = pair.consortium_code.as_str(), error = %e, "deviation failed");
            None
        }
    };

    let labels = select_labels(&rows);
    PairOutcome::Compared(CodeResult {
        pair: pair.clone(),
        rows,
        deviation,
        labels,
    })
}
