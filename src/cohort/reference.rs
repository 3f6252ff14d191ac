use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::cohort::{sort_rows, FrequencyRow};
use crate::error::CompareError;
use crate::io::table::Table;

/// External collaborator seam for the reference cohort's warehouse. Queries
/// are fixed, hand-written templates warehouse-side; this trait only carries
/// their results.
pub trait ReferenceGateway {
    /// Per-gene frequencies for one cancer-type code.
    fn frequencies(&self, code: &str) -> Result<Vec<FrequencyRow>, CompareError>;

    /// Recomputation of one gene's frequency restricted to the whitelisted
    /// sample subset. Empty result means no restricted data is available for
    /// this code.
    fn restricted_frequencies(
        &self,
        code: &str,
        gene: &str,
    ) -> Result<Vec<FrequencyRow>, CompareError>;
}

/// The reference cohort, with the special-case gene's sequencing-method
/// restriction applied as a post-processing substitution.
pub struct ReferenceCohort {
    gateway: Box<dyn ReferenceGateway>,
    special_gene: Option<String>,
}

impl ReferenceCohort {
    pub fn new(gateway: Box<dyn ReferenceGateway>, special_gene: Option<String>) -> Self {
        Self {
            gateway,
            special_gene,
        }
    }

    pub fn frequency(&self, code: &str) -> Result<Vec<FrequencyRow>, CompareError> {
        let rows = self.gateway.frequencies(code)?;

        let Some(gene) = &self.special_gene else {
            return Ok(rows);
        };
        if !rows.iter().any(|r| &r.gene == gene) {
            debug!(code, gene = gene.as_str(), "special-case gene absent");
            return Ok(rows);
        }

        let restricted = match self.gateway.restricted_frequencies(code, gene) {
            Ok(restricted) => restricted,
            Err(e) => {
                warn!(code, gene = gene.as_str(), error = %e, "restricted recomputation failed, keeping unrestricted value");
                return Ok(rows);
            }
        };
        Ok(apply_restriction(rows, &restricted, gene))
    }
}

/// Substitutes the restricted-subset recomputation for the special-case gene
/// when it changes the frequency value; counts are replaced along with it.
pub fn apply_restriction(
    rows: Vec<FrequencyRow>,
    restricted: &[FrequencyRow],
    gene: &str,
) -> Vec<FrequencyRow> {
    let Some(replacement) = restricted.iter().find(|r| r.gene == gene) else {
        return rows;
    };

    rows.into_iter()
        .map(|row| {
            if row.gene == gene && row.percentage != replacement.percentage {
                info!(
                    gene,
                    unrestricted = row.percentage,
                    restricted = replacement.percentage,
                    "substituting restricted-subset frequency"
                );
                replacement.clone()
            } else {
                row
            }
        })
        .collect()
}

/// File-backed gateway over pre-exported warehouse query results:
/// `<code>_results.tsv` per cancer type, plus `<code>_samples.tsv` (cohort
/// sample ids) and `<code>_<gene>_samples.tsv` (ids of samples carrying the
/// gene's mutation) for the restricted recomputation.
pub struct TsvReferenceGateway {
    dir: PathBuf,
    whitelist: HashSet<String>,
}

impl TsvReferenceGateway {
    pub fn new(dir: impl Into<PathBuf>, whitelist: HashSet<String>) -> Self {
        Self {
            dir: dir.into(),
            whitelist,
        }
    }
}

impl ReferenceGateway for TsvReferenceGateway {
    fn frequencies(&self, code: &str) -> Result<Vec<FrequencyRow>, CompareError> {
        let path = self.dir.join(format!("{}_results.tsv", code));
        if !path.is_file() {
            return Err(CompareError::remote_fetch(
                code,
                format!("no exported results at {}", path.display()),
            ));
        }
        read_frequency_table(&path, code)
    }

    fn restricted_frequencies(
        &self,
        code: &str,
        gene: &str,
    ) -> Result<Vec<FrequencyRow>, CompareError> {
        let cohort_path = self.dir.join(format!("{}_samples.tsv", code));
        let gene_path = self.dir.join(format!("{}_{}_samples.tsv", code, gene));
        if !cohort_path.is_file() || !gene_path.is_file() {
            debug!(code, gene, "no sample-level export, restriction unavailable");
            return Ok(Vec::new());
        }

        let cohort = read_sample_ids(&cohort_path)?;
        let mutated = read_sample_ids(&gene_path)?;

        let total = cohort.intersection(&self.whitelist).count() as u64;
        if total == 0 {
            debug!(code, gene, "whitelist excludes every cohort sample");
            return Ok(Vec::new());
        }
        let count = mutated
            .intersection(&self.whitelist)
            .filter(|id| cohort.contains(*id))
            .count() as u64;
        Ok(vec![FrequencyRow::new(gene, count, total)])
    }
}

fn read_frequency_table(path: &Path, code: &str) -> Result<Vec<FrequencyRow>, CompareError> {
    let source = path.display().to_string();
    let table = Table::read_tsv(path)?;
    let gene = table.column("gene", &source)?;
    let count = table.column("gene_sample_count", &source)?;
    let total = table.column("total_sample_count", &source)?;

    // Malformed numeric fields are non-numeric/null: the row is excluded
    // from aggregation rather than aborting the load.
    let mut malformed = 0usize;
    let mut rows = Vec::new();
    for row in &table.rows {
        let (Ok(count), Ok(total)) = (row[count].parse::<u64>(), row[total].parse::<u64>())
        else {
            malformed += 1;
            continue;
        };
        if total == 0 {
            malformed += 1;
            continue;
        }
        rows.push(FrequencyRow::new(row[gene].as_str(), count, total));
    }
    if malformed > 0 {
        warn!(source, code, malformed, "rows with malformed numeric fields excluded");
    }
    sort_rows(&mut rows);
    Ok(rows)
}

fn read_sample_ids(path: &Path) -> Result<HashSet<String>, CompareError> {
    let source = path.display().to_string();
    let table = Table::read_tsv(path)?;
    let sample = table.column("sample_id", &source)?;
    Ok(table.rows.iter().map(|row| row[sample].clone()).collect())
}
