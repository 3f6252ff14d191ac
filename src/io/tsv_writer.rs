use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::compare::ComparisonRow;
use crate::labels::PointLabel;
use crate::mapping::CodePair;
use crate::metric::{Deviation, GeneDeviation};

fn create(path: &Path) -> Result<BufWriter<std::fs::File>> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

pub fn write_comparison_rows(path: &Path, rows: &[ComparisonRow]) -> Result<()> {
    let mut w = create(path)?;
    writeln!(
        w,
        "gene\treference_fraction\treference_percentage\treference_gene_sample_count\treference_total_sample_count\tconsortium_fraction\tconsortium_percentage\tconsortium_gene_sample_count\tconsortium_total_sample_count"
    )?;
    for r in rows {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            r.gene,
            r.reference_fraction,
            r.reference_percentage,
            r.reference_gene_sample_count,
            r.reference_total_sample_count,
            r.consortium_fraction,
            r.consortium_percentage,
            r.consortium_gene_sample_count,
            r.consortium_total_sample_count
        )?;
    }
    Ok(())
}

pub fn write_labels(path: &Path, labels: &[PointLabel]) -> Result<()> {
    let mut w = create(path)?;
    writeln!(w, "gene\tx\ty")?;
    for l in labels {
        writeln!(w, "{}\t{}\t{}", l.gene, l.x, l.y)?;
    }
    Ok(())
}

pub fn write_rmsd_by_cancer_type(
    path: &Path,
    rows: &[(CodePair, Deviation)],
) -> Result<()> {
    let mut sorted: Vec<&(CodePair, Deviation)> = rows.iter().collect();
    sorted.sort_by(|a, b| {
        b.1.rmsd
            .partial_cmp(&a.1.rmsd)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.consortium_code.cmp(&b.0.consortium_code))
    });

    let mut w = create(path)?;
    writeln!(
        w,
        "reference_code\tconsortium_code\trmsd\tweighted_rmsd"
    )?;
    for (pair, d) in sorted {
        writeln!(
            w,
            "{}\t{}\t{:.2}\t{:.2}",
            pair.reference_code, pair.consortium_code, d.rmsd, d.weighted_rmsd
        )?;
    }
    Ok(())
}

pub fn write_gene_deviations(path: &Path, rows: &[GeneDeviation]) -> Result<()> {
    let mut w = create(path)?;
    writeln!(
        w,
        "gene\trmsd\tweighted_rmsd\terror_sum\tcancer_type_count"
    )?;
    for g in rows {
        writeln!(
            w,
            "{}\t{:.2}\t{:.2}\t{}\t{}",
            g.gene, g.rmsd, g.weighted_rmsd, g.error_sum, g.cancer_type_count
        )?;
    }
    Ok(())
}

pub fn write_sample_counts_by_gene(path: &Path, rows: &[ComparisonRow]) -> Result<()> {
    let mut w = create(path)?;
    writeln!(
        w,
        "gene\treference_gene_sample_count\tconsortium_gene_sample_count"
    )?;
    for r in rows {
        writeln!(
            w,
            "{}\t{}\t{}",
            r.gene, r.reference_gene_sample_count, r.consortium_gene_sample_count
        )?;
    }
    Ok(())
}

pub fn write_sample_counts_by_cancer_type(
    path: &Path,
    rows: &[(String, u64, u64)],
) -> Result<()> {
    let mut w = create(path)?;
    writeln!(
        w,
        "consortium_code\treference_total_sample_count\tconsortium_total_sample_count"
    )?;
    for (code, reference, consortium) in rows {
        writeln!(w, "{}\t{}\t{}", code, reference, consortium)?;
    }
    Ok(())
}

pub fn write_code_distribution(path: &Path, rows: &[(String, usize)]) -> Result<()> {
    let mut w = create(path)?;
    writeln!(w, "cancer_type_code\tsample_count")?;
    for (code, count) in rows {
        writeln!(w, "{}\t{}", code, count)?;
    }
    Ok(())
}
