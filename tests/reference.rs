use std::collections::HashSet;
use std::fs;

use tempfile::TempDir;

use freqcmp::cohort::reference::apply_restriction;
use freqcmp::cohort::{
    load_whitelist, FrequencyRow, ReferenceCohort, ReferenceGateway, TsvReferenceGateway,
};
use freqcmp::error::CompareError;

#[test]
fn restriction_substitutes_only_when_the_value_changes() {
    let rows = vec![
        FrequencyRow::new("TERT", 40, 100),
        FrequencyRow::new("TP53", 30, 100),
    ];
    let restricted = vec![FrequencyRow::new("TERT", 4, 20)];

    let out = apply_restriction(rows.clone(), &restricted, "TERT");
    let tert = out.iter().find(|r| r.gene == "TERT").unwrap();
    assert_eq!(tert.gene_sample_count, 4);
    assert_eq!(tert.total_sample_count, 20);
    assert_eq!(tert.percentage, 20.0);
    // other genes untouched
    assert_eq!(out.iter().find(|r| r.gene == "TP53").unwrap().percentage, 30.0);

    // same percentage: the unrestricted row stays
    let same = vec![FrequencyRow::new("TERT", 8, 20)];
    let out = apply_restriction(rows.clone(), &same, "TERT");
    let tert = out.iter().find(|r| r.gene == "TERT").unwrap();
    assert_eq!(tert.gene_sample_count, 40);

    // restricted set missing the gene: no substitution either
    let out = apply_restriction(rows, &[], "TERT");
    assert_eq!(out.iter().find(|r| r.gene == "TERT").unwrap().gene_sample_count, 40);
}

#[test]
fn gateway_reads_exported_results_sorted_by_frequency() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("LUAD_results.tsv"),
        "gene\tgene_sample_count\ttotal_sample_count\n\
         KRAS\t30\t100\n\
         TP53\t40\t100\n",
    )
    .unwrap();

    let gateway = TsvReferenceGateway::new(tmp.path(), HashSet::new());
    let rows = gateway.frequencies("LUAD").unwrap();
    let genes: Vec<&str> = rows.iter().map(|r| r.gene.as_str()).collect();
    assert_eq!(genes, ["TP53", "KRAS"]);
    assert_eq!(rows[0].percentage, 40.0);
}

#[test]
fn malformed_numeric_rows_are_excluded_not_fatal() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("LUAD_results.tsv"),
        "gene\tgene_sample_count\ttotal_sample_count\n\
         TP53\t40\t100\n\
         BAD1\tnull\t100\n\
         BAD2\t5\tzero\n\
         BAD3\t5\t0\n",
    )
    .unwrap();

    let gateway = TsvReferenceGateway::new(tmp.path(), HashSet::new());
    let rows = gateway.frequencies("LUAD").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].gene, "TP53");
}

#[test]
fn missing_export_is_a_remote_fetch_error() {
    let tmp = TempDir::new().unwrap();
    let gateway = TsvReferenceGateway::new(tmp.path(), HashSet::new());
    let err = gateway.frequencies("LUAD").unwrap_err();
    assert!(matches!(err, CompareError::RemoteFetch { .. }));
}

#[test]
fn restricted_recompute_intersects_the_whitelist() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("SKCM_samples.tsv"),
        "sample_id\nW1\nW2\nW3\nOUT1\n",
    )
    .unwrap();
    fs::write(
        tmp.path().join("SKCM_TERT_samples.tsv"),
        "sample_id\nW1\nOUT1\n",
    )
    .unwrap();

    let whitelist: HashSet<String> =
        ["W1", "W2", "W3"].iter().map(|s| s.to_string()).collect();
    let gateway = TsvReferenceGateway::new(tmp.path(), whitelist);
    let rows = gateway.restricted_frequencies("SKCM", "TERT").unwrap();
    assert_eq!(rows.len(), 1);
    // OUT1 falls outside the whitelist on both sides
    assert_eq!(rows[0].gene_sample_count, 1);
    assert_eq!(rows[0].total_sample_count, 3);
}

#[test]
fn restricted_recompute_without_exports_is_empty() {
    let tmp = TempDir::new().unwrap();
    let gateway = TsvReferenceGateway::new(tmp.path(), HashSet::new());
    assert!(gateway.restricted_frequencies("SKCM", "TERT").unwrap().is_empty());
}

#[test]
fn cohort_applies_the_restriction_end_to_end() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("SKCM_results.tsv"),
        "gene\tgene_sample_count\ttotal_sample_count\n\
         TERT\t60\t100\n\
         BRAF\t50\t100\n",
    )
    .unwrap();
    fs::write(tmp.path().join("SKCM_samples.tsv"), "sample_id\nW1\nW2\n").unwrap();
    fs::write(tmp.path().join("SKCM_TERT_samples.tsv"), "sample_id\nW1\n").unwrap();

    let whitelist: HashSet<String> = ["W1", "W2"].iter().map(|s| s.to_string()).collect();
    let gateway = TsvReferenceGateway::new(tmp.path(), whitelist);
    let cohort = ReferenceCohort::new(Box::new(gateway), Some("TERT".to_string()));

    let rows = cohort.frequency("SKCM").unwrap();
    let tert = rows.iter().find(|r| r.gene == "TERT").unwrap();
    assert_eq!(tert.percentage, 50.0);
    assert_eq!(tert.total_sample_count, 2);

    // BRAF is not the special-case gene
    assert_eq!(rows.iter().find(|r| r.gene == "BRAF").unwrap().percentage, 50.0);
}

#[test]
fn no_special_gene_means_no_restriction() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("SKCM_results.tsv"),
        "gene\tgene_sample_count\ttotal_sample_count\nTERT\t60\t100\n",
    )
    .unwrap();
    fs::write(tmp.path().join("SKCM_samples.tsv"), "sample_id\nW1\n").unwrap();
    fs::write(tmp.path().join("SKCM_TERT_samples.tsv"), "sample_id\nW1\n").unwrap();

    let gateway = TsvReferenceGateway::new(tmp.path(), HashSet::new());
    let cohort = ReferenceCohort::new(Box::new(gateway), None);
    let rows = cohort.frequency("SKCM").unwrap();
    assert_eq!(rows[0].percentage, 60.0);
}

#[test]
fn whitelist_is_the_union_of_both_id_columns() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("whitelist.csv");
    fs::write(
        &path,
        "# sequencing-method supplement\n\
         specimen_id,donor_id,method\n\
         SP1,DO1,wgs\n\
         SP2,DO1,wgs\n\
         ,DO2,wgs\n",
    )
    .unwrap();

    let ids = load_whitelist(&path).unwrap();
    let mut got: Vec<&str> = ids.iter().map(|s| s.as_str()).collect();
    got.sort_unstable();
    assert_eq!(got, ["DO1", "DO2", "SP1", "SP2"]);
}

#[test]
fn whitelist_requires_both_id_columns() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("whitelist.csv");
    fs::write(&path, "specimen_id,method\nSP1,wgs\n").unwrap();
    assert!(matches!(
        load_whitelist(&path).unwrap_err(),
        CompareError::Parse { .. }
    ));
}
