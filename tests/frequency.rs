use std::fs;
use std::path::Path;

use tempfile::TempDir;

use freqcmp::cohort::ConsortiumCohort;
use freqcmp::error::CompareError;
use freqcmp::mapping::CancerTypeMapping;
use freqcmp::release::{LocalReleaseFetcher, ReleaseDataset, ReleaseFetcher};

const VERSION: &str = "1.0";
const RELEASE: &str = "rel1";

fn write_release(root: &Path) {
    let dir = root.join(RELEASE);
    fs::create_dir_all(&dir).unwrap();

    fs::write(
        dir.join(format!("data_clinical_sample_{}.txt", VERSION)),
        "#Sample Identifier\tPatient\tOncotree Code\tAssay\n\
         SAMPLE_ID\tPATIENT_ID\tONCOTREE_CODE\tSEQ_ASSAY_ID\n\
         S1\tP1\tLUAD\tPANEL1\n\
         S2\tP2\tLUAD\tPANEL1\n\
         S3\tP3\tLUAD\tPANEL2\n\
         S4\tP4\tLUAS\tPANEL1\n\
         S5\tP5\tXYZ-UNMAPPED\tPANEL1\n",
    )
    .unwrap();

    fs::write(
        dir.join(format!("data_clinical_patient_{}.txt", VERSION)),
        "PATIENT_ID\nP1\nP2\nP3\nP4\nP5\n",
    )
    .unwrap();

    fs::write(
        dir.join(format!("data_mutations_extended_{}.txt", VERSION)),
        "#version 2.4\n\
         Hugo_Symbol\tTumor_Sample_Barcode\tVariant_Type\n\
         G\tS1\tSNP\n\
         G\tS2\tSNP\n\
         G\tS3\tSNP\n\
         KRAS\tS1\tSNP\n\
         KRAS\tS2\tDEL\n\
         G\tS4\tSNP\n",
    )
    .unwrap();

    // PANEL1 covers G and KRAS, PANEL2 does not cover G
    fs::write(
        dir.join("data_gene_panel_panel1.txt"),
        "stable_id: PANEL1\ndescription: fixture panel\ngene_list: G\tKRAS\n",
    )
    .unwrap();
    fs::write(
        dir.join("data_gene_panel_panel2.txt"),
        "stable_id: PANEL2\ngene_list: KRAS\n",
    )
    .unwrap();
}

fn write_mapping(path: &Path) {
    fs::write(
        path,
        r#"{
  "cancer_codes": [
    {"reference_code": "LUAD", "consortium_code": "LUAD", "label": "Lung Adenocarcinoma"}
  ],
  "rollup": [
    {"consortium_code": "LUAD", "rollup_codes": ["LUAS"]}
  ]
}"#,
    )
    .unwrap();
}

fn load_dataset(tmp: &TempDir) -> ReleaseDataset {
    write_release(tmp.path());
    let mapping_path = tmp.path().join("mapping.json");
    write_mapping(&mapping_path);
    let mapping = CancerTypeMapping::load(&mapping_path).unwrap();
    let files = LocalReleaseFetcher::new(tmp.path())
        .fetch(RELEASE, VERSION)
        .unwrap();
    ReleaseDataset::load(&files, &mapping).unwrap()
}

#[test]
fn uncovered_sample_is_excluded_from_numerator_and_denominator() {
    let tmp = TempDir::new().unwrap();
    let dataset = load_dataset(&tmp);
    let cohort = ConsortiumCohort::new(&dataset);

    let rows = cohort.frequency("LUAD", false).unwrap();
    let g = rows.iter().find(|r| r.gene == "G").unwrap();
    // S3's panel never sequenced G: its SNP row is dropped and the sample
    // does not count toward the denominator
    assert_eq!(g.gene_sample_count, 2);
    assert_eq!(g.total_sample_count, 2);
    assert_eq!(g.fraction, 1.0);
    assert_eq!(g.percentage, 100.0);
}

#[test]
fn non_snp_variants_are_not_counted() {
    let tmp = TempDir::new().unwrap();
    let dataset = load_dataset(&tmp);
    let cohort = ConsortiumCohort::new(&dataset);

    let rows = cohort.frequency("LUAD", false).unwrap();
    let kras = rows.iter().find(|r| r.gene == "KRAS").unwrap();
    // S2's KRAS row is a DEL; only S1 counts, over 3 panel-covered samples
    assert_eq!(kras.gene_sample_count, 1);
    assert_eq!(kras.total_sample_count, 3);
}

#[test]
fn rollup_mode_absorbs_finer_grained_codes() {
    let tmp = TempDir::new().unwrap();
    let dataset = load_dataset(&tmp);
    let cohort = ConsortiumCohort::new(&dataset);

    // direct: S4 (LUAS) is not part of LUAD
    assert_eq!(cohort.samples_for_code("LUAD", false).len(), 3);
    // rollup: LUAS folds into LUAD
    assert_eq!(cohort.samples_for_code("LUAD", true).len(), 4);

    let rows = cohort.frequency("LUAD", true).unwrap();
    let g = rows.iter().find(|r| r.gene == "G").unwrap();
    assert_eq!(g.gene_sample_count, 3);
    assert_eq!(g.total_sample_count, 3);

    // querying by the finer code resolves to the rollup first
    let via_finer = cohort.frequency("LUAS", true).unwrap();
    assert_eq!(via_finer, rows);
}

#[test]
fn unmapped_code_rolls_up_to_itself() {
    let tmp = TempDir::new().unwrap();
    let dataset = load_dataset(&tmp);

    let sample = dataset
        .samples
        .iter()
        .find(|s| s.sample_id == "S5")
        .unwrap();
    assert_eq!(sample.cancer_type_code, "XYZ-UNMAPPED");
    assert_eq!(sample.rollup_code, "XYZ-UNMAPPED");
}

#[test]
fn unknown_code_is_division_undefined() {
    let tmp = TempDir::new().unwrap();
    let dataset = load_dataset(&tmp);
    let cohort = ConsortiumCohort::new(&dataset);

    let err = cohort.frequency("NOPE", false).unwrap_err();
    assert!(matches!(err, CompareError::DivisionUndefined { .. }));
}

#[test]
fn fractions_stay_in_range() {
    let tmp = TempDir::new().unwrap();
    let dataset = load_dataset(&tmp);
    let cohort = ConsortiumCohort::new(&dataset);

    for use_rollup in [false, true] {
        for row in cohort.frequency("LUAD", use_rollup).unwrap() {
            assert!(row.fraction >= 0.0 && row.fraction <= 1.0);
            assert_eq!(row.percentage, row.fraction * 100.0);
        }
    }
}
