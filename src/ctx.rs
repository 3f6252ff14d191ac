use std::path::PathBuf;

use crate::cohort::ReferenceCohort;
use crate::compare::run::{CodeResult, PassResult, SkippedCode};
use crate::mapping::CancerTypeMapping;
use crate::release::ReleaseDataset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Direct,
    Rollup,
}

impl RunMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Direct => "direct",
            RunMode::Rollup => "rollup",
        }
    }

    pub fn use_rollup(&self) -> bool {
        matches!(self, RunMode::Rollup)
    }
}

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub out_dir: PathBuf,
    /// `<out_dir>/<release_version>`; run-mode namespaces live below it.
    pub version_dir: PathBuf,
}

impl OutputPaths {
    pub fn mode_dir(&self, mode: RunMode) -> PathBuf {
        self.version_dir.join(mode.as_str())
    }

    pub fn deviations_dir(&self) -> PathBuf {
        self.version_dir.join("deviations")
    }

    pub fn report_path(&self) -> PathBuf {
        self.version_dir.join("report.json")
    }
}

/// Shared run context threaded through the pipeline stages.
pub struct Ctx {
    // configuration
    pub release_root: PathBuf,
    pub release_id: String,
    pub release_version: String,
    pub reference_dir: PathBuf,
    pub mapping_path: PathBuf,
    pub whitelist_path: Option<PathBuf>,
    pub modes: Vec<RunMode>,
    pub special_gene: Option<String>,
    pub run_deviations: bool,
    pub tool_version: String,

    // loaded by stages
    pub mapping: Option<CancerTypeMapping>,
    pub dataset: Option<ReleaseDataset>,
    pub reference: Option<ReferenceCohort>,

    // accumulated results
    pub passes: Vec<PassResult>,
    pub deviation_results: Vec<CodeResult>,
    pub deviation_skipped: Vec<SkippedCode>,
    pub warnings: Vec<String>,

    pub output: OutputPaths,
}

impl Ctx {
    pub fn new(
        release_root: PathBuf,
        release_id: String,
        release_version: String,
        reference_dir: PathBuf,
        mapping_path: PathBuf,
        out_dir: PathBuf,
        tool_version: &str,
    ) -> Self {
        let version_dir = out_dir.join(&release_version);
        Self {
            release_root,
            release_id,
            release_version,
            reference_dir,
            mapping_path,
            whitelist_path: None,
            modes: vec![RunMode::Rollup, RunMode::Direct],
            special_gene: None,
            run_deviations: true,
            tool_version: tool_version.to_string(),
            mapping: None,
            dataset: None,
            reference: None,
            passes: Vec::new(),
            deviation_results: Vec::new(),
            deviation_skipped: Vec::new(),
            warnings: Vec::new(),
            output: OutputPaths {
                out_dir,
                version_dir,
            },
        }
    }
}
