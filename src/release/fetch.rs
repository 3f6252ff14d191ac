use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::CompareError;

/// The tabular files making up one consortium release.
#[derive(Debug, Clone)]
pub struct ReleaseFiles {
    pub mutations: PathBuf,
    pub samples: PathBuf,
    pub patients: PathBuf,
    pub panels: Vec<PathBuf>,
}

/// External collaborator seam: hands the core a release's files. The
/// shipping implementation reads an already-synced directory; remote sync
/// and authentication live outside this crate.
pub trait ReleaseFetcher {
    fn fetch(&self, release_id: &str, version: &str) -> Result<ReleaseFiles, CompareError>;
}

pub struct LocalReleaseFetcher {
    root: PathBuf,
}

impl LocalReleaseFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ReleaseFetcher for LocalReleaseFetcher {
    fn fetch(&self, release_id: &str, version: &str) -> Result<ReleaseFiles, CompareError> {
        let dir = self.root.join(release_id);
        let mutations = require(dir.join(format!("data_mutations_extended_{}.txt", version)))?;
        let samples = require(dir.join(format!("data_clinical_sample_{}.txt", version)))?;
        let patients = require(dir.join(format!("data_clinical_patient_{}.txt", version)))?;
        let panels = panel_files(&dir)?;
        info!(
            release = release_id,
            version,
            panel_count = panels.len(),
            "release files located"
        );

        Ok(ReleaseFiles {
            mutations,
            samples,
            patients,
            panels,
        })
    }
}

fn require(path: PathBuf) -> Result<PathBuf, CompareError> {
    if !path.is_file() {
        return Err(CompareError::parse(
            path.display().to_string(),
            "required release file missing",
        ));
    }
    Ok(path)
}

fn panel_files(dir: &Path) -> Result<Vec<PathBuf>, CompareError> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| CompareError::parse(dir.display().to_string(), e.to_string()))?;

    let mut panels = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| CompareError::parse(dir.display().to_string(), e.to_string()))?;
        let path = entry.path();
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with("data_gene_panel") && name.ends_with(".txt") {
            panels.push(path);
        }
    }
    panels.sort();
    Ok(panels)
}
