use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::CompareError;

/// One comparable cancer type: the reference cohort's code, the consortium
/// release's code, and a human-readable display label.
#[derive(Debug, Clone, Deserialize)]
pub struct CodePair {
    pub reference_code: String,
    pub consortium_code: String,
    pub label: String,
}

#[derive(Debug, Deserialize)]
struct RollupGroup {
    consortium_code: String,
    rollup_codes: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct MappingFile {
    cancer_codes: Vec<CodePair>,
    #[serde(default)]
    rollup: Vec<RollupGroup>,
}

/// Static cancer-code mapping resource. Loaded once, read-only for the
/// lifetime of a run.
#[derive(Debug, Clone)]
pub struct CancerTypeMapping {
    pairs: Vec<CodePair>,
    /// finer-grained code -> top-level rollup code
    rollup: HashMap<String, String>,
}

impl CancerTypeMapping {
    pub fn load(path: &Path) -> Result<Self, CompareError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CompareError::parse(path.display().to_string(), e.to_string()))?;
        let file: MappingFile = serde_json::from_str(&content)
            .map_err(|e| CompareError::parse(path.display().to_string(), e.to_string()))?;

        let mut rollup = HashMap::new();
        for group in file.rollup {
            for code in group.rollup_codes {
                rollup.insert(code, group.consortium_code.clone());
            }
        }

        Ok(Self {
            pairs: file.cancer_codes,
            rollup,
        })
    }

    pub fn from_parts(pairs: Vec<CodePair>, rollup: HashMap<String, String>) -> Self {
        Self { pairs, rollup }
    }

    pub fn pairs(&self) -> &[CodePair] {
        &self.pairs
    }

    pub fn rollup_for(&self, code: &str) -> Option<&str> {
        self.rollup.get(code).map(|s| s.as_str())
    }

    /// A sample must always carry a real rollup code: on a lookup miss the
    /// original code stands in for its own rollup.
    pub fn resolve_rollup<'a>(&'a self, code: &'a str) -> &'a str {
        self.rollup_for(code).unwrap_or(code)
    }
}
