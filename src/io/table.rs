use std::path::Path;

use tracing::warn;

use crate::error::CompareError;

/// A header-indexed tab-separated table. Lines starting with `#` are
/// comments; rows shorter than the header are skipped per-row rather than
/// failing the whole file.
#[derive(Debug)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub skipped_rows: usize,
}

impl Table {
    pub fn read_tsv(path: &Path) -> Result<Self, CompareError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CompareError::parse(path.display().to_string(), e.to_string()))?;
        Self::parse(&content, &path.display().to_string())
    }

    pub fn parse(content: &str, source: &str) -> Result<Self, CompareError> {
        let mut lines = content
            .lines()
            .filter(|l| !l.starts_with('#') && !l.trim().is_empty());

        let header = lines
            .next()
            .ok_or_else(|| CompareError::parse(source, "empty table"))?;
        let columns: Vec<String> = header.split('\t').map(|c| c.trim().to_string()).collect();

        let mut rows = Vec::new();
        let mut skipped_rows = 0usize;
        for line in lines {
            let fields: Vec<String> = line.split('\t').map(|f| f.trim().to_string()).collect();
            if fields.len() < columns.len() {
                skipped_rows += 1;
                continue;
            }
            rows.push(fields);
        }
        if skipped_rows > 0 {
            warn!(source, skipped_rows, "skipped short rows");
        }

        Ok(Self {
            columns,
            rows,
            skipped_rows,
        })
    }

    /// Column presence is validated up front so a schema mismatch fails at
    /// parse time, not during a later lookup.
    pub fn column(&self, name: &str, source: &str) -> Result<usize, CompareError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| CompareError::parse(source, format!("missing column '{}'", name)))
    }
}
