use anyhow::Result;
use std::fs;
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;

pub struct Stage0Scaffold;

impl Stage0Scaffold {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Stage0Scaffold {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for Stage0Scaffold {
    fn name(&self) -> &'static str {
        "stage0_scaffold"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        for mode in &ctx.modes {
            let mode_dir = ctx.output.mode_dir(*mode);
            fs::create_dir_all(mode_dir.join("raw_data"))?;
            fs::create_dir_all(mode_dir.join("labels"))?;
            fs::create_dir_all(mode_dir.join("sample_counts_by_gene"))?;
        }
        if ctx.run_deviations {
            let dir = ctx.output.deviations_dir();
            fs::create_dir_all(dir.join("raw_data"))?;
            fs::create_dir_all(dir.join("labels"))?;
        }
        info!(
            version_dir = %ctx.output.version_dir.display(),
            "output namespaces ready"
        );
        Ok(())
    }
}
