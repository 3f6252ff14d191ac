use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::release::{LocalReleaseFetcher, ReleaseDataset, ReleaseFetcher};

/// Locates and parses the consortium release into typed tables.
pub struct Stage2Release;

impl Stage2Release {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Stage2Release {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for Stage2Release {
    fn name(&self) -> &'static str {
        "stage2_release"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let mapping = ctx.mapping.as_ref().context("mapping not loaded")?;

        let fetcher = LocalReleaseFetcher::new(ctx.release_root.clone());
        let files = fetcher.fetch(&ctx.release_id, &ctx.release_version)?;
        let dataset = ReleaseDataset::load(&files, mapping)?;

        info!(
            mutations = dataset.mutations.len(),
            samples = dataset.samples.len(),
            patients = dataset.patient_ids.len(),
            panels = dataset.panels.len(),
            "release parsed"
        );

        ctx.dataset = Some(dataset);
        Ok(())
    }
}
