use std::collections::HashSet;

use anyhow::Result;
use tracing::info;

use crate::cohort::{self, ReferenceCohort, TsvReferenceGateway};
use crate::ctx::Ctx;
use crate::mapping::CancerTypeMapping;
use crate::pipeline::Stage;

/// Loads the static cancer-code mapping, the special-case whitelist, and
/// wires up the reference-cohort gateway.
pub struct Stage1Mapping;

impl Stage1Mapping {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Stage1Mapping {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for Stage1Mapping {
    fn name(&self) -> &'static str {
        "stage1_mapping"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let mapping = CancerTypeMapping::load(&ctx.mapping_path)?;
        info!(
            code_pairs = mapping.pairs().len(),
            "cancer-code mapping loaded"
        );

        let whitelist = match &ctx.whitelist_path {
            Some(path) => {
                let ids = cohort::load_whitelist(path)?;
                info!(samples = ids.len(), "special-case whitelist loaded");
                ids
            }
            None => HashSet::new(),
        };
        if ctx.special_gene.is_some() && whitelist.is_empty() {
            ctx.warnings.push(
                "special-case gene configured but whitelist is empty; restriction is a no-op"
                    .to_string(),
            );
        }

        let gateway = TsvReferenceGateway::new(ctx.reference_dir.clone(), whitelist);
        ctx.reference = Some(ReferenceCohort::new(
            Box::new(gateway),
            ctx.special_gene.clone(),
        ));
        ctx.mapping = Some(mapping);
        Ok(())
    }
}
