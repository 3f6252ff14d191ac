use crate::ctx::Ctx;

pub fn format_summary(ctx: &Ctx) -> String {
    let mut out = String::new();
    out.push_str(&format!("freqcmp v{}\n", ctx.tool_version));
    out.push_str(&format!(
        "Release: {} ({})\n",
        ctx.release_id, ctx.release_version
    ));

    for pass in &ctx.passes {
        out.push_str(&format!(
            "[{}] compared {} cancer types, skipped {}\n",
            pass.mode.as_str(),
            pass.results.len(),
            pass.skipped.len()
        ));
        if let Some(worst) = pass.gene_deviations_ranked.first() {
            out.push_str(&format!(
                "[{}] largest per-gene deviation: {} (rmsd {:.2})\n",
                pass.mode.as_str(),
                worst.gene,
                worst.rmsd
            ));
        }
        for skip in &pass.skipped {
            out.push_str(&format!(
                "[{}] skipped {}/{}: {} ({})\n",
                pass.mode.as_str(),
                skip.reference_code,
                skip.consortium_code,
                skip.reason,
                skip.cohort
            ));
        }
    }

    if !ctx.deviation_results.is_empty() || !ctx.deviation_skipped.is_empty() {
        out.push_str(&format!(
            "[deviations] compared {} override pairs, skipped {}\n",
            ctx.deviation_results.len(),
            ctx.deviation_skipped.len()
        ));
    }

    out
}
