use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use freqcmp::cli::{Cli, Commands, ModeArg, RunArgs, ValidateArgs};
use freqcmp::ctx::{Ctx, RunMode};
use freqcmp::io;
use freqcmp::pipeline::stage0_scaffold::Stage0Scaffold;
use freqcmp::pipeline::stage1_mapping::Stage1Mapping;
use freqcmp::pipeline::stage2_release::Stage2Release;
use freqcmp::pipeline::stage3_compare::Stage3Compare;
use freqcmp::pipeline::stage4_deviations::Stage4Deviations;
use freqcmp::pipeline::stage5_output::Stage5Output;
use freqcmp::pipeline::{Pipeline, Stage};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => run(args),
        Commands::Validate(args) => validate(args),
    }
}

fn run(args: RunArgs) -> Result<()> {
    let mut ctx = Ctx::new(
        args.release_root,
        args.release_id,
        args.release_version,
        args.reference_dir,
        args.mapping,
        args.out,
        env!("CARGO_PKG_VERSION"),
    );
    ctx.whitelist_path = args.whitelist;
    ctx.modes = match args.mode {
        ModeArg::Direct => vec![RunMode::Direct],
        ModeArg::Rollup => vec![RunMode::Rollup],
        ModeArg::Both => vec![RunMode::Rollup, RunMode::Direct],
    };
    ctx.special_gene = if args.no_special_case {
        None
    } else {
        Some(args.special_gene)
    };
    ctx.run_deviations = !args.skip_deviations;

    let mut stages: Vec<Box<dyn Stage>> = vec![
        Box::new(Stage0Scaffold::new()),
        Box::new(Stage1Mapping::new()),
        Box::new(Stage2Release::new()),
    ];
    for mode in ctx.modes.clone() {
        stages.push(Box::new(Stage3Compare::new(mode)));
    }
    stages.push(Box::new(Stage4Deviations::new()));
    stages.push(Box::new(Stage5Output::new()));

    let pipeline = Pipeline::new(stages);
    pipeline.run(&mut ctx)?;

    print!("{}", io::summary::format_summary(&ctx));
    if !ctx.warnings.is_empty() {
        println!("warnings:");
        for warning in &ctx.warnings {
            println!("- {}", warning);
        }
    }
    Ok(())
}

fn validate(args: ValidateArgs) -> Result<()> {
    let mut ctx = Ctx::new(
        args.release_root,
        args.release_id,
        args.release_version,
        PathBuf::from("."),
        args.mapping,
        PathBuf::from("."),
        env!("CARGO_PKG_VERSION"),
    );
    ctx.run_deviations = false;

    let pipeline = Pipeline::new(vec![
        Box::new(Stage1Mapping::new()) as Box<dyn Stage>,
        Box::new(Stage2Release::new()),
    ]);
    pipeline.run(&mut ctx)?;

    let mapping = ctx.mapping.as_ref().context("mapping not loaded")?;
    let dataset = ctx.dataset.as_ref().context("release not loaded")?;
    println!("freqcmp validate ok");
    println!("code pairs: {}", mapping.pairs().len());
    println!("mutations: {}", dataset.mutations.len());
    println!("samples: {}", dataset.samples.len());
    println!("patients: {}", dataset.patient_ids.len());
    println!("panels: {}", dataset.panels.len());
    println!("direct codes: {}", dataset.unique_codes(false).len());
    println!("rollup codes: {}", dataset.unique_codes(true).len());
    Ok(())
}
