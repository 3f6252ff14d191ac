use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "freqcmp", version, about = "Cohort mutation-frequency comparison CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Run(RunArgs),
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(long, help = "Directory holding synced consortium release directories")]
    pub release_root: PathBuf,

    #[arg(long, help = "Release directory name, e.g. syn-style id")]
    pub release_id: String,

    #[arg(long, help = "Release version, e.g. 10.2")]
    pub release_version: String,

    #[arg(long, help = "Directory of exported reference-cohort query results")]
    pub reference_dir: PathBuf,

    #[arg(long, help = "Cancer-code mapping JSON")]
    pub mapping: PathBuf,

    #[arg(long, help = "Sample whitelist CSV for the special-case gene restriction")]
    pub whitelist: Option<PathBuf>,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, value_enum, default_value_t = ModeArg::Both)]
    pub mode: ModeArg,

    #[arg(
        long,
        default_value = "TERT",
        help = "Gene whose reference frequency is recomputed over the whitelist subset"
    )]
    pub special_gene: String,

    #[arg(long, default_value_t = false, help = "Disable the special-case gene handling")]
    pub no_special_case: bool,

    #[arg(long, default_value_t = false, help = "Skip the one-off subtype-split overrides")]
    pub skip_deviations: bool,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(long)]
    pub release_root: PathBuf,

    #[arg(long)]
    pub release_id: String,

    #[arg(long)]
    pub release_version: String,

    #[arg(long)]
    pub mapping: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Direct,
    Rollup,
    Both,
}
