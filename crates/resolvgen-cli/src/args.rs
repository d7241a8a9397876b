use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "resolvgen", version)]
/// Generate gqlgen resolvers and service scaffolding from module schemas
pub struct Args {
    /// Project root holding go.mod and the modules directory
    #[arg(long, env = "RESOLVGEN_ROOT", default_value = ".")]
    pub root: PathBuf,
    /// Path to the TOML configuration file. Defaults to <root>/resolvgen.toml when present
    #[arg(long, short)]
    pub config: Option<PathBuf>,
    /// Log filter used when RESOLVGEN_LOG is unset
    #[arg(long = "log", default_value = "info")]
    pub log_level: String,
    /// Render everything, write nothing; exit with status 1 when files would change
    #[arg(long, conflicts_with = "dump_model")]
    pub dry_run: bool,
    /// Print the extracted schema model as JSON and exit
    #[arg(long)]
    pub dump_model: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
