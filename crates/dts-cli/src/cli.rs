//! Command-line surface (§6 "CLI surface").

use std::path::PathBuf;

use clap::Parser;

/// Bundles a project's compiler-emitted `.d.ts` files into one declaration
/// per entry point.
#[derive(Parser, Debug)]
#[command(name = "dts", version, about = "Declaration bundler for a TypeScript project build")]
pub struct CliArgs {
    /// Path to the project root (directory containing the emitted declarations).
    #[arg(short = 'p', long = "project", value_name = "PATH", default_value = ".")]
    pub project: PathBuf,

    /// Ignore the cache and rebuild everything from scratch.
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Rebuild whenever a source declaration changes.
    #[arg(short = 'w', long)]
    pub watch: bool,

    /// Type-check and bundle but skip writing transpiled output.
    #[arg(short = 'n', long = "noEmit", alias = "no-emit")]
    pub no_emit: bool,

    /// Delete the on-disk declaration cache before building.
    #[arg(short = 'c', long = "clearCache", alias = "clear-cache")]
    pub clear_cache: bool,

    /// Minify transpiled output.
    #[arg(short = 'm', long)]
    pub minify: bool,

    /// Increase log verbosity; repeat for more detail (-v, -vv).
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
