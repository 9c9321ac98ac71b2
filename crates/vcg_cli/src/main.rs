//! The command-line interface for the vcg circuit code generator.
//!
//! Provides `vcg init` for project scaffolding, `vcg build` for generating a
//! VHDL program from a `vcg.toml` circuit description, `vcg check` for
//! reporting graph defects without writing anything, and `vcg blocks` for
//! listing the available block types.

#![warn(missing_docs)]

mod blocks;
mod build;
mod check;
mod init;
mod pipeline;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// vcg: generate VHDL from block diagrams.
#[derive(Parser, Debug)]
#[command(name = "vcg", version, about = "VHDL Code Generator")]
pub struct Cli {
    /// Only print errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log graph construction and emission at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// When to color diagnostics.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// A `vcg.toml` file, or the directory holding one.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new vcg project.
    Init {
        /// Directory to create; the current directory when omitted.
        name: Option<String>,
    },
    /// Generate the VHDL program for the current project.
    Build(BuildArgs),
    /// Check the circuit for defects without writing any output.
    Check(CheckArgs),
    /// List the available block types and their parameters.
    Blocks,
}

/// Arguments for the `vcg build` subcommand.
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Output path (default: `codegen.output`, then `build/<name>.vhd`).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Print the program to stdout instead of writing a file.
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,
}

/// Arguments for the `vcg check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// How to print diagnostics.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// `--color` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when a terminal is detected.
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

/// `--format` values for `vcg check`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Rendered diagnostics and a summary on stderr.
    Text,
    /// A JSON array of diagnostics on stdout.
    Json,
}

/// The global flags, resolved.
pub struct GlobalArgs {
    /// `--quiet`.
    pub quiet: bool,
    /// `--verbose`.
    pub verbose: bool,
    /// `--color`, with `auto` decided.
    pub color: bool,
    /// `--config`.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => atty_is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    init_tracing(&global);

    let result = match cli.command {
        Command::Init { name } => init::run(name, &global),
        Command::Build(ref args) => build::run(args, &global),
        Command::Check(ref args) => check::run(args, &global),
        Command::Blocks => blocks::run(&global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the level
/// chosen by the flags.
fn init_tracing(global: &GlobalArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(global)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(global.color)
        .with_target(false)
        .try_init();
}

fn default_log_level(global: &GlobalArgs) -> &'static str {
    if global.quiet {
        "error"
    } else if global.verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Rough terminal detection from the `TERM` environment variable.
fn atty_is_terminal() -> bool {
    std::env::var("TERM").is_ok()
}
