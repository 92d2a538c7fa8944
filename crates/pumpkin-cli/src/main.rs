#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use pumpkin_core::config::resolve_config;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "pk: semantic similarity over ontology term profiles",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of pumpkin.toml / the user config.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Scoring",
        about = "Score one profile against another",
        long_about = "Compare two term profiles with one similarity method.",
        after_help = "EXAMPLES:\n    # PhenoDigm between two profiles\n    pk sim --closures closures.tsv --annotations annotations.tsv HP:0000280,HP:0000508 HP:0000240\n\n    # Jaccard needs no annotations\n    pk sim --closures closures.tsv -m jaccard HP:0000280 HP:0000271\n\n    # Cosine with a negated term\n    pk sim --closures closures.tsv -m cosine HP:0000280,-HP:0000478 HP:0000271\n\n    # Emit machine-readable output\n    pk sim --closures closures.tsv -m jaccard HP:0000280 HP:0000271 --format json"
    )]
    Sim(cmd::sim::SimArgs),

    #[command(
        next_help_heading = "Scoring",
        about = "Rank annotated entities against a profile",
        long_about = "Score every annotated entity against the query profile and rank the results.",
        after_help = "EXAMPLES:\n    # Ten best PhenoDigm matches\n    pk search --closures closures.tsv --annotations annotations.tsv --profile HP:0000280,HP:0000508 --limit 10\n\n    # Resnik with max ranks for ties\n    pk search --closures closures.tsv --annotations annotations.tsv -p HP:0000280 -m resnik --rank max"
    )]
    Search(cmd::search::SearchArgs),

    #[command(
        next_help_heading = "Lookup",
        about = "Most informative common ancestor of two terms",
        after_help = "EXAMPLES:\n    pk mica --closures closures.tsv --annotations annotations.tsv HP:0001250 HP:0000280\n\n    # Only mouse ancestors\n    pk mica --closures closures.tsv --annotations annotations.tsv --ns mp MP:0002064 HP:0000240"
    )]
    Mica(cmd::mica::MicaArgs),

    #[command(
        next_help_heading = "Lookup",
        about = "Information content of terms",
        after_help = "EXAMPLES:\n    # Every term, least informative first\n    pk ic --closures closures.tsv --annotations annotations.tsv\n\n    pk ic --closures closures.tsv --annotations annotations.tsv HP:0000280 HP:0000118"
    )]
    Ic(cmd::ic::IcArgs),

    #[command(
        next_help_heading = "Lookup",
        about = "List similarity methods",
        after_help = "EXAMPLES:\n    pk methods\n\n    pk methods --format json"
    )]
    Methods,

    #[command(
        next_help_heading = "Shell",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    pk completions bash\n\n    # Generate zsh completions\n    pk completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("PUMPKIN_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "pumpkin=debug,info"
        } else {
            "pumpkin=info,warn"
        })
    });

    let format = env::var("PUMPKIN_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: &Cli, output: OutputMode) -> anyhow::Result<()> {
    if let Commands::Completions(args) = &cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command);
    }
    if matches!(cli.command, Commands::Methods) {
        return cmd::methods::run_methods(output);
    }

    let project_root = env::current_dir()?;
    let config = resolve_config(&project_root, cli.config.as_deref())
        .context("failed to load configuration")?;
    debug!(?config, "configuration resolved");

    match &cli.command {
        Commands::Sim(args) => cmd::sim::run_sim(args, &config, output),
        Commands::Search(args) => cmd::search::run_search(args, &config, output),
        Commands::Mica(args) => cmd::mica::run_mica(args, &config, output),
        Commands::Ic(args) => cmd::ic::run_ic(args, &config, output),
        Commands::Methods | Commands::Completions(_) => Ok(()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();
    if let Err(err) = run(&cli, output) {
        render_error(output, &CliError::from_anyhow(&err))?;
        std::process::exit(1);
    }
    Ok(())
}
