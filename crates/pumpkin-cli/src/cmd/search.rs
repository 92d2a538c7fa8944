//! `pk search`: rank the annotated entities against a query profile.

use anyhow::{Context, Result};
use clap::Args;
use pumpkin_core::config::PumpkinConfig;
use pumpkin_sim::{Profile, RankMethod, dataset_from_annotations, search};
use tracing::debug;

use super::{GraphArgs, LoadedGraph, ScoringArgs, load_graph};
use crate::output::{OutputMode, fmt_score, pretty_rule, render_mode};

#[derive(Args, Debug)]
pub struct SearchArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    #[command(flatten)]
    pub scoring: ScoringArgs,

    /// Query profile: comma-separated curies, `-` marks a negated term.
    #[arg(long, short, allow_hyphen_values = true)]
    pub profile: String,

    /// Tie handling (`min`, `avg` or `max`). Overrides `[search] rank_method`.
    #[arg(long)]
    pub rank: Option<RankMethod>,

    /// Keep only the best N matches. Overrides `[search] limit`.
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

pub fn run_search(args: &SearchArgs, config: &PumpkinConfig, output: OutputMode) -> Result<()> {
    let method = args.scoring.method(config)?;
    let rank_method = match args.rank {
        Some(rank) => rank,
        None => config
            .search
            .rank_method
            .parse()
            .context("invalid [search] rank_method in config")?,
    };
    let mut options = args.scoring.options(config);
    if args.limit.is_some() {
        options.limit = args.limit;
    }

    let graph = load_graph(&args.graph, config)?;
    let dataset = match &graph {
        LoadedGraph::Ic { annotations, .. } => dataset_from_annotations(annotations),
        LoadedGraph::Plain(_) => {
            anyhow::bail!("--annotations is required: the annotated entities are the search space")
        }
    };
    debug!(entities = dataset.len(), %method, %rank_method, "searching");

    let query = Profile::parse_list(&args.profile);
    let result = search(
        &query,
        &dataset,
        graph.as_search_graph(),
        method,
        rank_method,
        &options,
    )?;

    render_mode(
        output,
        &result,
        |result, w| {
            for m in &result.results {
                writeln!(w, "{}\t{}\t{}", m.rank, m.id, m.score)?;
            }
            Ok(())
        },
        |result, w| {
            writeln!(w, "{:>5}  {:<24} {:>10}", "RANK", "ID", "SCORE")?;
            pretty_rule(w)?;
            for m in &result.results {
                writeln!(w, "{:>5}  {:<24} {:>10}", m.rank, m.id, fmt_score(m.score))?;
            }
            if result.is_empty() {
                writeln!(w, "no matches")?;
            }
            Ok(())
        },
    )
}
