//! `pk sim`: score one profile against another.

use anyhow::Result;
use clap::Args;
use pumpkin_core::config::PumpkinConfig;
use pumpkin_sim::{Method, Profile, compare};
use serde::Serialize;

use super::{GraphArgs, ScoringArgs, load_graph};
use crate::output::{OutputMode, fmt_score, pretty_kv, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct SimArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    #[command(flatten)]
    pub scoring: ScoringArgs,

    /// Query profile: comma-separated curies, `-` marks a negated term.
    #[arg(value_name = "PROFILE_A", allow_hyphen_values = true)]
    pub a: String,

    /// Target profile.
    #[arg(value_name = "PROFILE_B", allow_hyphen_values = true)]
    pub b: String,
}

#[derive(Debug, Serialize)]
struct SimOutput {
    method: Method,
    score: f64,
    a: Profile,
    b: Profile,
}

pub fn run_sim(args: &SimArgs, config: &PumpkinConfig, output: OutputMode) -> Result<()> {
    let method = args.scoring.method(config)?;
    let options = args.scoring.options(config);
    let graph = load_graph(&args.graph, config)?;

    let a = Profile::parse_list(&args.a);
    let b = Profile::parse_list(&args.b);
    let score = compare(&a, &b, graph.as_search_graph(), method, &options)?;

    let out = SimOutput {
        method,
        score,
        a,
        b,
    };
    render_mode(
        output,
        &out,
        |out, w| writeln!(w, "{}\t{}", out.method, out.score),
        |out, w| {
            pretty_section(w, &format!("{} similarity", out.method))?;
            pretty_kv(w, "query", join(&out.a))?;
            pretty_kv(w, "target", join(&out.b))?;
            pretty_kv(w, "score", fmt_score(out.score))
        },
    )
}

fn join(profile: &Profile) -> String {
    profile
        .positive()
        .iter()
        .cloned()
        .chain(profile.negative().iter().map(|t| format!("-{t}")))
        .collect::<Vec<_>>()
        .join(", ")
}
