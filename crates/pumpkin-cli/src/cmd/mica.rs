//! `pk mica`: most informative common ancestor of two terms.

use anyhow::Result;
use clap::Args;
use pumpkin_core::Namespace;
use pumpkin_core::config::PumpkinConfig;
use serde::Serialize;

use super::{GraphArgs, load_ic_graph};
use crate::output::{OutputMode, fmt_score, pretty_kv, render_mode};

#[derive(Args, Debug)]
pub struct MicaArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Only consider ancestors in this namespace.
    #[arg(long)]
    pub ns: Option<Namespace>,

    pub a: String,

    pub b: String,
}

#[derive(Debug, Serialize)]
struct MicaOutput<'a> {
    a: &'a str,
    b: &'a str,
    mica: Option<String>,
    ic: f64,
}

pub fn run_mica(args: &MicaArgs, config: &PumpkinConfig, output: OutputMode) -> Result<()> {
    let (graph, _) = load_ic_graph(&args.graph, config)?;
    let out = MicaOutput {
        a: &args.a,
        b: &args.b,
        mica: graph.mica_id(&args.a, &args.b, args.ns).map(str::to_string),
        ic: graph.mica_ic(&args.a, &args.b, args.ns),
    };
    render_mode(
        output,
        &out,
        |out, w| {
            writeln!(
                w,
                "{}\t{}",
                out.mica.as_deref().unwrap_or("-"),
                out.ic
            )
        },
        |out, w| {
            pretty_kv(w, "terms", format!("{} / {}", out.a, out.b))?;
            pretty_kv(w, "mica", out.mica.as_deref().unwrap_or("(none)"))?;
            pretty_kv(w, "ic", fmt_score(out.ic))
        },
    )
}
