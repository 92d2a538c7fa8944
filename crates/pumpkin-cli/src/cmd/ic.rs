//! `pk ic`: information content per term.

use anyhow::Result;
use clap::Args;
use pumpkin_core::config::PumpkinConfig;
use serde::Serialize;

use super::{GraphArgs, load_ic_graph};
use crate::output::{OutputMode, fmt_score, pretty_rule, render_mode};

#[derive(Args, Debug)]
pub struct IcArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Terms to look up; every term of the graph when empty.
    pub terms: Vec<String>,
}

#[derive(Debug, Serialize)]
struct TermIc {
    term: String,
    ic: f64,
    known: bool,
}

pub fn run_ic(args: &IcArgs, config: &PumpkinConfig, output: OutputMode) -> Result<()> {
    let (graph, _) = load_ic_graph(&args.graph, config)?;
    let rows: Vec<TermIc> = if args.terms.is_empty() {
        let mut rows: Vec<TermIc> = graph
            .graph()
            .index()
            .iter()
            .map(|(id, term)| TermIc {
                term: term.to_string(),
                ic: graph.ic_of(id),
                known: true,
            })
            .collect();
        rows.sort_by(|a, b| a.ic.total_cmp(&b.ic));
        rows
    } else {
        args.terms
            .iter()
            .map(|term| TermIc {
                term: term.clone(),
                ic: graph.ic(term),
                known: graph.graph().contains(term),
            })
            .collect()
    };

    render_mode(
        output,
        &rows,
        |rows, w| {
            for row in rows {
                writeln!(w, "{}\t{}", row.term, row.ic)?;
            }
            Ok(())
        },
        |rows, w| {
            writeln!(w, "{:<24} {:>10}", "TERM", "IC")?;
            pretty_rule(w)?;
            for row in rows {
                let marker = if row.known { "" } else { "  (not in graph)" };
                writeln!(w, "{:<24} {:>10}{marker}", row.term, fmt_score(row.ic))?;
            }
            Ok(())
        },
    )
}
