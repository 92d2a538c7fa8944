//! `pk methods`: list the similarity methods.

use anyhow::Result;
use pumpkin_sim::Method;
use serde::Serialize;

use crate::output::{OutputMode, pretty_section, render_mode};

#[derive(Debug, Serialize)]
struct MethodInfo {
    name: &'static str,
    requires_ic: bool,
    uses_negations: bool,
    summary: &'static str,
}

pub fn run_methods(output: OutputMode) -> Result<()> {
    let methods: Vec<MethodInfo> = Method::ALL
        .into_iter()
        .map(|method| MethodInfo {
            name: method.as_str(),
            requires_ic: method.requires_ic(),
            uses_negations: method.uses_negations(),
            summary: method.summary(),
        })
        .collect();

    render_mode(
        output,
        &methods,
        |methods, w| {
            for m in methods {
                writeln!(w, "{}", m.name)?;
            }
            Ok(())
        },
        |methods, w| {
            pretty_section(w, "Similarity methods")?;
            for m in methods {
                let needs = if m.requires_ic { "ic" } else { "  " };
                writeln!(w, "{:<20} {needs}  {}", m.name, m.summary)?;
            }
            Ok(())
        },
    )
}
