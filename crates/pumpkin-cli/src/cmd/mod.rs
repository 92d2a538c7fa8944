//! Subcommand handlers and the argument groups they share.

pub mod completions;
pub mod ic;
pub mod methods;
pub mod mica;
pub mod search;
pub mod sim;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Args;
use pumpkin_core::config::PumpkinConfig;
use pumpkin_core::{Annotations, Backend, Graph, GraphBuilder, IcGraph, Namespace, io};
use pumpkin_sim::{MatrixMetric, Method, PairwiseSim, SearchGraph, SearchOptions};
use tracing::{info, instrument};

/// Input files and graph shape, shared by every graph-backed command.
#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// Closure file: `child<TAB>ancestor` rows, optionally gzipped.
    #[arg(long, value_name = "FILE")]
    pub closures: PathBuf,

    /// Annotation file: `entity<TAB>term` rows. Enables information content.
    #[arg(long, value_name = "FILE")]
    pub annotations: Option<PathBuf>,

    /// Root term; only its descendants are kept. Overrides `[graph] root`.
    #[arg(long)]
    pub root: Option<String>,

    /// Closure backend (`bitset` or `walk`). Overrides `[graph] backend`.
    #[arg(long)]
    pub backend: Option<Backend>,
}

/// Scoring knobs shared by `pk sim` and `pk search`.
#[derive(Args, Debug, Clone, Default)]
pub struct ScoringArgs {
    /// Similarity method. Overrides `[search] method`.
    #[arg(long, short)]
    pub method: Option<Method>,

    /// Restrict MICAs to one namespace (hp, mp, zp, fbcv, wbphenotype).
    #[arg(long)]
    pub ns: Option<Namespace>,

    /// PhenoDigm cell measure (`geometric` or `ic`).
    #[arg(long)]
    pub sim_measure: Option<PairwiseSim>,

    /// Resnik matrix reduction (`bma`, `max` or `avg`).
    #[arg(long)]
    pub reduction: Option<MatrixMetric>,

    /// Normalize Resnik by the query's optimal score.
    #[arg(long)]
    pub normalized: bool,

    /// Weight of negated terms in the cosine measures.
    #[arg(long)]
    pub negative_weight: Option<f64>,
}

impl ScoringArgs {
    /// The method from the flag, else from config.
    pub fn method(&self, config: &PumpkinConfig) -> Result<Method> {
        match self.method {
            Some(method) => Ok(method),
            None => config
                .search
                .method
                .parse()
                .context("invalid [search] method in config"),
        }
    }

    pub fn options(&self, config: &PumpkinConfig) -> SearchOptions {
        SearchOptions {
            negative_weight: self
                .negative_weight
                .unwrap_or(config.search.negative_weight),
            ns_filter: self.ns,
            sim_measure: self.sim_measure.unwrap_or_default(),
            reduction: self.reduction.unwrap_or_default(),
            normalized: self.normalized,
            limit: config.search.limit,
        }
    }
}

/// A loaded graph, with information content when annotations were given.
pub enum LoadedGraph {
    Plain(Graph),
    Ic {
        graph: IcGraph,
        annotations: Annotations,
    },
}

impl LoadedGraph {
    pub fn as_search_graph(&self) -> &dyn SearchGraph {
        match self {
            Self::Plain(graph) => graph,
            Self::Ic { graph, .. } => graph,
        }
    }
}

fn builder(args: &GraphArgs, config: &PumpkinConfig) -> GraphBuilder {
    let root = args.root.clone().unwrap_or_else(|| config.graph.root.clone());
    GraphBuilder::new(root)
        .backend(args.backend.unwrap_or(config.graph.backend))
        .cache_policy(config.cache.policy())
}

fn read_closures(path: &Path) -> Result<Vec<(String, String)>> {
    io::load_closures(path).with_context(|| format!("failed to load closures from {}", path.display()))
}

fn read_annotations(path: &Path) -> Result<Annotations> {
    io::load_annotations(path)
        .with_context(|| format!("failed to load annotations from {}", path.display()))
}

/// Load the graph, computing IC when `--annotations` was given.
#[instrument(skip_all, fields(closures = %args.closures.display()))]
pub fn load_graph(args: &GraphArgs, config: &PumpkinConfig) -> Result<LoadedGraph> {
    let edges = read_closures(&args.closures)?;
    let builder = builder(args, config);
    let Some(path) = args.annotations.as_deref() else {
        let graph = builder.build(edges)?;
        info!(terms = graph.len(), "closure graph loaded");
        return Ok(LoadedGraph::Plain(graph));
    };

    let annotations = read_annotations(path)?;
    let mut graph = builder.build_ic(edges, &annotations)?;
    if config.cache.precompute_micas {
        graph = graph.with_mica_matrix();
    }
    info!(
        terms = graph.graph().len(),
        entities = annotations.len(),
        "ic graph loaded"
    );
    Ok(LoadedGraph::Ic { graph, annotations })
}

/// Load a graph that must carry information content.
pub fn load_ic_graph(args: &GraphArgs, config: &PumpkinConfig) -> Result<(IcGraph, Annotations)> {
    if args.annotations.is_none() {
        return Err(anyhow!(
            "--annotations is required: information content comes from the annotation corpus"
        ));
    }
    match load_graph(args, config)? {
        LoadedGraph::Ic { graph, annotations } => Ok((graph, annotations)),
        LoadedGraph::Plain(_) => Err(anyhow!("annotations were not loaded")),
    }
}
