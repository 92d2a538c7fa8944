use std::collections::BTreeSet;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pumpkin_core::{Annotations, GraphBuilder, IcGraph};
use pumpkin_sim::{Method, RankMethod, SearchOptions, dataset_from_annotations, search};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ENTITIES: [usize; 2] = [50, 250];
const TERMS: usize = 800;

fn term(i: usize) -> String {
    format!("HP:{i:07}")
}

fn synthetic_graph(n: usize, entities: usize, seed: u64) -> (IcGraph, Annotations) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut ancestors: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];
    for i in 1..n {
        let mut closure = BTreeSet::new();
        for _ in 0..rng.gen_range(1..=3) {
            let parent = rng.gen_range(0..i);
            closure.insert(parent);
            closure.extend(ancestors[parent].iter().copied());
        }
        ancestors[i] = closure;
    }
    let edges: Vec<(String, String)> = ancestors
        .iter()
        .enumerate()
        .flat_map(|(child, set)| set.iter().map(move |&a| (term(child), term(a))))
        .collect();

    let mut annotations = Annotations::new();
    for entity in 0..entities {
        let size = rng.gen_range(3..=12);
        let terms = (0..size).map(|_| term(rng.gen_range(1..n))).collect();
        annotations.insert(format!("entity-{entity}"), terms);
    }
    let graph = GraphBuilder::new(term(0))
        .build_ic(edges, &annotations)
        .expect("synthetic ontology builds");
    (graph, annotations)
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    for entities in ENTITIES {
        let (graph, annotations) = synthetic_graph(TERMS, entities, 0x5EED_u64 + entities as u64);
        let dataset = dataset_from_annotations(&annotations);
        let query = dataset.values().next().cloned().unwrap_or_default();
        let options = SearchOptions::default();

        for method in [Method::Jaccard, Method::Resnik, Method::Phenodigm, Method::SimGic] {
            group.bench_with_input(
                BenchmarkId::new(method.as_str(), entities),
                &dataset,
                |b, dataset| {
                    b.iter(|| {
                        search(
                            black_box(&query),
                            dataset,
                            &graph,
                            method,
                            RankMethod::Avg,
                            &options,
                        )
                        .expect("search")
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
