//! Structural checks of the closure graph on the mock HPO fixture, for both
//! backends.


use fixtures::{ROOT, graph};
use pumpkin_core::{Backend, Graph, PumpkinError, build_graph};

const BACKENDS: [Backend; 2] = [Backend::Bitset, Backend::Walk];

fn curies(graph: &Graph, term: &str, negative: bool) -> Vec<String> {
    let mut terms: Vec<String> = graph
        .terms_of(&graph.closure(term, negative))
        .map(str::to_string)
        .collect();
    terms.sort();
    terms
}

#[test]
fn subtree_of_root_is_encoded() {
    for backend in BACKENDS {
        let graph = graph(backend);
        assert_eq!(graph.len(), 16, "{backend}");
        assert_eq!(graph.root(), ROOT);
        assert!(graph.contains("MP:0002064"));
        assert!(!graph.contains("HP:0000001"), "above root");
        assert!(!graph.contains("HP:0000005"), "sibling branch");
    }
}

#[test]
fn root_descends_to_everything() {
    for backend in BACKENDS {
        let graph = graph(backend);
        assert_eq!(graph.descendants(ROOT).count_ones(..), 16);
        assert_eq!(curies(&graph, ROOT, false), [ROOT]);
    }
}

#[test]
fn ancestors_include_multiple_parents() {
    for backend in BACKENDS {
        let graph = graph(backend);
        assert_eq!(
            curies(&graph, "HP:0012443", false),
            ["HP:0000118", "HP:0000152", "HP:0000234", "HP:0000707", "HP:0012443"]
        );
        assert_eq!(
            curies(&graph, "MP:0002064", false),
            [
                "HP:0000118",
                "HP:0000152",
                "HP:0000234",
                "HP:0000707",
                "HP:0001250",
                "HP:0012443",
                "MP:0002064",
                "MP:0003631",
            ]
        );
    }
}

#[test]
fn descendants_of_inner_term() {
    for backend in BACKENDS {
        let graph = graph(backend);
        assert_eq!(
            curies(&graph, "HP:0000478", true),
            ["HP:0000478", "HP:0000479", "HP:0000492", "HP:0000508"]
        );
    }
}

#[test]
fn closures_are_reflexive_and_inverse() {
    for backend in BACKENDS {
        let graph = graph(backend);
        for (a, _) in graph.index().iter() {
            let ancestors = graph.ancestors_of(a);
            assert!(ancestors.contains(a), "{backend}: {a} not reflexive");
            for (b, _) in graph.index().iter() {
                assert_eq!(
                    ancestors.contains(b),
                    graph.descendants_of(b).contains(a),
                    "{backend}: {a} / {b}"
                );
            }
        }
    }
}

#[test]
fn backends_agree() {
    let bitset = graph(Backend::Bitset);
    let walk = graph(Backend::Walk);
    assert_eq!(bitset.index().terms(), walk.index().terms());
    for term in bitset.index().terms() {
        for negative in [false, true] {
            assert_eq!(
                curies(&bitset, term, negative),
                curies(&walk, term, negative),
                "{term} negative={negative}"
            );
        }
    }
}

#[test]
fn unknown_root_is_rejected() {
    let err = build_graph(fixtures::closures(), "HP:9999999").expect_err("unknown root");
    assert!(matches!(err, PumpkinError::RootNotFound(_)));
}
