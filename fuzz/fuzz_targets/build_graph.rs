#![no_main]

use libfuzzer_sys::fuzz_target;
use pumpkin_core::io::read_closures;
use pumpkin_core::{Annotations, Backend, GraphBuilder};

// Arbitrary closure rows must either be rejected or produce a graph whose
// closures are reflexive and whose MICA lookups agree with a linear scan.
fuzz_target!(|data: &[u8]| {
    let Ok(edges) = read_closures(data) else {
        return;
    };
    let Some((_, root)) = edges.first().cloned() else {
        return;
    };
    let annotations: Annotations = edges
        .iter()
        .enumerate()
        .map(|(i, (child, _))| (i.to_string(), [child.clone()].into()))
        .collect();

    for backend in [Backend::Bitset, Backend::Walk] {
        let Ok(graph) = GraphBuilder::new(root.as_str())
            .backend(backend)
            .build_ic(edges.clone(), &annotations)
        else {
            return;
        };
        let terms = graph.graph().index().terms().to_vec();
        for a in &terms {
            assert!(graph.graph().ancestors(a).contains(graph.graph().id(a).unwrap_or(usize::MAX)));
            for b in terms.iter().take(8) {
                let fast = graph.mica(a, b, None);
                let slow = graph.mica_id_linear(a, b, None);
                assert_eq!(fast, slow);
            }
        }
    }
});
