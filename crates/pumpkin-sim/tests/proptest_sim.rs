//! Property tests for the similarity measures on the mock HPO fixture.


use fixtures::{ROOT, ic_graph};
use proptest::prelude::*;
use pumpkin_core::Backend;
use pumpkin_sim::{GraphSemSim, IcSemSim, Profile, ResnikOptions, SemanticDist};

const TERMS: [&str; 15] = [
    "HP:0000152",
    "HP:0000234",
    "HP:0000478",
    "HP:0000707",
    "HP:0012443",
    "HP:0000492",
    "HP:0001250",
    "HP:0000240",
    "HP:0000271",
    "HP:0000479",
    "HP:0000508",
    "MP:0003631",
    "HP:0000280",
    "HP:0000464",
    "MP:0002064",
];

fn arb_profile() -> impl Strategy<Value = Profile> {
    prop::collection::btree_set(0..TERMS.len(), 1..5)
        .prop_map(|picks| picks.into_iter().map(|i| TERMS[i]).collect())
}

fn arb_profile_with_root() -> impl Strategy<Value = Profile> {
    (arb_profile(), any::<bool>()).prop_map(|(mut profile, with_root)| {
        if with_root {
            profile.insert(ROOT);
        }
        profile
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn jaccard_is_symmetric_and_reflexive(a in arb_profile_with_root(), b in arb_profile_with_root()) {
        let graph = ic_graph(Backend::Bitset);
        let sim = GraphSemSim::new(graph.graph());
        let (ab, ba) = (sim.jaccard_sim(&a, &b), sim.jaccard_sim(&b, &a));
        prop_assert!((ab - ba).abs() < 1e-12);
        prop_assert!((0.0..=1.0).contains(&ab));
        prop_assert!((sim.jaccard_sim(&a, &a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn normalized_resnik_of_self_is_one(a in arb_profile_with_root()) {
        let graph = ic_graph(Backend::Bitset);
        let options = ResnikOptions { normalized: true, ..ResnikOptions::default() };
        let score = IcSemSim::new(&graph).resnik_sim(&a, &a, &options).expect("resnik");
        prop_assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn closure_measures_stay_in_unit_range(a in arb_profile(), b in arb_profile()) {
        let graph = ic_graph(Backend::Bitset);
        let sim = IcSemSim::new(&graph);
        for score in [
            sim.sim_gic(&a, &b),
            sim.cosine_ic_sim(&a, &b, 0.1),
            GraphSemSim::new(graph.graph()).cosine_sim(&a, &b, 0.1),
        ] {
            prop_assert!((0.0..=1.0 + 1e-12).contains(&score));
        }
    }

    #[test]
    fn distances_are_symmetric(a in arb_profile(), b in arb_profile()) {
        let graph = ic_graph(Backend::Bitset);
        let dist = SemanticDist::new(&graph);
        prop_assert!((dist.euclidean_distance(&a, &b) - dist.euclidean_distance(&b, &a)).abs() < 1e-9);
        prop_assert!(dist.euclidean_distance(&a, &a).abs() < 1e-12);
    }

    #[test]
    fn symmetric_resnik_does_not_depend_on_order(a in arb_profile(), b in arb_profile()) {
        let graph = ic_graph(Backend::Bitset);
        let sim = IcSemSim::new(&graph);
        let options = ResnikOptions { symmetric: true, ..ResnikOptions::default() };
        let ab = sim.resnik_sim(&a, &b, &options).expect("resnik");
        let ba = sim.resnik_sim(&b, &a, &options).expect("resnik");
        prop_assert!((ab - ba).abs() < 1e-9);
    }
}
