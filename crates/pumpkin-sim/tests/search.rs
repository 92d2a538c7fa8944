//! Ranked search over the mock HPO annotations, querying with entity `1`.


use fixtures::{assert_close, dataset, graph, ic_graph, profile};
use pumpkin_core::Backend;
use pumpkin_sim::{Method, Profile, RankMethod, SearchOptions, SimError, search};

fn run(method: Method, rank: RankMethod) -> Vec<(String, usize, f64)> {
    let graph = ic_graph(Backend::Bitset);
    search(
        &profile("1"),
        &dataset(),
        &graph,
        method,
        rank,
        &SearchOptions::default(),
    )
    .expect("search")
    .results
    .into_iter()
    .map(|m| (m.id, m.rank, m.score))
    .collect()
}

fn assert_ranking(method: Method, expected: &[(&str, f64)]) {
    let got = run(method, RankMethod::Min);
    assert_eq!(
        got.iter().map(|(id, _, _)| id.as_str()).collect::<Vec<_>>(),
        expected.iter().map(|(id, _)| *id).collect::<Vec<_>>(),
        "order for {method}"
    );
    for ((_, _, score), (_, want)) in got.iter().zip(expected) {
        assert_close(*score, *want);
    }
}

#[test]
fn phenodigm_ranking() {
    assert_ranking(
        Method::Phenodigm,
        &[
            ("1", 98.318_87),
            ("5", 87.255_59),
            ("2", 62.436_67),
            ("4", 54.734_37),
            ("3", 37.087_52),
            ("6", 28.007_11),
        ],
    );
}

#[test]
fn jaccard_ranking() {
    assert_ranking(
        Method::Jaccard,
        &[
            ("1", 1.0),
            ("5", 0.909_09),
            ("2", 0.538_46),
            ("4", 0.461_54),
            ("6", 0.25),
            ("3", 0.230_77),
        ],
    );
}

#[test]
fn resnik_ranking() {
    assert_ranking(
        Method::Resnik,
        &[
            ("1", 2.110_80),
            ("5", 1.879_75),
            ("2", 1.186_60),
            ("4", 0.746_02),
            ("3", 0.706_75),
            ("6", 0.419_07),
        ],
    );
}

#[test]
fn sim_gic_ranking() {
    assert_ranking(
        Method::SimGic,
        &[
            ("1", 1.0),
            ("5", 0.814_71),
            ("2", 0.336_17),
            ("4", 0.267_31),
            ("3", 0.083_23),
            ("6", 0.068_52),
        ],
    );
}

#[test]
fn cosine_ranking() {
    assert_ranking(
        Method::Cosine,
        &[
            ("1", 1.0),
            ("5", 0.953_46),
            ("2", 0.703_53),
            ("4", 0.639_60),
            ("6", 0.452_27),
            ("3", 0.404_52),
        ],
    );
}

#[test]
fn ranks_are_dense_without_ties() {
    let ranks: Vec<usize> = run(Method::Jaccard, RankMethod::Min)
        .into_iter()
        .map(|(_, rank, _)| rank)
        .collect();
    assert_eq!(ranks, [1, 2, 3, 4, 5, 6]);
}

#[test]
fn duplicate_profile_ties_keep_dataset_order() {
    let graph = ic_graph(Backend::Bitset);
    let mut dataset = dataset();
    dataset.insert("7".to_string(), profile("1"));

    for (rank_method, expected) in [
        (RankMethod::Min, [1, 1, 2, 3]),
        (RankMethod::Avg, [2, 2, 3, 4]),
        (RankMethod::Max, [2, 2, 3, 4]),
    ] {
        let result = search(
            &profile("1"),
            &dataset,
            &graph,
            Method::Jaccard,
            rank_method,
            &SearchOptions::default(),
        )
        .expect("search");
        let ids: Vec<&str> = result.ids().take(3).collect();
        assert_eq!(ids, ["1", "7", "5"]);
        let ranks: Vec<usize> = result.results.iter().take(4).map(|m| m.rank).collect();
        assert_eq!(ranks, expected, "{rank_method}");
    }
}

#[test]
fn every_method_runs_on_the_ic_graph() {
    let graph = ic_graph(Backend::Bitset);
    for method in Method::ALL {
        let result = search(
            &Profile::parse_list("HP:0000280,-HP:0000478"),
            &dataset(),
            &graph,
            method,
            RankMethod::Avg,
            &SearchOptions::default(),
        )
        .expect("search");
        assert_eq!(result.len(), 6, "{method}");
        assert!(
            result.results.windows(2).all(|w| w[0].score >= w[1].score),
            "{method} results not sorted"
        );
    }
}

#[test]
fn plain_graph_supports_only_boolean_methods() {
    let graph = graph(Backend::Bitset);
    for method in Method::ALL {
        let outcome = search(
            &profile("1"),
            &dataset(),
            &graph,
            method,
            RankMethod::Min,
            &SearchOptions::default(),
        );
        if method.requires_ic() {
            assert!(matches!(
                outcome,
                Err(SimError::MissingInformationContent { .. })
            ));
        } else {
            assert_eq!(outcome.expect("search").len(), 6);
        }
    }
}
