//! Published reference scores, reproduced on the `mini-hpo` fixture.
//!
//! Profile `1` holds three terms with IC ln 4, ln 8 and ln 8; profile `2`
//! holds two terms with IC ln 4. Their closures share the root, a term of IC
//! ln 2 and a term of IC ln 4, so every score below has a closed form.


use fixtures::{assert_close, mini_ic_graph, mini_profile};
use pumpkin_core::Backend;
use pumpkin_sim::{
    GraphSemSim, IcSemSim, MatrixMetric, PairwiseDist, PairwiseSim, PhenodigmOptions,
    ResnikOptions, SemanticDist,
};

fn resnik(a: &str, b: &str, reduction: MatrixMetric, normalized: bool) -> f64 {
    let graph = mini_ic_graph(Backend::Bitset);
    let options = ResnikOptions {
        reduction,
        normalized,
        ..ResnikOptions::default()
    };
    IcSemSim::new(&graph)
        .resnik_sim(&mini_profile(a), &mini_profile(b), &options)
        .expect("resnik")
}

#[test]
fn ic_values_are_multiples_of_ln2() {
    let graph = mini_ic_graph(Backend::Bitset);
    let ln2 = std::f64::consts::LN_2;
    assert_close(graph.ic("HP:0000118"), 0.0);
    assert_close(graph.ic("HP:0000707"), ln2);
    assert_close(graph.ic("HP:0012638"), 2.0 * ln2);
    assert_close(graph.ic("HP:0001250"), 3.0 * ln2);
    // Unannotated leaf, counted once by smoothing.
    assert_close(graph.ic("HP:0001871"), 3.0 * ln2);
    assert_eq!(
        graph.mica_id("HP:0001250", "HP:0012638", None),
        Some("HP:0012638")
    );
}

#[test]
fn jaccard_and_cosine() {
    for backend in [Backend::Bitset, Backend::Walk] {
        let graph = mini_ic_graph(backend);
        let sim = GraphSemSim::new(graph.graph());
        assert_close(sim.jaccard_sim(&mini_profile("1"), &mini_profile("2")), 0.3);
        assert_close(
            sim.cosine_sim(&mini_profile("1"), &mini_profile("2"), 0.1),
            0.474,
        );
    }
}

#[test]
fn resnik_reductions() {
    assert_close(resnik("1", "2", MatrixMetric::Bma, false), 0.693);
    assert_close(resnik("1", "2", MatrixMetric::Max, false), 1.386);
    assert_close(resnik("1", "2", MatrixMetric::Avg, false), 0.346);
    assert_close(resnik("1", "2", MatrixMetric::Bma, true), 0.375);
}

#[test]
fn symmetric_resnik_averages_raw_directions() {
    let graph = mini_ic_graph(Backend::Bitset);
    let sim = IcSemSim::new(&graph);
    let (a, b) = (mini_profile("1"), mini_profile("2"));
    assert_close(sim.symmetric_resnik_bma(&a, &b), 0.693);

    // Raw forward averaged with the normalized backward direction gives 0.596.
    // The symmetric score keeps both directions raw.
    let mixed = f64::midpoint(
        resnik("1", "2", MatrixMetric::Bma, false),
        resnik("2", "1", MatrixMetric::Bma, true),
    );
    assert_close(mixed, 0.596);
    assert!((sim.symmetric_resnik_bma(&a, &b) - mixed).abs() > 0.05);
}

#[test]
fn phenodigm() {
    for backend in [Backend::Bitset, Backend::Walk] {
        let graph = mini_ic_graph(backend);
        let sim = IcSemSim::new(&graph);
        let (a, b) = (mini_profile("1"), mini_profile("2"));

        assert_close(
            sim.phenodigm_compare(&a, &b, &PhenodigmOptions::default()),
            48.707,
        );
        let ic_only = PhenodigmOptions {
            sim_measure: PairwiseSim::Ic,
            ..PhenodigmOptions::default()
        };
        assert_close(sim.phenodigm_compare(&a, &b, &ic_only), 51.515);
        assert_close(
            sim.symmetric_phenodigm(&a, &b, None, PairwiseSim::Geometric),
            53.700,
        );
    }
}

#[test]
fn sim_gic_and_cosine_ic() {
    let graph = mini_ic_graph(Backend::Bitset);
    let sim = IcSemSim::new(&graph);
    let (a, b) = (mini_profile("1"), mini_profile("2"));
    // 3 ln 2 shared over 19 ln 2 in the union.
    assert_close(sim.sim_gic(&a, &b), 0.157);
    assert_close(sim.cosine_ic_sim(&a, &b, 0.1), 0.234);
}

#[test]
fn distances() {
    let graph = mini_ic_graph(Backend::Bitset);
    let dist = SemanticDist::new(&graph);
    let (a, b) = (mini_profile("1"), mini_profile("2"));
    assert_close(
        dist.distance_matrix_score(&a, &b, PairwiseDist::JinConrath),
        1.790_63,
    );
    assert_close(
        dist.distance_matrix_score(&a, &b, PairwiseDist::Euclidean),
        1.358_85,
    );
    assert_close(dist.euclidean_distance(&a, &b), 4.272_85);
}
