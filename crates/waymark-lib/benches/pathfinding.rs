use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use std::hint::black_box;
use std::path::PathBuf;
use waymark_lib::{
    decode_graph, encode_graph, load_graph_from_text, plan_route, CostModel, Graph, PathFinder,
    RouteRequest,
};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/mini_map.csv")
}

static GRAPH: Lazy<Graph> = Lazy::new(|| {
    load_graph_from_text(&fixture_path())
        .expect("fixture loads")
        .graph
});
static ENCODED: Lazy<Vec<u8>> = Lazy::new(|| encode_graph(&GRAPH).expect("fixture encodes"));
static HOPS_REQUEST: Lazy<RouteRequest> = Lazy::new(|| RouteRequest::new(100, 108));
static DISTANCE_REQUEST: Lazy<RouteRequest> =
    Lazy::new(|| RouteRequest::new(100, 108).with_cost(CostModel::Distance));

fn benchmark_pathfinding(c: &mut Criterion) {
    let graph = &*GRAPH;

    c.bench_function("hops_100_108", |b| {
        let request = &*HOPS_REQUEST;
        b.iter(|| {
            let plan = plan_route(graph, request).expect("route exists");
            black_box(plan.hop_count())
        });
    });

    c.bench_function("distance_100_108", |b| {
        let request = &*DISTANCE_REQUEST;
        b.iter(|| {
            let plan = plan_route(graph, request).expect("route exists");
            black_box(plan.total_distance_m())
        });
    });

    c.bench_function("reused_finder_100_108", |b| {
        let origin = graph.index_of(100).expect("origin present");
        let target = graph.index_of(108).expect("target present");
        let mut finder = PathFinder::new(graph);
        b.iter(|| black_box(finder.find(origin, target).map(|outcome| outcome.hops)));
    });
}

fn benchmark_codec(c: &mut Criterion) {
    let graph = &*GRAPH;
    let bytes = &*ENCODED;

    c.bench_function("encode_mini_map", |b| {
        b.iter(|| black_box(encode_graph(graph).expect("encodes").len()));
    });

    c.bench_function("decode_mini_map", |b| {
        b.iter(|| black_box(decode_graph(bytes).expect("decodes").len()));
    });
}

criterion_group!(benches, benchmark_pathfinding, benchmark_codec);
criterion_main!(benches);
