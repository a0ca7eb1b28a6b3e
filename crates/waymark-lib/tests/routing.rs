mod common;

use waymark_lib::{
    plan_route, reconstruct_path, CostModel, Error, Graph, GraphBuilder, NodeId, PathFinder,
    Position, RouteRequest,
};

use common::fixture_graph;

fn index(graph: &Graph, id: NodeId) -> usize {
    graph.index_of(id).expect("node present")
}

#[test]
fn shortest_hop_route_through_the_roundabout() {
    let graph = fixture_graph();
    let plan = plan_route(&graph, &RouteRequest::new(100, 109)).expect("route exists");

    assert_eq!(plan.hop_count(), 4);
    assert_eq!(plan.path.ids(), vec![100, 101, 102, 105, 109]);
    assert_eq!(plan.cost, 4.0);
    assert_eq!(plan.cost_model, CostModel::Hops);
}

#[test]
fn path_length_is_one_more_than_hop_count() {
    let graph = fixture_graph();
    let plan = plan_route(&graph, &RouteRequest::new(105, 104)).expect("route exists");

    assert_eq!(plan.path.ids(), vec![105, 103, 104]);
    assert_eq!(plan.path.steps.len(), plan.hop_count() + 1);
    let last = plan.path.steps.last().expect("non-empty path");
    assert_eq!(last.cumulative_m, plan.total_distance_m());
}

#[test]
fn cumulative_distance_is_monotonic() {
    let graph = fixture_graph();
    let plan = plan_route(&graph, &RouteRequest::new(100, 108)).expect("route exists");

    assert_eq!(plan.path.steps[0].cumulative_m, 0.0);
    for pair in plan.path.steps.windows(2) {
        assert!(pair[1].cumulative_m > pair[0].cumulative_m);
        assert!((pair[1].cumulative_m - pair[0].cumulative_m - pair[1].leg_m).abs() < 1e-9);
    }
}

#[test]
fn oneway_street_cannot_be_driven_backwards() {
    let graph = fixture_graph();

    let error = plan_route(&graph, &RouteRequest::new(109, 100)).expect_err("no route");
    assert!(matches!(
        error,
        Error::RouteNotFound {
            origin: 109,
            target: 100
        }
    ));
}

#[test]
fn disconnected_component_is_unreachable() {
    let graph = fixture_graph();
    let error = plan_route(&graph, &RouteRequest::new(100, 201)).expect_err("no route");
    assert!(matches!(error, Error::RouteNotFound { .. }));

    let island = plan_route(&graph, &RouteRequest::new(200, 201)).expect("route exists");
    assert_eq!(island.path.ids(), vec![200, 201]);
}

#[test]
fn unknown_endpoints_are_reported() {
    let graph = fixture_graph();

    let error = plan_route(&graph, &RouteRequest::new(100, 999)).expect_err("unknown target");
    assert!(matches!(error, Error::UnknownNode { id: 999 }));

    let error = plan_route(&graph, &RouteRequest::new(7, 100)).expect_err("unknown origin");
    assert!(matches!(error, Error::UnknownNode { id: 7 }));
}

#[test]
fn origin_equal_to_target_is_a_single_step() {
    let graph = fixture_graph();
    let plan = plan_route(&graph, &RouteRequest::new(103, 103)).expect("route exists");

    assert_eq!(plan.hop_count(), 0);
    assert_eq!(plan.path.ids(), vec![103]);
    assert_eq!(plan.total_distance_m(), 0.0);
}

#[test]
fn three_node_chain_matches_haversine_sum() {
    let mut builder = GraphBuilder::new();
    builder.add_node(1, "A", Position::new(0.0, 0.0));
    builder.add_node(2, "B", Position::new(0.0, 1.0));
    builder.add_node(3, "C", Position::new(0.0, 2.0));
    builder.add_way([1, 2, 3], false);
    let graph = builder.finish().graph;

    let plan = plan_route(&graph, &RouteRequest::new(1, 3)).expect("route exists");
    assert_eq!(plan.path.ids(), vec![1, 2, 3]);
    assert!((plan.path.steps[1].cumulative_m - 111_194.926_645).abs() < 1e-3);
    assert!((plan.total_distance_m() - 222_389.853_29).abs() < 1e-2);
}

#[test]
fn distance_model_never_exceeds_hop_model_length() {
    let graph = fixture_graph();
    for (origin, target) in [(100, 109), (100, 108), (104, 106), (108, 100)] {
        let hops = plan_route(&graph, &RouteRequest::new(origin, target)).expect("route");
        let metres = plan_route(
            &graph,
            &RouteRequest::new(origin, target).with_cost(CostModel::Distance),
        )
        .expect("route");

        assert!(metres.total_distance_m() <= hops.total_distance_m() + 1e-9);
        assert!((metres.cost - metres.total_distance_m()).abs() < 1e-6);
    }
}

#[test]
fn finder_is_reusable_across_queries() {
    let graph = fixture_graph();
    let mut finder = PathFinder::new(&graph);
    let origin = index(&graph, 100);
    let target = index(&graph, 109);

    let first = finder.find(origin, target).expect("path");
    let first_path = reconstruct_path(&graph, finder.state(), target).expect("path");

    assert!(finder.find(index(&graph, 109), origin).is_none());
    assert!(finder.find(origin, index(&graph, 200)).is_none());

    let second = finder.find(origin, target).expect("path");
    let second_path = reconstruct_path(&graph, finder.state(), target).expect("path");
    assert_eq!(first, second);
    assert_eq!(first_path, second_path);
}

#[test]
fn equal_estimates_expand_in_insertion_order() {
    // Two symmetric two-hop routes from 1 to 4; the way listed first wins.
    let mut builder = GraphBuilder::new();
    builder.add_node(1, "", Position::new(0.0, 0.0));
    builder.add_node(2, "", Position::new(-1.0, 1.0));
    builder.add_node(3, "", Position::new(1.0, 1.0));
    builder.add_node(4, "", Position::new(0.0, 2.0));
    builder.add_way([1, 3, 4], true);
    builder.add_way([1, 2, 4], true);
    let graph = builder.finish().graph;

    let plan = plan_route(&graph, &RouteRequest::new(1, 4)).expect("route exists");
    assert_eq!(plan.path.ids(), vec![1, 3, 4]);
}
