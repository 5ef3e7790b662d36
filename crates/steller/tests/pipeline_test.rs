use steller::{
    layout, Edge, Error, Graph, GraphLayout, LayoutOptions, Node, OrderingInit, Point,
    SequenceLayout, SugiyamaPipeline,
};

fn graph(nodes: &[(u64, i64, i64)], edges: &[(u64, u64)]) -> Graph {
    let mut g = Graph::default();
    for &(id, w, h) in nodes {
        g.nodes.insert(
            id,
            Node {
                w,
                h,
                ..Default::default()
            },
        );
    }
    for &e in edges {
        g.edges.insert(e, Edge::default());
    }
    g
}

#[test]
fn single_node_sits_at_the_origin() {
    let mut g = graph(&[(1, 10, 10)], &[]);
    layout(&mut g, &LayoutOptions::default()).unwrap();

    assert_eq!(g.nodes[&1].xy, Point::new(0, 0));
    assert!(g.edges.is_empty());
}

#[test]
fn two_node_edge_is_stacked_and_centered() {
    let mut g = graph(&[(1, 10, 10), (2, 10, 10)], &[(1, 2)]);
    layout(&mut g, &LayoutOptions::default()).unwrap();

    // Same column; the second layer starts below the first node plus the
    // layer margin.
    assert_eq!(g.nodes[&1].xy, Point::new(0, 0));
    assert_eq!(g.nodes[&2].xy, Point::new(0, 35));
    assert_eq!(
        g.edges[&(1, 2)].path,
        vec![Point::new(5, 5), Point::new(5, 40)]
    );
}

#[test]
fn long_edge_is_routed_through_its_dummy() {
    let mut g = graph(&[(1, 10, 10), (2, 10, 10), (3, 10, 10)], &[(1, 2), (2, 3), (1, 3)]);
    layout(&mut g, &LayoutOptions::default()).unwrap();

    let path = &g.edges[&(1, 3)].path;
    assert_eq!(path.len(), 3);
    assert_eq!(path[0], g.nodes[&1].center_xy());
    assert_eq!(path[2], g.nodes[&3].center_xy());

    // The middle point is the dummy: beside the chain 1-2-3 and vertically
    // centered in the middle layer, whose height is the dummy stand-in.
    assert_eq!(path[1], Point::new(25, 35));

    // Short edges stay two-point.
    assert_eq!(g.edges[&(1, 2)].path.len(), 2);
    assert_eq!(g.edges[&(2, 3)].path.len(), 2);
}

#[test]
fn cycle_is_broken_and_restored() {
    let mut g = graph(&[(1, 10, 10), (2, 10, 10), (3, 10, 10)], &[(1, 2), (2, 3), (3, 1)]);
    layout(&mut g, &LayoutOptions::default()).unwrap();

    let keys: Vec<(u64, u64)> = g.edges.keys().copied().collect();
    assert_eq!(keys, vec![(1, 2), (2, 3), (3, 1)]);

    for (&(from, to), edge) in &g.edges {
        assert!(edge.path.len() >= 2, "edge ({from}, {to}) has a short path");
        assert_eq!(edge.path.first(), Some(&g.nodes[&from].center_xy()));
        assert_eq!(edge.path.last(), Some(&g.nodes[&to].center_xy()));
    }
}

#[test]
fn same_seed_gives_identical_output() {
    let nodes: Vec<(u64, i64, i64)> = (1..=8).map(|id| (id, 20, 10)).collect();
    let edges = [
        (1, 2),
        (1, 3),
        (2, 4),
        (3, 4),
        (4, 5),
        (5, 6),
        (6, 2),
        (1, 7),
        (7, 8),
        (1, 8),
    ];
    let options = LayoutOptions {
        seed: 9,
        ..Default::default()
    };

    let mut a = graph(&nodes, &edges);
    let mut b = graph(&nodes, &edges);
    layout(&mut a, &options).unwrap();
    layout(&mut b, &options).unwrap();

    assert_eq!(a, b);
}

#[test]
fn random_initializer_stack_is_still_seed_deterministic() {
    let nodes: Vec<(u64, i64, i64)> = (1..=6).map(|id| (id, 10, 10)).collect();
    let edges = [(1, 3), (1, 4), (2, 4), (2, 5), (3, 6), (4, 6), (5, 6)];
    let options = LayoutOptions {
        seed: 5,
        epochs: 10,
        initializer: OrderingInit::Random,
        ..Default::default()
    };

    let mut a = graph(&nodes, &edges);
    let mut b = graph(&nodes, &edges);
    layout(&mut a, &options).unwrap();
    layout(&mut b, &options).unwrap();

    assert_eq!(a, b);
}

#[test]
fn node_widths_offset_edge_endpoints() {
    let mut g = graph(&[(1, 40, 20), (2, 10, 10)], &[(1, 2)]);
    layout(&mut g, &LayoutOptions::default()).unwrap();

    let path = &g.edges[&(1, 2)].path;
    assert_eq!(path[0], g.nodes[&1].center_xy());
    assert_eq!(path[0].x, g.nodes[&1].xy.x + 20);
    assert_eq!(path[0].y, g.nodes[&1].xy.y + 10);
}

#[test]
fn bounding_box_covers_the_drawing() {
    let mut g = graph(&[(1, 10, 10), (2, 10, 10)], &[(1, 2)]);
    layout(&mut g, &LayoutOptions::default()).unwrap();

    assert_eq!(
        g.bounding_box(),
        Some((Point::new(0, 0), Point::new(10, 45)))
    );
}

#[test]
fn non_positive_delta_is_rejected() {
    let mut g = graph(&[(1, 10, 10)], &[]);
    let options = LayoutOptions {
        delta: 0,
        ..Default::default()
    };
    let err = layout(&mut g, &options).unwrap_err();
    assert!(matches!(err, Error::InvalidConfiguration { .. }));
}

#[test]
fn zero_epochs_are_rejected() {
    let mut g = graph(&[(1, 10, 10)], &[]);
    let options = LayoutOptions {
        epochs: 0,
        ..Default::default()
    };
    let err = layout(&mut g, &options).unwrap_err();
    assert!(matches!(err, Error::InvalidConfiguration { .. }));
}

#[test]
fn missing_optimizers_are_rejected() {
    let mut g = graph(&[(1, 10, 10)], &[]);
    let options = LayoutOptions {
        optimizers: Vec::new(),
        ..Default::default()
    };
    let err = layout(&mut g, &options).unwrap_err();
    assert!(matches!(err, Error::InvalidConfiguration { .. }));
}

#[test]
fn missing_endpoint_is_rejected_before_any_stage() {
    let mut g = graph(&[(1, 10, 10)], &[(1, 99)]);
    let err = layout(&mut g, &LayoutOptions::default()).unwrap_err();
    assert!(matches!(err, Error::InvariantViolated { .. }));
    // Nothing was laid out.
    assert_eq!(g.nodes[&1].xy, Point::new(0, 0));
    assert!(g.edges[&(1, 99)].path.is_empty());
}

#[test]
fn sequence_layout_runs_its_members_in_order() {
    let mut g = graph(&[(1, 10, 10), (2, 10, 10)], &[(1, 2)]);

    let mut sequence = SequenceLayout {
        layouts: vec![Box::new(
            SugiyamaPipeline::from_options(&LayoutOptions::default()).unwrap(),
        )],
    };
    sequence.update_graph_layout(&mut g).unwrap();

    assert_eq!(g.nodes[&2].xy, Point::new(0, 35));
    assert_eq!(g.edges[&(1, 2)].path.len(), 2);
}
