use std::collections::VecDeque;

use steller::acyclic::SimpleCycleBreaker;
use steller::pipeline::CycleBreaker;
use steller::{Edge, Graph, Node, Point};

fn graph(nodes: &[u64], edges: &[(u64, u64)]) -> Graph {
    let mut g = Graph::default();
    for &id in nodes {
        g.nodes.insert(
            id,
            Node {
                w: 10,
                h: 10,
                ..Default::default()
            },
        );
    }
    for &e in edges {
        g.edges.insert(e, Edge::default());
    }
    g
}

fn edge_keys(g: &Graph) -> Vec<(u64, u64)> {
    g.edges.keys().copied().collect()
}

fn is_acyclic(g: &Graph) -> bool {
    let mut indegree: std::collections::BTreeMap<u64, usize> =
        g.nodes.keys().map(|&n| (n, 0)).collect();
    for (_, to) in g.edges.keys() {
        *indegree.entry(*to).or_insert(0) += 1;
    }

    let mut queue: VecDeque<u64> = indegree
        .iter()
        .filter(|(_, &d)| d == 0)
        .map(|(&n, _)| n)
        .collect();
    let mut seen = 0;
    while let Some(n) = queue.pop_front() {
        seen += 1;
        for &(from, to) in g.edges.keys() {
            if from != n {
                continue;
            }
            let d = indegree.get_mut(&to).unwrap();
            *d -= 1;
            if *d == 0 {
                queue.push_back(to);
            }
        }
    }
    seen == g.nodes.len()
}

#[test]
fn remove_does_not_change_an_acyclic_graph() {
    let mut g = graph(&[1, 2, 3, 4], &[(1, 2), (1, 3), (2, 4), (3, 4)]);
    let mut breaker = SimpleCycleBreaker::from_seed(0);

    breaker.remove(&mut g);

    assert_eq!(edge_keys(&g), vec![(1, 2), (1, 3), (2, 4), (3, 4)]);
    assert!(breaker.reversed().is_empty());
}

#[test]
fn remove_breaks_a_cycle_reachable_from_a_root() {
    let mut g = graph(&[1, 2, 3, 4], &[(1, 2), (2, 3), (3, 4), (4, 2)]);
    let mut breaker = SimpleCycleBreaker::from_seed(7);

    breaker.remove(&mut g);

    assert!(is_acyclic(&g));
    assert_eq!(breaker.reversed().len(), 1);
}

#[test]
fn remove_breaks_a_rootless_cycle() {
    // Every node has a parent, so there is no root to start from.
    let mut g = graph(&[1, 2, 3], &[(1, 2), (2, 3), (3, 1)]);
    let mut breaker = SimpleCycleBreaker::from_seed(0);

    breaker.remove(&mut g);

    assert!(is_acyclic(&g));
    assert_eq!(breaker.reversed().len(), 1);
    assert_eq!(g.edges.len(), 3);
}

#[test]
fn restore_returns_the_original_orientations() {
    let edges = [(1, 2), (2, 3), (3, 1), (1, 4)];
    let mut g = graph(&[1, 2, 3, 4], &edges);
    let mut breaker = SimpleCycleBreaker::from_seed(3);

    breaker.remove(&mut g);
    breaker.restore(&mut g);

    assert_eq!(edge_keys(&g), edges.to_vec());
    assert!(breaker.reversed().is_empty());
}

#[test]
fn restore_flips_the_computed_path() {
    let mut g = graph(&[1, 2, 3], &[(1, 2), (2, 3), (3, 1)]);
    let mut breaker = SimpleCycleBreaker::from_seed(0);

    breaker.remove(&mut g);
    let &(from, to) = breaker.reversed().iter().next().unwrap();

    // Pretend a later stage drew the reversed edge.
    let drawn = vec![Point::new(0, 0), Point::new(5, 5), Point::new(10, 10)];
    g.edges.get_mut(&(to, from)).unwrap().path = drawn.clone();

    breaker.restore(&mut g);

    let restored: Vec<Point> = drawn.into_iter().rev().collect();
    assert_eq!(g.edges[&(from, to)].path, restored);
}

#[test]
fn same_seed_reverses_the_same_edges() {
    let edges = [(1, 2), (2, 3), (3, 1), (3, 4), (4, 1)];
    let mut a = graph(&[1, 2, 3, 4], &edges);
    let mut b = graph(&[1, 2, 3, 4], &edges);

    let mut breaker_a = SimpleCycleBreaker::from_seed(42);
    let mut breaker_b = SimpleCycleBreaker::from_seed(42);
    breaker_a.remove(&mut a);
    breaker_b.remove(&mut b);

    assert_eq!(breaker_a.reversed(), breaker_b.reversed());
    assert_eq!(edge_keys(&a), edge_keys(&b));
}
