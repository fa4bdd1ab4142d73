#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use approx::assert_relative_eq;
use sprouts::config::RuleConfig;
use sprouts::geometry::Bounds;
use sprouts::math::Point2;
use sprouts::operations::creation::MakeSeed;
use sprouts::operations::modification::ApplyMove;
use sprouts::operations::query::IsSubmovePossibleInFace;
use sprouts::stroke::{Move, Termination};
use sprouts::topology::{Color, DirectedEdge, EdgeColor, GraphState, Vertex};

fn p(x: f64, y: f64) -> Point2 {
    Point2::new(x, y)
}

#[test]
fn two_sprout_seed_sits_on_centered_circle() {
    let state = MakeSeed::new(2, Bounds::new(0.0, 0.0, 400.0, 400.0).unwrap())
        .execute()
        .unwrap();
    let mut xs: Vec<f64> = state
        .vertices()
        .map(|v| v.position().unwrap().x)
        .collect();
    xs.sort_by(f64::total_cmp);
    assert_relative_eq!(xs[0], 140.0, epsilon = 1e-9);
    assert_relative_eq!(xs[1], 260.0, epsilon = 1e-9);
    for v in state.vertices() {
        assert_relative_eq!(v.position().unwrap().y, 200.0, epsilon = 1e-9);
        assert!(v.is_sprout());
    }
}

#[test]
fn move_across_cobweb_midpoint_leaves_one_new_sprout() {
    let a = Vertex::sprout(p(0.0, 0.0));
    let b = Vertex::sprout(p(100.0, 0.0));
    let red = DirectedEdge::cobweb(a, b).unwrap();
    let prior = Arc::new(GraphState::new().with_pair(red.clone()));
    let config = RuleConfig::new(Bounds::new(-200.0, -200.0, 400.0, 400.0).unwrap(), 8.0, 10.0)
        .unwrap();
    let stroke = vec![
        p(0.0, 0.0),
        p(10.0, 30.0),
        p(50.0, 40.0),
        p(50.0, -40.0),
        p(80.0, -40.0),
        p(95.0, -20.0),
        p(99.0, -3.0),
    ];
    let mv = Move::new(a, stroke, Arc::clone(&prior), config).unwrap();
    assert_eq!(mv.len(), 2);
    assert!(mv.is_completed());

    let next = ApplyMove::new(&mv, p(50.0, 40.0)).execute(&prior).unwrap();
    assert_eq!(next.edge_count(), 4);
    assert!(!next.contains_edge(&red));
    assert!(next.edges().all(|e| e.color() == EdgeColor::Move));

    let new_sprouts: Vec<&Vertex> = next
        .vertices()
        .filter(|v| v.is_sprout() && !prior.contains_vertex(v))
        .collect();
    assert_eq!(new_sprouts, vec![&Vertex::sprout(p(50.0, 40.0))]);
}

#[test]
fn self_crossing_stroke_ends_gray_at_first_crossing() {
    let a = Vertex::sprout(p(100.0, 200.0));
    let b = Vertex::sprout(p(300.0, 200.0));
    let state = Arc::new(GraphState::new().with_pair(DirectedEdge::cobweb(a, b).unwrap()));
    let stroke = vec![
        p(100.0, 200.0),
        p(150.0, 300.0),
        p(250.0, 300.0),
        p(250.0, 250.0),
        p(130.0, 330.0),
        // Samples past the crossing are never read.
        p(60.0, 250.0),
        p(99.0, 203.0),
    ];
    let mv = Move::new(a, stroke, state, RuleConfig::default()).unwrap();
    let submove = mv.first();
    assert_eq!(submove.termination(), Termination::SelfIntersection);
    assert_eq!(submove.destination().color(), Some(Color::Invalid));
    let end = submove.destination().position().unwrap();
    assert_relative_eq!(end.x, 175.0, epsilon = 1e-9);
    assert_relative_eq!(end.y, 300.0, epsilon = 1e-9);
    assert!(!submove.has_next());
    assert!(!mv.is_completed());
}

#[test]
fn face_with_a_degree_two_sprout_needs_a_fresh_origin() {
    let s = p(0.0, 0.0);
    let black = |to: Point2| {
        DirectedEdge::new(
            sprouts::geometry::Polyline::segment(s, to),
            EdgeColor::Move,
            Color::Sprout,
            Color::Cobweb,
        )
    };
    let state = GraphState::new()
        .with_pair(black(p(100.0, 0.0)))
        .with_pair(black(p(-100.0, 0.0)));
    assert_eq!(state.vertex_degree(&Vertex::sprout(s), EdgeColor::Move), Some(2));
    let (face, _) = state.faces().unwrap().iter().next().unwrap();

    assert!(IsSubmovePossibleInFace::new(false, face).execute(&state).unwrap());
    assert!(!IsSubmovePossibleInFace::new(true, face).execute(&state).unwrap());
}
