use crate::error::Result;
use crate::topology::{DirectedEdge, EdgeColor, GraphState, Vertex};

/// Removes cobweb scaffolding made redundant by a move.
///
/// Runs to a fixpoint, alternating two rules:
/// - a cobweb edge whose two sides lie in different faces is deleted, so the
///   cobweb never separates regions the moves do not;
/// - a cobweb vertex left with no cobweb edges and exactly two move edges is
///   spliced out, joining the two move edges into one.
#[derive(Default)]
pub struct PruneCobweb;

impl PruneCobweb {
    /// Creates a new `PruneCobweb` operation.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the pruning on `state`.
    ///
    /// # Errors
    ///
    /// Returns an error if faces cannot be traced or an edge cannot be removed.
    pub fn execute(&self, state: &GraphState) -> Result<GraphState> {
        let mut current = state.clone();
        let mut removed = 0usize;
        let mut spliced = 0usize;
        loop {
            if let Some(edge) = current.find_first_edge_in_two_faces(EdgeColor::Cobweb)? {
                tracing::trace!(from = ?edge.from(), to = ?edge.to(), "remove separating cobweb edge");
                current = current.without_pair(&edge)?;
                removed += 1;
                continue;
            }
            if let Some((vertex, first, second)) = redundant_vertex(&current) {
                tracing::trace!(?vertex, "splice cobweb vertex");
                let joined = first.reversed().joined(&second)?;
                current = current
                    .without_pair(&first)?
                    .without_pair(&second)?
                    .with_pair(joined);
                spliced += 1;
                continue;
            }
            break;
        }
        tracing::debug!(removed, spliced, "cobweb pruned");
        Ok(current)
    }
}

/// Finds a cobweb vertex carrying exactly two move edges and nothing else.
fn redundant_vertex(state: &GraphState) -> Option<(Vertex, DirectedEdge, DirectedEdge)> {
    state.rotations().find_map(|(vertex, rotation)| {
        let [first, second] = rotation.edges() else {
            return None;
        };
        let spliceable = vertex.is_cobweb()
            && first.color() == EdgeColor::Move
            && second.color() == EdgeColor::Move
            // A loop at the vertex would be removed together with its twin.
            && first.to() != *vertex
            && second.to() != *vertex;
        spliceable.then(|| (*vertex, first.clone(), second.clone()))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Polyline;
    use crate::math::Point2;
    use crate::topology::Color;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn black(points: &[Point2], from: Color, to: Color) -> DirectedEdge {
        DirectedEdge::new(Polyline::new(points.to_vec()).unwrap(), EdgeColor::Move, from, to)
            .with_hooks(true)
    }

    #[test]
    fn tree_cobweb_is_kept() {
        let a = Vertex::sprout(p(0.0, 0.0));
        let b = Vertex::sprout(p(100.0, 0.0));
        let state = GraphState::new().with_pair(DirectedEdge::cobweb(a, b).unwrap());
        let pruned = PruneCobweb::new().execute(&state).unwrap();
        assert_eq!(pruned, state);
    }

    #[test]
    fn separating_cobweb_is_removed_and_crossing_spliced() {
        // Cobweb A - M - B, and a move curve A -> M -> B above it.
        let a = p(0.0, 0.0);
        let m = p(50.0, 0.0);
        let b = p(100.0, 0.0);
        let cobweb_m = Vertex::cobweb(m);
        let state = GraphState::new()
            .with_pair(DirectedEdge::cobweb(Vertex::sprout(a), cobweb_m).unwrap())
            .with_pair(DirectedEdge::cobweb(cobweb_m, Vertex::sprout(b)).unwrap())
            .with_pair(black(&[a, p(10.0, 30.0), p(50.0, 30.0), m], Color::Sprout, Color::Cobweb))
            .with_pair(black(&[m, p(50.0, -30.0), p(90.0, -30.0), b], Color::Cobweb, Color::Sprout));
        assert_eq!(state.faces().unwrap().len(), 3);

        let pruned = PruneCobweb::new().execute(&state).unwrap();
        assert!(pruned.edges().all(|e| e.color() == EdgeColor::Move));
        assert!(!pruned.contains_vertex(&cobweb_m));
        assert_eq!(pruned.edge_count(), 2);
        let through = pruned.rotation(&Vertex::sprout(a)).unwrap().edges()[0].clone();
        assert_eq!(through.to(), Vertex::sprout(b));
        assert_eq!(through.len(), 7);
        pruned.check_twins().unwrap();
    }

    #[test]
    fn pruning_is_idempotent() {
        let a = p(0.0, 0.0);
        let m = p(50.0, 0.0);
        let b = p(100.0, 0.0);
        let cobweb_m = Vertex::cobweb(m);
        let state = GraphState::new()
            .with_pair(DirectedEdge::cobweb(Vertex::sprout(a), cobweb_m).unwrap())
            .with_pair(DirectedEdge::cobweb(cobweb_m, Vertex::sprout(b)).unwrap())
            .with_pair(black(&[a, p(10.0, 30.0), p(50.0, 30.0), m], Color::Sprout, Color::Cobweb));
        let once = PruneCobweb::new().execute(&state).unwrap();
        let twice = PruneCobweb::new().execute(&once).unwrap();
        assert_eq!(once, twice);
    }
}
