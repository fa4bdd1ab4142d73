use crate::error::{Result, TopologyError};
use crate::stroke::{Move, Submove};
use crate::topology::{EdgeColor, Vertex};

/// Lists the sprouts a submove may still end on: the alive sprouts of the
/// face it is drawn in. The origin qualifies only if a loop back to it
/// leaves it within its lives.
pub struct EligibleDestinations {
    submove: Submove,
}

impl EligibleDestinations {
    /// Creates a new `EligibleDestinations` query for a submove.
    #[must_use]
    pub fn new(submove: &Submove) -> Self {
        Self {
            submove: submove.clone(),
        }
    }

    /// Creates the query for the submove currently being drawn in `mv`.
    #[must_use]
    pub fn for_move(mv: &Move) -> Self {
        Self { submove: mv.last() }
    }

    /// Executes the query. Returns no destinations until the stroke has left
    /// its origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the faces of the submove's state cannot be traced
    /// or its face is missing from them.
    pub fn execute(&self) -> Result<Vec<Vertex>> {
        let Some(id) = self.submove.face() else {
            return Ok(Vec::new());
        };
        let state = self.submove.state();
        let face = state
            .faces()?
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound(format!("face {id:?}")))?;
        let origin = self.submove.origin();
        Ok(face
            .vertices()
            .into_iter()
            .filter(|v| state.is_alive_sprout(v))
            .filter(|v| {
                *v != origin
                    || state
                        .vertex_degree(v, EdgeColor::Move)
                        .is_some_and(|d| d < 2)
            })
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::RuleConfig;
    use crate::math::Point2;
    use crate::topology::{DirectedEdge, GraphState};
    use std::sync::Arc;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn two_sprouts() -> Arc<GraphState> {
        let a = Vertex::sprout(p(100.0, 200.0));
        let b = Vertex::sprout(p(300.0, 200.0));
        Arc::new(GraphState::new().with_pair(DirectedEdge::cobweb(a, b).unwrap()))
    }

    #[test]
    fn fresh_sprouts_are_all_eligible() {
        let a = Vertex::sprout(p(100.0, 200.0));
        let stroke = vec![p(100.0, 200.0), p(120.0, 240.0), p(160.0, 250.0)];
        let mv = Move::new(a, stroke, two_sprouts(), RuleConfig::default()).unwrap();
        let mut found = EligibleDestinations::for_move(&mv).execute().unwrap();
        found.sort();
        let mut expected = vec![a, Vertex::sprout(p(300.0, 200.0))];
        expected.sort();
        assert_eq!(found, expected);
    }

    #[test]
    fn nothing_before_the_stroke_moves() {
        let a = Vertex::sprout(p(100.0, 200.0));
        let mv = Move::new(a, vec![p(100.0, 200.0)], two_sprouts(), RuleConfig::default()).unwrap();
        assert!(EligibleDestinations::new(mv.first()).execute().unwrap().is_empty());
    }
}
