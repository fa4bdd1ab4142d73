use crate::error::{GeometryError, Result};
use crate::math::TOLERANCE;
use crate::stroke::Move;
use crate::topology::{Color, DirectedEdge, GraphState};

/// Adds a submove edge (and its twin) to `state`.
///
/// When the edge ends on a cobweb crossing, the crossed cobweb edge is first
/// split there so the crossing becomes a vertex of the graph.
///
/// # Errors
///
/// Returns `GeometryError::ZeroVector` if the edge never leaves its origin,
/// or an error if the crossed cobweb edge cannot be split or removed.
pub fn fold_submove(state: &GraphState, edge: &DirectedEdge) -> Result<GraphState> {
    if edge.heading().norm() < TOLERANCE || edge.reversed().heading().norm() < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }
    let mut folded = state.clone();
    if edge.to_color() == Color::Cobweb {
        let at = edge.to();
        if let Some((crossed, segment)) = at
            .position()
            .and_then(|position| state.cobweb_edge_through(&position))
        {
            let position = edge.point(edge.len() - 1);
            let (head, tail) = crossed.split_on_segment(segment, position, Color::Cobweb)?;
            tracing::trace!(?at, "split cobweb edge at crossing");
            folded = folded.without_pair(&crossed)?.with_pair(head).with_pair(tail);
        }
    }
    Ok(folded.with_pair(edge.clone()))
}

/// Folds every submove of a move into the state it was drawn against.
pub struct FoldSubmoves<'a> {
    mv: &'a Move,
}

impl<'a> FoldSubmoves<'a> {
    /// Creates a new `FoldSubmoves` operation.
    #[must_use]
    pub fn new(mv: &'a Move) -> Self {
        Self { mv }
    }

    /// Executes the fold on `prior`.
    ///
    /// # Errors
    ///
    /// Propagates failures from [`fold_submove`].
    pub fn execute(&self, prior: &GraphState) -> Result<GraphState> {
        self.mv
            .submoves()
            .try_fold(prior.clone(), |state, submove| fold_submove(&state, submove.edge()))
    }
}
