use crate::error::{OperationError, Result, RuleError};
use crate::math::Point2;
use crate::stroke::Move;
use crate::topology::GraphState;

use super::{FoldSubmoves, InsertMiddleSprout, PruneCobweb};

/// Commits a finished move: folds its submoves into the prior state, places
/// the middle sprout, then prunes the cobweb.
pub struct ApplyMove<'a> {
    mv: &'a Move,
    middle: Point2,
}

impl<'a> ApplyMove<'a> {
    /// Creates a new `ApplyMove` operation. `middle` is the requested middle
    /// sprout position.
    #[must_use]
    pub fn new(mv: &'a Move, middle: Point2) -> Self {
        Self { mv, middle }
    }

    /// Executes the move on `prior`, returning the next state.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if `prior` is not the state the
    /// move was drawn against, `RuleError::Incomplete` if the move does not
    /// end on a sprout, `RuleError::Illegal` if it would exceed a sprout's
    /// lives, or any error raised by the fold, placement or pruning stages.
    pub fn execute(&self, prior: &GraphState) -> Result<GraphState> {
        if prior != self.mv.prior_state().as_ref() {
            return Err(OperationError::InvalidInput(
                "move was drawn against a different state".to_owned(),
            )
            .into());
        }
        if !self.mv.is_completed() {
            return Err(RuleError::Incomplete.into());
        }
        if !self.mv.is_valid() {
            return Err(RuleError::Illegal(format!(
                "move from {:?} to {:?} exceeds a sprout's lives",
                self.mv.origin(),
                self.mv.destination()
            ))
            .into());
        }

        let folded = FoldSubmoves::new(self.mv).execute(prior)?;
        let placed = InsertMiddleSprout::new(self.mv, self.middle).execute(&folded)?;
        let next = PruneCobweb::new().execute(&placed)?;
        tracing::debug!(
            origin = ?self.mv.origin(),
            destination = ?self.mv.destination(),
            submoves = self.mv.len(),
            vertices = next.vertex_count(),
            edges = next.edge_count(),
            "move applied"
        );
        Ok(next)
    }
}
