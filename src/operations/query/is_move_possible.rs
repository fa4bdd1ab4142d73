use crate::error::Result;
use crate::topology::GraphState;

use super::IsSubmovePossibleInFace;

/// Decides whether the player to move has any legal move left.
#[derive(Default)]
pub struct IsMovePossible;

impl IsMovePossible {
    /// Creates a new `IsMovePossible` query.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the query: `true` iff some face can host a submove starting
    /// on a sprout.
    ///
    /// # Errors
    ///
    /// Returns an error if the faces of `state` cannot be traced.
    pub fn execute(&self, state: &GraphState) -> Result<bool> {
        for (id, _) in state.faces()?.iter() {
            if IsSubmovePossibleInFace::new(true, id).execute(state)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
