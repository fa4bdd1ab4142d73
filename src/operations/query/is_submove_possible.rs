use crate::error::{Result, TopologyError};
use crate::topology::{FaceId, GraphState};

/// Decides whether a submove can still be drawn inside a face.
///
/// The face must hold enough remaining sprout lives: two when the submove
/// starts on a sprout (its origin spends one), one when it starts on a
/// cobweb crossing.
pub struct IsSubmovePossibleInFace {
    origin_is_sprout: bool,
    face: FaceId,
}

impl IsSubmovePossibleInFace {
    /// Creates a new `IsSubmovePossibleInFace` query.
    #[must_use]
    pub fn new(origin_is_sprout: bool, face: FaceId) -> Self {
        Self {
            origin_is_sprout,
            face,
        }
    }

    /// Executes the query against `state`.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EntityNotFound` if the face is not a face of
    /// `state`, or a tracing error if the faces cannot be computed.
    pub fn execute(&self, state: &GraphState) -> Result<bool> {
        let face = state
            .faces()?
            .get(self.face)
            .ok_or_else(|| TopologyError::EntityNotFound(format!("face {:?}", self.face)))?;
        let lives: usize = face.vertices().iter().map(|v| state.lives(v)).sum();
        let needed = if self.origin_is_sprout { 2 } else { 1 };
        Ok(lives >= needed)
    }
}
