use crate::config::MiddleSproutPolicy;
use crate::error::{Result, RuleError};
use crate::math::{distance, Point2};
use crate::stroke::Move;
use crate::topology::{Color, GraphState};

/// Places the sprout every move adds on its own curve.
///
/// The sprout goes on the first interior sample of the move curve that lies
/// within the glue radius of the requested position and keeps more than two
/// glue radii from both move endpoints.
pub struct InsertMiddleSprout<'a> {
    mv: &'a Move,
    requested: Point2,
    glue_radius: f64,
    policy: MiddleSproutPolicy,
}

impl<'a> InsertMiddleSprout<'a> {
    /// Creates a new `InsertMiddleSprout` operation using the move's rule
    /// configuration.
    #[must_use]
    pub fn new(mv: &'a Move, requested: Point2) -> Self {
        let config = mv.first().config();
        Self {
            mv,
            requested,
            glue_radius: config.glue_radius(),
            policy: config.middle_sprout(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: MiddleSproutPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Executes the operation on `folded`, the state with the move's edges
    /// already folded in.
    ///
    /// # Errors
    ///
    /// Returns `RuleError::NoMiddleSprout` if no sample qualifies and the
    /// policy is [`MiddleSproutPolicy::Reject`], or an error if the chosen
    /// edge cannot be replaced.
    pub fn execute(&self, folded: &GraphState) -> Result<GraphState> {
        let start = self.mv.origin().position();
        let end = self.mv.destination().position();
        let clear_of = |q: &Point2, endpoint: Option<Point2>| {
            endpoint.is_none_or(|e| distance(q, &e) > 2.0 * self.glue_radius)
        };

        for submove in self.mv.submoves() {
            let edge = submove.edge();
            let found = (1..edge.len().saturating_sub(1)).find(|&k| {
                let q = edge.point(k);
                distance(&q, &self.requested) <= self.glue_radius
                    && clear_of(&q, start)
                    && clear_of(&q, end)
            });
            if let Some(k) = found {
                let (head, tail) = edge.split_at_sample(k, Color::Sprout)?;
                tracing::debug!(at = ?edge.point(k), "middle sprout placed");
                return Ok(folded.without_pair(edge)?.with_pair(head).with_pair(tail));
            }
        }

        match self.policy {
            MiddleSproutPolicy::Reject => Err(RuleError::NoMiddleSprout {
                x: self.requested.x,
                y: self.requested.y,
            }
            .into()),
            MiddleSproutPolicy::Skip => {
                tracing::warn!(requested = ?self.requested, "no middle sprout position, skipping");
                Ok(folded.clone())
            }
        }
    }
}
