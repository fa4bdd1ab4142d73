use std::f64::consts::TAU;

use crate::error::{OperationError, Result};
use crate::geometry::Bounds;
use crate::math::{Point2, Vector2};
use crate::topology::{DirectedEdge, GraphState, Vertex};

/// Fraction of the shorter board side used as the seed circle radius.
const SEED_RADIUS_RATIO: f64 = 0.15;

/// Builds the opening position: `n` sprouts on a circle around the board
/// center, chained by straight cobweb edges.
pub struct MakeSeed {
    sprouts: usize,
    bounds: Bounds,
}

impl MakeSeed {
    /// Creates a new `MakeSeed` operation.
    #[must_use]
    pub fn new(sprouts: usize, bounds: Bounds) -> Self {
        Self { sprouts, bounds }
    }

    /// Returns the sprout positions, counter-clockwise from the +x axis.
    #[must_use]
    pub fn positions(&self) -> Vec<Point2> {
        let center = self.bounds.center();
        let radius = SEED_RADIUS_RATIO * self.bounds.width().min(self.bounds.height());
        #[allow(clippy::cast_precision_loss)]
        let n = self.sprouts as f64;
        (0..self.sprouts)
            .map(|k| {
                #[allow(clippy::cast_precision_loss)]
                let angle = TAU * k as f64 / n;
                center + radius * Vector2::new(angle.cos(), angle.sin())
            })
            .collect()
    }

    /// Executes the operation, returning the seed state.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if fewer than two sprouts are requested.
    pub fn execute(&self) -> Result<GraphState> {
        if self.sprouts < 2 {
            return Err(OperationError::InvalidInput(format!(
                "a seed needs at least two sprouts, got {}",
                self.sprouts
            ))
            .into());
        }
        let sprouts: Vec<Vertex> = self.positions().into_iter().map(Vertex::sprout).collect();
        let state = sprouts
            .windows(2)
            .filter_map(|pair| DirectedEdge::cobweb(pair[0], pair[1]))
            .fold(GraphState::new(), |state, edge| state.with_pair(edge));
        tracing::debug!(
            sprouts = self.sprouts,
            edges = state.edge_count(),
            "seed created"
        );
        Ok(state)
    }
}
