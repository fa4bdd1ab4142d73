use std::sync::Arc;

use crate::config::RuleConfig;
use crate::error::{Result, SproutsError};
use crate::math::{distance, Point2};
use crate::operations::creation::MakeSeed;
use crate::operations::modification::ApplyMove;
use crate::operations::query::{EligibleDestinations, IsMovePossible};
use crate::stroke::Move;
use crate::topology::{GraphState, Vertex};

/// What the player is currently doing.
#[derive(Debug, Clone)]
pub enum Phase {
    /// Waiting for a touch on a sprout.
    Idle,
    /// Drawing a stroke from `origin`.
    Drawing { origin: Vertex, stroke: Vec<Point2> },
    /// A completed move waits for its middle sprout to be placed.
    Placing { mv: Move },
}

/// A vertex as the renderer needs it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexView {
    pub vertex: Vertex,
    pub alive: bool,
}

/// Turn handling for an interactive front end: touch events become moves.
///
/// Every transition returns a new `Game`; the previous one stays valid, so a
/// front end can keep a history.
#[derive(Debug, Clone)]
pub struct Game {
    state: Arc<GraphState>,
    config: RuleConfig,
    phase: Phase,
}

impl Game {
    /// Starts a game with `sprouts` seed sprouts on the configured board.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed cannot be built.
    pub fn new(sprouts: usize, config: RuleConfig) -> Result<Self> {
        let state = MakeSeed::new(sprouts, *config.bounds()).execute()?;
        Ok(Self::from_state(state, config))
    }

    /// Resumes a game from an existing position.
    #[must_use]
    pub fn from_state(state: GraphState, config: RuleConfig) -> Self {
        Self {
            state: Arc::new(state),
            config,
            phase: Phase::Idle,
        }
    }

    #[must_use]
    pub fn state(&self) -> &Arc<GraphState> {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    fn with_phase(&self, phase: Phase) -> Self {
        Self {
            state: Arc::clone(&self.state),
            config: self.config,
            phase,
        }
    }

    /// Handles a touch at `p`.
    ///
    /// While idle, a touch near an alive sprout starts a stroke. While
    /// placing, the touch requests the middle sprout position and commits the
    /// move; a rejected placement keeps the move pending.
    ///
    /// # Errors
    ///
    /// Returns any non-rule error raised while applying the move.
    pub fn touch_down(&self, p: Point2) -> Result<Self> {
        match &self.phase {
            Phase::Idle => Ok(self.nearest_alive_sprout(&p).map_or_else(
                || self.clone(),
                |origin| {
                    tracing::debug!(?origin, "stroke started");
                    let start = origin.position().unwrap_or(p);
                    self.with_phase(Phase::Drawing {
                        origin,
                        stroke: vec![start],
                    })
                },
            )),
            Phase::Drawing { .. } => Ok(self.clone()),
            Phase::Placing { mv } => match ApplyMove::new(mv, p).execute(&self.state) {
                Ok(next) => Ok(Self::from_state(next, self.config)),
                Err(SproutsError::Rule(error)) => {
                    tracing::warn!(%error, "middle sprout rejected");
                    Ok(self.clone())
                }
                Err(error) => Err(error),
            },
        }
    }

    /// Extends the stroke being drawn.
    #[must_use]
    pub fn touch_dragged(&self, p: Point2) -> Self {
        match &self.phase {
            Phase::Drawing { origin, stroke } => {
                let mut stroke = stroke.clone();
                stroke.push(p);
                self.with_phase(Phase::Drawing {
                    origin: *origin,
                    stroke,
                })
            }
            _ => self.clone(),
        }
    }

    /// Ends the stroke. A completed and valid move waits for its middle
    /// sprout; anything else is discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the stroke cannot be interpreted against the
    /// current state.
    pub fn touch_up(&self) -> Result<Self> {
        let Phase::Drawing { origin, stroke } = &self.phase else {
            return Ok(self.clone());
        };
        let mv = Move::new(*origin, stroke.clone(), Arc::clone(&self.state), self.config)?;
        if mv.is_completed() && mv.is_valid() {
            tracing::debug!(destination = ?mv.destination(), submoves = mv.len(), "move drawn");
            Ok(self.with_phase(Phase::Placing { mv }))
        } else {
            tracing::debug!(
                completed = mv.is_completed(),
                valid = mv.is_valid(),
                "stroke discarded"
            );
            Ok(self.with_phase(Phase::Idle))
        }
    }

    /// Returns the move being drawn or placed, if any.
    #[must_use]
    pub fn current_move(&self) -> Option<Move> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Drawing { origin, stroke } => {
                Move::new(*origin, stroke.clone(), Arc::clone(&self.state), self.config).ok()
            }
            Phase::Placing { mv } => Some(mv.clone()),
        }
    }

    /// Sprouts the stroke being drawn may still end on.
    ///
    /// # Errors
    ///
    /// Returns an error if the faces of the current state cannot be traced.
    pub fn eligible_destinations(&self) -> Result<Vec<Vertex>> {
        match self.current_move() {
            Some(mv) => EligibleDestinations::for_move(&mv).execute(),
            None => Ok(Vec::new()),
        }
    }

    /// The player to move has no legal move left.
    ///
    /// # Errors
    ///
    /// Returns an error if the faces of the current state cannot be traced.
    pub fn is_over(&self) -> Result<bool> {
        Ok(!IsMovePossible::new().execute(&self.state)?)
    }

    #[must_use]
    pub fn vertex_views(&self) -> Vec<VertexView> {
        self.state
            .vertices()
            .map(|v| VertexView {
                vertex: *v,
                alive: self.state.is_alive_sprout(v),
            })
            .collect()
    }

    fn nearest_alive_sprout(&self, p: &Point2) -> Option<Vertex> {
        let glue = self.config.glue_radius();
        self.state
            .vertices()
            .filter(|v| self.state.is_alive_sprout(v))
            .filter_map(|v| v.position().map(|q| (*v, distance(&q, p))))
            .filter(|(_, d)| *d <= glue)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(v, _)| v)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::topology::{DirectedEdge, EdgeColor};

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn game() -> Game {
        let a = Vertex::sprout(p(100.0, 200.0));
        let b = Vertex::sprout(p(300.0, 200.0));
        let state = GraphState::new().with_pair(DirectedEdge::cobweb(a, b).unwrap());
        Game::from_state(state, RuleConfig::default())
    }

    fn draw(game: &Game, points: &[(f64, f64)]) -> Game {
        let mut game = game.touch_down(p(points[0].0, points[0].1)).unwrap();
        for &(x, y) in &points[1..] {
            game = game.touch_dragged(p(x, y));
        }
        game
    }

    const CROSSING: [(f64, f64); 8] = [
        (101.0, 201.0),
        (120.0, 230.0),
        (200.0, 240.0),
        (200.0, 160.0),
        (220.0, 150.0),
        (260.0, 160.0),
        (290.0, 180.0),
        (298.0, 197.0),
    ];

    #[test]
    fn touch_away_from_sprouts_stays_idle() {
        let game = game().touch_down(p(200.0, 300.0)).unwrap();
        assert!(matches!(game.phase(), Phase::Idle));
    }

    #[test]
    fn full_turn() {
        let drawing = draw(&game(), &CROSSING);
        assert!(matches!(drawing.phase(), Phase::Drawing { .. }));
        assert_eq!(drawing.current_move().unwrap().len(), 2);

        let placing = drawing.touch_up().unwrap();
        assert!(matches!(placing.phase(), Phase::Placing { .. }));

        let rejected = placing.touch_down(p(10.0, 10.0)).unwrap();
        assert!(matches!(rejected.phase(), Phase::Placing { .. }));

        let next = placing.touch_down(p(198.0, 238.0)).unwrap();
        assert!(matches!(next.phase(), Phase::Idle));
        assert_eq!(next.state().vertex_count(), 3);
        assert!(next.state().edges().all(|e| e.color() == EdgeColor::Move));
        assert!(next.vertex_views().iter().all(|v| v.alive));
        assert!(!next.is_over().unwrap());
        // The previous game is untouched.
        assert_eq!(game().state().edge_count(), 2);
    }

    #[test]
    fn unfinished_stroke_is_discarded() {
        let drawing = draw(&game(), &CROSSING[..5]);
        let idle = drawing.touch_up().unwrap();
        assert!(matches!(idle.phase(), Phase::Idle));
        assert_eq!(idle.state().edge_count(), 2);
    }

    #[test]
    fn eligible_destinations_follow_the_stroke() {
        let drawing = draw(&game(), &CROSSING[..3]);
        let found = drawing.eligible_destinations().unwrap();
        assert_eq!(found.len(), 2);
        assert!(game().eligible_destinations().unwrap().is_empty());
    }
}
