use std::sync::Arc;

use crate::config::RuleConfig;
use crate::error::Result;
use crate::math::Point2;
use crate::topology::{GraphState, Vertex};

use super::submove::Submove;

/// A full player turn: the chain of submoves one stroke decomposes into.
///
/// Only the head is stored; each submove builds (and memoizes) its own
/// successor, so iterating with [`Move::submoves`] is lazy and restartable.
#[derive(Debug, Clone)]
pub struct Move {
    head: Submove,
}

impl Move {
    /// Starts a move at `origin` drawn against `state`.
    ///
    /// # Errors
    ///
    /// Returns an error if the stroke is empty or `origin` is not in `state`.
    pub fn new(
        origin: Vertex,
        stroke: impl Into<Arc<[Point2]>>,
        state: Arc<GraphState>,
        config: RuleConfig,
    ) -> Result<Self> {
        Ok(Self {
            head: Submove::new(origin, stroke.into(), state, config)?,
        })
    }

    /// Wraps an existing submove as the head of a move.
    #[must_use]
    pub fn from_submove(head: Submove) -> Self {
        Self { head }
    }

    /// Returns the state the move is drawn against.
    #[must_use]
    pub fn prior_state(&self) -> &Arc<GraphState> {
        self.head.state()
    }

    #[must_use]
    pub fn first(&self) -> &Submove {
        &self.head
    }

    /// Iterates over the submoves from the head.
    #[must_use]
    pub fn submoves(&self) -> Submoves {
        Submoves {
            current: Some(self.head.clone()),
        }
    }

    /// Returns the last submove of the chain.
    #[must_use]
    pub fn last(&self) -> Submove {
        self.submoves().last().unwrap_or_else(|| self.head.clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.submoves().count()
    }

    /// Always `false`: a move has at least its head submove.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn origin(&self) -> Vertex {
        self.head.origin()
    }

    #[must_use]
    pub fn destination(&self) -> Vertex {
        self.last().destination()
    }

    /// Every submove is completed and the chain ends on a sprout.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.submoves().all(|s| s.is_completed()) && !self.last().has_next()
    }

    /// Every submove respects node lives.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.submoves().all(|s| s.is_valid())
    }

    /// Returns the concatenated samples of all submove edges, without
    /// repeating the shared endpoints.
    #[must_use]
    pub fn points(&self) -> Vec<Point2> {
        let mut points: Vec<Point2> = Vec::new();
        for submove in self.submoves() {
            let skip = usize::from(!points.is_empty());
            points.extend(submove.edge().points().into_iter().skip(skip));
        }
        points
    }
}

/// Iterator over the submoves of a [`Move`].
#[derive(Debug, Clone)]
pub struct Submoves {
    current: Option<Submove>,
}

impl Iterator for Submoves {
    type Item = Submove;

    fn next(&mut self) -> Option<Submove> {
        let current = self.current.take()?;
        self.current = current.next();
        Some(current)
    }
}
