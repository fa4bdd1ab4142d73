pub mod edge;
pub mod face;
pub mod rotation;
pub mod vertex;

pub use edge::{DirectedEdge, EdgeColor, EdgeHit};
pub use face::{Face, FaceId, Faces};
pub use rotation::Rotation;
pub use vertex::{Color, Vertex};

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use crate::error::TopologyError;
use crate::math::distance_2d::is_point_inside_segment;
use crate::math::Point2;

/// Number of move-edge ends a sprout may carry before it dies.
pub const SPROUT_LIVES: usize = 3;

/// Tolerance for locating a crossing point on a cobweb edge.
const ON_EDGE_TOLERANCE: f64 = 1e-6;

/// An immutable rotation system: every vertex mapped to its clockwise
/// rotation of outgoing edges.
///
/// Updates never mutate a state; `with` and `without` return new states
/// that share untouched rotations with their parent. Faces are traced on
/// first request and cached for the lifetime of the state.
#[derive(Debug, Clone, Default)]
pub struct GraphState {
    rotations: BTreeMap<Vertex, Arc<Rotation>>,
    faces: OnceLock<Result<Arc<Faces>, TopologyError>>,
}

impl GraphState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state holding the given edges (twins are not added).
    #[must_use]
    pub fn from_edges(edges: impl IntoIterator<Item = DirectedEdge>) -> Self {
        let mut rotations: BTreeMap<Vertex, Arc<Rotation>> = BTreeMap::new();
        for edge in edges {
            let origin = edge.from();
            let rotation = rotations
                .get(&origin)
                .map_or_else(|| Rotation::new(origin).with(edge.clone()), |r| r.with(edge.clone()));
            rotations.insert(origin, Arc::new(rotation));
        }
        Self::from_rotations(rotations)
    }

    fn from_rotations(rotations: BTreeMap<Vertex, Arc<Rotation>>) -> Self {
        Self {
            rotations,
            faces: OnceLock::new(),
        }
    }

    // --- Updates ---

    /// Returns a state that also contains `edge`.
    #[must_use]
    pub fn with(&self, edge: DirectedEdge) -> Self {
        let origin = edge.from();
        let rotation = match self.rotations.get(&origin) {
            Some(r) => r.with(edge),
            None => Rotation::new(origin).with(edge),
        };
        let mut rotations = self.rotations.clone();
        rotations.insert(origin, Arc::new(rotation));
        Self::from_rotations(rotations)
    }

    /// Returns a state that contains `edge` and its reverse.
    #[must_use]
    pub fn with_pair(&self, edge: DirectedEdge) -> Self {
        let twin = edge.reversed();
        self.with(edge).with(twin)
    }

    /// Returns a state without `edge`. Vertices left without edges are dropped.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EntityNotFound` if `edge` is not stored.
    pub fn without(&self, edge: &DirectedEdge) -> Result<Self, TopologyError> {
        let origin = edge.from();
        let rotation = self
            .rotations
            .get(&origin)
            .and_then(|r| r.without(edge))
            .ok_or_else(|| TopologyError::EntityNotFound(format!("edge leaving {origin:?}")))?;
        let mut rotations = self.rotations.clone();
        if rotation.is_empty() {
            rotations.remove(&origin);
        } else {
            rotations.insert(origin, Arc::new(rotation));
        }
        Ok(Self::from_rotations(rotations))
    }

    /// Returns a state without `edge` and its reverse.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EntityNotFound` if either direction is not stored.
    pub fn without_pair(&self, edge: &DirectedEdge) -> Result<Self, TopologyError> {
        self.without(edge)?.without(&edge.reversed())
    }

    // --- Queries ---

    /// Returns the rotation around `vertex`, if the vertex is in the graph.
    #[must_use]
    pub fn rotation(&self, vertex: &Vertex) -> Option<&Rotation> {
        self.rotations.get(vertex).map(AsRef::as_ref)
    }

    /// Iterates over `(vertex, rotation)` pairs in vertex order.
    pub fn rotations(&self) -> impl Iterator<Item = (&Vertex, &Rotation)> {
        self.rotations.iter().map(|(v, r)| (v, r.as_ref()))
    }

    /// Iterates over all vertices.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.rotations.keys()
    }

    /// Iterates over all directed edges.
    pub fn edges(&self) -> impl Iterator<Item = &DirectedEdge> {
        self.rotations.values().flat_map(|r| r.edges().iter())
    }

    #[must_use]
    pub fn contains_vertex(&self, vertex: &Vertex) -> bool {
        self.rotations.contains_key(vertex)
    }

    /// Returns `true` if an edge with the same origin and heading is stored.
    #[must_use]
    pub fn contains_edge(&self, edge: &DirectedEdge) -> bool {
        self.rotation(&edge.from())
            .and_then(|r| r.find(edge))
            .is_some()
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.rotations.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.rotations.values().map(|r| r.len()).sum()
    }

    /// Number of `color` edges leaving `vertex`, or `None` if the vertex is
    /// not in the graph.
    #[must_use]
    pub fn vertex_degree(&self, vertex: &Vertex, color: EdgeColor) -> Option<usize> {
        self.rotation(vertex)
            .map(|r| r.edges().iter().filter(|e| e.color() == color).count())
    }

    /// Returns `true` if `vertex` is a sprout with fewer than three move-edge ends.
    #[must_use]
    pub fn is_alive_sprout(&self, vertex: &Vertex) -> bool {
        vertex.is_sprout()
            && self
                .vertex_degree(vertex, EdgeColor::Move)
                .is_some_and(|d| d < SPROUT_LIVES)
    }

    /// Remaining lives of a sprout (`0` for dead sprouts and non-sprouts).
    #[must_use]
    pub fn lives(&self, vertex: &Vertex) -> usize {
        if !vertex.is_sprout() {
            return 0;
        }
        self.vertex_degree(vertex, EdgeColor::Move)
            .map_or(0, |d| SPROUT_LIVES.saturating_sub(d))
    }

    /// Returns the cobweb edge passing strictly through `point`, together
    /// with the index of the segment containing it.
    #[must_use]
    pub fn cobweb_edge_through(&self, point: &Point2) -> Option<(DirectedEdge, usize)> {
        self.edges()
            .filter(|e| e.color() == EdgeColor::Cobweb)
            .find_map(|e| {
                e.segments()
                    .position(|(a, b)| is_point_inside_segment(point, &a, &b, ON_EDGE_TOLERANCE))
                    .map(|segment| (e.clone(), segment))
            })
    }

    /// Verifies that every stored edge has a stored reverse.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::InvalidTopology` naming the first edge without a twin.
    pub fn check_twins(&self) -> Result<(), TopologyError> {
        match self.edges().find(|e| !self.contains_edge(&e.reversed())) {
            Some(e) => Err(TopologyError::InvalidTopology(format!(
                "edge {:?} -> {:?} has no twin",
                e.from(),
                e.to()
            ))),
            None => Ok(()),
        }
    }

    // --- Faces ---

    /// Returns the faces of this state, tracing them on first use.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::InvalidTopology` if the rotation system is
    /// not closed under edge reversal.
    pub fn faces(&self) -> Result<&Faces, TopologyError> {
        match self.faces.get_or_init(|| Faces::trace(self).map(Arc::new)) {
            Ok(faces) => Ok(faces.as_ref()),
            Err(e) => Err(e.clone()),
        }
    }

    /// Returns the face containing a stored edge.
    ///
    /// # Errors
    ///
    /// Propagates tracing failures from [`GraphState::faces`].
    pub fn face_of(&self, edge: &DirectedEdge) -> Result<Option<FaceId>, TopologyError> {
        Ok(self.faces()?.face_of(self, edge))
    }

    /// Returns the face a not-yet-inserted edge would be drawn in.
    ///
    /// # Errors
    ///
    /// Propagates tracing failures from [`GraphState::faces`].
    pub fn drawn_in(&self, candidate: &DirectedEdge) -> Result<Option<FaceId>, TopologyError> {
        Ok(self.faces()?.drawn_in(self, candidate))
    }

    /// Finds a `color` edge whose two sides lie in different faces.
    ///
    /// # Errors
    ///
    /// Propagates tracing failures from [`GraphState::faces`].
    pub fn find_first_edge_in_two_faces(
        &self,
        color: EdgeColor,
    ) -> Result<Option<DirectedEdge>, TopologyError> {
        Ok(self.faces()?.find_first_edge_in_two_faces(self, color))
    }
}

impl PartialEq for GraphState {
    fn eq(&self, other: &Self) -> bool {
        self.rotations == other.rotations
    }
}
