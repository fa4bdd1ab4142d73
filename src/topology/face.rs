use std::collections::HashMap;

use slotmap::SlotMap;

use crate::error::TopologyError;

use super::edge::{DirectedEdge, EdgeColor};
use super::vertex::Vertex;
use super::GraphState;

slotmap::new_key_type! {
    /// Unique identifier for a face of one graph state.
    pub struct FaceId;
}

/// A region of the plane: the closed walk of directed edges bounding it.
#[derive(Debug, Clone, Default)]
pub struct Face {
    edges: Vec<DirectedEdge>,
}

impl Face {
    /// Returns the boundary edges in walk order.
    #[must_use]
    pub fn edges(&self) -> &[DirectedEdge] {
        &self.edges
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns the distinct vertices touching the boundary, in walk order.
    #[must_use]
    pub fn vertices(&self) -> Vec<Vertex> {
        let mut seen = Vec::new();
        for edge in &self.edges {
            let v = edge.from();
            if !seen.contains(&v) {
                seen.push(v);
            }
        }
        seen
    }

    /// Returns `true` if the boundary walk uses `edge` in its direction.
    #[must_use]
    pub fn contains(&self, edge: &DirectedEdge) -> bool {
        self.edges.iter().any(|e| e == edge)
    }
}

/// The faces of a graph state, traced from its rotation system.
///
/// Edges are addressed by `(origin, slot)` where `slot` is the position of
/// the edge in the origin's rotation.
#[derive(Debug, Default)]
pub struct Faces {
    faces: SlotMap<FaceId, Face>,
    membership: HashMap<(Vertex, usize), FaceId>,
}

impl Faces {
    /// Traces every face of `state`.
    ///
    /// Repeatedly takes an edge not yet assigned to a face and walks
    /// `next = rotation[e.to()].next(e.reversed())` until the walk reaches an
    /// edge that is already assigned.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::InvalidTopology` if an edge ends at a vertex
    /// that has no rotation in `state`.
    pub fn trace(state: &GraphState) -> Result<Self, TopologyError> {
        let mut faces: SlotMap<FaceId, Face> = SlotMap::with_key();
        let mut membership: HashMap<(Vertex, usize), FaceId> = HashMap::new();

        for (origin, rotation) in state.rotations() {
            for slot in 0..rotation.len() {
                if membership.contains_key(&(*origin, slot)) {
                    continue;
                }
                let id = faces.insert(Face::default());
                let mut current = (*origin, slot);
                while !membership.contains_key(&current) {
                    let edge = state
                        .rotation(&current.0)
                        .and_then(|r| r.get(current.1))
                        .cloned()
                        .ok_or_else(|| {
                            TopologyError::InvalidTopology(format!(
                                "dangling rotation slot {} at {:?}",
                                current.1, current.0
                            ))
                        })?;
                    membership.insert(current, id);

                    let to = edge.to();
                    let next = state
                        .rotation(&to)
                        .and_then(|r| r.next_slot(&edge.reversed()))
                        .ok_or_else(|| {
                            TopologyError::InvalidTopology(format!(
                                "edge ends at {to:?}, which has no rotation"
                            ))
                        })?;
                    faces[id].edges.push(edge);
                    current = (to, next);
                }
            }
        }

        Ok(Self { faces, membership })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Returns the face with the given ID, if it belongs to this state.
    #[must_use]
    pub fn get(&self, id: FaceId) -> Option<&Face> {
        self.faces.get(id)
    }

    /// Iterates over all faces.
    pub fn iter(&self) -> impl Iterator<Item = (FaceId, &Face)> {
        self.faces.iter()
    }

    /// Returns the face whose walk uses rotation slot `slot` of `origin`.
    #[must_use]
    pub fn face_at(&self, origin: &Vertex, slot: usize) -> Option<FaceId> {
        self.membership.get(&(*origin, slot)).copied()
    }

    /// Returns the face containing a stored edge.
    #[must_use]
    pub fn face_of(&self, state: &GraphState, edge: &DirectedEdge) -> Option<FaceId> {
        let origin = edge.from();
        let slot = state.rotation(&origin)?.search(edge).ok()?;
        self.face_at(&origin, slot)
    }

    /// Locates the face a not-yet-inserted `candidate` edge would be drawn in:
    /// the face of its rotation successor at its own origin.
    #[must_use]
    pub fn drawn_in(&self, state: &GraphState, candidate: &DirectedEdge) -> Option<FaceId> {
        let origin = candidate.from();
        let slot = state.rotation(&origin)?.next_slot(candidate)?;
        self.face_at(&origin, slot)
    }

    /// Finds an edge of the given color whose reverse lies in a different face.
    ///
    /// No particular edge is preferred when several qualify.
    #[must_use]
    pub fn find_first_edge_in_two_faces(
        &self,
        state: &GraphState,
        color: EdgeColor,
    ) -> Option<DirectedEdge> {
        state
            .edges()
            .filter(|e| e.color() == color)
            .find(|e| {
                let here = self.face_of(state, e);
                let there = self.face_of(state, &e.reversed());
                here.is_some() && there.is_some() && here != there
            })
            .cloned()
    }
}
