use super::edge::DirectedEdge;
use super::vertex::Vertex;

/// The edges leaving one vertex, in strict clockwise order of their headings.
///
/// Rotations are immutable; `with` and `without` return new rotations.
#[derive(Debug, Clone)]
pub struct Rotation {
    origin: Vertex,
    edges: Vec<DirectedEdge>,
}

impl Rotation {
    /// Creates an empty rotation around `origin`.
    #[must_use]
    pub fn new(origin: Vertex) -> Self {
        Self {
            origin,
            edges: Vec::new(),
        }
    }

    #[must_use]
    pub fn origin(&self) -> Vertex {
        self.origin
    }

    /// Returns the edges in clockwise order.
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

    /// Locates `edge` by heading: `Ok(slot)` if present, `Err(slot)` with the
    /// insertion point otherwise.
    ///
    /// # Panics
    ///
    /// Panics if `edge` does not leave this rotation's origin.
    pub fn search(&self, edge: &DirectedEdge) -> Result<usize, usize> {
        self.edges.binary_search_by(|probe| probe.compare_around(edge))
    }

    /// Returns the stored edge with the same heading as `edge`, if any.
    #[must_use]
    pub fn find(&self, edge: &DirectedEdge) -> Option<&DirectedEdge> {
        self.search(edge).ok().map(|slot| &self.edges[slot])
    }

    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&DirectedEdge> {
        self.edges.get(slot)
    }

    /// Returns the slot of the entry that follows `current` clockwise, as if
    /// `current` were inserted. Wraps around; `None` if the rotation is empty.
    #[must_use]
    pub fn next_slot(&self, current: &DirectedEdge) -> Option<usize> {
        if self.edges.is_empty() {
            return None;
        }
        let slot = match self.search(current) {
            Ok(found) => found + 1,
            Err(insert_at) => insert_at,
        };
        Some(slot % self.edges.len())
    }

    /// Returns the entry that follows `current` clockwise.
    #[must_use]
    pub fn next(&self, current: &DirectedEdge) -> Option<&DirectedEdge> {
        self.next_slot(current).map(|slot| &self.edges[slot])
    }

    /// Returns a rotation containing `edge`; an entry with the same heading is replaced.
    ///
    /// A degenerate edge (zero heading) never replaces a real one; it sorts last.
    #[must_use]
    pub fn with(&self, edge: DirectedEdge) -> Self {
        let mut edges = self.edges.clone();
        match self.search(&edge) {
            Ok(slot) => edges[slot] = edge,
            Err(slot) => edges.insert(slot, edge),
        }
        Self {
            origin: self.origin,
            edges,
        }
    }

    /// Returns a rotation without the entry matching `edge`, or `None` if absent.
    #[must_use]
    pub fn without(&self, edge: &DirectedEdge) -> Option<Self> {
        let slot = self.search(edge).ok()?;
        let mut edges = self.edges.clone();
        edges.remove(slot);
        Some(Self {
            origin: self.origin,
            edges,
        })
    }
}

impl PartialEq for Rotation {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin
            && self.edges.len() == other.edges.len()
            && self
                .edges
                .iter()
                .zip(&other.edges)
                .all(|(a, b)| a == b && a.to() == b.to() && a.color() == b.color())
    }
}
