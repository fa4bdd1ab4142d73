use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::math::Point2;

/// Color tag of a vertex or of an edge endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    /// Black, playable vertex.
    Sprout,
    /// Red scaffolding point (seed cobweb or a crossing of the cobweb).
    Cobweb,
    /// Transient marker for a hit point whose color is not yet decided.
    Crossing,
    /// Gray endpoint of a stroke that cannot be completed.
    Invalid,
    /// Endpoint of a stroke that has not terminated yet.
    Open,
}

/// A graph vertex: either a colored position or the void sentinel.
///
/// Identity is `(color, position)` with exact position equality.
#[derive(Debug, Clone, Copy)]
pub enum Vertex {
    Positioned { color: Color, position: Point2 },
    Void,
}

impl Vertex {
    /// Creates a positioned vertex.
    #[must_use]
    pub fn new(color: Color, position: Point2) -> Self {
        // Fold -0.0 into 0.0 so bitwise identity matches numeric equality.
        let position = Point2::new(position.x + 0.0, position.y + 0.0);
        Self::Positioned { color, position }
    }

    #[must_use]
    pub fn sprout(position: Point2) -> Self {
        Self::new(Color::Sprout, position)
    }

    #[must_use]
    pub fn cobweb(position: Point2) -> Self {
        Self::new(Color::Cobweb, position)
    }

    /// Returns the position, or `None` for the void sentinel.
    #[must_use]
    pub fn position(&self) -> Option<Point2> {
        match self {
            Self::Positioned { position, .. } => Some(*position),
            Self::Void => None,
        }
    }

    /// Returns the color, or `None` for the void sentinel.
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        match self {
            Self::Positioned { color, .. } => Some(*color),
            Self::Void => None,
        }
    }

    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    #[must_use]
    pub fn is_sprout(&self) -> bool {
        self.color() == Some(Color::Sprout)
    }

    #[must_use]
    pub fn is_cobweb(&self) -> bool {
        self.color() == Some(Color::Cobweb)
    }

    fn key(&self) -> Option<(Color, u64, u64)> {
        match self {
            Self::Positioned { color, position } => {
                Some((*color, position.x.to_bits(), position.y.to_bits()))
            }
            Self::Void => None,
        }
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Vertex {}

impl Hash for Vertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Vertex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Vertex {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Void, Self::Void) => Ordering::Equal,
            (Self::Void, _) => Ordering::Less,
            (_, Self::Void) => Ordering::Greater,
            (
                Self::Positioned {
                    color: ca,
                    position: pa,
                },
                Self::Positioned {
                    color: cb,
                    position: pb,
                },
            ) => ca
                .cmp(cb)
                .then_with(|| pa.x.total_cmp(&pb.x))
                .then_with(|| pa.y.total_cmp(&pb.y)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn identity_is_color_and_position() {
        let a = Vertex::sprout(Point2::new(1.0, 2.0));
        let b = Vertex::sprout(Point2::new(1.0, 2.0));
        let c = Vertex::cobweb(Point2::new(1.0, 2.0));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn negative_zero_matches_zero() {
        let a = Vertex::sprout(Point2::new(-0.0, 0.0));
        let b = Vertex::sprout(Point2::new(0.0, -0.0));
        assert_eq!(a, b);
        let set: HashSet<Vertex> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn void_has_no_position() {
        assert!(Vertex::Void.position().is_none());
        assert!(Vertex::Void.color().is_none());
        assert!(Vertex::Void.is_void());
        assert!(!Vertex::Void.is_sprout());
    }
}
