use std::cmp::Ordering;

use crate::error::{Result, TopologyError};
use crate::geometry::Polyline;
use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::{cross_2d, Point2, Vector2, TOLERANCE};

use super::vertex::{Color, Vertex};

/// Parameter distance from a hooked end sample inside which hits are ignored.
const HOOK_TOLERANCE: f64 = 1e-9;

/// Color of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeColor {
    /// Red scaffolding edge.
    Cobweb,
    /// Black edge drawn by a player.
    Move,
}

/// A point where a segment crosses an edge.
#[derive(Debug, Clone)]
pub struct EdgeHit {
    /// The crossing point, tagged [`Color::Crossing`].
    pub at: Vertex,
    /// Parameter of the crossing along the probing segment, in `[0, 1]`.
    pub t: f64,
    /// Index of the crossed segment, in the edge's traversal order.
    pub segment: usize,
}

/// A polyline-backed, colored connection between two colored endpoints.
///
/// The direction flag lets one polyline back both an edge and its reverse.
/// Equality and ordering are defined by the initial heading and only make
/// sense between edges leaving the same vertex.
#[derive(Debug, Clone)]
pub struct DirectedEdge {
    polyline: Polyline,
    reversed: bool,
    color: EdgeColor,
    from_color: Color,
    to_color: Color,
    hooks: bool,
}

impl DirectedEdge {
    /// Creates an edge running along `polyline` in storage order.
    #[must_use]
    pub fn new(polyline: Polyline, color: EdgeColor, from_color: Color, to_color: Color) -> Self {
        Self {
            polyline,
            reversed: false,
            color,
            from_color,
            to_color,
            hooks: false,
        }
    }

    /// Creates a straight red scaffolding edge.
    #[must_use]
    pub fn cobweb(from: Vertex, to: Vertex) -> Option<Self> {
        let (Vertex::Positioned { color: fc, position: fp }, Vertex::Positioned { color: tc, position: tp }) =
            (from, to)
        else {
            return None;
        };
        Some(Self::new(Polyline::segment(fp, tp), EdgeColor::Cobweb, fc, tc))
    }

    /// Marks the first and last sample point as excluded from crossing tests.
    #[must_use]
    pub fn with_hooks(mut self, hooks: bool) -> Self {
        self.hooks = hooks;
        self
    }

    /// Returns the same edge traversed the other way, sharing the polyline.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            polyline: self.polyline.clone(),
            reversed: !self.reversed,
            color: self.color,
            from_color: self.to_color,
            to_color: self.from_color,
            hooks: self.hooks,
        }
    }

    #[must_use]
    pub fn from(&self) -> Vertex {
        Vertex::new(self.from_color, self.point(0))
    }

    #[must_use]
    pub fn to(&self) -> Vertex {
        Vertex::new(self.to_color, self.point(self.len() - 1))
    }

    #[must_use]
    pub fn color(&self) -> EdgeColor {
        self.color
    }

    #[must_use]
    pub fn from_color(&self) -> Color {
        self.from_color
    }

    #[must_use]
    pub fn to_color(&self) -> Color {
        self.to_color
    }

    #[must_use]
    pub fn has_hooks(&self) -> bool {
        self.hooks
    }

    /// Returns the backing polyline (in storage order, not traversal order).
    #[must_use]
    pub fn polyline(&self) -> &Polyline {
        &self.polyline
    }

    /// Returns the number of sample points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.polyline.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polyline.is_empty()
    }

    /// Returns sample `i` in traversal order.
    #[must_use]
    pub fn point(&self, i: usize) -> Point2 {
        let points = self.polyline.points();
        if self.reversed {
            points[points.len() - 1 - i]
        } else {
            points[i]
        }
    }

    /// Returns the samples in traversal order.
    #[must_use]
    pub fn points(&self) -> Vec<Point2> {
        (0..self.len()).map(|i| self.point(i)).collect()
    }

    /// Iterates over the segments in traversal order.
    pub fn segments(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        (1..self.len()).map(move |i| (self.point(i - 1), self.point(i)))
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.polyline.length()
    }

    /// Returns the initial heading: the offset from `from()` to the first
    /// later sample that differs from it.
    #[must_use]
    pub fn heading(&self) -> Vector2 {
        let origin = self.point(0);
        (1..self.len())
            .map(|i| self.point(i) - origin)
            .find(|d| d.norm() > TOLERANCE)
            .unwrap_or_else(Vector2::zeros)
    }

    /// Clockwise order of two edges leaving the same vertex.
    ///
    /// Headings are split into two half-planes (clockwise from +x, y-up) and
    /// ordered by cross product sign within a half-plane. Equal headings
    /// compare `Equal`.
    ///
    /// # Panics
    ///
    /// Panics if the two edges do not share the same `from()` vertex.
    #[must_use]
    pub fn compare_around(&self, other: &Self) -> Ordering {
        assert!(
            self.from() == other.from(),
            "compared edges leaving different vertices"
        );
        compare_headings(&self.heading(), &other.heading())
    }

    /// Returns `true` if both edges leave the same vertex with the same heading.
    #[must_use]
    pub fn same_entry(&self, other: &Self) -> bool {
        self.from() == other.from()
            && compare_headings(&self.heading(), &other.heading()) == Ordering::Equal
    }

    /// Splits the edge at `at`, a point on traversal segment `segment`.
    ///
    /// The split point takes `color`; the outer endpoints keep theirs.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if `segment` is out of range.
    pub fn split_on_segment(&self, segment: usize, at: Point2, color: Color) -> Result<(Self, Self)> {
        let (head, tail) = Polyline::new(self.points())?.split_on_segment(segment, at)?;
        Ok(self.halves(head, tail, color))
    }

    /// Splits the edge at interior sample `index` (in traversal order).
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if `index` is not an interior sample.
    pub fn split_at_sample(&self, index: usize, color: Color) -> Result<(Self, Self)> {
        let (head, tail) = Polyline::new(self.points())?.split_at_sample(index)?;
        Ok(self.halves(head, tail, color))
    }

    fn halves(&self, head: Polyline, tail: Polyline, color: Color) -> (Self, Self) {
        (
            Self::new(head, self.color, self.from_color, color).with_hooks(self.hooks),
            Self::new(tail, self.color, color, self.to_color).with_hooks(self.hooks),
        )
    }

    /// Concatenates this edge with `next`, which must start where this one ends.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::InvalidTopology` if the edges do not meet.
    pub fn joined(&self, next: &Self) -> Result<Self> {
        if self.to() != next.from() {
            return Err(TopologyError::InvalidTopology(format!(
                "cannot join edge ending at {:?} with edge leaving {:?}",
                self.to(),
                next.from()
            ))
            .into());
        }
        let mut points = self.points();
        points.extend((1..next.len()).map(|i| next.point(i)));
        Ok(Self::new(Polyline::new(points)?, self.color, self.from_color, next.to_color)
            .with_hooks(self.hooks || next.hooks))
    }

    /// Finds the crossing of segment `a → b` with this edge closest to `a`.
    ///
    /// Edges with hooks ignore hits on their first and last sample point.
    /// Hits within `skip_start` of `a` (as a fraction of the segment) are
    /// ignored.
    #[must_use]
    pub fn first_crossing(&self, a: &Point2, b: &Point2, skip_start: f64) -> Option<EdgeHit> {
        let n = self.len();
        let mut best: Option<EdgeHit> = None;
        for i in 1..n {
            let (p0, p1) = (self.point(i - 1), self.point(i));
            let Some((at, t, u)) = segment_segment_intersect_2d(a, b, &p0, &p1) else {
                continue;
            };
            if t <= skip_start {
                continue;
            }
            let on_end_sample =
                (i == 1 && u <= HOOK_TOLERANCE) || (i == n - 1 && u >= 1.0 - HOOK_TOLERANCE);
            if self.hooks && on_end_sample {
                continue;
            }
            if best.as_ref().is_none_or(|h| t < h.t) {
                best = Some(EdgeHit {
                    at: Vertex::new(Color::Crossing, at),
                    t,
                    segment: i - 1,
                });
            }
        }
        best
    }
}

/// Compares two headings by clockwise angle measured from +x.
///
/// A zero heading (a degenerate edge) has no angle: it sorts after every
/// real direction and equals only another zero heading.
#[must_use]
pub fn compare_headings(a: &Vector2, b: &Vector2) -> Ordering {
    let class = |v: &Vector2| {
        if v.x == 0.0 && v.y == 0.0 {
            2
        } else {
            u8::from(!(v.y < 0.0 || (v.y == 0.0 && v.x > 0.0)))
        }
    };
    class(a).cmp(&class(b)).then_with(|| {
        let cross = cross_2d(a, b);
        if cross < 0.0 {
            Ordering::Less
        } else if cross > 0.0 {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    })
}

impl PartialEq for DirectedEdge {
    fn eq(&self, other: &Self) -> bool {
        self.same_entry(other)
    }
}
