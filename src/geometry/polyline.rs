use std::sync::Arc;

use crate::error::{GeometryError, Result};
use crate::math::distance_2d::coincident;
use crate::math::{distance, Point2};

/// An immutable, shareable sequence of at least two sample points.
///
/// Cloning a `Polyline` only bumps a reference count, so one polyline can
/// back an edge and its reverse without duplicating storage.
#[derive(Debug, Clone)]
pub struct Polyline {
    points: Arc<[Point2]>,
}

impl Polyline {
    /// Creates a polyline from its sample points.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if fewer than 2 points are given.
    pub fn new(points: Vec<Point2>) -> Result<Self> {
        if points.len() < 2 {
            return Err(GeometryError::Degenerate(format!(
                "polyline needs at least 2 points, got {}",
                points.len()
            ))
            .into());
        }
        Ok(Self {
            points: points.into(),
        })
    }

    /// Creates a straight two-point polyline.
    #[must_use]
    pub fn segment(a: Point2, b: Point2) -> Self {
        Self {
            points: Arc::from([a, b]),
        }
    }

    /// Returns the sample points in storage order.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Returns the number of sample points (always at least 2).
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; provided for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the first sample point.
    #[must_use]
    pub fn first(&self) -> Point2 {
        self.points[0]
    }

    /// Returns the last sample point.
    #[must_use]
    pub fn last(&self) -> Point2 {
        self.points[self.points.len() - 1]
    }

    /// Returns the total arc length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| distance(&w[0], &w[1]))
            .sum()
    }

    /// Returns `true` if both polylines are backed by the same storage.
    #[must_use]
    pub fn shares_storage(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.points, &other.points)
    }

    /// Splits the polyline at a point lying on segment `segment`
    /// (between samples `segment` and `segment + 1`).
    ///
    /// The split point becomes the last sample of the first half and the first
    /// sample of the second half.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if `segment` is out of range.
    pub fn split_on_segment(&self, segment: usize, at: Point2) -> Result<(Self, Self)> {
        if segment + 1 >= self.points.len() {
            return Err(GeometryError::Degenerate(format!(
                "segment {segment} out of range for {} points",
                self.points.len()
            ))
            .into());
        }
        let mut head: Vec<Point2> = self.points[..=segment].to_vec();
        if head.len() > 1 && coincident(&head[head.len() - 1], &at) {
            head.pop();
        }
        head.push(at);
        let mut tail = vec![at];
        tail.extend(
            self.points[segment + 1..]
                .iter()
                .copied()
                .skip_while(|p| coincident(p, &at)),
        );
        Ok((Self::new(head)?, Self::new(tail)?))
    }

    /// Splits the polyline at an interior sample, which is shared by both halves.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if `index` is not an interior sample.
    pub fn split_at_sample(&self, index: usize) -> Result<(Self, Self)> {
        if index == 0 || index + 1 >= self.points.len() {
            return Err(GeometryError::Degenerate(format!(
                "sample {index} is not interior to a {}-point polyline",
                self.points.len()
            ))
            .into());
        }
        Ok((
            Self::new(self.points[..=index].to_vec())?,
            Self::new(self.points[index..].to_vec())?,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn new_rejects_single_point() {
        assert!(Polyline::new(vec![p(0.0, 0.0)]).is_err());
        assert!(Polyline::new(vec![]).is_err());
    }

    #[test]
    fn length_sums_segments() {
        let pl = Polyline::new(vec![p(0.0, 0.0), p(3.0, 4.0), p(3.0, 10.0)]).unwrap();
        assert!((pl.length() - 11.0).abs() < 1e-12);
        assert_eq!(pl.len(), 3);
    }

    #[test]
    fn split_on_segment_inserts_point() {
        let pl = Polyline::segment(p(0.0, 0.0), p(10.0, 0.0));
        let (a, b) = pl.split_on_segment(0, p(4.0, 0.0)).unwrap();
        assert_eq!(a.points(), &[p(0.0, 0.0), p(4.0, 0.0)]);
        assert_eq!(b.points(), &[p(4.0, 0.0), p(10.0, 0.0)]);
    }

    #[test]
    fn split_on_segment_out_of_range() {
        let pl = Polyline::segment(p(0.0, 0.0), p(10.0, 0.0));
        assert!(pl.split_on_segment(1, p(4.0, 0.0)).is_err());
    }

    #[test]
    fn split_at_sample_shares_point() {
        let pl = Polyline::new(vec![p(0.0, 0.0), p(1.0, 1.0), p(2.0, 0.0)]).unwrap();
        let (a, b) = pl.split_at_sample(1).unwrap();
        assert_eq!(a.last(), p(1.0, 1.0));
        assert_eq!(b.first(), p(1.0, 1.0));
        assert!(pl.split_at_sample(0).is_err());
        assert!(pl.split_at_sample(2).is_err());
    }

    #[test]
    fn clones_share_storage() {
        let pl = Polyline::segment(p(0.0, 0.0), p(1.0, 0.0));
        let other = pl.clone();
        assert!(pl.shares_storage(&other));
    }
}
