use super::{cross_2d, Point2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &super::Vector2,
    p2: &Point2,
    d2: &super::Vector2,
) -> Option<(f64, f64)> {
    let cross = cross_2d(d1, d2);
    if cross.abs() < TOLERANCE {
        return None;
    }
    let d = p2 - p1;
    let t = cross_2d(&d, d2) / cross;
    let u = cross_2d(&d, d1) / cross;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are in `[0, 1]`.
/// Parallel (including collinear) segments never intersect.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;
    let (t, u) = line_line_intersect_2d(a0, &da, b0, &db)?;

    // Use a small epsilon to include endpoints.
    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t_clamped = t.clamp(0.0, 1.0);
        Some((a0 + da * t_clamped, t_clamped, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector2;

    #[test]
    fn line_line_perpendicular() {
        let p1 = Point2::new(0.0, 0.0);
        let d1 = Vector2::new(1.0, 0.0);
        let p2 = Point2::new(0.5, -1.0);
        let d2 = Vector2::new(0.0, 1.0);
        let (t, u) = line_line_intersect_2d(&p1, &d1, &p2, &d2).unwrap();
        assert!((t - 0.5).abs() < TOLERANCE);
        assert!((u - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn line_line_parallel_returns_none() {
        let p1 = Point2::new(0.0, 0.0);
        let d1 = Vector2::new(1.0, 0.0);
        let p2 = Point2::new(0.0, 1.0);
        let d2 = Vector2::new(1.0, 0.0);
        assert!(line_line_intersect_2d(&p1, &d1, &p2, &d2).is_none());
    }

    #[test]
    fn segment_segment_crossing() {
        let a0 = Point2::new(0.0, 0.0);
        let a1 = Point2::new(2.0, 2.0);
        let b0 = Point2::new(0.0, 2.0);
        let b1 = Point2::new(2.0, 0.0);
        let (pt, t, u) = segment_segment_intersect_2d(&a0, &a1, &b0, &b1).unwrap();
        assert!((pt.x - 1.0).abs() < TOLERANCE);
        assert!((pt.y - 1.0).abs() < TOLERANCE);
        assert!((t - 0.5).abs() < TOLERANCE);
        assert!((u - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn segment_segment_no_crossing() {
        let a0 = Point2::new(0.0, 0.0);
        let a1 = Point2::new(1.0, 0.0);
        let b0 = Point2::new(0.0, 1.0);
        let b1 = Point2::new(1.0, 1.0);
        assert!(segment_segment_intersect_2d(&a0, &a1, &b0, &b1).is_none());
    }

    #[test]
    fn segment_segment_touching_endpoint() {
        let a0 = Point2::new(0.0, 0.0);
        let a1 = Point2::new(0.0, 2.0);
        let b0 = Point2::new(0.0, 0.0);
        let b1 = Point2::new(3.0, 0.0);
        let (pt, t, u) = segment_segment_intersect_2d(&a0, &a1, &b0, &b1).unwrap();
        assert!(pt.coords.norm() < TOLERANCE);
        assert!(t.abs() < TOLERANCE);
        assert!(u.abs() < TOLERANCE);
    }

    #[test]
    fn collinear_segments_do_not_intersect() {
        let a0 = Point2::new(0.0, 0.0);
        let a1 = Point2::new(2.0, 0.0);
        let b0 = Point2::new(1.0, 0.0);
        let b1 = Point2::new(3.0, 0.0);
        assert!(segment_segment_intersect_2d(&a0, &a1, &b0, &b1).is_none());
    }
}
