use super::{Point2, TOLERANCE};

/// Returns the minimum distance from point `p` to the line segment `a → b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return (p - a).norm();
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    (p - (a + d * t)).norm()
}

/// Returns `true` if `p` lies on segment `a → b` within `tolerance`,
/// strictly away from both endpoints.
#[must_use]
pub fn is_point_inside_segment(p: &Point2, a: &Point2, b: &Point2, tolerance: f64) -> bool {
    if (p - a).norm() <= tolerance || (p - b).norm() <= tolerance {
        return false;
    }
    point_to_segment_dist(p, a, b) <= tolerance
}

/// Returns `true` if two points coincide within [`TOLERANCE`].
#[must_use]
pub fn coincident(a: &Point2, b: &Point2) -> bool {
    (a - b).norm() < TOLERANCE
}
