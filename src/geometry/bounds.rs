use crate::error::{OperationError, Result};
use crate::math::Point2;

/// Axis-aligned playing-area rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    min: Point2,
    max: Point2,
}

impl Bounds {
    /// Creates a rectangle from its lower-left corner and size.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if `width` or `height` is not positive.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self> {
        if !(width > 0.0 && height > 0.0) {
            return Err(OperationError::InvalidInput(format!(
                "bounds must have a positive size, got {width}x{height}"
            ))
            .into());
        }
        Ok(Self {
            min: Point2::new(x, y),
            max: Point2::new(x + width, y + height),
        })
    }

    /// Returns the lower-left corner.
    #[must_use]
    pub fn min(&self) -> Point2 {
        self.min
    }

    /// Returns the upper-right corner.
    #[must_use]
    pub fn max(&self) -> Point2 {
        self.max
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Returns the center of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point2 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Returns `true` if `p` lies inside the rectangle or on its border.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: Point2::new(0.0, 0.0),
            max: Point2::new(400.0, 400.0),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn contains_border_and_interior() {
        let b = Bounds::new(0.0, 0.0, 400.0, 300.0).unwrap();
        assert!(b.contains(&Point2::new(0.0, 0.0)));
        assert!(b.contains(&Point2::new(200.0, 150.0)));
        assert!(!b.contains(&Point2::new(400.1, 150.0)));
        assert!(!b.contains(&Point2::new(10.0, -1.0)));
    }

    #[test]
    fn center_of_square() {
        let b = Bounds::new(0.0, 0.0, 400.0, 400.0).unwrap();
        assert_eq!(b.center(), Point2::new(200.0, 200.0));
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(Bounds::new(0.0, 0.0, 0.0, 10.0).is_err());
        assert!(Bounds::new(0.0, 0.0, 10.0, -5.0).is_err());
    }
}
