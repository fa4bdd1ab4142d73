use crate::error::{OperationError, Result};
use crate::geometry::Bounds;
use crate::math::Point2;

/// What to do when no stroke sample qualifies as the middle sprout position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MiddleSproutPolicy {
    /// Refuse to commit the move.
    #[default]
    Reject,
    /// Commit the move without inserting a middle sprout.
    Skip,
}

/// Tuning parameters for stroke interpretation and move application.
#[derive(Debug, Clone, Copy)]
pub struct RuleConfig {
    bounds: Bounds,
    glue_radius: f64,
    min_segment_length: f64,
    vertex_tolerance: f64,
    middle_sprout: MiddleSproutPolicy,
}

impl RuleConfig {
    /// Creates a configuration for the given playing area.
    ///
    /// # Errors
    ///
    /// Returns an error if `glue_radius` is not positive or
    /// `min_segment_length` is negative.
    pub fn new(bounds: Bounds, glue_radius: f64, min_segment_length: f64) -> Result<Self> {
        if !(glue_radius > 0.0) {
            return Err(OperationError::InvalidInput(format!(
                "glue radius must be positive, got {glue_radius}"
            ))
            .into());
        }
        if !(min_segment_length >= 0.0) {
            return Err(OperationError::InvalidInput(format!(
                "minimum segment length must not be negative, got {min_segment_length}"
            ))
            .into());
        }
        Ok(Self {
            bounds,
            glue_radius,
            min_segment_length,
            vertex_tolerance: glue_radius * 0.25,
            middle_sprout: MiddleSproutPolicy::default(),
        })
    }

    /// Sets the clearance a stroke must keep from cobweb vertices.
    ///
    /// # Errors
    ///
    /// Returns an error if `tolerance` is not positive.
    pub fn with_vertex_tolerance(mut self, tolerance: f64) -> Result<Self> {
        if !(tolerance > 0.0) {
            return Err(OperationError::InvalidInput(format!(
                "vertex tolerance must be positive, got {tolerance}"
            ))
            .into());
        }
        self.vertex_tolerance = tolerance;
        Ok(self)
    }

    #[must_use]
    pub fn with_middle_sprout_policy(mut self, policy: MiddleSproutPolicy) -> Self {
        self.middle_sprout = policy;
        self
    }

    #[must_use]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    #[must_use]
    pub fn glue_radius(&self) -> f64 {
        self.glue_radius
    }

    #[must_use]
    pub fn min_segment_length(&self) -> f64 {
        self.min_segment_length
    }

    #[must_use]
    pub fn vertex_tolerance(&self) -> f64 {
        self.vertex_tolerance
    }

    #[must_use]
    pub fn middle_sprout(&self) -> MiddleSproutPolicy {
        self.middle_sprout
    }

    /// Returns `true` if `p` lies on the playing area.
    #[must_use]
    pub fn in_bounds(&self, p: &Point2) -> bool {
        self.bounds.contains(p)
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            glue_radius: 8.0,
            min_segment_length: 10.0,
            vertex_tolerance: 2.0,
            middle_sprout: MiddleSproutPolicy::Reject,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_board_is_400_square() {
        let config = RuleConfig::default();
        assert!((config.bounds().width() - 400.0).abs() < f64::EPSILON);
        assert!((config.glue_radius() - 8.0).abs() < f64::EPSILON);
        assert_eq!(config.middle_sprout(), MiddleSproutPolicy::Reject);
    }

    #[test]
    fn new_validates_parameters() {
        let bounds = Bounds::new(0.0, 0.0, 100.0, 100.0).unwrap();
        assert!(RuleConfig::new(bounds, 0.0, 1.0).is_err());
        assert!(RuleConfig::new(bounds, 5.0, -1.0).is_err());
        assert!(RuleConfig::new(bounds, f64::NAN, 1.0).is_err());
        let config = RuleConfig::new(bounds, 5.0, 0.0).unwrap();
        assert!(config.with_vertex_tolerance(0.0).is_err());
    }

    #[test]
    fn builders_set_knobs() {
        let config = RuleConfig::default()
            .with_middle_sprout_policy(MiddleSproutPolicy::Skip)
            .with_vertex_tolerance(3.5)
            .unwrap();
        assert_eq!(config.middle_sprout(), MiddleSproutPolicy::Skip);
        assert!((config.vertex_tolerance() - 3.5).abs() < f64::EPSILON);
    }
}
