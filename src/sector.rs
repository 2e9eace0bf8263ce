use crate::cone::VisionCone;
use crate::geometry::Point;
use std::f32::consts::TAU;

/// Border vectors shorter than this (pixels) have no direction
const MIN_BORDER_LENGTH: f32 = 1e-3;
/// Angular slack (radians) so points exactly on a border count as inside
const ANGLE_EPSILON: f32 = 1e-5;
/// Relative slack on the radius test
const RADIUS_EPSILON: f32 = 1e-5;

/// Sector derived from a vision cone: the angular interval [left_angle, right_angle]
/// swept with increasing angle, bounded by `radius`.
///
/// `right_angle` is unwrapped so that `left_angle <= right_angle < left_angle + 2π`;
/// the interval may exceed π.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sector {
    pub apex: Point,
    pub radius: f32,
    pub left_angle: f32,
    pub right_angle: f32,
}

/// Direction of a border vector, or None when it has no usable length
fn border_angle(vector: Point) -> Option<f32> {
    if vector.length() < MIN_BORDER_LENGTH {
        None
    } else {
        Some(vector.angle())
    }
}

impl Sector {
    /// Build the sector of an active cone.
    ///
    /// Returns None when the cone is inactive, any point is non-finite, or both
    /// borders coincide with the apex. A single border on the apex contributes
    /// no coverage: the interval collapses onto the other border's direction.
    pub fn from_cone(cone: &VisionCone) -> Option<Sector> {
        if !cone.active {
            return None;
        }

        let apex = cone.apex;
        if !(apex.is_finite() && cone.left_border.is_finite() && cone.right_border.is_finite()) {
            return None;
        }

        let left = cone.left_border - apex;
        let right = cone.right_border - apex;
        let radius = left.length().max(right.length());

        let (left_angle, right_angle) = match (border_angle(left), border_angle(right)) {
            (Some(l), Some(r)) => (l, r),
            (Some(l), None) => (l, l),
            (None, Some(r)) => (r, r),
            (None, None) => return None,
        };

        let right_angle = if right_angle < left_angle {
            right_angle + TAU
        } else {
            right_angle
        };

        Some(Sector {
            apex,
            radius,
            left_angle,
            right_angle,
        })
    }

    /// Angular width of the interval in radians
    pub fn width(&self) -> f32 {
        self.right_angle - self.left_angle
    }

    /// Whether an angle in (-π, π] falls within the interval (wraparound aware)
    pub fn contains_angle(&self, angle: f32) -> bool {
        if !angle.is_finite() {
            return false;
        }
        let normalized = if angle < self.left_angle - ANGLE_EPSILON {
            angle + TAU
        } else {
            angle
        };
        normalized >= self.left_angle - ANGLE_EPSILON && normalized <= self.right_angle + ANGLE_EPSILON
    }

    pub fn within_radius(&self, point: Point) -> bool {
        self.apex.distance(point) <= self.radius * (1.0 + RADIUS_EPSILON)
    }

    /// Radius and angle test for a single point. The apex itself is inside.
    pub fn contains(&self, point: Point) -> bool {
        if !point.is_finite() || !self.within_radius(point) {
            return false;
        }
        let offset = point - self.apex;
        offset.length() < MIN_BORDER_LENGTH || self.contains_angle(offset.angle())
    }
}
