use crate::geometry::Point;

/// Default pick radius (pixels) for grabbing a control point
pub const DEFAULT_PICK_RADIUS: f32 = 15.0;

/// The three draggable control points of a vision cone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlPoint {
    Apex,
    LeftBorder,
    RightBorder,
}

impl ControlPoint {
    pub const ALL: [ControlPoint; 3] = [
        ControlPoint::Apex,
        ControlPoint::LeftBorder,
        ControlPoint::RightBorder,
    ];

    pub fn index(self) -> usize {
        match self {
            ControlPoint::Apex => 0,
            ControlPoint::LeftBorder => 1,
            ControlPoint::RightBorder => 2,
        }
    }
}

/// VisionCone describes the observer's field of view: an apex and two border points.
///
/// Points are stored relative to the grid origin, so panning the camera never
/// moves the cone. Accessors taking a `camera` offset convert to and from
/// world (screen) space.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisionCone {
    pub apex: Point,
    pub left_border: Point,
    pub right_border: Point,
    /// Inactive cones see nothing
    pub active: bool,
}

impl VisionCone {
    /// Create an active cone from world-space points
    pub fn new(apex: Point, left_border: Point, right_border: Point, camera: Point) -> Self {
        Self::from_grid_points(apex - camera, left_border - camera, right_border - camera)
    }

    /// Create an active cone from points already in grid space
    pub fn from_grid_points(apex: Point, left_border: Point, right_border: Point) -> Self {
        VisionCone {
            apex,
            left_border,
            right_border,
            active: true,
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Control point in grid space
    pub fn grid_point(&self, which: ControlPoint) -> Point {
        match which {
            ControlPoint::Apex => self.apex,
            ControlPoint::LeftBorder => self.left_border,
            ControlPoint::RightBorder => self.right_border,
        }
    }

    /// Control point translated into world space
    pub fn point(&self, which: ControlPoint, camera: Point) -> Point {
        self.grid_point(which) + camera
    }

    /// Overwrite a control point from a world-space position
    pub fn set_point(&mut self, which: ControlPoint, world: Point, camera: Point) {
        let relative = world - camera;
        match which {
            ControlPoint::Apex => self.apex = relative,
            ControlPoint::LeftBorder => self.left_border = relative,
            ControlPoint::RightBorder => self.right_border = relative,
        }
    }

    /// Snap a world-space point to a corner or the center of the tile it falls in.
    ///
    /// Fractional position inside the tile decides: both fractions below 0.25
    /// or above 0.75 (in any combination) pick the matching corner, anything
    /// else picks the center. Snapping a snapped point returns it unchanged.
    pub fn snap_to_grid(world: Point, camera: Point, cell_size: f32) -> Point {
        let grid_x = (world.x - camera.x) / cell_size;
        let grid_y = (world.y - camera.y) / cell_size;

        let cell_x = grid_x.floor();
        let cell_y = grid_y.floor();
        let frac_x = grid_x - cell_x;
        let frac_y = grid_y - cell_y;

        let low_x = frac_x < 0.25;
        let high_x = frac_x > 0.75;
        let low_y = frac_y < 0.25;
        let high_y = frac_y > 0.75;

        let (snap_x, snap_y) = if (low_x || high_x) && (low_y || high_y) {
            let corner_x = if high_x { cell_x + 1.0 } else { cell_x };
            let corner_y = if high_y { cell_y + 1.0 } else { cell_y };
            (corner_x * cell_size, corner_y * cell_size)
        } else {
            (
                cell_x * cell_size + cell_size / 2.0,
                cell_y * cell_size + cell_size / 2.0,
            )
        };

        if !(snap_x.is_finite() && snap_y.is_finite()) {
            return world;
        }

        Point::new(snap_x, snap_y) + camera
    }

    /// Nearest control point within `max_distance` of a world-space position.
    /// Ties go to the earlier point (apex, then left, then right).
    pub fn closest_point(&self, world: Point, camera: Point, max_distance: f32) -> Option<ControlPoint> {
        let mut closest = None;
        let mut min_distance = f32::MAX;

        for which in ControlPoint::ALL {
            let distance = world.distance(self.point(which, camera));
            if distance < min_distance && distance <= max_distance {
                min_distance = distance;
                closest = Some(which);
            }
        }

        closest
    }
}
