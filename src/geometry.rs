use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Relative tolerance for orientation tests (scaled by the operand lengths)
const ORIENTATION_EPSILON: f32 = 1e-5;
/// Relative tolerance used when deciding whether a chord runs through a square's interior
const INTERIOR_EPSILON: f32 = 1e-4;

/// A 2D point in grid space (pixels relative to the grid origin)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Point) -> f32 {
        (other - self).length()
    }

    /// Angle of this vector in radians, in (-π, π]
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    /// 2D cross product (z component)
    pub fn cross(self, other: Point) -> f32 {
        self.x * other.y - self.y * other.x
    }

    pub fn dot(self, other: Point) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    fn mul(self, scale: f32) -> Point {
        Point::new(self.x * scale, self.y * scale)
    }
}

/// Sign of the turn a → b → c: 1 counter-clockwise (in y-up terms), -1 clockwise, 0 collinear
fn orientation(a: Point, b: Point, c: Point) -> i8 {
    let ab = b - a;
    let ac = c - a;
    let cross = ab.cross(ac);
    let tolerance = ORIENTATION_EPSILON * ab.length() * ac.length();

    if !cross.is_finite() {
        0
    } else if cross > tolerance {
        1
    } else if cross < -tolerance {
        -1
    } else {
        0
    }
}

/// A line segment between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Segment { start, end }
    }

    /// Proper crossing test: the segments intersect at a single point interior to both.
    ///
    /// Touching at an endpoint and collinear overlap do not count. Segments with
    /// non-finite coordinates never cross anything.
    pub fn crosses(&self, other: &Segment) -> bool {
        if !(self.start.is_finite()
            && self.end.is_finite()
            && other.start.is_finite()
            && other.end.is_finite())
        {
            return false;
        }

        let o1 = orientation(self.start, self.end, other.start);
        let o2 = orientation(self.start, self.end, other.end);
        let o3 = orientation(other.start, other.end, self.start);
        let o4 = orientation(other.start, other.end, self.end);

        o1 != 0 && o2 != 0 && o3 != 0 && o4 != 0 && o1 != o2 && o3 != o4
    }
}

/// Corner positions of an axis-aligned square, in the order returned by [`Square::corners`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    NW,
    NE,
    SE,
    SW,
}

impl Corner {
    pub const ALL: [Corner; 4] = [Corner::NW, Corner::NE, Corner::SE, Corner::SW];
}

/// Axis-aligned square covering one tile (y grows downward, so `min` is the NW corner)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    pub min: Point,
    pub max: Point,
}

impl Square {
    /// Square of tile (x, y) for a grid with the given cell size
    pub fn tile(x: i32, y: i32, cell_size: f32) -> Self {
        let min = Point::new(x as f32 * cell_size, y as f32 * cell_size);
        let max = Point::new((x + 1) as f32 * cell_size, (y + 1) as f32 * cell_size);
        Square { min, max }
    }

    pub fn size(&self) -> f32 {
        (self.max.x - self.min.x).max(self.max.y - self.min.y)
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    pub fn corner(&self, corner: Corner) -> Point {
        match corner {
            Corner::NW => self.min,
            Corner::NE => Point::new(self.max.x, self.min.y),
            Corner::SE => self.max,
            Corner::SW => Point::new(self.min.x, self.max.y),
        }
    }

    /// Corners in [NW, NE, SE, SW] order
    pub fn corners(&self) -> [Point; 4] {
        Corner::ALL.map(|corner| self.corner(corner))
    }

    /// Edges in order N, E, S, W
    pub fn edges(&self) -> [Segment; 4] {
        let [nw, ne, se, sw] = self.corners();
        [
            Segment::new(nw, ne),
            Segment::new(ne, se),
            Segment::new(se, sw),
            Segment::new(sw, nw),
        ]
    }

    /// Open containment with a small margin proportional to the square size
    pub fn contains_strictly(&self, point: Point) -> bool {
        let margin = INTERIOR_EPSILON * self.size();
        point.x > self.min.x + margin
            && point.x < self.max.x - margin
            && point.y > self.min.y + margin
            && point.y < self.max.y - margin
    }

    /// Liang–Barsky clip: parameter range of `segment` lying inside the closed square
    fn clip(&self, segment: &Segment) -> Option<(f32, f32)> {
        let d = segment.end - segment.start;
        let mut t0 = 0.0f32;
        let mut t1 = 1.0f32;

        let bounds = [
            (-d.x, segment.start.x - self.min.x),
            (d.x, self.max.x - segment.start.x),
            (-d.y, segment.start.y - self.min.y),
            (d.y, self.max.y - segment.start.y),
        ];

        for (p, q) in bounds {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }

        Some((t0, t1))
    }

    /// Whether the segment passes through the open interior of the square.
    ///
    /// A proper crossing of any edge counts; so does a chord that enters and
    /// leaves through corners (e.g. a ray running exactly along the diagonal),
    /// which no edge crossing reports. Touching a corner or sliding along an
    /// edge does not.
    pub fn is_cut_by(&self, segment: &Segment) -> bool {
        if self.edges().iter().any(|edge| segment.crosses(edge)) {
            return true;
        }

        if !(segment.start.is_finite() && segment.end.is_finite()) {
            return false;
        }

        match self.clip(segment) {
            Some((t0, t1)) if t1 > t0 => {
                let d = segment.end - segment.start;
                let chord = (t1 - t0) * d.length();
                if chord <= INTERIOR_EPSILON * self.size() {
                    return false;
                }
                let middle = segment.start + d * ((t0 + t1) * 0.5);
                self.contains_strictly(middle)
            }
            _ => false,
        }
    }
}
