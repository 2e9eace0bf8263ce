use crate::geometry::Point;

/// Distance (in cells) the ray is advanced to find the first tile it actually enters
const START_NUDGE: f32 = 1e-4;
/// Boundary crossings closer than this (in ray parameter units) count as a corner hit
const TIE_EPSILON: f32 = 1e-5;

/// Tile-by-tile traversal of the segment between two grid-space points.
///
/// Advances one tile boundary at a time along whichever axis is crossed first.
/// The first tile yielded is the one the ray enters on leaving `from` (for a
/// start on a tile boundary this is the tile on the far side). When the ray
/// passes exactly through a tile corner, both tiles touching that corner are
/// yielded before the diagonal tile. Iteration ends at the tile containing `to`.
#[derive(Debug, Clone)]
pub struct GridRay {
    cell: (i32, i32),
    end: (i32, i32),
    step: (i32, i32),
    t_max: (f32, f32),
    t_delta: (f32, f32),
    remaining: i32,
    pending: Vec<(i32, i32)>,
    started: bool,
}

/// First boundary crossing parameter along one axis
fn first_crossing(start: f32, delta: f32, cell: i32) -> f32 {
    if delta > 0.0 {
        ((cell + 1) as f32 - start) / delta
    } else if delta < 0.0 {
        (start - cell as f32) / -delta
    } else {
        f32::INFINITY
    }
}

impl GridRay {
    /// Build a traversal; None for non-finite input or a non-positive cell size
    pub fn new(from: Point, to: Point, cell_size: f32) -> Option<Self> {
        if !(from.is_finite() && to.is_finite()) || !(cell_size > 0.0) {
            return None;
        }

        let start = Point::new(from.x / cell_size, from.y / cell_size);
        let end = Point::new(to.x / cell_size, to.y / cell_size);
        let d = end - start;
        let length = d.length();
        let end_cell = (end.x.floor() as i32, end.y.floor() as i32);

        if length < START_NUDGE {
            return Some(GridRay {
                cell: end_cell,
                end: end_cell,
                step: (0, 0),
                t_max: (f32::INFINITY, f32::INFINITY),
                t_delta: (f32::INFINITY, f32::INFINITY),
                remaining: 0,
                pending: Vec::new(),
                started: false,
            });
        }

        let entered = start + d * (START_NUDGE / length);
        let cell = (entered.x.floor() as i32, entered.y.floor() as i32);

        let step = (d.x.signum_or_zero(), d.y.signum_or_zero());
        let t_delta = (
            if d.x != 0.0 { 1.0 / d.x.abs() } else { f32::INFINITY },
            if d.y != 0.0 { 1.0 / d.y.abs() } else { f32::INFINITY },
        );
        let t_max = (
            first_crossing(start.x, d.x, cell.0),
            first_crossing(start.y, d.y, cell.1),
        );
        let remaining = (end_cell.0 - cell.0).abs() + (end_cell.1 - cell.1).abs();

        Some(GridRay {
            cell,
            end: end_cell,
            step,
            t_max,
            t_delta,
            remaining,
            pending: Vec::new(),
            started: false,
        })
    }
}

trait SignumOrZero {
    fn signum_or_zero(self) -> i32;
}

impl SignumOrZero for f32 {
    fn signum_or_zero(self) -> i32 {
        if self > 0.0 {
            1
        } else if self < 0.0 {
            -1
        } else {
            0
        }
    }
}

impl Iterator for GridRay {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<(i32, i32)> {
        if let Some(tile) = self.pending.pop() {
            return Some(tile);
        }

        if !self.started {
            self.started = true;
            return Some(self.cell);
        }

        if self.cell == self.end || self.remaining <= 0 {
            return None;
        }

        let (t_x, t_y) = self.t_max;
        let corner_hit = t_x.is_finite() && t_y.is_finite() && (t_x - t_y).abs() <= TIE_EPSILON;

        if corner_hit {
            let side_x = (self.cell.0 + self.step.0, self.cell.1);
            let side_y = (self.cell.0, self.cell.1 + self.step.1);
            self.cell = (self.cell.0 + self.step.0, self.cell.1 + self.step.1);
            self.t_max = (t_x + self.t_delta.0, t_y + self.t_delta.1);
            self.remaining -= 2;

            self.pending.push(self.cell);
            self.pending.push(side_y);
            return Some(side_x);
        }

        if t_x < t_y {
            self.cell.0 += self.step.0;
            self.t_max.0 += self.t_delta.0;
        } else {
            self.cell.1 += self.step.1;
            self.t_max.1 += self.t_delta.1;
        }
        self.remaining -= 1;

        Some(self.cell)
    }
}
