use crate::cone::VisionCone;
use crate::geometry::{Point, Square};
use crate::grid::TileGrid;
use crate::occlusion::{OcclusionEngine, ShadowSegment, Visibility};
use serde::Serialize;

/// Cell size used by the built-in fixtures
pub const FIXTURE_CELL_SIZE: f32 = 32.0;

/// Tile marked `V`: the one whose interior holds the apex of an active cone
pub fn apex_tile(cone: &VisionCone, cell_size: f32) -> Option<(i32, i32)> {
    if !cone.active {
        return None;
    }
    OcclusionEngine::new(cell_size).apex_tile(cone.apex)
}

/// Character grid: `V` apex tile (none when the apex sits on a tile boundary),
/// `X` blocked, `.` visible, `!` not visible.
/// Rows are prefixed with their index; the first line labels columns (mod 10).
pub fn ascii_grid(grid: &TileGrid, cone: &VisionCone, vis: &Visibility, cell_size: f32) -> String {
    let apex = apex_tile(cone, cell_size);
    let mut out = String::from("    ");
    for x in 0..grid.width {
        out.push(char::from_digit((x % 10) as u32, 10).unwrap_or('?'));
    }
    out.push('\n');

    for y in 0..grid.height {
        out.push_str(&format!("{:2}: ", y));
        for x in 0..grid.width {
            let symbol = if apex == Some((x, y)) {
                'V'
            } else if grid.is_blocked(x, y) {
                'X'
            } else if vis.is_visible(x, y) {
                '.'
            } else {
                '!'
            };
            out.push(symbol);
        }
        out.push('\n');
    }

    out
}

/// CSV dump with a `Y\X` header row; cells are `V`, `X`, `1` (visible) or `0`
pub fn csv_grid(grid: &TileGrid, cone: &VisionCone, vis: &Visibility, cell_size: f32) -> String {
    let apex = apex_tile(cone, cell_size);
    let mut out = String::from("Y\\X");
    for x in 0..grid.width {
        out.push_str(&format!(",{}", x));
    }
    out.push('\n');

    for y in 0..grid.height {
        out.push_str(&y.to_string());
        for x in 0..grid.width {
            let cell = if apex == Some((x, y)) {
                "V"
            } else if grid.is_blocked(x, y) {
                "X"
            } else if vis.is_visible(x, y) {
                "1"
            } else {
                "0"
            };
            out.push(',');
            out.push_str(cell);
        }
        out.push('\n');
    }

    out
}

/// JSON summary of a single query
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub name: String,
    pub width: i32,
    pub height: i32,
    pub cell_size: f32,
    pub apex: Point,
    pub left_border: Point,
    pub right_border: Point,
    pub radius: Option<f32>,
    #[serde(rename = "visibleCount")]
    pub visible_count: usize,
    pub visible: Vec<[i32; 2]>,
    pub blocked: Vec<[i32; 2]>,
    pub shadows: Vec<ShadowSegment>,
}

impl Report {
    pub fn new(name: &str, grid: &TileGrid, cone: &VisionCone, vis: &Visibility, cell_size: f32) -> Self {
        Report {
            name: name.to_string(),
            width: grid.width,
            height: grid.height,
            cell_size,
            apex: cone.apex,
            left_border: cone.left_border,
            right_border: cone.right_border,
            radius: vis.sector().map(|sector| sector.radius),
            visible_count: vis.visible_count(),
            visible: vis.visible_tiles().map(|(x, y)| [x, y]).collect(),
            blocked: grid
                .iter()
                .filter(|(_, _, tile)| tile.blocked)
                .map(|(x, y, _)| [x, y])
                .collect(),
            shadows: vis.shadows().to_vec(),
        }
    }
}

/// Named grid + cone setup for regression inspection
#[derive(Debug, Clone)]
pub struct Fixture {
    pub name: &'static str,
    pub grid: TileGrid,
    pub cone: VisionCone,
    pub cell_size: f32,
}

impl Fixture {
    pub const NAMES: [&'static str; 2] = ["case1", "case2"];

    /// Single obstacle in front of an observer looking south through a half plane
    pub fn case1() -> Self {
        let cs = FIXTURE_CELL_SIZE;
        let grid = TileGrid::with_blocked(26, 27, &[(14, 14)]);
        let apex = Square::tile(12, 10, cs).center();
        let r = 16.0 * cs;
        let cone = VisionCone::from_grid_points(apex, apex + Point::new(r, 0.0), apex + Point::new(-r, 0.0));
        Fixture {
            name: "case1",
            grid,
            cone,
            cell_size: cs,
        }
    }

    /// Observer near the top-left corner looking south-east across scattered obstacles
    pub fn case2() -> Self {
        let cs = FIXTURE_CELL_SIZE;
        let grid = TileGrid::with_blocked(
            26,
            27,
            &[(20, 2), (10, 5), (6, 10), (1, 13), (2, 13), (3, 13), (15, 14)],
        );
        let apex = Square::tile(3, 2, cs).center();
        let r = 24.0 * cs;
        let cone = VisionCone::from_grid_points(apex, apex + Point::new(r, 0.0), apex + Point::new(0.0, r));
        Fixture {
            name: "case2",
            grid,
            cone,
            cell_size: cs,
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "case1" => Some(Self::case1()),
            "case2" => Some(Self::case2()),
            _ => None,
        }
    }

    pub fn compute(&self) -> Visibility {
        OcclusionEngine::new(self.cell_size).compute(&self.grid, &self.cone)
    }
}
