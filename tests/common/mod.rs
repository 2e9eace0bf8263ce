#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use visioncone::{OcclusionEngine, Point, TileGrid, Visibility, VisionCone};

/// JSON scenario: grid, cone (grid-space pixels) and spot checks
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConeTestData {
    #[serde(rename = "testName")]
    pub test_name: String,
    #[serde(rename = "gridWidth")]
    pub grid_width: i32,
    #[serde(rename = "gridHeight")]
    pub grid_height: i32,
    #[serde(rename = "cellSize")]
    pub cell_size: f32,
    #[serde(rename = "blockedCells")]
    pub blocked_cells: Vec<(i32, i32)>,
    pub apex: Point,
    #[serde(rename = "leftBorder")]
    pub left_border: Point,
    #[serde(rename = "rightBorder")]
    pub right_border: Point,
    #[serde(rename = "mustSee")]
    pub must_see: Vec<(i32, i32)>,
    #[serde(rename = "mustNotSee")]
    pub must_not_see: Vec<(i32, i32)>,
}

/// Load a test from JSON file
pub fn load_test(path: &Path) -> Result<ConeTestData, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    let test_data: ConeTestData = serde_json::from_str(&contents)?;
    Ok(test_data)
}

impl ConeTestData {
    pub fn grid(&self) -> TileGrid {
        TileGrid::with_blocked(self.grid_width, self.grid_height, &self.blocked_cells)
    }

    pub fn cone(&self) -> VisionCone {
        VisionCone::from_grid_points(self.apex, self.left_border, self.right_border)
    }

    pub fn compute(&self) -> Visibility {
        OcclusionEngine::new(self.cell_size).compute(&self.grid(), &self.cone())
    }
}

fn flip_cell(cell: (i32, i32), width: i32, height: i32, h: bool, v: bool) -> (i32, i32) {
    (
        if h { width - 1 - cell.0 } else { cell.0 },
        if v { height - 1 - cell.1 } else { cell.1 },
    )
}

fn flip_point(p: Point, width: f32, height: f32, h: bool, v: bool) -> Point {
    Point::new(
        if h { width - p.x } else { p.x },
        if v { height - p.y } else { p.y },
    )
}

/// Mirror a test. A single mirror reverses the sweep direction, so the
/// borders trade places; mirroring both axes is a rotation and keeps them.
fn flip_test(test: &ConeTestData, h: bool, v: bool, suffix: &str) -> ConeTestData {
    let (w, ht) = (test.grid_width, test.grid_height);
    let (pw, ph) = (w as f32 * test.cell_size, ht as f32 * test.cell_size);
    let cells = |list: &[(i32, i32)]| -> Vec<(i32, i32)> {
        list.iter().map(|&c| flip_cell(c, w, ht, h, v)).collect()
    };

    let left = flip_point(test.left_border, pw, ph, h, v);
    let right = flip_point(test.right_border, pw, ph, h, v);
    let (left_border, right_border) = if h != v { (right, left) } else { (left, right) };

    ConeTestData {
        test_name: format!("{}_{}", test.test_name, suffix),
        grid_width: w,
        grid_height: ht,
        cell_size: test.cell_size,
        blocked_cells: cells(&test.blocked_cells),
        apex: flip_point(test.apex, pw, ph, h, v),
        left_border,
        right_border,
        must_see: cells(&test.must_see),
        must_not_see: cells(&test.must_not_see),
    }
}

/// Flip test horizontally (mirror left-right)
pub fn flip_test_horizontal(test: &ConeTestData) -> ConeTestData {
    flip_test(test, true, false, "h_flip")
}

/// Flip test vertically (mirror top-bottom)
pub fn flip_test_vertical(test: &ConeTestData) -> ConeTestData {
    flip_test(test, false, true, "v_flip")
}

/// Flip test both horizontally and vertically
pub fn flip_test_both(test: &ConeTestData) -> ConeTestData {
    flip_test(test, true, true, "hv_flip")
}

/// Check the spot checks of a single variant; Err lists the offending tiles
pub fn run_single_test(test: &ConeTestData) -> Result<(), String> {
    let vis = test.compute();
    let hidden: Vec<_> = test.must_see.iter().filter(|&&(x, y)| !vis.is_visible(x, y)).collect();
    let leaked: Vec<_> = test.must_not_see.iter().filter(|&&(x, y)| vis.is_visible(x, y)).collect();

    if hidden.is_empty() && leaked.is_empty() {
        Ok(())
    } else {
        Err(format!("should see {:?}, should not see {:?}", hidden, leaked))
    }
}

/// Run a test with all 4 variants (original, h_flip, v_flip, hv_flip)
pub fn run_test(test: &ConeTestData) -> Result<(), String> {
    let variants = [
        test.clone(),
        flip_test_horizontal(test),
        flip_test_vertical(test),
        flip_test_both(test),
    ];

    for variant in &variants {
        run_single_test(variant).map_err(|e| format!("{}: {}", variant.test_name, e))?;
    }

    Ok(())
}

/// Expected map parsed from a text layout
#[derive(Debug)]
pub struct Layout {
    pub grid: TileGrid,
    pub apex_tile: Option<(i32, i32)>,
    pub visible: HashSet<(i32, i32)>,
}

/// Parse a text layout in the report's character format
/// - V: apex tile (not checked)
/// - X: blocked tile
/// - .: visible tile
/// - !: tile that must not be visible
///
/// Blank lines are ignored; every row must have the same width.
pub fn parse_layout(text: &str) -> Result<Layout, Box<dyn std::error::Error>> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if rows.is_empty() {
        return Err("No grid rows found in layout".into());
    }

    let width = rows[0].chars().count() as i32;
    let height = rows.len() as i32;
    let mut blocked = Vec::new();
    let mut visible = HashSet::new();
    let mut apex_tile = None;

    for (y, row) in rows.iter().enumerate() {
        if row.chars().count() as i32 != width {
            return Err(format!("Row {} has width {}, expected {}", y, row.chars().count(), width).into());
        }
        for (x, ch) in row.chars().enumerate() {
            let cell = (x as i32, y as i32);
            match ch {
                'V' => apex_tile = Some(cell),
                'X' => blocked.push(cell),
                '.' => {
                    visible.insert(cell);
                }
                '!' => {}
                other => return Err(format!("Unknown layout character '{}'", other).into()),
            }
        }
    }

    Ok(Layout {
        grid: TileGrid::with_blocked(width, height, &blocked),
        apex_tile,
        visible,
    })
}

/// Compare a computed map against a layout, skipping the apex tile.
/// Returns (missing, extra) tiles.
pub fn diff_layout(layout: &Layout, vis: &Visibility) -> (Vec<(i32, i32)>, Vec<(i32, i32)>) {
    let mut missing = Vec::new();
    let mut extra = Vec::new();

    for y in 0..layout.grid.height {
        for x in 0..layout.grid.width {
            if Some((x, y)) == layout.apex_tile {
                continue;
            }
            let expected = layout.visible.contains(&(x, y));
            let actual = vis.is_visible(x, y);
            if expected && !actual {
                missing.push((x, y));
            } else if actual && !expected {
                extra.push((x, y));
            }
        }
    }

    (missing, extra)
}

/// Mirror a grid and cone left-right, swapping the borders
pub fn mirror_horizontal(grid: &TileGrid, cone: &VisionCone, cell_size: f32) -> (TileGrid, VisionCone) {
    let blocked: Vec<(i32, i32)> = grid
        .iter()
        .filter(|(_, _, tile)| tile.blocked)
        .map(|(x, y, _)| (grid.width - 1 - x, y))
        .collect();
    let width = grid.width as f32 * cell_size;
    let mirror = |p: Point| Point::new(width - p.x, p.y);

    (
        TileGrid::with_blocked(grid.width, grid.height, &blocked),
        VisionCone::from_grid_points(mirror(cone.apex), mirror(cone.right_border), mirror(cone.left_border)),
    )
}
