use crate::cone::VisionCone;
use crate::corners::silhouette_points;
use crate::geometry::{Point, Segment, Square};
use crate::grid::TileGrid;
use crate::ray::GridRay;
use crate::sector::Sector;
use log::{debug, trace};
use serde::Serialize;

/// Shadow edge cast by a blocking tile: from a silhouette corner away from the apex
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShadowSegment {
    pub start: Point,
    pub end: Point,
}

impl ShadowSegment {
    pub fn segment(&self) -> Segment {
        Segment::new(self.start, self.end)
    }
}

/// Result of one visibility query. Owns everything it reports; nothing is
/// shared with later queries.
#[derive(Debug, Clone)]
pub struct Visibility {
    width: i32,
    height: i32,
    visible: Vec<bool>,
    shadows: Vec<ShadowSegment>,
    sector: Option<Sector>,
}

impl Visibility {
    /// A map where nothing is visible
    fn hidden(grid: &TileGrid) -> Self {
        Visibility {
            width: grid.width,
            height: grid.height,
            visible: vec![false; (grid.width * grid.height) as usize],
            shadows: Vec::new(),
            sector: None,
        }
    }

    /// Whether tile (x, y) is fully visible. Out of range is never visible.
    pub fn is_visible(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return false;
        }
        self.visible[(x + y * self.width) as usize]
    }

    /// Shadow segments built for this query
    pub fn shadows(&self) -> &[ShadowSegment] {
        &self.shadows
    }

    /// Sector used for this query; None when the cone was inactive or degenerate
    pub fn sector(&self) -> Option<&Sector> {
        self.sector.as_ref()
    }

    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|&&v| v).count()
    }

    /// Coordinates of all visible tiles in row-major order
    pub fn visible_tiles(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let width = self.width;
        self.visible
            .iter()
            .enumerate()
            .filter(|(_, &v)| v)
            .map(move |(id, _)| (id as i32 % width, id as i32 / width))
    }
}

/// Computes which tiles a vision cone sees on a tile grid.
///
/// Every call is a fresh computation over the grid and cone it is handed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OcclusionEngine {
    cell_size: f32,
}

impl OcclusionEngine {
    pub fn new(cell_size: f32) -> Self {
        OcclusionEngine { cell_size }
    }

    /// Compute the visibility map and shadow segments for the current grid and cone
    pub fn compute(&self, grid: &TileGrid, cone: &VisionCone) -> Visibility {
        if !(self.cell_size > 0.0 && self.cell_size.is_finite()) {
            return Visibility::hidden(grid);
        }

        let sector = match Sector::from_cone(cone) {
            Some(sector) => sector,
            None => {
                trace!("cone inactive or degenerate, nothing visible");
                return Visibility::hidden(grid);
            }
        };

        let shadows = self.shadow_segments(grid, &sector);
        let own_tile = self.apex_tile(sector.apex);

        let mut visible = Vec::with_capacity((grid.width * grid.height) as usize);
        for y in 0..grid.height {
            for x in 0..grid.width {
                visible.push(self.tile_visible(grid, &sector, &shadows, own_tile, x, y));
            }
        }

        let result = Visibility {
            width: grid.width,
            height: grid.height,
            visible,
            shadows,
            sector: Some(sector),
        };
        debug!(
            "visibility: {} tiles visible, {} shadow segments",
            result.visible_count(),
            result.shadows.len()
        );
        result
    }

    /// Single-tile query; equivalent to `compute(grid, cone).is_visible(x, y)`
    pub fn visible(&self, grid: &TileGrid, cone: &VisionCone, x: i32, y: i32) -> bool {
        self.compute(grid, cone).is_visible(x, y)
    }

    /// Shadow segments of every blocking tile whose center lies inside the sector
    pub fn shadow_segments(&self, grid: &TileGrid, sector: &Sector) -> Vec<ShadowSegment> {
        let mut shadows = Vec::new();

        for (x, y, tile) in grid.iter() {
            if !tile.blocked {
                continue;
            }

            let square = Square::tile(x, y, self.cell_size);
            if !sector.contains(square.center()) {
                continue;
            }

            let Some(corners) = silhouette_points(sector.apex, &square) else {
                continue;
            };

            for corner in corners {
                if let Some(shadow) = cast_shadow(sector, corner) {
                    shadows.push(shadow);
                }
            }
        }

        trace!("built {} shadow segments", shadows.len());
        shadows
    }

    /// Tile whose open interior holds the apex; an apex on a tile boundary has none
    pub fn apex_tile(&self, apex: Point) -> Option<(i32, i32)> {
        if !(self.cell_size > 0.0 && apex.is_finite()) {
            return None;
        }
        let x = (apex.x / self.cell_size).floor() as i32;
        let y = (apex.y / self.cell_size).floor() as i32;
        Square::tile(x, y, self.cell_size)
            .contains_strictly(apex)
            .then_some((x, y))
    }

    /// Center-to-center sight line between two tiles. Both end tiles count,
    /// so a blocked start or destination breaks the line.
    pub fn clear_line(&self, grid: &TileGrid, from: (i32, i32), to: (i32, i32)) -> bool {
        let start = Square::tile(from.0, from.1, self.cell_size).center();
        let end = Square::tile(to.0, to.1, self.cell_size).center();
        match GridRay::new(start, end, self.cell_size) {
            Some(mut ray) => ray.all(|(x, y)| !grid.is_blocked(x, y)),
            None => false,
        }
    }

    fn tile_visible(
        &self,
        grid: &TileGrid,
        sector: &Sector,
        shadows: &[ShadowSegment],
        own_tile: Option<(i32, i32)>,
        x: i32,
        y: i32,
    ) -> bool {
        let square = Square::tile(x, y, self.cell_size);

        // Tile must lie entirely inside the sector
        if !square.corners().iter().all(|&corner| sector.contains(corner)) {
            return false;
        }

        if !self.line_of_sight(grid, sector.apex, own_tile, x, y) {
            return false;
        }

        !shadows.iter().any(|shadow| square.is_cut_by(&shadow.segment()))
    }

    /// Trace from the apex to the center of (x, y); any blocked tile on the way
    /// (other than the apex's own tile) or at the destination breaks the sight line.
    fn line_of_sight(&self, grid: &TileGrid, apex: Point, own_tile: Option<(i32, i32)>, x: i32, y: i32) -> bool {
        if grid.is_blocked(x, y) {
            return false;
        }

        let target = Square::tile(x, y, self.cell_size).center();
        match GridRay::new(apex, target, self.cell_size) {
            Some(ray) => ray
                .filter(|&tile| Some(tile) != own_tile)
                .all(|(tx, ty)| !grid.is_blocked(tx, ty)),
            None => false,
        }
    }
}

/// Ray from the apex through `corner`, from the corner out to the sector radius.
/// Corners at or beyond the radius cast nothing inside the sector.
fn cast_shadow(sector: &Sector, corner: Point) -> Option<ShadowSegment> {
    let direction = corner - sector.apex;
    let distance = direction.length();
    if !distance.is_finite() || distance <= 0.0 || distance >= sector.radius {
        return None;
    }

    let end = sector.apex + direction * (sector.radius / distance);
    if !end.is_finite() {
        return None;
    }

    Some(ShadowSegment { start: corner, end })
}
