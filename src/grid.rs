use rand::Rng;

/// Highest tile height; heights cycle through 0..=MAX_HEIGHT
pub const MAX_HEIGHT: u8 = 9;
/// Alignment range; alignments cycle through MIN_ALIGNMENT..=MAX_ALIGNMENT
pub const MIN_ALIGNMENT: i8 = -5;
pub const MAX_ALIGNMENT: i8 = 5;

/// A single grid tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tile {
    pub blocked: bool,
    pub height: u8,
    pub alignment: i8,
}

impl Tile {
    /// Create a tile, clamping height and alignment into their ranges
    pub fn new(blocked: bool, height: u8, alignment: i8) -> Self {
        Tile {
            blocked,
            height: height.min(MAX_HEIGHT),
            alignment: alignment.clamp(MIN_ALIGNMENT, MAX_ALIGNMENT),
        }
    }

    /// A blocking tile with default height and alignment
    pub fn wall() -> Self {
        Tile {
            blocked: true,
            ..Tile::default()
        }
    }

    pub fn toggle_blocked(&mut self) {
        self.blocked = !self.blocked;
    }

    /// Increment height, wrapping from MAX_HEIGHT back to 0
    pub fn cycle_height(&mut self) {
        self.height = if self.height >= MAX_HEIGHT { 0 } else { self.height + 1 };
    }

    /// Increment alignment, wrapping from MAX_ALIGNMENT back to MIN_ALIGNMENT
    pub fn cycle_alignment(&mut self) {
        self.alignment = if self.alignment >= MAX_ALIGNMENT {
            MIN_ALIGNMENT
        } else {
            self.alignment + 1
        };
    }
}

/// Fixed-size tile grid, stored row-major
#[derive(Debug, Clone)]
pub struct TileGrid {
    pub width: i32,
    pub height: i32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Create a grid with every tile free
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        TileGrid {
            width,
            height,
            tiles: vec![Tile::default(); (width * height) as usize],
        }
    }

    /// Create a free grid with the listed (x, y) tiles blocked
    pub fn with_blocked(width: i32, height: i32, blocked: &[(i32, i32)]) -> Self {
        let mut grid = Self::new(width, height);
        for &(x, y) in blocked {
            if let Some(tile) = grid.get_mut(x, y) {
                tile.blocked = true;
            }
        }
        grid
    }

    /// Create a grid with randomly blocked tiles and random heights/alignments
    pub fn random<R: Rng + ?Sized>(width: i32, height: i32, blocked_percent: u32, rng: &mut R) -> Self {
        let mut grid = Self::new(width, height);
        for tile in grid.tiles.iter_mut() {
            *tile = Tile::new(
                rng.gen_range(0..100) < blocked_percent,
                rng.gen_range(0..=MAX_HEIGHT),
                rng.gen_range(MIN_ALIGNMENT..=MAX_ALIGNMENT),
            );
        }
        grid
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some((x + y * self.width) as usize)
        } else {
            None
        }
    }

    /// Tile at (x, y), or None when out of range
    pub fn get(&self, x: i32, y: i32) -> Option<&Tile> {
        self.index(x, y).map(|id| &self.tiles[id])
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        self.index(x, y).map(move |id| &mut self.tiles[id])
    }

    /// Overwrite the tile at (x, y); out-of-range coordinates are ignored
    pub fn set(&mut self, x: i32, y: i32, tile: Tile) {
        if let Some(slot) = self.get_mut(x, y) {
            *slot = tile;
        }
    }

    /// Whether (x, y) holds a blocking tile. Out of range is not blocking.
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|tile| tile.blocked)
    }

    /// Iterate all tiles as (x, y, tile) in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, &Tile)> + '_ {
        let width = self.width;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(id, tile)| (id as i32 % width, id as i32 / width, tile))
    }

    pub fn blocked_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.blocked).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_out_of_range_access() {
        let mut grid = TileGrid::new(4, 3);
        assert!(grid.get(-1, 0).is_none());
        assert!(grid.get(4, 0).is_none());
        assert!(grid.get(0, 3).is_none());
        assert!(!grid.is_blocked(10, 10));

        // Out-of-range set is a no-op
        grid.set(7, 7, Tile::wall());
        assert_eq!(grid.blocked_count(), 0);
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = TileGrid::new(4, 3);
        grid.set(3, 2, Tile::new(true, 4, -2));
        let tile = grid.get(3, 2).unwrap();
        assert!(tile.blocked);
        assert_eq!(tile.height, 4);
        assert_eq!(tile.alignment, -2);
        assert!(grid.is_blocked(3, 2));
        assert!(!grid.is_blocked(2, 2));
    }

    #[test]
    fn test_with_blocked_ignores_out_of_range() {
        let grid = TileGrid::with_blocked(5, 5, &[(1, 1), (4, 4), (5, 0), (-1, 2)]);
        assert_eq!(grid.blocked_count(), 2);
        assert!(grid.is_blocked(1, 1));
        assert!(grid.is_blocked(4, 4));
    }

    #[test]
    fn test_iter_is_row_major() {
        let grid = TileGrid::with_blocked(3, 2, &[(2, 0)]);
        let coords: Vec<(i32, i32)> = grid.iter().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
        assert!(grid.iter().nth(2).unwrap().2.blocked);
    }

    #[test]
    fn test_tile_edits_wrap() {
        let mut tile = Tile::new(false, MAX_HEIGHT, MAX_ALIGNMENT);
        tile.cycle_height();
        assert_eq!(tile.height, 0);
        tile.cycle_height();
        assert_eq!(tile.height, 1);

        tile.cycle_alignment();
        assert_eq!(tile.alignment, MIN_ALIGNMENT);
        tile.cycle_alignment();
        assert_eq!(tile.alignment, MIN_ALIGNMENT + 1);

        tile.toggle_blocked();
        assert!(tile.blocked);
        tile.toggle_blocked();
        assert!(!tile.blocked);
    }

    #[test]
    fn test_tile_new_clamps() {
        let tile = Tile::new(false, 42, -20);
        assert_eq!(tile.height, MAX_HEIGHT);
        assert_eq!(tile.alignment, MIN_ALIGNMENT);
    }

    #[test]
    fn test_random_grid_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = TileGrid::random(20, 15, 20, &mut rng);
        assert_eq!(grid.width, 20);
        assert_eq!(grid.height, 15);
        assert_eq!(grid.iter().count(), 300);
        for (_, _, tile) in grid.iter() {
            assert!(tile.height <= MAX_HEIGHT);
            assert!((MIN_ALIGNMENT..=MAX_ALIGNMENT).contains(&tile.alignment));
        }

        let none_blocked = TileGrid::random(10, 10, 0, &mut rng);
        assert_eq!(none_blocked.blocked_count(), 0);
        let all_blocked = TileGrid::random(10, 10, 100, &mut rng);
        assert_eq!(all_blocked.blocked_count(), 100);
    }
}
