use crate::geometry::{Corner, Point, Square};

/// Where a tile lies as seen from the apex. y grows downward, so N is "up" on screen.
///
/// The four axis-aligned variants cover tiles whose row or column span
/// contains the apex coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

/// Silhouette corners per direction, indexed by `Direction as usize`.
///
/// Diagonal tiles are outlined by the two corners off the apex-facing
/// diagonal; axis-aligned tiles by the two corners of their near face.
const SILHOUETTE: [[Corner; 2]; 8] = [
    /* N  */ [Corner::SW, Corner::SE],
    /* NE */ [Corner::NW, Corner::SE],
    /* E  */ [Corner::NW, Corner::SW],
    /* SE */ [Corner::NE, Corner::SW],
    /* S  */ [Corner::NW, Corner::NE],
    /* SW */ [Corner::NW, Corner::SE],
    /* W  */ [Corner::NE, Corner::SE],
    /* NW */ [Corner::NE, Corner::SW],
];

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// Classify a tile square relative to the apex.
    /// Returns None when the (closed) square contains the apex.
    pub fn classify(apex: Point, square: &Square) -> Option<Direction> {
        let horizontal = if apex.x < square.min.x {
            1
        } else if apex.x > square.max.x {
            -1
        } else {
            0
        };
        let vertical = if apex.y < square.min.y {
            1
        } else if apex.y > square.max.y {
            -1
        } else {
            0
        };

        match (horizontal, vertical) {
            (0, -1) => Some(Direction::N),
            (1, -1) => Some(Direction::NE),
            (1, 0) => Some(Direction::E),
            (1, 1) => Some(Direction::SE),
            (0, 1) => Some(Direction::S),
            (-1, 1) => Some(Direction::SW),
            (-1, 0) => Some(Direction::W),
            (-1, -1) => Some(Direction::NW),
            _ => None,
        }
    }

    /// The two corners bounding the tile's shadow
    pub fn silhouette(self) -> [Corner; 2] {
        SILHOUETTE[self as usize]
    }
}

/// Silhouette corner points of a tile as seen from the apex, if the tile does not contain it
pub fn silhouette_points(apex: Point, square: &Square) -> Option<[Point; 2]> {
    Direction::classify(apex, square).map(|dir| dir.silhouette().map(|corner| square.corner(corner)))
}
