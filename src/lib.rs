pub mod config;
pub mod cone;
pub mod corners;
pub mod drag;
pub mod geometry;
pub mod grid;
pub mod occlusion;
pub mod ray;
pub mod report;
pub mod sector;

pub use cone::{ControlPoint, VisionCone};
pub use drag::{DragContext, DragState, PointerEvent};
pub use geometry::Point;
pub use grid::{Tile, TileGrid};
pub use occlusion::{OcclusionEngine, ShadowSegment, Visibility};
pub use sector::Sector;
