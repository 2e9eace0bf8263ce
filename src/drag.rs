use crate::cone::{ControlPoint, VisionCone};
use crate::geometry::Point;

/// Pointer events fed to the drag state machine (positions in world space)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press(Point),
    Move(Point),
    Release,
}

/// Parameters shared by every drag transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragContext {
    pub camera: Point,
    pub cell_size: f32,
    pub pick_radius: f32,
}

/// Interaction state for moving cone control points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(ControlPoint),
}

impl DragState {
    /// Pointer pressed: pick up the nearest control point within the pick radius
    pub fn press(self, cone: &VisionCone, world: Point, ctx: &DragContext) -> Self {
        match self {
            DragState::Idle if cone.active => cone
                .closest_point(world, ctx.camera, ctx.pick_radius)
                .map_or(DragState::Idle, DragState::Dragging),
            other => other,
        }
    }

    /// Pointer moved: while dragging, snap the pointer and move the held point
    pub fn drag(self, cone: &mut VisionCone, world: Point, ctx: &DragContext) -> Self {
        if let DragState::Dragging(which) = self {
            let snapped = VisionCone::snap_to_grid(world, ctx.camera, ctx.cell_size);
            cone.set_point(which, snapped, ctx.camera);
        }
        self
    }

    /// Pointer released
    pub fn release(self) -> Self {
        DragState::Idle
    }

    /// Apply one pointer event
    pub fn on_event(self, event: PointerEvent, cone: &mut VisionCone, ctx: &DragContext) -> Self {
        match event {
            PointerEvent::Press(world) => self.press(cone, world, ctx),
            PointerEvent::Move(world) => self.drag(cone, world, ctx),
            PointerEvent::Release => self.release(),
        }
    }

    pub fn held(self) -> Option<ControlPoint> {
        match self {
            DragState::Idle => None,
            DragState::Dragging(which) => Some(which),
        }
    }

    pub fn is_dragging(self) -> bool {
        self.held().is_some()
    }
}
