use ::rand::rngs::StdRng;
use ::rand::SeedableRng;
use arboard::Clipboard;
use env_logger::Env;
use log::{debug, info, warn};
use macroquad::prelude::*;
use visioncone::config::{Config, LoggingConfig, VisualConfig, CONFIG_FILE};
use visioncone::geometry::Square;
use visioncone::report::ascii_grid;
use visioncone::{
    ControlPoint, DragContext, DragState, OcclusionEngine, Point, PointerEvent, TileGrid, Visibility,
    VisionCone,
};

/// Top-left offset of the grid on screen when the app starts
const START_CAMERA: Point = Point::new(20.0, 110.0);
const CONTROL_POINT_RADIUS: f32 = 6.0;

/// Visualization state
struct VisState {
    config: Config,
    grid: TileGrid,
    cone: VisionCone,
    engine: OcclusionEngine,
    visibility: Visibility,
    drag: DragState,
    camera: Point,
    rng: StdRng,
    last_mouse: Point,
    /// Origin of the hover line-of-sight check
    start_cell: (i32, i32),
}

impl VisState {
    fn new(config: Config) -> Self {
        let mut rng = match config.grid.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let grid = TileGrid::random(
            config.grid.width,
            config.grid.height,
            config.grid.blocked_percent,
            &mut rng,
        );
        let cone = config.cone.to_cone(config.grid.cell_size);
        let engine = OcclusionEngine::new(config.grid.cell_size);
        let visibility = engine.compute(&grid, &cone);

        info!(
            "Grid {}x{} with {} blocked tiles",
            grid.width,
            grid.height,
            grid.blocked_count()
        );

        VisState {
            config,
            grid,
            cone,
            engine,
            visibility,
            drag: DragState::Idle,
            camera: START_CAMERA,
            rng,
            last_mouse: Point::ZERO,
            start_cell: (0, 0),
        }
    }

    fn drag_context(&self) -> DragContext {
        DragContext {
            camera: self.camera,
            cell_size: self.config.grid.cell_size,
            pick_radius: self.config.interaction.pick_radius,
        }
    }

    /// Tile under a world-space position
    fn tile_at(&self, world: Point) -> Option<(i32, i32)> {
        let cs = self.config.grid.cell_size;
        let x = ((world.x - self.camera.x) / cs).floor() as i32;
        let y = ((world.y - self.camera.y) / cs).floor() as i32;
        self.grid.in_bounds(x, y).then_some((x, y))
    }

    fn update_visible(&mut self) {
        self.visibility = self.engine.compute(&self.grid, &self.cone);
    }

    fn handle_pan(&mut self) {
        let step = self.config.interaction.pan_speed * get_frame_time();
        if is_key_down(KeyCode::Left) {
            self.camera.x += step;
        }
        if is_key_down(KeyCode::Right) {
            self.camera.x -= step;
        }
        if is_key_down(KeyCode::Up) {
            self.camera.y += step;
        }
        if is_key_down(KeyCode::Down) {
            self.camera.y -= step;
        }
    }

    fn handle_mouse(&mut self) {
        let (mouse_x, mouse_y) = mouse_position();
        let world = Point::new(mouse_x, mouse_y);
        let ctx = self.drag_context();
        let mut changed = false;

        // Left click: grab a control point, otherwise toggle the tile
        if is_mouse_button_pressed(MouseButton::Left) {
            self.drag = self.drag.on_event(PointerEvent::Press(world), &mut self.cone, &ctx);
            if let Some(which) = self.drag.held() {
                debug!("Picked up {:?}", which);
            } else if let Some((x, y)) = self.tile_at(world) {
                if let Some(tile) = self.grid.get_mut(x, y) {
                    tile.toggle_blocked();
                    changed = true;
                }
            }
        }

        if self.drag.is_dragging() && world != self.last_mouse {
            self.drag = self.drag.on_event(PointerEvent::Move(world), &mut self.cone, &ctx);
            changed = true;
        }

        if is_mouse_button_released(MouseButton::Left) {
            self.drag = self.drag.on_event(PointerEvent::Release, &mut self.cone, &ctx);
        }

        // Right click: cycle height
        if is_mouse_button_pressed(MouseButton::Right) {
            if let Some(tile) = self.tile_at(world).and_then(|(x, y)| self.grid.get_mut(x, y)) {
                tile.cycle_height();
                changed = true;
            }
        }

        // Middle click: cycle alignment
        if is_mouse_button_pressed(MouseButton::Middle) {
            if let Some(tile) = self.tile_at(world).and_then(|(x, y)| self.grid.get_mut(x, y)) {
                tile.cycle_alignment();
                changed = true;
            }
        }

        self.last_mouse = world;
        if changed {
            self.update_visible();
        }
    }

    fn pin_start_cell(&mut self) {
        let (mouse_x, mouse_y) = mouse_position();
        if let Some(cell) = self.tile_at(Point::new(mouse_x, mouse_y)) {
            self.start_cell = cell;
            info!("Line-of-sight start set to {:?}", cell);
        }
    }

    fn regenerate(&mut self) {
        self.grid = TileGrid::random(
            self.config.grid.width,
            self.config.grid.height,
            self.config.grid.blocked_percent,
            &mut self.rng,
        );
        info!("Regenerated grid: {} blocked tiles", self.grid.blocked_count());
        self.update_visible();
    }

    fn toggle_cone(&mut self) {
        if self.cone.active {
            self.cone.deactivate();
            self.drag = self.drag.release();
        } else {
            self.cone.activate();
        }
        info!("Vision cone {}", if self.cone.active { "on" } else { "off" });
        self.update_visible();
    }

    fn copy_to_clipboard(&self) {
        let grid_string = ascii_grid(&self.grid, &self.cone, &self.visibility, self.config.grid.cell_size);
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(&grid_string) {
                    warn!("Failed to copy to clipboard: {}", e);
                } else {
                    info!("Grid layout copied to clipboard");
                    // Keep clipboard alive for a moment so clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => {
                warn!("Failed to access clipboard: {}", e);
            }
        }
    }

    fn tile_color(&self, x: i32, y: i32) -> Color {
        let Some(tile) = self.grid.get(x, y) else {
            return BLACK;
        };
        if tile.blocked {
            return Color::from_rgba(150, 40, 40, 255);
        }

        let shade = 50 + tile.height * 10;
        if self.visibility.is_visible(x, y) {
            Color::from_rgba(shade / 2, shade + 60, shade / 2, 255)
        } else {
            Color::from_rgba(shade, shade, shade, 255)
        }
    }

    fn draw(&self) {
        let visual = &self.config.visual;
        clear_background(Color::from_rgba(
            visual.background_r,
            visual.background_g,
            visual.background_b,
            255,
        ));

        let cs = self.config.grid.cell_size;

        // Draw grid tiles
        for (x, y, tile) in self.grid.iter() {
            let square = Square::tile(x, y, cs);
            let px = square.min.x + self.camera.x;
            let py = square.min.y + self.camera.y;
            draw_rectangle(px, py, cs - 1.0, cs - 1.0, self.tile_color(x, y));

            let font = cs * 0.4;
            draw_text(&tile.height.to_string(), px + 2.0, py + font * 0.8, font, LIGHTGRAY);
            if tile.alignment != 0 {
                let label = format!("{:+}", tile.alignment);
                draw_text(&label, px + cs * 0.45, py + cs - 4.0, font, LIGHTGRAY);
            }
        }

        let (mouse_x, mouse_y) = mouse_position();
        let hovered_cell = self.tile_at(Point::new(mouse_x, mouse_y));

        // Line-of-sight check from the pinned start cell to the hovered cell
        let start = Square::tile(self.start_cell.0, self.start_cell.1, cs);
        draw_rectangle_lines(
            start.min.x + self.camera.x,
            start.min.y + self.camera.y,
            cs - 1.0,
            cs - 1.0,
            2.0,
            SKYBLUE,
        );
        if let Some((hx, hy)) = hovered_cell {
            let from = start.center() + self.camera;
            let to = Square::tile(hx, hy, cs).center() + self.camera;
            let color = if self.engine.clear_line(&self.grid, self.start_cell, (hx, hy)) {
                GREEN
            } else {
                RED
            };
            draw_line(from.x, from.y, to.x, to.y, 2.0, color);
        }

        if visual.show_shadows {
            for shadow in self.visibility.shadows() {
                let start = shadow.start + self.camera;
                let end = shadow.end + self.camera;
                draw_line(start.x, start.y, end.x, end.y, 1.5, Color::from_rgba(230, 160, 40, 200));
            }
        }

        if self.cone.active {
            let apex = self.cone.point(ControlPoint::Apex, self.camera);
            for border in [ControlPoint::LeftBorder, ControlPoint::RightBorder] {
                let p = self.cone.point(border, self.camera);
                draw_line(apex.x, apex.y, p.x, p.y, 2.0, YELLOW);
            }
            for which in ControlPoint::ALL {
                let p = self.cone.point(which, self.camera);
                let color = if self.drag.held() == Some(which) { ORANGE } else { SKYBLUE };
                draw_circle(p.x, p.y, CONTROL_POINT_RADIUS, color);
            }
        }

        // Draw info
        let hovered = hovered_cell.and_then(|(x, y)| self.grid.get(x, y).map(|tile| (x, y, *tile)));
        let hover_line = match hovered {
            Some((x, y, tile)) => format!(
                "Tile ({}, {}): height {}, alignment {}{}",
                x,
                y,
                tile.height,
                tile.alignment,
                if tile.blocked { ", blocked" } else { "" }
            ),
            None => String::new(),
        };
        let lines = [
            format!(
                "Visible tiles: {}   Shadow segments: {}   Cone: {}",
                self.visibility.visible_count(),
                self.visibility.shadows().len(),
                if self.cone.active { "on" } else { "off" }
            ),
            "Left: drag cone point / toggle wall   Right: height   Middle: alignment".to_string(),
            "Arrows: pan   S: set sight-line start   R: regenerate   Space: toggle cone   C: copy grid   Esc: quit"
                .to_string(),
            hover_line,
        ];
        for (i, line) in lines.iter().enumerate() {
            draw_text(line, 10.0, 20.0 + i as f32 * 20.0, 20.0, WHITE);
        }
    }
}

fn window_conf() -> Conf {
    let window_title = Config::from_path(CONFIG_FILE)
        .map(|config| config.visual.window_title)
        .unwrap_or_else(|_| VisualConfig::default().window_title);
    Conf {
        window_title,
        window_width: 1100,
        window_height: 900,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let loaded = Config::from_path(CONFIG_FILE);
    let level = match &loaded {
        Ok(config) => config.logging.level.clone(),
        Err(_) => LoggingConfig::default().level,
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let config = Config::resolve(loaded);
    let mut state = VisState::new(config);

    loop {
        // Handle input
        state.handle_pan();
        state.handle_mouse();

        if is_key_pressed(KeyCode::S) {
            state.pin_start_cell();
        }

        if is_key_pressed(KeyCode::R) {
            state.regenerate();
        }

        if is_key_pressed(KeyCode::Space) {
            state.toggle_cone();
        }

        // Copy grid to clipboard on C key
        if is_key_pressed(KeyCode::C) {
            state.copy_to_clipboard();
        }

        // Close window on Escape
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        // Draw
        state.draw();

        next_frame().await
    }
}
