use crate::cone::{VisionCone, DEFAULT_PICK_RADIUS};
use crate::geometry::Point;
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub cone: ConeConfig,
    #[serde(default)]
    pub interaction: InteractionConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    #[serde(default = "default_blocked_percent")]
    pub blocked_percent: u32,
    /// Fixed seed for grid generation; random when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Initial cone placement, in tile units (1.0 = one cell)
#[derive(Debug, Deserialize)]
pub struct ConeConfig {
    #[serde(default = "default_apex")]
    pub apex: [f32; 2],
    #[serde(default = "default_left_border")]
    pub left_border: [f32; 2],
    #[serde(default = "default_right_border")]
    pub right_border: [f32; 2],
    #[serde(default = "default_active")]
    pub active: bool,
}

#[derive(Debug, Deserialize)]
pub struct InteractionConfig {
    #[serde(default = "default_pick_radius")]
    pub pick_radius: f32,
    /// Camera pan speed in pixels per second
    #[serde(default = "default_pan_speed")]
    pub pan_speed: f32,
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
    #[serde(default = "default_show_shadows")]
    pub show_shadows: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when RUST_LOG is not set
    #[serde(default = "default_level")]
    pub level: String,
}

// Default values
fn default_width() -> i32 { 30 }
fn default_height() -> i32 { 24 }
fn default_cell_size() -> f32 { 32.0 }
fn default_blocked_percent() -> u32 { 20 }
fn default_apex() -> [f32; 2] { [10.5, 12.5] }
fn default_left_border() -> [f32; 2] { [20.5, 6.5] }
fn default_right_border() -> [f32; 2] { [20.5, 18.5] }
fn default_active() -> bool { true }
fn default_pick_radius() -> f32 { DEFAULT_PICK_RADIUS }
fn default_pan_speed() -> f32 { 300.0 }
fn default_window_title() -> String { "Vision Cone".to_string() }
fn default_bg_r() -> u8 { 30 }
fn default_bg_g() -> u8 { 30 }
fn default_bg_b() -> u8 { 30 }
fn default_show_shadows() -> bool { true }
fn default_level() -> String { "info".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            cell_size: default_cell_size(),
            blocked_percent: default_blocked_percent(),
            seed: None,
        }
    }
}

impl Default for ConeConfig {
    fn default() -> Self {
        Self {
            apex: default_apex(),
            left_border: default_left_border(),
            right_border: default_right_border(),
            active: default_active(),
        }
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            pick_radius: default_pick_radius(),
            pan_speed: default_pan_speed(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
            show_shadows: default_show_shadows(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            cone: ConeConfig::default(),
            interaction: InteractionConfig::default(),
            visual: VisualConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ConeConfig {
    /// Build the cone in grid space for the given cell size
    pub fn to_cone(&self, cell_size: f32) -> VisionCone {
        let scale = |[x, y]: [f32; 2]| Point::new(x * cell_size, y * cell_size);
        let mut cone = VisionCone::from_grid_points(
            scale(self.apex),
            scale(self.left_border),
            scale(self.right_border),
        );
        cone.active = self.active;
        cone
    }
}

impl Config {
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Load configuration from file, or use defaults if file doesn't exist
    pub fn load() -> Self {
        Self::resolve(Self::from_path(CONFIG_FILE))
    }

    /// Fall back to defaults when loading failed, logging why
    pub fn resolve(loaded: Result<Self, ConfigError>) -> Self {
        match loaded {
            Ok(config) => {
                info!("Loaded configuration from {}", CONFIG_FILE);
                config
            }
            Err(ConfigError::Io(_)) => {
                info!("No {} found, using default configuration", CONFIG_FILE);
                Config::default()
            }
            Err(e) => {
                warn!("{}", e);
                warn!("Using default configuration");
                Config::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.grid.width, 30);
        assert_eq!(config.grid.blocked_percent, 20);
        assert_eq!(config.interaction.pick_radius, DEFAULT_PICK_RADIUS);
        assert_eq!(config.logging.level, "info");
        assert!(config.grid.seed.is_none());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = Config::parse(
            r#"
            [grid]
            width = 12
            seed = 7

            [cone]
            apex = [2.0, 3.0]
            active = false
            "#,
        )
        .unwrap();

        assert_eq!(config.grid.width, 12);
        assert_eq!(config.grid.height, 24);
        assert_eq!(config.grid.seed, Some(7));
        assert_eq!(config.cone.apex, [2.0, 3.0]);
        assert_eq!(config.cone.left_border, default_left_border());
        assert!(!config.cone.active);
        assert!(config.visual.show_shadows);
    }

    #[test]
    fn test_cone_is_scaled_by_cell_size() {
        let cone = ConeConfig::default().to_cone(10.0);
        assert_eq!(cone.apex, Point::new(105.0, 125.0));
        assert_eq!(cone.right_border, Point::new(205.0, 185.0));
        assert!(cone.active);
    }

    #[test]
    fn test_parse_error() {
        let err = Config::parse("[grid]\nwidth = \"wide\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Config::from_path("definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_resolve_falls_back_on_errors() {
        let broken = Config::parse("[interaction]\npick_radius = [1]");
        assert_eq!(Config::resolve(broken).interaction.pick_radius, DEFAULT_PICK_RADIUS);

        let missing = Config::from_path("definitely/not/here.toml");
        assert_eq!(Config::resolve(missing).grid.cell_size, 32.0);
    }
}
