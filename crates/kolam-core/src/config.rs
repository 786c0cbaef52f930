//! Whiteboard configuration.
//!
//! Tool options arrive from the toolbar as loosely-typed values. They are
//! normalized here: numbers are clamped to their slider bounds, unknown
//! symmetry modes fall back to `none` and unparseable colors fall back to
//! the default brush color.

use crate::color::{BACKGROUND, PaintColor};
use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::surface::{DEFAULT_GRID_SIZE, GridOptions};
use crate::symmetry::SymmetryMode;
use crate::tools::{DEFAULT_BRUSH_WIDTH, ToolState};
use serde::{Deserialize, Serialize};

/// Layout rules for sizing the surface from its container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Height as a fraction of the container width.
    pub aspect_ratio: f64,
    /// Lower bound on the canvas height in pixels.
    pub min_height: f64,
    /// Upper bound on the canvas height in pixels.
    pub max_height: f64,
    /// Upper bound on the canvas width; wider containers get a canvas this wide.
    pub max_width: f64,
    /// Background fill, also used by the eraser.
    pub background: PaintColor,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 0.75,
            min_height: 0.0,
            max_height: 600.0,
            max_width: 4096.0,
            background: BACKGROUND,
        }
    }
}

/// Raw tool options as sent by the toolbar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub color: String,
    pub brush_width: f64,
    pub is_eraser: bool,
    pub symmetry_mode: String,
    pub grid_size: f64,
    pub show_grid: bool,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            color: PaintColor::default().to_hex(),
            brush_width: DEFAULT_BRUSH_WIDTH as f64,
            is_eraser: false,
            symmetry_mode: SymmetryMode::None.id().to_string(),
            grid_size: DEFAULT_GRID_SIZE as f64,
            show_grid: true,
        }
    }
}

impl ToolConfig {
    /// Normalized drawing tool state.
    pub fn tool_state(&self) -> ToolState {
        ToolState::default()
            .with_color(normalize_color(&self.color))
            .with_brush_width(normalize_brush_width(self.brush_width))
            .with_eraser(self.is_eraser)
            .with_symmetry_mode(SymmetryMode::parse_lossy(&self.symmetry_mode))
    }

    /// Normalized grid options.
    pub fn grid(&self) -> GridOptions {
        GridOptions::new(self.show_grid, normalize_grid_size(self.grid_size))
    }
}

/// A partial toolbar change. Fields left out keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolUpdate {
    pub color: Option<String>,
    pub brush_width: Option<f64>,
    pub is_eraser: Option<bool>,
    pub symmetry_mode: Option<String>,
    pub grid_size: Option<f64>,
    pub show_grid: Option<bool>,
}

impl ToolUpdate {
    /// Apply the drawing tool fields onto `tools`.
    pub fn apply_tools(&self, mut tools: ToolState) -> ToolState {
        if let Some(color) = &self.color {
            tools = tools.with_color(normalize_color(color));
        }
        if let Some(width) = self.brush_width {
            tools = tools.with_brush_width(normalize_brush_width(width));
        }
        if let Some(is_eraser) = self.is_eraser {
            tools = tools.with_eraser(is_eraser);
        }
        if let Some(mode) = &self.symmetry_mode {
            tools = tools.with_symmetry_mode(SymmetryMode::parse_lossy(mode));
        }
        tools
    }

    /// Apply the grid fields onto `grid`.
    pub fn apply_grid(&self, grid: GridOptions) -> GridOptions {
        GridOptions::new(
            self.show_grid.unwrap_or(grid.show_grid),
            self.grid_size.map_or(grid.grid_size() as i64, normalize_grid_size),
        )
    }
}

fn normalize_color(input: &str) -> PaintColor {
    PaintColor::parse(input).unwrap_or_else(|| {
        log::warn!("Unrecognized color {:?}, using default", input);
        PaintColor::default()
    })
}

fn normalize_brush_width(width: f64) -> i64 {
    round_to_i64(width, DEFAULT_BRUSH_WIDTH as i64)
}

fn normalize_grid_size(size: f64) -> i64 {
    round_to_i64(size, DEFAULT_GRID_SIZE as i64)
}

fn round_to_i64(value: f64, fallback: i64) -> i64 {
    if value.is_finite() {
        value.round().clamp(i64::MIN as f64, i64::MAX as f64) as i64
    } else {
        fallback
    }
}

/// Top-level whiteboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhiteboardConfig {
    pub surface: SurfaceConfig,
    pub tools: ToolConfig,
    /// Maximum number of history snapshots kept.
    pub history_capacity: usize,
}

impl Default for WhiteboardConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceConfig::default(),
            tools: ToolConfig::default(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl WhiteboardConfig {
    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::KUMKUM_RED;

    #[test]
    fn test_defaults() {
        let tools = ToolConfig::default().tool_state();
        assert_eq!(tools.color(), KUMKUM_RED);
        assert_eq!(tools.brush_width(), 6);
        assert!(!tools.is_eraser());
        assert_eq!(tools.symmetry_mode(), SymmetryMode::None);

        let grid = ToolConfig::default().grid();
        assert!(grid.show_grid);
        assert_eq!(grid.grid_size(), 7);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let config = ToolConfig {
            brush_width: 100.0,
            grid_size: 2.0,
            ..ToolConfig::default()
        };
        assert_eq!(config.tool_state().brush_width(), 24);
        assert_eq!(config.grid().grid_size(), 5);

        let config = ToolConfig {
            brush_width: -3.0,
            grid_size: 40.0,
            ..ToolConfig::default()
        };
        assert_eq!(config.tool_state().brush_width(), 2);
        assert_eq!(config.grid().grid_size(), 15);

        let config = ToolConfig {
            brush_width: f64::NAN,
            ..ToolConfig::default()
        };
        assert_eq!(config.tool_state().brush_width(), 6);
    }

    #[test]
    fn test_unknown_values_fall_back() {
        let config = ToolConfig {
            color: "not-a-color".to_string(),
            symmetry_mode: "radial-16".to_string(),
            ..ToolConfig::default()
        };
        let tools = config.tool_state();
        assert_eq!(tools.color(), KUMKUM_RED);
        assert_eq!(tools.symmetry_mode(), SymmetryMode::None);
    }

    #[test]
    fn test_tool_config_json() {
        let json = r##"{"color": "#3498DB", "brush_width": 12, "is_eraser": true,
            "symmetry_mode": "radial-8"}"##;
        let config: ToolConfig = serde_json::from_str(json).unwrap();
        let tools = config.tool_state();
        assert_eq!(tools.color(), PaintColor::rgb(0x34, 0x98, 0xDB));
        assert_eq!(tools.brush_width(), 12);
        assert!(tools.is_eraser());
        assert_eq!(tools.symmetry_mode(), SymmetryMode::Radial8);
        assert!(config.show_grid);
    }

    #[test]
    fn test_whiteboard_config_json() {
        let json = r##"{
            "history_capacity": 5,
            "surface": {"max_height": 400.0, "background": "#FFFFFF"},
            "tools": {"color": "Telugu Blue", "grid_size": 9}
        }"##;
        let config = WhiteboardConfig::from_json(json).unwrap();
        assert_eq!(config.history_capacity, 5);
        assert_eq!(config.surface.max_height, 400.0);
        assert_eq!(config.surface.aspect_ratio, 0.75);
        assert_eq!(config.surface.background, PaintColor::rgb(255, 255, 255));
        assert_eq!(config.tools.grid().grid_size(), 9);
        assert!(config.tools.show_grid);

        let json = config.to_json().unwrap();
        assert_eq!(WhiteboardConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_partial_update_keeps_other_fields() {
        let tools = ToolState::default()
            .with_brush_width(12)
            .with_eraser(true)
            .with_symmetry_mode(SymmetryMode::Radial8);
        let grid = GridOptions::new(false, 9);

        let update: ToolUpdate = serde_json::from_str(r#"{"color": "Telugu Blue"}"#).unwrap();
        let updated = update.apply_tools(tools);
        assert_eq!(updated.color(), PaintColor::rgb(0x34, 0x98, 0xDB));
        assert_eq!(updated.brush_width(), 12);
        assert!(updated.is_eraser());
        assert_eq!(updated.symmetry_mode(), SymmetryMode::Radial8);
        assert_eq!(update.apply_grid(grid), grid);
    }

    #[test]
    fn test_partial_update_normalizes_given_fields() {
        let update = ToolUpdate {
            brush_width: Some(99.0),
            symmetry_mode: Some("spiral".to_string()),
            grid_size: Some(1.0),
            ..ToolUpdate::default()
        };
        let tools = update.apply_tools(ToolState::default().with_symmetry_mode(SymmetryMode::Both));
        assert_eq!(tools.brush_width(), 24);
        assert_eq!(tools.symmetry_mode(), SymmetryMode::None);

        let grid = update.apply_grid(GridOptions::new(false, 9));
        assert!(!grid.show_grid);
        assert_eq!(grid.grid_size(), 5);
    }
}
