//! Drawing scripts: recorded toolbar and pointer actions replayed against a whiteboard.

use crate::error::{AppError, AppResult};
use kolam_core::{PointerEvent, ToolUpdate, Whiteboard, WhiteboardConfig};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container width used when a script doesn't give one.
pub const DEFAULT_CONTAINER_WIDTH: f64 = 600.0;

/// One step of a script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Action {
    /// Change some toolbar options; fields left out keep their value.
    Tools(ToolUpdate),
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up,
    Leave,
    /// Press at the first point, drag through the rest, release.
    Stroke { points: Vec<[f64; 2]> },
    Undo,
    Redo,
    Clear,
    Resize { width: f64 },
    CanvasOrigin { x: f64, y: f64 },
}

/// A whiteboard configuration plus the actions to replay on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    pub config: WhiteboardConfig,
    pub container_width: f64,
    pub actions: Vec<Action>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            config: WhiteboardConfig::default(),
            container_width: DEFAULT_CONTAINER_WIDTH,
            actions: Vec::new(),
        }
    }
}

impl Script {
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a script from a JSON file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| AppError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Build a whiteboard sized for the container and run every action on it.
    pub fn replay(&self) -> AppResult<Whiteboard> {
        let mut whiteboard = Whiteboard::new(self.config.clone());
        if !whiteboard.resize(self.container_width)? {
            return Err(AppError::NoSurface(self.container_width));
        }

        for (step, action) in self.actions.iter().enumerate() {
            log::debug!("Step {}: {:?}", step, action);
            apply(&mut whiteboard, action)?;
        }
        Ok(whiteboard)
    }
}

/// Apply a single action.
pub fn apply(whiteboard: &mut Whiteboard, action: &Action) -> AppResult<()> {
    match action {
        Action::Tools(update) => whiteboard.apply_tool_update(update)?,
        Action::Down { x, y } => whiteboard.handle_pointer_event(PointerEvent::Down {
            position: Point::new(*x, *y),
        })?,
        Action::Move { x, y } => whiteboard.handle_pointer_event(PointerEvent::Move {
            position: Point::new(*x, *y),
        })?,
        Action::Up => whiteboard.handle_pointer_event(PointerEvent::Up)?,
        Action::Leave => whiteboard.handle_pointer_event(PointerEvent::Leave)?,
        Action::Stroke { points } => {
            let Some(([x, y], rest)) = points.split_first() else {
                return Ok(());
            };
            whiteboard.pointer_down(Point::new(*x, *y))?;
            for [x, y] in rest {
                whiteboard.pointer_move(Point::new(*x, *y))?;
            }
            whiteboard.pointer_up()?;
        }
        Action::Undo => {
            if !whiteboard.undo()? {
                log::info!("Nothing to undo");
            }
        }
        Action::Redo => {
            if !whiteboard.redo()? {
                log::info!("Nothing to redo");
            }
        }
        Action::Clear => whiteboard.clear()?,
        Action::Resize { width } => {
            whiteboard.resize(*width)?;
        }
        Action::CanvasOrigin { x, y } => whiteboard.set_canvas_origin(Point::new(*x, *y)),
    }
    Ok(())
}
