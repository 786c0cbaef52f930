//! Pointer events for mouse, pen and touch input.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event type for unified mouse/touch handling.
///
/// Positions are in client coordinates; the whiteboard resolves them to
/// canvas pixels using its canvas origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up,
    /// Pointer left the canvas; ends the stroke like `Up`.
    Leave,
}

impl PointerEvent {
    /// Client position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position } | PointerEvent::Move { position } => Some(*position),
            PointerEvent::Up | PointerEvent::Leave => None,
        }
    }
}
