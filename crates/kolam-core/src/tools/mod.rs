//! Drawing tool state and the stroke state machine.

use crate::color::PaintColor;
use crate::symmetry::SymmetryMode;
use kurbo::{Line, Point};
use serde::{Deserialize, Serialize};

/// Thinnest brush in pixels.
pub const MIN_BRUSH_WIDTH: u32 = 2;
/// Thickest brush in pixels.
pub const MAX_BRUSH_WIDTH: u32 = 24;
/// Brush width used when nothing else is configured.
pub const DEFAULT_BRUSH_WIDTH: u32 = 6;

/// Current drawing tool settings.
///
/// This is an immutable value: the `with_*` builders return an updated copy,
/// clamping anything out of range, and the whiteboard swaps it in through a
/// single setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolState {
    color: PaintColor,
    brush_width: u32,
    is_eraser: bool,
    symmetry_mode: SymmetryMode,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            color: PaintColor::default(),
            brush_width: DEFAULT_BRUSH_WIDTH,
            is_eraser: false,
            symmetry_mode: SymmetryMode::default(),
        }
    }
}

impl ToolState {
    pub fn with_color(mut self, color: PaintColor) -> Self {
        self.color = color;
        self
    }

    /// Set the brush width, clamped into `2..=24`.
    pub fn with_brush_width(mut self, width: i64) -> Self {
        self.brush_width = width.clamp(MIN_BRUSH_WIDTH as i64, MAX_BRUSH_WIDTH as i64) as u32;
        self
    }

    pub fn with_eraser(mut self, is_eraser: bool) -> Self {
        self.is_eraser = is_eraser;
        self
    }

    pub fn with_symmetry_mode(mut self, mode: SymmetryMode) -> Self {
        self.symmetry_mode = mode;
        self
    }

    pub fn color(&self) -> PaintColor {
        self.color
    }

    pub fn brush_width(&self) -> u32 {
        self.brush_width
    }

    pub fn is_eraser(&self) -> bool {
        self.is_eraser
    }

    pub fn symmetry_mode(&self) -> SymmetryMode {
        self.symmetry_mode
    }

    /// The color actually painted: the background when erasing.
    pub fn paint_color(&self, background: PaintColor) -> PaintColor {
        if self.is_eraser { background } else { self.color }
    }
}

/// State of a stroke interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StrokeState {
    /// Waiting for a pointer press.
    #[default]
    Idle,
    /// Pointer is down; `last` is the previous sample in canvas pixels.
    Drawing { last: Point },
}

impl StrokeState {
    /// Begin a stroke. Returns the zero-length segment that marks the tap.
    pub fn begin(&mut self, point: Point) -> Line {
        *self = StrokeState::Drawing { last: point };
        Line::new(point, point)
    }

    /// Advance the stroke to `point`, returning the raw segment since the
    /// previous sample. Returns `None` while idle.
    pub fn advance(&mut self, point: Point) -> Option<Line> {
        match self {
            StrokeState::Drawing { last } => {
                let segment = Line::new(*last, point);
                *last = point;
                Some(segment)
            }
            StrokeState::Idle => None,
        }
    }

    /// Finish the stroke. Returns true if a stroke was in progress.
    pub fn end(&mut self) -> bool {
        let was_drawing = self.is_drawing();
        *self = StrokeState::Idle;
        was_drawing
    }

    /// Drop the stroke without finishing it.
    pub fn cancel(&mut self) {
        *self = StrokeState::Idle;
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, StrokeState::Drawing { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BACKGROUND, KUMKUM_RED};

    #[test]
    fn test_tool_defaults() {
        let tools = ToolState::default();
        assert_eq!(tools.color(), KUMKUM_RED);
        assert_eq!(tools.brush_width(), DEFAULT_BRUSH_WIDTH);
        assert_eq!(tools.symmetry_mode(), SymmetryMode::None);
    }

    #[test]
    fn test_brush_width_clamped() {
        assert_eq!(ToolState::default().with_brush_width(0).brush_width(), 2);
        assert_eq!(ToolState::default().with_brush_width(30).brush_width(), 24);
        assert_eq!(ToolState::default().with_brush_width(13).brush_width(), 13);
    }

    #[test]
    fn test_eraser_overrides_color() {
        let tools = ToolState::default().with_eraser(true);
        assert_eq!(tools.paint_color(BACKGROUND), BACKGROUND);
        assert_eq!(tools.with_eraser(false).paint_color(BACKGROUND), KUMKUM_RED);
    }

    #[test]
    fn test_builders_leave_original_untouched() {
        let base = ToolState::default();
        let changed = base.with_symmetry_mode(SymmetryMode::Both);
        assert_eq!(base.symmetry_mode(), SymmetryMode::None);
        assert_eq!(changed.symmetry_mode(), SymmetryMode::Both);
    }

    #[test]
    fn test_stroke_interaction() {
        let mut stroke = StrokeState::default();
        assert!(!stroke.is_drawing());
        assert_eq!(stroke.advance(Point::new(5.0, 5.0)), None);

        let tap = stroke.begin(Point::new(1.0, 2.0));
        assert_eq!(tap.p0, tap.p1);
        assert!(stroke.is_drawing());

        let seg = stroke.advance(Point::new(4.0, 6.0)).unwrap();
        assert_eq!(seg, Line::new(Point::new(1.0, 2.0), Point::new(4.0, 6.0)));
        let seg = stroke.advance(Point::new(10.0, 6.0)).unwrap();
        assert_eq!(seg.p0, Point::new(4.0, 6.0));

        assert!(stroke.end());
        assert!(!stroke.end());
    }

    #[test]
    fn test_cancel_interaction() {
        let mut stroke = StrokeState::default();
        stroke.begin(Point::ZERO);
        stroke.cancel();
        assert!(!stroke.is_drawing());
        assert!(!stroke.end());
    }
}
