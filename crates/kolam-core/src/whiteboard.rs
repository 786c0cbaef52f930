//! Whiteboard session: ties the surface, tools, symmetry and history together.

use crate::color::PaintColor;
use crate::config::{ToolUpdate, WhiteboardConfig};
use crate::error::{KolamError, KolamResult};
use crate::export::{ReferenceImage, encode_png, to_data_url};
use crate::history::History;
use crate::input::PointerEvent;
use crate::raster;
use crate::record::{KolamMetadata, KolamRecord};
use crate::surface::{self, GridOptions, Surface};
use crate::symmetry::SymmetryMode;
use crate::tools::{StrokeState, ToolState};
use kurbo::{Line, Point};

/// A drawing session.
///
/// All input goes through `&mut self`, so history repaints, strokes and
/// resizes are applied one at a time in call order.
#[derive(Debug)]
pub struct Whiteboard {
    config: WhiteboardConfig,
    tools: ToolState,
    grid: GridOptions,
    /// `None` until the container reports a usable size.
    surface: Option<Surface>,
    history: History,
    stroke: StrokeState,
    /// Top-left corner of the canvas in client coordinates.
    canvas_origin: Point,
    container_width: Option<f64>,
    reference: Option<ReferenceImage>,
}

impl Default for Whiteboard {
    fn default() -> Self {
        Self::new(WhiteboardConfig::default())
    }
}

impl Whiteboard {
    /// Create a session. No surface exists until [`Whiteboard::resize`] is called.
    pub fn new(config: WhiteboardConfig) -> Self {
        Self {
            tools: config.tools.tool_state(),
            grid: config.tools.grid(),
            history: History::new(config.history_capacity),
            config,
            surface: None,
            stroke: StrokeState::Idle,
            canvas_origin: Point::ZERO,
            container_width: None,
            reference: None,
        }
    }

    /// Create a session and size it for the container in one go.
    pub fn with_container_width(
        config: WhiteboardConfig,
        container_width: f64,
    ) -> KolamResult<Self> {
        let mut whiteboard = Self::new(config);
        whiteboard.resize(container_width)?;
        Ok(whiteboard)
    }

    /// Rebuild the surface for a new container width.
    ///
    /// Any drawing is discarded and the history restarts from the fresh
    /// surface. An in-progress stroke is cancelled. Returns false, leaving
    /// everything untouched, if the container has no usable size yet.
    pub fn resize(&mut self, container_width: f64) -> KolamResult<bool> {
        let initialized = Surface::initialize(container_width, &self.config.surface, self.grid);
        let surface = match initialized {
            Ok(surface) => surface,
            Err(KolamError::InvalidDimensions { width, height }) => {
                log::warn!("Deferring surface creation: container is {}x{}", width, height);
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        self.stroke.cancel();
        self.history.reset(&surface)?;
        log::debug!("Surface resized to {}x{}", surface.width(), surface.height());
        self.surface = Some(surface);
        self.container_width = Some(container_width);
        Ok(true)
    }

    /// Set where the canvas sits in client coordinates.
    pub fn set_canvas_origin(&mut self, origin: Point) {
        self.canvas_origin = origin;
    }

    /// Dispatch a pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> KolamResult<()> {
        match event {
            PointerEvent::Down { position } => self.pointer_down(position),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up | PointerEvent::Leave => self.pointer_up(),
        }
    }

    /// Start a stroke. A tap without movement leaves a dot.
    pub fn pointer_down(&mut self, client: Point) -> KolamResult<()> {
        if self.surface.is_none() {
            return Ok(());
        }
        let point = surface::to_local(client, self.canvas_origin);
        let tap = self.stroke.begin(point);
        self.draw_with_symmetry(tap);
        Ok(())
    }

    /// Extend the current stroke. Ignored while no stroke is active.
    pub fn pointer_move(&mut self, client: Point) -> KolamResult<()> {
        let point = surface::to_local(client, self.canvas_origin);
        if let Some(segment) = self.stroke.advance(point) {
            self.draw_with_symmetry(segment);
        }
        Ok(())
    }

    /// Finish the current stroke and record it in the history.
    pub fn pointer_up(&mut self) -> KolamResult<()> {
        if !self.stroke.end() {
            return Ok(());
        }
        match &self.surface {
            Some(surface) => self.history.commit(surface),
            None => Ok(()),
        }
    }

    /// Expand a raw segment with the active symmetry mode and rasterize every copy.
    fn draw_with_symmetry(&mut self, segment: Line) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        for line in self.tools.symmetry_mode().expand(segment, surface.size()) {
            raster::draw_segment(surface, line, &self.tools);
        }
    }

    /// Replace the tool state. Takes effect from the next segment.
    pub fn set_tools(&mut self, tools: ToolState) {
        self.tools = tools;
    }

    /// Update the tool state through a builder closure.
    pub fn update_tools(&mut self, update: impl FnOnce(ToolState) -> ToolState) {
        self.set_tools(update(self.tools));
    }

    pub fn set_color(&mut self, color: PaintColor) {
        self.update_tools(|t| t.with_color(color));
    }

    /// Set the brush width, clamped into `2..=24`.
    pub fn set_brush_width(&mut self, width: i64) {
        self.update_tools(|t| t.with_brush_width(width));
    }

    pub fn set_eraser(&mut self, is_eraser: bool) {
        self.update_tools(|t| t.with_eraser(is_eraser));
    }

    pub fn set_symmetry_mode(&mut self, mode: SymmetryMode) {
        self.update_tools(|t| t.with_symmetry_mode(mode));
    }

    /// Apply a partial toolbar change.
    ///
    /// Only the fields present are touched. Tool fields take effect from the
    /// next segment; an actual change in grid visibility or size rebuilds the
    /// surface, like a resize.
    pub fn apply_tool_update(&mut self, update: &ToolUpdate) -> KolamResult<()> {
        self.set_tools(update.apply_tools(self.tools));
        self.set_grid(update.apply_grid(self.grid))
    }

    pub fn set_show_grid(&mut self, show_grid: bool) -> KolamResult<()> {
        self.set_grid(GridOptions::new(show_grid, self.grid.grid_size() as i64))
    }

    pub fn set_grid_size(&mut self, grid_size: i64) -> KolamResult<()> {
        self.set_grid(GridOptions::new(self.grid.show_grid, grid_size))
    }

    fn set_grid(&mut self, grid: GridOptions) -> KolamResult<()> {
        if grid == self.grid {
            return Ok(());
        }
        self.grid = grid;
        if let Some(width) = self.container_width {
            self.resize(width)?;
        }
        Ok(())
    }

    /// Step back one history entry.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> KolamResult<bool> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(false);
        };
        self.history.undo(surface).inspect_err(|e| log::warn!("Undo failed: {}", e))
    }

    /// Step forward one history entry.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> KolamResult<bool> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(false);
        };
        self.history.redo(surface).inspect_err(|e| log::warn!("Redo failed: {}", e))
    }

    /// Wipe the drawing back to background and grid, as a new history entry.
    pub fn clear(&mut self) -> KolamResult<()> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        self.stroke.cancel();
        surface.repaint_background();
        self.history.commit(surface)
    }

    /// Encode the current raster as PNG.
    pub fn export_png(&self) -> KolamResult<Vec<u8>> {
        let surface = self
            .surface
            .as_ref()
            .ok_or_else(|| KolamError::Export("no drawing surface".to_string()))?;
        encode_png(surface.pixels()).map_err(|e| KolamError::Export(e.to_string()))
    }

    /// Encode the current raster as a `data:image/png` URL.
    pub fn export_data_url(&self) -> KolamResult<String> {
        self.export_png().map(|png| to_data_url(&png))
    }

    /// Package the current drawing with save-dialog metadata for storage.
    pub fn to_record(&self, metadata: KolamMetadata) -> KolamResult<KolamRecord> {
        metadata.validate()?;
        let png = self.export_png()?;
        let surface = self
            .surface
            .as_ref()
            .ok_or_else(|| KolamError::Export("no drawing surface".to_string()))?;
        KolamRecord::new(
            metadata,
            &png,
            (surface.width(), surface.height()),
            self.grid.grid_size(),
            self.tools.symmetry_mode(),
        )
    }

    pub fn set_reference_image(&mut self, reference: Option<ReferenceImage>) {
        self.reference = reference;
    }

    pub fn reference_image(&self) -> Option<&ReferenceImage> {
        self.reference.as_ref()
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn tools(&self) -> ToolState {
        self.tools
    }

    pub fn grid(&self) -> GridOptions {
        self.grid
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &WhiteboardConfig {
        &self.config
    }

    pub fn is_drawing(&self) -> bool {
        self.stroke.is_drawing()
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}
