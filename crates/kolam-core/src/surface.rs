//! Surface manager: owns the raster buffer, its background and dot grid.

use crate::color::{GRID_DOT, PaintColor};
use crate::config::SurfaceConfig;
use crate::error::{KolamError, KolamResult};
use crate::raster;
use image::{Rgba, RgbaImage};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Smallest selectable grid size (dots per row).
pub const MIN_GRID_SIZE: u32 = 5;
/// Largest selectable grid size.
pub const MAX_GRID_SIZE: u32 = 15;
/// Grid size used when nothing else is configured.
pub const DEFAULT_GRID_SIZE: u32 = 7;
/// Radius of a guide dot in pixels.
pub const GRID_DOT_RADIUS: f64 = 2.0;

/// Dot grid display options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridOptions {
    pub show_grid: bool,
    grid_size: u32,
}

impl GridOptions {
    /// Create grid options, clamping the size into `5..=15`.
    pub fn new(show_grid: bool, grid_size: i64) -> Self {
        Self {
            show_grid,
            grid_size: grid_size.clamp(MIN_GRID_SIZE as i64, MAX_GRID_SIZE as i64) as u32,
        }
    }

    /// Grid options with the grid turned off.
    pub fn hidden() -> Self {
        Self::new(false, DEFAULT_GRID_SIZE as i64)
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Distance between neighboring dots on a canvas of the given size.
    pub fn step(&self, size: Size) -> f64 {
        size.width.min(size.height) / (self.grid_size as f64 + 1.0)
    }
}

impl Default for GridOptions {
    fn default() -> Self {
        Self::new(true, DEFAULT_GRID_SIZE as i64)
    }
}

/// Canvas height for a container of the given width.
pub fn canvas_height(container_width: f64, layout: &SurfaceConfig) -> f64 {
    (container_width * layout.aspect_ratio)
        .max(layout.min_height)
        .min(layout.max_height)
        .floor()
}

/// Resolve a client-space pointer position to canvas-local pixels.
pub fn to_local(client: Point, canvas_origin: Point) -> Point {
    Point::new(client.x - canvas_origin.x, client.y - canvas_origin.y)
}

/// The drawable raster surface.
#[derive(Debug, Clone)]
pub struct Surface {
    pixels: RgbaImage,
    background: PaintColor,
    grid: GridOptions,
}

impl Surface {
    /// Allocate a surface of explicit pixel dimensions and paint its background.
    pub fn new(
        width: u32,
        height: u32,
        background: PaintColor,
        grid: GridOptions,
    ) -> KolamResult<Self> {
        if width == 0 || height == 0 {
            return Err(KolamError::InvalidDimensions {
                width: width as f64,
                height: height as f64,
            });
        }

        let mut surface = Self {
            pixels: RgbaImage::new(width, height),
            background,
            grid,
        };
        surface.repaint_background();
        Ok(surface)
    }

    /// Size the surface from the container width.
    ///
    /// Containers wider than `layout.max_width` get a canvas of that width.
    /// Calling this again with the same width gives a surface of the same
    /// dimensions with a freshly painted background.
    pub fn initialize(
        container_width: f64,
        layout: &SurfaceConfig,
        grid: GridOptions,
    ) -> KolamResult<Self> {
        let width = container_width.min(layout.max_width).floor();
        let height = canvas_height(width, layout);
        if !container_width.is_finite() || !height.is_finite() || width < 1.0 || height < 1.0 {
            return Err(KolamError::InvalidDimensions {
                width: container_width,
                height,
            });
        }

        Self::new(width as u32, height as u32, layout.background, grid)
    }

    /// Fill with the background color and redraw the grid, discarding all strokes.
    pub fn repaint_background(&mut self) {
        let fill: Rgba<u8> = self.background.into();
        for pixel in self.pixels.pixels_mut() {
            *pixel = fill;
        }
        for dot in self.grid_dots() {
            raster::fill_disc(&mut self.pixels, dot, GRID_DOT_RADIUS, GRID_DOT);
        }
    }

    /// Centers of the guide dots, row by row. Empty when the grid is hidden.
    pub fn grid_dots(&self) -> Vec<Point> {
        if !self.grid.show_grid {
            return Vec::new();
        }

        let size = self.size();
        let step = self.grid.step(size);
        let along = |limit: f64| -> Vec<f64> {
            (1..).map(|i| i as f64 * step).take_while(|v| *v < limit).collect()
        };

        let xs = along(size.width);
        along(size.height)
            .into_iter()
            .flat_map(|y| xs.iter().map(move |&x| Point::new(x, y)))
            .collect()
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Surface size in pixels, as used by the symmetry transforms.
    pub fn size(&self) -> Size {
        Size::new(self.width() as f64, self.height() as f64)
    }

    pub fn background(&self) -> PaintColor {
        self.background
    }

    pub fn grid(&self) -> GridOptions {
        self.grid
    }

    /// Read access to the raster buffer.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut RgbaImage {
        &mut self.pixels
    }

    /// Replace the raster content with a buffer of identical dimensions.
    pub(crate) fn replace_pixels(&mut self, pixels: RgbaImage) -> KolamResult<()> {
        if pixels.dimensions() != self.pixels.dimensions() {
            return Err(KolamError::SnapshotDecode(format!(
                "snapshot is {}x{}, surface is {}x{}",
                pixels.width(),
                pixels.height(),
                self.width(),
                self.height()
            )));
        }
        self.pixels = pixels;
        Ok(())
    }
}
