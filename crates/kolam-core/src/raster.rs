//! Stroke rasterizer.
//!
//! Lines are painted as capsules: every pixel whose center lies within half
//! the brush width of the segment is covered. This gives round caps and
//! joins, and a zero-length segment becomes a disc. Coverage is binary, so
//! painting the same opaque segment twice leaves the buffer unchanged.

use crate::color::PaintColor;
use crate::surface::Surface;
use crate::tools::ToolState;
use image::RgbaImage;
use kurbo::{Line, Point, Vec2};

/// Draw one segment onto the surface with the given tool state.
///
/// The eraser paints the surface background color.
pub fn draw_segment(surface: &mut Surface, segment: Line, tools: &ToolState) {
    let color = tools.paint_color(surface.background());
    let radius = tools.brush_width() as f64 / 2.0;
    paint_capsule(surface.pixels_mut(), segment, radius, color);
}

/// Fill a disc of the given radius.
pub fn fill_disc(image: &mut RgbaImage, center: Point, radius: f64, color: PaintColor) {
    paint_capsule(image, Line::new(center, center), radius, color);
}

/// Paint all pixels within `radius` of the segment.
pub fn paint_capsule(image: &mut RgbaImage, segment: Line, radius: f64, color: PaintColor) {
    let Line { p0, p1 } = segment;
    if !(p0.is_finite() && p1.is_finite() && radius.is_finite()) || radius <= 0.0 {
        return;
    }

    let (width, height) = image.dimensions();
    let x_min = (p0.x.min(p1.x) - radius).floor().max(0.0);
    let y_min = (p0.y.min(p1.y) - radius).floor().max(0.0);
    let x_max = (p0.x.max(p1.x) + radius).ceil().min(width as f64);
    let y_max = (p0.y.max(p1.y) + radius).ceil().min(height as f64);
    if x_min >= x_max || y_min >= y_max {
        return;
    }

    let radius_sq = radius * radius;
    for y in y_min as u32..y_max as u32 {
        for x in x_min as u32..x_max as u32 {
            let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
            if distance_sq_to_segment(center, p0, p1) <= radius_sq {
                let dst = *image.get_pixel(x, y);
                image.put_pixel(x, y, color.blend_over(dst));
            }
        }
    }
}

/// Squared distance from a point to a line segment.
fn distance_sq_to_segment(point: Point, start: Point, end: Point) -> f64 {
    let line_vec: Vec2 = end - start;
    let point_vec: Vec2 = point - start;

    let line_len_sq = line_vec.hypot2();
    if line_len_sq < f64::EPSILON {
        return point_vec.hypot2();
    }

    let t = (point_vec.dot(line_vec) / line_len_sq).clamp(0.0, 1.0);
    let projection = start + line_vec * t;
    (point - projection).hypot2()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BACKGROUND;
    use crate::surface::GridOptions;
    use image::Rgba;

    const RED: PaintColor = PaintColor::rgb(255, 0, 0);

    fn blank(width: u32, height: u32) -> Surface {
        Surface::new(width, height, BACKGROUND, GridOptions::hidden()).unwrap()
    }

    fn painted(surface: &Surface) -> usize {
        surface
            .pixels()
            .pixels()
            .filter(|p| **p != Rgba::from(BACKGROUND))
            .count()
    }

    #[test]
    fn test_horizontal_segment() {
        let mut surface = blank(50, 50);
        let tools = ToolState::default().with_color(RED).with_brush_width(4);
        let line = Line::new(Point::new(10.0, 25.0), Point::new(40.0, 25.0));
        draw_segment(&mut surface, line, &tools);

        assert_eq!(*surface.pixels().get_pixel(25, 25), Rgba([255, 0, 0, 255]));
        assert_eq!(*surface.pixels().get_pixel(25, 24), Rgba([255, 0, 0, 255]));
        assert_eq!(*surface.pixels().get_pixel(25, 30), Rgba::from(BACKGROUND));
        // Round caps extend past the endpoints.
        assert_eq!(*surface.pixels().get_pixel(8, 25), Rgba([255, 0, 0, 255]));
        assert_eq!(*surface.pixels().get_pixel(5, 25), Rgba::from(BACKGROUND));
    }

    #[test]
    fn test_zero_length_segment_draws_dot() {
        let mut surface = blank(40, 40);
        let tools = ToolState::default().with_color(RED).with_brush_width(10);
        let p = Point::new(20.0, 20.0);
        draw_segment(&mut surface, Line::new(p, p), &tools);

        let count = painted(&surface);
        // Disc of diameter 10 covers roughly pi * 25 pixels.
        assert!(count > 60 && count < 100, "painted {}", count);
        assert_eq!(*surface.pixels().get_pixel(20, 20), Rgba([255, 0, 0, 255]));
        assert_eq!(*surface.pixels().get_pixel(20, 26), Rgba::from(BACKGROUND));
    }

    #[test]
    fn test_eraser_paints_background() {
        let mut surface = blank(40, 40);
        let line = Line::new(Point::new(5.0, 20.0), Point::new(35.0, 20.0));
        let pen = ToolState::default().with_color(RED).with_brush_width(6);
        draw_segment(&mut surface, line, &pen);
        assert!(painted(&surface) > 0);

        let eraser = pen.with_eraser(true).with_brush_width(12);
        draw_segment(&mut surface, line, &eraser);
        assert_eq!(painted(&surface), 0);
    }

    #[test]
    fn test_opaque_overdraw_is_idempotent() {
        let mut surface = blank(30, 30);
        let tools = ToolState::default().with_color(RED).with_brush_width(5);
        let line = Line::new(Point::new(3.0, 3.0), Point::new(27.0, 20.0));
        draw_segment(&mut surface, line, &tools);
        let once = surface.pixels().clone();
        draw_segment(&mut surface, line, &tools);
        assert_eq!(surface.pixels().as_raw(), once.as_raw());
    }

    #[test]
    fn test_off_canvas_segment_is_clipped() {
        let mut surface = blank(20, 20);
        let tools = ToolState::default().with_color(RED);
        let outside = Line::new(Point::new(-50.0, -50.0), Point::new(-30.0, -40.0));
        draw_segment(&mut surface, outside, &tools);
        assert_eq!(painted(&surface), 0);

        let crossing = Line::new(Point::new(-10.0, 10.0), Point::new(30.0, 10.0));
        draw_segment(&mut surface, crossing, &tools);
        assert!(painted(&surface) >= 20);
    }

    #[test]
    fn test_non_finite_points_are_ignored() {
        let mut image = RgbaImage::new(10, 10);
        let line = Line::new(Point::new(f64::NAN, 1.0), Point::new(5.0, 5.0));
        paint_capsule(&mut image, line, 2.0, RED);
        assert!(image.pixels().all(|p| p[3] == 0));
    }
}
