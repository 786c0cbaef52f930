//! Symmetry engine: expands one raw stroke segment into its mirrored and
//! rotated copies.

use kurbo::{Affine, Line, Point, Size};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How many mirrored or rotated copies of each segment are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SymmetryMode {
    /// Free draw.
    #[default]
    None,
    /// Mirror left-right across the vertical center line.
    Vertical,
    /// Mirror top-bottom across the horizontal center line.
    Horizontal,
    /// 4-way mirror.
    Both,
    /// Four rotations about the center.
    #[serde(rename = "radial-4")]
    Radial4,
    /// Eight rotations about the center.
    #[serde(rename = "radial-8")]
    Radial8,
}

impl SymmetryMode {
    /// All modes in toolbar order.
    pub fn all() -> &'static [SymmetryMode] {
        &[
            SymmetryMode::None,
            SymmetryMode::Vertical,
            SymmetryMode::Horizontal,
            SymmetryMode::Both,
            SymmetryMode::Radial4,
            SymmetryMode::Radial8,
        ]
    }

    /// Wire identifier, e.g. `radial-4`.
    pub fn id(self) -> &'static str {
        match self {
            SymmetryMode::None => "none",
            SymmetryMode::Vertical => "vertical",
            SymmetryMode::Horizontal => "horizontal",
            SymmetryMode::Both => "both",
            SymmetryMode::Radial4 => "radial-4",
            SymmetryMode::Radial8 => "radial-8",
        }
    }

    /// Get display name for this mode.
    pub fn name(self) -> &'static str {
        match self {
            SymmetryMode::None => "None",
            SymmetryMode::Vertical => "Vertical",
            SymmetryMode::Horizontal => "Horizontal",
            SymmetryMode::Both => "Both",
            SymmetryMode::Radial4 => "4-Fold",
            SymmetryMode::Radial8 => "8-Fold",
        }
    }

    /// Short description shown under the name.
    pub fn description(self) -> &'static str {
        match self {
            SymmetryMode::None => "Free draw",
            SymmetryMode::Vertical => "Mirror left-right",
            SymmetryMode::Horizontal => "Mirror top-bottom",
            SymmetryMode::Both => "4-way mirror",
            SymmetryMode::Radial4 => "Radial 4x",
            SymmetryMode::Radial8 => "Radial 8x",
        }
    }

    /// Number of segments emitted per raw segment.
    pub fn multiplicity(self) -> usize {
        match self {
            SymmetryMode::None => 1,
            SymmetryMode::Vertical | SymmetryMode::Horizontal => 2,
            SymmetryMode::Both | SymmetryMode::Radial4 => 4,
            SymmetryMode::Radial8 => 8,
        }
    }

    /// Parse a mode name, falling back to [`SymmetryMode::None`] for anything unknown.
    pub fn parse_lossy(input: &str) -> Self {
        input.parse().unwrap_or_default()
    }

    /// The transforms applied to a raw segment on a canvas of the given size.
    ///
    /// The identity always comes first.
    pub fn transforms(self, size: Size) -> Vec<Affine> {
        let (w, h) = (size.width, size.height);
        let mirror_x = Affine::new([-1.0, 0.0, 0.0, 1.0, w, 0.0]);
        let mirror_y = Affine::new([1.0, 0.0, 0.0, -1.0, 0.0, h]);
        let mirror_xy = Affine::new([-1.0, 0.0, 0.0, -1.0, w, h]);

        match self {
            SymmetryMode::None => vec![Affine::IDENTITY],
            SymmetryMode::Vertical => vec![Affine::IDENTITY, mirror_x],
            SymmetryMode::Horizontal => vec![Affine::IDENTITY, mirror_y],
            SymmetryMode::Both => vec![Affine::IDENTITY, mirror_x, mirror_y, mirror_xy],
            SymmetryMode::Radial4 | SymmetryMode::Radial8 => {
                let center = Point::new(w / 2.0, h / 2.0);
                let n = self.multiplicity();
                (0..n)
                    .map(|i| {
                        if i == 0 {
                            Affine::IDENTITY
                        } else {
                            let degrees = 360.0 * i as f64 / n as f64;
                            Affine::rotate_about(degrees.to_radians(), center)
                        }
                    })
                    .collect()
            }
        }
    }

    /// Expand a raw segment into every segment this mode draws.
    pub fn expand(self, segment: Line, size: Size) -> Vec<Line> {
        self.transforms(size)
            .into_iter()
            .map(|affine| Line::new(affine * segment.p0, affine * segment.p1))
            .collect()
    }
}

impl fmt::Display for SymmetryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error for unrecognized mode names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSymmetryMode(pub String);

impl fmt::Display for UnknownSymmetryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown symmetry mode: {}", self.0)
    }
}

impl std::error::Error for UnknownSymmetryMode {}

impl FromStr for SymmetryMode {
    type Err = UnknownSymmetryMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SymmetryMode::all()
            .iter()
            .copied()
            .find(|mode| mode.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownSymmetryMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn assert_point_eq(actual: Point, expected: Point) {
        assert!(
            (actual.x - expected.x).abs() < EPS && (actual.y - expected.y).abs() < EPS,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    fn assert_line_eq(actual: Line, expected: Line) {
        assert_point_eq(actual.p0, expected.p0);
        assert_point_eq(actual.p1, expected.p1);
    }

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
        Line::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    #[test]
    fn test_multiplicity_matches_emitted_segments() {
        let size = Size::new(640.0, 480.0);
        let raw = seg(10.0, 20.0, 30.0, 45.0);
        for mode in SymmetryMode::all() {
            assert_eq!(mode.expand(raw, size).len(), mode.multiplicity(), "{}", mode);
        }
        assert_eq!(SymmetryMode::None.multiplicity(), 1);
        assert_eq!(SymmetryMode::Vertical.multiplicity(), 2);
        assert_eq!(SymmetryMode::Horizontal.multiplicity(), 2);
        assert_eq!(SymmetryMode::Both.multiplicity(), 4);
        assert_eq!(SymmetryMode::Radial4.multiplicity(), 4);
        assert_eq!(SymmetryMode::Radial8.multiplicity(), 8);
    }

    #[test]
    fn test_none_is_identity() {
        let raw = seg(1.5, 2.5, 3.5, 4.5);
        let out = SymmetryMode::None.expand(raw, Size::new(100.0, 100.0));
        assert_line_eq(out[0], raw);
    }

    #[test]
    fn test_vertical_and_horizontal_mirrors() {
        let size = Size::new(400.0, 300.0);
        let raw = seg(10.0, 20.0, 30.0, 40.0);

        let vertical = SymmetryMode::Vertical.expand(raw, size);
        assert_line_eq(vertical[1], seg(390.0, 20.0, 370.0, 40.0));

        let horizontal = SymmetryMode::Horizontal.expand(raw, size);
        assert_line_eq(horizontal[1], seg(10.0, 280.0, 30.0, 260.0));
    }

    #[test]
    fn test_both_on_400x300() {
        let size = Size::new(400.0, 300.0);
        let out = SymmetryMode::Both.expand(seg(100.0, 100.0, 120.0, 100.0), size);
        assert_line_eq(out[0], seg(100.0, 100.0, 120.0, 100.0));
        assert_line_eq(out[1], seg(300.0, 100.0, 280.0, 100.0));
        assert_line_eq(out[2], seg(100.0, 200.0, 120.0, 200.0));
        assert_line_eq(out[3], seg(300.0, 200.0, 280.0, 200.0));
    }

    #[test]
    fn test_radial4_quarter_turn() {
        let size = Size::new(200.0, 200.0);
        let out = SymmetryMode::Radial4.expand(seg(150.0, 100.0, 150.0, 80.0), size);
        assert_line_eq(out[0], seg(150.0, 100.0, 150.0, 80.0));
        assert_line_eq(out[1], seg(100.0, 150.0, 120.0, 150.0));
        assert_line_eq(out[2], seg(50.0, 100.0, 50.0, 120.0));
        assert_line_eq(out[3], seg(100.0, 50.0, 80.0, 50.0));
    }

    #[test]
    fn test_radial_consecutive_angles() {
        let size = Size::new(300.0, 300.0);
        // Midpoint sits exactly on the canvas center.
        let raw = seg(140.0, 145.0, 160.0, 155.0);

        for mode in [SymmetryMode::Radial4, SymmetryMode::Radial8] {
            let out = mode.expand(raw, size);
            let step = std::f64::consts::TAU / mode.multiplicity() as f64;
            for pair in out.windows(2) {
                let a = pair[0].p1 - pair[0].p0;
                let b = pair[1].p1 - pair[1].p0;
                let angle = a.cross(b).atan2(a.dot(b));
                assert!((angle - step).abs() < EPS, "{}: {} vs {}", mode, angle, step);
            }
            for line in &out {
                assert_point_eq(line.p0.midpoint(line.p1), Point::new(150.0, 150.0));
            }
        }
    }

    #[test]
    fn test_expand_is_pure() {
        let size = Size::new(123.0, 77.0);
        let raw = seg(3.0, 4.0, 50.0, 60.0);
        let first = SymmetryMode::Radial8.expand(raw, size);
        assert_eq!(first, SymmetryMode::Radial8.expand(raw, size));
    }

    #[test]
    fn test_parse_modes() {
        assert_eq!("radial-4".parse::<SymmetryMode>(), Ok(SymmetryMode::Radial4));
        assert_eq!("Both".parse::<SymmetryMode>(), Ok(SymmetryMode::Both));
        assert!("spiral".parse::<SymmetryMode>().is_err());
        assert_eq!(SymmetryMode::parse_lossy("spiral"), SymmetryMode::None);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&SymmetryMode::Radial8).unwrap();
        assert_eq!(json, "\"radial-8\"");
        let mode: SymmetryMode = serde_json::from_str("\"horizontal\"").unwrap();
        assert_eq!(mode, SymmetryMode::Horizontal);
    }
}
