//! Paint colors and the cultural palette.

use image::Rgba;
use peniko::Color;
use peniko::color::{Srgb, parse_color};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Paint color (RGBA8, straight alpha).
///
/// Serialized as a hex string, the same form the toolbar sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaintColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl PaintColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Whether painting this color replaces the destination pixel outright.
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Parse a palette name or id, or any CSS color (`#RGB`, `#RRGGBB`,
    /// `#RRGGBBAA`, `rgb(...)`, named colors).
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let swatch = PALETTE.iter().find(|swatch| {
            swatch.name.eq_ignore_ascii_case(input) || swatch.id.eq_ignore_ascii_case(input)
        });
        if let Some(swatch) = swatch {
            return Some(swatch.color);
        }

        let color: Color = parse_color(input).ok()?.to_alpha_color::<Srgb>();
        Some(color.into())
    }

    /// Format as `#RRGGBB`, or `#RRGGBBAA` when translucent.
    pub fn to_hex(self) -> String {
        if self.is_opaque() {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Source-over blend of `self` onto `dst`.
    pub fn blend_over(self, dst: Rgba<u8>) -> Rgba<u8> {
        if self.is_opaque() {
            return self.into();
        }
        if self.a == 0 {
            return dst;
        }

        let sa = self.a as f32 / 255.0;
        let da = dst[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        let channel = |s: u8, d: u8| -> u8 {
            let value = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
            value.round().clamp(0.0, 255.0) as u8
        };

        Rgba([
            channel(self.r, dst[0]),
            channel(self.g, dst[1]),
            channel(self.b, dst[2]),
            (out_a * 255.0).round() as u8,
        ])
    }
}

impl Default for PaintColor {
    fn default() -> Self {
        KUMKUM_RED
    }
}

impl From<Color> for PaintColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl Serialize for PaintColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PaintColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let input = String::deserialize(deserializer)?;
        Self::parse(&input)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color {:?}", input)))
    }
}

impl From<PaintColor> for Rgba<u8> {
    fn from(color: PaintColor) -> Self {
        Rgba([color.r, color.g, color.b, color.a])
    }
}

/// Paper-like background fill of the drawing surface.
pub const BACKGROUND: PaintColor = PaintColor::rgb(0xF5, 0xF2, 0xE6);

/// Color of the guide dots (`rgba(0, 0, 0, 0.2)`).
pub const GRID_DOT: PaintColor = PaintColor::new(0, 0, 0, 51);

/// Default brush color.
pub const KUMKUM_RED: PaintColor = PaintColor::rgb(0xE7, 0x4C, 0x3C);

/// A named palette entry.
#[derive(Debug, Clone, Copy)]
pub struct Swatch {
    /// Short identifier, e.g. `tamil`.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    pub color: PaintColor,
}

impl Swatch {
    pub const fn new(id: &'static str, name: &'static str, color: PaintColor) -> Self {
        Self { id, name, color }
    }
}

/// The regional palette offered by the toolbar.
pub const PALETTE: &[Swatch] = &[
    Swatch::new("tamil", "Tamil Orange", PaintColor::rgb(0xE6, 0x7E, 0x22)),
    Swatch::new("telugu", "Telugu Blue", PaintColor::rgb(0x34, 0x98, 0xDB)),
    Swatch::new("kannada", "Kannada Gold", PaintColor::rgb(0xF3, 0x9C, 0x12)),
    Swatch::new("malayalam", "Malayalam Green", PaintColor::rgb(0x27, 0xAE, 0x60)),
    Swatch::new("kumkum", "Kumkum Red", KUMKUM_RED),
    Swatch::new("white", "White", PaintColor::rgb(0xFF, 0xFF, 0xFF)),
    Swatch::new("black", "Black", PaintColor::rgb(0x00, 0x00, 0x00)),
];
