//! Raster encoding for history snapshots and exports, plus reference images.

use crate::error::{KolamError, KolamResult};
use base64::{Engine, engine::general_purpose::STANDARD};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Encode an RGBA buffer as an 8-bit RGBA PNG.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, png::EncodingError> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, image.width(), image.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(image.as_raw())?;
        writer.finish()?;
    }
    Ok(png_data)
}

/// Decode PNG bytes into an RGBA buffer.
pub fn decode_png(data: &[u8]) -> image::ImageResult<RgbaImage> {
    image::load_from_memory_with_format(data, image::ImageFormat::Png).map(|img| img.into_rgba8())
}

/// Wrap PNG bytes in a `data:` URL.
pub fn to_data_url(png_data: &[u8]) -> String {
    format!("data:{};base64,{}", ImageFormat::Png.mime_type(), STANDARD.encode(png_data))
}

/// Image format of a reference image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    WebP,
}

impl ImageFormat {
    /// Get MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::WebP => "image/webp",
        }
    }

    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "webp" => Some(ImageFormat::WebP),
            _ => None,
        }
    }

    /// Detect format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(ImageFormat::Png);
        }
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some(ImageFormat::WebP);
        }
        None
    }

    fn codec(self) -> image::ImageFormat {
        match self {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::WebP => image::ImageFormat::WebP,
        }
    }
}

/// A pre-rendered image shown beneath the drawing surface, e.g. a
/// generated or scanned pattern to trace over.
///
/// The engine keeps it alongside the session but never reads its pixels
/// and never composites it into exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceImage {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    /// Encoded image bytes as base64.
    pub data_base64: String,
}

impl ReferenceImage {
    /// Accept encoded image bytes, validating the format and reading the dimensions.
    pub fn from_bytes(data: &[u8]) -> KolamResult<Self> {
        let format = ImageFormat::from_magic_bytes(data)
            .ok_or_else(|| KolamError::UnsupportedImage("unrecognized image format".to_string()))?;
        let decoded = image::load_from_memory_with_format(data, format.codec())
            .map_err(|e| KolamError::UnsupportedImage(e.to_string()))?;

        Ok(Self {
            format,
            width: decoded.width(),
            height: decoded.height(),
            data_base64: STANDARD.encode(data),
        })
    }

    /// Get the raw image data (decoded from base64).
    pub fn data(&self) -> Option<Vec<u8>> {
        STANDARD.decode(&self.data_base64).ok()
    }
}
