//! Kolam records handed to storage when a drawing is saved.

use crate::error::{KolamError, KolamResult};
use crate::symmetry::SymmetryMode;
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 100;
/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Regional style of a kolam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Region {
    #[default]
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
    Mixed,
}

/// Difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// Occasion or festival a kolam is drawn for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Occasion {
    #[default]
    Daily,
    Diwali,
    Pongal,
    Onam,
    Wedding,
    Festival,
    Other,
}

/// User-entered details from the save dialog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KolamMetadata {
    pub title: String,
    pub description: String,
    pub region: Region,
    pub difficulty: Difficulty,
    pub occasion: Occasion,
}

impl KolamMetadata {
    /// Create metadata with a title and default classification.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Check the title and description limits.
    pub fn validate(&self) -> KolamResult<()> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(KolamError::InvalidRecord("title is required".to_string()));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(KolamError::InvalidRecord(format!(
                "title cannot exceed {} characters",
                MAX_TITLE_LEN
            )));
        }
        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(KolamError::InvalidRecord(format!(
                "description cannot exceed {} characters",
                MAX_DESCRIPTION_LEN
            )));
        }
        Ok(())
    }
}

/// A saved drawing: exported PNG plus metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KolamRecord {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub region: Region,
    pub difficulty: Difficulty,
    pub occasion: Occasion,
    pub grid_size: u32,
    pub symmetry: SymmetryMode,
    pub width: u32,
    pub height: u32,
    /// PNG bytes as base64.
    pub image_base64: String,
    /// Seconds since the Unix epoch.
    pub created_at: u64,
}

impl KolamRecord {
    /// Build a record from validated metadata and an exported image.
    pub fn new(
        metadata: KolamMetadata,
        png_data: &[u8],
        (width, height): (u32, u32),
        grid_size: u32,
        symmetry: SymmetryMode,
    ) -> KolamResult<Self> {
        metadata.validate()?;
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        Ok(Self {
            id: Uuid::new_v4(),
            title: metadata.title.trim().to_string(),
            description: metadata.description,
            region: metadata.region,
            difficulty: metadata.difficulty,
            occasion: metadata.occasion,
            grid_size,
            symmetry,
            width,
            height,
            image_base64: STANDARD.encode(png_data),
            created_at,
        })
    }

    /// Get the PNG bytes (decoded from base64).
    pub fn image_png(&self) -> Option<Vec<u8>> {
        STANDARD.decode(&self.image_base64).ok()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
