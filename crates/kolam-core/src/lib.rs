//! Kolam Studio Core Library
//!
//! Platform-agnostic drawing surface, symmetry engine and undo history for
//! the Kolam Studio whiteboard.

pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod history;
pub mod input;
pub mod raster;
pub mod record;
pub mod storage;
pub mod surface;
pub mod symmetry;
pub mod tools;
pub mod whiteboard;

pub use color::{PALETTE, PaintColor, Swatch};
pub use config::{SurfaceConfig, ToolConfig, ToolUpdate, WhiteboardConfig};
pub use error::{KolamError, KolamResult};
pub use export::{ImageFormat, ReferenceImage};
pub use history::{History, Snapshot};
pub use input::PointerEvent;
pub use record::{Difficulty, KolamMetadata, KolamRecord, Occasion, Region};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use surface::{GridOptions, Surface};
pub use symmetry::SymmetryMode;
pub use tools::{StrokeState, ToolState};
pub use whiteboard::Whiteboard;
