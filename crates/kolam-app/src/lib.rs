//! Kolam Studio Application
//!
//! Headless shell around `kolam-core`: replays drawing scripts, writes PNG
//! exports and manages the local kolam library.

mod error;
mod library;
mod script;

pub use error::{AppError, AppResult};
pub use library::{Library, parse_label, write_png};
pub use script::{Action, DEFAULT_CONTAINER_WIDTH, Script, apply};
