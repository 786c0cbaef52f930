//! Linear undo/redo over full-canvas snapshots.

use crate::error::{KolamError, KolamResult};
use crate::export::{decode_png, encode_png};
use crate::surface::Surface;

/// Maximum number of snapshots kept by default.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// An immutable PNG-encoded capture of the whole surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    png: Vec<u8>,
    width: u32,
    height: u32,
}

impl Snapshot {
    /// Capture the current surface content.
    pub fn capture(surface: &Surface) -> KolamResult<Self> {
        let png = encode_png(surface.pixels())
            .map_err(|e| KolamError::SnapshotEncode(e.to_string()))?;
        Ok(Self {
            png,
            width: surface.width(),
            height: surface.height(),
        })
    }

    /// Encoded PNG bytes.
    pub fn png(&self) -> &[u8] {
        &self.png
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Decode and paint this snapshot onto the surface.
    ///
    /// The surface is only touched once decoding has fully succeeded.
    fn restore(&self, surface: &mut Surface) -> KolamResult<()> {
        let pixels = decode_png(&self.png).map_err(|e| KolamError::SnapshotDecode(e.to_string()))?;
        surface.replace_pixels(pixels)
    }
}

/// Snapshot stack with a current index.
///
/// Entries after the index form the redo branch and are pruned by the next
/// commit. The stack holds at most `capacity` entries; the oldest is dropped
/// when a commit would exceed it.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Snapshot>,
    index: usize,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl History {
    /// Create an empty history. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            index: 0,
            capacity: capacity.max(1),
        }
    }

    /// Drop every entry and record the surface as the only one.
    pub fn reset(&mut self, surface: &Surface) -> KolamResult<()> {
        let snapshot = Snapshot::capture(surface)?;
        self.entries.clear();
        self.entries.push(snapshot);
        self.index = 0;
        Ok(())
    }

    /// Record the current surface after a stroke or clear.
    pub fn commit(&mut self, surface: &Surface) -> KolamResult<()> {
        let snapshot = Snapshot::capture(surface)?;
        if !self.entries.is_empty() {
            self.entries.truncate(self.index + 1);
        }
        self.entries.push(snapshot);

        if self.entries.len() > self.capacity {
            let excess = self.entries.len() - self.capacity;
            self.entries.drain(..excess);
        }
        self.index = self.entries.len() - 1;

        log::debug!("History commit: {} of {}", self.index + 1, self.entries.len());
        Ok(())
    }

    /// Step back one entry and repaint the surface from it.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self, surface: &mut Surface) -> KolamResult<bool> {
        if !self.can_undo() {
            return Ok(false);
        }
        self.entries[self.index - 1].restore(surface)?;
        self.index -= 1;
        Ok(true)
    }

    /// Step forward one entry and repaint the surface from it.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self, surface: &mut Surface) -> KolamResult<bool> {
        if !self.can_redo() {
            return Ok(false);
        }
        self.entries[self.index + 1].restore(surface)?;
        self.index += 1;
        Ok(true)
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() && self.index > 0
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Position of the entry currently shown.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The entry currently shown.
    pub fn current(&self) -> Option<&Snapshot> {
        self.entries.get(self.index)
    }
}
