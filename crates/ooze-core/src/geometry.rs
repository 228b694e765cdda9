//! Viewport and surface geometry.

use serde::{Deserialize, Serialize};

/// Terminal viewport measured in character cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub const fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    /// True when there is nothing to draw on.
    pub fn is_empty(&self) -> bool {
        self.cols == 0 || self.rows == 0
    }
}

/// Surface dimensions in pixel space.
///
/// Written only by the resize path; every agent update reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub w: f32,
    pub h: f32,
}

impl Bounds {
    pub const fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }

    /// Pixel bounds covered by `viewport` when each cell spans
    /// `cell_w` x `cell_h` pixels.
    pub fn from_viewport(viewport: Viewport, cell_w: u16, cell_h: u16) -> Self {
        Self {
            w: f32::from(viewport.cols) * f32::from(cell_w),
            h: f32::from(viewport.rows) * f32::from(cell_h),
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.w / 2.0, self.h / 2.0)
    }

    /// Whether a disk of radius `r` at (`x`, `y`) lies fully inside.
    pub fn contains_disk(&self, x: f32, y: f32, r: f32) -> bool {
        x - r >= 0.0 && x + r <= self.w && y - r >= 0.0 && y + r <= self.h
    }
}
