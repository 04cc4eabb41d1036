//! Text bounding boxes and centering.

/// Inked extent of a laid-out string, relative to its layout origin.
///
/// The origin is the top-left corner of the line: the left edge of the pen
/// start and the ascender line. `top` is therefore usually positive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextBox {
    /// Leftmost inked column.
    pub left: f32,
    /// Topmost inked row.
    pub top: f32,
    /// One past the rightmost inked column.
    pub right: f32,
    /// One past the bottommost inked row.
    pub bottom: f32,
}

impl TextBox {
    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Grow this box to also cover `other`.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

/// Layout origin that centers `text` on a `width` x `height` canvas.
///
/// Plain real-valued halving of the remaining space; the box offsets are not
/// compensated, so the origin is what gets centered, not the ink.
#[must_use]
pub fn center(width: u32, height: u32, text: TextBox) -> (f32, f32) {
    let x = (width as f32 - text.width()) / 2.0;
    let y = (height as f32 - text.height()) / 2.0;
    (x, y)
}
