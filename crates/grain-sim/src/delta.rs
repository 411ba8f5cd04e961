//! Per-frame repaint delta

use crate::sink::PixelSink;
use grain_core::Cell;

/// Cells whose occupancy changed during one frame.
///
/// `additions` became occupied, `removals` became vacant. A cell never appears
/// in both lists, and both are sorted top-to-bottom, left-to-right.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameDelta {
    pub additions: Vec<Cell>,
    pub removals: Vec<Cell>,
}

impl FrameDelta {
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    /// Total number of cells to repaint
    pub fn len(&self) -> usize {
        self.additions.len() + self.removals.len()
    }

    /// Paint this delta: removals in the background color, then additions in
    /// the particle color.
    pub fn apply<S: PixelSink + ?Sized>(&self, sink: &mut S) {
        for &cell in &self.removals {
            sink.clear_pixel(cell);
        }
        for &cell in &self.additions {
            sink.set_pixel(cell);
        }
    }
}
