//! Output port for renderers

use grain_core::Cell;

/// Anything that can paint individual cells.
///
/// `set_pixel` paints a cell in the particle color, `clear_pixel` paints it in
/// the background color. Implementations decide how to handle cells outside
/// their surface.
pub trait PixelSink {
    fn set_pixel(&mut self, cell: Cell);

    fn clear_pixel(&mut self, cell: Cell);
}

/// Collects painted cells in order; handy for tests and headless replay.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub set: Vec<Cell>,
    pub cleared: Vec<Cell>,
}

impl PixelSink for RecordingSink {
    fn set_pixel(&mut self, cell: Cell) {
        self.set.push(cell);
    }

    fn clear_pixel(&mut self, cell: Cell) {
        self.cleared.push(cell);
    }
}
